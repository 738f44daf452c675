//! notemood: a note pad with a mood-driven weather overlay.
//!
//! This crate provides a WASM note-taking page whose editor is covered by a
//! translucent animated weather layer. Picking a mood recolors the page and
//! switches the weather between sun, clouds, rain and snow. The note is kept
//! in `localStorage`, autosaved while it has unsaved edits, and can be
//! downloaded as a `.txt` file.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::BeforeUnloadEvent;

pub mod components;
pub mod config;
pub mod mood;
pub mod music;
pub mod note;

// Only linked for its JS entropy feature.
#[cfg(target_arch = "wasm32")]
use getrandom as _;

use components::weather_overlay::random::OverlayRng;
use components::weather_overlay::scheduler::{Slot, Ticker};
pub use components::weather_overlay::{EffectKind, OverlayState, WeatherOverlay};
pub use config::{OverlayConfig, load_config};
pub use mood::{Mood, MoodPalette, mood_look};
use music::{MusicPlayer, MusicState};
use note::{LocalStore, Notebook, export_file_name, unsaved_title};

const APP_TITLE: &str = "NoteMood";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("notemood: logging initialized");
}

/// Status bar text: the current mood, word and character counts, and a
/// trailing `*` while the note has unsaved edits.
pub fn status_line(mood: Option<Mood>, text: &str, dirty: bool) -> String {
	let head = match mood {
		Some(mood) => format!("Mood: {mood}"),
		None => "Welcome to NoteMood".to_string(),
	};
	let words = text.split_whitespace().count();
	let chars = text.chars().count();
	let marker = if dirty { " *" } else { "" };
	format!("{head} | {words} words, {chars} characters{marker}")
}

/// Main application component.
/// Reads the config from the DOM and renders the toolbar, editor and overlay.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let initial = config.mood.as_deref().and_then(Mood::from_label);
	if let (Some(label), None) = (config.mood.as_deref(), initial) {
		warn!("notemood: unknown mood {:?} in config", label);
	}

	let notebook = StoredValue::new_local(Notebook::open(LocalStore::open(&config.storage_key)));
	let (mood, set_mood) = signal(initial);
	let (text, set_text) = signal(notebook.with_value(|n| n.text().to_string()));
	let (dirty, set_dirty) = signal(false);
	let (notice, set_notice) = signal(None::<String>);
	// Derived, not memoized: picking a mood with the same weather still respawns it.
	let effect = Signal::derive(move || mood_look(mood.get()).1);
	let palette = Signal::derive(move || mood_look(mood.get()).0);

	let page_style = move || {
		format!(
			"display: flex; flex-direction: column; gap: 8px; height: 100vh; margin: 0; \
			 padding: 12px; box-sizing: border-box; background-color: {};",
			palette.get().background.to_css()
		)
	};
	let editor_style = move || {
		let p = palette.get();
		format!(
			"width: 100%; height: 100%; box-sizing: border-box; resize: none; border: none; \
			 border-radius: 8px; padding: 10px; font-size: 15px; background-color: {}; color: {};",
			p.text_background.to_css(),
			p.text_color.to_css()
		)
	};
	let label_style = move || format!("color: {};", palette.get().text_color.to_css());
	let button_style = move || {
		format!(
			"background-color: rgba(255,255,255,0.25); color: {}; border: none; \
			 border-radius: 6px; padding: 5px 10px; cursor: pointer;",
			palette.get().text_color.to_css()
		)
	};

	let on_mood = move |label: String| {
		let picked = Mood::from_label(&label);
		if let Some(m) = picked {
			info!("notemood: mood {} ({})", m, m.effect());
		}
		set_mood.set(picked);
	};

	let on_edit = move |value: String| {
		notebook.update_value(|n| n.edit(value.clone()));
		set_dirty.set(notebook.with_value(|n| n.is_dirty()));
		set_text.set(value);
	};

	let save = move || {
		if notebook.try_update_value(|n| n.save()).unwrap_or(false) {
			set_dirty.set(false);
			set_notice.set(Some("Saved".to_string()));
		} else {
			set_notice.set(Some("Cannot save note".to_string()));
		}
	};

	let save_as = move || {
		let Some(window) = web_sys::window() else {
			return;
		};
		let name = match window.prompt_with_message_and_default("Save note as", "note.txt") {
			Ok(Some(name)) => export_file_name(&name),
			_ => return,
		};
		let body = notebook.with_value(|n| n.text().to_string());
		match note::download(&name, &body) {
			Ok(()) => {
				save();
				set_notice.set(Some(format!("Saved as {name}")));
			}
			Err(e) => {
				warn!("notemood: cannot export note: {:?}", e);
				set_notice.set(Some("Cannot export note".to_string()));
			}
		}
	};

	let new_note = move || {
		if notebook.with_value(|n| n.is_dirty()) {
			let discard = web_sys::window()
				.and_then(|w| w.confirm_with_message("Discard unsaved changes?").ok())
				.unwrap_or(false);
			if !discard {
				return;
			}
		}
		notebook.update_value(|n| n.start_new());
		set_text.set(String::new());
		set_dirty.set(false);
		set_notice.set(Some("New note".to_string()));
	};

	let jukebox = StoredValue::new_local((
		MusicState::default(),
		MusicPlayer::default(),
		OverlayRng::from_entropy(),
	));
	let (music_on, set_music_on) = signal(false);
	let tracks = config.music_tracks.clone();
	let toggle_music = move || {
		let status = jukebox
			.try_update_value(|(state, player, rng)| {
				let command = state.toggle(&tracks, rng);
				let status = player.apply(&command).unwrap_or_else(|failed| {
					state.halt();
					failed
				});
				set_music_on.set(state.is_playing());
				status
			})
			.unwrap_or("Music unavailable.");
		set_notice.set(Some(status.to_string()));
	};

	let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
		if (ev.ctrl_key() || ev.meta_key()) && ev.key().eq_ignore_ascii_case("s") {
			ev.prevent_default();
			save();
		}
	};

	let autosave = Ticker::start(config.autosave_interval_ms, move || {
		if notebook.try_update_value(|n| n.autosave()).unwrap_or(false) {
			info!("notemood: autosaved note");
			set_dirty.set(false);
			set_notice.set(Some("Autosaved".to_string()));
		}
	});

	// Ask before leaving with unsaved edits.
	let before_unload: Slot<Closure<dyn FnMut(BeforeUnloadEvent)>> = Slot::new();
	before_unload.set(Closure::new(move |ev: BeforeUnloadEvent| {
		if notebook.try_with_value(|n| n.is_dirty()).unwrap_or(false) {
			ev.prevent_default();
			ev.set_return_value("");
		}
	}));
	if let Some(window) = web_sys::window() {
		before_unload.with(|cb| {
			if let Err(e) =
				window.add_event_listener_with_callback("beforeunload", cb.as_ref().unchecked_ref())
			{
				warn!("notemood: failed to add beforeunload listener: {:?}", e);
			}
		});
	}

	// Cleanup hooks must be Send; the handles never leave the UI thread.
	let shell = SendWrapper::new((autosave, before_unload));
	on_cleanup(move || {
		let (autosave, before_unload) = &*shell;
		autosave.stop();
		if let (Some(cb), Some(window)) = (before_unload.take(), web_sys::window()) {
			let _ = window
				.remove_event_listener_with_callback("beforeunload", cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=move || unsaved_title(APP_TITLE, dirty.get()) />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="notemood" style=page_style>
			<div class="top-bar" style=label_style>
				<button style=button_style on:click=move |_| new_note()>"New"</button>
				<button style=button_style on:click=move |_| save()>"Save"</button>
				<button style=button_style on:click=move |_| save_as()>"Save As"</button>
				<button style=button_style aria-pressed=move || music_on.get().to_string() on:click=move |_| toggle_music()>
					{move || if music_on.get() { "Music: on" } else { "Music: off" }}
				</button>
				<label for="mood-picker">" Mood: "</label>
				<select id="mood-picker" on:change=move |ev| on_mood(event_target_value(&ev))>
					<option value="" selected=move || mood.get().is_none()>
						"Pick a mood"
					</option>
					{Mood::ALL
						.into_iter()
						.map(|m| {
							view! {
								<option value=m.label() selected=move || mood.get() == Some(m)>
									{m.label()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</div>
			<div class="editor" style="position: relative; flex: 1; min-height: 0;">
				<textarea
					style=editor_style
					prop:value=move || text.get()
					on:input=move |ev| on_edit(event_target_value(&ev))
					on:keydown=on_keydown
				/>
				<WeatherOverlay
					kind=effect
					opacity=config.opacity
					tick_interval_ms=config.tick_interval_ms
					effect_override=config.effect.clone()
				/>
			</div>
			<div class="status" style=label_style>
				{move || status_line(mood.get(), &text.get(), dirty.get())}
				{move || notice.get().map(|n| format!(" | {n}"))}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_line_without_mood() {
		assert_eq!(
			status_line(None, "", false),
			"Welcome to NoteMood | 0 words, 0 characters"
		);
	}

	#[test]
	fn status_line_counts_words_and_chars() {
		assert_eq!(
			status_line(Some(Mood::Focus), "rain on  the\nroof", false),
			"Mood: Focus | 4 words, 17 characters"
		);
	}

	#[test]
	fn status_line_counts_unicode_chars() {
		assert_eq!(
			status_line(Some(Mood::Sleepy), "naïve", false),
			"Mood: Sleepy | 1 words, 5 characters"
		);
	}

	#[test]
	fn status_line_marks_unsaved_edits() {
		assert_eq!(
			status_line(Some(Mood::Calm), "draft", true),
			"Mood: Calm | 1 words, 5 characters *"
		);
	}

	#[test]
	fn title_marks_unsaved_edits() {
		assert_eq!(unsaved_title(APP_TITLE, true), "NoteMood*");
		assert_eq!(unsaved_title(APP_TITLE, false), "NoteMood");
	}
}
