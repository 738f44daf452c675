//! Runtime configuration, read from an inline JSON script element.
//!
//! ```html
//! <script id="notemood-config" type="application/json">
//!   { "tick_interval_ms": 50, "opacity": 0.7, "mood": "Focus", "effect": "snow",
//!     "autosave_interval_ms": 120000, "storage_key": "notemood.note" }
//! </script>
//! ```
//!
//! Every field is optional; missing fields and a missing element both fall
//! back to [`OverlayConfig::default`].

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Id of the script element holding the JSON config.
pub const CONFIG_ELEMENT_ID: &str = "notemood-config";

/// Tracks offered by the music toggle when the config names none.
pub const DEFAULT_MUSIC_TRACKS: [&str; 5] = [
	"https://cdn.pixabay.com/audio/2025/04/26/audio_5281b3676b.mp3",
	"https://cdn.pixabay.com/audio/2023/07/30/audio_e0908e8569.mp3",
	"https://cdn.pixabay.com/audio/2025/07/25/audio_4bd532f458.mp3",
	"https://cdn.pixabay.com/audio/2022/05/27/audio_1808fbf07a.mp3",
	"https://cdn.pixabay.com/audio/2025/06/21/audio_ec132b92fb.mp3",
];

/// Overlay and shell settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
	/// Milliseconds between simulation ticks.
	pub tick_interval_ms: u32,
	/// Global opacity of the weather layer.
	pub opacity: f64,
	/// Mood selected at startup. `None` keeps the default sunny look.
	pub mood: Option<String>,
	/// Effect shown at startup regardless of mood, by name.
	pub effect: Option<String>,
	/// Milliseconds between autosaves of an unsaved note.
	pub autosave_interval_ms: u32,
	/// `localStorage` key the note is kept under.
	pub storage_key: String,
	/// Music toggle playlist; one track is picked at random.
	pub music_tracks: Vec<String>,
}

impl Default for OverlayConfig {
	fn default() -> Self {
		Self {
			tick_interval_ms: 50,
			opacity: 0.7,
			mood: None,
			effect: None,
			autosave_interval_ms: 120_000,
			storage_key: "notemood.note".to_string(),
			music_tracks: DEFAULT_MUSIC_TRACKS.iter().map(|t| t.to_string()).collect(),
		}
	}
}

impl OverlayConfig {
	/// Parse from JSON, falling back to defaults (with a warning) on malformed input.
	pub fn from_json(json: &str) -> Self {
		match serde_json::from_str::<OverlayConfig>(json) {
			Ok(config) => config.sanitized(),
			Err(e) => {
				warn!("notemood: ignoring malformed config: {}", e);
				Self::default()
			}
		}
	}

	/// Clamp values into ranges the overlay can use.
	pub fn sanitized(self) -> Self {
		let defaults = Self::default();
		Self {
			tick_interval_ms: self.tick_interval_ms.max(1),
			opacity: if self.opacity.is_finite() {
				self.opacity.clamp(0.0, 1.0)
			} else {
				defaults.opacity
			},
			mood: self.mood,
			effect: self.effect,
			autosave_interval_ms: self.autosave_interval_ms.max(1),
			storage_key: if self.storage_key.trim().is_empty() {
				defaults.storage_key
			} else {
				self.storage_key
			},
			music_tracks: self
				.music_tracks
				.into_iter()
				.filter(|t| !t.trim().is_empty())
				.collect(),
		}
	}
}

/// Load the config from the DOM, or defaults when the element is absent.
pub fn load_config() -> OverlayConfig {
	let Some(json) = config_text() else {
		return OverlayConfig::default();
	};
	let config = OverlayConfig::from_json(&json);
	info!(
		"notemood: config loaded (tick {}ms, opacity {}, autosave {}ms)",
		config.tick_interval_ms, config.opacity, config.autosave_interval_ms
	);
	config
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = OverlayConfig::default();
		assert_eq!(config.tick_interval_ms, 50);
		assert_eq!(config.opacity, 0.7);
		assert_eq!(config.mood, None);
		assert_eq!(config.effect, None);
		assert_eq!(config.autosave_interval_ms, 120_000);
		assert_eq!(config.storage_key, "notemood.note");
		assert_eq!(config.music_tracks.len(), 5);
	}

	#[test]
	fn partial_json_keeps_other_defaults() {
		let config = OverlayConfig::from_json(r#"{ "mood": "Focus" }"#);
		assert_eq!(config.mood.as_deref(), Some("Focus"));
		assert_eq!(config.tick_interval_ms, 50);
		assert_eq!(config.opacity, 0.7);
	}

	#[test]
	fn values_are_clamped() {
		let config = OverlayConfig::from_json(r#"{ "tick_interval_ms": 0, "opacity": 4.5 }"#);
		assert_eq!(config.tick_interval_ms, 1);
		assert_eq!(config.opacity, 1.0);

		let config = OverlayConfig::from_json(
			r#"{ "autosave_interval_ms": 0, "storage_key": "  ", "music_tracks": ["", "a.mp3"] }"#,
		);
		assert_eq!(config.autosave_interval_ms, 1);
		assert_eq!(config.storage_key, "notemood.note");
		assert_eq!(config.music_tracks, vec!["a.mp3".to_string()]);
	}

	#[test]
	fn effect_override_is_read_by_name() {
		let config = OverlayConfig::from_json(r#"{ "effect": "snow", "music_tracks": [] }"#);
		assert_eq!(config.effect.as_deref(), Some("snow"));
		assert!(config.music_tracks.is_empty());
	}

	#[test]
	fn malformed_json_falls_back() {
		assert_eq!(OverlayConfig::from_json("{ nope"), OverlayConfig::default());
		assert_eq!(
			OverlayConfig::from_json(r#"{ "tick_interval_ms": -3 }"#),
			OverlayConfig::default()
		);
	}
}
