//! Leptos component wrapping the weather overlay canvas.
//!
//! The canvas is absolutely positioned over its parent and ignores pointer
//! input, so whatever sits beneath it (the note editor) stays fully usable.
//! A fixed-period timeout loop advances the particles and repaints. When the
//! component's owner is disposed the loop is stopped, the window listener is
//! removed and every callback is dropped.

use leptos::prelude::*;
use log::{info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::scheduler::{Slot, Ticker};
use super::state::OverlayState;
use super::theme::Theme;
use super::types::EffectKind;

/// Bundles the overlay state with the canvas it paints on.
struct OverlayContext {
	state: OverlayState,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl OverlayContext {
	fn repaint(&mut self) {
		self.state.render(&mut self.ctx);
	}

	/// Match the canvas backing store to its parent and respawn the field.
	fn resize(&mut self) {
		let (w, h) = parent_size(&self.canvas);
		self.canvas.set_width(w as u32);
		self.canvas.set_height(h as u32);
		self.state.on_resize(w, h);
		self.repaint();
	}
}

/// Everything the mounted overlay keeps alive between ticks.
#[derive(Clone, Default)]
struct OverlayHandles {
	context: Slot<OverlayContext>,
	resize: Slot<Closure<dyn FnMut()>>,
	ticker: Slot<Ticker>,
}

impl OverlayHandles {
	/// Stop ticking, unregister the resize listener and drop every callback.
	fn teardown(&self) {
		if let Some(ticker) = self.ticker.take() {
			ticker.stop();
		}
		if let Some(cb) = self.resize.take() {
			if let Some(window) = web_sys::window() {
				if let Err(e) =
					window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
				{
					warn!("notemood: failed to remove resize listener: {:?}", e);
				}
			}
		}
		if self.context.take().is_some() {
			info!("notemood: overlay torn down");
		}
	}
}

/// Renders the animated weather layer for `kind` over its parent element.
///
/// The parent should be positioned (e.g. `position: relative`) so the canvas
/// can stretch over it. Every change of `kind` respawns the particle field,
/// even when the new value equals the old one. `effect_override` names the
/// effect shown at mount instead of `kind`; an unknown name leaves the overlay
/// blank until `kind` changes.
#[component]
pub fn WeatherOverlay(
	#[prop(into)] kind: Signal<EffectKind>,
	#[prop(default = 0.7)] opacity: f64,
	#[prop(default = 50)] tick_interval_ms: u32,
	#[prop(default = None)] effect_override: Option<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handles = OverlayHandles::default();
	let handles_init = handles.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let handles = &handles_init;
		if !handles.context.is_empty() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("notemood: 2d canvas context unavailable, overlay disabled");
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut state = OverlayState::new(
			kind.get_untracked(),
			Theme::default().with_opacity(opacity),
		);
		state.on_become_visible(w, h);
		if let Some(name) = effect_override.as_deref() {
			state.set_effect_name(name);
		}
		info!("notemood: overlay shown at {}x{} ({})", w, h, state.kind());

		let mut overlay = OverlayContext { state, canvas, ctx };
		overlay.repaint();
		handles.context.set(overlay);

		let context_resize = handles.context.clone();
		handles.resize.set(Closure::new(move || {
			context_resize.with_mut(OverlayContext::resize);
		}));
		handles.resize.with(|cb| {
			if let Err(e) =
				window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
			{
				warn!("notemood: failed to add resize listener: {:?}", e);
			}
		});

		let context_tick = handles.context.clone();
		handles.ticker.set(Ticker::start(tick_interval_ms, move || {
			context_tick.with_mut(|c| {
				if c.state.tick() {
					c.repaint();
				}
			});
		}));
	});

	let context_kind = handles.context.clone();
	Effect::new(move |prev: Option<EffectKind>| {
		let next = kind.get();
		// The first run only subscribes; the mount effect spawns the initial field.
		if prev.is_some() {
			context_kind.with_mut(|c| {
				c.state.set_effect_kind(next);
				c.repaint();
			});
		}
		next
	});

	// Cleanup hooks must be Send; the handles never leave the UI thread.
	let handles_cleanup = SendWrapper::new(handles);
	on_cleanup(move || handles_cleanup.teardown());

	view! {
		<canvas
			node_ref=canvas_ref
			class="weather-overlay"
			aria-hidden="true"
			style="position: absolute; inset: 0; width: 100%; height: 100%; pointer-events: none;"
		/>
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Size of the element the overlay covers, or the window when detached.
fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	if let Some(parent) = canvas.parent_element() {
		return (parent.client_width() as f64, parent.client_height() as f64);
	}
	let window: Option<Window> = web_sys::window();
	let dim = |v: Option<Result<JsValue, JsValue>>| {
		v.and_then(|r| r.ok()).and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	(
		dim(window.as_ref().map(|w| w.inner_width())),
		dim(window.as_ref().map(|w| w.inner_height())),
	)
}
