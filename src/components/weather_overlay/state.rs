//! Overlay lifecycle: which effect is active, how big the canvas is, and when
//! the particle field has to be regenerated.
//!
//! The host calls into [`OverlayState`] from its event handlers. Every change of
//! effect kind or canvas size throws the field away and spawns a fresh one;
//! particles are never rescaled or migrated between effects.

use log::{debug, warn};

use super::field::ParticleField;
use super::random::{OverlayRng, RandomSource};
use super::render;
use super::surface::Surface;
use super::theme::Theme;
use super::types::EffectKind;

/// Core overlay state, owned by the UI thread.
pub struct OverlayState {
	pub field: ParticleField,
	pub theme: Theme,
	kind: EffectKind,
	width: f64,
	height: f64,
	visible: bool,
	rng: Box<dyn RandomSource>,
}

impl OverlayState {
	pub fn new(kind: EffectKind, theme: Theme) -> Self {
		Self::with_random(kind, theme, Box::new(OverlayRng::from_entropy()))
	}

	/// Build with a caller-supplied random source.
	pub fn with_random(kind: EffectKind, theme: Theme, rng: Box<dyn RandomSource>) -> Self {
		Self {
			field: ParticleField::new(),
			theme,
			kind,
			width: 0.0,
			height: 0.0,
			visible: false,
			rng,
		}
	}

	/// First time the overlay is shown. Later calls are ignored.
	pub fn on_become_visible(&mut self, width: f64, height: f64) {
		if self.visible {
			return;
		}
		self.visible = true;
		self.width = width;
		self.height = height;
		self.regenerate();
	}

	/// Switch to a new effect. Always a full reset, even when the kind is unchanged.
	pub fn set_effect_kind(&mut self, kind: EffectKind) {
		debug!("notemood: effect {} -> {}", self.kind, kind);
		self.kind = kind;
		if self.visible {
			self.regenerate();
		}
	}

	/// Switch effect by name. Unknown names blank the overlay until the next
	/// valid kind or resize.
	pub fn set_effect_name(&mut self, name: &str) {
		match EffectKind::from_name(name) {
			Some(kind) => self.set_effect_kind(kind),
			None => {
				warn!("notemood: unknown effect {:?}, clearing overlay", name);
				self.field.clear();
			}
		}
	}

	/// Canvas was resized; respawn at the new size with the current kind.
	pub fn on_resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		if self.visible {
			self.regenerate();
		}
	}

	/// One simulation step. Returns whether a repaint is needed.
	pub fn tick(&mut self) -> bool {
		if self.field.is_empty() {
			return false;
		}
		self.field.advance(self.rng.as_mut());
		true
	}

	/// Paint the current field onto `surface`.
	pub fn render(&self, surface: &mut dyn Surface) {
		render::render(surface, &self.field, &self.theme, self.width, self.height);
	}

	pub fn kind(&self) -> EffectKind {
		self.kind
	}

	fn regenerate(&mut self) {
		self.field
			.initialize(self.kind, self.width, self.height, self.rng.as_mut());
	}
}
