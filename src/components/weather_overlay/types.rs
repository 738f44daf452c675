//! Effect kinds and the particle type shared by the field and the renderer.

use std::fmt;

/// Canvas size used when the host reports a degenerate (zero or negative) size.
pub const FALLBACK_WIDTH: f64 = 800.0;
pub const FALLBACK_HEIGHT: f64 = 600.0;

/// The weather visual currently shown by the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EffectKind {
	/// Static sun with rays. The default until a mood is picked.
	#[default]
	Sunny,
	/// Straight falling streaks.
	Rain,
	/// Slow drifting flakes with lateral jitter.
	Snow,
	/// A handful of puffy clouds drifting to the right.
	Cloudy,
}

impl EffectKind {
	pub const ALL: [EffectKind; 4] = [
		EffectKind::Sunny,
		EffectKind::Rain,
		EffectKind::Snow,
		EffectKind::Cloudy,
	];

	/// Number of particles a freshly initialized field holds for this kind.
	pub fn particle_count(self) -> usize {
		match self {
			EffectKind::Rain => 120,
			EffectKind::Snow => 80,
			EffectKind::Cloudy => 12,
			// The sun is drawn at a fixed anchor; these are never read.
			EffectKind::Sunny => 10,
		}
	}

	/// Lowest starting `y` for a fresh particle. Precipitation starts above
	/// the visible area so it falls in instead of popping into view.
	pub fn spawn_top(self) -> f64 {
		match self {
			EffectKind::Rain | EffectKind::Snow => -100.0,
			EffectKind::Cloudy | EffectKind::Sunny => 0.0,
		}
	}

	/// Lowercase name, as used in config and mood tables.
	pub fn name(self) -> &'static str {
		match self {
			EffectKind::Sunny => "sunny",
			EffectKind::Rain => "rain",
			EffectKind::Snow => "snow",
			EffectKind::Cloudy => "cloudy",
		}
	}

	/// Parse a kind from its name, ignoring case and surrounding whitespace.
	pub fn from_name(name: &str) -> Option<Self> {
		let name = name.trim();
		Self::ALL
			.into_iter()
			.find(|kind| kind.name().eq_ignore_ascii_case(name))
	}
}

impl fmt::Display for EffectKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A single point in canvas-local coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
}

impl Particle {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Replace a non-positive or non-finite canvas size with the fallback size.
///
/// Each axis is checked on its own, so a host reporting `0 x 400` gets `800 x 400`.
pub fn sanitize_size(width: f64, height: f64) -> (f64, f64) {
	let fix = |v: f64, fallback: f64| {
		if v.is_finite() && v > 0.0 { v } else { fallback }
	};
	(fix(width, FALLBACK_WIDTH), fix(height, FALLBACK_HEIGHT))
}
