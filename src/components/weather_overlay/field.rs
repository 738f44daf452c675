//! The particle field: spawn positions and per-tick motion for each effect kind.

use log::debug;

use super::random::RandomSource;
use super::types::{EffectKind, Particle, sanitize_size};

/// Vertical step per tick for falling rain.
const RAIN_SPEED: f64 = 10.0;
/// Vertical step per tick for snow.
const SNOW_SPEED: f64 = 2.0;
/// Maximum lateral jitter per tick for snow.
const SNOW_JITTER: f64 = 0.8;
/// Respawn height for snow, slightly above the top edge.
const SNOW_RESPAWN_Y: f64 = -10.0;
/// Horizontal drift range per tick for clouds.
const CLOUD_DRIFT: (f64, f64) = (0.1, 0.3);
/// Vertical jitter per tick for clouds.
const CLOUD_BOB: f64 = 0.1;

/// Particles for the active effect kind, bound to the canvas size they were spawned for.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	particles: Vec<Particle>,
	kind: EffectKind,
	width: f64,
	height: f64,
}

impl ParticleField {
	/// An empty field. Nothing is drawn until [`ParticleField::initialize`] runs.
	pub fn new() -> Self {
		Self::default()
	}

	/// Discard every particle and spawn a fresh set for `kind` at the given size.
	pub fn initialize(
		&mut self,
		kind: EffectKind,
		width: f64,
		height: f64,
		rng: &mut dyn RandomSource,
	) {
		let (width, height) = sanitize_size(width, height);
		let top = kind.spawn_top();

		self.particles.clear();
		self.particles.extend((0..kind.particle_count()).map(|_| {
			Particle::new(rng.next_in(0.0, width), rng.next_in(top, height))
		}));
		self.kind = kind;
		self.width = width;
		self.height = height;

		debug!(
			"notemood: spawned {} {} particles at {}x{}",
			self.particles.len(),
			kind,
			width,
			height
		);
	}

	/// Advance every particle by one simulation step.
	pub fn advance(&mut self, rng: &mut dyn RandomSource) {
		let (width, height) = (self.width, self.height);
		match self.kind {
			EffectKind::Rain => {
				for p in &mut self.particles {
					*p = step_rain(*p, width, height, rng);
				}
			}
			EffectKind::Snow => {
				for p in &mut self.particles {
					*p = step_snow(*p, width, height, rng);
				}
			}
			EffectKind::Cloudy => {
				for p in &mut self.particles {
					*p = step_cloud(*p, width, height, rng);
				}
			}
			EffectKind::Sunny => {}
		}
	}

	/// Drop all particles, leaving the overlay blank until the next initialize.
	pub fn clear(&mut self) {
		self.particles.clear();
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Kind the current particles were spawned for.
	pub fn kind(&self) -> EffectKind {
		self.kind
	}

	/// Sanitized canvas size the current particles were spawned for.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}

/// Fall straight down; once past the bottom, re-enter at the top in a new random column.
fn step_rain(p: Particle, width: f64, height: f64, rng: &mut dyn RandomSource) -> Particle {
	if p.y < height {
		Particle::new(p.x, p.y + RAIN_SPEED)
	} else {
		Particle::new(rng.next_in(0.0, width), 0.0)
	}
}

fn step_snow(p: Particle, width: f64, height: f64, rng: &mut dyn RandomSource) -> Particle {
	if p.y < height {
		Particle::new(p.x + rng.next_in(-SNOW_JITTER, SNOW_JITTER), p.y + SNOW_SPEED)
	} else {
		Particle::new(rng.next_in(0.0, width), SNOW_RESPAWN_Y)
	}
}

/// Drift right with a slight bob, wrapping around both edges.
fn step_cloud(p: Particle, width: f64, height: f64, rng: &mut dyn RandomSource) -> Particle {
	Particle::new(
		wrap(p.x + rng.next_in(CLOUD_DRIFT.0, CLOUD_DRIFT.1), width),
		wrap(p.y + rng.next_in(-CLOUD_BOB, CLOUD_BOB), height),
	)
}

/// Modulo that always lands in `[0, m)`.
fn wrap(v: f64, m: f64) -> f64 {
	let r = v.rem_euclid(m);
	// rem_euclid can round up to exactly `m` for tiny negative inputs.
	if r >= m { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::weather_overlay::random::OverlayRng;

	fn spawned(kind: EffectKind, w: f64, h: f64, seed: u64) -> (ParticleField, OverlayRng) {
		let mut rng = OverlayRng::from_seed_u64(seed);
		let mut field = ParticleField::new();
		field.initialize(kind, w, h, &mut rng);
		(field, rng)
	}

	#[test]
	fn new_field_is_empty() {
		let field = ParticleField::new();
		assert!(field.is_empty());
		assert_eq!(field.len(), 0);
	}

	#[test]
	fn initialize_spawns_expected_count_per_kind() {
		for kind in EffectKind::ALL {
			let (field, _) = spawned(kind, 640.0, 480.0, 3);
			assert_eq!(field.len(), kind.particle_count(), "{kind}");
			assert_eq!(field.kind(), kind);
		}
	}

	#[test]
	fn precipitation_spawns_above_the_top_edge() {
		for kind in [EffectKind::Rain, EffectKind::Snow] {
			let (field, _) = spawned(kind, 800.0, 600.0, 11);
			for p in field.particles() {
				assert!((0.0..800.0).contains(&p.x), "{kind}: x {}", p.x);
				assert!((-100.0..600.0).contains(&p.y), "{kind}: y {}", p.y);
			}
		}
	}

	#[test]
	fn clouds_and_sun_spawn_inside_the_canvas() {
		for kind in [EffectKind::Cloudy, EffectKind::Sunny] {
			let (field, _) = spawned(kind, 300.0, 200.0, 5);
			for p in field.particles() {
				assert!((0.0..300.0).contains(&p.x));
				assert!((0.0..200.0).contains(&p.y));
			}
		}
	}

	#[test]
	fn zero_size_falls_back_to_default_canvas() {
		let (field, _) = spawned(EffectKind::Rain, 0.0, 0.0, 9);
		assert_eq!(field.size(), (800.0, 600.0));
		assert_eq!(field.len(), 120);
		assert!(field.particles().iter().all(|p| (0.0..800.0).contains(&p.x)));
	}

	#[test]
	fn reinitialize_discards_previous_particles() {
		let (mut field, mut rng) = spawned(EffectKind::Rain, 800.0, 600.0, 21);
		let rain: Vec<Particle> = field.particles().to_vec();
		field.initialize(EffectKind::Snow, 800.0, 600.0, &mut rng);
		assert_eq!(field.len(), 80);
		assert!(field.particles().iter().all(|p| !rain.contains(p)));
	}

	#[test]
	fn rain_falls_ten_or_respawns_at_top() {
		let (mut field, mut rng) = spawned(EffectKind::Rain, 800.0, 600.0, 1);
		// Force a few particles past the bottom edge to exercise respawn.
		field.particles[0].y = 600.0;
		field.particles[1].y = 655.5;
		let before = field.particles().to_vec();
		field.advance(&mut rng);

		for (old, new) in before.iter().zip(field.particles()) {
			if old.y < 600.0 {
				assert_eq!(new.y, old.y + 10.0);
				assert_eq!(new.x, old.x);
			} else {
				assert_eq!(new.y, 0.0);
				assert!((0.0..800.0).contains(&new.x));
			}
		}
	}

	#[test]
	fn snow_drifts_two_with_bounded_jitter() {
		let (mut field, mut rng) = spawned(EffectKind::Snow, 800.0, 600.0, 2);
		field.particles[0].y = 612.0;
		let before = field.particles().to_vec();
		field.advance(&mut rng);

		for (old, new) in before.iter().zip(field.particles()) {
			if old.y < 600.0 {
				assert_eq!(new.y, old.y + 2.0);
				assert!((new.x - old.x).abs() <= 0.8 + 1e-9);
			} else {
				assert_eq!(new.y, -10.0);
				assert!((0.0..800.0).contains(&new.x));
			}
		}
	}

	#[test]
	fn precipitation_stays_in_vertical_bounds_over_many_ticks() {
		for (kind, step) in [(EffectKind::Rain, 10.0), (EffectKind::Snow, 2.0)] {
			let (mut field, mut rng) = spawned(kind, 400.0, 300.0, 8);
			for _ in 0..500 {
				field.advance(&mut rng);
				for p in field.particles() {
					assert!(p.y >= -100.0 && p.y < 300.0 + step, "{kind}: y {}", p.y);
				}
			}
		}
	}

	#[test]
	fn every_precipitation_particle_eventually_respawns() {
		let (mut field, mut rng) = spawned(EffectKind::Rain, 800.0, 600.0, 13);
		// 70 ticks of 10px covers the full 700px spawn band.
		let mut respawned = vec![false; field.len()];
		for _ in 0..80 {
			field.advance(&mut rng);
			for (seen, p) in respawned.iter_mut().zip(field.particles()) {
				*seen |= p.y == 0.0;
			}
		}
		assert!(respawned.iter().all(|&r| r));
	}

	#[test]
	fn clouds_wrap_toroidally() {
		let (mut field, mut rng) = spawned(EffectKind::Cloudy, 200.0, 100.0, 4);
		field.particles[0] = Particle::new(199.95, 0.0);
		field.particles[1] = Particle::new(0.0, 99.99);
		for _ in 0..2000 {
			field.advance(&mut rng);
			for p in field.particles() {
				assert!((0.0..200.0).contains(&p.x), "x {}", p.x);
				assert!((0.0..100.0).contains(&p.y), "y {}", p.y);
			}
		}
	}

	#[test]
	fn clouds_drift_rightwards() {
		let (mut field, mut rng) = spawned(EffectKind::Cloudy, 10_000.0, 600.0, 6);
		field.particles[0] = Particle::new(100.0, 300.0);
		field.advance(&mut rng);
		let dx = field.particles()[0].x - 100.0;
		assert!(dx > 0.1 - 1e-9 && dx < 0.3 + 1e-9, "dx {dx}");
	}

	#[test]
	fn sunny_field_is_static() {
		let (mut field, mut rng) = spawned(EffectKind::Sunny, 800.0, 600.0, 10);
		let before = field.particles().to_vec();
		for _ in 0..10 {
			field.advance(&mut rng);
		}
		assert_eq!(field.particles(), before.as_slice());
	}

	#[test]
	fn advance_on_empty_field_is_noop() {
		let mut rng = OverlayRng::from_seed_u64(0);
		let mut field = ParticleField::new();
		field.advance(&mut rng);
		assert!(field.is_empty());
	}

	#[test]
	fn wrap_handles_negative_and_overflow() {
		assert_eq!(wrap(-1.0, 10.0), 9.0);
		assert_eq!(wrap(10.0, 10.0), 0.0);
		assert_eq!(wrap(12.5, 10.0), 2.5);
		let tiny = wrap(-1e-20, 10.0);
		assert!((0.0..10.0).contains(&tiny));
	}
}
