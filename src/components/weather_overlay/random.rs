//! Pluggable randomness for particle spawning and jitter.
//!
//! The field never touches a global generator. Everything random flows through
//! [`RandomSource`], so tests can drive the simulation from a fixed seed while
//! the browser build draws from OS entropy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniformly distributed floats.
pub trait RandomSource {
	/// Next value in `[low, high)`. Returns `low` when the range is empty.
	fn next_in(&mut self, low: f64, high: f64) -> f64;
}

impl RandomSource for ChaCha8Rng {
	fn next_in(&mut self, low: f64, high: f64) -> f64 {
		if high > low {
			self.gen_range(low..high)
		} else {
			low
		}
	}
}

/// ChaCha-backed generator owned by the overlay.
pub struct OverlayRng(ChaCha8Rng);

impl OverlayRng {
	/// Seed from the platform entropy source (`crypto.getRandomValues` in the browser).
	pub fn from_entropy() -> Self {
		Self(ChaCha8Rng::from_entropy())
	}

	/// Fixed seed, for reproducible runs.
	pub fn from_seed_u64(seed: u64) -> Self {
		Self(ChaCha8Rng::seed_from_u64(seed))
	}
}

impl Default for OverlayRng {
	fn default() -> Self {
		Self::from_entropy()
	}
}

impl RandomSource for OverlayRng {
	fn next_in(&mut self, low: f64, high: f64) -> f64 {
		self.0.next_in(low, high)
	}
}
