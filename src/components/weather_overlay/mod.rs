//! Animated weather overlay.
//!
//! Draws a translucent weather effect on a canvas stacked above other content:
//! - Rain streaks, drifting snow, slow clouds, or a static sun
//! - A particle field respawned whenever the effect or canvas size changes
//! - A fixed-period tick loop that never overlaps itself
//! - Transparent to pointer input
//!
//! # Example
//!
//! ```ignore
//! use notemood::components::weather_overlay::{EffectKind, WeatherOverlay};
//!
//! let (kind, set_kind) = signal(EffectKind::Rain);
//!
//! view! {
//!     <div style="position: relative;">
//!         <textarea />
//!         <WeatherOverlay kind=kind tick_interval_ms=50 />
//!     </div>
//! }
//! ```

mod component;
mod field;
pub mod random;
mod render;
pub mod scheduler;
mod state;
pub mod surface;
pub mod theme;
mod types;

pub use component::WeatherOverlay;
pub use field::ParticleField;
pub use render::render;
pub use state::OverlayState;
pub use theme::Theme;
pub use types::{EffectKind, FALLBACK_HEIGHT, FALLBACK_WIDTH, Particle, sanitize_size};
