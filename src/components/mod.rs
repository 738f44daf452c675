//! UI components.

pub mod weather_overlay;
