//! Draws the active weather effect onto a [`Surface`].
//!
//! Every frame starts from a cleared, transparent surface so the note below
//! shows through. Drawing never mutates the field, so painting the same field
//! twice produces the same frame.

use super::field::ParticleField;
use super::surface::Surface;
use super::theme::{CloudStyle, RainStyle, SnowStyle, SunStyle, Theme};
use super::types::{EffectKind, Particle};

/// Renders one frame of the overlay.
///
/// `width`/`height` are the surface bounds to clear. An empty field (before the
/// overlay has been shown, or after an unknown effect name) leaves the surface
/// blank.
pub fn render(
	surface: &mut dyn Surface,
	field: &ParticleField,
	theme: &Theme,
	width: f64,
	height: f64,
) {
	surface.clear(width, height);

	if field.is_empty() {
		return;
	}

	surface.set_global_alpha(theme.opacity);

	let particles = field.particles();
	match field.kind() {
		EffectKind::Rain => draw_rain(surface, particles, &theme.rain),
		EffectKind::Snow => draw_snow(surface, particles, &theme.snow),
		EffectKind::Cloudy => draw_clouds(surface, particles, &theme.cloud),
		EffectKind::Sunny => draw_sun(surface, &theme.sun),
	}

	surface.set_global_alpha(1.0);
}

fn draw_rain(surface: &mut dyn Surface, particles: &[Particle], style: &RainStyle) {
	let (tx, ty) = style.tail;
	for p in particles {
		surface.stroke_line((p.x, p.y), (p.x + tx, p.y + ty), style.color, style.line_width);
	}
}

fn draw_snow(surface: &mut dyn Surface, particles: &[Particle], style: &SnowStyle) {
	for p in particles {
		surface.fill_ellipse((p.x, p.y), style.radius, style.radius, style.color);
	}
}

fn draw_clouds(surface: &mut dyn Surface, particles: &[Particle], style: &CloudStyle) {
	// No depth sorting: each cloud is painted over the previous ones.
	for p in particles {
		for puff in &style.puffs {
			surface.fill_ellipse((p.x + puff.dx, p.y + puff.dy), puff.rx, puff.ry, puff.color);
		}
	}
}

fn draw_sun(surface: &mut dyn Surface, style: &SunStyle) {
	let (cx, cy) = style.anchor;
	surface.fill_ellipse(style.anchor, style.radius, style.radius, style.color);

	let step = std::f64::consts::TAU / style.ray_count.max(1) as f64;
	for i in 0..style.ray_count {
		let (sin, cos) = (i as f64 * step).sin_cos();
		surface.stroke_line(
			(cx + style.ray_inner * cos, cy + style.ray_inner * sin),
			(cx + style.ray_outer * cos, cy + style.ray_outer * sin),
			style.ray_color,
			style.ray_width,
		);
	}
}
