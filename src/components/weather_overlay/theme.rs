//! Colors and stroke styles for each weather effect.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Color with an 8-bit alpha channel (0..=255).
	pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a: a as f64 / 255.0,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parse `#RRGGBB`. Anything else yields `None`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.strip_prefix('#')?;
		if digits.len() != 6 {
			return None;
		}
		let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
		Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
	}
}

/// One filled ellipse of a cloud, relative to the particle position.
#[derive(Clone, Copy, Debug)]
pub struct CloudPuff {
	pub dx: f64,
	pub dy: f64,
	pub rx: f64,
	pub ry: f64,
	pub color: Color,
}

/// Rain streak style.
#[derive(Clone, Debug)]
pub struct RainStyle {
	pub color: Color,
	pub line_width: f64,
	/// Streak end point relative to the particle.
	pub tail: (f64, f64),
}

/// Snow flake style.
#[derive(Clone, Debug)]
pub struct SnowStyle {
	pub color: Color,
	pub radius: f64,
}

/// Cloud style: puffs drawn in order, later ones on top.
#[derive(Clone, Debug)]
pub struct CloudStyle {
	pub puffs: [CloudPuff; 3],
}

/// Sun style. Positions are canvas-local and do not follow particles.
#[derive(Clone, Debug)]
pub struct SunStyle {
	pub anchor: (f64, f64),
	pub radius: f64,
	pub color: Color,
	pub ray_count: usize,
	pub ray_inner: f64,
	pub ray_outer: f64,
	pub ray_color: Color,
	pub ray_width: f64,
}

/// Complete visual theme for the overlay.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Global alpha applied on top of every per-effect color.
	pub opacity: f64,
	pub rain: RainStyle,
	pub snow: SnowStyle,
	pub cloud: CloudStyle,
	pub sun: SunStyle,
}

impl Theme {
	/// Soft pastel weather, tuned to sit over a light note background (default).
	pub fn pastel() -> Self {
		Self {
			opacity: 0.7,
			rain: RainStyle {
				color: Color::rgba8(180, 220, 250, 200),
				line_width: 1.0,
				tail: (-2.0, 12.0),
			},
			snow: SnowStyle {
				color: Color::rgba8(255, 255, 255, 230),
				radius: 2.3,
			},
			cloud: CloudStyle {
				puffs: [
					CloudPuff {
						dx: 0.0,
						dy: 0.0,
						rx: 70.0,
						ry: 30.0,
						color: Color::rgba8(230, 230, 240, 210),
					},
					CloudPuff {
						dx: 35.0,
						dy: -10.0,
						rx: 50.0,
						ry: 25.0,
						color: Color::rgba8(220, 220, 230, 180),
					},
					CloudPuff {
						dx: -25.0,
						dy: 8.0,
						rx: 40.0,
						ry: 20.0,
						color: Color::rgba8(225, 225, 235, 190),
					},
				],
			},
			sun: SunStyle {
				anchor: (80.0, 80.0),
				radius: 40.0,
				color: Color::rgba8(255, 255, 180, 220),
				ray_count: 12,
				ray_inner: 45.0,
				ray_outer: 70.0,
				ray_color: Color::rgba8(255, 255, 200, 180),
				ray_width: 1.0,
			},
		}
	}

	/// Same theme with a different global opacity, clamped to `[0, 1]`.
	pub fn with_opacity(self, opacity: f64) -> Self {
		let opacity = if opacity.is_finite() {
			opacity.clamp(0.0, 1.0)
		} else {
			self.opacity
		};
		Self { opacity, ..self }
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::pastel()
	}
}
