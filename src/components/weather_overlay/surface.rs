//! Drawing surface abstraction.
//!
//! The renderer only needs a handful of primitives. Keeping them behind a trait
//! lets the browser canvas and an in-memory recorder share one rendering path.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// The primitives the weather renderer draws with.
pub trait Surface {
	/// Reset the given area to fully transparent.
	fn clear(&mut self, width: f64, height: f64);
	/// Alpha multiplied into every following draw call.
	fn set_global_alpha(&mut self, alpha: f64);
	/// Stroke a straight segment.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
	/// Fill an axis-aligned ellipse with no outline.
	fn fill_ellipse(&mut self, center: (f64, f64), rx: f64, ry: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		CanvasRenderingContext2d::set_global_alpha(self, alpha);
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn fill_ellipse(&mut self, center: (f64, f64), rx: f64, ry: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.ellipse(center.0, center.1, rx, ry, 0.0, 0.0, TAU);
		self.fill();
	}
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	Clear {
		width: f64,
		height: f64,
	},
	GlobalAlpha(f64),
	Line {
		from: (f64, f64),
		to: (f64, f64),
		color: Color,
		width: f64,
	},
	Ellipse {
		center: (f64, f64),
		rx: f64,
		ry: f64,
		color: Color,
	},
}

/// A surface that keeps every draw call instead of rasterizing it.
///
/// Two frames are identical exactly when their recorded op lists are equal.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
	pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
	pub fn new() -> Self {
		Self::default()
	}

	/// Ops recorded since the last clear.
	pub fn frame(&self) -> &[DrawOp] {
		let start = self
			.ops
			.iter()
			.rposition(|op| matches!(op, DrawOp::Clear { .. }))
			.map_or(0, |i| i + 1);
		&self.ops[start..]
	}

	pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
		self.frame()
			.iter()
			.filter(|op| matches!(op, DrawOp::Line { .. }))
	}

	pub fn ellipses(&self) -> impl Iterator<Item = &DrawOp> {
		self.frame()
			.iter()
			.filter(|op| matches!(op, DrawOp::Ellipse { .. }))
	}
}

impl Surface for RecordingSurface {
	fn clear(&mut self, width: f64, height: f64) {
		self.ops.push(DrawOp::Clear { width, height });
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		self.ops.push(DrawOp::GlobalAlpha(alpha));
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.ops.push(DrawOp::Line {
			from,
			to,
			color,
			width,
		});
	}

	fn fill_ellipse(&mut self, center: (f64, f64), rx: f64, ry: f64, color: Color) {
		self.ops.push(DrawOp::Ellipse {
			center,
			rx,
			ry,
			color,
		});
	}
}
