//! Moods offered in the picker, and the look each one gives the note.

use std::fmt;

use crate::components::weather_overlay::EffectKind;
use crate::components::weather_overlay::theme::Color;

/// A selectable mood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mood {
	Sleepy,
	Calm,
	Relaxed,
	Focus,
	Creative,
	Energetic,
}

/// Page and editor colors for a mood.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoodPalette {
	pub background: Color,
	pub text_background: Color,
	pub text_color: Color,
}

impl MoodPalette {
	const fn hex(background: u32, text_background: u32, text_color: u32) -> Self {
		Self {
			background: from_u32(background),
			text_background: from_u32(text_background),
			text_color: from_u32(text_color),
		}
	}

	/// Used before a mood is picked and for labels that match no mood.
	pub const fn fallback() -> Self {
		Self::hex(0xA3CEF1, 0xFFFFFF, 0x1F2937)
	}
}

const fn from_u32(rgb: u32) -> Color {
	Color::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

impl Mood {
	/// Picker order.
	pub const ALL: [Mood; 6] = [
		Mood::Sleepy,
		Mood::Calm,
		Mood::Relaxed,
		Mood::Focus,
		Mood::Creative,
		Mood::Energetic,
	];

	pub fn label(self) -> &'static str {
		match self {
			Mood::Sleepy => "Sleepy",
			Mood::Calm => "Calm",
			Mood::Relaxed => "Relaxed",
			Mood::Focus => "Focus",
			Mood::Creative => "Creative",
			Mood::Energetic => "Energetic",
		}
	}

	pub fn from_label(label: &str) -> Option<Self> {
		let label = label.trim();
		Self::ALL
			.into_iter()
			.find(|mood| mood.label().eq_ignore_ascii_case(label))
	}

	pub fn effect(self) -> EffectKind {
		match self {
			Mood::Sleepy => EffectKind::Snow,
			Mood::Calm | Mood::Relaxed => EffectKind::Cloudy,
			Mood::Focus => EffectKind::Rain,
			Mood::Creative | Mood::Energetic => EffectKind::Sunny,
		}
	}

	pub fn palette(self) -> MoodPalette {
		match self {
			Mood::Sleepy => MoodPalette::hex(0xB197FC, 0xEDE7FF, 0x12082B),
			Mood::Calm => MoodPalette::hex(0xB5E2FA, 0xFFFFFF, 0x1F2937),
			Mood::Relaxed => MoodPalette::hex(0x90E0EF, 0xF1FAFB, 0x1C2833),
			Mood::Focus => MoodPalette::hex(0xB3EFB6, 0xFFFFFF, 0x1F2937),
			Mood::Creative => MoodPalette::hex(0xFF9E7D, 0xFFE9D6, 0x341C00),
			Mood::Energetic => MoodPalette::hex(0xFFD166, 0xFFF8E1, 0x3A2500),
		}
	}
}

impl fmt::Display for Mood {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Palette and effect for an optional mood; `None` gets the fallback look.
pub fn mood_look(mood: Option<Mood>) -> (MoodPalette, EffectKind) {
	match mood {
		Some(mood) => (mood.palette(), mood.effect()),
		None => (MoodPalette::fallback(), EffectKind::Sunny),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_mood_maps_to_an_effect() {
		assert_eq!(Mood::Sleepy.effect(), EffectKind::Snow);
		assert_eq!(Mood::Calm.effect(), EffectKind::Cloudy);
		assert_eq!(Mood::Relaxed.effect(), EffectKind::Cloudy);
		assert_eq!(Mood::Focus.effect(), EffectKind::Rain);
		assert_eq!(Mood::Creative.effect(), EffectKind::Sunny);
		assert_eq!(Mood::Energetic.effect(), EffectKind::Sunny);
	}

	#[test]
	fn labels_round_trip() {
		for mood in Mood::ALL {
			assert_eq!(Mood::from_label(mood.label()), Some(mood));
		}
		assert_eq!(Mood::from_label("focus"), Some(Mood::Focus));
		assert_eq!(Mood::from_label("Grumpy"), None);
	}

	#[test]
	fn palette_colors_decode_hex() {
		let sleepy = Mood::Sleepy.palette();
		assert_eq!(sleepy.background, Color::from_hex("#B197FC").unwrap());
		assert_eq!(sleepy.text_color.to_css(), "#12082b");
	}

	#[test]
	fn unknown_mood_gets_fallback_look() {
		let (palette, effect) = mood_look(Mood::from_label("Grumpy"));
		assert_eq!(palette, MoodPalette::fallback());
		assert_eq!(palette.background.to_css(), "#a3cef1");
		assert_eq!(effect, EffectKind::Sunny);
	}
}
