//! Background music toggle.

use log::{info, warn};
use web_sys::HtmlAudioElement;

use crate::components::weather_overlay::random::RandomSource;

/// What the audio element should do after a toggle.
#[derive(Clone, Debug, PartialEq)]
pub enum MusicCommand {
	/// Start (or resume) `track`.
	Play(String),
	Pause,
	/// Nothing to play.
	Unavailable,
}

/// Toggle state. The track is picked once, on the first play.
#[derive(Debug, Default)]
pub struct MusicState {
	track: Option<String>,
	playing: bool,
}

impl MusicState {
	pub fn is_playing(&self) -> bool {
		self.playing
	}

	/// Playback failed; the next toggle tries to play again.
	pub fn halt(&mut self) {
		self.playing = false;
	}

	pub fn toggle(&mut self, tracks: &[String], rng: &mut dyn RandomSource) -> MusicCommand {
		if self.playing {
			self.playing = false;
			return MusicCommand::Pause;
		}
		if self.track.is_none() {
			self.track = pick_track(tracks, rng).map(str::to_string);
		}
		match &self.track {
			Some(track) => {
				self.playing = true;
				MusicCommand::Play(track.clone())
			}
			None => MusicCommand::Unavailable,
		}
	}
}

/// Uniformly pick one of `tracks`.
pub fn pick_track<'a>(tracks: &'a [String], rng: &mut dyn RandomSource) -> Option<&'a str> {
	if tracks.is_empty() {
		return None;
	}
	let i = rng.next_in(0.0, tracks.len() as f64) as usize;
	tracks.get(i.min(tracks.len() - 1)).map(String::as_str)
}

/// Looping audio element driven by [`MusicCommand`]s.
#[derive(Default)]
pub struct MusicPlayer {
	audio: Option<HtmlAudioElement>,
}

impl MusicPlayer {
	/// Apply `command`, returning the status text to show. `Err` means playback failed.
	pub fn apply(&mut self, command: &MusicCommand) -> Result<&'static str, &'static str> {
		match command {
			MusicCommand::Play(track) => {
				if self.audio.is_none() {
					match HtmlAudioElement::new_with_src(track) {
						Ok(audio) => {
							audio.set_loop(true);
							self.audio = Some(audio);
						}
						Err(e) => {
							warn!("notemood: cannot create audio element: {:?}", e);
							return Err("Music unavailable.");
						}
					}
				}
				if let Some(audio) = &self.audio {
					if let Err(e) = audio.play() {
						warn!("notemood: cannot play {}: {:?}", track, e);
						return Err("Music unavailable.");
					}
				}
				info!("notemood: playing {}", track);
				Ok("Music playing...")
			}
			MusicCommand::Pause => {
				if let Some(audio) = &self.audio {
					if let Err(e) = audio.pause() {
						warn!("notemood: cannot pause music: {:?}", e);
					}
				}
				Ok("Music paused.")
			}
			MusicCommand::Unavailable => Err("No music configured."),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::weather_overlay::random::OverlayRng;

	fn tracks() -> Vec<String> {
		vec!["a.mp3".to_string(), "b.mp3".to_string(), "c.mp3".to_string()]
	}

	#[test]
	fn pick_track_stays_in_list() {
		let tracks = tracks();
		let mut rng = OverlayRng::from_seed_u64(3);
		for _ in 0..100 {
			let track = pick_track(&tracks, &mut rng);
			assert!(track.is_some_and(|t| tracks.iter().any(|x| x == t)));
		}
		assert_eq!(pick_track(&[], &mut rng), None);
	}

	#[test]
	fn toggle_alternates_play_and_pause_on_one_track() {
		let tracks = tracks();
		let mut rng = OverlayRng::from_seed_u64(9);
		let mut music = MusicState::default();

		let MusicCommand::Play(first) = music.toggle(&tracks, &mut rng) else {
			panic!("expected play");
		};
		assert!(music.is_playing());
		assert_eq!(music.toggle(&tracks, &mut rng), MusicCommand::Pause);
		assert!(!music.is_playing());
		assert_eq!(music.toggle(&tracks, &mut rng), MusicCommand::Play(first));
	}

	#[test]
	fn empty_playlist_is_unavailable() {
		let mut rng = OverlayRng::from_seed_u64(1);
		let mut music = MusicState::default();
		assert_eq!(music.toggle(&[], &mut rng), MusicCommand::Unavailable);
		assert!(!music.is_playing());
	}

	#[test]
	fn halt_after_failed_play_retries_same_track() {
		let tracks = tracks();
		let mut rng = OverlayRng::from_seed_u64(4);
		let mut music = MusicState::default();
		let first = music.toggle(&tracks, &mut rng);
		music.halt();
		assert!(!music.is_playing());
		assert_eq!(music.toggle(&tracks, &mut rng), first);
	}
}
