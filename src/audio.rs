//! Background audio playback
//!
//! Plays the looping ambience track alongside the scene. Audio is strictly
//! best-effort: a missing file, a broken codec, or the absence of any
//! output device is logged once by the caller and the viewer runs on
//! silently.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use rodio::{Decoder, OutputStream, Sink, Source};
use thiserror::Error;

/// Errors produced while starting audio playback
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available: {0}")]
    Device(#[from] rodio::StreamError),

    #[error("failed to open audio file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode audio file {path}: {source}")]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },

    #[error("failed to start playback: {0}")]
    Play(#[from] rodio::PlayError),
}

/// Settings for the background track
#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub path: PathBuf,
    /// Playback volume in 0.0..=1.0.
    pub volume: f32,
    /// Start playing as soon as the player is created.
    pub autoplay: bool,
    /// Restart the track from the beginning when it ends.
    pub looped: bool,
}

impl AudioConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            volume: 0.5,
            autoplay: true,
            looped: true,
        }
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }
}

/// Owns the audio output stream and the sink playing the track
///
/// Dropping the player stops playback, so the app holds it for its whole
/// lifetime.
pub struct AudioPlayer {
    // The stream must stay alive for the sink to keep producing sound.
    _stream: OutputStream,
    sink: Sink,
}

impl AudioPlayer {
    /// Opens the output device and starts (or cues up) the configured track
    pub fn start(config: &AudioConfig) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        sink.set_volume(config.volume.clamp(0.0, 1.0));

        let file = File::open(&config.path).map_err(|source| AudioError::Open {
            path: config.path.clone(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
            path: config.path.clone(),
            source,
        })?;

        if config.looped {
            sink.append(decoder.repeat_infinite());
        } else {
            sink.append(decoder);
        }

        if !config.autoplay {
            sink.pause();
        }

        log::info!("audio track {} ready", config.path.display());

        Ok(Self {
            _stream: stream,
            sink,
        })
    }

    pub fn play(&self) {
        self.sink.play();
    }

    pub fn pause(&self) {
        self.sink.pause();
    }

    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    pub fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    pub fn volume(&self) -> f32 {
        self.sink.volume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AudioConfig::new("assets/lol.mp3");
        assert_eq!(config.path, PathBuf::from("assets/lol.mp3"));
        assert_eq!(config.volume, 0.5);
        assert!(config.autoplay);
        assert!(config.looped);
    }

    #[test]
    fn test_volume_is_clamped() {
        let config = AudioConfig::new("track.mp3").with_volume(1.5);
        assert_eq!(config.volume, 1.0);

        let config = AudioConfig::new("track.mp3").with_volume(-0.2);
        assert_eq!(config.volume, 0.0);
    }

    #[test]
    fn test_flags_can_be_disabled() {
        let config = AudioConfig::new("track.mp3")
            .with_autoplay(false)
            .with_looped(false);
        assert!(!config.autoplay);
        assert!(!config.looped);
    }
}
