use std::path::Path;

use raylib::prelude::*;
use tracing::{debug, info};

use crate::audio::AudioBackend;
use crate::config::AutoplayPolicy;
use crate::error::{Error, PlayError, Result};

/// Opens the default audio output.
pub fn open_device() -> Result<RaylibAudio> {
    RaylibAudio::init_audio_device().map_err(|e| Error::AudioDevice(format!("{e:?}")))
}

/// Loads a looping music stream from `path`.
pub fn load_music<'aud>(audio: &'aud RaylibAudio, path: &Path) -> Result<Music<'aud>> {
    let name = path.to_str().ok_or_else(|| Error::Music {
        path: path.to_path_buf(),
        reason: "path is not valid UTF-8".into(),
    })?;
    let music = audio.new_music(name).map_err(|e| Error::Music {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!(?path, "loaded background music");
    Ok(music)
}

/// A raylib music stream behind the autoplay policy of the window.
///
/// With `AutoplayPolicy::RequireInteraction` unattended attempts are refused
/// until one attended attempt has been made, the way browsers gate media.
pub struct RaylibMusic<'aud> {
    music: Option<Music<'aud>>,
    policy: AutoplayPolicy,
    unlocked: bool,
    volume: f32,
}

impl<'aud> RaylibMusic<'aud> {
    pub fn new(music: Option<Music<'aud>>, policy: AutoplayPolicy) -> Self {
        Self { music, policy, unlocked: false, volume: 1.0 }
    }
}

impl AudioBackend for RaylibMusic<'_> {
    fn play(&mut self, attended: bool) -> std::result::Result<(), PlayError> {
        let music = self.music.as_mut().ok_or(PlayError::Unavailable)?;
        if attended {
            self.unlocked = true;
        }
        if self.policy == AutoplayPolicy::RequireInteraction && !self.unlocked {
            return Err(PlayError::Blocked);
        }
        if !music.is_stream_playing() {
            music.play_stream();
            debug!("music stream started");
        }
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.music.as_ref().is_some_and(|m| m.is_stream_playing())
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(music) = self.music.as_mut() {
            music.set_volume(volume);
        }
    }

    fn update(&mut self) {
        if let Some(music) = self.music.as_mut() {
            music.update_stream();
        }
    }
}
