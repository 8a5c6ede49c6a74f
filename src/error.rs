use std::path::PathBuf;

use thiserror::Error;

/// Startup failures: loading the images and opening the audio device.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no image files found in directory {0:?}")]
    NoImages(PathBuf),

    #[error("failed to decode image {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to create texture for {path:?}: {reason}")]
    Texture { path: PathBuf, reason: String },

    #[error("audio device unavailable: {0}")]
    AudioDevice(String),

    #[error("failed to load music {path:?}: {reason}")]
    Music { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a play attempt did not start playback. Neither case is fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    /// Unattended playback refused until the user interacts with the page.
    #[error("autoplay blocked until user interaction")]
    Blocked,

    /// No audio device or no track to play.
    #[error("no audio output available")]
    Unavailable,
}
