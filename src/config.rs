use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::constants::DEFAULT_VOLUME;

/// Whether music may start before the visitor has interacted with the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AutoplayPolicy {
    /// Unattended playback is allowed.
    Allow,
    /// Unattended playback is refused until the first key, click, scroll or touch.
    RequireInteraction,
}

/// A birthday greeting card with a photo slideshow and background music.
#[derive(Parser, Debug)]
#[command(name = "birthday-slideshow", version)]
pub struct Args {
    /// Directory containing the photos (png, jpg, jpeg, bmp, gif)
    pub image_dir: PathBuf,

    /// Background track; defaults to music.mp3 inside the image directory
    #[arg(long)]
    pub music: Option<PathBuf>,

    /// Who the greeting is for
    #[arg(long, default_value = "Sophie")]
    pub recipient: String,

    /// Age being celebrated
    #[arg(long, default_value_t = 28)]
    pub age: u32,

    /// Music volume when not muted, between 0.0 and 1.0
    #[arg(long, default_value_t = DEFAULT_VOLUME, value_parser = parse_volume)]
    pub volume: f32,

    #[arg(long, value_enum, default_value_t = AutoplayPolicy::Allow)]
    pub autoplay_policy: AutoplayPolicy,

    /// Start with the slideshow paused
    #[arg(long)]
    pub paused: bool,

    #[arg(long, default_value_t = 1280)]
    pub width: i32,

    #[arg(long, default_value_t = 800)]
    pub height: i32,
}

impl Args {
    /// The explicit `--music` path, or `music.mp3` next to the photos if it exists.
    pub fn music_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.music {
            return Some(path.clone());
        }
        let fallback = self.image_dir.join("music.mp3");
        fallback.is_file().then_some(fallback)
    }
}

fn parse_volume(s: &str) -> Result<f32, String> {
    let volume: f32 = s.parse().map_err(|e| format!("{s:?} is not a number: {e}"))?;
    if (0.0..=1.0).contains(&volume) {
        Ok(volume)
    } else {
        Err(format!("volume must be between 0.0 and 1.0, got {volume}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["birthday-slideshow", "photos"]).unwrap();
        assert_eq!(args.image_dir, PathBuf::from("photos"));
        assert_eq!(args.recipient, "Sophie");
        assert_eq!(args.age, 28);
        assert_eq!(args.volume, DEFAULT_VOLUME);
        assert_eq!(args.autoplay_policy, AutoplayPolicy::Allow);
        assert!(!args.paused);
    }

    #[test]
    fn policy_and_volume_flags() {
        let args = Args::try_parse_from([
            "birthday-slideshow",
            "photos",
            "--autoplay-policy",
            "require-interaction",
            "--volume",
            "0.25",
            "--paused",
        ])
        .unwrap();
        assert_eq!(args.autoplay_policy, AutoplayPolicy::RequireInteraction);
        assert_eq!(args.volume, 0.25);
        assert!(args.paused);
    }

    #[test]
    fn volume_out_of_range_is_rejected() {
        assert!(Args::try_parse_from(["birthday-slideshow", "photos", "--volume", "1.5"]).is_err());
        assert!(parse_volume("loud").is_err());
    }

    #[test]
    fn explicit_music_path_wins() {
        let args =
            Args::try_parse_from(["birthday-slideshow", "photos", "--music", "song.ogg"]).unwrap();
        assert_eq!(args.music_path(), Some(PathBuf::from("song.ogg")));
    }
}
