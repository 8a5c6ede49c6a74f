pub const FPS: u32 = 60;                          // Target frames per second

pub const LOADING_DURATION_MS: u64 = 1000;        // Loading screen before the page shows
pub const ADVANCE_INTERVAL_MS: u64 = 5000;        // Slideshow autoplay period
pub const PROMPT_DELAY_MS: u64 = 3000;            // Delay before the "tap for music" prompt
pub const AUTOPLAY_RETRY_MS: u64 = 500;           // Second unattended play attempt after mount

pub const DEFAULT_VOLUME: f32 = 0.7;              // Unmuted music volume

pub const FADE_DURATION: f32 = 0.5;               // Slide fade-in (seconds)

pub const PARTICLE_COUNT: usize = 20;
pub const PARALLAX_DIVISOR: f32 = 50.0;           // Mouse offset / divisor = layer offset (px)
