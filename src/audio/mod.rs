pub mod raylib_backend;

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::constants::{AUTOPLAY_RETRY_MS, PROMPT_DELAY_MS};
use crate::error::PlayError;
use crate::timer::Timeout;

/// The media output the controller drives.
pub trait AudioBackend {
    /// Starts (or resumes) playback. `attended` is true when the call directly
    /// follows a user gesture.
    fn play(&mut self, attended: bool) -> Result<(), PlayError>;
    fn is_playing(&self) -> bool;
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    /// Called once per frame so streaming backends can refill their buffers.
    fn update(&mut self) {}
}

/// Kinds of user input that unlock playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Pointer,
    Key,
    Scroll,
    Touch,
}

/// Notifications coming back from the media output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    Started,
    Stopped,
    VolumeChanged(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioPhase {
    Idle,
    AttemptingPlay,
    Playing,
    Blocked,
}

/// Snapshot for the view. `muted` is only ever true while `playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AudioState {
    pub play_attempted: bool,
    pub playing: bool,
    pub muted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Autoplay,
    Interaction,
    Manual,
}

impl Trigger {
    fn attended(self) -> bool {
        !matches!(self, Trigger::Autoplay)
    }
}

/// One-shot latch shared by every interaction kind: the first interaction
/// after arming wins, every later one is a no-op.
#[derive(Debug, Default)]
struct InteractionLatch {
    armed: bool,
}

impl InteractionLatch {
    fn arm(&mut self) {
        self.armed = true;
    }

    fn fire(&mut self) -> bool {
        std::mem::take(&mut self.armed)
    }

    fn retire(&mut self) {
        self.armed = false;
    }
}

pub struct AudioController<B: AudioBackend> {
    backend: B,
    phase: AudioPhase,
    muted: bool,
    play_attempted: bool,
    volume: f32,
    latch: InteractionLatch,
    retry: Timeout,
    prompt: Timeout,
    show_prompt: bool,
    backend_playing: bool,
}

impl<B: AudioBackend> AudioController<B> {
    /// `volume` is the unmuted level in `[0, 1]`.
    pub fn new(mut backend: B, volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        backend.set_volume(volume);
        let backend_playing = backend.is_playing();
        Self {
            backend,
            phase: AudioPhase::Idle,
            muted: false,
            play_attempted: false,
            volume,
            latch: InteractionLatch::default(),
            retry: Timeout::new(),
            prompt: Timeout::new(),
            show_prompt: false,
            backend_playing,
        }
    }

    /// Starts negotiation: one unattended attempt now, one shortly after, and
    /// a retry on the first interaction if both are refused.
    pub fn begin_autoplay(&mut self) {
        self.latch.arm();
        self.attempt(Trigger::Autoplay);
        if self.phase != AudioPhase::Playing {
            self.retry.arm(Duration::from_millis(AUTOPLAY_RETRY_MS));
        }
    }

    /// Reports a user interaction. Only the first one after `begin_autoplay`
    /// can trigger an attempt.
    pub fn interact(&mut self, kind: Interaction) {
        if !self.latch.fire() {
            return;
        }
        if self.phase == AudioPhase::Playing {
            return;
        }
        debug!(?kind, "retrying music after first interaction");
        self.attempt(Trigger::Interaction);
    }

    /// The music button: start playback if stopped, otherwise flip mute.
    /// Either way the prompt goes away.
    pub fn toggle(&mut self) {
        self.hide_prompt();
        if !self.backend.is_playing() {
            self.apply_volume(self.volume);
            self.attempt(Trigger::Manual);
            return;
        }
        // muted follows the toggle, not the applied level: a zero unmuted
        // volume must still read as unmuted
        let muted = !self.muted;
        self.apply_volume(if muted { 0.0 } else { self.volume });
        self.muted = muted;
        info!(muted, "music toggled");
    }

    pub fn dismiss_prompt(&mut self) {
        self.hide_prompt();
    }

    /// Advances the retry and prompt timers and picks up start/stop changes
    /// from the backend.
    pub fn update(&mut self, dt: Duration) {
        self.backend.update();

        if self.retry.tick(dt) && self.phase != AudioPhase::Playing {
            self.attempt(Trigger::Autoplay);
        }
        if self.prompt.tick(dt) && self.phase != AudioPhase::Playing {
            self.show_prompt = true;
            debug!("showing music prompt");
        }

        let playing = self.backend.is_playing();
        if playing != self.backend_playing {
            self.on_event(if playing { MediaEvent::Started } else { MediaEvent::Stopped });
        }
    }

    pub fn on_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Started => {
                self.backend_playing = true;
                if self.phase != AudioPhase::Playing {
                    self.enter_playing();
                }
                self.muted = self.backend.volume() <= 0.0;
            }
            MediaEvent::Stopped => {
                self.backend_playing = false;
                self.phase = AudioPhase::Idle;
                debug!("music stopped");
            }
            MediaEvent::VolumeChanged(volume) => {
                self.muted = volume <= 0.0;
            }
        }
    }

    /// Cancels every pending timer and retires the interaction latch.
    pub fn teardown(&mut self) {
        self.retry.cancel();
        self.prompt.cancel();
        self.latch.retire();
    }

    pub fn state(&self) -> AudioState {
        let playing = self.phase == AudioPhase::Playing;
        AudioState {
            play_attempted: self.play_attempted,
            playing,
            muted: playing && self.muted,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> AudioPhase {
        self.phase
    }

    pub fn is_prompt_visible(&self) -> bool {
        self.show_prompt
    }

    pub fn has_pending_timers(&self) -> bool {
        self.retry.is_pending() || self.prompt.is_pending()
    }

    pub fn is_listening_for_interaction(&self) -> bool {
        self.latch.armed
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn attempt(&mut self, trigger: Trigger) {
        self.phase = AudioPhase::AttemptingPlay;
        self.play_attempted = true;
        let result = self.backend.play(trigger.attended());
        self.settle(trigger, result);
    }

    fn settle(&mut self, trigger: Trigger, result: Result<(), PlayError>) {
        match result {
            Ok(()) => {
                self.backend_playing = true;
                self.enter_playing();
                self.muted = false;
                info!(?trigger, "music playing");
            }
            Err(err) => {
                self.phase = AudioPhase::Blocked;
                match (trigger, err) {
                    (Trigger::Autoplay, PlayError::Blocked) => {
                        if !self.show_prompt && !self.prompt.is_pending() {
                            self.prompt.arm(Duration::from_millis(PROMPT_DELAY_MS));
                        }
                        info!("autoplay blocked, waiting for user interaction");
                    }
                    _ => warn!(?trigger, %err, "could not play music"),
                }
            }
        }
    }

    fn enter_playing(&mut self) {
        self.phase = AudioPhase::Playing;
        self.retry.cancel();
        self.hide_prompt();
        self.latch.retire();
    }

    fn hide_prompt(&mut self) {
        self.show_prompt = false;
        self.prompt.cancel();
    }

    fn apply_volume(&mut self, volume: f32) {
        self.backend.set_volume(volume);
        self.on_event(MediaEvent::VolumeChanged(volume));
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockBackend;
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn blocked_controller() -> AudioController<MockBackend> {
        let mut audio = AudioController::new(MockBackend::default(), 0.7);
        audio.begin_autoplay();
        audio
    }

    #[test]
    fn starts_idle_at_configured_volume() {
        let audio = AudioController::new(MockBackend::default(), 0.7);
        assert_eq!(audio.phase(), AudioPhase::Idle);
        assert_eq!(audio.state(), AudioState::default());
        assert_eq!(audio.backend().volume, 0.7);
    }

    #[test]
    fn allowed_autoplay_plays_immediately() {
        let mut audio = AudioController::new(MockBackend::scripted([Ok(())]), 0.7);
        audio.begin_autoplay();
        assert_eq!(audio.phase(), AudioPhase::Playing);
        assert!(!audio.has_pending_timers());
        assert!(!audio.is_listening_for_interaction());
        assert_eq!(
            audio.state(),
            AudioState { play_attempted: true, playing: true, muted: false }
        );
    }

    #[test]
    fn blocked_autoplay_retries_once_after_delay() {
        let mut audio = blocked_controller();
        assert_eq!(audio.phase(), AudioPhase::Blocked);
        audio.update(ms(499));
        assert_eq!(audio.backend().attempts.len(), 1);
        audio.update(ms(1));
        assert_eq!(audio.backend().attempts, vec![false, false]);
        audio.update(ms(5000));
        assert_eq!(audio.backend().attempts.len(), 2);
    }

    #[test]
    fn prompt_shows_three_seconds_after_block() {
        let mut audio = blocked_controller();
        audio.update(ms(2999));
        assert!(!audio.is_prompt_visible());
        audio.update(ms(1));
        assert!(audio.is_prompt_visible());
        assert_eq!(audio.phase(), AudioPhase::Blocked);
    }

    #[test]
    fn first_interaction_retries_exactly_once() {
        let mut audio = AudioController::new(
            MockBackend::scripted([
                Err(PlayError::Blocked),
                Err(PlayError::Blocked),
                Err(PlayError::Blocked),
            ]),
            0.7,
        );
        audio.begin_autoplay();
        audio.update(ms(500));
        audio.interact(Interaction::Scroll);
        audio.interact(Interaction::Pointer);
        audio.interact(Interaction::Key);
        audio.interact(Interaction::Touch);
        assert_eq!(audio.backend().attempts, vec![false, false, true]);
        assert_eq!(audio.phase(), AudioPhase::Blocked);
        assert!(!audio.is_listening_for_interaction());
    }

    #[test]
    fn interaction_unlocks_playback() {
        let mut audio = blocked_controller();
        audio.interact(Interaction::Key);
        assert_eq!(audio.phase(), AudioPhase::Playing);
        // prompt and retry are both gone
        audio.update(ms(10_000));
        assert!(!audio.is_prompt_visible());
        assert_eq!(audio.backend().attempts, vec![false, true]);
    }

    #[test]
    fn interaction_before_negotiation_is_ignored() {
        let mut audio = AudioController::new(MockBackend::default(), 0.7);
        audio.interact(Interaction::Pointer);
        assert!(audio.backend().attempts.is_empty());
    }

    #[test]
    fn manual_toggle_starts_then_mutes_then_unmutes() {
        let mut audio = AudioController::new(MockBackend::default(), 0.7);
        audio.toggle();
        assert_eq!(audio.state(), AudioState { play_attempted: true, playing: true, muted: false });

        audio.toggle();
        assert_eq!(audio.state(), AudioState { play_attempted: true, playing: true, muted: true });
        assert_eq!(audio.backend().volume, 0.0);
        assert!(audio.backend().playing);

        audio.toggle();
        assert_eq!(audio.state(), AudioState { play_attempted: true, playing: true, muted: false });
        assert_eq!(audio.backend().volume, 0.7);
    }

    #[test]
    fn rejected_manual_toggle_stays_stopped() {
        let mut audio = AudioController::new(
            MockBackend::scripted([
                Err(PlayError::Blocked),
                Err(PlayError::Blocked),
                Err(PlayError::Unavailable),
            ]),
            0.7,
        );
        audio.begin_autoplay();
        audio.update(ms(3000));
        assert!(audio.is_prompt_visible());

        audio.toggle();
        assert!(!audio.state().playing);
        assert!(audio.state().play_attempted);
        assert!(!audio.is_prompt_visible());
        // a rejected manual attempt does not schedule the prompt
        audio.update(ms(5000));
        assert!(!audio.is_prompt_visible());
    }

    #[test]
    fn manual_toggle_at_zero_volume_unmutes() {
        let mut audio = AudioController::new(MockBackend::default(), 0.0);
        audio.toggle();
        assert_eq!(audio.state(), AudioState { play_attempted: true, playing: true, muted: false });
        audio.toggle();
        assert_eq!(audio.state(), AudioState { play_attempted: true, playing: true, muted: true });
        audio.toggle();
        assert_eq!(audio.state(), AudioState { play_attempted: true, playing: true, muted: false });
        assert!(audio.backend().playing);
    }

    #[test]
    fn toggle_hides_prompt() {
        let mut audio = blocked_controller();
        audio.update(ms(3000));
        assert!(audio.is_prompt_visible());
        audio.toggle();
        assert!(!audio.is_prompt_visible());
        assert!(audio.state().playing);
    }

    #[test]
    fn dismissed_prompt_stays_hidden() {
        let mut audio = blocked_controller();
        audio.update(ms(3000));
        audio.dismiss_prompt();
        audio.update(ms(10_000));
        assert!(!audio.is_prompt_visible());
    }

    #[test]
    fn external_start_and_stop_are_tracked() {
        let mut audio = AudioController::new(MockBackend::default(), 0.7);
        audio.backend_mut().playing = true;
        audio.update(ms(16));
        assert_eq!(audio.phase(), AudioPhase::Playing);

        audio.backend_mut().playing = false;
        audio.update(ms(16));
        assert_eq!(audio.phase(), AudioPhase::Idle);
        assert!(!audio.state().muted);
    }

    #[test]
    fn start_at_zero_volume_reports_muted() {
        let mut audio = AudioController::new(MockBackend::default(), 0.7);
        audio.backend_mut().volume = 0.0;
        audio.backend_mut().playing = true;
        audio.on_event(MediaEvent::Started);
        assert!(audio.state().muted);
        audio.on_event(MediaEvent::VolumeChanged(0.5));
        assert!(!audio.state().muted);
    }

    #[test]
    fn teardown_leaves_nothing_pending() {
        let mut audio = blocked_controller();
        audio.teardown();
        assert!(!audio.has_pending_timers());
        assert!(!audio.is_listening_for_interaction());
        audio.update(ms(10_000));
        audio.interact(Interaction::Pointer);
        assert_eq!(audio.backend().attempts.len(), 1);
        assert!(!audio.is_prompt_visible());
    }
}
