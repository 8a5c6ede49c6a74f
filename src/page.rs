use std::time::Duration;

use tracing::{debug, info};

use crate::audio::{AudioBackend, AudioController, AudioState, Interaction};
use crate::carousel::Carousel;
use crate::constants::LOADING_DURATION_MS;
use crate::state::PageState;
use crate::timer::Timeout;

/// Everything the visitor can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Previous,
    Next,
    ToggleAutoplay,
    JumpTo(usize),
    ToggleMusic,
    ToggleMessage,
    DismissPrompt,
    OpenPhoto(usize),
    ClosePhoto,
}

pub struct Page<B: AudioBackend> {
    state: PageState,
    loading: Timeout,
    carousel: Carousel,
    audio: AudioController<B>,
    show_message: bool,
    lightbox: Option<usize>,
}

impl<B: AudioBackend> Page<B> {
    /// Mounts the page over `slide_count` slides (at least one).
    pub fn mount(slide_count: usize, autoplay: bool, audio: AudioController<B>) -> Self {
        let mut loading = Timeout::new();
        loading.arm(Duration::from_millis(LOADING_DURATION_MS));
        info!(slide_count, autoplay, "page mounted");
        Self {
            state: PageState::Loading,
            loading,
            carousel: Carousel::new(slide_count, autoplay),
            audio,
            show_message: false,
            lightbox: None,
        }
    }

    /// Advances every timer by one frame.
    pub fn update(&mut self, dt: Duration) {
        match self.state {
            PageState::Loading => {
                if self.loading.tick(dt) {
                    self.state = PageState::Showing;
                    debug!("loading finished");
                    self.audio.begin_autoplay();
                }
            }
            PageState::Showing => {
                if self.carousel.tick(dt) {
                    debug!(index = self.carousel.index(), "slideshow advanced");
                }
                self.audio.update(dt);
            }
            PageState::Closed => {}
        }
    }

    /// Reports raw user input; this is what unlocks blocked music.
    pub fn interact(&mut self, kind: Interaction) {
        if self.state == PageState::Showing {
            self.audio.interact(kind);
        }
    }

    pub fn apply(&mut self, action: Action) {
        if self.state != PageState::Showing {
            return;
        }
        match action {
            Action::Previous => self.carousel.retreat(),
            Action::Next => self.carousel.advance(),
            Action::ToggleAutoplay => self.carousel.toggle_autoplay(),
            Action::JumpTo(index) => self.carousel.jump_to(index),
            Action::ToggleMusic => self.audio.toggle(),
            Action::ToggleMessage => self.show_message = !self.show_message,
            Action::DismissPrompt => self.audio.dismiss_prompt(),
            Action::OpenPhoto(index) if index < self.carousel.len() => self.lightbox = Some(index),
            Action::OpenPhoto(_) => {}
            Action::ClosePhoto => self.lightbox = None,
        }
    }

    /// Cancels every timer and listener. The page ignores all input afterwards.
    pub fn teardown(&mut self) {
        if self.state == PageState::Closed {
            return;
        }
        self.loading.cancel();
        self.carousel.stop();
        self.audio.teardown();
        debug_assert!(!self.carousel.has_pending_advance());
        debug_assert!(!self.audio.has_pending_timers() && !self.audio.is_listening_for_interaction());
        self.state = PageState::Closed;
        info!("page torn down");
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn audio(&self) -> AudioState {
        self.audio.state()
    }

    pub fn is_prompt_visible(&self) -> bool {
        self.audio.is_prompt_visible()
    }

    pub fn is_message_visible(&self) -> bool {
        self.show_message
    }

    pub fn lightbox(&self) -> Option<usize> {
        self.lightbox
    }

    #[cfg(test)]
    fn has_pending_timers(&self) -> bool {
        self.loading.is_pending() || self.carousel.has_pending_advance() || self.audio.has_pending_timers()
    }
}
