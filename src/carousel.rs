use std::time::Duration;

use tracing::{debug, warn};

use crate::constants::ADVANCE_INTERVAL_MS;
use crate::timer::Interval;

/// Current slide position plus the autoplay switch.
///
/// `index` always stays in `0..len`; stepping past either end wraps around.
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    index: usize,
    autoplaying: bool,
    timer: Interval,
}

impl Carousel {
    /// Creates a carousel over `len` slides. `len` must be at least 1.
    pub fn new(len: usize, autoplaying: bool) -> Self {
        debug_assert!(len > 0, "carousel needs at least one slide");
        let mut timer = Interval::new(Duration::from_millis(ADVANCE_INTERVAL_MS));
        if autoplaying {
            timer.arm();
        }
        Self { len: len.max(1), index: 0, autoplaying, timer }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplaying
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    pub fn retreat(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }

    pub fn jump_to(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        } else {
            warn!(index, len = self.len, "ignoring jump past the last slide");
        }
    }

    /// Flips autoplay. Switching on starts a fresh period, switching off drops
    /// the pending advance.
    pub fn toggle_autoplay(&mut self) {
        self.autoplaying = !self.autoplaying;
        if self.autoplaying {
            self.timer.arm();
        } else {
            self.timer.cancel();
        }
        debug!(autoplaying = self.autoplaying, "slideshow autoplay toggled");
    }

    /// Advances the autoplay timer; returns true if the slide changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let fired = self.timer.tick(dt);
        for _ in 0..fired {
            self.advance();
        }
        fired > 0
    }

    /// Drops the autoplay timer for good (page teardown).
    pub fn stop(&mut self) {
        self.timer.cancel();
    }

    pub fn has_pending_advance(&self) -> bool {
        self.timer.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn period() -> Duration {
        Duration::from_millis(ADVANCE_INTERVAL_MS)
    }

    #[test]
    fn five_slides_wrap_both_ways() {
        let mut carousel = Carousel::new(5, false);
        for _ in 0..4 {
            carousel.advance();
        }
        assert_eq!(carousel.index(), 4);
        carousel.advance();
        assert_eq!(carousel.index(), 0);
        carousel.retreat();
        assert_eq!(carousel.index(), 4);
    }

    #[test]
    fn single_slide_stays_put() {
        let mut carousel = Carousel::new(1, true);
        carousel.advance();
        carousel.retreat();
        carousel.tick(period());
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn out_of_range_jump_is_ignored() {
        let mut carousel = Carousel::new(3, false);
        carousel.jump_to(1);
        carousel.jump_to(3);
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn autoplay_advances_once_per_interval() {
        let mut carousel = Carousel::new(3, true);
        let frame = Duration::from_millis(100);
        let mut changes = Vec::new();
        for _ in 0..200 {
            if carousel.tick(frame) {
                changes.push(carousel.index());
            }
        }
        // 20 s of frames = 4 periods
        assert_eq!(changes, vec![1, 2, 0, 1]);
    }

    #[test]
    fn toggling_off_stops_advancing() {
        let mut carousel = Carousel::new(4, true);
        carousel.tick(Duration::from_millis(4000));
        carousel.toggle_autoplay();
        assert!(!carousel.is_autoplaying());
        assert!(!carousel.tick(period() * 10));
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn toggling_back_on_does_not_double_fire() {
        let mut carousel = Carousel::new(4, true);
        carousel.tick(Duration::from_millis(4900));
        carousel.toggle_autoplay();
        carousel.toggle_autoplay();
        assert!(carousel.is_autoplaying());
        assert!(!carousel.tick(Duration::from_millis(4999)));
        assert!(carousel.tick(Duration::from_millis(1)));
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn toggle_autoplay_keeps_index() {
        let mut carousel = Carousel::new(4, false);
        carousel.jump_to(2);
        carousel.toggle_autoplay();
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn stop_cancels_pending_advance() {
        let mut carousel = Carousel::new(4, true);
        carousel.stop();
        assert!(!carousel.has_pending_advance());
        assert!(!carousel.tick(period() * 3));
    }

    proptest! {
        #[test]
        fn index_stays_in_range(len in 1usize..50, steps in prop::collection::vec(any::<bool>(), 0..200)) {
            let mut carousel = Carousel::new(len, false);
            for forward in steps {
                if forward { carousel.advance() } else { carousel.retreat() }
                prop_assert!(carousel.index() < len);
            }
        }

        #[test]
        fn advance_and_retreat_are_inverse(len in 1usize..50, start in 0usize..50) {
            let start = start % len;
            let mut carousel = Carousel::new(len, false);
            carousel.jump_to(start);
            carousel.advance();
            carousel.retreat();
            prop_assert_eq!(carousel.index(), start);
            carousel.retreat();
            carousel.advance();
            prop_assert_eq!(carousel.index(), start);
        }

        #[test]
        fn jump_lands_exactly(len in 1usize..50, prior in 0usize..50, target in 0usize..50) {
            let mut carousel = Carousel::new(len, false);
            carousel.jump_to(prior % len);
            carousel.jump_to(target % len);
            prop_assert_eq!(carousel.index(), target % len);
        }
    }
}
