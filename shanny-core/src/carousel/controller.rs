//! Carousel state machine
//!
//! All transitions take the current instant explicitly so the controller can
//! be driven by the runtime actor, by a host event loop, or directly in tests.

use shanny_model::{CarouselState, InteractionEvent, NavigationKey, Slide};
use tokio::time::Instant;
use tracing::debug;

use super::slides::SlideDeck;
use super::timer::CarouselTimer;
use super::types::CarouselSettings;

#[derive(Debug, Clone)]
pub struct CarouselController {
    deck: SlideDeck,
    state: CarouselState,
    timer: CarouselTimer,
    mounted: bool,
}

impl CarouselController {
    pub fn new(
        deck: SlideDeck,
        settings: &CarouselSettings,
        reduced_motion: bool,
    ) -> Self {
        let state = CarouselState::new(deck.len(), reduced_motion);
        Self {
            deck,
            state,
            timer: CarouselTimer::new(settings.interval, reduced_motion),
            mounted: false,
        }
    }

    /// Starts auto-rotation. The timer stays off for decks with fewer than
    /// two slides and under reduced motion.
    pub fn mount(&mut self, now: Instant) {
        self.mounted = true;
        self.restart_timer(now);
        debug!(
            slide_count = self.state.slide_count,
            reduced_motion = self.state.reduced_motion,
            rotating = self.timer.is_running(),
            "carousel mounted"
        );
    }

    /// Stops the timer unconditionally. Further ticks are ignored.
    pub fn teardown(&mut self) {
        self.timer.stop();
        self.mounted = false;
        debug!("carousel torn down");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.deck.get(self.state.active_index)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn timer(&self) -> &CarouselTimer {
        &self.timer
    }

    pub fn next(&mut self, now: Instant) -> bool {
        if !self.state.can_rotate() {
            return false;
        }
        self.advance();
        self.restart_timer(now);
        true
    }

    pub fn prev(&mut self, now: Instant) -> bool {
        if !self.state.can_rotate() {
            return false;
        }
        let n = self.state.slide_count;
        self.set_index((self.state.active_index + n - 1) % n);
        self.restart_timer(now);
        true
    }

    /// Jumps to `index`. Out-of-range requests are ignored.
    pub fn go_to(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.state.slide_count {
            debug!(
                index,
                slide_count = self.state.slide_count,
                "ignoring out-of-range slide request"
            );
            return false;
        }
        let changed = index != self.state.active_index;
        self.set_index(index);
        self.restart_timer(now);
        changed
    }

    pub fn pause(&mut self) -> bool {
        let changed = !self.state.paused;
        self.state.paused = true;
        changed
    }

    pub fn resume(&mut self) -> bool {
        let changed = self.state.paused;
        self.state.paused = false;
        changed
    }

    pub fn handle_key(&mut self, key: NavigationKey, now: Instant) -> bool {
        match key {
            NavigationKey::ArrowLeft => self.prev(now),
            NavigationKey::ArrowRight => self.next(now),
        }
    }

    pub fn handle_interaction(&mut self, event: InteractionEvent) -> bool {
        if event.pauses() {
            self.pause()
        } else {
            self.resume()
        }
    }

    /// Applies a runtime preference change. Enabling reduced motion stops the
    /// timer; disabling it starts a fresh full period.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool, now: Instant) -> bool {
        if self.state.reduced_motion == reduced_motion {
            return false;
        }
        self.state.reduced_motion = reduced_motion;
        self.timer.set_reduced_motion(reduced_motion);
        if !reduced_motion {
            self.restart_timer(now);
        }
        debug!(reduced_motion, "motion preference changed");
        true
    }

    /// Handles an elapsed timer deadline. Returns `true` when the active
    /// slide changed. Ticks while paused are consumed and dropped.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if !self.timer.poll_tick(now) {
            return false;
        }
        if self.state.paused || !self.state.can_rotate() {
            return false;
        }
        self.advance();
        true
    }

    /// Screen-reader text for the active slide.
    pub fn announcement(&self) -> Option<String> {
        let slide = self.active_slide()?;
        Some(format!(
            "Slide {} of {}: {}",
            self.state.active_index + 1,
            self.state.slide_count,
            slide.headline
        ))
    }

    fn advance(&mut self) {
        let n = self.state.slide_count;
        self.set_index((self.state.active_index + 1) % n);
    }

    fn set_index(&mut self, index: usize) {
        self.state.active_index = index;
        debug!(slide_index = index, "active slide changed");
    }

    fn restart_timer(&mut self, now: Instant) {
        if self.mounted && self.state.can_rotate() {
            self.timer.start(now);
        }
    }
}
