//! Interval bookkeeping for automatic slide rotation

use std::time::Duration;

use tokio::time::Instant;

/// Recurring tick source for one carousel.
///
/// The timer never owns a task or callback; it is a single optional deadline
/// that the owner sleeps on. Restarting overwrites the deadline, so there is
/// never more than one pending tick, and `stop` clears it before returning.
#[derive(Debug, Clone)]
pub struct CarouselTimer {
    period: Duration,
    deadline: Option<Instant>,
    reduced_motion: bool,
}

impl CarouselTimer {
    pub fn new(period: Duration, reduced_motion: bool) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            deadline: None,
            reduced_motion,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Instant of the next tick, if armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Arms the timer for one full period from `now`, replacing any pending
    /// deadline. Returns `false` (and leaves the timer stopped) under reduced
    /// motion.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.reduced_motion {
            self.deadline = None;
            return false;
        }
        self.deadline = Some(now + self.period);
        true
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Updates the reduced-motion gate. Enabling it stops the timer.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
        if reduced_motion {
            self.stop();
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Consumes an elapsed deadline and re-arms for the following period.
    ///
    /// Returns `true` when a tick fired. Periods missed because the owner woke
    /// late collapse into a single tick.
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        // Stay on the original cadence: the next deadline is the first
        // period boundary strictly after `now`.
        let into_period = (now - deadline).as_nanos() % self.period.as_nanos();
        // Lossless for any period under ~584 years.
        let remaining = self.period - Duration::from_nanos(into_period as u64);
        self.deadline = Some(now + remaining);
        true
    }
}
