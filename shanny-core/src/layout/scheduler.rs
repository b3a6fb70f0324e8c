use std::time::Duration;

use shanny_model::LayoutTrigger;
use tokio::time::Instant;

/// Frame debounce for measurement requests.
///
/// At most one measurement is pending. A new request replaces the pending
/// one and pushes it to the next frame. `Load` is honoured only the first
/// time it is seen.
#[derive(Debug, Clone)]
pub struct MeasurementScheduler {
    frame: Duration,
    pending: Option<Instant>,
    load_seen: bool,
}

impl MeasurementScheduler {
    /// Roughly one display frame at 60Hz.
    pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            pending: None,
            load_seen: false,
        }
    }

    /// Schedules a measurement. Returns `false` when the trigger is ignored.
    pub fn request(&mut self, trigger: LayoutTrigger, now: Instant) -> bool {
        if trigger == LayoutTrigger::Load {
            if self.load_seen {
                return false;
            }
            self.load_seen = true;
        }
        self.pending = Some(now + self.frame);
        true
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns `true` once when the pending frame has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(at) if now >= at => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for MeasurementScheduler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn burst_of_requests_collapses_to_one() {
        let t0 = Instant::now();
        let mut scheduler = MeasurementScheduler::new(FRAME);
        scheduler.request(LayoutTrigger::Resize, t0);
        scheduler.request(LayoutTrigger::Resize, t0 + Duration::from_millis(5));
        scheduler.request(LayoutTrigger::FooterResize, t0 + Duration::from_millis(10));

        assert!(!scheduler.poll(t0 + FRAME));
        assert!(scheduler.poll(t0 + Duration::from_millis(10) + FRAME));
        assert!(!scheduler.poll(t0 + FRAME * 10));
    }

    #[test]
    fn load_is_only_honoured_once() {
        let t0 = Instant::now();
        let mut scheduler = MeasurementScheduler::default();
        assert!(scheduler.request(LayoutTrigger::Load, t0));
        scheduler.cancel();
        assert!(!scheduler.request(LayoutTrigger::Load, t0));
        assert!(!scheduler.is_pending());
        assert!(scheduler.request(LayoutTrigger::Resize, t0));
    }
}
