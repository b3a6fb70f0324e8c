//! Reduced-motion preference detection

use std::fmt;
use std::future;

use tokio::sync::watch;
use tracing::debug;

/// Media query the host is expected to evaluate.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Platform capability reporting the user's motion preference.
///
/// `current` returns `None` when the platform cannot answer at all, and
/// `subscribe` returns `None` when it cannot report changes. Neither is an
/// error.
pub trait MotionPreferenceSource: Send + Sync {
    fn current(&self) -> Option<bool>;

    fn subscribe(&self) -> Option<watch::Receiver<bool>>;
}

/// Source for hosts without media-query support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedMotionPreference;

impl MotionPreferenceSource for UnsupportedMotionPreference {
    fn current(&self) -> Option<bool> {
        None
    }

    fn subscribe(&self) -> Option<watch::Receiver<bool>> {
        None
    }
}

/// A fixed preference that never changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMotionPreference(pub bool);

impl MotionPreferenceSource for StaticMotionPreference {
    fn current(&self) -> Option<bool> {
        Some(self.0)
    }

    fn subscribe(&self) -> Option<watch::Receiver<bool>> {
        None
    }
}

/// Preference backed by a watch channel the host updates.
#[derive(Debug)]
pub struct WatchMotionPreference {
    tx: watch::Sender<bool>,
}

impl WatchMotionPreference {
    pub fn new(initial: bool) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Publishes a new preference to every subscribed detector.
    pub fn set(&self, reduced_motion: bool) {
        self.tx.send_if_modified(|current| {
            let changed = *current != reduced_motion;
            *current = reduced_motion;
            changed
        });
    }
}

impl MotionPreferenceSource for WatchMotionPreference {
    fn current(&self) -> Option<bool> {
        Some(*self.tx.borrow())
    }

    fn subscribe(&self) -> Option<watch::Receiver<bool>> {
        Some(self.tx.subscribe())
    }
}

/// Tracks whether the user prefers reduced motion.
///
/// Dropping the detector drops its subscription.
pub struct ReducedMotionDetector {
    value: bool,
    updates: Option<watch::Receiver<bool>>,
}

impl ReducedMotionDetector {
    pub fn new(source: &dyn MotionPreferenceSource) -> Self {
        let updates = source.subscribe();
        // Prefer the subscription's value so a change racing construction
        // is not lost.
        let value = match &updates {
            Some(rx) => *rx.borrow(),
            None => source.current().unwrap_or(false),
        };
        Self { value, updates }
    }

    /// Detector for a platform without the capability.
    pub fn unsupported() -> Self {
        Self::new(&UnsupportedMotionPreference)
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.value
    }

    pub fn is_subscribed(&self) -> bool {
        self.updates.is_some()
    }

    /// Waits for the preference to change and returns the new value.
    ///
    /// Pending forever when there is no subscription. If the source goes
    /// away the subscription is dropped and the last value is kept.
    pub async fn changed(&mut self) -> bool {
        loop {
            let Some(rx) = self.updates.as_mut() else {
                return future::pending().await;
            };
            if rx.changed().await.is_err() {
                debug!("motion preference source closed");
                self.updates = None;
                continue;
            }
            let value = *rx.borrow_and_update();
            if value != self.value {
                self.value = value;
                return value;
            }
        }
    }

    /// Synchronously folds in a pending change, if any.
    pub fn refresh(&mut self) -> bool {
        if let Some(rx) = self.updates.as_mut()
            && rx.has_changed().unwrap_or(false)
        {
            self.value = *rx.borrow_and_update();
        }
        self.value
    }
}

impl fmt::Debug for ReducedMotionDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducedMotionDetector")
            .field("value", &self.value)
            .field("subscribed", &self.updates.is_some())
            .finish()
    }
}
