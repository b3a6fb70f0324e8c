//! Shared types for the carousel module

use std::time::Duration;

/// Tunables for a carousel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSettings {
    /// Period between automatic advances.
    pub interval: Duration,
    /// Capacity of the command queue between handle and runtime task.
    pub command_buffer: usize,
}

impl CarouselSettings {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(4200);

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            command_buffer: 32,
        }
    }
}
