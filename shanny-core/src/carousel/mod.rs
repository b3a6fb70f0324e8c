//! Hero carousel
//!
//! Rotates through a fixed deck of slides. The engine is split the same way
//! the rest of the crate is: plain state ([`CarouselController`],
//! [`CarouselTimer`]) that takes the current instant as an argument, and a
//! runtime ([`CarouselHandle`]) that owns that state inside one tokio task so
//! timer ticks and user commands are applied strictly in arrival order.

pub mod controller;
pub mod motion;
pub mod runtime;
pub mod slides;
pub mod timer;
pub mod types;

pub use controller::CarouselController;
pub use motion::{
    MotionPreferenceSource, REDUCED_MOTION_QUERY, ReducedMotionDetector,
    StaticMotionPreference, UnsupportedMotionPreference,
    WatchMotionPreference,
};
pub use runtime::{CarouselCommand, CarouselHandle};
pub use slides::{HERO_SLIDES, SlideDeck};
pub use timer::CarouselTimer;
pub use types::CarouselSettings;
