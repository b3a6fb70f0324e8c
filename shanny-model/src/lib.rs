//! Core data model definitions shared across Shanny crates.
#![allow(missing_docs)]

pub mod carousel;
pub mod contact;
pub mod error;
pub mod layout;
pub mod preferences;
pub mod rate_limit;
pub mod service;
pub mod slide;

// Intentionally curated re-exports for downstream consumers.
pub use carousel::{CarouselState, InteractionEvent, NavigationKey};
pub use contact::{
    ContactForm, ContactMessage, ContactSubmission, NewContactMessage,
    SubmissionContext,
};
pub use error::{ModelError, Result as ModelResult};
pub use layout::{LayoutDefaults, LayoutOffsets, LayoutTarget, LayoutTrigger};
pub use preferences::{ConsentDecision, ThemeMode};
pub use rate_limit::{RateLimitKey, RateLimitRule};
pub use service::Service;
pub use slide::{Slide, SlideCopy, SlideId};
