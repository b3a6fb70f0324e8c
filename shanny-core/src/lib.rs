//! # Shanny Core
//!
//! Core library for the Shanny Tech marketing site.
//!
//! ## Overview
//!
//! - **Hero carousel**: a headless slide-rotation engine with pause-on-hover,
//!   keyboard navigation and reduced-motion handling. State transitions live in
//!   [`carousel::CarouselController`]; [`carousel::CarouselHandle`] confines
//!   them to a single tokio task.
//! - **Layout measurement**: header/footer height tracking that keeps fixed
//!   chrome from overlapping content ([`layout`]).
//! - **Assets**: an explicitly owned image preload cache ([`assets`]).
//! - **Services catalog**: search, tag chips and slug lookup ([`catalog`]).
//! - **Contact domain**: validation, notification and persistence ports for
//!   the contact form ([`contact`], [`database`]).
//! - **Rate limiting**: fixed-window limiter used by the HTTP layer.
//! - **Preferences**: theme and cookie-consent helpers.
//!
//! ## Feature Flags
//!
//! - `database`: PostgreSQL repository implementations (enabled by default)
//!
//! ## Platform seams
//!
//! Nothing in this crate touches a DOM. Platform signals arrive through
//! [`carousel::MotionPreferenceSource`], [`layout::LayoutProbe`] and
//! [`layout::LayoutSignals`], so any host (wasm bridge, native shell, tests)
//! can drive the engines.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Image discovery and preload cache
pub mod assets;

/// Hero carousel engine
pub mod carousel;

/// Services catalog filtering and lookup
pub mod catalog;

mod clock;

/// Contact form validation and notification
pub mod contact;

/// Persistence ports and implementations
pub mod database;

/// Error types shared across modules
pub mod error;

/// Header/footer measurement and scroll helpers
pub mod layout;

/// Theme and cookie-consent preferences
pub mod preferences;

/// Request rate limiting
pub mod rate_limit;

pub use assets::{HttpImageLoader, ImageCache, ImageLoader, ImageStatus};
pub use carousel::{
    CarouselController, CarouselHandle, CarouselSettings, CarouselTimer,
    ReducedMotionDetector, SlideDeck,
};
pub use catalog::{ServiceCatalog, ServiceFilter};
pub use contact::{
    ContactNotification, ContactValidationError, Mailer, validate_contact_form,
};
pub use database::{ContactMessageRepository, RepositoryError};
pub use error::EngineError;
pub use layout::{LayoutHandle, LayoutMonitor, LayoutProbe, LayoutSignals};
pub use rate_limit::{FixedWindowRateLimiter, RateLimitDecision, RateLimiter};

pub use shanny_model as model;
