//! HTTP backend for the Shanny Tech site.
//!
//! Accepts contact form submissions, stores them in PostgreSQL, emails an
//! owner notification, lists stored messages to administrators and serves
//! the hero carousel bootstrap data.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
