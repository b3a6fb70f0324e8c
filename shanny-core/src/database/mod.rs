//! Persistence for contact messages
//!
//! `ports` holds the storage traits the server depends on; concrete adapters
//! live under `infrastructure` behind the `database` feature.

#[cfg(feature = "database")]
pub mod infrastructure;
pub mod ports;

#[cfg(feature = "database")]
pub use infrastructure::postgres::{
    PostgresContactMessageRepository, connect_pool,
};
pub use ports::contact_messages::{
    ContactMessageRepository, RepositoryError, RepositoryResult,
};
