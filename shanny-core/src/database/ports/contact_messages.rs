use async_trait::async_trait;
use shanny_model::{ContactMessage, NewContactMessage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(String),

    #[error("stored row could not be decoded: {0}")]
    Decode(String),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_) => Self::Decode(err.to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    /// Persist a validated submission and return the stored record.
    async fn insert(
        &self,
        message: NewContactMessage,
    ) -> RepositoryResult<ContactMessage>;

    /// Most recent messages first, at most `limit` rows.
    async fn list_recent(
        &self,
        limit: u32,
    ) -> RepositoryResult<Vec<ContactMessage>>;
}
