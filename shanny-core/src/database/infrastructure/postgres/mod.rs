mod contact_messages;

pub use contact_messages::PostgresContactMessageRepository;

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::database::ports::contact_messages::RepositoryResult;

/// Opens a connection pool without touching the schema.
pub async fn connect_pool(
    database_url: &str,
    max_connections: u32,
) -> RepositoryResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await?;
    info!(max_connections, "database pool ready");
    Ok(pool)
}
