use async_trait::async_trait;
use shanny_model::{ContactMessage, NewContactMessage};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::database::ports::contact_messages::{
    ContactMessageRepository, RepositoryResult,
};

#[derive(Debug, Clone)]
pub struct PostgresContactMessageRepository {
    pool: PgPool,
}

impl PostgresContactMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn map_row(row: PgRow) -> RepositoryResult<ContactMessage> {
        Ok(ContactMessage {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            subject: row.try_get("subject")?,
            message: row.try_get("message")?,
            handled: row.try_get("handled")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl ContactMessageRepository for PostgresContactMessageRepository {
    async fn insert(
        &self,
        message: NewContactMessage,
    ) -> RepositoryResult<ContactMessage> {
        let NewContactMessage {
            submission,
            context,
        } = message;

        let row = sqlx::query(
            r#"
            INSERT INTO contact_messages
                (name, email, phone, subject, message, ip, user_agent, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, phone, subject, message, handled, created_at
            "#,
        )
        .bind(submission.name)
        .bind(submission.email)
        .bind(submission.phone)
        .bind(submission.subject)
        .bind(submission.message)
        .bind(context.ip)
        .bind(context.user_agent)
        .bind(context.source)
        .fetch_one(self.pool())
        .await?;

        Self::map_row(row)
    }

    async fn list_recent(
        &self,
        limit: u32,
    ) -> RepositoryResult<Vec<ContactMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, phone, subject, message, handled, created_at
            FROM contact_messages
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(Self::map_row).collect()
    }
}
