use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{MessagesRepo, RepoError},
    domain::{contact::NewCustomerMessage, entities::CustomerMessageRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CustomerMessageRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    is_read: bool,
    replied: bool,
    created_at: OffsetDateTime,
}

impl From<CustomerMessageRow> for CustomerMessageRecord {
    fn from(row: CustomerMessageRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            is_read: row.is_read,
            replied: row.replied,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MessagesRepo for PostgresRepositories {
    async fn create_message(
        &self,
        message: NewCustomerMessage,
    ) -> Result<CustomerMessageRecord, RepoError> {
        let row = sqlx::query_as::<_, CustomerMessageRow>(
            r#"
            INSERT INTO customer_messages (name, email, phone, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, subject, message, is_read, replied, created_at
            "#,
        )
        .bind(message.name)
        .bind(message.email)
        .bind(message.phone)
        .bind(message.subject)
        .bind(message.message)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }
}
