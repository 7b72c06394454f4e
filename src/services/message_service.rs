use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::message::{MeetingRequest, MeetingStatus};

#[derive(Clone)]
pub struct MessageService {
    pool: PgPool,
}

pub struct NewMeetingRequest<'a> {
    pub sender_id: Uuid,
    pub schedule: serde_json::Value,
    pub note: &'a str,
    pub agency_name: &'a str,
    pub agency_email: &'a str,
    pub user_email: &'a str,
    pub user_phone: &'a str,
}

impl MessageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewMeetingRequest<'_>) -> Result<MeetingRequest> {
        let message = sqlx::query_as::<_, MeetingRequest>(
            r#"
            INSERT INTO messages (sender_id, schedule, note, agency_name, agency_email, user_email, user_phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.sender_id)
        .bind(&new.schedule)
        .bind(new.note)
        .bind(new.agency_name)
        .bind(new.agency_email)
        .bind(new.user_email)
        .bind(new.user_phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<MeetingRequest>> {
        let message =
            sqlx::query_as::<_, MeetingRequest>("SELECT * FROM messages WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(message)
    }

    pub async fn list_by_sender(&self, sender_id: Uuid) -> Result<Vec<MeetingRequest>> {
        let messages = sqlx::query_as::<_, MeetingRequest>(
            "SELECT * FROM messages WHERE sender_id = $1 ORDER BY created_at DESC",
        )
        .bind(sender_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn list_all(&self) -> Result<Vec<MeetingRequest>> {
        let messages = sqlx::query_as::<_, MeetingRequest>(
            "SELECT * FROM messages ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    /// Only `status` and `response` are writable after creation; the
    /// availability grid and contact fields are immutable intent data.
    pub async fn update(
        &self,
        id: Uuid,
        status: Option<MeetingStatus>,
        response: Option<&str>,
    ) -> Result<MeetingRequest> {
        let message = sqlx::query_as::<_, MeetingRequest>(
            r#"
            UPDATE messages
            SET status = COALESCE($2, status),
                response = COALESCE($3, response)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(response)
        .fetch_optional(&self.pool)
        .await?;

        message.ok_or_else(|| Error::NotFound("Meeting request not found".into()))
    }
}
