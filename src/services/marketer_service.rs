use sqlx::PgPool;

use crate::dto::directory_dto::CreateMarketerPayload;
use crate::error::{Error, Result};
use crate::models::marketer::DigitalMarketer;

#[derive(Clone)]
pub struct MarketerService {
    pool: PgPool,
}

impl MarketerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateMarketerPayload) -> Result<DigitalMarketer> {
        let inserted = sqlx::query_as::<_, DigitalMarketer>(
            r#"
            INSERT INTO digital_marketers (name, email, expertise, bio, portfolio_url)
            VALUES ($1, LOWER($2), $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.expertise)
        .bind(&payload.bio)
        .bind(&payload.portfolio_url)
        .fetch_optional(&self.pool)
        .await?;

        inserted
            .ok_or_else(|| Error::Conflict("A marketer with this email already exists".into()))
    }

    pub async fn list(&self) -> Result<Vec<DigitalMarketer>> {
        let marketers = sqlx::query_as::<_, DigitalMarketer>(
            "SELECT * FROM digital_marketers ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(marketers)
    }
}
