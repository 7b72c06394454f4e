use sqlx::PgPool;

use crate::dto::directory_dto::CreateVcPayload;
use crate::error::{Error, Result};
use crate::models::vc::VcProfile;

#[derive(Clone)]
pub struct VcService {
    pool: PgPool,
}

impl VcService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateVcPayload) -> Result<VcProfile> {
        let inserted = sqlx::query_as::<_, VcProfile>(
            r#"
            INSERT INTO vc_profiles (firm_name, email, focus_areas, website, bio)
            VALUES ($1, LOWER($2), $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&payload.firm_name)
        .bind(&payload.email)
        .bind(&payload.focus_areas)
        .bind(&payload.website)
        .bind(&payload.bio)
        .fetch_optional(&self.pool)
        .await?;

        inserted
            .ok_or_else(|| Error::Conflict("A VC profile with this email already exists".into()))
    }

    pub async fn list(&self) -> Result<Vec<VcProfile>> {
        let profiles = sqlx::query_as::<_, VcProfile>(
            "SELECT * FROM vc_profiles ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }
}
