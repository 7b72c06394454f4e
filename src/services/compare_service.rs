use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::{User, ROLE_AGENCY};

#[derive(Clone)]
pub struct CompareService {
    pool: PgPool,
}

impl CompareService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Adds an agency to the caller's compare set. The composite primary
    /// key is the membership check, so concurrent adds of the same agency
    /// cannot produce two entries.
    pub async fn add(&self, user_id: Uuid, agency_id: Uuid) -> Result<()> {
        let agency = sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE id = $1")
            .bind(agency_id)
            .fetch_optional(&self.pool)
            .await?;
        match agency {
            Some(role) if role == ROLE_AGENCY => {}
            Some(_) => return Err(Error::BadRequest("User is not an agency".into())),
            None => return Err(Error::NotFound("Agency not found".into())),
        }

        let result = sqlx::query(
            r#"
            INSERT INTO compare_items (user_id, agency_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, agency_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(agency_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::Conflict("Agency is already in your compare list".into()));
        }
        Ok(())
    }

    pub async fn remove(&self, user_id: Uuid, agency_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM compare_items WHERE user_id = $1 AND agency_id = $2",
        )
        .bind(user_id)
        .bind(agency_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Agency is not in your compare list".into()));
        }
        Ok(())
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<User>> {
        let agencies = sqlx::query_as::<_, User>(
            r#"
            SELECT u.*
            FROM compare_items ci
            JOIN users u ON u.id = ci.agency_id
            WHERE ci.user_id = $1
            ORDER BY ci.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(agencies)
    }
}
