use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

#[derive(Clone)]
pub struct AdminService {
    pool: PgPool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopAgency {
    pub id: Uuid,
    pub name: String,
    pub company_name: Option<String>,
    pub application_count: i64,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn users_by_role(&self) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT role, COUNT(*) FROM users GROUP BY role",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    pub async fn applications_by_status(&self) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status::text, COUNT(*) FROM applications GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    pub async fn count_table(&self, table: &str) -> Result<i64> {
        // Not interpolating user input: callers pass fixed table names.
        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Daily signup counts over the trailing week, for the dashboard chart.
    pub async fn signup_history(&self) -> Result<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT TO_CHAR(created_at, 'YYYY-MM-DD'), COUNT(*)
            FROM users
            WHERE created_at > NOW() - INTERVAL '7 days'
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn jobs_by_category(&self) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT category, COUNT(*)
            FROM jobs, UNNEST(categories) AS category
            GROUP BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    /// Agencies ranked by how many bids they have submitted.
    pub async fn top_agencies(&self, limit: i64) -> Result<Vec<TopAgency>> {
        let rows = sqlx::query_as::<_, TopAgency>(
            r#"
            SELECT u.id, u.name, u.company_name, COUNT(a.id) AS application_count
            FROM users u
            JOIN applications a ON a.applicant_id = u.id
            GROUP BY u.id, u.name, u.company_name
            ORDER BY application_count DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
