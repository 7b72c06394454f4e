use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{Application, BidStatus, BidWithApplicant};

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

/// Outcome of deciding a bid, so the route can distinguish "no such bid"
/// from "already decided" without a second round trip.
pub enum StatusUpdate {
    Updated(Application),
    AlreadyDecided(Application),
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a bid. The unique index on (job_id, applicant_id) is the
    /// sole duplicate check: the insert either lands exactly one row or
    /// reports a conflict, regardless of how many submissions race.
    pub async fn submit(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
        why_you: &str,
        budget: Decimal,
        proposal_key: Option<&str>,
    ) -> Result<Application> {
        let job = sqlx::query_scalar::<_, Uuid>("SELECT id FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        if job.is_none() {
            return Err(Error::NotFound("Job not found".into()));
        }

        let inserted = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, applicant_id, why_you, budget, proposal_key)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (job_id, applicant_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(job_id)
        .bind(applicant_id)
        .bind(why_you)
        .bind(budget)
        .bind(proposal_key)
        .fetch_optional(&self.pool)
        .await?;

        inserted.ok_or_else(|| Error::Conflict("You have already applied to this job".into()))
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    pub async fn list_for_job(&self, job_id: Uuid) -> Result<Vec<BidWithApplicant>> {
        let bids = sqlx::query_as::<_, BidWithApplicant>(
            r#"
            SELECT a.*,
                   u.name AS applicant_name,
                   u.email AS applicant_email,
                   u.company_name AS applicant_company,
                   u.logo_key AS applicant_logo_key
            FROM applications a
            JOIN users u ON u.id = a.applicant_id
            WHERE a.job_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bids)
    }

    pub async fn list_for_applicant(&self, applicant_id: Uuid) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE applicant_id = $1 ORDER BY created_at DESC",
        )
        .bind(applicant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// Moves a pending bid to a terminal state. The WHERE guard makes the
    /// decision atomic: two racing decisions cannot both win.
    pub async fn set_status(&self, id: Uuid, next: BidStatus) -> Result<StatusUpdate> {
        let updated = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(next)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(application) = updated {
            return Ok(StatusUpdate::Updated(application));
        }

        match self.get(id).await? {
            Some(existing) => Ok(StatusUpdate::AlreadyDecided(existing)),
            None => Err(Error::NotFound("Application not found".into())),
        }
    }
}
