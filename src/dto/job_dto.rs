use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::Job;
use crate::services::job_service::JobList;

#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub budget: Decimal,
    pub timeline: String,
    /// Freshly presigned download link for the requirement document,
    /// derived from the stored key on every read.
    pub requirement_doc: Option<String>,
    pub company_id: Uuid,
    pub created_by: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub job: JobResponse,
    /// References to the bids filed against this job.
    pub applications: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobListResponse {
    pub success: bool,
    pub items: Vec<JobResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl JobResponse {
    pub fn from_job(job: Job, requirement_doc: Option<String>) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            categories: job.categories,
            budget: job.budget,
            timeline: job.timeline,
            requirement_doc,
            company_id: job.company_id,
            created_by: job.created_by,
            status: job.status,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

impl JobListResponse {
    pub fn from_list(list: JobList) -> Self {
        Self {
            success: true,
            items: list
                .items
                .into_iter()
                .map(|job| JobResponse::from_job(job, None))
                .collect(),
            total: list.total,
            page: list.page,
            per_page: list.per_page,
            total_pages: list.total_pages,
        }
    }
}
