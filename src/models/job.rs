use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Marketing service tags a job may be filed under.
pub const JOB_CATEGORIES: &[&str] = &[
    "seo",
    "ppc",
    "social_media",
    "content_marketing",
    "email_marketing",
    "web_design",
    "branding",
    "influencer_marketing",
    "analytics",
    "video_marketing",
];

pub const JOB_STATUS_OPEN: &str = "open";
pub const JOB_STATUS_CLOSED: &str = "closed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub budget: Decimal,
    pub timeline: String,
    pub requirement_doc_key: Option<String>,
    pub company_id: Uuid,
    pub created_by: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
