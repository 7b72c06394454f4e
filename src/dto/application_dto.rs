use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::application::{Application, BidStatus, BidWithApplicant};

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBidStatusPayload {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BidResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub why_you: String,
    pub budget: Decimal,
    pub status: BidStatus,
    /// Time-limited download link for the proposal document, or null when
    /// the bid was filed without one.
    pub proposal: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicantBidResponse {
    #[serde(flatten)]
    pub bid: BidResponse,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_company: Option<String>,
    pub applicant_logo: Option<String>,
}

impl BidResponse {
    pub fn from_application(application: Application, proposal: Option<String>) -> Self {
        Self {
            id: application.id,
            job_id: application.job_id,
            applicant_id: application.applicant_id,
            why_you: application.why_you,
            budget: application.budget,
            status: application.status,
            proposal,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

impl ApplicantBidResponse {
    pub fn from_joined(
        joined: BidWithApplicant,
        proposal: Option<String>,
        applicant_logo: Option<String>,
    ) -> Self {
        Self {
            bid: BidResponse::from_application(joined.bid, proposal),
            applicant_name: joined.applicant_name,
            applicant_email: joined.applicant_email,
            applicant_company: joined.applicant_company,
            applicant_logo,
        }
    }
}
