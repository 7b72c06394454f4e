use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of a bid. `pending` is the only non-terminal state: a brand
/// decides a bid exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "bid_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BidStatus {
    /// Parses the wire form. Case-insensitive; anything outside the known
    /// set is rejected rather than stored verbatim.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn can_transition_to(&self, next: BidStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub why_you: String,
    pub budget: Decimal,
    pub proposal_key: Option<String>,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(BidStatus::parse("Accepted"), Some(BidStatus::Accepted));
        assert_eq!(BidStatus::parse("  REJECTED "), Some(BidStatus::Rejected));
        assert_eq!(BidStatus::parse("maybe"), None);
        assert_eq!(BidStatus::parse(""), None);
    }

    #[test]
    fn decided_bids_are_terminal() {
        assert!(BidStatus::Pending.can_transition_to(BidStatus::Accepted));
        assert!(BidStatus::Pending.can_transition_to(BidStatus::Rejected));
        assert!(!BidStatus::Accepted.can_transition_to(BidStatus::Rejected));
        assert!(!BidStatus::Rejected.can_transition_to(BidStatus::Accepted));
        assert!(!BidStatus::Accepted.can_transition_to(BidStatus::Pending));
        assert!(!BidStatus::Pending.can_transition_to(BidStatus::Pending));
    }
}

/// A bid joined with its applicant's public profile, as shown to the
/// job owner on review.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BidWithApplicant {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub bid: Application,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_company: Option<String>,
    pub applicant_logo_key: Option<String>,
}
