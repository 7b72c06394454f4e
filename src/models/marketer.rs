use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DigitalMarketer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub expertise: Vec<String>,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
