use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompareItem {
    pub user_id: Uuid,
    pub agency_id: Uuid,
    pub created_at: DateTime<Utc>,
}
