use std::collections::HashMap;

use serde::Serialize;

use crate::services::admin_service::TopAgency;

/// Everything the admin dashboard renders, recomputed per request.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub users_by_role: HashMap<String, i64>,
    pub total_jobs: i64,
    pub total_applications: i64,
    pub total_posts: i64,
    pub total_messages: i64,
    pub applications_by_status: HashMap<String, i64>,
    pub signup_history: Vec<(String, i64)>,
    pub jobs_by_category: HashMap<String, i64>,
    pub top_agencies: Vec<TopAgency>,
}
