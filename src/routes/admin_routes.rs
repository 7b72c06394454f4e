use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{dto::admin_dto::DashboardStats, error::Result, AppState};

/// Dashboard aggregates, recomputed on every call. Admin traffic is low
/// enough that caching would buy nothing.
pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users_by_role = state.admin_service.users_by_role().await?;
    let total_jobs = state.admin_service.count_table("jobs").await?;
    let total_applications = state.admin_service.count_table("applications").await?;
    let total_posts = state.admin_service.count_table("posts").await?;
    let total_messages = state.admin_service.count_table("messages").await?;
    let applications_by_status = state.admin_service.applications_by_status().await?;
    let signup_history = state.admin_service.signup_history().await?;
    let jobs_by_category = state.admin_service.jobs_by_category().await?;
    let top_agencies = state.admin_service.top_agencies(10).await?;

    let stats = DashboardStats {
        users_by_role,
        total_jobs,
        total_applications,
        total_posts,
        total_messages,
        applications_by_status,
        signup_history,
        jobs_by_category,
        top_agencies,
    };

    Ok(Json(json!({ "success": true, "stats": stats })))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AdminUserQuery {
    pub role: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<AdminUserQuery>,
) -> Result<impl IntoResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(50).clamp(1, 200);
    let offset = (page - 1) * per_page;

    let users = sqlx::query_as::<_, crate::models::user::User>(
        r#"
        SELECT * FROM users
        WHERE ($1::text IS NULL OR role = $1)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&query.role)
    .bind(per_page)
    .bind(offset)
    .fetch_all(&state.pool)
    .await
    .map_err(crate::error::Error::from)?;

    let items: Vec<crate::dto::user_dto::UserResponse> =
        users.into_iter().map(Into::into).collect();
    Ok(Json(json!({ "success": true, "users": items, "page": page, "per_page": per_page })))
}
