use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;

use crate::{
    dto::job_dto::{JobDetailResponse, JobListQuery, JobListResponse, JobResponse},
    error::{Error, Result},
    middleware::auth::AuthUser,
    models::job::JOB_CATEGORIES,
    models::user::ROLE_BRAND,
    services::job_service::NewJob,
    services::storage_service::StorageFolder,
    AppState,
};

/// Creates a job posting. Multipart fields: `title`, `description`,
/// `categories` (comma-separated tags), `budget`, `timeline`, optional
/// file `requirement_doc`.
#[utoipa::path(
    post,
    path = "/api/v1/job",
    responses(
        (status = 201, description = "Job created"),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not a brand")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    if !auth.role.eq_ignore_ascii_case(ROLE_BRAND) {
        return Err(Error::Forbidden("Only brands can post jobs".into()));
    }

    let mut title = String::new();
    let mut description = String::new();
    let mut categories: Vec<String> = Vec::new();
    let mut budget: Option<Decimal> = None;
    let mut timeline = String::new();
    let mut requirement_doc: Option<(String, Option<String>, bytes::Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "title" => title = field.text().await.unwrap_or_default(),
            "description" => description = field.text().await.unwrap_or_default(),
            "categories" => {
                let raw = field.text().await.unwrap_or_default();
                categories = raw
                    .split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            "budget" => {
                let raw = field.text().await.unwrap_or_default();
                budget = Decimal::from_str(raw.trim()).ok();
            }
            "timeline" => timeline = field.text().await.unwrap_or_default(),
            "requirement_doc" => {
                let filename = field.file_name().unwrap_or("requirements.bin").to_string();
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await?;
                if !data.is_empty() {
                    crate::routes::ensure_allowed_upload(
                        crate::routes::UploadKind::Document,
                        &filename,
                        &data,
                    )?;
                    requirement_doc = Some((filename, content_type, data));
                }
            }
            _ => {}
        }
    }

    if title.trim().is_empty() {
        return Err(Error::BadRequest("title is required".into()));
    }
    if description.trim().is_empty() {
        return Err(Error::BadRequest("description is required".into()));
    }
    if timeline.trim().is_empty() {
        return Err(Error::BadRequest("timeline is required".into()));
    }
    let budget = budget.ok_or_else(|| Error::BadRequest("budget is required".into()))?;
    if categories.is_empty() {
        return Err(Error::BadRequest("at least one category is required".into()));
    }
    for category in &categories {
        if !JOB_CATEGORIES.contains(&category.as_str()) {
            return Err(Error::BadRequest(format!(
                "Unknown category \"{}\"",
                category
            )));
        }
    }

    let mut requirement_doc_key = None;
    if let Some((filename, content_type, data)) = requirement_doc {
        let key = state
            .storage
            .upload(
                StorageFolder::RequirementDocs,
                &filename,
                data,
                content_type.as_deref(),
            )
            .await?;
        requirement_doc_key = Some(key);
    }

    let job = state
        .job_service
        .create(NewJob {
            title: title.trim(),
            description: description.trim(),
            categories: &categories,
            budget,
            timeline: timeline.trim(),
            requirement_doc_key: requirement_doc_key.as_deref(),
            company_id: auth.id,
            created_by: auth.id,
        })
        .await?;

    tracing::info!("Job {} posted by {}", job.id, auth.id);
    let response = JobResponse::from_job(job, None);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "job": response })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/job",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("category" = Option<String>, Query, description = "Filter by category tag"),
        ("search" = Option<String>, Query, description = "Search in title/description")
    ),
    responses(
        (status = 200, description = "Paged job listing")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.job_service.list(query).await?;
    Ok(Json(JobListResponse::from_list(result)))
}

#[utoipa::path(
    get,
    path = "/api/v1/job/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job with its application references"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    let requirement_doc = match job.requirement_doc_key.as_deref() {
        Some(key) => Some(state.storage.presign(key).await?),
        None => None,
    };
    let applications = state
        .application_service
        .list_for_job(id)
        .await?
        .into_iter()
        .map(|joined| joined.bid.id)
        .collect();

    Ok(Json(json!({
        "success": true,
        "job": JobDetailResponse {
            job: JobResponse::from_job(job, requirement_doc),
            applications,
        },
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/job/{id}/close",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job closed"),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn close_job(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.close(id, auth.id).await?;
    Ok(Json(json!({ "success": true, "job": JobResponse::from_job(job, None) })))
}
