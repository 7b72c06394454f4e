use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;

use crate::{
    dto::application_dto::{ApplicantBidResponse, BidResponse, UpdateBidStatusPayload},
    error::{Error, Result},
    middleware::auth::AuthUser,
    models::application::BidStatus,
    services::application_service::StatusUpdate,
    services::storage_service::StorageFolder,
    AppState,
};

/// Submits a bid against a job. Multipart fields: `why_you`, `budget`,
/// optional file `proposal`. Uploading happens before the insert so a
/// stored bid can never reference a key that failed to land; a duplicate
/// bid deletes the freshly uploaded object best-effort.
pub async fn apply(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut why_you = String::new();
    let mut budget: Option<Decimal> = None;
    let mut proposal: Option<(String, Option<String>, bytes::Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "why_you" => why_you = field.text().await.unwrap_or_default(),
            "budget" => {
                let raw = field.text().await.unwrap_or_default();
                budget = Decimal::from_str(raw.trim()).ok();
            }
            "proposal" => {
                let filename = field.file_name().unwrap_or("proposal.bin").to_string();
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await?;
                if !data.is_empty() {
                    crate::routes::ensure_allowed_upload(
                        crate::routes::UploadKind::Document,
                        &filename,
                        &data,
                    )?;
                    proposal = Some((filename, content_type, data));
                }
            }
            _ => {}
        }
    }

    if why_you.trim().is_empty() {
        return Err(Error::BadRequest("why_you is required".into()));
    }
    let budget = budget.ok_or_else(|| Error::BadRequest("budget is required".into()))?;

    let mut proposal_key = None;
    if let Some((filename, content_type, data)) = proposal {
        let key = state
            .storage
            .upload(
                StorageFolder::ProposalDocs,
                &filename,
                data,
                content_type.as_deref(),
            )
            .await?;
        proposal_key = Some(key);
    }

    let submitted = state
        .application_service
        .submit(
            job_id,
            auth.id,
            why_you.trim(),
            budget,
            proposal_key.as_deref(),
        )
        .await;

    let application = match submitted {
        Ok(application) => application,
        Err(e) => {
            // The bid did not land; don't leave its proposal behind.
            if let Some(key) = proposal_key {
                if let Err(del) = state.storage.delete(&key).await {
                    tracing::warn!("Failed to clean up orphaned proposal {}: {}", key, del);
                }
            }
            return Err(e);
        }
    };

    let proposal_url = match application.proposal_key.as_deref() {
        Some(key) => Some(state.storage.presign(key).await?),
        None => None,
    };

    tracing::info!(
        "Bid {} submitted by {} on job {}",
        application.id,
        auth.id,
        job_id
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "application": BidResponse::from_application(application, proposal_url),
        })),
    ))
}

/// Lists the bids on a job, each with a freshly presigned proposal link.
/// Links are derived from the stored keys on every call; nothing is
/// cached, so they can expire independently of the rows.
pub async fn list_applicants(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let bids = state.application_service.list_for_job(job_id).await?;

    let mut items = Vec::with_capacity(bids.len());
    for joined in bids {
        let proposal_url = match joined.bid.proposal_key.as_deref() {
            Some(key) => Some(state.storage.presign(key).await?),
            None => None,
        };
        let applicant_logo = match joined.applicant_logo_key.as_deref() {
            Some(key) => state.storage.presign(key).await.ok(),
            None => None,
        };
        items.push(ApplicantBidResponse::from_joined(
            joined,
            proposal_url,
            applicant_logo,
        ));
    }

    Ok(Json(json!({ "success": true, "applications": items })))
}

pub async fn my_applications(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .list_for_applicant(auth.id)
        .await?;
    let mut items = Vec::with_capacity(applications.len());
    for application in applications {
        let proposal_url = match application.proposal_key.as_deref() {
            Some(key) => Some(state.storage.presign(key).await?),
            None => None,
        };
        items.push(BidResponse::from_application(application, proposal_url));
    }
    Ok(Json(json!({ "success": true, "applications": items })))
}

/// Decides a bid. Only the two terminal states are accepted on the wire,
/// and a bid is decided at most once.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBidStatusPayload>,
) -> Result<impl IntoResponse> {
    let next = BidStatus::parse(&payload.status)
        .ok_or_else(|| Error::BadRequest(format!("Unknown status \"{}\"", payload.status)))?;
    if !BidStatus::Pending.can_transition_to(next) {
        return Err(Error::BadRequest(format!(
            "A bid cannot be moved to \"{}\"",
            next.as_str()
        )));
    }

    match state.application_service.set_status(id, next).await? {
        StatusUpdate::Updated(application) => {
            tracing::info!("Bid {} marked {}", application.id, next.as_str());
            Ok(Json(json!({
                "success": true,
                "application": BidResponse::from_application(application, None),
            })))
        }
        StatusUpdate::AlreadyDecided(existing) => Err(Error::Conflict(format!(
            "This bid was already {}",
            existing.status.as_str()
        ))),
    }
}
