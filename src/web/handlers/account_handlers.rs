// src/web/handlers/account_handlers.rs
use crate::auth::AuthenticatedUser;
use crate::core::Database;
use crate::models::ResumeData;
use crate::repository::{JobRepository, ResumeRepository, SavedJobRepository};
use crate::web::types::*;

use chrono::Utc;
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

pub async fn toggle_saved_job_handler(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<DataResponse<SaveState>> {
    match JobRepository::new(db.pool()).find_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found("Job")),
        Err(e) => {
            error!("Failed to load job {}: {}", id, e);
            return Err(internal_error("save job"));
        }
    }

    let outcome = SavedJobRepository::new(db.pool())
        .toggle(auth.user_id(), id)
        .await
        .map_err(|e| {
            error!("Failed to toggle saved job {}: {:#}", id, e);
            internal_error("save job")
        })?;

    Ok(Json(DataResponse::success(
        outcome.message().to_string(),
        SaveState {
            job_id: id.to_string(),
            saved: outcome.is_saved(),
        },
    )))
}

pub async fn saved_state_handler(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<DataResponse<SaveState>> {
    let saved = SavedJobRepository::new(db.pool())
        .is_saved(auth.user_id(), id)
        .await
        .map_err(|e| {
            error!("Failed to read saved state of job {}: {}", id, e);
            internal_error("load saved state")
        })?;

    let message = if saved { "Job is saved" } else { "Job is not saved" };
    Ok(Json(DataResponse::success(
        message.to_string(),
        SaveState {
            job_id: id.to_string(),
            saved,
        },
    )))
}

pub async fn saved_jobs_handler(
    auth: AuthenticatedUser,
    db: &State<Database>,
    config: &State<ServerConfig>,
) -> ApiResult<DataResponse<Vec<JobSummary>>> {
    let jobs = SavedJobRepository::new(db.pool())
        .list_for_user(auth.user_id())
        .await
        .map_err(|e| {
            error!("Failed to list saved jobs for {}: {}", auth.user_id(), e);
            internal_error("load saved jobs")
        })?;

    let now = Utc::now();
    let jobs: Vec<JobSummary> = jobs
        .into_iter()
        .map(|job| JobSummary::new(job, &config.site_url, now))
        .collect();

    Ok(Json(DataResponse::success(
        format!("{} saved jobs", jobs.len()),
        jobs,
    )))
}

/// The stored resume, or the blank starting document on first visit
pub async fn get_resume_handler(
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<DataResponse<ResumeView>> {
    let record = ResumeRepository::new(db.pool())
        .get(auth.user_id())
        .await
        .map_err(|e| {
            error!("Failed to load resume for {}: {}", auth.user_id(), e);
            internal_error("load resume")
        })?;

    let view = match record {
        Some(record) => ResumeView {
            data: record.data,
            updated_at: Some(record.updated_at),
        },
        None => ResumeView {
            data: ResumeData::initial(),
            updated_at: None,
        },
    };

    Ok(Json(DataResponse::success("Resume loaded".to_string(), view)))
}

pub async fn save_resume_handler(
    data: Json<ResumeData>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<DataResponse<ResumeView>> {
    let record = ResumeRepository::new(db.pool())
        .save(auth.user_id(), &data.into_inner())
        .await
        .map_err(|e| {
            error!("Failed to save resume for {}: {:#}", auth.user_id(), e);
            internal_error("save resume")
        })?;

    Ok(Json(DataResponse::success(
        "Resume saved successfully".to_string(),
        ResumeView {
            data: record.data,
            updated_at: Some(record.updated_at),
        },
    )))
}
