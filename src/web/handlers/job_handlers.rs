// src/web/handlers/job_handlers.rs
use crate::auth::AuthenticatedUser;
use crate::core::Database;
use crate::posting::{form_from_listing, listing_from_form, JobPostingForm, PostingStep, PostingWizard};
use crate::posting::mapping::job_type_labels;
use crate::repository::{JobRepository, SavedJobRepository};
use crate::search::{compile, FilterState, SearchError};
use crate::utils::ShareLinks;
use crate::web::types::*;

use chrono::Utc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};
use uuid::Uuid;

const MAX_RECENT_JOBS: u32 = 50;

fn search_error(e: SearchError) -> ApiError {
    match e {
        SearchError::PageOutOfRange { .. } => api_error(
            Status::BadRequest,
            e.to_string(),
            "PAGE_OUT_OF_RANGE",
            &["Go back to the first page", "Relax the filters to see more results"],
        ),
        SearchError::Database(e) => {
            error!("Job search failed: {}", e);
            internal_error("search jobs")
        }
    }
}

pub async fn search_jobs_handler(
    params: SearchParams,
    db: &State<Database>,
    config: &State<ServerConfig>,
) -> ApiResult<DataResponse<SearchResultData>> {
    let filters = params.filters();
    let compiled = compile(&filters, params.page.unwrap_or(0), config.page_size);

    let page = JobRepository::new(db.pool())
        .search(&compiled)
        .await
        .map_err(search_error)?;

    let message = format!("Found {} jobs", page.total_count);
    Ok(Json(DataResponse::success(
        message,
        SearchResultData::new(page, &config.site_url, Utc::now()),
    )))
}

/// Landing page feed: the first page of an unfiltered search
pub async fn recent_jobs_handler(
    limit: Option<u32>,
    db: &State<Database>,
    config: &State<ServerConfig>,
) -> ApiResult<DataResponse<Vec<JobSummary>>> {
    let limit = limit.unwrap_or(config.recent_jobs).clamp(1, MAX_RECENT_JOBS);
    let compiled = compile(&FilterState::new(), 0, limit);

    let page = JobRepository::new(db.pool())
        .search(&compiled)
        .await
        .map_err(search_error)?;

    let now = Utc::now();
    let jobs: Vec<JobSummary> = page
        .jobs
        .into_iter()
        .map(|job| JobSummary::new(job, &config.site_url, now))
        .collect();

    Ok(Json(DataResponse::success(
        format!("{} recent jobs", jobs.len()),
        jobs,
    )))
}

pub async fn get_job_handler(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
    config: &State<ServerConfig>,
) -> ApiResult<DataResponse<JobDetail>> {
    let job = match JobRepository::new(db.pool()).find_by_id(id).await {
        Ok(Some(job)) => job,
        Ok(None) => return Err(not_found("Job")),
        Err(e) => {
            error!("Failed to load job {}: {}", id, e);
            return Err(internal_error("load job"));
        }
    };

    let is_saved = SavedJobRepository::new(db.pool())
        .is_saved(auth.user_id(), id)
        .await
        .map_err(|e| {
            error!("Failed to read saved state of job {}: {}", id, e);
            internal_error("load job")
        })?;

    let share_text = format!("{} at {}", job.title, job.employer.name);
    let share_links = ShareLinks::new(&config.site_url, &job.id, &share_text);

    Ok(Json(DataResponse::success(
        "Job loaded".to_string(),
        JobDetail {
            summary: JobSummary::new(job, &config.site_url, Utc::now()),
            share_links,
            is_saved,
        },
    )))
}

pub async fn create_job_handler(
    form: Json<JobPostingForm>,
    auth: AuthenticatedUser,
    db: &State<Database>,
    config: &State<ServerConfig>,
) -> ApiResult<DataResponse<CreatedJob>> {
    // posting happens from the wizard's last step
    let wizard = PostingWizard::resume_at(form.into_inner(), PostingStep::Application);
    let form = wizard.submit().map_err(|errors| {
        warn!(
            "Rejected job posting from {}: {} invalid fields",
            auth.user_id(),
            errors.len()
        );
        StandardErrorResponse::new(
            "Please fix the highlighted fields".to_string(),
            "VALIDATION_ERROR".to_string(),
            vec!["Every step of the form must be valid before publishing".to_string()],
        )
        .with_field_errors(errors)
        .into_api_error(Status::BadRequest)
    })?;

    let id = Uuid::new_v4().to_string();
    let listing = listing_from_form(form, &id, Utc::now()).map_err(|e| {
        error!("Failed to map job posting: {:#}", e);
        internal_error("create job")
    })?;

    JobRepository::new(db.pool())
        .insert(&listing, Some(auth.user_id()))
        .await
        .map_err(|e| {
            error!("Failed to store job posting: {:#}", e);
            internal_error("create job")
        })?;

    info!("User {} posted job {}", auth.user_id(), id);

    Ok(Json(DataResponse::success(
        "Job posted successfully".to_string(),
        CreatedJob {
            share_url: crate::utils::share_url(&config.site_url, &id),
            id,
        },
    )))
}

pub async fn validate_step_handler(
    step: u8,
    form: Json<JobPostingForm>,
) -> ApiResult<DataResponse<StepValidation>> {
    let Some(step) = PostingStep::from_number(step) else {
        return Err(api_error(
            Status::BadRequest,
            format!("Unknown step {}", step),
            "INVALID_STEP",
            &["Steps are numbered 1 to 4"],
        ));
    };

    let mut wizard = PostingWizard::resume_at(form.into_inner(), step);
    let can_submit = wizard.can_submit();

    // next_step is only set when the wizard actually moves on
    let (errors, next_step) = match wizard.advance() {
        Ok(next) if next != step => (Vec::new(), Some(next)),
        Ok(_) => (Vec::new(), None),
        Err(errors) => (errors, None),
    };

    let message = if errors.is_empty() {
        "Step is valid".to_string()
    } else {
        format!("{} fields need attention", errors.len())
    };

    Ok(Json(DataResponse::success(
        message,
        StepValidation {
            step,
            step_number: step.number(),
            can_advance: next_step.is_some(),
            can_submit,
            next_step: next_step.map(|s| s.number()),
            errors,
        },
    )))
}

/// Empty form, select options and the field list of every wizard step
pub async fn posting_form_template_handler() -> Json<DataResponse<PostingFormTemplate>> {
    let steps = (1..=PostingStep::COUNT)
        .filter_map(PostingStep::from_number)
        .map(|step| WizardStepInfo {
            number: step.number(),
            step,
            fields: step.fields(),
        })
        .collect();

    Json(DataResponse::success(
        "Job posting form".to_string(),
        PostingFormTemplate {
            form: JobPostingForm::default(),
            job_types: job_type_labels(),
            steps,
        },
    ))
}

/// Wizard form pre-filled from an existing listing
pub async fn job_form_handler(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<DataResponse<JobPostingForm>> {
    let job = match JobRepository::new(db.pool()).find_by_id(id).await {
        Ok(Some(job)) => job,
        Ok(None) => return Err(not_found("Job")),
        Err(e) => {
            error!("Failed to load job {}: {}", id, e);
            return Err(internal_error("load job"));
        }
    };

    let form = form_from_listing(&job).map_err(|e| {
        error!("Failed to map job {} to a form: {:#}", id, e);
        internal_error("load job")
    })?;

    info!("User {} opened job {} as a posting template", auth.user_id(), id);
    Ok(Json(DataResponse::success("Job posting form".to_string(), form)))
}
