// src/web/types.rs
use crate::models::{CompanyProfile, JobListing, ResourceCatalog, ResumeData};
use crate::posting::{FieldError, JobPostingForm, PostingStep};
use crate::search::{Facet, FilterState, PageItem, SearchPage};
use crate::utils::{format_relative_date, share_url, ShareLinks};
use chrono::{DateTime, Utc};
use rocket::form::FromForm;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

/// Settings handlers read from managed state
pub struct ServerConfig {
    pub site_url: String,
    pub page_size: u32,
    pub recent_jobs: u32,
}

// ===== Response envelopes =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
    /// Where a client should send the user, e.g. the sign-in page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// Error half of every handler result
pub type ApiError = (Status, Json<StandardErrorResponse>);
pub type ApiResult<T> = Result<Json<T>, ApiError>;

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl ActionResponse {
    pub fn success(message: String, action: String) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message,
            action,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            field_errors: None,
            redirect_to: None,
        }
    }

    pub fn with_field_errors(mut self, field_errors: Vec<FieldError>) -> Self {
        self.field_errors = Some(field_errors);
        self
    }

    pub fn with_redirect(mut self, redirect_to: String) -> Self {
        self.redirect_to = Some(redirect_to);
        self
    }

    pub fn into_api_error(self, status: Status) -> ApiError {
        (status, Json(self))
    }
}

pub fn api_error(status: Status, error: impl Into<String>, code: &str, suggestions: &[&str]) -> ApiError {
    StandardErrorResponse::new(
        error.into(),
        code.to_string(),
        suggestions.iter().map(|s| s.to_string()).collect(),
    )
    .into_api_error(status)
}

pub fn not_found(what: &str) -> ApiError {
    api_error(
        Status::NotFound,
        format!("{} not found", what),
        "NOT_FOUND",
        &["Check the link and try again"],
    )
}

pub fn internal_error(context: &str) -> ApiError {
    api_error(
        Status::InternalServerError,
        format!("Failed to {}", context),
        "INTERNAL_ERROR",
        &["Try again in a few moments"],
    )
}

// ===== Requests =====

/// Query string of the job search endpoint. Facet parameters repeat:
/// `?skills=React&skills=Node.js`.
#[derive(Debug, Default, FromForm)]
pub struct SearchParams {
    pub q: Option<String>,
    pub experience: Vec<String>,
    pub job_type: Vec<String>,
    pub skills: Vec<String>,
    pub location: Vec<String>,
    pub page: Option<u32>,
}

impl SearchParams {
    pub fn filters(&self) -> FilterState {
        let mut filters = FilterState::new();
        if let Some(q) = &self.q {
            filters.set_search_term(q);
        }
        let facets = [
            (Facet::Experience, &self.experience),
            (Facet::JobType, &self.job_type),
            (Facet::Skills, &self.skills),
            (Facet::Location, &self.location),
        ];
        for (facet, values) in facets {
            for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
                filters.select(facet, value);
            }
        }
        filters
    }
}

/// Query string of the resource hub. `type` and `format` apply to events,
/// `format` also to job fairs.
#[derive(Debug, Default, FromForm)]
pub struct ResourceParams {
    pub tab: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    #[field(name = "type")]
    pub event_type: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct NewsletterRequest {
    pub email: String,
}

// ===== Response payloads =====

/// A listing as returned to clients: the stored columns plus derived fields
#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct JobSummary {
    #[serde(flatten)]
    pub job: JobListing,
    pub posted_ago: String,
    pub share_url: String,
    pub apply_target: Option<String>,
}

impl JobSummary {
    pub fn new(job: JobListing, site_url: &str, now: DateTime<Utc>) -> Self {
        Self {
            posted_ago: format_relative_date(job.posted_date, now),
            share_url: share_url(site_url, &job.id),
            apply_target: job.apply_target(),
            job,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct JobDetail {
    #[serde(flatten)]
    pub summary: JobSummary,
    pub share_links: ShareLinks,
    pub is_saved: bool,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SearchResultData {
    pub jobs: Vec<JobSummary>,
    pub total_count: u64,
    pub total_pages: u32,
    pub page: u32,
    pub page_numbers: Vec<PageItem>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl SearchResultData {
    pub fn new(page: SearchPage, site_url: &str, now: DateTime<Utc>) -> Self {
        let pagination = page.pagination();
        Self {
            page_numbers: pagination.numbers(),
            has_previous: pagination.has_previous(),
            has_next: pagination.has_next(),
            total_count: page.total_count,
            total_pages: page.total_pages,
            page: page.page,
            jobs: page
                .jobs
                .into_iter()
                .map(|job| JobSummary::new(job, site_url, now))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreatedJob {
    pub id: String,
    pub share_url: String,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StepValidation {
    pub step: PostingStep,
    pub step_number: u8,
    pub errors: Vec<FieldError>,
    pub can_advance: bool,
    pub can_submit: bool,
    pub next_step: Option<u8>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct WizardStepInfo {
    pub number: u8,
    pub step: PostingStep,
    pub fields: &'static [&'static str],
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct PostingFormTemplate {
    pub form: JobPostingForm,
    pub job_types: Vec<&'static str>,
    pub steps: Vec<WizardStepInfo>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CompanyDirectory {
    pub companies: Vec<CompanyProfile>,
    pub industries: Vec<String>,
    pub sizes: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SaveState {
    pub job_id: String,
    pub saved: bool,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ResumeView {
    pub data: ResumeData,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct UserInfo {
    pub user_id: String,
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ResourceHub {
    #[serde(flatten)]
    pub catalog: ResourceCatalog,
    pub blog_categories: Vec<String>,
    pub internship_locations: Vec<String>,
}
