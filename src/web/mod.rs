// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::auth::{AuthConfig, AuthError, AuthFailure, AuthenticatedUser, OptionalAuth, SessionEvents};
use crate::core::{ConfigManager, Database};
use crate::models::{seeded_catalog, CompanyProfile, ResourceCatalog, ResumeData};
use crate::posting::JobPostingForm;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, RawStr, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, put, routes, Build, Request, Response, Rocket, State};
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// ===== Jobs =====

#[get("/jobs?<params..>")]
pub async fn search_jobs(
    params: SearchParams,
    db: &State<Database>,
    config: &State<ServerConfig>,
) -> ApiResult<DataResponse<SearchResultData>> {
    handlers::search_jobs_handler(params, db, config).await
}

#[get("/jobs/recent?<limit>")]
pub async fn recent_jobs(
    limit: Option<u32>,
    db: &State<Database>,
    config: &State<ServerConfig>,
) -> ApiResult<DataResponse<Vec<JobSummary>>> {
    handlers::recent_jobs_handler(limit, db, config).await
}

#[get("/jobs/form")]
pub async fn posting_form_template() -> Json<DataResponse<PostingFormTemplate>> {
    handlers::posting_form_template_handler().await
}

#[get("/jobs/<id>")]
pub async fn get_job(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
    config: &State<ServerConfig>,
) -> ApiResult<DataResponse<JobDetail>> {
    handlers::get_job_handler(id, auth, db, config).await
}

#[get("/jobs/<id>/form")]
pub async fn job_form(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<DataResponse<JobPostingForm>> {
    handlers::job_form_handler(id, auth, db).await
}

#[post("/jobs", data = "<form>")]
pub async fn create_job(
    form: Json<JobPostingForm>,
    auth: AuthenticatedUser,
    db: &State<Database>,
    config: &State<ServerConfig>,
) -> ApiResult<DataResponse<CreatedJob>> {
    handlers::create_job_handler(form, auth, db, config).await
}

#[post("/jobs/validate?<step>", data = "<form>")]
pub async fn validate_step(step: u8, form: Json<JobPostingForm>) -> ApiResult<DataResponse<StepValidation>> {
    handlers::validate_step_handler(step, form).await
}

// ===== Saved jobs =====

#[post("/jobs/<id>/save")]
pub async fn toggle_saved_job(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<DataResponse<SaveState>> {
    handlers::toggle_saved_job_handler(id, auth, db).await
}

#[get("/jobs/<id>/saved")]
pub async fn saved_state(
    id: &str,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<DataResponse<SaveState>> {
    handlers::saved_state_handler(id, auth, db).await
}

#[get("/saved-jobs")]
pub async fn saved_jobs(
    auth: AuthenticatedUser,
    db: &State<Database>,
    config: &State<ServerConfig>,
) -> ApiResult<DataResponse<Vec<JobSummary>>> {
    handlers::saved_jobs_handler(auth, db, config).await
}

// ===== Resume =====

#[get("/resume")]
pub async fn get_resume(auth: AuthenticatedUser, db: &State<Database>) -> ApiResult<DataResponse<ResumeView>> {
    handlers::get_resume_handler(auth, db).await
}

#[put("/resume", data = "<data>")]
pub async fn save_resume(
    data: Json<ResumeData>,
    auth: AuthenticatedUser,
    db: &State<Database>,
) -> ApiResult<DataResponse<ResumeView>> {
    handlers::save_resume_handler(data, auth, db).await
}

// ===== Companies =====

#[get("/companies?<q>&<industry>&<size>")]
pub async fn companies(
    q: Option<String>,
    industry: Option<String>,
    size: Option<String>,
    db: &State<Database>,
) -> ApiResult<DataResponse<CompanyDirectory>> {
    handlers::companies_handler(q, industry, size, db).await
}

#[get("/companies/<slug>")]
pub async fn company(slug: &str, db: &State<Database>) -> ApiResult<DataResponse<CompanyProfile>> {
    handlers::company_handler(slug, db).await
}

// ===== Resources =====

#[get("/resources?<params..>")]
pub async fn resources(
    params: ResourceParams,
    catalog: &State<ResourceCatalog>,
) -> ApiResult<DataResponse<ResourceHub>> {
    handlers::resources_handler(params, catalog).await
}

// ===== Newsletter =====

#[post("/newsletter", data = "<request>")]
pub async fn subscribe(request: Json<NewsletterRequest>, db: &State<Database>) -> ApiResult<ActionResponse> {
    handlers::subscribe_handler(request, db).await
}

// ===== System =====

#[get("/me")]
pub async fn get_current_user(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    handlers::get_current_user_handler(auth).await
}

#[get("/health")]
pub async fn health(auth: OptionalAuth, db: &State<Database>) -> ApiResult<TextResponse> {
    handlers::health_handler(auth, db).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// ===== Error catchers =====

/// Sign-in page URL that brings the user back to `path` afterwards.
/// API paths map onto the page paths they serve.
pub fn sign_in_redirect(path: &str) -> String {
    let page = path.strip_prefix("/api").filter(|p| !p.is_empty()).unwrap_or(path);
    format!("/signin?redirect={}", RawStr::new(page).percent_encode().as_str())
}

#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(401)]
pub fn unauthorized(req: &Request) -> Json<StandardErrorResponse> {
    let reason = req
        .local_cache(AuthFailure::default)
        .0
        .unwrap_or(AuthError::MissingToken);

    Json(
        StandardErrorResponse::new(
            reason.message().to_string(),
            reason.code().to_string(),
            vec!["Please sign in to continue".to_string()],
        )
        .with_redirect(sign_in_redirect(&req.uri().to_string())),
    )
}

#[rocket::catch(404)]
pub fn not_found_catcher() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the URL".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected shape".to_string(),
        "INVALID_BODY".to_string(),
        vec!["Verify field names and value types".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error_catcher() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assemble the API. Shared by the server and the integration tests.
pub fn build_rocket(config: &ConfigManager, db: Database, events: SessionEvents) -> Rocket<Build> {
    let server_config = ServerConfig {
        site_url: config.site_url().to_string(),
        page_size: config.search.page_size,
        recent_jobs: config.search.recent_jobs,
    };

    let figment = rocket::Config::figment()
        .merge(("port", config.environment.port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(server_config)
        .manage(AuthConfig::from_settings(&config.auth))
        .manage(events)
        .manage(seeded_catalog())
        .manage(db)
        .register(
            "/api",
            catchers![
                bad_request,
                unauthorized,
                not_found_catcher,
                unprocessable,
                internal_error_catcher
            ],
        )
        .mount(
            "/api",
            routes![
                search_jobs,
                recent_jobs,
                posting_form_template,
                get_job,
                job_form,
                create_job,
                validate_step,
                toggle_saved_job,
                saved_state,
                saved_jobs,
                get_resume,
                save_resume,
                companies,
                company,
                resources,
                subscribe,
                get_current_user,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let db = match Database::new(&config.environment.database_path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to initialize database: {:#}", e);
            return Err(e);
        }
    };

    let events = SessionEvents::default();
    let _logger = events.spawn_logger();

    config.log_summary();
    info!("Starting remote jobs API on port {}", config.environment.port);

    let _rocket = build_rocket(&config, db, events)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}
