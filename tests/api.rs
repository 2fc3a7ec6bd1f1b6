use chrono::{Duration, Utc};
use remote_jobs::auth::{AuthConfig, SessionEvents};
use remote_jobs::core::config_manager::{AuthSettings, EnvironmentConfig, LoggingSettings, SearchSettings};
use remote_jobs::core::{ConfigManager, Database};
use remote_jobs::models::{Compensation, Employer, JobListing};
use remote_jobs::repository::JobRepository;
use remote_jobs::search::{compile, Facet, FilterState, SearchError, SearchSession};
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};

const SECRET: &str = "integration-test-secret";

fn listing(id: &str, company: &str, job_type: &str, skills: &[&str], days_ago: i64) -> JobListing {
    JobListing {
        id: id.to_string(),
        title: format!("Engineer {}", id),
        description: format!("Build things at {}", company),
        employer: Employer {
            name: company.to_string(),
            website: None,
            logo: None,
            industry: "Software".to_string(),
            size: "11-50".to_string(),
            description: String::new(),
        },
        location: "Remote (Worldwide)".to_string(),
        job_type: job_type.to_string(),
        experience: "Mid Level".to_string(),
        compensation: Compensation {
            min: None,
            max: None,
            currency: "USD".to_string(),
            period: "yearly".to_string(),
        },
        skills: skills.iter().map(|s| s.to_string()).collect(),
        responsibilities: vec![],
        requirements: vec![],
        benefits: vec![],
        application_url: Some(format!("https://apply.example/{}", id)),
        application_email: None,
        application_instructions: None,
        is_remote: true,
        is_urgent: false,
        is_featured: false,
        posted_date: Utc::now() - Duration::days(days_ago),
    }
}

/// 25 full-time React listings at Acme plus 3 contract Python ones at Globex
async fn seeded_db() -> Database {
    let db = Database::in_memory().await.unwrap();
    let repo = JobRepository::new(db.pool());
    for i in 0..25 {
        repo.insert(&listing(&format!("acme-{:02}", i), "Acme", "full-time", &["React"], i), None)
            .await
            .unwrap();
    }
    for i in 0..3 {
        repo.insert(
            &listing(&format!("globex-{}", i), "Globex", "contract", &["Python", "React"], 30 + i),
            None,
        )
        .await
        .unwrap();
    }
    db
}

fn test_config() -> ConfigManager {
    ConfigManager {
        environment: EnvironmentConfig::default(),
        auth: AuthSettings {
            jwt_secret: SECRET.to_string(),
            audience: "authenticated".to_string(),
        },
        search: SearchSettings {
            page_size: 10,
            recent_jobs: 6,
        },
        logging: LoggingSettings::default(),
    }
}

async fn client() -> Client {
    let rocket = remote_jobs::build_rocket(&test_config(), seeded_db().await, SessionEvents::default());
    Client::tracked(rocket).await.unwrap()
}

fn bearer(user_id: &str) -> Header<'static> {
    let token = AuthConfig::new(SECRET, "authenticated")
        .issue(user_id, Some("dev@example.com"), Duration::hours(1))
        .unwrap();
    Header::new("Authorization", format!("Bearer {}", token))
}

async fn json_body(response: rocket::local::asynchronous::LocalResponse<'_>) -> Value {
    let body = response.into_string().await.unwrap();
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_search_filters_and_pages_against_storage() {
    let db = seeded_db().await;
    let repo = JobRepository::new(db.pool());

    let contract = FilterState::new().with(Facet::JobType, &["Contract"]);
    let page = repo.search(&compile(&contract, 0, 10)).await.unwrap();
    assert_eq!(page.total_count, 3);
    assert!(page.jobs.iter().all(|job| job.job_type == "contract"));

    let both_skills = FilterState::new().with(Facet::Skills, &["Python", "React"]);
    let page = repo.search(&compile(&both_skills, 0, 10)).await.unwrap();
    assert_eq!(page.total_count, 3);

    let last = repo.search(&compile(&FilterState::new(), 2, 10)).await.unwrap();
    assert_eq!(last.total_pages, 3);
    assert_eq!(last.jobs.len(), 8);

    let past_end = repo.search(&compile(&FilterState::new(), 3, 10)).await;
    assert!(matches!(past_end, Err(SearchError::PageOutOfRange { page: 3, total_pages: 3 })));
}

#[tokio::test]
async fn test_session_discards_superseded_fetch() {
    let db = seeded_db().await;
    let repo = JobRepository::new(db.pool());
    let mut session = SearchSession::new(10);

    let (stale_token, stale_query) = session.begin_fetch();
    session.toggle_facet(Facet::JobType, "Contract");
    let (token, query) = session.begin_fetch();

    let fresh = repo.search(&query).await.unwrap();
    let stale = repo.search(&stale_query).await.unwrap();

    assert!(session.complete(token, fresh));
    assert!(!session.complete(stale_token, stale));
    assert_eq!(session.results().map(|page| page.total_count), Some(3));
}

#[tokio::test]
async fn test_search_endpoint_returns_page_strip() {
    let client = client().await;

    let response = client.get("/api/jobs?page=1").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    assert_eq!(body["data"]["total_count"], 28);
    assert_eq!(body["data"]["total_pages"], 3);
    assert_eq!(body["data"]["jobs"].as_array().map(Vec::len), Some(10));
    assert_eq!(body["data"]["has_previous"], true);
    assert_eq!(body["data"]["has_next"], true);

    let response = client.get("/api/jobs?job_type=Contract&skills=Python").dispatch().await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["total_count"], 3);

    let response = client.get("/api/jobs?page=9").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
    let body = json_body(response).await;
    assert_eq!(body["error_code"], "PAGE_OUT_OF_RANGE");
}

#[tokio::test]
async fn test_protected_routes_redirect_to_sign_in() {
    let client = client().await;

    let response = client.get("/api/jobs/acme-00").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
    let body = json_body(response).await;
    assert_eq!(body["error_code"], "AUTH_REQUIRED");
    assert_eq!(body["redirect_to"], "/signin?redirect=%2Fjobs%2Facme-00");

    let response = client
        .get("/api/jobs/acme-00")
        .header(Header::new("Authorization", "Bearer not-a-jwt"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
    let body = json_body(response).await;
    assert_eq!(body["error_code"], "TOKEN_REJECTED");
}

#[tokio::test]
async fn test_saved_job_toggle_round_trip() {
    let client = client().await;

    let response = client.post("/api/jobs/acme-03/save").header(bearer("user-1")).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["data"]["saved"], true);

    let response = client.get("/api/jobs/acme-03").header(bearer("user-1")).dispatch().await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["is_saved"], true);
    assert_eq!(body["data"]["company_name"], "Acme");

    let response = client.get("/api/saved-jobs").header(bearer("user-1")).dispatch().await;
    assert_eq!(json_body(response).await["data"].as_array().map(Vec::len), Some(1));

    let response = client.post("/api/jobs/acme-03/save").header(bearer("user-1")).dispatch().await;
    assert_eq!(json_body(response).await["data"]["saved"], false);

    let response = client.post("/api/jobs/missing/save").header(bearer("user-1")).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[tokio::test]
async fn test_newsletter_reports_duplicates() {
    let client = client().await;

    let response = client
        .post("/api/newsletter")
        .header(ContentType::JSON)
        .body(r#"{"email":"Reader@Example.com"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let response = client
        .post("/api/newsletter")
        .header(ContentType::JSON)
        .body(r#"{"email":"reader@example.com "}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Conflict);
    assert_eq!(json_body(response).await["error_code"], "ALREADY_SUBSCRIBED");

    let response = client
        .post("/api/newsletter")
        .header(ContentType::JSON)
        .body(r#"{"email":"not-an-address"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}

#[tokio::test]
async fn test_resume_is_created_on_first_save() {
    let client = client().await;

    let response = client.get("/api/resume").header(bearer("user-2")).dispatch().await;
    let body = json_body(response).await;
    assert!(body["data"]["updated_at"].is_null());

    let mut data = body["data"]["data"].clone();
    data["summary"]["text"] = Value::String("Rust developer".to_string());

    let response = client
        .put("/api/resume")
        .header(bearer("user-2"))
        .header(ContentType::JSON)
        .body(data.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let response = client.get("/api/resume").header(bearer("user-2")).dispatch().await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["data"]["summary"]["text"], "Rust developer");
    assert!(!body["data"]["updated_at"].is_null());
}

#[tokio::test]
async fn test_companies_directory_and_profile() {
    let client = client().await;

    let response = client.get("/api/companies").dispatch().await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["total"], 2);

    let response = client.get("/api/companies?q=glob").dispatch().await;
    assert_eq!(json_body(response).await["data"]["total"], 1);

    let response = client.get("/api/companies/globex").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let response = client.get("/api/companies/initech").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

fn posting_form() -> Value {
    json!({
        "title": "Senior Rust Engineer",
        "jobType": "Full-time",
        "experienceLevel": "Senior Level",
        "location": "Remote (Europe)",
        "salaryMin": "120,000",
        "salaryMax": "160000",
        "description": "Build and operate the job search backend. ".repeat(3),
        "responsibilities": ["Own the search pipeline"],
        "requirements": ["Five years of Rust"],
        "benefits": ["Remote stipend"],
        "skills": ["Rust", "SQL"],
        "companyName": "Initech",
        "companyWebsite": "https://initech.example",
        "companyDescription": "Initech builds tools for remote teams all over the world.",
        "companyIndustry": "Software",
        "companySize": "51-200",
        "applicationEmail": "jobs@initech.example"
    })
}

#[tokio::test]
async fn test_posted_job_becomes_searchable() {
    let client = client().await;

    let response = client
        .post("/api/jobs")
        .header(bearer("poster-1"))
        .header(ContentType::JSON)
        .body(posting_form().to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(body["data"]["share_url"].as_str().unwrap().ends_with(&id));

    let response = client.get("/api/jobs?q=senior%20rust").dispatch().await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["total_count"], 1);
    assert_eq!(body["data"]["jobs"][0]["id"], id.as_str());
    assert_eq!(body["data"]["jobs"][0]["company_name"], "Initech");

    let response = client.get("/api/companies/initech").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
}

#[tokio::test]
async fn test_invalid_posting_lists_field_errors() {
    let client = client().await;

    let mut form = posting_form();
    form["title"] = Value::String("Dev".to_string());
    form["applicationEmail"] = Value::String("not-an-email".to_string());

    let response = client
        .post("/api/jobs")
        .header(bearer("poster-1"))
        .header(ContentType::JSON)
        .body(form.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body = json_body(response).await;
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["field_errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"applicationEmail"));

    let response = client.get("/api/jobs?q=dev").dispatch().await;
    assert_eq!(json_body(response).await["data"]["total_count"], 0);

    let response = client
        .post("/api/jobs")
        .header(ContentType::JSON)
        .body(posting_form().to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[tokio::test]
async fn test_step_validation_endpoint() {
    let client = client().await;

    let response = client
        .post("/api/jobs/validate?step=1")
        .header(ContentType::JSON)
        .body(posting_form().to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    assert_eq!(body["data"]["can_advance"], true);
    assert_eq!(body["data"]["next_step"], 2);
    // publishing is only offered on the last step
    assert_eq!(body["data"]["can_submit"], false);

    let response = client
        .post("/api/jobs/validate?step=4")
        .header(ContentType::JSON)
        .body(posting_form().to_string())
        .dispatch()
        .await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["can_submit"], true);
    assert!(body["data"]["next_step"].is_null());

    let response = client
        .post("/api/jobs/validate?step=1")
        .header(ContentType::JSON)
        .body("{}")
        .dispatch()
        .await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["can_advance"], false);
    assert!(body["data"]["next_step"].is_null());
    assert!(!body["data"]["errors"].as_array().unwrap().is_empty());

    let response = client
        .post("/api/jobs/validate?step=5")
        .header(ContentType::JSON)
        .body(posting_form().to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(json_body(response).await["error_code"], "INVALID_STEP");
}

#[tokio::test]
async fn test_posting_form_template_and_prefill() {
    let client = client().await;

    let response = client.get("/api/jobs/form").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    assert_eq!(body["data"]["steps"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["data"]["form"]["location"], "Remote (Worldwide)");

    let response = client.get("/api/jobs/acme-00/form").header(bearer("user-1")).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    assert_eq!(body["data"]["companyName"], "Acme");
    assert_eq!(body["data"]["skills"], json!(["React"]));

    let response = client.get("/api/jobs/missing/form").header(bearer("user-1")).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[tokio::test]
async fn test_recent_jobs_limit_is_clamped() {
    let client = client().await;

    let response = client.get("/api/jobs/recent?limit=0").dispatch().await;
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["id"], "acme-00");

    let response = client.get("/api/jobs/recent?limit=500").dispatch().await;
    assert_eq!(json_body(response).await["data"].as_array().map(Vec::len), Some(28));

    let response = client.get("/api/jobs/recent").dispatch().await;
    assert_eq!(json_body(response).await["data"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn test_resource_hub_filters() {
    let client = client().await;

    let response = client.get("/api/resources").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    assert_eq!(body["data"]["blogs"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["data"]["fairs"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["data"]["blog_categories"].as_array().map(Vec::len), Some(6));

    let response = client.get("/api/resources?tab=events&type=seminar&format=all").dispatch().await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["events"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["data"]["blogs"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["data"]["events"][0]["type"], "seminar");

    let response = client.get("/api/resources?tab=internships&location=europe&q=design").dispatch().await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["internships"][0]["company"], "DesignHub");

    let response = client.get("/api/resources?type=webinar").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(json_body(response).await["error_code"], "INVALID_FILTER");
}
