// src/web/handlers/company_handlers.rs
use crate::core::Database;
use crate::models::{company_facets, CompanyFilter, CompanyProfile};
use crate::repository::JobRepository;
use crate::web::types::*;

use rocket::serde::json::Json;
use rocket::State;
use tracing::{debug, error};

pub async fn companies_handler(
    q: Option<String>,
    industry: Option<String>,
    size: Option<String>,
    db: &State<Database>,
) -> ApiResult<DataResponse<CompanyDirectory>> {
    let all = JobRepository::new(db.pool()).companies().await.map_err(|e| {
        error!("Failed to load companies: {}", e);
        internal_error("load companies")
    })?;

    // facet menus list every value, not only those left after filtering
    let (industries, sizes) = company_facets(&all);

    let filter = CompanyFilter {
        query: q.unwrap_or_default(),
        industry,
        size,
    };
    let companies: Vec<CompanyProfile> = all.into_iter().filter(|c| filter.matches(c)).collect();
    debug!("Company directory: {} matches", companies.len());

    Ok(Json(DataResponse::success(
        format!("{} companies", companies.len()),
        CompanyDirectory {
            total: companies.len(),
            companies,
            industries,
            sizes,
        },
    )))
}

pub async fn company_handler(slug: &str, db: &State<Database>) -> ApiResult<DataResponse<CompanyProfile>> {
    match JobRepository::new(db.pool()).company_by_slug(slug).await {
        Ok(Some(company)) => Ok(Json(DataResponse::success(
            format!("{} open positions", company.jobs.len()),
            company,
        ))),
        Ok(None) => Err(not_found("Company")),
        Err(e) => {
            error!("Failed to load company {}: {}", slug, e);
            Err(internal_error("load company"))
        }
    }
}
