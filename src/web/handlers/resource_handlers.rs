// src/web/handlers/resource_handlers.rs
use crate::models::resource::UnknownValue;
use crate::models::{ResourceCatalog, ResourceFilter, ResourceTab};
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{debug, warn};

pub async fn resources_handler(
    params: ResourceParams,
    catalog: &State<ResourceCatalog>,
) -> ApiResult<DataResponse<ResourceHub>> {
    let invalid = |e: UnknownValue| {
        warn!("Rejected resource query: {}", e);
        api_error(
            Status::BadRequest,
            e.to_string(),
            "INVALID_FILTER",
            &["Use \"all\" or one of the listed menu values"],
        )
    };

    let tab = match params.tab.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(tab) => Some(tab.parse::<ResourceTab>().map_err(invalid)?),
        None => None,
    };
    let filter = ResourceFilter::new(
        params.q.as_deref(),
        params.category.as_deref(),
        params.location.as_deref(),
        params.event_type.as_deref(),
        params.format.as_deref(),
    )
    .map_err(invalid)?;

    let filtered = catalog.filtered(tab, &filter);
    debug!(
        "Resources: {} blogs, {} internships, {} events, {} fairs",
        filtered.blogs.len(),
        filtered.internships.len(),
        filtered.events.len(),
        filtered.fairs.len()
    );

    Ok(Json(DataResponse::success(
        "Career resources".to_string(),
        ResourceHub {
            catalog: filtered,
            blog_categories: catalog.blog_categories(),
            internship_locations: catalog.internship_locations(),
        },
    )))
}
