// src/web/handlers/system_handlers.rs
use crate::auth::{AuthenticatedUser, OptionalAuth};
use crate::core::Database;
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn get_current_user_handler(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    let session = auth.session();

    Json(DataResponse::success(
        "User authenticated successfully".to_string(),
        UserInfo {
            user_id: session.user_id.clone(),
            email: session.email.clone(),
            expires_at: session.expires_at,
        },
    ))
}

pub async fn health_handler(auth: OptionalAuth, db: &State<Database>) -> ApiResult<TextResponse> {
    if let Some(user) = auth.user {
        info!("Health check by authenticated user: {}", user.user_id());
    } else {
        info!("Health check by anonymous user");
    }

    if let Err(e) = db.health_check().await {
        error!("{:#}", e);
        return Err(api_error(
            Status::ServiceUnavailable,
            "Database unavailable",
            "DATABASE_UNAVAILABLE",
            &["Try again in a few moments"],
        ));
    }

    Ok(Json(TextResponse::success("OK".to_string())))
}
