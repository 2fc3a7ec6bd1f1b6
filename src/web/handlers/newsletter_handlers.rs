// src/web/handlers/newsletter_handlers.rs
use crate::core::Database;
use crate::repository::{NewsletterRepository, SubscribeError};
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

pub async fn subscribe_handler(
    request: Json<NewsletterRequest>,
    db: &State<Database>,
) -> ApiResult<ActionResponse> {
    match NewsletterRepository::new(db.pool()).subscribe(&request.email).await {
        Ok(subscriber) => Ok(Json(ActionResponse::success(
            format!("{} has been subscribed to our newsletter.", subscriber.email),
            "subscribed".to_string(),
        ))),
        Err(e) => {
            let (status, suggestion) = match &e {
                SubscribeError::InvalidEmail => (Status::BadRequest, "Check the address for typos"),
                SubscribeError::AlreadySubscribed => {
                    (Status::Conflict, "You will keep receiving the newsletter at this address")
                }
                SubscribeError::Database(db_error) => {
                    error!("Newsletter subscription failed: {}", db_error);
                    (Status::InternalServerError, "Try again in a few moments")
                }
            };
            Err(api_error(status, e.to_string(), e.code(), &[suggestion]))
        }
    }
}
