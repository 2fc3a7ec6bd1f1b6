// src/repository/newsletter.rs
use crate::posting::schema::is_valid_email;
use crate::repository::is_unique_violation;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("This email is already subscribed")]
    AlreadySubscribed,

    #[error("Failed to subscribe: {0}")]
    Database(#[from] sqlx::Error),
}

impl SubscribeError {
    /// Stable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            SubscribeError::InvalidEmail => "INVALID_EMAIL",
            SubscribeError::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            SubscribeError::Database(_) => "SUBSCRIBE_FAILED",
        }
    }
}

pub struct NewsletterRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> NewsletterRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add an address. Emails are compared case-insensitively.
    pub async fn subscribe(&self, email: &str) -> Result<Subscriber, SubscribeError> {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(SubscribeError::InvalidEmail);
        }

        let subscriber = Subscriber {
            id: Uuid::new_v4().to_string(),
            email,
            subscribed_at: Utc::now(),
        };

        let result = sqlx::query("INSERT INTO newsletter_subscribers (id, email, subscribed_at) VALUES (?, ?, ?)")
            .bind(&subscriber.id)
            .bind(&subscriber.email)
            .bind(subscriber.subscribed_at)
            .execute(self.pool)
            .await;

        match result {
            Ok(_) => {
                info!("New newsletter subscriber: {}", subscriber.email);
                Ok(subscriber)
            }
            Err(e) if is_unique_violation(&e) => {
                warn!("Duplicate newsletter subscription: {}", subscriber.email);
                Err(SubscribeError::AlreadySubscribed)
            }
            Err(e) => Err(SubscribeError::Database(e)),
        }
    }

    pub async fn list(&self) -> Result<Vec<Subscriber>, sqlx::Error> {
        sqlx::query_as::<_, Subscriber>(
            "SELECT id, email, subscribed_at FROM newsletter_subscribers ORDER BY subscribed_at ASC",
        )
        .fetch_all(self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Database;

    #[tokio::test]
    async fn test_duplicate_subscription_is_distinguished() {
        let db = Database::in_memory().await.unwrap();
        let repo = NewsletterRepository::new(db.pool());

        let first = repo.subscribe("Reader@Example.com ").await.unwrap();
        assert_eq!(first.email, "reader@example.com");

        let err = repo.subscribe("reader@example.com").await.unwrap_err();
        assert!(matches!(err, SubscribeError::AlreadySubscribed));
        assert_eq!(err.code(), "ALREADY_SUBSCRIBED");

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected_before_insert() {
        let db = Database::in_memory().await.unwrap();
        let repo = NewsletterRepository::new(db.pool());

        let err = repo.subscribe("not-an-email").await.unwrap_err();
        assert_eq!(err.code(), "INVALID_EMAIL");
        assert!(repo.list().await.unwrap().is_empty());
    }
}
