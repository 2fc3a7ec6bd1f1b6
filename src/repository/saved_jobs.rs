// src/repository/saved_jobs.rs
use crate::models::JobListing;
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// Outcome of toggling a bookmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveToggle {
    Saved,
    Removed,
}

impl SaveToggle {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveToggle::Saved)
    }

    pub fn message(&self) -> &'static str {
        match self {
            SaveToggle::Saved => "Job saved successfully",
            SaveToggle::Removed => "Job removed from saved jobs",
        }
    }
}

pub struct SavedJobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SavedJobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn is_saved(&self, user_id: &str, job_id: &str) -> Result<bool> {
        let found: Option<String> =
            sqlx::query_scalar("SELECT id FROM saved_jobs WHERE user_id = ? AND job_id = ?")
                .bind(user_id)
                .bind(job_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(found.is_some())
    }

    /// Flip the bookmark for `(user_id, job_id)`. Both statements are plain
    /// writes; the unique `(user_id, job_id)` key keeps a racing double click
    /// from storing two rows.
    pub async fn toggle(&self, user_id: &str, job_id: &str) -> Result<SaveToggle> {
        let removed = sqlx::query("DELETE FROM saved_jobs WHERE user_id = ? AND job_id = ?")
            .bind(user_id)
            .bind(job_id)
            .execute(self.pool)
            .await?
            .rows_affected();

        let outcome = if removed > 0 {
            SaveToggle::Removed
        } else {
            sqlx::query(
                "INSERT INTO saved_jobs (id, user_id, job_id, created_at) VALUES (?, ?, ?, ?) \
                 ON CONFLICT(user_id, job_id) DO NOTHING",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(user_id)
            .bind(job_id)
            .bind(Utc::now())
            .execute(self.pool)
            .await?;
            SaveToggle::Saved
        };

        info!("User {} toggled job {}: {:?}", user_id, job_id, outcome);
        Ok(outcome)
    }

    /// The user's bookmarked listings, most recently saved first
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<JobListing>> {
        let jobs = sqlx::query_as::<_, JobListing>(
            r#"
            SELECT jobs.*
            FROM saved_jobs
            JOIN jobs ON jobs.id = saved_jobs.job_id
            WHERE saved_jobs.user_id = ?
            ORDER BY saved_jobs.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(jobs)
    }
}
