// src/repository/resumes.rs
use crate::models::ResumeData;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// A user's stored resume document
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ResumeRecord {
    pub id: String,
    pub user_id: String,
    #[sqlx(json)]
    pub data: ResumeData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct ResumeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ResumeRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<ResumeRecord>> {
        let record = sqlx::query_as::<_, ResumeRecord>(
            "SELECT id, user_id, data, created_at, updated_at FROM resumes WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(record)
    }

    /// Update the user's resume, creating it on first save. A single
    /// statement, so concurrent saves only ever wait for the write lock.
    pub async fn save(&self, user_id: &str, data: &ResumeData) -> Result<ResumeRecord> {
        let document = serde_json::to_string(data).context("Failed to encode resume")?;
        let now = Utc::now();
        let new_id = Uuid::new_v4().to_string();

        let record = sqlx::query_as::<_, ResumeRecord>(
            r#"
            INSERT INTO resumes (id, user_id, data, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at
            RETURNING id, user_id, data, created_at, updated_at
            "#,
        )
        .bind(&new_id)
        .bind(user_id)
        .bind(&document)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .with_context(|| format!("Failed to save resume for {}", user_id))?;

        if record.id == new_id {
            info!("Created resume {} for user {}", record.id, user_id);
        } else {
            info!("Updated resume {} for user {}", record.id, user_id);
        }
        Ok(record)
    }
}
