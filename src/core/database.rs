// src/core/database.rs
//! SQLite connection management and schema migrations

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Lowercased copies of the free-text columns, matched by text search
const FOLDED_COLUMNS: [&str; 3] = ["title_lc", "description_lc", "location_lc"];

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database file and run migrations
    pub async fn new(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
        }

        // WAL lets readers run beside the single writer; writers queue on the busy timeout
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_path.display()))?;

        info!("Database connection established: {}", database_path.display());

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Private in-memory database. A single connection, since every SQLite
    /// memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                company_name TEXT NOT NULL,
                company_website TEXT,
                company_logo TEXT,
                company_industry TEXT NOT NULL DEFAULT '',
                company_size TEXT NOT NULL DEFAULT '',
                company_description TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT '',
                job_type TEXT NOT NULL,
                experience TEXT NOT NULL DEFAULT '',
                salary_min INTEGER,
                salary_max INTEGER,
                salary_currency TEXT NOT NULL DEFAULT 'USD',
                salary_period TEXT NOT NULL DEFAULT 'yearly',
                skills TEXT NOT NULL DEFAULT '[]',
                responsibilities TEXT NOT NULL DEFAULT '[]',
                requirements TEXT NOT NULL DEFAULT '[]',
                benefits TEXT NOT NULL DEFAULT '[]',
                application_url TEXT,
                application_email TEXT,
                application_instructions TEXT,
                is_remote BOOLEAN NOT NULL DEFAULT TRUE,
                is_urgent BOOLEAN NOT NULL DEFAULT FALSE,
                is_featured BOOLEAN NOT NULL DEFAULT FALSE,
                posted_date TEXT NOT NULL,
                created_by TEXT,
                title_lc TEXT NOT NULL DEFAULT '',
                description_lc TEXT NOT NULL DEFAULT '',
                location_lc TEXT NOT NULL DEFAULT ''
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        self.add_folded_columns().await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_posted_date ON jobs(posted_date);")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_company_name ON jobs(company_name);")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS saved_jobs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                job_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (user_id, job_id)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resumes (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL UNIQUE,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS newsletter_subscribers (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                subscribed_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Databases created before the folded columns existed get them added
    /// and filled in from the stored text.
    async fn add_folded_columns(&self) -> Result<()> {
        let existing: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('jobs')")
            .fetch_all(&self.pool)
            .await?;

        let mut added = false;
        for column in FOLDED_COLUMNS {
            if !existing.iter().any(|name| name == column) {
                sqlx::query(&format!(
                    "ALTER TABLE jobs ADD COLUMN {} TEXT NOT NULL DEFAULT ''",
                    column
                ))
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to add column jobs.{}", column))?;
                added = true;
            }
        }
        if !added {
            return Ok(());
        }

        let rows: Vec<(String, String, String, String)> =
            sqlx::query_as("SELECT id, title, description, location FROM jobs")
                .fetch_all(&self.pool)
                .await?;

        let mut tx = self.pool.begin().await?;
        for (id, title, description, location) in &rows {
            sqlx::query("UPDATE jobs SET title_lc = ?, description_lc = ?, location_lc = ? WHERE id = ?")
                .bind(title.to_lowercase())
                .bind(description.to_lowercase())
                .bind(location.to_lowercase())
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        info!("Backfilled search columns for {} jobs", rows.len());
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db.health_check().await.unwrap();

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(db.pool())
                .await
                .unwrap();
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, vec!["jobs", "newsletter_subscribers", "resumes", "saved_jobs"]);
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("jobs.db");
        Database::new(&path).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_older_jobs_table_gets_folded_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.db");
        {
            let pool = SqlitePool::connect_with(SqliteConnectOptions::new().filename(&path).create_if_missing(true))
                .await
                .unwrap();
            sqlx::query(
                "CREATE TABLE jobs (id TEXT PRIMARY KEY, title TEXT NOT NULL, description TEXT NOT NULL DEFAULT '', \
                 company_name TEXT NOT NULL, location TEXT NOT NULL DEFAULT '', job_type TEXT NOT NULL, \
                 posted_date TEXT NOT NULL)",
            )
            .execute(&pool)
            .await
            .unwrap();
            sqlx::query(
                "INSERT INTO jobs (id, title, description, company_name, location, job_type, posted_date) \
                 VALUES ('j1', 'Éditeur', 'Écrire', 'Acme', 'Zürich', 'full-time', '2025-01-01T00:00:00Z')",
            )
            .execute(&pool)
            .await
            .unwrap();
            pool.close().await;
        }

        let db = Database::new(&path).await.unwrap();
        let folded: (String, String, String) =
            sqlx::query_as("SELECT title_lc, description_lc, location_lc FROM jobs WHERE id = 'j1'")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(folded, ("éditeur".to_string(), "écrire".to_string(), "zürich".to_string()));
    }
}
