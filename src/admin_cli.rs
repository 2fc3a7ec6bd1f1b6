// src/admin_cli.rs
use crate::auth::AuthConfig;
use crate::core::{ConfigManager, Database};
use crate::models::{Compensation, Employer, JobListing};
use crate::repository::{JobRepository, NewsletterRepository};
use crate::search::normalize_job_type;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "remote-jobs")]
#[command(about = "Remote job board API server and administration tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<AdminCommand>,

    /// Configuration file
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Start the API server (default)
    Serve,
    /// Create or upgrade the database schema
    Migrate,
    /// Import job listings from a CSV file (list columns separated by `|`)
    ImportJobs { csv_file: PathBuf },
    /// Show the newest job listings
    ListJobs {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// List newsletter subscribers
    Subscribers,
    /// Sign a session token for local testing
    IssueToken {
        user_id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value_t = 24)]
        hours: i64,
    },
}

/// One CSV row. Headers use the storage column names.
#[derive(Debug, Deserialize)]
struct ImportRow {
    title: String,
    description: String,
    company_name: String,
    #[serde(default)]
    company_website: Option<String>,
    #[serde(default)]
    company_logo: Option<String>,
    #[serde(default)]
    company_industry: String,
    #[serde(default)]
    company_size: String,
    #[serde(default)]
    company_description: String,
    location: String,
    job_type: String,
    #[serde(default)]
    experience: String,
    #[serde(default)]
    salary_min: Option<i64>,
    #[serde(default)]
    salary_max: Option<i64>,
    #[serde(default)]
    salary_currency: Option<String>,
    #[serde(default)]
    salary_period: Option<String>,
    #[serde(default)]
    skills: String,
    #[serde(default)]
    responsibilities: String,
    #[serde(default)]
    requirements: String,
    #[serde(default)]
    benefits: String,
    #[serde(default)]
    application_url: Option<String>,
    #[serde(default)]
    application_email: Option<String>,
    #[serde(default)]
    application_instructions: Option<String>,
    #[serde(default)]
    is_remote: Option<bool>,
    #[serde(default)]
    is_urgent: Option<bool>,
    #[serde(default)]
    is_featured: Option<bool>,
    #[serde(default)]
    posted_date: Option<DateTime<Utc>>,
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ImportRow {
    fn into_listing(self, now: DateTime<Utc>) -> Result<JobListing> {
        if self.title.trim().is_empty() || self.company_name.trim().is_empty() {
            anyhow::bail!("title and company_name are required");
        }

        Ok(JobListing {
            id: Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            employer: Employer {
                name: self.company_name.trim().to_string(),
                website: non_empty(self.company_website),
                logo: non_empty(self.company_logo),
                industry: self.company_industry.trim().to_string(),
                size: self.company_size.trim().to_string(),
                description: self.company_description.trim().to_string(),
            },
            location: self.location.trim().to_string(),
            job_type: normalize_job_type(&self.job_type),
            experience: self.experience.trim().to_string(),
            compensation: Compensation {
                min: self.salary_min,
                max: self.salary_max,
                currency: non_empty(self.salary_currency).unwrap_or_else(|| "USD".to_string()),
                period: non_empty(self.salary_period).unwrap_or_else(|| "yearly".to_string()),
            },
            skills: split_list(&self.skills),
            responsibilities: split_list(&self.responsibilities),
            requirements: split_list(&self.requirements),
            benefits: split_list(&self.benefits),
            application_url: non_empty(self.application_url),
            application_email: non_empty(self.application_email),
            application_instructions: non_empty(self.application_instructions),
            is_remote: self.is_remote.unwrap_or(true),
            is_urgent: self.is_urgent.unwrap_or(false),
            is_featured: self.is_featured.unwrap_or(false),
            posted_date: self.posted_date.unwrap_or(now),
        })
    }
}

/// Parse listings from CSV text. Rows that fail come back as errors with
/// their 1-based line number; the rest are still returned.
pub fn parse_job_csv(content: &str, now: DateTime<Utc>) -> (Vec<JobListing>, Vec<String>) {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut jobs = Vec::new();
    let mut errors = Vec::new();

    for (index, result) in reader.deserialize::<ImportRow>().enumerate() {
        let line = index + 2;
        match result.map_err(anyhow::Error::from).and_then(|row| row.into_listing(now)) {
            Ok(job) => {
                if !job.is_actionable() {
                    warn!(
                        "Line {}: '{}' has neither an application URL nor an email",
                        line, job.title
                    );
                }
                jobs.push(job);
            }
            Err(e) => errors.push(format!("line {}: {}", line, e)),
        }
    }

    (jobs, errors)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
}

pub async fn import_jobs(db: &Database, csv_file: &PathBuf) -> Result<ImportReport> {
    let content = tokio::fs::read_to_string(csv_file)
        .await
        .with_context(|| format!("CSV file not found: {}", csv_file.display()))?;

    let (jobs, errors) = parse_job_csv(&content, Utc::now());
    let mut report = ImportReport {
        imported: 0,
        failed: errors.len(),
    };
    for message in errors {
        warn!("Skipped {}", message);
    }

    let repo = JobRepository::new(db.pool());
    for job in jobs {
        match repo.insert(&job, None).await {
            Ok(()) => report.imported += 1,
            Err(e) => {
                report.failed += 1;
                error!("Failed to import '{}': {:#}", job.title, e);
            }
        }
    }

    Ok(report)
}

/// Run a non-server command. `Serve` is handled by the binary.
pub async fn handle_admin_command(command: AdminCommand, config: &ConfigManager) -> Result<()> {
    if let AdminCommand::IssueToken { user_id, email, hours } = &command {
        let auth = AuthConfig::from_settings(&config.auth);
        let token = auth.issue(user_id, email.as_deref(), chrono::Duration::hours(*hours))?;
        info!("Token for {} (valid {}h):", user_id, hours);
        info!("{}", token);
        return Ok(());
    }

    let db = Database::new(&config.environment.database_path).await?;

    match command {
        AdminCommand::Serve | AdminCommand::IssueToken { .. } => {}

        AdminCommand::Migrate => {
            info!(
                "Database ready at: {}",
                config.environment.database_path.display()
            );
            info!("Tables: jobs, saved_jobs, resumes, newsletter_subscribers");
        }

        AdminCommand::ImportJobs { csv_file } => {
            let report = import_jobs(&db, &csv_file).await?;
            info!("Import completed:");
            info!("  Imported: {}", report.imported);
            info!("  Failed:   {}", report.failed);
        }

        AdminCommand::ListJobs { limit } => {
            let repo = JobRepository::new(db.pool());
            let jobs = repo.recent(limit).await?;
            if jobs.is_empty() {
                info!("No job listings found.");
            } else {
                info!(
                    "{:<38} {:<30} {:<20} {:<12} {:<16}",
                    "ID", "Title", "Company", "Type", "Posted"
                );
                info!("{}", "-".repeat(118));
                for job in jobs {
                    info!(
                        "{:<38} {:<30} {:<20} {:<12} {:<16}",
                        job.id,
                        job.title,
                        job.employer.name,
                        job.job_type,
                        job.posted_date.format("%Y-%m-%d %H:%M")
                    );
                }
                info!("Total listings: {}", repo.count().await?);
            }
        }

        AdminCommand::Subscribers => {
            let subscribers = NewsletterRepository::new(db.pool()).list().await?;
            if subscribers.is_empty() {
                info!("No newsletter subscribers yet.");
            } else {
                for subscriber in &subscribers {
                    info!(
                        "{:<40} {}",
                        subscriber.email,
                        subscriber.subscribed_at.format("%Y-%m-%d %H:%M")
                    );
                }
                info!("{} subscribers", subscribers.len());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HEADER: &str = "title,description,company_name,company_industry,company_size,location,job_type,experience,salary_min,salary_max,skills,application_url,application_email,is_urgent,posted_date";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_rows_with_lists_and_defaults() {
        let csv = format!(
            "{}\nRust Engineer,Build things,Acme Corp,Software,11-50,Worldwide,Full time,Senior Level,100000,150000,Rust | Tokio|,,jobs@acme.example,true,2025-04-01T10:00:00Z\n",
            HEADER
        );
        let (jobs, errors) = parse_job_csv(&csv, now());
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(jobs.len(), 1);

        let job = &jobs[0];
        assert_eq!(job.job_type, "full-time");
        assert_eq!(job.skills, vec!["Rust".to_string(), "Tokio".to_string()]);
        assert_eq!(job.application_url, None);
        assert_eq!(job.compensation.currency, "USD");
        assert!(job.is_urgent);
        assert!(job.is_remote);
        assert_eq!(job.posted_date, Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_rows_without_apply_info_are_kept() {
        let csv = format!(
            "{}\nDesigner,Design,Globex,Design,1-10,Europe,Contract,,,,,,,,\n",
            HEADER
        );
        let (jobs, errors) = parse_job_csv(&csv, now());
        assert!(errors.is_empty(), "{:?}", errors);
        assert!(!jobs[0].is_actionable());
        assert_eq!(jobs[0].posted_date, now());
    }

    #[test]
    fn test_bad_rows_are_reported_by_line() {
        let csv = format!(
            "{}\n,No title,Acme,,,,full-time,,,,,,,,\nOk title,Desc,Acme,,,,full-time,,lots,,,,,,\nGood,Desc,Acme,,,Remote,part-time,,,,,,a@b.io,,\n",
            HEADER
        );
        let (jobs, errors) = parse_job_csv(&csv, now());
        assert_eq!(jobs.len(), 1);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("line 2:"));
        assert!(errors[1].starts_with("line 3:"));
    }

    #[tokio::test]
    async fn test_import_jobs_persists_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        std::fs::write(
            &path,
            format!("{}\nGood,Desc,Acme,,,Remote,part-time,,,,Go,,a@b.io,,\n", HEADER),
        )
        .unwrap();

        let db = Database::in_memory().await.unwrap();
        let report = import_jobs(&db, &path).await.unwrap();
        assert_eq!(report, ImportReport { imported: 1, failed: 0 });
        assert_eq!(JobRepository::new(db.pool()).count().await.unwrap(), 1);
    }
}
