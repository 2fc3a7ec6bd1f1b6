// src/repository/jobs.rs
use crate::models::{company_slug, group_by_company, slug_to_company_name, CompanyProfile, JobListing};
use crate::search::{total_pages, CompiledSearch, SearchError, SearchPage};
use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{debug, info};

pub struct JobRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a listing. `created_by` is the poster's user id, if any.
    pub async fn insert(&self, job: &JobListing, created_by: Option<&str>) -> Result<()> {
        let json = |items: &Vec<String>| serde_json::to_string(items).context("Failed to encode list column");

        sqlx::query(
            r#"
            INSERT INTO jobs (
                id, title, description,
                company_name, company_website, company_logo, company_industry, company_size, company_description,
                location, job_type, experience,
                salary_min, salary_max, salary_currency, salary_period,
                skills, responsibilities, requirements, benefits,
                application_url, application_email, application_instructions,
                is_remote, is_urgent, is_featured, posted_date, created_by,
                title_lc, description_lc, location_lc
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.employer.name)
        .bind(&job.employer.website)
        .bind(&job.employer.logo)
        .bind(&job.employer.industry)
        .bind(&job.employer.size)
        .bind(&job.employer.description)
        .bind(&job.location)
        .bind(&job.job_type)
        .bind(&job.experience)
        .bind(job.compensation.min)
        .bind(job.compensation.max)
        .bind(&job.compensation.currency)
        .bind(&job.compensation.period)
        .bind(json(&job.skills)?)
        .bind(json(&job.responsibilities)?)
        .bind(json(&job.requirements)?)
        .bind(json(&job.benefits)?)
        .bind(&job.application_url)
        .bind(&job.application_email)
        .bind(&job.application_instructions)
        .bind(job.is_remote)
        .bind(job.is_urgent)
        .bind(job.is_featured)
        .bind(job.posted_date)
        .bind(created_by)
        .bind(job.title.to_lowercase())
        .bind(job.description.to_lowercase())
        .bind(job.location.to_lowercase())
        .execute(self.pool)
        .await
        .with_context(|| format!("Failed to insert job {}", job.id))?;

        info!("Created job {} ({} at {})", job.id, job.title, job.employer.name);
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<JobListing>> {
        let job = sqlx::query_as::<_, JobListing>("SELECT * FROM jobs WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(job)
    }

    /// Run the count and data queries of one search page inside a single
    /// read transaction, so the total and the rows come from the same snapshot.
    pub async fn search(&self, compiled: &CompiledSearch) -> Result<SearchPage, SearchError> {
        debug!("Searching jobs: {}", compiled.data);

        let mut tx = self.pool.begin().await?;

        let mut count_query = compiled.count.count_builder();
        let count: i64 = count_query.build_query_scalar::<i64>().fetch_one(&mut *tx).await?;
        let total_count = count.max(0) as u64;
        let total = total_pages(total_count, compiled.page_size);

        // page 0 of an empty result set is the only page past the end that is allowed
        if compiled.page >= total && !(total_count == 0 && compiled.page == 0) {
            tx.rollback().await?;
            return Err(SearchError::PageOutOfRange {
                page: compiled.page,
                total_pages: total,
            });
        }

        let mut data_query = compiled.data.select_builder();
        let jobs: Vec<JobListing> = data_query.build_query_as::<JobListing>().fetch_all(&mut *tx).await?;

        tx.commit().await?;

        debug!(
            "Search page {} returned {} of {} jobs",
            compiled.page,
            jobs.len(),
            total_count
        );

        Ok(SearchPage {
            jobs,
            total_count,
            total_pages: total,
            page: compiled.page,
        })
    }

    /// Newest listings, for the landing page feed
    pub async fn recent(&self, limit: u32) -> Result<Vec<JobListing>> {
        let jobs = sqlx::query_as::<_, JobListing>("SELECT * FROM jobs ORDER BY posted_date DESC LIMIT ?")
            .bind(i64::from(limit))
            .fetch_all(self.pool)
            .await?;

        Ok(jobs)
    }

    pub async fn all_newest_first(&self) -> Result<Vec<JobListing>> {
        let jobs = sqlx::query_as::<_, JobListing>("SELECT * FROM jobs ORDER BY posted_date DESC")
            .fetch_all(self.pool)
            .await?;

        Ok(jobs)
    }

    /// Every employer with at least one listing
    pub async fn companies(&self) -> Result<Vec<CompanyProfile>> {
        let jobs = self.all_newest_first().await?;
        Ok(group_by_company(&jobs))
    }

    /// Resolve a directory slug back to a company and its listings
    pub async fn company_by_slug(&self, slug: &str) -> Result<Option<CompanyProfile>> {
        let name = slug_to_company_name(slug);

        let jobs = sqlx::query_as::<_, JobListing>(
            "SELECT * FROM jobs WHERE company_name = ? ORDER BY posted_date DESC",
        )
        .bind(&name)
        .fetch_all(self.pool)
        .await?;

        let company = group_by_company(&jobs)
            .into_iter()
            .find(|company| company.id == company_slug(&name));

        Ok(company)
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}
