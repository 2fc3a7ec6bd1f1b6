// src/models/job.rs
//! Job listings and the company profiles derived from them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

// ===== Job Type =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobKind {
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl JobKind {
    pub const ALL: [JobKind; 5] = [
        JobKind::FullTime,
        JobKind::PartTime,
        JobKind::Contract,
        JobKind::Freelance,
        JobKind::Internship,
    ];

    /// Encoding used in the `job_type` column
    pub fn as_storage(&self) -> &'static str {
        match self {
            JobKind::FullTime => "full-time",
            JobKind::PartTime => "part-time",
            JobKind::Contract => "contract",
            JobKind::Freelance => "freelance",
            JobKind::Internship => "internship",
        }
    }

    /// Label shown in filters and the posting form
    pub fn label(&self) -> &'static str {
        match self {
            JobKind::FullTime => "Full-time",
            JobKind::PartTime => "Part-time",
            JobKind::Contract => "Contract",
            JobKind::Freelance => "Freelance",
            JobKind::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobKind {
    type Err = anyhow::Error;

    /// Accepts either the display label or the storage encoding
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = crate::search::normalize_job_type(s);
        JobKind::ALL
            .into_iter()
            .find(|kind| kind.as_storage() == normalized)
            .ok_or_else(|| anyhow::anyhow!("Unknown job type: {}", s))
    }
}

// ===== Job Listing =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employer {
    #[serde(rename = "company_name")]
    #[sqlx(rename = "company_name")]
    pub name: String,
    #[serde(rename = "company_website", default)]
    #[sqlx(rename = "company_website")]
    pub website: Option<String>,
    #[serde(rename = "company_logo", default)]
    #[sqlx(rename = "company_logo")]
    pub logo: Option<String>,
    #[serde(rename = "company_industry", default)]
    #[sqlx(rename = "company_industry")]
    pub industry: String,
    #[serde(rename = "company_size", default)]
    #[sqlx(rename = "company_size")]
    pub size: String,
    #[serde(rename = "company_description", default)]
    #[sqlx(rename = "company_description")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Compensation {
    #[serde(rename = "salary_min", default)]
    #[sqlx(rename = "salary_min")]
    pub min: Option<i64>,
    #[serde(rename = "salary_max", default)]
    #[sqlx(rename = "salary_max")]
    pub max: Option<i64>,
    #[serde(rename = "salary_currency", default)]
    #[sqlx(rename = "salary_currency")]
    pub currency: String,
    #[serde(rename = "salary_period", default)]
    #[sqlx(rename = "salary_period")]
    pub period: String,
}

/// A row of the `jobs` collection. Serialized flat with the storage column
/// names, which is also what API clients receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub employer: Employer,
    pub location: String,
    pub job_type: String,
    pub experience: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub compensation: Compensation,
    #[serde(default)]
    #[sqlx(json)]
    pub skills: Vec<String>,
    #[serde(default)]
    #[sqlx(json)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    #[sqlx(json)]
    pub requirements: Vec<String>,
    #[serde(default)]
    #[sqlx(json)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(default)]
    pub application_email: Option<String>,
    #[serde(default)]
    pub application_instructions: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub is_featured: bool,
    pub posted_date: DateTime<Utc>,
}

impl JobListing {
    pub fn kind(&self) -> Option<JobKind> {
        self.job_type.parse().ok()
    }

    /// A listing is actionable when a candidate has somewhere to apply
    pub fn is_actionable(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.application_url) || present(&self.application_email)
    }

    /// Where the "Apply" action points: URL first, then a mailto link
    pub fn apply_target(&self) -> Option<String> {
        match (&self.application_url, &self.application_email) {
            (Some(url), _) if !url.trim().is_empty() => Some(url.clone()),
            (_, Some(email)) if !email.trim().is_empty() => Some(format!("mailto:{}", email)),
            _ => None,
        }
    }
}

// ===== Companies =====

/// `Acme Corp` -> `acme-corp`
pub fn company_slug(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Inverse of [`company_slug`] for names made of capitalised words.
/// Lossy: `openai` comes back as `Openai`.
pub fn slug_to_company_name(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyJob {
    pub id: String,
    pub title: String,
    pub location: String,
    pub job_type: String,
    pub posted_date: DateTime<Utc>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: String,
}

impl From<&JobListing> for CompanyJob {
    fn from(job: &JobListing) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            location: job.location.clone(),
            job_type: job.job_type.clone(),
            posted_date: job.posted_date,
            salary_min: job.compensation.min,
            salary_max: job.compensation.max,
            salary_currency: job.compensation.currency.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyProfile {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub website: String,
    pub industry: String,
    pub size: String,
    pub description: String,
    pub jobs: Vec<CompanyJob>,
}

/// Group listings by employer name. Company details come from the first
/// listing seen for that name, so callers pass listings newest first.
pub fn group_by_company(jobs: &[JobListing]) -> Vec<CompanyProfile> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut companies: Vec<CompanyProfile> = Vec::new();

    for job in jobs {
        let slot = *index.entry(job.employer.name.as_str()).or_insert_with(|| {
            companies.push(CompanyProfile {
                id: company_slug(&job.employer.name),
                name: job.employer.name.clone(),
                logo: job.employer.logo.clone().unwrap_or_default(),
                website: job.employer.website.clone().unwrap_or_default(),
                industry: job.employer.industry.clone(),
                size: job.employer.size.clone(),
                description: job.employer.description.clone(),
                jobs: Vec::new(),
            });
            companies.len() - 1
        });
        companies[slot].jobs.push(CompanyJob::from(job));
    }

    companies
}

/// Company directory filter. `all` or an empty value disables industry/size.
#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    pub query: String,
    pub industry: Option<String>,
    pub size: Option<String>,
}

impl CompanyFilter {
    pub fn matches(&self, company: &CompanyProfile) -> bool {
        let query = self.query.trim().to_lowercase();
        let matches_search = query.is_empty()
            || company.name.to_lowercase().contains(&query)
            || company.description.to_lowercase().contains(&query)
            || company
                .jobs
                .iter()
                .any(|job| job.title.to_lowercase().contains(&query));

        matches_search
            && Self::facet_matches(self.industry.as_deref(), &company.industry)
            && Self::facet_matches(self.size.as_deref(), &company.size)
    }

    fn facet_matches(selected: Option<&str>, value: &str) -> bool {
        match selected {
            None | Some("") | Some("all") => true,
            Some(selected) => selected == value,
        }
    }
}

/// Distinct industries and sizes, for the directory's filter menus
pub fn company_facets(companies: &[CompanyProfile]) -> (Vec<String>, Vec<String>) {
    let industries: BTreeSet<String> = companies.iter().map(|c| c.industry.clone()).collect();
    let sizes: BTreeSet<String> = companies.iter().map(|c| c.size.clone()).collect();
    (industries.into_iter().collect(), sizes.into_iter().collect())
}
