// src/posting/mapping.rs
//! The one place where form field names meet storage column names.

use crate::models::{JobKind, JobListing};
use crate::posting::schema::{parse_salary, JobPostingForm};
use crate::search::normalize_job_type;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// (form field, storage column)
pub const FIELD_RENAMES: &[(&str, &str)] = &[
    ("title", "title"),
    ("jobType", "job_type"),
    ("experienceLevel", "experience"),
    ("location", "location"),
    ("salaryMin", "salary_min"),
    ("salaryMax", "salary_max"),
    ("salaryCurrency", "salary_currency"),
    ("salaryPeriod", "salary_period"),
    ("description", "description"),
    ("responsibilities", "responsibilities"),
    ("requirements", "requirements"),
    ("benefits", "benefits"),
    ("skills", "skills"),
    ("companyName", "company_name"),
    ("companyWebsite", "company_website"),
    ("companyLogo", "company_logo"),
    ("companyDescription", "company_description"),
    ("companyIndustry", "company_industry"),
    ("companySize", "company_size"),
    ("applicationEmail", "application_email"),
    ("applicationUrl", "application_url"),
    ("applicationInstructions", "application_instructions"),
    ("isRemote", "is_remote"),
    ("isUrgent", "is_urgent"),
    ("isFeatured", "is_featured"),
    ("postedDate", "posted_date"),
];

const LIST_COLUMNS: [&str; 4] = ["responsibilities", "requirements", "benefits", "skills"];
const NULLABLE_COLUMNS: [&str; 3] = ["application_url", "application_instructions", "company_logo"];

pub fn storage_key(form_key: &str) -> Option<&'static str> {
    FIELD_RENAMES
        .iter()
        .find(|(form, _)| *form == form_key)
        .map(|(_, storage)| *storage)
}

pub fn form_key(storage_key: &str) -> Option<&'static str> {
    FIELD_RENAMES
        .iter()
        .find(|(_, storage)| *storage == storage_key)
        .map(|(form, _)| *form)
}

/// Rename form keys to storage keys. Keys outside the table pass through.
pub fn rename_to_storage(record: Map<String, Value>) -> Map<String, Value> {
    record
        .into_iter()
        .map(|(key, value)| match storage_key(&key) {
            Some(storage) => (storage.to_string(), value),
            None => (key, value),
        })
        .collect()
}

/// Rename storage keys to form keys. Keys outside the table pass through.
pub fn rename_to_form(record: Map<String, Value>) -> Map<String, Value> {
    record
        .into_iter()
        .map(|(key, value)| match form_key(&key) {
            Some(form) => (form.to_string(), value),
            None => (key, value),
        })
        .collect()
}

/// Convert a validated form into a storage record (snake_case keys, typed
/// values, trimmed text, blank list items dropped).
pub fn form_to_record(form: &JobPostingForm) -> Result<Map<String, Value>> {
    let Value::Object(fields) = serde_json::to_value(form).context("Failed to serialize form")? else {
        anyhow::bail!("Job posting form did not serialize to an object");
    };
    let mut record = rename_to_storage(fields);

    for value in record.values_mut() {
        if let Value::String(text) = value {
            *text = text.trim().to_string();
        }
    }

    if let Some(Value::String(job_type)) = record.get_mut("job_type") {
        *job_type = normalize_job_type(job_type);
    }

    for column in ["salary_min", "salary_max"] {
        let raw = record
            .get(column)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let amount = parse_salary(&raw).with_context(|| format!("Invalid {}: {:?}", column, raw))?;
        record.insert(column.to_string(), Value::from(amount));
    }

    for column in LIST_COLUMNS {
        if let Some(Value::Array(items)) = record.get_mut(column) {
            *items = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect();
        }
    }

    for column in NULLABLE_COLUMNS {
        if let Some(value) = record.get_mut(column) {
            if value.as_str().is_some_and(str::is_empty) {
                *value = Value::Null;
            }
        }
    }

    Ok(record)
}

/// Build the listing that gets persisted for a submitted form
pub fn listing_from_form(form: &JobPostingForm, id: &str, posted_date: DateTime<Utc>) -> Result<JobListing> {
    let mut record = form_to_record(form)?;
    record.insert("id".to_string(), Value::from(id));
    record.insert("posted_date".to_string(), Value::from(posted_date.to_rfc3339()));

    serde_json::from_value(Value::Object(record)).context("Failed to build job listing from form")
}

/// Pre-fill the wizard from a stored listing
pub fn form_from_listing(job: &JobListing) -> Result<JobPostingForm> {
    let Value::Object(columns) = serde_json::to_value(job).context("Failed to serialize listing")? else {
        anyhow::bail!("Job listing did not serialize to an object");
    };
    let mut fields = rename_to_form(columns);

    for key in ["salaryMin", "salaryMax"] {
        if let Some(value) = fields.get_mut(key) {
            *value = match value {
                Value::Number(n) => Value::String(n.to_string()),
                _ => Value::String(String::new()),
            };
        }
    }

    if let Some(kind) = job.kind() {
        fields.insert("jobType".to_string(), Value::from(kind.label()));
    }

    fields.retain(|_, value| !value.is_null());

    serde_json::from_value(Value::Object(fields)).context("Failed to build form from listing")
}

/// Labels accepted by the job type select
pub fn job_type_labels() -> Vec<&'static str> {
    JobKind::ALL.iter().map(JobKind::label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posting::schema::tests::valid_form;
    use chrono::TimeZone;

    #[test]
    fn test_rename_table_is_bijective() {
        for (form, storage) in FIELD_RENAMES {
            assert_eq!(storage_key(form), Some(*storage));
            assert_eq!(form_key(storage), Some(*form));
        }
    }

    #[test]
    fn test_form_to_record_renames_and_converts() {
        let mut form = valid_form();
        form.skills = vec![" Rust ".to_string(), "SQL".to_string()];
        let record = form_to_record(&form).unwrap();

        assert!(record.get("companyName").is_none());
        assert_eq!(record["company_name"], "Acme Corp");
        assert_eq!(record["experience"], "Senior Level");
        assert_eq!(record["job_type"], "full-time");
        assert_eq!(record["salary_min"], 120_000);
        assert_eq!(record["skills"], serde_json::json!(["Rust", "SQL"]));
        assert_eq!(record["application_url"], Value::Null);
        assert_eq!(record["is_remote"], true);
    }

    #[test]
    fn test_listing_round_trips_through_form() {
        let posted = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let form = valid_form();
        let listing = listing_from_form(&form, "job-1", posted).unwrap();

        assert_eq!(listing.id, "job-1");
        assert_eq!(listing.employer.name, "Acme Corp");
        assert_eq!(listing.compensation.max, Some(160_000));
        assert_eq!(listing.posted_date, posted);
        assert_eq!(listing.application_url, None);

        let back = form_from_listing(&listing).unwrap();
        assert_eq!(back.job_type, "Full-time");
        assert_eq!(back.salary_min, "120000");
        assert_eq!(back.company_website, form.company_website);
        assert_eq!(back.application_url, "");
    }

    #[test]
    fn test_invalid_salary_is_rejected() {
        let mut form = valid_form();
        form.salary_min = "lots".to_string();
        assert!(form_to_record(&form).is_err());
    }
}
