// src/posting/schema.rs
//! Job posting form and its field rules

use serde::{Deserialize, Serialize};

/// The posting wizard's form model, exactly as the browser submits it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPostingForm {
    // Job details
    pub title: String,
    pub job_type: String,
    pub experience_level: String,
    pub location: String,
    pub salary_min: String,
    pub salary_max: String,
    pub salary_currency: String,
    pub salary_period: String,

    // Description
    pub description: String,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub skills: Vec<String>,

    // Company
    pub company_name: String,
    pub company_website: String,
    pub company_description: String,
    pub company_industry: String,
    pub company_size: String,

    // Application
    pub application_email: String,
    pub application_url: String,
    pub application_instructions: String,

    pub is_remote: bool,
    pub is_urgent: bool,
    pub is_featured: bool,
}

impl Default for JobPostingForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            job_type: String::new(),
            experience_level: String::new(),
            location: "Remote (Worldwide)".to_string(),
            salary_min: String::new(),
            salary_max: String::new(),
            salary_currency: "USD".to_string(),
            salary_period: "yearly".to_string(),
            description: String::new(),
            responsibilities: vec![String::new()],
            requirements: vec![String::new()],
            benefits: vec![String::new()],
            skills: vec![String::new()],
            company_name: String::new(),
            company_website: String::new(),
            company_description: String::new(),
            company_industry: String::new(),
            company_size: String::new(),
            application_email: String::new(),
            application_url: String::new(),
            application_instructions: String::new(),
            is_remote: true,
            is_urgent: false,
            is_featured: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// camelCase field name; list items are addressed as `skills.2`
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: &str) -> Self {
        Self {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Form field the error belongs to, without the list index
    pub fn root_field(&self) -> &str {
        self.field.split('.').next().unwrap_or(&self.field)
    }
}

impl JobPostingForm {
    /// Check every field. An empty result means the form can be published.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let mut min_len = |field: &str, value: &str, min: usize, message: &str| {
            if value.chars().count() < min {
                errors.push(FieldError::new(field, message));
            }
        };

        min_len("title", &self.title, 5, "Job title must be at least 5 characters");
        min_len("jobType", &self.job_type, 1, "Please select a job type");
        min_len("experienceLevel", &self.experience_level, 1, "Please select an experience level");
        min_len("location", &self.location, 1, "Please specify the job location");
        min_len("salaryMin", &self.salary_min, 1, "Please enter a minimum salary");
        min_len("salaryMax", &self.salary_max, 1, "Please enter a maximum salary");
        min_len("salaryCurrency", &self.salary_currency, 1, "Please select a currency");
        min_len("salaryPeriod", &self.salary_period, 1, "Please select a salary period");
        min_len("description", &self.description, 100, "Job description must be at least 100 characters");
        min_len("companyName", &self.company_name, 2, "Company name must be at least 2 characters");
        min_len("companyDescription", &self.company_description, 50, "Company description must be at least 50 characters");
        min_len("companyIndustry", &self.company_industry, 2, "Please specify the company industry");
        min_len("companySize", &self.company_size, 1, "Please select the company size");

        for (field, value) in [("salaryMin", &self.salary_min), ("salaryMax", &self.salary_max)] {
            if !value.is_empty() && parse_salary(value).is_none() {
                errors.push(FieldError::new(field, "Salary must be a whole number"));
            }
        }

        let lists: [(&str, &Vec<String>, usize, &str); 4] = [
            ("responsibilities", &self.responsibilities, 5, "Each responsibility must be at least 5 characters"),
            ("requirements", &self.requirements, 5, "Each requirement must be at least 5 characters"),
            ("benefits", &self.benefits, 5, "Each benefit must be at least 5 characters"),
            ("skills", &self.skills, 2, "Each skill must be at least 2 characters"),
        ];
        for (field, items, min, message) in lists {
            for (index, item) in items.iter().enumerate() {
                if item.chars().count() < min {
                    errors.push(FieldError::new(format!("{}.{}", field, index), message));
                }
            }
        }

        if !is_valid_url(&self.company_website) {
            errors.push(FieldError::new("companyWebsite", "Please enter a valid URL"));
        }
        if !is_valid_email(&self.application_email) {
            errors.push(FieldError::new("applicationEmail", "Please enter a valid email"));
        }
        if !self.application_url.is_empty() && !is_valid_url(&self.application_url) {
            errors.push(FieldError::new("applicationUrl", "Please enter a valid URL"));
        }

        errors
    }

    /// Errors restricted to the given form fields
    pub fn validate_fields(&self, fields: &[&str]) -> Vec<FieldError> {
        self.validate()
            .into_iter()
            .filter(|e| fields.contains(&e.root_field()))
            .collect()
    }
}

/// Accepts `85000`, `85,000` and surrounding whitespace
pub fn parse_salary(value: &str) -> Option<i64> {
    let digits: String = value.trim().chars().filter(|c| *c != ',').collect();
    digits.parse::<i64>().ok().filter(|n| *n >= 0)
}

pub fn is_valid_email(value: &str) -> bool {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !value.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub fn is_valid_url(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once("://") else {
        return false;
    };
    let host = rest.split(|c| c == '/' || c == '?' || c == '#').next().unwrap_or("");
    !scheme.is_empty()
        && scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
        && !host.is_empty()
        && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn valid_form() -> JobPostingForm {
        JobPostingForm {
            title: "Senior Rust Engineer".to_string(),
            job_type: "Full-time".to_string(),
            experience_level: "Senior Level".to_string(),
            salary_min: "120,000".to_string(),
            salary_max: "160000".to_string(),
            description: "Build and operate the job search backend. ".repeat(3),
            responsibilities: vec!["Own the search pipeline".to_string()],
            requirements: vec!["Five years of Rust".to_string()],
            benefits: vec!["Remote stipend".to_string()],
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            company_name: "Acme Corp".to_string(),
            company_website: "https://acme.example".to_string(),
            company_description: "Acme builds tools for remote teams all over the world.".to_string(),
            company_industry: "Software".to_string(),
            company_size: "51-200".to_string(),
            application_email: "jobs@acme.example".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert_eq!(valid_form().validate(), vec![]);
    }

    #[test]
    fn test_default_form_fails_required_fields() {
        let errors = JobPostingForm::default().validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"skills.0"));
        assert!(fields.contains(&"companyWebsite"));
        assert!(fields.contains(&"applicationEmail"));
        assert!(!fields.contains(&"location"));
        assert!(!fields.contains(&"applicationUrl"));
    }

    #[test]
    fn test_list_items_are_checked_individually() {
        let mut form = valid_form();
        form.skills.push("C".to_string());
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "skills.2");
        assert_eq!(errors[0].root_field(), "skills");
    }

    #[test]
    fn test_optional_application_url_must_be_valid_when_given() {
        let mut form = valid_form();
        form.application_url = "not a url".to_string();
        assert_eq!(form.validate_fields(&["applicationUrl"]).len(), 1);
        form.application_url = "https://acme.example/apply".to_string();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_salary_parsing() {
        assert_eq!(parse_salary(" 85,000 "), Some(85_000));
        assert_eq!(parse_salary("85k"), None);
        assert_eq!(parse_salary("-5"), None);
    }

    #[test]
    fn test_email_and_url_checks() {
        assert!(is_valid_email("a@b.io"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.io"));
        assert!(!is_valid_email("a@@c.io"));
        assert!(is_valid_url("https://acme.example/jobs?id=1"));
        assert!(!is_valid_url("acme.example"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn test_form_deserializes_from_camel_case() {
        let form: JobPostingForm =
            serde_json::from_str(r#"{"title":"Rust Dev","jobType":"Contract","isUrgent":true}"#)
                .unwrap();
        assert_eq!(form.job_type, "Contract");
        assert!(form.is_urgent);
        assert!(form.is_remote);
        assert_eq!(form.salary_currency, "USD");
    }
}
