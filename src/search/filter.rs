// src/search/filter.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// One independently toggleable filter dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Experience,
    JobType,
    Skills,
    Location,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::Experience, Facet::JobType, Facet::Skills, Facet::Location];

    /// Options offered by the jobs page for each facet
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Facet::Experience => &["Entry Level", "Mid Level", "Senior Level"],
            Facet::JobType => &["Full-time", "Part-time", "Contract"],
            Facet::Skills => &["React", "Node.js", "Python", "UI/UX Design"],
            Facet::Location => &["Worldwide", "US Only", "Europe"],
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facet::Experience => "experience",
            Facet::JobType => "job_type",
            Facet::Skills => "skills",
            Facet::Location => "location",
        };
        f.write_str(name)
    }
}

/// Search term plus the selected values of every facet. Values OR together
/// within a facet (except skills, see the query compiler) and facets AND
/// together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub search_term: String,
    pub experience: Vec<String>,
    pub job_type: Vec<String>,
    pub skills: Vec<String>,
    pub location: Vec<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: &str) -> Self {
        self.set_search_term(term);
        self
    }

    pub fn with(mut self, facet: Facet, values: &[&str]) -> Self {
        for value in values {
            self.select(facet, value);
        }
        self
    }

    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Experience => &self.experience,
            Facet::JobType => &self.job_type,
            Facet::Skills => &self.skills,
            Facet::Location => &self.location,
        }
    }

    fn values_mut(&mut self, facet: Facet) -> &mut Vec<String> {
        match facet {
            Facet::Experience => &mut self.experience,
            Facet::JobType => &mut self.job_type,
            Facet::Skills => &mut self.skills,
            Facet::Location => &mut self.location,
        }
    }

    pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
        self.values(facet).iter().any(|v| v == value)
    }

    /// Flip a facet value. Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, facet: Facet, value: &str) -> bool {
        let values = self.values_mut(facet);
        match values.iter().position(|v| v == value) {
            Some(index) => {
                values.remove(index);
                false
            }
            None => {
                values.push(value.to_string());
                true
            }
        }
    }

    /// Select a value unless it is already selected
    pub fn select(&mut self, facet: Facet, value: &str) {
        if !self.is_selected(facet, value) {
            self.values_mut(facet).push(value.to_string());
        }
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.trim().to_string();
    }

    pub fn has_search_term(&self) -> bool {
        !self.search_term.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_search_term() && Facet::ALL.iter().all(|f| self.values(*f).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Storage encoding of a job type label: `Full-time` -> `full-time`,
/// `Part time` -> `part-time`.
pub fn normalize_job_type(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "-")
}
