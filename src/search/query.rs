// src/search/query.rs
//! Query compiler: turns a [`FilterState`] and a page index into the count
//! and data queries run against the `jobs` table.
//!
//! Both queries are built from the same predicate list, so the page count
//! derived from one always describes the rows reachable through the other.

use crate::models::JobListing;
use crate::search::filter::{normalize_job_type, FilterState};
use crate::search::pagination::PageWindow;
use sqlx::{QueryBuilder, Sqlite};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Description,
    Experience,
    JobType,
    Location,
    Skills,
    PostedDate,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::Description => "description",
            Column::Experience => "experience",
            Column::JobType => "job_type",
            Column::Location => "location",
            Column::Skills => "skills",
            Column::PostedDate => "posted_date",
        }
    }

    /// Column compared by case-insensitive matching. Free-text columns
    /// have a lowercased copy written at insert, since SQLite's `lower()`
    /// folds ASCII only.
    pub fn folded_name(&self) -> &'static str {
        match self {
            Column::Title => "title_lc",
            Column::Description => "description_lc",
            Column::Location => "location_lc",
            other => other.name(),
        }
    }

    fn text<'a>(&self, job: &'a JobListing) -> Option<&'a str> {
        match self {
            Column::Title => Some(&job.title),
            Column::Description => Some(&job.description),
            Column::Experience => Some(&job.experience),
            Column::JobType => Some(&job.job_type),
            Column::Location => Some(&job.location),
            Column::Skills | Column::PostedDate => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Column equals one of the values
    In { column: Column, values: Vec<String> },
    /// Column contains the needle, ignoring case
    ILike { column: Column, needle: String },
    /// Array column holds every one of the values
    Contains { column: Column, values: Vec<String> },
    /// At least one of the inner predicates holds
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, job: &JobListing) -> bool {
        match self {
            Predicate::In { column, values } => column
                .text(job)
                .is_some_and(|text| values.iter().any(|v| v == text)),
            Predicate::ILike { column, needle } => {
                let needle = needle.to_lowercase();
                column
                    .text(job)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            }
            Predicate::Contains { column, values } => match column {
                Column::Skills => values.iter().all(|v| job.skills.contains(v)),
                _ => false,
            },
            Predicate::Any(inner) => inner.iter().any(|p| p.matches(job)),
        }
    }

    /// Append this predicate as a SQLite boolean expression
    pub fn push_sql(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Predicate::In { values, .. } if values.is_empty() => {
                qb.push("0");
            }
            Predicate::In { column, values } => {
                qb.push(column.name()).push(" IN (");
                let mut separated = qb.separated(", ");
                for value in values {
                    separated.push_bind(value.clone());
                }
                qb.push(")");
            }
            Predicate::ILike { column, needle } => {
                qb.push("instr(")
                    .push(column.folded_name())
                    .push(", ")
                    .push_bind(needle.to_lowercase())
                    .push(") > 0");
            }
            Predicate::Contains { values, .. } if values.is_empty() => {
                qb.push("1");
            }
            Predicate::Contains { column, values } => {
                qb.push("(");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        qb.push(" AND ");
                    }
                    qb.push("EXISTS (SELECT 1 FROM json_each(jobs.")
                        .push(column.name())
                        .push(") WHERE json_each.value = ")
                        .push_bind(value.clone())
                        .push(")");
                }
                qb.push(")");
            }
            Predicate::Any(inner) if inner.is_empty() => {
                qb.push("0");
            }
            Predicate::Any(inner) => {
                qb.push("(");
                for (i, predicate) in inner.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    predicate.push_sql(qb);
                }
                qb.push(")");
            }
        }
    }
}

/// PostgREST-style rendering, used in logs
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::In { column, values } => {
                write!(f, "{}.in.({})", column.name(), values.join(","))
            }
            Predicate::ILike { column, needle } => write!(f, "{}.ilike.%{}%", column.name(), needle),
            Predicate::Contains { column, values } => {
                write!(f, "{}.cs.{{{}}}", column.name(), values.join(","))
            }
            Predicate::Any(inner) => {
                let parts: Vec<String> = inner.iter().map(|p| p.to_string()).collect();
                write!(f, "or({})", parts.join(","))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub column: Column,
    pub descending: bool,
}

impl Ordering {
    pub fn newest_first() -> Self {
        Self {
            column: Column::PostedDate,
            descending: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuery {
    pub predicates: Vec<Predicate>,
    pub order: Ordering,
    pub window: Option<PageWindow>,
}

impl JobQuery {
    pub fn matches(&self, job: &JobListing) -> bool {
        self.predicates.iter().all(|p| p.matches(job))
    }

    /// Evaluate the query over listings already in memory
    pub fn apply(&self, jobs: &[JobListing]) -> Vec<JobListing> {
        let mut hits: Vec<JobListing> = jobs.iter().filter(|j| self.matches(j)).cloned().collect();
        if self.order.descending {
            hits.sort_by(|a, b| b.posted_date.cmp(&a.posted_date));
        } else {
            hits.sort_by(|a, b| a.posted_date.cmp(&b.posted_date));
        }

        match self.window {
            Some(window) => hits
                .into_iter()
                .skip(window.offset as usize)
                .take(window.limit as usize)
                .collect(),
            None => hits,
        }
    }

    fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push_sql(qb);
        }
    }

    /// `SELECT * FROM jobs ...` with ordering and the page window
    pub fn select_builder(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("SELECT * FROM jobs");
        self.push_where(&mut qb);
        qb.push(" ORDER BY ")
            .push(self.order.column.name())
            .push(if self.order.descending { " DESC" } else { " ASC" });

        if let Some(window) = self.window {
            qb.push(" LIMIT ")
                .push_bind(window.limit as i64)
                .push(" OFFSET ")
                .push_bind(window.offset as i64);
        }
        qb
    }

    /// `SELECT COUNT(*) FROM jobs ...` over the same predicates
    pub fn count_builder(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM jobs");
        self.push_where(&mut qb);
        qb
    }
}

impl fmt::Display for JobQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.predicates.iter().map(|p| p.to_string()).collect();
        parts.push(format!(
            "order={}.{}",
            self.order.column.name(),
            if self.order.descending { "desc" } else { "asc" }
        ));
        if let Some(window) = self.window {
            parts.push(format!("range={}-{}", window.offset, window.last_index()));
        }
        f.write_str(&parts.join("&"))
    }
}

/// Count query and data query for one page of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSearch {
    pub count: JobQuery,
    pub data: JobQuery,
    pub page: u32,
    pub page_size: u32,
}

pub fn compile(filters: &FilterState, page: u32, page_size: u32) -> CompiledSearch {
    let page_size = page_size.max(1);
    let mut predicates = Vec::new();

    if !filters.experience.is_empty() {
        predicates.push(Predicate::In {
            column: Column::Experience,
            values: filters.experience.clone(),
        });
    }

    if !filters.job_type.is_empty() {
        predicates.push(Predicate::In {
            column: Column::JobType,
            values: filters.job_type.iter().map(|t| normalize_job_type(t)).collect(),
        });
    }

    // Location ORs substring matches: "US" also hits "Australia, USA".
    if !filters.location.is_empty() {
        predicates.push(Predicate::Any(
            filters
                .location
                .iter()
                .map(|loc| Predicate::ILike {
                    column: Column::Location,
                    needle: loc.clone(),
                })
                .collect(),
        ));
    }

    // Skills AND: a listing must carry every selected skill.
    if !filters.skills.is_empty() {
        predicates.push(Predicate::Contains {
            column: Column::Skills,
            values: filters.skills.clone(),
        });
    }

    if filters.has_search_term() {
        let term = filters.search_term.clone();
        predicates.push(Predicate::Any(vec![
            Predicate::ILike {
                column: Column::Title,
                needle: term.clone(),
            },
            Predicate::ILike {
                column: Column::Description,
                needle: term.clone(),
            },
            Predicate::Contains {
                column: Column::Skills,
                values: vec![term],
            },
        ]));
    }

    let count = JobQuery {
        predicates,
        order: Ordering::newest_first(),
        window: None,
    };
    let data = JobQuery {
        window: Some(PageWindow::for_page(page, page_size)),
        ..count.clone()
    };

    CompiledSearch {
        count,
        data,
        page,
        page_size,
    }
}
