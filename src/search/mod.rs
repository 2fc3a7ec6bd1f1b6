// src/search/mod.rs
//! Job search pipeline: filter state -> compiled query -> page of results

pub mod filter;
pub mod pagination;
pub mod query;
pub mod session;

pub use filter::{normalize_job_type, Facet, FilterState};
pub use pagination::{page_numbers, total_pages, PageItem, PageWindow, Pagination, DEFAULT_PAGE_SIZE};
pub use query::{compile, Column, CompiledSearch, JobQuery, Predicate};
pub use session::{RequestToken, SearchSession};

use crate::models::JobListing;
use serde::Serialize;

/// One page of matching listings together with the total it was cut from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    pub jobs: Vec<JobListing>,
    pub total_count: u64,
    pub total_pages: u32,
    pub page: u32,
}

impl SearchPage {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.total_pages)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Page {page} is out of range (total pages: {total_pages})")]
    PageOutOfRange { page: u32, total_pages: u32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
