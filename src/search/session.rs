// src/search/session.rs
//! Client-side search state: filters, current page and in-flight requests.
//!
//! Every filter or search-term change sends the session back to the first
//! page. Each fetch is stamped with a generation; a response carrying an
//! older generation than the latest fetch is dropped, so a slow response to
//! a superseded query never overwrites newer results.

use crate::search::filter::{Facet, FilterState};
use crate::search::pagination::Pagination;
use crate::search::query::{compile, CompiledSearch};
use crate::search::{SearchError, SearchPage};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    filters: FilterState,
    page: u32,
    page_size: u32,
    total_pages: u32,
    generation: u64,
    results: Option<SearchPage>,
}

impl SearchSession {
    pub fn new(page_size: u32) -> Self {
        Self {
            filters: FilterState::default(),
            page: 0,
            page_size: page_size.max(1),
            // one page is assumed until the first count arrives
            total_pages: 1,
            generation: 0,
            results: None,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> Option<&SearchPage> {
        self.results.as_ref()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.total_pages)
    }

    pub fn toggle_facet(&mut self, facet: Facet, value: &str) -> bool {
        let selected = self.filters.toggle(facet, value);
        self.page = 0;
        selected
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.filters.set_search_term(term);
        self.page = 0;
    }

    pub fn replace_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.page = 0;
    }

    pub fn go_to_page(&mut self, page: u32) -> Result<(), SearchError> {
        if !self.pagination().can_go_to(page) {
            return Err(SearchError::PageOutOfRange {
                page,
                total_pages: self.total_pages,
            });
        }
        self.page = page;
        Ok(())
    }

    pub fn next_page(&mut self) -> Result<(), SearchError> {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Result<(), SearchError> {
        match self.pagination().previous() {
            Some(page) => self.go_to_page(page),
            None => Err(SearchError::PageOutOfRange {
                page: 0,
                total_pages: self.total_pages,
            }),
        }
    }

    /// Start a fetch for the current state. Any earlier fetch becomes stale.
    pub fn begin_fetch(&mut self) -> (RequestToken, CompiledSearch) {
        self.generation += 1;
        let token = RequestToken {
            generation: self.generation,
        };
        (token, compile(&self.filters, self.page, self.page_size))
    }

    /// Store a response. Returns false, leaving state untouched, when the
    /// token belongs to a superseded fetch.
    pub fn complete(&mut self, token: RequestToken, page: SearchPage) -> bool {
        if token.generation != self.generation {
            debug!(
                "Discarding stale search response (generation {} < {})",
                token.generation, self.generation
            );
            return false;
        }
        self.total_pages = page.total_pages;
        self.results = Some(page);
        true
    }
}
