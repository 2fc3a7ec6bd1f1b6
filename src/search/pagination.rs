// src/search/pagination.rs
//! Page windows, page counts and the compact page-number strip

use serde::{Serialize, Serializer};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Pages shown on each side of the current one
const PAGE_DELTA: u32 = 1;

/// Offset/limit pair of one page. Inclusive range is `offset..=last_index()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    pub fn for_page(page: u32, page_size: u32) -> Self {
        let limit = u64::from(page_size.max(1));
        Self {
            offset: u64::from(page) * limit,
            limit,
        }
    }

    pub fn last_index(&self) -> u64 {
        self.offset + self.limit - 1
    }
}

/// `ceil(count / page_size)`
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    count.div_ceil(page_size).min(u64::from(u32::MAX)) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(n) => serializer.serialize_u32(*n),
            PageItem::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Page numbers (1-based) to display for the 0-based `page`, collapsed with
/// ellipses. `page_numbers(4, 10)` is `1 … 4 5 6 … 10`.
pub fn page_numbers(page: u32, total_pages: u32) -> Vec<PageItem> {
    let current = page.saturating_add(1);
    let first = current.saturating_sub(PAGE_DELTA).max(1);
    let last = current.saturating_add(PAGE_DELTA).min(total_pages);

    let mut items: Vec<PageItem> = (first..=last).map(PageItem::Page).collect();
    if items.is_empty() {
        return items;
    }

    if first > 1 {
        if first > 2 {
            items.insert(0, PageItem::Ellipsis);
        }
        items.insert(0, PageItem::Page(1));
    }

    if last < total_pages {
        if last < total_pages - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total_pages));
    }

    items
}

/// Current page (0-based) and the number of pages available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self { page, total_pages }
    }

    /// Only pages `0..total_pages` are reachable
    pub fn can_go_to(&self, page: u32) -> bool {
        page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    pub fn numbers(&self) -> Vec<PageItem> {
        page_numbers(self.page, self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
    }

    #[test]
    fn test_window_bounds() {
        let window = PageWindow::for_page(2, 20);
        assert_eq!(window.offset, 40);
        assert_eq!(window.last_index(), 59);
    }

    #[test]
    fn test_page_numbers_middle() {
        assert_eq!(
            page_numbers(4, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_page_numbers_edges() {
        assert_eq!(page_numbers(0, 10), vec![Page(1), Page(2), Ellipsis, Page(10)]);
        assert_eq!(page_numbers(9, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
        assert_eq!(page_numbers(1, 3), vec![Page(1), Page(2), Page(3)]);
        // gap of exactly one page gets no ellipsis
        assert_eq!(
            page_numbers(2, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert_eq!(page_numbers(0, 1), vec![Page(1)]);
        assert!(page_numbers(0, 0).is_empty());
    }

    #[test]
    fn test_navigation_bounds() {
        let pagination = Pagination::new(0, 3);
        assert!(pagination.can_go_to(2));
        assert!(!pagination.can_go_to(3));
        assert_eq!(pagination.previous(), None);
        assert_eq!(pagination.next(), Some(1));

        let last = Pagination::new(2, 3);
        assert!(!last.has_next());
        assert_eq!(last.previous(), Some(1));
    }

    #[test]
    fn test_ellipsis_serializes_as_text() {
        let json = serde_json::to_string(&page_numbers(0, 10)).unwrap();
        assert_eq!(json, r#"[1,2,"...",10]"#);
    }
}
