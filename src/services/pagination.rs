//! Page/limit pagination shared by the listing operations.

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Rows to skip before the requested page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// `next` always points at `page + 1`; `prev` only exists past the first page.
    pub fn links(&self, base_path: &str) -> (String, Option<String>) {
        let next = format!(
            "{}?page={}&limit={}",
            base_path,
            self.page.saturating_add(1),
            self.limit
        );
        let prev = (self.page > 1)
            .then(|| format!("{}?page={}&limit={}", base_path, self.page - 1, self.limit));
        (next, prev)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn first_page_has_no_prev() {
        let (next, prev) = Pagination::new(1, 10).links("/api/project");
        assert_eq!(next, "/api/project?page=2&limit=10");
        assert_eq!(prev, None);
    }

    #[test]
    fn later_pages_link_both_ways() {
        let (next, prev) = Pagination::new(3, 5).links("/api/season");
        assert_eq!(next, "/api/season?page=4&limit=5");
        assert_eq!(prev.as_deref(), Some("/api/season?page=2&limit=5"));
    }

    #[test]
    fn page_zero_behaves_like_first_page() {
        let pagination = Pagination::new(0, 10);
        assert_eq!(pagination.offset(), 0);
        assert_eq!(pagination.links("/api/project").1, None);
    }

    #[test]
    fn last_representable_page_does_not_overflow() {
        let pagination = Pagination::new(u64::MAX, 0);
        assert_eq!(pagination.offset(), 0);
        let (next, prev) = pagination.links("/api/project");
        assert_eq!(next, format!("/api/project?page={}&limit=0", u64::MAX));
        assert_eq!(prev, Some(format!("/api/project?page={}&limit=0", u64::MAX - 1)));
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Pagination::new(4, 25).offset(), 75);
    }
}
