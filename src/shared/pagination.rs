//! Skip/limit pagination shared by the listing endpoint and the client.

use serde::{Deserialize, Serialize};

/// Page used when the query has none (or an unusable one)
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the query has none (or an unusable one)
pub const DEFAULT_LIMIT: u32 = 10;

/// A resolved page request: both values are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Resolve raw query-string values.
    ///
    /// Absent, non-numeric and non-positive values fall back to the defaults;
    /// `limit` is clamped to `max_limit`.
    pub fn from_query(page: Option<&str>, limit: Option<&str>, max_limit: u32) -> Self {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(limit)
            .unwrap_or(DEFAULT_LIMIT)
            .min(max_limit.max(1));
        Self { page, limit }
    }

    /// Number of records to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// `ceil(total / limit)`
    pub fn page_count(&self, total: u64) -> u32 {
        u32::try_from(total.div_ceil(u64::from(self.limit))).unwrap_or(u32::MAX)
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            page: self.page,
            pages: self.page_count(total),
            total,
        }
    }
}

fn parse_positive(value: Option<&str>) -> Option<u32> {
    value?.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// Pagination block of a listing response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(PageRequest::from_query(None, None, 50), PageRequest::new(1, 10));
    }

    #[test]
    fn test_defaults_when_garbage() {
        let request = PageRequest::from_query(Some("abc"), Some("-3"), 50);
        assert_eq!(request, PageRequest::new(1, 10));
        let request = PageRequest::from_query(Some("0"), Some("0"), 50);
        assert_eq!(request, PageRequest::new(1, 10));
    }

    #[test]
    fn test_limit_is_capped() {
        let request = PageRequest::from_query(Some("2"), Some("1000"), 50);
        assert_eq!(request.limit, 50);
        assert_eq!(request.offset(), 50);
    }

    #[test]
    fn test_page_count() {
        let request = PageRequest::new(1, 10);
        assert_eq!(request.page_count(0), 0);
        assert_eq!(request.page_count(10), 1);
        assert_eq!(request.page_count(11), 2);
    }

    #[test]
    fn test_navigation_flags() {
        let pagination = PageRequest::new(2, 10).pagination(25);
        assert!(pagination.has_previous());
        assert!(pagination.has_next());
        let last = PageRequest::new(3, 10).pagination(25);
        assert!(!last.has_next());
    }
}
