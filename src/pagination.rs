//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated, 1-indexed page of results to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Create a page request, clamping `page` and `per_page` to at least 1.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Build a page request from raw query parameters.
    ///
    /// Missing or non-numeric values fall back to the defaults in `config`,
    /// and values of zero or less are clamped to 1.
    pub fn from_query(page: Option<&str>, per_page: Option<&str>, config: &PaginationConfig) -> Self {
        Self::new(
            parse_positive_or(page, config.default_page),
            parse_positive_or(per_page, config.default_page_size),
        )
    }

    /// The 1-indexed page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of items on a page.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// The number of items to skip before this page starts.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// The number of pages needed to show `total` items.
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }
}

fn parse_positive_or(raw: Option<&str>, default: u64) -> u64 {
    match raw.map(|value| value.trim().parse::<i64>()) {
        Some(Ok(value)) if value < 1 => 1,
        Some(Ok(value)) => value as u64,
        _ => default,
    }
}
