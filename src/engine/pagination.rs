pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Requested page, 1-based, with both values guaranteed positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build from already-numeric values; non-positive values take the default
    pub fn new(page: i64, limit: i64) -> Self {
        PageRequest {
            page: if page >= 1 { page } else { DEFAULT_PAGE },
            limit: if limit >= 1 { limit } else { DEFAULT_LIMIT },
        }
    }

    /// Parse raw `page`/`limit` query values.
    ///
    /// Anything that is not a positive integer falls back to the default.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        PageRequest::new(
            parse_positive(page).unwrap_or(DEFAULT_PAGE),
            parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        )
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n >= 1)
}

/// Window handed to the store for one bounded fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub skip: i64,
    pub limit: i64,
}

/// Page math for one listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
    pub page_count: i64,
}

impl Pagination {
    pub fn compute(request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        let limit = request.limit();
        let page_count = total / limit + i64::from(total % limit != 0);

        Pagination {
            skip: request.skip(),
            limit,
            page_count,
        }
    }

    pub fn bounds(&self) -> PageBounds {
        PageBounds {
            skip: self.skip,
            limit: self.limit,
        }
    }
}
