use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::api::job::models::{JobStatus, JobType};
use super::pagination::PageRequest;
use super::sort::SortOrder;

/// Filter value meaning "do not filter on this field"
pub const ALL: &str = "all";

/// Value of a `status` or `jobType` filter.
///
/// Text that names no known variant is kept as given and still matched
/// exactly, so it selects nothing instead of widening the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue<T> {
    Known(T),
    Unrecognised(String),
}

impl<T: AsRef<str>> FilterValue<T> {
    /// Text compared against the stored column
    pub fn as_str(&self) -> &str {
        match self {
            FilterValue::Known(value) => value.as_ref(),
            FilterValue::Unrecognised(raw) => raw,
        }
    }
}

impl<T> From<T> for FilterValue<T> {
    fn from(value: T) -> Self {
        FilterValue::Known(value)
    }
}

/// Raw listing query string. Every field is kept as text so that
/// extraction itself never rejects a request.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "jobType")]
    pub job_type: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Validated listing parameters.
///
/// | field      | default            |
/// |------------|--------------------|
/// | `search`   | none               |
/// | `status`   | none (`all`)       |
/// | `job_type` | none (`all`)       |
/// | `sort`     | none (store order) |
/// | `page`     | page 1, limit 10   |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingParams {
    pub search: Option<String>,
    pub status: Option<FilterValue<JobStatus>>,
    pub job_type: Option<FilterValue<JobType>>,
    pub sort: Option<SortOrder>,
    pub page: PageRequest,
}

impl From<ListingQuery> for ListingParams {
    fn from(query: ListingQuery) -> Self {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        ListingParams {
            search,
            status: parse_filter("status", query.status.as_deref()),
            job_type: parse_filter("jobType", query.job_type.as_deref()),
            sort: SortOrder::resolve(query.sort.as_deref()),
            page: PageRequest::parse(query.page.as_deref(), query.limit.as_deref()),
        }
    }
}

/// `None` for absent, empty or `all` values
fn parse_filter<T: FromStr>(field: &str, raw: Option<&str>) -> Option<FilterValue<T>> {
    let value = raw.map(str::trim).filter(|s| !s.is_empty() && *s != ALL)?;
    match value.parse() {
        Ok(parsed) => Some(FilterValue::Known(parsed)),
        Err(_) => {
            debug!("Unrecognised {} filter value {}, nothing will match", field, value);
            Some(FilterValue::Unrecognised(value.to_string()))
        }
    }
}
