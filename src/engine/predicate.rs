use crate::api::job::models::{JobStatus, JobType};
use super::owner::OwnerId;
use super::params::{FilterValue, ListingParams};

/// AND-combined filter over one owner's jobs.
///
/// The owner constraint is not optional: there is no way to build a
/// predicate without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPredicate {
    owner: OwnerId,
    position_contains: Option<String>,
    status: Option<FilterValue<JobStatus>>,
    job_type: Option<FilterValue<JobType>>,
}

impl JobPredicate {
    /// Predicate matching every job of `owner`
    pub fn for_owner(owner: OwnerId) -> Self {
        JobPredicate {
            owner,
            position_contains: None,
            status: None,
            job_type: None,
        }
    }

    pub fn build(owner: OwnerId, params: &ListingParams) -> Self {
        let mut predicate = JobPredicate::for_owner(owner);
        if let Some(search) = params.search.as_deref() {
            predicate = predicate.with_search(search);
        }
        if let Some(status) = &params.status {
            predicate = predicate.with_status(status.clone());
        }
        if let Some(job_type) = &params.job_type {
            predicate = predicate.with_job_type(job_type.clone());
        }
        predicate
    }

    /// Case-insensitive substring match on position; blank text adds nothing
    pub fn with_search(mut self, text: &str) -> Self {
        let text = text.trim();
        if !text.is_empty() {
            self.position_contains = Some(text.to_string());
        }
        self
    }

    /// Exact match on the stored status text
    pub fn with_status(mut self, status: impl Into<FilterValue<JobStatus>>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_job_type(mut self, job_type: impl Into<FilterValue<JobType>>) -> Self {
        self.job_type = Some(job_type.into());
        self
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn position_contains(&self) -> Option<&str> {
        self.position_contains.as_deref()
    }

    pub fn status(&self) -> Option<&FilterValue<JobStatus>> {
        self.status.as_ref()
    }

    pub fn job_type(&self) -> Option<&FilterValue<JobType>> {
        self.job_type.as_ref()
    }
}

/// ILIKE pattern matching `text` literally anywhere in the column.
/// Backslash is Postgres' default LIKE escape character.
pub fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
