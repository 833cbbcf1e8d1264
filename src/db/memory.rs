//! In-memory [`JobStore`] and [`UserStore`] used by the unit and HTTP tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};

use crate::api::job::models::{CreateJob, UpdateJob};
use crate::db::models::{JobRow, MonthGroup, NewUser, ProfileUpdate, StatusGroup, UserRow};
use crate::db::store::{JobStore, UserStore, UserWriteError};
use crate::engine::owner::OwnerId;
use crate::engine::pagination::PageBounds;
use crate::engine::predicate::JobPredicate;
use crate::engine::sort::{Direction, SortField, SortOrder};

#[derive(Default)]
pub struct MemoryJobStore {
    jobs: Mutex<Vec<JobRow>>,
    failing: AtomicBool,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail like a lost connection
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Insert a row verbatim; status and type are free text on purpose
    pub fn insert(
        &self,
        owner: i32,
        company: &str,
        position: &str,
        status: &str,
        job_type: &str,
        created_at: DateTime<Utc>,
    ) -> JobRow {
        let mut jobs = self.jobs.lock().unwrap();
        let row = JobRow {
            id: jobs.iter().map(|j| j.id).max().unwrap_or(0) + 1,
            created_by: owner,
            company: company.to_string(),
            position: position.to_string(),
            status: status.to_string(),
            job_type: job_type.to_string(),
            created_at,
            updated_at: created_at,
        };
        jobs.push(row.clone());
        row
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }

    fn matching(&self, predicate: &JobPredicate) -> Vec<JobRow> {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|job| matches(predicate, job))
            .cloned()
            .collect()
    }
}

fn matches(predicate: &JobPredicate, job: &JobRow) -> bool {
    if job.created_by != predicate.owner().get() {
        return false;
    }
    if let Some(text) = predicate.position_contains() {
        if !job.position.to_lowercase().contains(&text.to_lowercase()) {
            return false;
        }
    }
    if let Some(status) = predicate.status() {
        if job.status != status.as_str() {
            return false;
        }
    }
    if let Some(job_type) = predicate.job_type() {
        if job.job_type != job_type.as_str() {
            return false;
        }
    }
    true
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn count(&self, predicate: &JobPredicate) -> Result<i64, sqlx::Error> {
        self.check()?;
        Ok(self.matching(predicate).len() as i64)
    }

    async fn fetch(
        &self,
        predicate: &JobPredicate,
        sort: Option<SortOrder>,
        bounds: PageBounds,
    ) -> Result<Vec<JobRow>, sqlx::Error> {
        self.check()?;
        let mut rows = self.matching(predicate);
        if let Some(sort) = sort {
            let (field, direction) = sort.key();
            rows.sort_by(|a, b| {
                let ordering = match field {
                    SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                    SortField::Position => a.position.cmp(&b.position),
                }
                .then(a.id.cmp(&b.id));
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }
        Ok(rows
            .into_iter()
            .skip(bounds.skip as usize)
            .take(bounds.limit as usize)
            .collect())
    }

    async fn status_groups(&self, owner: OwnerId) -> Result<Vec<StatusGroup>, sqlx::Error> {
        self.check()?;
        let mut groups: BTreeMap<String, i64> = BTreeMap::new();
        for job in self.matching(&JobPredicate::for_owner(owner)) {
            *groups.entry(job.status).or_default() += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(status, count)| StatusGroup { status, count })
            .collect())
    }

    async fn month_groups(&self, owner: OwnerId, limit: i64) -> Result<Vec<MonthGroup>, sqlx::Error> {
        self.check()?;
        let mut groups: BTreeMap<(i32, i32), i64> = BTreeMap::new();
        for job in self.matching(&JobPredicate::for_owner(owner)) {
            let key = (job.created_at.year(), job.created_at.month() as i32);
            *groups.entry(key).or_default() += 1;
        }
        Ok(groups
            .into_iter()
            .rev()
            .take(limit as usize)
            .map(|((year, month), count)| MonthGroup { year, month, count })
            .collect())
    }

    async fn create(&self, owner: OwnerId, job: &CreateJob) -> Result<JobRow, sqlx::Error> {
        self.check()?;
        Ok(self.insert(
            owner.get(),
            &job.company,
            &job.position,
            job.status.as_str(),
            job.job_type.as_str(),
            Utc::now(),
        ))
    }

    async fn find(&self, owner: OwnerId, id: i32) -> Result<Option<JobRow>, sqlx::Error> {
        self.check()?;
        Ok(self
            .matching(&JobPredicate::for_owner(owner))
            .into_iter()
            .find(|job| job.id == id))
    }

    async fn update(
        &self,
        owner: OwnerId,
        id: i32,
        patch: &UpdateJob,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        self.check()?;
        let mut jobs = self.jobs.lock().unwrap();
        let Some(job) = jobs
            .iter_mut()
            .find(|job| job.id == id && job.created_by == owner.get())
        else {
            return Ok(None);
        };
        if let Some(company) = &patch.company {
            job.company = company.clone();
        }
        if let Some(position) = &patch.position {
            job.position = position.clone();
        }
        if let Some(status) = patch.status {
            job.status = status.as_str().to_string();
        }
        if let Some(job_type) = patch.job_type {
            job.job_type = job_type.as_str().to_string();
        }
        job.updated_at = Utc::now();
        Ok(Some(job.clone()))
    }

    async fn delete(&self, owner: OwnerId, id: i32) -> Result<bool, sqlx::Error> {
        self.check()?;
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|job| !(job.id == id && job.created_by == owner.get()));
        Ok(jobs.len() < before)
    }
}

/// Users kept in a vector; emails are unique like the table constraint
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<UserRow>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser<'_>) -> Result<UserRow, UserWriteError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserWriteError::EmailTaken);
        }
        let row = UserRow {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            name: user.name.to_string(),
            last_name: user.last_name.to_string(),
            email: user.email.to_string(),
            location: user.location.to_string(),
            password_hash: user.password_hash.to_string(),
        };
        users.push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: i32,
        profile: ProfileUpdate<'_>,
    ) -> Result<Option<UserRow>, UserWriteError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.id != id && u.email == profile.email) {
            return Err(UserWriteError::EmailTaken);
        }
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.name = profile.name.to_string();
        user.last_name = profile.last_name.to_string();
        user.email = profile.email.to_string();
        user.location = profile.location.to_string();
        Ok(Some(user.clone()))
    }
}
