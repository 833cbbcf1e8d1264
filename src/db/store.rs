use std::fmt;

use async_trait::async_trait;

use crate::api::job::models::{CreateJob, UpdateJob};
use crate::db::models::{JobRow, MonthGroup, NewUser, ProfileUpdate, StatusGroup, UserRow};
use crate::engine::owner::OwnerId;
use crate::engine::pagination::PageBounds;
use crate::engine::predicate::JobPredicate;
use crate::engine::sort::SortOrder;

/// Storage operations the job service and the query engine run against.
///
/// Every method is scoped to one owner, either through the predicate or
/// an explicit [`OwnerId`].
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Number of jobs matching `predicate`, ignoring any paging
    async fn count(&self, predicate: &JobPredicate) -> Result<i64, sqlx::Error>;

    /// Matching jobs in `sort` order (store order when `None`), windowed by `bounds`
    async fn fetch(
        &self,
        predicate: &JobPredicate,
        sort: Option<SortOrder>,
        bounds: PageBounds,
    ) -> Result<Vec<JobRow>, sqlx::Error>;

    /// Job count per stored status value
    async fn status_groups(&self, owner: OwnerId) -> Result<Vec<StatusGroup>, sqlx::Error>;

    /// Job count per (year, month) of creation in UTC, newest first, at most `limit` groups
    async fn month_groups(&self, owner: OwnerId, limit: i64) -> Result<Vec<MonthGroup>, sqlx::Error>;

    async fn create(&self, owner: OwnerId, job: &CreateJob) -> Result<JobRow, sqlx::Error>;

    async fn find(&self, owner: OwnerId, id: i32) -> Result<Option<JobRow>, sqlx::Error>;

    async fn update(
        &self,
        owner: OwnerId,
        id: i32,
        patch: &UpdateJob,
    ) -> Result<Option<JobRow>, sqlx::Error>;

    /// `true` when a row was removed
    async fn delete(&self, owner: OwnerId, id: i32) -> Result<bool, sqlx::Error>;
}

/// Why a user insert or profile update did not go through
#[derive(Debug)]
pub enum UserWriteError {
    /// Another account already uses the email
    EmailTaken,
    Store(sqlx::Error),
}

impl fmt::Display for UserWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserWriteError::EmailTaken => write!(f, "email already in use"),
            UserWriteError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl std::error::Error for UserWriteError {}

/// Account storage behind registration, login and profile updates
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser<'_>) -> Result<UserRow, UserWriteError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error>;

    /// `None` when no user has that id
    async fn update_profile(
        &self,
        id: i32,
        profile: ProfileUpdate<'_>,
    ) -> Result<Option<UserRow>, UserWriteError>;
}
