use std::sync::Arc;

use tracing::info;

use crate::api::auth::AuthenticatedUser;
use crate::api::error::ServiceError;
use crate::db::store::JobStore;
use crate::engine::{self, JobPage, JobStats, ListingParams, OwnerId};
use super::dto::JobResponse;
use super::models::{CreateJob, UpdateJob};

fn no_job(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("No job with id {}", id))
}

/// Job service containing business logic
#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn JobStore>,
}

impl JobService {
    /// Create a new JobService instance
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// One filtered, sorted page of the owner's jobs
    pub async fn list_jobs(
        &self,
        owner: OwnerId,
        params: &ListingParams,
    ) -> Result<JobPage, ServiceError> {
        let page = engine::list_jobs(self.store.as_ref(), owner, params).await?;
        info!(
            "Service: Listed {} of {} jobs for owner {}",
            page.jobs.len(),
            page.total_jobs,
            owner
        );
        Ok(page)
    }

    /// Status distribution and monthly trend for the dashboard
    pub async fn show_stats(&self, owner: OwnerId) -> Result<JobStats, ServiceError> {
        let stats = engine::show_stats(self.store.as_ref(), owner).await?;
        info!(
            "Service: Computed stats for owner {} ({} months)",
            owner,
            stats.monthly_applications.len()
        );
        Ok(stats)
    }

    /// Create a single job owned by the caller
    ///
    /// # Returns
    /// - `Ok(JobResponse)` - Job created successfully
    /// - `Err(ServiceError)` - read-only caller or store failure
    pub async fn create_job(
        &self,
        caller: &AuthenticatedUser,
        job: &CreateJob,
    ) -> Result<JobResponse, ServiceError> {
        caller.ensure_writable()?;
        info!(
            "Service: Creating job company={} for {} (owner {})",
            job.company, caller.name, caller.owner
        );

        let job = self.store.create(caller.owner, job).await?;

        info!("Service: Job created successfully with id={}", job.id);
        Ok(JobResponse { job })
    }

    pub async fn get_job(&self, owner: OwnerId, id: i32) -> Result<JobResponse, ServiceError> {
        let job = self.store.find(owner, id).await?.ok_or_else(|| no_job(id))?;
        Ok(JobResponse { job })
    }

    /// Apply a partial update; supplied company/position must be non-empty
    pub async fn update_job(
        &self,
        caller: &AuthenticatedUser,
        id: i32,
        patch: &UpdateJob,
    ) -> Result<JobResponse, ServiceError> {
        caller.ensure_writable()?;

        let blank = |field: &Option<String>| field.as_deref().is_some_and(|v| v.trim().is_empty());
        if blank(&patch.company) || blank(&patch.position) {
            return Err(ServiceError::ValidationFailure(
                "Company or Position fields cannot be empty".to_string(),
            ));
        }

        if patch.is_empty() {
            return self.get_job(caller.owner, id).await;
        }

        let job = self
            .store
            .update(caller.owner, id, patch)
            .await?
            .ok_or_else(|| no_job(id))?;

        info!("Service: Job {} updated", id);
        Ok(JobResponse { job })
    }

    pub async fn delete_job(&self, caller: &AuthenticatedUser, id: i32) -> Result<(), ServiceError> {
        caller.ensure_writable()?;

        if !self.store.delete(caller.owner, id).await? {
            return Err(no_job(id));
        }

        info!("Service: Job {} deleted", id);
        Ok(())
    }
}

