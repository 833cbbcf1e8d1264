use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};
use tracing::debug;

use crate::api::job::models::{CreateJob, UpdateJob};
use crate::db::models::{JobRow, MonthGroup, NewJobRecord, StatusGroup};
use crate::db::store::JobStore;
use crate::engine::owner::OwnerId;
use crate::engine::pagination::PageBounds;
use crate::engine::predicate::{contains_pattern, JobPredicate};
use crate::engine::sort::SortOrder;

const JOB_COLUMNS: &str =
    "id, created_by, company, position, status, job_type, created_at, updated_at";

/// Repository for Job database operations
#[derive(Clone)]
pub struct JobRepository {
    pool: Pool<Postgres>,
}

impl JobRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Bulk insert fully specified jobs in one statement
    /// Returns the number of rows inserted
    pub async fn bulk_insert(&self, jobs: &[NewJobRecord]) -> Result<u64, sqlx::Error> {
        if jobs.is_empty() {
            debug!("Bulk insert called with empty job list");
            return Ok(0);
        }

        debug!("Starting bulk insert of {} jobs", jobs.len());

        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO jobs (created_by, company, position, status, job_type, created_at, updated_at) ",
        );
        builder.push_values(jobs, |mut row, job| {
            row.push_bind(job.created_by)
                .push_bind(&job.company)
                .push_bind(&job.position)
                .push_bind(&job.status)
                .push_bind(&job.job_type)
                .push_bind(job.created_at)
                .push_bind(job.created_at);
        });

        let result = builder.build().execute(&self.pool).await?;
        let rows_affected = result.rows_affected();
        debug!("Bulk insert completed: {} rows inserted", rows_affected);

        Ok(rows_affected)
    }
}

/// Append ` WHERE ...` for `predicate`, owner first
fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &JobPredicate) {
    builder
        .push(" WHERE created_by = ")
        .push_bind(predicate.owner().get());

    if let Some(text) = predicate.position_contains() {
        builder
            .push(" AND position ILIKE ")
            .push_bind(contains_pattern(text));
    }
    if let Some(status) = predicate.status() {
        builder.push(" AND status = ").push_bind(status.as_str().to_string());
    }
    if let Some(job_type) = predicate.job_type() {
        builder.push(" AND job_type = ").push_bind(job_type.as_str().to_string());
    }
}

#[async_trait]
impl JobStore for JobRepository {
    async fn count(&self, predicate: &JobPredicate) -> Result<i64, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM jobs");
        push_predicate(&mut builder, predicate);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
    }

    async fn fetch(
        &self,
        predicate: &JobPredicate,
        sort: Option<SortOrder>,
        bounds: PageBounds,
    ) -> Result<Vec<JobRow>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM jobs", JOB_COLUMNS));
        push_predicate(&mut builder, predicate);

        if let Some(sort) = sort {
            builder.push(" ORDER BY ").push(sort.sql());
        }
        builder
            .push(" LIMIT ")
            .push_bind(bounds.limit)
            .push(" OFFSET ")
            .push_bind(bounds.skip);

        let rows = builder
            .build_query_as::<JobRow>()
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} jobs for owner {}", rows.len(), predicate.owner());
        Ok(rows)
    }

    async fn status_groups(&self, owner: OwnerId) -> Result<Vec<StatusGroup>, sqlx::Error> {
        sqlx::query_as::<_, StatusGroup>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM jobs
            WHERE created_by = $1
            GROUP BY status
            "#,
        )
        .bind(owner.get())
        .fetch_all(&self.pool)
        .await
    }

    async fn month_groups(&self, owner: OwnerId, limit: i64) -> Result<Vec<MonthGroup>, sqlx::Error> {
        sqlx::query_as::<_, MonthGroup>(
            r#"
            SELECT EXTRACT(YEAR FROM created_at AT TIME ZONE 'UTC')::int AS year,
                   EXTRACT(MONTH FROM created_at AT TIME ZONE 'UTC')::int AS month,
                   COUNT(*) AS count
            FROM jobs
            WHERE created_by = $1
            GROUP BY 1, 2
            ORDER BY 1 DESC, 2 DESC
            LIMIT $2
            "#,
        )
        .bind(owner.get())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn create(&self, owner: OwnerId, job: &CreateJob) -> Result<JobRow, sqlx::Error> {
        debug!(
            "Creating job: company={}, position={}, status={}",
            job.company, job.position, job.status
        );

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (created_by, company, position, status, job_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(owner.get())
        .bind(&job.company)
        .bind(&job.position)
        .bind(job.status.as_str())
        .bind(job.job_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        debug!("Job created with id={}", row.id);
        Ok(row)
    }

    async fn find(&self, owner: OwnerId, id: i32) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs WHERE id = $1 AND created_by = $2",
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(owner.get())
        .fetch_optional(&self.pool)
        .await
    }

    async fn update(
        &self,
        owner: OwnerId,
        id: i32,
        patch: &UpdateJob,
    ) -> Result<Option<JobRow>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE jobs SET updated_at = NOW()");

        if let Some(company) = &patch.company {
            builder.push(", company = ").push_bind(company);
        }
        if let Some(position) = &patch.position {
            builder.push(", position = ").push_bind(position);
        }
        if let Some(status) = patch.status {
            builder.push(", status = ").push_bind(status.as_str());
        }
        if let Some(job_type) = patch.job_type {
            builder.push(", job_type = ").push_bind(job_type.as_str());
        }

        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND created_by = ")
            .push_bind(owner.get())
            .push(" RETURNING ")
            .push(JOB_COLUMNS);

        builder
            .build_query_as::<JobRow>()
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, owner: OwnerId, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(owner.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
