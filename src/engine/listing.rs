use serde::Serialize;
use tracing::debug;

use crate::db::models::JobRow;
use crate::db::store::JobStore;
use super::owner::OwnerId;
use super::pagination::Pagination;
use super::params::ListingParams;
use super::predicate::JobPredicate;

/// One page of an owner's jobs plus the totals of the whole filtered set
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub jobs: Vec<JobRow>,
    pub total_jobs: i64,
    pub num_of_pages: i64,
}

/// Count the filtered set, then fetch one sorted, bounded page of it.
///
/// The count and the fetch are separate store calls. A write landing
/// between them can make `total_jobs` disagree with the page contents;
/// nothing here tries to reconcile that.
pub async fn list_jobs(
    store: &dyn JobStore,
    owner: OwnerId,
    params: &ListingParams,
) -> Result<JobPage, sqlx::Error> {
    let predicate = JobPredicate::build(owner, params);

    let total_jobs = store.count(&predicate).await?;
    let pagination = Pagination::compute(params.page, total_jobs);

    let mut jobs = store.fetch(&predicate, params.sort, pagination.bounds()).await?;
    jobs.truncate(pagination.limit as usize);

    debug!(
        "Listing for owner {}: {} of {} jobs (page={}, skip={}, limit={}, sort={:?})",
        owner,
        jobs.len(),
        total_jobs,
        params.page.page(),
        pagination.skip,
        pagination.limit,
        params.sort
    );

    Ok(JobPage {
        jobs,
        total_jobs,
        num_of_pages: pagination.page_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::job::models::{JobStatus, JobType};
    use crate::db::memory::MemoryJobStore;
    use crate::engine::pagination::PageRequest;
    use crate::engine::params::FilterValue;
    use crate::engine::sort::SortOrder;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    const OWNER: i32 = 1;
    const STRANGER: i32 = 2;

    fn seeded() -> MemoryJobStore {
        let store = MemoryJobStore::new();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let rows = [
            ("Acme", "Backend Engineer", "pending", "full-time"),
            ("Globex", "frontend developer", "interview", "remote"),
            ("Initech", "Data Engineer", "declined", "part-time"),
            ("Umbrella", "QA Analyst", "pending", "internship"),
            ("Hooli", "Platform Engineer", "interview", "full-time"),
        ];
        for (i, (company, position, status, job_type)) in rows.into_iter().enumerate() {
            store.insert(OWNER, company, position, status, job_type, base + Duration::days(i as i64));
        }
        store.insert(STRANGER, "Acme", "Backend Engineer", "pending", "full-time", base);
        store
    }

    fn owner() -> OwnerId {
        OwnerId::from_verified(OWNER)
    }

    fn companies(page: &JobPage) -> Vec<&str> {
        page.jobs.iter().map(|j| j.company.as_str()).collect()
    }

    #[actix_web::test]
    async fn lists_only_the_owners_jobs() {
        let store = seeded();
        let page = list_jobs(&store, owner(), &ListingParams::default()).await.unwrap();
        assert_eq!(page.total_jobs, 5);
        assert_eq!(page.num_of_pages, 1);
        assert!(page.jobs.iter().all(|j| j.created_by == OWNER));
    }

    #[actix_web::test]
    async fn search_is_case_insensitive_on_position() {
        let store = seeded();
        let params = ListingParams {
            search: Some("ENGINEER".into()),
            sort: Some(SortOrder::AToZ),
            ..ListingParams::default()
        };
        let page = list_jobs(&store, owner(), &params).await.unwrap();
        assert_eq!(companies(&page), vec!["Acme", "Initech", "Hooli"]);
    }

    #[actix_web::test]
    async fn status_and_type_filters_combine() {
        let store = seeded();
        let params = ListingParams {
            status: Some(JobStatus::Interview.into()),
            job_type: Some(JobType::FullTime.into()),
            ..ListingParams::default()
        };
        let page = list_jobs(&store, owner(), &params).await.unwrap();
        assert_eq!(companies(&page), vec!["Hooli"]);
        assert_eq!(page.total_jobs, 1);
    }

    #[actix_web::test]
    async fn dropping_a_filter_never_narrows_results() {
        let store = seeded();
        let narrow = ListingParams {
            status: Some(JobStatus::Pending.into()),
            search: Some("engineer".into()),
            ..ListingParams::default()
        };
        let wider = ListingParams {
            status: Some(JobStatus::Pending.into()),
            ..ListingParams::default()
        };
        let narrow = list_jobs(&store, owner(), &narrow).await.unwrap();
        let wider = list_jobs(&store, owner(), &wider).await.unwrap();
        assert!(narrow.total_jobs <= wider.total_jobs);
        for job in &narrow.jobs {
            assert!(wider.jobs.contains(job));
        }
    }

    #[actix_web::test]
    async fn page_is_bounded_by_limit_while_total_counts_everything() {
        let store = seeded();
        let params = ListingParams {
            sort: Some(SortOrder::Oldest),
            page: PageRequest::new(2, 2),
            ..ListingParams::default()
        };
        let page = list_jobs(&store, owner(), &params).await.unwrap();
        assert_eq!(companies(&page), vec!["Initech", "Umbrella"]);
        assert_eq!(page.total_jobs, 5);
        assert_eq!(page.num_of_pages, 3);

        let last = ListingParams {
            page: PageRequest::new(3, 2),
            ..params.clone()
        };
        let page = list_jobs(&store, owner(), &last).await.unwrap();
        assert_eq!(companies(&page), vec!["Hooli"]);
    }

    #[actix_web::test]
    async fn page_past_the_end_is_empty() {
        let store = seeded();
        let params = ListingParams {
            page: PageRequest::new(9, 10),
            ..ListingParams::default()
        };
        let page = list_jobs(&store, owner(), &params).await.unwrap();
        assert!(page.jobs.is_empty());
        assert_eq!(page.total_jobs, 5);
        assert_eq!(page.num_of_pages, 1);
    }

    #[actix_web::test]
    async fn opposite_sorts_are_exact_reversals() {
        let store = seeded();
        let run = |sort: SortOrder| {
            let params = ListingParams {
                sort: Some(sort),
                ..ListingParams::default()
            };
            let store = &store;
            async move { list_jobs(store, owner(), &params).await.unwrap() }
        };

        let latest = run(SortOrder::Latest).await;
        let mut oldest = run(SortOrder::Oldest).await;
        oldest.jobs.reverse();
        assert_eq!(latest.jobs, oldest.jobs);

        let a_z = run(SortOrder::AToZ).await;
        let mut z_a = run(SortOrder::ZToA).await;
        z_a.jobs.reverse();
        assert_eq!(a_z.jobs, z_a.jobs);
    }

    #[actix_web::test]
    async fn identical_requests_return_identical_pages() {
        let store = seeded();
        let params = ListingParams {
            search: Some("e".into()),
            sort: Some(SortOrder::Latest),
            page: PageRequest::new(1, 3),
            ..ListingParams::default()
        };
        let first = list_jobs(&store, owner(), &params).await.unwrap();
        let second = list_jobs(&store, owner(), &params).await.unwrap();
        assert_eq!(first.jobs, second.jobs);
        assert_eq!(first.total_jobs, second.total_jobs);
        assert_eq!(first.num_of_pages, second.num_of_pages);
    }

    #[actix_web::test]
    async fn ties_on_the_sort_key_still_reverse_exactly() {
        let store = MemoryJobStore::new();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        store.insert(OWNER, "A", "Dev", "pending", "full-time", at);
        store.insert(OWNER, "B", "Dev", "pending", "full-time", at);
        store.insert(OWNER, "C", "Ops", "pending", "full-time", at);

        let sorted = |sort: SortOrder| ListingParams {
            sort: Some(sort),
            ..ListingParams::default()
        };

        let a_z = list_jobs(&store, owner(), &sorted(SortOrder::AToZ)).await.unwrap();
        let mut z_a = list_jobs(&store, owner(), &sorted(SortOrder::ZToA)).await.unwrap();
        z_a.jobs.reverse();
        assert_eq!(companies(&a_z), vec!["A", "B", "C"]);
        assert_eq!(companies(&z_a), companies(&a_z));

        let latest = list_jobs(&store, owner(), &sorted(SortOrder::Latest)).await.unwrap();
        let mut oldest = list_jobs(&store, owner(), &sorted(SortOrder::Oldest)).await.unwrap();
        oldest.jobs.reverse();
        assert_eq!(companies(&latest), vec!["C", "B", "A"]);
        assert_eq!(companies(&oldest), companies(&latest));
    }

    #[actix_web::test]
    async fn ties_never_repeat_or_skip_rows_across_pages() {
        let store = MemoryJobStore::new();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        for i in 0..7 {
            store.insert(OWNER, &format!("Co {}", i), "Dev", "pending", "full-time", at);
        }

        let mut seen = Vec::new();
        for page in 1..=3 {
            let params = ListingParams {
                sort: Some(SortOrder::AToZ),
                page: PageRequest::new(page, 3),
                ..ListingParams::default()
            };
            let page = list_jobs(&store, owner(), &params).await.unwrap();
            seen.extend(page.jobs.into_iter().map(|j| j.id));
        }
        assert_eq!(seen, (1..=7).collect::<Vec<i32>>());
    }

    #[actix_web::test]
    async fn unrecognised_filter_value_matches_nothing() {
        let store = seeded();
        let params = ListingParams {
            status: Some(FilterValue::Unrecognised("Pending".into())),
            ..ListingParams::default()
        };
        let page = list_jobs(&store, owner(), &params).await.unwrap();
        assert!(page.jobs.is_empty());
        assert_eq!(page.total_jobs, 0);
        assert_eq!(page.num_of_pages, 0);

        let params = ListingParams {
            job_type: Some(FilterValue::Unrecognised("contract".into())),
            ..ListingParams::default()
        };
        let page = list_jobs(&store, owner(), &params).await.unwrap();
        assert_eq!(page.total_jobs, 0);
    }

    #[actix_web::test]
    async fn owner_without_jobs_gets_empty_page() {
        let store = seeded();
        let page = list_jobs(&store, OwnerId::from_verified(99), &ListingParams::default())
            .await
            .unwrap();
        assert!(page.jobs.is_empty());
        assert_eq!(page.total_jobs, 0);
        assert_eq!(page.num_of_pages, 0);
    }

    #[actix_web::test]
    async fn store_failure_propagates() {
        let store = seeded();
        store.fail_all();
        let result = list_jobs(&store, owner(), &ListingParams::default()).await;
        assert!(matches!(result, Err(sqlx::Error::PoolTimedOut)));
    }
}
