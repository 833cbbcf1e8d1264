//! Dashboard statistics: per-status counts and the monthly trend.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::job::models::JobStatus;
use crate::db::models::{MonthGroup, StatusGroup};
use crate::db::store::JobStore;
use super::owner::OwnerId;

/// Number of populated months reported by the trend
pub const MONTHLY_WINDOW: usize = 6;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultStats {
    pub pending: i64,
    pub interview: i64,
    pub declined: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyApplication {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub default_stats: DefaultStats,
    pub monthly_applications: Vec<MonthlyApplication>,
}

/// Reshape status groups into the fixed three-key record.
///
/// Statuses outside {pending, interview, declined} have no slot and are
/// left out of the result.
pub fn default_stats(groups: &[StatusGroup]) -> DefaultStats {
    let mut stats = DefaultStats::default();
    for group in groups {
        match group.status.parse::<JobStatus>() {
            Ok(JobStatus::Pending) => stats.pending = group.count,
            Ok(JobStatus::Interview) => stats.interview = group.count,
            Ok(JobStatus::Declined) => stats.declined = group.count,
            Err(_) => debug!(
                "Dropping {} jobs with unrecognised status {:?} from stats",
                group.count, group.status
            ),
        }
    }
    stats
}

/// Newest [`MONTHLY_WINDOW`] populated months, oldest first.
///
/// Months without jobs are simply absent; nothing is zero-filled.
pub fn monthly_applications(mut groups: Vec<MonthGroup>) -> Vec<MonthlyApplication> {
    groups.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
    groups.truncate(MONTHLY_WINDOW);

    groups
        .into_iter()
        .rev()
        .filter_map(|group| match month_label(group.year, group.month) {
            Some(date) => Some(MonthlyApplication {
                date,
                count: group.count,
            }),
            None => {
                warn!("Skipping invalid month bucket {}-{}", group.year, group.month);
                None
            }
        })
        .collect()
}

/// `"Jan 2024"` style label, `None` for a month outside 1..=12
pub fn month_label(year: i32, month: i32) -> Option<String> {
    let month = u32::try_from(month).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|date| date.format("%b %Y").to_string())
}

/// Run both grouping passes for `owner` and shape them for the dashboard
pub async fn show_stats(store: &dyn JobStore, owner: OwnerId) -> Result<JobStats, sqlx::Error> {
    let status_groups = store.status_groups(owner).await?;
    let month_groups = store.month_groups(owner, MONTHLY_WINDOW as i64).await?;

    Ok(JobStats {
        default_stats: default_stats(&status_groups),
        monthly_applications: monthly_applications(month_groups),
    })
}
