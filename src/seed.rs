//! Bulk loading of jobs from a seed file or from random data.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::api::job::models::{JobStatus, JobType};
use crate::db::job_repository::JobRepository;
use crate::db::models::NewJobRecord;
use crate::engine::OwnerId;

const COMPANIES: &[&str] = &[
    "Acme", "Globex", "Initech", "Umbrella", "Hooli", "Stark Industries", "Wayne Enterprises",
    "Cyberdyne", "Soylent", "Tyrell",
];

const POSITIONS: &[&str] = &[
    "Backend Engineer", "Frontend Developer", "Data Analyst", "DevOps Engineer",
    "Product Manager", "QA Engineer", "Site Reliability Engineer", "Technical Writer",
    "UX Designer", "Security Analyst",
];

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Store(sqlx::Error),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io(e) => write!(f, "Could not read seed file: {}", e),
            SeedError::Parse(e) => write!(f, "Seed file is not a valid job array: {}", e),
            SeedError::Store(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for SeedError {}

/// One entry of a seed file
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobSeed {
    #[validate(length(min = 1, max = 50, message = "Company must be between 1 and 50 characters"))]
    pub company: String,
    #[validate(length(min = 1, max = 100, message = "Position must be between 1 and 100 characters"))]
    pub position: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub job_type: JobType,
    pub created_at: Option<DateTime<Utc>>,
}

pub fn parse_seeds(raw: &str) -> Result<Vec<JobSeed>, SeedError> {
    serde_json::from_str(raw).map_err(SeedError::Parse)
}

/// Turn valid seeds into records for `owner`; invalid entries are skipped
pub fn seed_records(seeds: Vec<JobSeed>, owner: OwnerId, now: DateTime<Utc>) -> Vec<NewJobRecord> {
    seeds
        .into_iter()
        .enumerate()
        .filter_map(|(index, seed)| {
            if let Err(errors) = seed.validate() {
                warn!("Skipping seed entry {} ({}): {}", index, seed.company, errors);
                return None;
            }
            Some(NewJobRecord {
                created_by: owner.get(),
                company: seed.company,
                position: seed.position,
                status: seed.status.as_str().to_string(),
                job_type: seed.job_type.as_str().to_string(),
                created_at: seed.created_at.unwrap_or(now),
            })
        })
        .collect()
}

/// `count` random jobs created at random points of the year before `now`
pub fn random_records<R: Rng>(
    rng: &mut R,
    owner: OwnerId,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<NewJobRecord> {
    (0..count)
        .map(|_| {
            let age = Duration::days(rng.gen_range(0..365)) + Duration::minutes(rng.gen_range(0..1440));
            NewJobRecord {
                created_by: owner.get(),
                company: COMPANIES.choose(rng).copied().unwrap_or("Acme").to_string(),
                position: POSITIONS.choose(rng).copied().unwrap_or("Engineer").to_string(),
                status: JobStatus::ALL.choose(rng).copied().unwrap_or_default().as_str().to_string(),
                job_type: JobType::ALL.choose(rng).copied().unwrap_or_default().as_str().to_string(),
                created_at: now - age,
            }
        })
        .collect()
}

pub async fn populate(repo: &JobRepository, file: &Path, owner: OwnerId) -> Result<u64, SeedError> {
    let raw = std::fs::read_to_string(file).map_err(SeedError::Io)?;
    let seeds = parse_seeds(&raw)?;
    let total = seeds.len();
    let records = seed_records(seeds, owner, Utc::now());

    info!("Populating {} of {} seed jobs for owner {}", records.len(), total, owner);
    repo.bulk_insert(&records).await.map_err(SeedError::Store)
}

pub async fn demo(repo: &JobRepository, owner: OwnerId, count: usize) -> Result<u64, SeedError> {
    let records = random_records(&mut rand::thread_rng(), owner, count, Utc::now());

    info!("Inserting {} random jobs for owner {}", records.len(), owner);
    repo.bulk_insert(&records).await.map_err(SeedError::Store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn seeds_default_status_type_and_timestamp() {
        let seeds = parse_seeds(r#"[{"company":"Acme","position":"Dev"}]"#).unwrap();
        let records = seed_records(seeds, OwnerId::from_verified(4), now());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].created_by, 4);
        assert_eq!(records[0].status, "pending");
        assert_eq!(records[0].job_type, "full-time");
        assert_eq!(records[0].created_at, now());
    }

    #[test]
    fn seeds_keep_explicit_values_and_skip_invalid_entries() {
        let seeds = parse_seeds(
            r#"[
                {"company":"Acme","position":"Dev","status":"declined","jobType":"remote","createdAt":"2023-02-10T10:00:00Z"},
                {"company":"","position":"Nobody"}
            ]"#,
        )
        .unwrap();
        let records = seed_records(seeds, OwnerId::from_verified(1), now());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, "declined");
        assert_eq!(records[0].job_type, "remote");
        assert_eq!(records[0].created_at, Utc.with_ymd_and_hms(2023, 2, 10, 10, 0, 0).unwrap());
    }

    #[test]
    fn malformed_seed_file_is_a_parse_error() {
        assert!(matches!(parse_seeds(r#"{"company":"Acme"}"#), Err(SeedError::Parse(_))));
        assert!(matches!(parse_seeds(r#"[{"company":"Acme","position":"Dev","status":"hired"}]"#), Err(SeedError::Parse(_))));
    }

    #[test]
    fn random_records_stay_within_the_last_year() {
        let mut rng = StdRng::seed_from_u64(7);
        let records = random_records(&mut rng, OwnerId::from_verified(2), 40, now());
        assert_eq!(records.len(), 40);
        for record in &records {
            assert_eq!(record.created_by, 2);
            assert!(record.created_at <= now());
            assert!(record.created_at > now() - Duration::days(366));
            assert!(record.status.parse::<JobStatus>().is_ok());
            assert!(record.job_type.parse::<JobType>().is_ok());
        }
    }
}
