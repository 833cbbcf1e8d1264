use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Database representation of a job with all fields
#[derive(Debug, Clone, FromRow, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i32,
    pub created_by: i32,
    pub company: String,
    pub position: String,
    pub status: String,
    pub job_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database representation of a user; the hash never leaves the server
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub location: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// One bucket of the status grouping pass
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct StatusGroup {
    pub status: String,
    pub count: i64,
}

/// One (year, month) bucket of the monthly grouping pass
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct MonthGroup {
    pub year: i32,
    pub month: i32,
    pub count: i64,
}

/// Fully specified job for bulk inserts, timestamps included
#[derive(Debug, Clone)]
pub struct NewJobRecord {
    pub created_by: i32,
    pub company: String,
    pub position: String,
    pub status: String,
    pub job_type: String,
    pub created_at: DateTime<Utc>,
}

/// Fields written when a user registers
pub struct NewUser<'a> {
    pub name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub location: &'a str,
    pub password_hash: &'a str,
}

/// Profile fields replaced by an update
pub struct ProfileUpdate<'a> {
    pub name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub location: &'a str,
}
