use serde::Serialize;
use crate::db::models::JobRow;

/// Response wrapping a single job
#[derive(Serialize)]
pub struct JobResponse {
    pub job: JobRow,
}
