//! Query and aggregation engine behind job listing and dashboard stats.
//!
//! Everything here is owner scoped: every entry point takes an [`OwnerId`]
//! and every predicate it builds carries it.

pub mod listing;
pub mod owner;
pub mod pagination;
pub mod params;
pub mod predicate;
pub mod sort;
pub mod stats;

pub use listing::{list_jobs, JobPage};
pub use owner::OwnerId;
pub use params::{ListingParams, ListingQuery};
pub use stats::{show_stats, JobStats};
