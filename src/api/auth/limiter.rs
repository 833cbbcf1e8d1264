//! Per-client attempt limit for the unauthenticated auth routes.
//!
//! Each client IP gets a counter that lives for one window from its first
//! attempt; the cache's time-to-live expires it, which starts a new window.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::HttpRequest;
use moka::sync::Cache;
use tracing::warn;

use crate::api::error::ServiceError;

const MAX_TRACKED_CLIENTS: u64 = 100_000;

pub struct AuthRateLimiter {
    max_attempts: u32,
    window: Duration,
    attempts: Cache<IpAddr, Arc<AtomicU32>>,
}

impl AuthRateLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        let attempts = Cache::builder()
            .max_capacity(MAX_TRACKED_CLIENTS)
            .time_to_live(window)
            .build();

        Self {
            max_attempts,
            window,
            attempts,
        }
    }

    /// Count one attempt from `client`; `false` once the window is used up
    pub fn try_acquire(&self, client: IpAddr) -> bool {
        let counter = self
            .attempts
            .get_with(client, || Arc::new(AtomicU32::new(0)));

        counter.fetch_add(1, Ordering::Relaxed) < self.max_attempts
    }

    /// Refuse the request with 429 when its peer address is over the limit.
    /// Requests without a peer address share one bucket.
    pub fn check(&self, req: &HttpRequest) -> Result<(), ServiceError> {
        let client = req
            .peer_addr()
            .map(|addr| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        if self.try_acquire(client) {
            Ok(())
        } else {
            warn!("Auth attempts exhausted for {}", client);
            Err(ServiceError::RateLimited(format!(
                "Too many requests from this IP, please try again after {} minutes",
                self.window.as_secs().div_ceil(60)
            )))
        }
    }
}
