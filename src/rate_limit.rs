//! Daily request counter for the upstream API quota.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::NewsError;

#[derive(Debug)]
struct Window {
    request_count: u32,
    last_reset: DateTime<Utc>,
}

/// Counts fetch cycles against a fixed limit per rolling 24h window.
///
/// The window restarts (count back to zero) the first time it is consulted
/// at least 24 hours after its last reset.
#[derive(Debug)]
pub struct DailyRateLimiter {
    limit: u32,
    window: Duration,
    state: Mutex<Window>,
}

impl DailyRateLimiter {
    pub fn new(limit: u32, now: DateTime<Utc>) -> Self {
        Self {
            limit,
            window: Duration::hours(24),
            state: Mutex::new(Window {
                request_count: 0,
                last_reset: now,
            }),
        }
    }

    /// Consume one request from the current window.
    ///
    /// # Errors
    ///
    /// [`NewsError::RateLimitExceeded`] when the window's limit is already
    /// reached; nothing is consumed in that case.
    pub fn try_acquire(&self, now: DateTime<Utc>) -> Result<u32, NewsError> {
        let mut state = self.state.lock();
        if now - state.last_reset >= self.window {
            info!(
                previous_count = state.request_count,
                "Resetting daily request counter"
            );
            state.request_count = 0;
            state.last_reset = now;
        }

        if state.request_count >= self.limit {
            return Err(NewsError::RateLimitExceeded {
                count: state.request_count,
                limit: self.limit,
            });
        }

        state.request_count += 1;
        debug!(
            count = state.request_count,
            limit = self.limit,
            "Consumed upstream request"
        );
        Ok(self.limit - state.request_count)
    }

    pub fn request_count(&self) -> u32 {
        self.state.lock().request_count
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}
