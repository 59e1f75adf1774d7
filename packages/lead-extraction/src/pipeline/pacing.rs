//! Inter-hit pacing.
//!
//! Keeps consecutive model calls at least `delay` apart. Independent of the
//! retry backoff, which only kicks in after a rate-limit signal.

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use nonzero_ext::nonzero;
use std::time::Duration;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// One permit per `delay`, no burst. Built fresh for every run.
pub struct Pacer {
    limiter: Option<DirectRateLimiter>,
    delay: Duration,
}

impl Pacer {
    /// A zero delay disables pacing.
    pub fn new(delay: Duration) -> Self {
        let limiter = Quota::with_period(delay)
            .map(|quota| RateLimiter::direct(quota.allow_burst(nonzero!(1u32))));
        Self { limiter, delay }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait until the next hit may start. The first call returns immediately.
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}
