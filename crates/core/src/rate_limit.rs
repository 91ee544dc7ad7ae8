//! Per-identifier request rate limiting.
//!
//! Limits are grouped by [`RateLimitKind`]; each kind owns one keyed
//! limiter so that an identifier such as `createPhoneCall:42` is tracked
//! independently of every other identifier.

use std::num::NonZeroU32;

use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::error::CoreError;

/// Default requests per minute for [`RateLimitKind::Core`].
pub const DEFAULT_CORE_PER_MIN: u32 = 10;

/// Default requests per minute for [`RateLimitKind::Common`].
pub const DEFAULT_COMMON_PER_MIN: u32 = 200;

/// Which bucket family a request is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitKind {
    /// Expensive operations that reach paid third-party services.
    Core,
    /// Ordinary authenticated API traffic.
    Common,
}

/// Rate limit configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub core_per_min: u32,
    pub common_per_min: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            core_per_min: DEFAULT_CORE_PER_MIN,
            common_per_min: DEFAULT_COMMON_PER_MIN,
        }
    }
}

impl RateLimitConfig {
    /// Load rate limit configuration from environment variables.
    ///
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `RATE_LIMIT_ENABLED`        | `true`  |
    /// | `RATE_LIMIT_CORE_PER_MIN`   | `10`    |
    /// | `RATE_LIMIT_COMMON_PER_MIN` | `200`   |
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            core_per_min: std::env::var("RATE_LIMIT_CORE_PER_MIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CORE_PER_MIN),
            common_per_min: std::env::var("RATE_LIMIT_COMMON_PER_MIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_COMMON_PER_MIN),
        }
    }
}

/// Keyed limiters for every [`RateLimitKind`].
pub struct RateLimits {
    enabled: bool,
    core: DefaultKeyedRateLimiter<String>,
    common: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl RateLimits {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            core: RateLimiter::keyed(per_minute(config.core_per_min)),
            common: RateLimiter::keyed(per_minute(config.common_per_min)),
            clock: DefaultClock::default(),
        }
    }

    /// Charge one request for `identifier` against the `kind` bucket.
    ///
    /// Returns [`CoreError::RateLimited`] when the bucket is empty.
    pub fn check(&self, kind: RateLimitKind, identifier: &str) -> Result<(), CoreError> {
        if !self.enabled {
            return Ok(());
        }

        let limiter = match kind {
            RateLimitKind::Core => &self.core,
            RateLimitKind::Common => &self.common,
        };

        limiter.check_key(&identifier.to_string()).map_err(|not_until| {
            let wait = not_until.wait_time_from(self.clock.now());
            CoreError::RateLimited(format!(
                "Rate limit exceeded. Try again in {} seconds.",
                wait.as_secs().max(1)
            ))
        })
    }

    /// Drop identifiers whose buckets have fully refilled.
    ///
    /// Keyed limiters keep one entry per identifier ever seen; call this
    /// periodically to bound memory.
    pub fn retain_recent(&self) {
        for limiter in [&self.core, &self.common] {
            limiter.retain_recent();
            limiter.shrink_to_fit();
        }
    }

    /// Number of identifiers currently tracked across all kinds.
    pub fn tracked_identifiers(&self) -> usize {
        self.core.len() + self.common.len()
    }
}

impl std::fmt::Debug for RateLimits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimits")
            .field("enabled", &self.enabled)
            .finish()
    }
}

fn per_minute(n: u32) -> Quota {
    Quota::per_minute(NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN))
}
