// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimum-interval gate for control requests.

use std::time::Duration;

use tokio::time::Instant;

/// Gates how often control requests may be sent for one accessory.
///
/// A call is allowed when at least `min_interval` has passed since the last
/// allowed call; the first call is always allowed. Rejected calls have no
/// side effects, so a burst of rapid UI toggles lets exactly one request
/// through per interval.
///
/// Uses the tokio clock, so paused-time tests can drive it.
///
/// # Examples
///
/// ```
/// use smartprugio_lib::RateLimiter;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut limiter = RateLimiter::new(Duration::from_millis(600));
/// assert!(limiter.allow());
/// assert!(!limiter.allow());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last_allowed: Option<Instant>,
}

impl RateLimiter {
    /// Default minimum interval between control requests.
    pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(600);

    /// Creates a limiter with the given minimum interval.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_allowed: None,
        }
    }

    /// Returns the configured minimum interval.
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Returns `true` and records the current time if the interval has
    /// elapsed since the last allowed call.
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last_allowed
            && now.duration_since(last) < self.min_interval
        {
            return false;
        }
        self.last_allowed = Some(now);
        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_INTERVAL)
    }
}
