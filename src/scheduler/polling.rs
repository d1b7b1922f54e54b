// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic reconciliation.

use std::future::Future;
use std::time::Duration;

use super::{TaskId, TaskScheduler};

/// Periodic polling configuration for one accessory.
///
/// When enabled, the accessory's reconciliation runs every `interval`,
/// starting one interval after [`start`](Self::start). Ticks are independent:
/// a reconciliation still waiting on the network never holds back the next
/// one. A zero interval disables polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingScheduler {
    interval: Option<Duration>,
}

impl PollingScheduler {
    /// Default polling interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    /// Creates a polling configuration. `Duration::ZERO` disables polling.
    ///
    /// Intervals above [`TaskScheduler::MAX_PERIOD`] are clamped to it.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        if interval > TaskScheduler::MAX_PERIOD {
            tracing::warn!(
                interval = ?interval,
                max = ?TaskScheduler::MAX_PERIOD,
                "Polling interval too long, clamping"
            );
        }
        Self {
            interval: (!interval.is_zero()).then(|| interval.min(TaskScheduler::MAX_PERIOD)),
        }
    }

    /// Creates a polling configuration from whole seconds. `0` disables
    /// polling.
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// Creates a configuration that never polls.
    #[must_use]
    pub fn disabled() -> Self {
        Self { interval: None }
    }

    /// Returns `true` if polling is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    /// Returns the polling interval, if enabled.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Registers `reconcile` as a periodic task on `tasks`.
    ///
    /// Returns `None` without scheduling anything when polling is disabled.
    pub fn start<F, Fut>(&self, tasks: &TaskScheduler, reconcile: F) -> Option<TaskId>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = self.interval?;
        tracing::debug!(interval = ?period, "Starting polling");
        Some(tasks.run_every(period, reconcile))
    }
}

impl Default for PollingScheduler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn zero_interval_disables_polling() {
        assert!(!PollingScheduler::from_secs(0).is_enabled());
        assert_eq!(PollingScheduler::new(Duration::ZERO), PollingScheduler::disabled());
    }

    #[test]
    fn default_is_ten_seconds() {
        assert_eq!(
            PollingScheduler::default().interval(),
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn oversized_interval_is_clamped() {
        assert_eq!(
            PollingScheduler::from_secs(u64::MAX).interval(),
            Some(TaskScheduler::MAX_PERIOD)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn oversized_interval_keeps_polling_alive() {
        let tasks = TaskScheduler::current().unwrap();
        let id = PollingScheduler::from_secs(u64::MAX)
            .start(&tasks, || async {})
            .unwrap();

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(tasks.pending_tasks().first().map(|(t, _)| *t), Some(id));
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_schedules_nothing() {
        let tasks = TaskScheduler::current().unwrap();
        let id = PollingScheduler::disabled().start(&tasks, || async {});
        assert!(id.is_none());
        assert_eq!(tasks.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn enabled_runs_every_interval() {
        let tasks = TaskScheduler::current().unwrap();
        let runs = Arc::new(AtomicU32::new(0));
        let runs_clone = runs.clone();

        let id = PollingScheduler::from_secs(5).start(&tasks, move || {
            let runs = runs_clone.clone();
            async move {
                runs.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert!(id.is_some());

        tokio::time::sleep(Duration::from_millis(15_100)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }
}
