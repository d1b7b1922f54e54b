// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-accessory task queue.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::ConfigError;

/// Identifier of a scheduled task, unique within one scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// What a scheduled task does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Runs once after a delay.
    Once {
        /// Delay before running.
        delay: Duration,
    },
    /// Runs repeatedly with a fixed period.
    Every {
        /// Time between runs.
        period: Duration,
    },
}

struct ScheduledTask {
    id: TaskId,
    kind: TaskKind,
    handle: JoinHandle<()>,
}

/// Queue of background tasks owned by one accessory.
///
/// Tasks run on the Tokio runtime that was current when the scheduler was
/// created. Pending tasks are aborted when the scheduler is dropped.
pub struct TaskScheduler {
    runtime: Handle,
    next_id: AtomicU64,
    tasks: Mutex<Vec<ScheduledTask>>,
}

impl TaskScheduler {
    /// Longest period accepted by [`run_every`](Self::run_every); longer
    /// periods are shortened to it.
    pub const MAX_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

    /// Creates a scheduler bound to the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoRuntime` when called outside a Tokio runtime.
    pub fn current() -> Result<Self, ConfigError> {
        let runtime = Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;
        Ok(Self::with_handle(runtime))
    }

    /// Creates a scheduler spawning onto the given runtime.
    #[must_use]
    pub fn with_handle(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: AtomicU64::new(1),
            tasks: Mutex::new(Vec::new()),
        }
    }

    fn next_id(&self) -> TaskId {
        TaskId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn register(&self, kind: TaskKind, handle: JoinHandle<()>) -> TaskId {
        let id = self.next_id();
        let mut tasks = self.tasks.lock();
        tasks.retain(|t| !t.handle.is_finished());
        tasks.push(ScheduledTask { id, kind, handle });
        id
    }

    /// Runs `future` once, after `delay`.
    pub fn run_once_after<F>(&self, delay: Duration, future: F) -> TaskId
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            future.await;
        });
        self.register(TaskKind::Once { delay }, handle)
    }

    /// Runs `task` every `period`, starting one period from now.
    ///
    /// Each run is spawned as its own task, so a slow run never delays the
    /// next tick and runs may overlap.
    ///
    /// Periods above [`MAX_PERIOD`](Self::MAX_PERIOD) are clamped to it.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn run_every<F, Fut>(&self, period: Duration, task: F) -> TaskId
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        assert!(!period.is_zero(), "period must be non-zero");
        let period = period.min(Self::MAX_PERIOD);
        let runtime = self.runtime.clone();
        let handle = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                runtime.spawn(task());
            }
        });
        self.register(TaskKind::Every { period }, handle)
    }

    /// Returns the number of tasks that have not finished yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        let mut tasks = self.tasks.lock();
        tasks.retain(|t| !t.handle.is_finished());
        tasks.len()
    }

    /// Returns the ids and kinds of the tasks that have not finished yet.
    #[must_use]
    pub fn pending_tasks(&self) -> Vec<(TaskId, TaskKind)> {
        let mut tasks = self.tasks.lock();
        tasks.retain(|t| !t.handle.is_finished());
        tasks.iter().map(|t| (t.id, t.kind)).collect()
    }

    /// Aborts every pending task.
    pub fn shutdown(&self) {
        for task in self.tasks.lock().drain(..) {
            task.handle.abort();
        }
    }
}

impl Drop for TaskScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("tasks", &self.tasks.lock().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn task_id_display() {
        assert_eq!(TaskId(7).to_string(), "Task(7)");
    }

    #[test]
    fn current_requires_runtime() {
        assert!(matches!(
            TaskScheduler::current(),
            Err(ConfigError::NoRuntime)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn run_once_after_delay() {
        let scheduler = TaskScheduler::current().unwrap();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = scheduler.run_once_after(Duration::from_millis(800), async move {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(
            scheduler.pending_tasks(),
            vec![(
                id,
                TaskKind::Once {
                    delay: Duration::from_millis(800)
                }
            )]
        );

        tokio::time::sleep(Duration::from_millis(799)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_once_tasks_all_run() {
        let scheduler = TaskScheduler::current().unwrap();
        let counter = Arc::new(AtomicU32::new(0));

        let first = scheduler.run_once_after(Duration::from_millis(800), {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = scheduler.run_once_after(Duration::from_millis(800), {
            let counter = counter.clone();
            async move {
                counter.fetch_add(10, Ordering::SeqCst);
            }
        });
        assert_ne!(first, second);
        assert_eq!(scheduler.pending(), 2);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn run_every_ticks_after_each_period() {
        let scheduler = TaskScheduler::current().unwrap();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        scheduler.run_every(Duration::from_secs(10), move || {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(9_900)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn huge_periods_are_clamped() {
        let scheduler = TaskScheduler::current().unwrap();
        let id = scheduler.run_every(Duration::MAX, || async {});

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(
            scheduler.pending_tasks(),
            vec![(id, TaskKind::Every { period: TaskScheduler::MAX_PERIOD })]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_runs_do_not_block_the_next_tick() {
        let scheduler = TaskScheduler::current().unwrap();
        let started = Arc::new(AtomicU32::new(0));
        let started_clone = started.clone();

        scheduler.run_every(Duration::from_secs(1), move || {
            let started = started_clone.clone();
            async move {
                started.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        });

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(started.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_pending_tasks() {
        let counter = Arc::new(AtomicU32::new(0));
        {
            let scheduler = TaskScheduler::current().unwrap();
            let counter = counter.clone();
            scheduler.run_once_after(Duration::from_millis(100), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
