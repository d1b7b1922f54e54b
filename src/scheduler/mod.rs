// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background task scheduling for accessories.
//!
//! Every accessory owns one [`TaskScheduler`], a queue of spawned tokio tasks
//! supporting two kinds of work:
//!
//! - "run once after N": the delayed reconciliation that follows a control
//!   request, giving the physical device time to switch;
//! - "run every N": periodic polling, configured through a
//!   [`PollingScheduler`].
//!
//! Scheduled tasks are identified by a [`TaskId`] but never cancelled
//! individually: a new schedule is simply added next to the pending ones.
//! Dropping the scheduler aborts whatever is still pending.

mod polling;
mod task;

pub use polling::PollingScheduler;
pub use task::{TaskId, TaskKind, TaskScheduler};
