// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached device state.
//!
//! Each accessory keeps a [`DeviceState`] holding the last known value of
//! every field it exposes. The UI layer reads from it synchronously while
//! remote reads and local writes fold new values into it:
//!
//! - remote values arrive as raw attribute strings and are accepted only if
//!   they parse and fall in range ([`DeviceState::apply_snapshot`]);
//! - user intent arrives as a typed [`StateChange`] and is applied
//!   optimistically, before the remote confirms it.
//!
//! # Examples
//!
//! ```
//! use smartprugio_lib::state::{DeviceState, StateChange};
//! use smartprugio_lib::types::PowerState;
//!
//! let mut state = DeviceState::new();
//! assert!(!state.is_on());
//!
//! // Optimistic write
//! assert!(state.apply(&StateChange::power_on()));
//! assert!(state.is_on());
//!
//! // Transitional remote value is ignored
//! assert!(state.apply_power("-").is_err());
//! assert!(state.is_on());
//! ```

mod device_state;
mod state_change;

pub use device_state::DeviceState;
pub use state_change::StateChange;
