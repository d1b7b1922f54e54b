// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State shared between an accessory and its background tasks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use crate::command::ControlRequest;
use crate::error::ProtocolError;
use crate::protocol::Protocol;
use crate::rate_limiter::RateLimiter;
use crate::response::DeviceSnapshot;
use crate::state::{DeviceState, StateChange};
use crate::subscription::CallbackRegistry;
use crate::types::Category;

use super::{AccessoryInformation, Characteristic, CharacteristicValue};

/// Client, cache, rate-limit window and callbacks of one accessory.
///
/// Locks are only taken for single synchronous updates, never across a
/// remote call.
pub(crate) struct AccessoryCore<P: Protocol> {
    client: Arc<P>,
    information: AccessoryInformation,
    state: RwLock<DeviceState>,
    /// Bumped, under the state lock, whenever a remote read supplies a valid
    /// value.
    remote_updates: AtomicU64,
    limiter: Mutex<RateLimiter>,
    callbacks: CallbackRegistry,
}

impl<P: Protocol> AccessoryCore<P> {
    pub(crate) fn new(
        client: Arc<P>,
        information: AccessoryInformation,
        min_control_interval: Duration,
    ) -> Self {
        Self {
            client,
            information,
            state: RwLock::new(DeviceState::new()),
            remote_updates: AtomicU64::new(0),
            limiter: Mutex::new(RateLimiter::new(min_control_interval)),
            callbacks: CallbackRegistry::new(),
        }
    }

    pub(crate) fn information(&self) -> &AccessoryInformation {
        &self.information
    }

    pub(crate) fn device_id(&self) -> &str {
        self.information.device_id()
    }

    pub(crate) fn category(&self) -> Category {
        self.information.category()
    }

    pub(crate) fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    /// Returns a copy of the cached state.
    pub(crate) fn state(&self) -> DeviceState {
        self.state.read().clone()
    }

    /// Applies a local change to the cache.
    pub(crate) fn apply(&self, change: &StateChange) -> bool {
        self.state.write().apply(change)
    }

    /// Folds a remote snapshot into the cache.
    pub(crate) fn apply_snapshot(&self, snapshot: &DeviceSnapshot) -> bool {
        let mut state = self.state.write();
        let (changed, accepted) = state.fold_snapshot(snapshot);
        if accepted > 0 {
            self.remote_updates.fetch_add(1, Ordering::SeqCst);
        }
        changed
    }

    /// Folds a raw `POWER` value into the cache, ignoring invalid values.
    pub(crate) fn apply_power(&self, raw: &str) {
        let mut state = self.state.write();
        match state.apply_power(raw) {
            Ok(_) => {
                self.remote_updates.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                tracing::trace!(device_id = %self.device_id(), error = %e, "Skipping power value");
            }
        }
    }

    /// Counts the remote reads folded into the cache so far.
    pub(crate) fn remote_updates(&self) -> u64 {
        self.remote_updates.load(Ordering::SeqCst)
    }

    /// Undoes an optimistic change after a failed control request.
    ///
    /// Nothing is restored if a remote read landed after `since` or if the
    /// cache no longer holds `optimistic`.
    pub(crate) fn revert(
        &self,
        since: u64,
        optimistic: &StateChange,
        previous: &StateChange,
    ) -> bool {
        let mut state = self.state.write();
        if self.remote_updates.load(Ordering::SeqCst) != since || !state.holds(optimistic) {
            tracing::debug!(device_id = %self.device_id(), "Cache moved on, keeping it");
            return false;
        }
        state.apply(previous);
        true
    }

    /// Returns `true` if a control request may be sent now.
    pub(crate) fn allow_control(&self) -> bool {
        self.limiter.lock().allow()
    }

    /// Reads this accessory's category and extracts its own device.
    ///
    /// `Ok(None)` means the listing did not contain the device.
    pub(crate) async fn read(&self) -> Result<Option<DeviceSnapshot>, ProtocolError> {
        let listing = self.client.list_devices(self.category()).await?;
        let snapshot = listing.snapshot(self.device_id());
        if snapshot.is_none() {
            tracing::debug!(
                device_id = %self.device_id(),
                category = %self.category(),
                "Device not found in listing"
            );
        }
        Ok(snapshot)
    }

    /// Sends a control request. Returns `true` if the remote accepted it.
    pub(crate) async fn send(&self, request: &ControlRequest) -> bool {
        match self.client.control_device(request).await {
            Ok(response) => {
                tracing::info!(
                    device_id = %self.device_id(),
                    category = %self.category(),
                    body = %response.body(),
                    "Control request accepted"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    device_id = %self.device_id(),
                    category = %self.category(),
                    error = %e,
                    "Control request failed"
                );
                false
            }
        }
    }

    /// Pushes one update to the UI layer.
    pub(crate) fn notify(&self, characteristic: Characteristic, value: CharacteristicValue) {
        self.callbacks.dispatch(characteristic, value);
    }
}

impl<P: Protocol> std::fmt::Debug for AccessoryCore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessoryCore")
            .field("information", &self.information)
            .field("state", &*self.state.read())
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
