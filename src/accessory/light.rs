// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light accessory.

use std::sync::Arc;
use std::time::Duration;

use crate::command::ControlRequest;
use crate::error::{DeviceError, Error, ProtocolError, ValueError};
use crate::protocol::Protocol;
use crate::scheduler::TaskScheduler;
use crate::state::{DeviceState, StateChange};
use crate::subscription::{Subscribable, SubscriptionId};
use crate::types::{AttributeCode, Category, PowerState};

use super::builder::{AccessoryBuilder, AccessoryParts};
use super::shared::AccessoryCore;
use super::{Accessory, AccessoryInformation, Characteristic, CharacteristicValue};

/// A light exposing a single `On` characteristic.
///
/// Reads always return a value: the remote one when the listing can be
/// fetched, the cached one otherwise. A successful read also pushes `On` to
/// the subscribers, so an independent UI display follows along.
///
/// Writes are rate limited. A write rejected by the limiter only updates the
/// cache; an accepted one is sent to the remote and followed by a delayed
/// reconciliation.
///
/// Dropping the light aborts its polling and pending reconciliations.
pub struct LightAccessory<P: Protocol> {
    core: Arc<AccessoryCore<P>>,
    tasks: TaskScheduler,
    reconcile_delay: Duration,
}

impl<P: Protocol> LightAccessory<P> {
    const CHARACTERISTICS: &'static [Characteristic] = &[Characteristic::On];

    /// Creates a builder for a light controlled through `client`.
    #[must_use]
    pub fn builder(client: Arc<P>, device_id: impl Into<String>) -> AccessoryBuilder<P, Self> {
        AccessoryBuilder::new(client, device_id)
    }

    pub(crate) fn from_parts(parts: AccessoryParts<P>) -> Self {
        let AccessoryParts {
            core,
            tasks,
            polling,
            reconcile_delay,
        } = parts;

        let polled = Arc::clone(&core);
        polling.start(&tasks, move || {
            let core = Arc::clone(&polled);
            async move { Self::reconcile_core(&core).await }
        });

        Self {
            core,
            tasks,
            reconcile_delay,
        }
    }

    /// Returns the identification shown by the UI layer.
    #[must_use]
    pub fn information(&self) -> &AccessoryInformation {
        self.core.information()
    }

    /// Returns a copy of the cached state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.core.state()
    }

    /// Returns the cached power state without contacting the remote.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.core.state().is_on()
    }

    /// Reads the power state from the remote, falling back to the cache.
    pub async fn get_on(&self) -> bool {
        if let Err(e) = Self::refresh(&self.core).await {
            tracing::warn!(
                device_id = %self.core.device_id(),
                error = %e,
                "Failed to read light, returning cached value"
            );
        }
        self.is_on()
    }

    /// Switches the light.
    pub async fn set_on(&self, on: bool) {
        let power = PowerState::from(on);

        if !self.core.allow_control() {
            tracing::debug!(
                device_id = %self.core.device_id(),
                %power,
                "Control rate limited, updating cache only"
            );
            self.core.apply(&StateChange::Power(power));
            return;
        }

        let since = self.core.remote_updates();
        let previous = StateChange::Power(self.core.state().power());
        let optimistic = StateChange::Power(power);
        self.core.apply(&optimistic);

        let request = ControlRequest::new(Category::Lights, self.core.device_id()).power(power);
        if !self.core.send(&request).await {
            self.core.revert(since, &optimistic, &previous);
        }

        self.schedule_reconcile();
    }

    /// Runs one reconciliation now.
    pub async fn reconcile(&self) {
        Self::reconcile_core(&self.core).await;
    }

    fn schedule_reconcile(&self) {
        let core = Arc::clone(&self.core);
        self.tasks
            .run_once_after(self.reconcile_delay, async move {
                Self::reconcile_core(&core).await;
            });
    }

    async fn reconcile_core(core: &AccessoryCore<P>) {
        if let Err(e) = Self::refresh(core).await {
            tracing::debug!(device_id = %core.device_id(), error = %e, "Reconcile failed");
        }
    }

    /// Reads the listing, folds `POWER` into the cache and pushes `On`.
    async fn refresh(core: &AccessoryCore<P>) -> Result<(), ProtocolError> {
        let Some(snapshot) = core.read().await? else {
            return Ok(());
        };
        if let Some(raw) = snapshot.get(AttributeCode::Power) {
            core.apply_power(raw);
        }
        core.notify(Characteristic::On, core.state().is_on().into());
        Ok(())
    }
}

impl<P: Protocol> Accessory for LightAccessory<P> {
    fn information(&self) -> &AccessoryInformation {
        self.core.information()
    }

    fn characteristics(&self) -> &'static [Characteristic] {
        Self::CHARACTERISTICS
    }

    async fn handle_get(&self, characteristic: Characteristic) -> Result<CharacteristicValue, Error> {
        match characteristic {
            Characteristic::On => Ok(self.get_on().await.into()),
            other => Err(DeviceError::UnsupportedCharacteristic(other).into()),
        }
    }

    async fn handle_set(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<(), Error> {
        match characteristic {
            Characteristic::On => {
                let on = value
                    .as_bool()
                    .ok_or_else(|| ValueError::InvalidCharacteristicValue {
                        characteristic,
                        value: value.to_string(),
                    })?;
                self.set_on(on).await;
                Ok(())
            }
            other => Err(DeviceError::UnsupportedCharacteristic(other).into()),
        }
    }

    async fn reconcile(&self) {
        Self::reconcile_core(&self.core).await;
    }
}

impl<P: Protocol> Subscribable for LightAccessory<P> {
    fn on_characteristic_updated<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Characteristic, CharacteristicValue) + Send + Sync + 'static,
    {
        self.core.callbacks().on_characteristic_updated(callback)
    }

    fn on_updated<F>(&self, characteristic: Characteristic, callback: F) -> SubscriptionId
    where
        F: Fn(CharacteristicValue) + Send + Sync + 'static,
    {
        self.core.callbacks().on_updated(characteristic, callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.core.callbacks().unsubscribe(id)
    }
}

impl<P: Protocol> std::fmt::Debug for LightAccessory<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightAccessory")
            .field("core", &self.core)
            .field("tasks", &self.tasks)
            .finish_non_exhaustive()
    }
}
