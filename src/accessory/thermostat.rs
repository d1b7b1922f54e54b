// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat accessory for the heating unit.

use std::sync::Arc;
use std::time::Duration;

use crate::command::ControlRequest;
use crate::error::{DeviceError, Error, ProtocolError, ValueError};
use crate::protocol::Protocol;
use crate::scheduler::TaskScheduler;
use crate::state::{DeviceState, StateChange};
use crate::subscription::{Subscribable, SubscriptionId};
use crate::types::{
    Active, Category, CurrentHeatingMode, CurrentTemperature, PowerState, TargetHeatingMode,
    TargetTemperature,
};

use super::builder::{AccessoryBuilder, AccessoryParts};
use super::shared::AccessoryCore;
use super::{Accessory, AccessoryInformation, Characteristic, CharacteristicValue};

/// A heating unit exposed as a thermostat.
///
/// The unit itself only knows power and a set point; it reports a measured
/// temperature. Heating modes are derived from power: `Heat` when on, `Off`
/// otherwise. Cooling and automatic modes are accepted from the UI layer and
/// turned into `Heat`.
///
/// Every temperature or power read fetches the whole heating listing and
/// refreshes all three cached fields at once.
///
/// Dropping the thermostat aborts its polling and pending reconciliations.
pub struct ThermostatAccessory<P: Protocol> {
    core: Arc<AccessoryCore<P>>,
    tasks: TaskScheduler,
    reconcile_delay: Duration,
}

impl<P: Protocol> ThermostatAccessory<P> {
    const CHARACTERISTICS: &'static [Characteristic] = &[
        Characteristic::CurrentTemperature,
        Characteristic::TargetTemperature,
        Characteristic::Active,
        Characteristic::TargetHeatingCoolingState,
        Characteristic::CurrentHeatingCoolingState,
    ];

    /// Creates a builder for a thermostat controlled through `client`.
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

    // ========== Temperatures and power ==========

    /// Reads the measured temperature, falling back to the cache.
    pub async fn get_current_temperature(&self) -> CurrentTemperature {
        self.refresh_or_warn(Characteristic::CurrentTemperature)
            .await
            .current_temperature()
    }

    /// Reads the set point, falling back to the cache.
    pub async fn get_target_temperature(&self) -> TargetTemperature {
        self.refresh_or_warn(Characteristic::TargetTemperature)
            .await
            .target_temperature()
    }

    /// Reads the power state, falling back to the cache.
    pub async fn get_active(&self) -> Active {
        Active::from(self.refresh_or_warn(Characteristic::Active).await.is_on())
    }

    /// Sets the set point, rounded to the nearest degree.
    ///
    /// Setting a temperature also switches the heater on; both go out in a
    /// single control request.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the rounded value is not a number within
    /// `[5, 40]`. Nothing is cached or sent in that case.
    pub async fn set_target_temperature(&self, value: f64) -> Result<(), ValueError> {
        let temperature = TargetTemperature::from_setpoint(value)?;
        let since = self.core.remote_updates();
        let previous = self.core.state();
        let optimistic = StateChange::Batch(vec![
            StateChange::TargetTemperature(temperature),
            StateChange::power_on(),
        ]);
        self.core.apply(&optimistic);

        if !self.core.allow_control() {
            tracing::debug!(
                device_id = %self.core.device_id(),
                %temperature,
                "Control rate limited, updating cache only"
            );
            return Ok(());
        }

        let request = ControlRequest::new(Category::Heating, self.core.device_id())
            .power(PowerState::On)
            .heating_temperature(temperature);
        if !self.core.send(&request).await {
            self.core.revert(
                since,
                &optimistic,
                &StateChange::Batch(vec![
                    StateChange::TargetTemperature(previous.target_temperature()),
                    StateChange::Power(previous.power()),
                ]),
            );
        }

        self.schedule_reconcile();
        Ok(())
    }

    /// Switches the heater. Switching on also shows `Heat` as target mode.
    pub async fn set_active(&self, active: bool) {
        let power = PowerState::from(active);
        let since = self.core.remote_updates();
        let previous = StateChange::Power(self.core.state().power());
        let optimistic = StateChange::Power(power);
        self.core.apply(&optimistic);

        if active {
            self.core.notify(
                Characteristic::TargetHeatingCoolingState,
                TargetHeatingMode::Heat.into(),
            );
        }

        if !self.core.allow_control() {
            tracing::debug!(
                device_id = %self.core.device_id(),
                %power,
                "Control rate limited, updating cache only"
            );
            return;
        }

        let request = ControlRequest::new(Category::Heating, self.core.device_id()).power(power);
        if !self.core.send(&request).await {
            self.core.revert(since, &optimistic, &previous);
            if active {
                // Heat was shown ahead of the write
                let on = self.core.state().is_on();
                self.core.callbacks().dispatch_all([
                    (Characteristic::Active, Active::from(on).into()),
                    (
                        Characteristic::TargetHeatingCoolingState,
                        TargetHeatingMode::from(on).into(),
                    ),
                ]);
            }
        }

        self.schedule_reconcile();
    }

    // ========== Modes ==========

    /// Returns the target mode derived from the cached power state.
    #[must_use]
    pub fn target_mode(&self) -> TargetHeatingMode {
        TargetHeatingMode::from(self.core.state().is_on())
    }

    /// Returns the current mode derived from the cached power state.
    #[must_use]
    pub fn current_mode(&self) -> CurrentHeatingMode {
        CurrentHeatingMode::from(self.core.state().is_on())
    }

    /// Applies a target mode. `Off` switches the heater off; any other mode
    /// switches it on and is shown as `Heat`.
    pub async fn set_target_mode(&self, mode: TargetHeatingMode) {
        match mode.normalized() {
            TargetHeatingMode::Off => self.set_active(false).await,
            _ => {
                self.set_active(true).await;
                self.core.notify(
                    Characteristic::TargetHeatingCoolingState,
                    self.target_mode().into(),
                );
            }
        }
    }

    // ========== Reconciliation ==========

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

    async fn refresh_or_warn(&self, characteristic: Characteristic) -> DeviceState {
        if let Err(e) = Self::refresh(&self.core).await {
            tracing::warn!(
                device_id = %self.core.device_id(),
                %characteristic,
                error = %e,
                "Failed to read heating unit, returning cached value"
            );
        }
        self.core.state()
    }

    async fn reconcile_core(core: &AccessoryCore<P>) {
        match Self::refresh(core).await {
            Ok(true) => Self::push_all(core),
            Ok(false) => {}
            Err(e) => {
                tracing::debug!(device_id = %core.device_id(), error = %e, "Reconcile failed");
            }
        }
    }

    /// Folds the device's attributes into the cache. Returns whether the
    /// device was found.
    async fn refresh(core: &AccessoryCore<P>) -> Result<bool, ProtocolError> {
        let Some(snapshot) = core.read().await? else {
            return Ok(false);
        };
        core.apply_snapshot(&snapshot);
        Ok(true)
    }

    fn push_all(core: &AccessoryCore<P>) {
        let state = core.state();
        let on = state.is_on();
        core.callbacks().dispatch_all([
            (
                Characteristic::CurrentTemperature,
                state.current_temperature().value().into(),
            ),
            (
                Characteristic::TargetTemperature,
                state.target_temperature().value().into(),
            ),
            (Characteristic::Active, Active::from(on).into()),
            (
                Characteristic::CurrentHeatingCoolingState,
                CurrentHeatingMode::from(on).into(),
            ),
            (
                Characteristic::TargetHeatingCoolingState,
                TargetHeatingMode::from(on).into(),
            ),
        ]);
    }
}

impl<P: Protocol> Accessory for ThermostatAccessory<P> {
    fn information(&self) -> &AccessoryInformation {
        self.core.information()
    }

    fn characteristics(&self) -> &'static [Characteristic] {
        Self::CHARACTERISTICS
    }

    async fn handle_get(&self, characteristic: Characteristic) -> Result<CharacteristicValue, Error> {
        let value = match characteristic {
            Characteristic::CurrentTemperature => {
                self.get_current_temperature().await.value().into()
            }
            Characteristic::TargetTemperature => {
                self.get_target_temperature().await.value().into()
            }
            Characteristic::Active => self.get_active().await.into(),
            Characteristic::TargetHeatingCoolingState => self.target_mode().into(),
            Characteristic::CurrentHeatingCoolingState => self.current_mode().into(),
            Characteristic::On => {
                return Err(DeviceError::UnsupportedCharacteristic(characteristic).into());
            }
        };
        Ok(value)
    }

    async fn handle_set(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<(), Error> {
        let invalid = || ValueError::InvalidCharacteristicValue {
            characteristic,
            value: value.to_string(),
        };

        match characteristic {
            Characteristic::TargetTemperature => {
                let setpoint = value.as_f64().ok_or_else(invalid)?;
                self.set_target_temperature(setpoint).await?;
            }
            Characteristic::Active => {
                let active = value.as_bool().ok_or_else(invalid)?;
                self.set_active(active).await;
            }
            Characteristic::TargetHeatingCoolingState => {
                let mode = TargetHeatingMode::from_num(value.as_u8().ok_or_else(invalid)?)?;
                self.set_target_mode(mode).await;
            }
            Characteristic::CurrentTemperature | Characteristic::CurrentHeatingCoolingState => {
                return Err(DeviceError::ReadOnly(characteristic).into());
            }
            Characteristic::On => {
                return Err(DeviceError::UnsupportedCharacteristic(characteristic).into());
            }
        }
        Ok(())
    }

    async fn reconcile(&self) {
        Self::reconcile_core(&self.core).await;
    }
}

impl<P: Protocol> Subscribable for ThermostatAccessory<P> {
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

impl<P: Protocol> std::fmt::Debug for ThermostatAccessory<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThermostatAccessory")
            .field("core", &self.core)
            .field("tasks", &self.tasks)
            .finish_non_exhaustive()
    }
}
