// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use crate::error::ValueError;
use crate::response::DeviceSnapshot;
use crate::types::{AttributeCode, CurrentTemperature, PowerState, TargetTemperature};

use super::StateChange;

/// Last known state of one device.
///
/// Every field always holds a usable value: the cache starts from
/// conservative defaults (off, 20 °C measured, 22 °C set point) and is only
/// ever overwritten by a validated remote value or an optimistic local write.
/// Invalid input never resets a field.
///
/// The temperature fields are only meaningful for heating units; lights
/// never touch them.
///
/// # Examples
///
/// ```
/// use smartprugio_lib::state::DeviceState;
///
/// let mut state = DeviceState::new();
/// state.apply_target_temperature("25").unwrap();
/// assert_eq!(state.target_temperature().value(), 25.0);
///
/// // Out of range, ignored
/// assert!(state.apply_target_temperature("50").is_err());
/// assert_eq!(state.target_temperature().value(), 25.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceState {
    /// Power switch.
    power: PowerState,
    /// Heating set point.
    target_temperature: TargetTemperature,
    /// Measured temperature.
    current_temperature: CurrentTemperature,
}

impl DeviceState {
    /// Creates a state holding the default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            power: PowerState::Off,
            target_temperature: TargetTemperature::DEFAULT,
            current_temperature: CurrentTemperature::DEFAULT,
        }
    }

    // ========== Accessors ==========

    /// Returns the cached power state.
    #[must_use]
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Returns `true` if the device is cached as on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power.is_on()
    }

    /// Returns the cached set point.
    #[must_use]
    pub fn target_temperature(&self) -> TargetTemperature {
        self.target_temperature
    }

    /// Returns the cached measured temperature.
    #[must_use]
    pub fn current_temperature(&self) -> CurrentTemperature {
        self.current_temperature
    }

    // ========== Remote values ==========

    /// Folds a raw `POWER` attribute into the cache.
    ///
    /// Only the exact strings `"ON"` and `"OFF"` are accepted.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidPowerState` for anything else, leaving the
    /// cache unchanged.
    pub fn apply_power(&mut self, raw: &str) -> Result<bool, ValueError> {
        let state = raw.parse::<PowerState>()?;
        Ok(self.apply(&StateChange::Power(state)))
    }

    /// Folds a raw `HTEMPERATURE` attribute into the cache.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the value is not a number within `[5, 40]`,
    /// leaving the cache unchanged.
    pub fn apply_target_temperature(&mut self, raw: &str) -> Result<bool, ValueError> {
        let temperature = TargetTemperature::parse(raw)?;
        Ok(self.apply(&StateChange::TargetTemperature(temperature)))
    }

    /// Folds a raw `CTEMPERATURE` attribute into the cache.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the value is not a positive number, leaving the
    /// cache unchanged.
    pub fn apply_current_temperature(&mut self, raw: &str) -> Result<bool, ValueError> {
        let temperature = CurrentTemperature::parse(raw)?;
        Ok(self.apply(&StateChange::CurrentTemperature(temperature)))
    }

    /// Folds every attribute of a snapshot into the cache.
    ///
    /// Missing or invalid attributes are skipped; the remote routinely reports
    /// placeholders such as `"-"` while a device is switching.
    ///
    /// Returns `true` if any field changed.
    pub fn apply_snapshot(&mut self, snapshot: &DeviceSnapshot) -> bool {
        self.fold_snapshot(snapshot).0
    }

    /// Like [`apply_snapshot`](Self::apply_snapshot), also returning how many
    /// attributes were valid, whether or not they changed anything.
    pub(crate) fn fold_snapshot(&mut self, snapshot: &DeviceSnapshot) -> (bool, usize) {
        let mut changed = false;
        let mut accepted = 0;

        let fields: [(AttributeCode, fn(&mut Self, &str) -> Result<bool, ValueError>); 3] = [
            (AttributeCode::Power, Self::apply_power),
            (AttributeCode::HeatingTemperature, Self::apply_target_temperature),
            (AttributeCode::CurrentTemperature, Self::apply_current_temperature),
        ];

        for (code, apply) in fields {
            let Some(raw) = snapshot.get(code) else {
                continue;
            };
            match apply(self, raw) {
                Ok(field_changed) => {
                    changed |= field_changed;
                    accepted += 1;
                }
                Err(e) => tracing::trace!(
                    device_id = %snapshot.device_id(),
                    attribute = %code,
                    error = %e,
                    "Skipping attribute value"
                ),
            }
        }

        (changed, accepted)
    }

    // ========== State Changes ==========

    /// Returns `true` if every field named by `change` currently holds the
    /// value it carries.
    #[must_use]
    pub fn holds(&self, change: &StateChange) -> bool {
        match change {
            StateChange::Power(state) => self.power == *state,
            StateChange::TargetTemperature(temperature) => {
                self.target_temperature == *temperature
            }
            StateChange::CurrentTemperature(temperature) => {
                self.current_temperature == *temperature
            }
            StateChange::Batch(changes) => changes.iter().all(|c| self.holds(c)),
        }
    }

    /// Applies a typed change, typically an optimistic local write.
    ///
    /// Returns `true` if the state was modified, `false` if it was already
    /// at the target value.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Power(state) => {
                if self.power == *state {
                    false
                } else {
                    self.power = *state;
                    true
                }
            }
            StateChange::TargetTemperature(temperature) => {
                if self.target_temperature == *temperature {
                    false
                } else {
                    self.target_temperature = *temperature;
                    true
                }
            }
            StateChange::CurrentTemperature(temperature) => {
                if self.current_temperature == *temperature {
                    false
                } else {
                    self.current_temperature = *temperature;
                    true
                }
            }
            StateChange::Batch(changes) => {
                let mut any_changed = false;
                for c in changes {
                    if self.apply(c) {
                        any_changed = true;
                    }
                }
                any_changed
            }
        }
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}
