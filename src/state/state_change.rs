// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes are typed, already-validated updates applied to a
//! [`DeviceState`](super::DeviceState). Accessories use them for optimistic
//! writes: the cache reflects the user's intent immediately, and a later
//! reconciliation replaces it with whatever the remote reports.

use crate::types::{CurrentTemperature, PowerState, TargetTemperature};

/// Represents a change in cached device state.
///
/// # Examples
///
/// ```
/// use smartprugio_lib::state::StateChange;
/// use smartprugio_lib::types::{PowerState, TargetTemperature};
///
/// let change = StateChange::Batch(vec![
///     StateChange::power_on(),
///     StateChange::TargetTemperature(TargetTemperature::new(23.0).unwrap()),
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// Power switched.
    Power(PowerState),

    /// Heating set point changed.
    TargetTemperature(TargetTemperature),

    /// Measured temperature changed.
    CurrentTemperature(CurrentTemperature),

    /// Multiple changes applied together.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Creates a power change.
    #[must_use]
    pub fn power(state: PowerState) -> Self {
        Self::Power(state)
    }

    /// Creates a power-on change.
    #[must_use]
    pub fn power_on() -> Self {
        Self::Power(PowerState::On)
    }

    /// Creates a power-off change.
    #[must_use]
    pub fn power_off() -> Self {
        Self::Power(PowerState::Off)
    }
}

impl From<PowerState> for StateChange {
    fn from(state: PowerState) -> Self {
        Self::Power(state)
    }
}

impl From<TargetTemperature> for StateChange {
    fn from(temperature: TargetTemperature) -> Self {
        Self::TargetTemperature(temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(StateChange::power_on(), StateChange::Power(PowerState::On));
        assert_eq!(StateChange::power_off(), StateChange::Power(PowerState::Off));
        assert_eq!(
            StateChange::from(PowerState::On),
            StateChange::power(PowerState::On)
        );
    }
}
