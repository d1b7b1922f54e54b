// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power state of a light or heating unit.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Represents the `POWER` attribute of a device.
///
/// Parsing is strict: only the exact strings `"ON"` and `"OFF"` are accepted.
/// The API reports `"-"` while a device is transitioning, which must not be
/// mistaken for either state.
///
/// # Examples
///
/// ```
/// use smartprugio_lib::types::PowerState;
///
/// assert_eq!("ON".parse::<PowerState>().unwrap(), PowerState::On);
/// assert!("-".parse::<PowerState>().is_err());
/// assert!("on".parse::<PowerState>().is_err());
/// assert_eq!(PowerState::from(false).as_str(), "OFF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    /// Power is off.
    Off,
    /// Power is on.
    On,
}

impl PowerState {
    /// Returns the API string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns `true` for [`PowerState::On`].
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            _ => Err(ValueError::InvalidPowerState(s.to_string())),
        }
    }
}

impl From<bool> for PowerState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<PowerState> for bool {
    fn from(value: PowerState) -> Self {
        value.is_on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_state_as_str() {
        assert_eq!(PowerState::Off.as_str(), "OFF");
        assert_eq!(PowerState::On.as_str(), "ON");
    }

    #[test]
    fn power_state_parses_exact_strings_only() {
        assert_eq!("ON".parse::<PowerState>().unwrap(), PowerState::On);
        assert_eq!("OFF".parse::<PowerState>().unwrap(), PowerState::Off);

        for raw in ["-", "", "on", "Off", "1", "TRUE", " ON"] {
            let result = raw.parse::<PowerState>();
            assert!(
                matches!(result, Err(ValueError::InvalidPowerState(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn power_state_bool_conversions() {
        assert_eq!(PowerState::from(true), PowerState::On);
        assert_eq!(PowerState::from(false), PowerState::Off);
        assert!(bool::from(PowerState::On));
        assert!(!bool::from(PowerState::Off));
    }
}
