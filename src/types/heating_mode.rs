// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat mode types.
//!
//! The heating unit only knows on and off. The UI layer's thermostat service
//! additionally offers cooling and automatic modes; those are accepted as
//! input and normalized to heating.

use std::fmt;

use crate::error::ValueError;

/// Target heating/cooling mode as selected in the UI.
///
/// Numeric codes follow the accessory protocol: `0` off, `1` heat,
/// `2` cool, `3` auto.
///
/// # Examples
///
/// ```
/// use smartprugio_lib::types::TargetHeatingMode;
///
/// let mode = TargetHeatingMode::from_num(2).unwrap();
/// assert_eq!(mode, TargetHeatingMode::Cool);
/// assert_eq!(mode.normalized(), TargetHeatingMode::Heat);
/// assert_eq!(TargetHeatingMode::Off.normalized(), TargetHeatingMode::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetHeatingMode {
    /// Heating off.
    Off,
    /// Heating on.
    Heat,
    /// Cooling requested (unsupported by the hardware).
    Cool,
    /// Automatic mode requested (unsupported by the hardware).
    Auto,
}

impl TargetHeatingMode {
    /// Creates a mode from its numeric code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHeatingMode` for codes above 3.
    pub fn from_num(code: u8) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Off),
            1 => Ok(Self::Heat),
            2 => Ok(Self::Cool),
            3 => Ok(Self::Auto),
            other => Err(ValueError::InvalidHeatingMode(other)),
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Heat => 1,
            Self::Cool => 2,
            Self::Auto => 3,
        }
    }

    /// Maps the mode onto what the hardware can do: anything but off heats.
    #[must_use]
    pub const fn normalized(&self) -> Self {
        match self {
            Self::Off => Self::Off,
            Self::Heat | Self::Cool | Self::Auto => Self::Heat,
        }
    }

    /// Returns `true` if the mode turns the heater on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl From<bool> for TargetHeatingMode {
    fn from(active: bool) -> Self {
        if active { Self::Heat } else { Self::Off }
    }
}

impl fmt::Display for TargetHeatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "OFF",
            Self::Heat => "HEAT",
            Self::Cool => "COOL",
            Self::Auto => "AUTO",
        };
        f.write_str(name)
    }
}

/// Current heating state reported to the UI.
///
/// Derived from the cached power flag; the unit never cools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrentHeatingMode {
    /// Not heating.
    Off,
    /// Heating.
    Heat,
}

impl CurrentHeatingMode {
    /// Returns the numeric code.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Heat => 1,
        }
    }
}

impl From<bool> for CurrentHeatingMode {
    fn from(active: bool) -> Self {
        if active { Self::Heat } else { Self::Off }
    }
}

impl fmt::Display for CurrentHeatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "OFF",
            Self::Heat => "HEAT",
        })
    }
}

/// Thermostat active flag (`0` inactive, `1` active).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Active {
    /// Heater off.
    Inactive,
    /// Heater on.
    Active,
}

impl Active {
    /// Returns the numeric code.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Inactive => 0,
            Self::Active => 1,
        }
    }

    /// Interprets a numeric code; only `1` means active.
    #[must_use]
    pub const fn from_num(code: u8) -> Self {
        if code == 1 { Self::Active } else { Self::Inactive }
    }

    /// Returns `true` for [`Active::Active`].
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<bool> for Active {
    fn from(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_mode_codes_round_trip() {
        for code in 0..=3 {
            assert_eq!(TargetHeatingMode::from_num(code).unwrap().as_num(), code);
        }
        assert!(matches!(
            TargetHeatingMode::from_num(4),
            Err(ValueError::InvalidHeatingMode(4))
        ));
    }

    #[test]
    fn cool_and_auto_normalize_to_heat() {
        assert_eq!(TargetHeatingMode::Cool.normalized(), TargetHeatingMode::Heat);
        assert_eq!(TargetHeatingMode::Auto.normalized(), TargetHeatingMode::Heat);
        assert_eq!(TargetHeatingMode::Heat.normalized(), TargetHeatingMode::Heat);
        assert_eq!(TargetHeatingMode::Off.normalized(), TargetHeatingMode::Off);
        assert!(TargetHeatingMode::Cool.is_on());
        assert!(!TargetHeatingMode::Off.is_on());
    }

    #[test]
    fn modes_derive_from_active_flag() {
        assert_eq!(TargetHeatingMode::from(true), TargetHeatingMode::Heat);
        assert_eq!(CurrentHeatingMode::from(false), CurrentHeatingMode::Off);
        assert_eq!(CurrentHeatingMode::Heat.as_num(), 1);
    }

    #[test]
    fn active_from_num() {
        assert_eq!(Active::from_num(1), Active::Active);
        assert_eq!(Active::from_num(0), Active::Inactive);
        assert_eq!(Active::from_num(7), Active::Inactive);
        assert_eq!(Active::from(true).as_num(), 1);
    }
}
