// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic names and values exchanged with the UI layer.

use std::fmt;

use crate::types::{Active, CurrentHeatingMode, TargetHeatingMode, TargetTemperature};

/// A UI-visible property of an accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Light power switch.
    On,
    /// Measured temperature (read-only).
    CurrentTemperature,
    /// Heating set point.
    TargetTemperature,
    /// Heater power switch.
    Active,
    /// Requested heating mode.
    TargetHeatingCoolingState,
    /// Reported heating mode (read-only).
    CurrentHeatingCoolingState,
}

impl Characteristic {
    /// Returns the characteristic's name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "On",
            Self::CurrentTemperature => "CurrentTemperature",
            Self::TargetTemperature => "TargetTemperature",
            Self::Active => "Active",
            Self::TargetHeatingCoolingState => "TargetHeatingCoolingState",
            Self::CurrentHeatingCoolingState => "CurrentHeatingCoolingState",
        }
    }

    /// Returns `true` if the UI layer may write this characteristic.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        !matches!(
            self,
            Self::CurrentTemperature | Self::CurrentHeatingCoolingState
        )
    }

    /// Returns the numeric bounds advertised to the UI layer, if any.
    #[must_use]
    pub const fn props(&self) -> Option<CharacteristicProps> {
        match self {
            Self::TargetTemperature => Some(CharacteristicProps {
                min: TargetTemperature::MIN,
                max: TargetTemperature::MAX,
                step: TargetTemperature::STEP,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric bounds of a characteristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicProps {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Step between values.
    pub step: f64,
}

/// A characteristic value as the UI layer sees it.
///
/// Booleans carry power switches, floats carry temperatures and small
/// unsigned integers carry `Active` and heating mode codes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacteristicValue {
    /// A boolean.
    Bool(bool),
    /// A number.
    Float(f64),
    /// An enumerated code.
    UInt(u8),
}

impl CharacteristicValue {
    /// Reads the value as a boolean. Codes `0` and `1` are accepted.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(b) => Some(b),
            Self::UInt(0) => Some(false),
            Self::UInt(1) => Some(true),
            Self::UInt(_) | Self::Float(_) => None,
        }
    }

    /// Reads the value as a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v),
            Self::UInt(v) => Some(f64::from(v)),
            Self::Bool(_) => None,
        }
    }

    /// Reads the value as an enumerated code.
    #[must_use]
    pub fn as_u8(&self) -> Option<u8> {
        match *self {
            Self::UInt(v) => Some(v),
            Self::Bool(b) => Some(u8::from(b)),
            Self::Float(_) => None,
        }
    }
}

impl fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for CharacteristicValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for CharacteristicValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<u8> for CharacteristicValue {
    fn from(value: u8) -> Self {
        Self::UInt(value)
    }
}

impl From<Active> for CharacteristicValue {
    fn from(value: Active) -> Self {
        Self::UInt(value.as_num())
    }
}

impl From<TargetHeatingMode> for CharacteristicValue {
    fn from(value: TargetHeatingMode) -> Self {
        Self::UInt(value.as_num())
    }
}

impl From<CurrentHeatingMode> for CharacteristicValue {
    fn from(value: CurrentHeatingMode) -> Self {
        Self::UInt(value.as_num())
    }
}
