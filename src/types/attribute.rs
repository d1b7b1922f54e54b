// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote API vocabulary: device categories and attribute codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Remote grouping of device types.
///
/// Every list and control request is scoped to one category.
///
/// # Examples
///
/// ```
/// use smartprugio_lib::types::Category;
///
/// assert_eq!(Category::Lights.as_str(), "LIGHTS");
/// assert_eq!(Category::Heating.to_string(), "HEATING");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Light switches.
    Lights,
    /// Boiler / floor heating units.
    Heating,
}

impl Category {
    /// Returns the wire representation used in `ctl_tp_cd` and `device_tp_cd`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lights => "LIGHTS",
            Self::Heating => "HEATING",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute codes understood by the remote API.
///
/// Attribute values are always transported as strings and interpreted per
/// code: `POWER` is `"ON"`, `"OFF"` or `"-"`, the temperatures are numeric
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeCode {
    /// Power switch.
    #[serde(rename = "POWER")]
    Power,
    /// Heating (target) temperature.
    #[serde(rename = "HTEMPERATURE")]
    HeatingTemperature,
    /// Current (measured) temperature.
    #[serde(rename = "CTEMPERATURE")]
    CurrentTemperature,
}

impl AttributeCode {
    /// Returns the wire representation used in `device_attr_cd`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "POWER",
            Self::HeatingTemperature => "HTEMPERATURE",
            Self::CurrentTemperature => "CTEMPERATURE",
        }
    }
}

impl fmt::Display for AttributeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
