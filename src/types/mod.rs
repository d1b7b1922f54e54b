// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for `SmartPrugio` device control.
//!
//! This module provides type-safe representations of the values exchanged
//! with the remote API and the accessory UI layer. Each constrained type
//! validates at construction time, so a cached value is always in range.
//!
//! # Types
//!
//! - [`Category`] - Remote device grouping (`LIGHTS` or `HEATING`)
//! - [`AttributeCode`] - Remote attribute vocabulary (`POWER`, `HTEMPERATURE`, `CTEMPERATURE`)
//! - [`PowerState`] - `ON`/`OFF` power attribute
//! - [`TargetTemperature`] - Heating set point (5-40 °C)
//! - [`CurrentTemperature`] - Measured temperature (strictly positive)
//! - [`TargetHeatingMode`] / [`CurrentHeatingMode`] - Thermostat modes
//! - [`Active`] - Thermostat active flag

mod attribute;
mod heating_mode;
mod power;
mod temperature;

pub use attribute::{AttributeCode, Category};
pub use heating_mode::{Active, CurrentHeatingMode, TargetHeatingMode};
pub use power::PowerState;
pub use temperature::{CurrentTemperature, TargetTemperature};
