// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device control request body.

use serde::Serialize;

use crate::types::{AttributeCode, Category, PowerState, TargetTemperature};

/// Certification type sent with every request.
pub const CERTIFICATION_TYPE: &str = "KAKAO";

/// A single `{device_attr_cd, set_cont}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSetting {
    #[serde(rename = "device_attr_cd")]
    code: AttributeCode,
    #[serde(rename = "set_cont")]
    value: String,
}

impl AttributeSetting {
    /// Creates a setting for the given attribute.
    #[must_use]
    pub fn new(code: AttributeCode, value: impl Into<String>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }

    /// Returns the attribute code.
    #[must_use]
    pub fn code(&self) -> AttributeCode {
        self.code
    }

    /// Returns the value to set.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Body of a `POST /v1/control/device` request.
///
/// Serializes to:
///
/// ```json
/// {
///   "certf_tp_cd": "KAKAO",
///   "ctl_tp_cd": "HEATING",
///   "device_tp_cd": "HEATING",
///   "device_id": "Ht03",
///   "device_attr_list": [{"device_attr_cd": "POWER", "set_cont": "ON"}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlRequest {
    #[serde(rename = "certf_tp_cd")]
    certification: &'static str,
    #[serde(rename = "ctl_tp_cd")]
    control_type: Category,
    #[serde(rename = "device_tp_cd")]
    device_type: Category,
    device_id: String,
    #[serde(rename = "device_attr_list")]
    attributes: Vec<AttributeSetting>,
}

impl ControlRequest {
    /// Creates an empty request for one device.
    #[must_use]
    pub fn new(category: Category, device_id: impl Into<String>) -> Self {
        Self {
            certification: CERTIFICATION_TYPE,
            control_type: category,
            device_type: category,
            device_id: device_id.into(),
            attributes: Vec::new(),
        }
    }

    /// Adds an arbitrary attribute setting.
    #[must_use]
    pub fn with(mut self, code: AttributeCode, value: impl Into<String>) -> Self {
        self.attributes.push(AttributeSetting::new(code, value));
        self
    }

    /// Adds a `POWER` setting.
    #[must_use]
    pub fn power(self, state: PowerState) -> Self {
        self.with(AttributeCode::Power, state.as_str())
    }

    /// Adds an `HTEMPERATURE` setting.
    #[must_use]
    pub fn heating_temperature(self, temperature: TargetTemperature) -> Self {
        self.with(AttributeCode::HeatingTemperature, temperature.to_string())
    }

    /// Returns the category the request is scoped to.
    #[must_use]
    pub fn category(&self) -> Category {
        self.control_type
    }

    /// Returns the target device id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the attributes to set, in request order.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeSetting] {
        &self.attributes
    }

    /// Returns the value requested for `code`, if present.
    #[must_use]
    pub fn value_of(&self, code: AttributeCode) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.code == code)
            .map(AttributeSetting::value)
    }
}
