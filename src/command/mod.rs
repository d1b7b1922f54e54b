// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control command definitions.
//!
//! A control command sets one or more attributes of a single device. The
//! remote API applies all attributes of one request as one operation, so
//! related settings (for example power and set point) belong in the same
//! [`ControlRequest`].
//!
//! # Examples
//!
//! ```
//! use smartprugio_lib::command::ControlRequest;
//! use smartprugio_lib::types::{Category, PowerState, TargetTemperature};
//!
//! let request = ControlRequest::new(Category::Heating, "Ht03")
//!     .power(PowerState::On)
//!     .heating_temperature(TargetTemperature::new(22.0).unwrap());
//!
//! assert_eq!(request.attributes().len(), 2);
//! assert_eq!(request.attributes()[1].value(), "22");
//! ```

mod control;

pub use control::{AttributeSetting, CERTIFICATION_TYPE, ControlRequest};
