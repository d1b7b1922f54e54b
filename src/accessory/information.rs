// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::types::Category;

/// Identification shown by the UI layer for an accessory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessoryInformation {
    name: String,
    category: Category,
    device_id: String,
}

impl AccessoryInformation {
    /// Manufacturer reported for every accessory.
    pub const MANUFACTURER: &'static str = "SmartPrugio";

    pub(crate) fn new(name: String, category: Category, device_id: String) -> Self {
        Self {
            name,
            category,
            device_id,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the manufacturer.
    #[must_use]
    pub fn manufacturer(&self) -> &'static str {
        Self::MANUFACTURER
    }

    /// Returns the model, which is the remote category name.
    #[must_use]
    pub fn model(&self) -> &'static str {
        self.category.as_str()
    }

    /// Returns the serial number, which is the remote device id.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        &self.device_id
    }

    /// Returns the remote category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the remote device id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}
