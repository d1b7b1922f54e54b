// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for the remote control API.
//!
//! List queries return a nested structure (groups, then devices, then
//! attributes). It is parsed once into a typed [`DeviceListing`] tree; lookups
//! are then pure functions over that tree, see [`find_attribute`] and
//! [`DeviceListing::snapshot`].

mod control;
mod device_list;

pub use control::ControlResponse;
pub use device_list::{
    DeviceAttribute, DeviceEntry, DeviceGroup, DeviceListing, DeviceSnapshot, ListingPage,
    find_attribute,
};
