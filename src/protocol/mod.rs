// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol implementations for talking to the remote control API.
//!
//! The [`Protocol`] trait is the seam between the accessories and the
//! network: one read operation (list the devices of a category) and one write
//! operation (set attributes of a device). [`HttpClient`] implements it over
//! the cloud HTTP API.
//!
//! Implementations do not retry. Every failure is reported as a
//! [`ProtocolError`], which the accessories treat as "remote unavailable".

#[cfg(feature = "http")]
mod http;
#[cfg(test)]
pub(crate) mod mock;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::future::Future;

use crate::command::ControlRequest;
use crate::error::ProtocolError;
use crate::response::{ControlResponse, DeviceListing};
use crate::types::Category;

/// Trait for clients that can read and control remote devices.
///
/// Implementations must be cheap to share: accessories of one category hold
/// the same client behind an `Arc`.
pub trait Protocol: Send + Sync + 'static {
    /// Lists every device of a category with its current attributes.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport failure, timeout, non-success
    /// status or malformed payload.
    fn list_devices(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<DeviceListing, ProtocolError>> + Send;

    /// Sets one or more attributes of a device in a single request.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport failure, timeout or non-success
    /// status.
    fn control_device(
        &self,
        request: &ControlRequest,
    ) -> impl Future<Output = Result<ControlResponse, ProtocolError>> + Send;
}
