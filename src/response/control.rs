// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control acknowledgement.

/// Acknowledgement of a control request.
///
/// The API accepts a control request before the device has actually switched,
/// so the body carries no device state. It is kept verbatim for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlResponse {
    body: String,
}

impl ControlResponse {
    /// Creates a response with the given body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}
