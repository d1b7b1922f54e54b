// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `SmartPrugio` library.
//!
//! The hierarchy mirrors how failures are handled by the accessories:
//!
//! - [`ConfigError`] is fatal and only surfaces while building a client or
//!   an accessory.
//! - [`ProtocolError`] covers every way the remote API can fail. All of its
//!   causes collapse into the single [`Error::RemoteUnavailable`] kind, which
//!   accessories log and absorb.
//! - [`ValueError`] rejects values that do not fit their domain. Values coming
//!   from the remote API are skipped silently; values coming from the UI layer
//!   are reported to the caller.
//! - [`DeviceError`] reports misuse of an accessory's characteristic table.

use thiserror::Error;

use crate::accessory::Characteristic;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The remote API could not be reached or answered unusably.
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(#[from] ProtocolError),

    /// A value was outside its domain or could not be interpreted.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// An accessory was asked for something it does not support.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

impl Error {
    /// Returns `true` if this error means the remote API is unavailable.
    #[must_use]
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_))
    }
}

/// Errors raised while validating configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The token or authorization value is absent or blank.
    #[error("missing token/auth credentials")]
    MissingCredentials,

    /// No device id was configured.
    #[error("missing device id")]
    MissingDeviceId,

    /// The base URL cannot be used to reach the API.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A header value contains characters that cannot be sent.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// The HTTP client could not be initialised.
    #[error("HTTP client initialisation failed: {0}")]
    ClientInit(String),

    /// An accessory configuration block could not be read.
    #[error("invalid accessory configuration: {0}")]
    Invalid(String),

    /// An accessory was created outside a Tokio runtime.
    #[error("no Tokio runtime available for background tasks")]
    NoRuntime,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
        /// The actual value that was provided.
        actual: f64,
    },

    /// A current temperature reading is not strictly positive.
    #[error("temperature reading {0} is not positive")]
    NotPositive(f64),

    /// A string could not be read as a finite number.
    #[error("not a number: {0:?}")]
    NotANumber(String),

    /// A power attribute was neither `ON` nor `OFF`.
    #[error("invalid power state: {0:?}")]
    InvalidPowerState(String),

    /// A heating mode code is not one the UI layer defines.
    #[error("invalid heating mode: {0}")]
    InvalidHeatingMode(u8),

    /// A characteristic received a value of the wrong type.
    #[error("{characteristic} does not accept {value}")]
    InvalidCharacteristicValue {
        /// The characteristic being written.
        characteristic: Characteristic,
        /// Rendering of the rejected value.
        value: String,
    },
}

/// Errors related to talking to the remote API.
///
/// Every variant is surfaced as [`Error::RemoteUnavailable`]; the variants
/// only exist to make logs useful.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP transport failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The API answered with a non-success status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// The numeric status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// The response body could not be understood.
    #[error("malformed payload: {0}")]
    Malformed(#[from] ParseError),
}

/// Errors related to parsing API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors related to accessory characteristic dispatch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The accessory does not expose this characteristic.
    #[error("characteristic {0} is not supported by this accessory")]
    UnsupportedCharacteristic(Characteristic),

    /// The characteristic cannot be written.
    #[error("characteristic {0} is read-only")]
    ReadOnly(Characteristic),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 5.0,
            max: 40.0,
            actual: 45.0,
        };
        assert_eq!(err.to_string(), "value 45 is out of range [5, 40]");
    }

    #[test]
    fn error_from_protocol_error_is_remote_unavailable() {
        let err: Error = ProtocolError::Timeout(8000).into();
        assert!(err.is_remote_unavailable());
        assert_eq!(
            err.to_string(),
            "remote unavailable: request timed out after 8000 ms"
        );
    }

    #[test]
    fn malformed_payload_is_remote_unavailable() {
        let parse = ParseError::UnexpectedFormat("empty listing".to_string());
        let err: Error = ProtocolError::from(parse).into();
        assert!(err.is_remote_unavailable());
    }

    #[test]
    fn config_error_is_not_remote_unavailable() {
        let err: Error = ConfigError::MissingCredentials.into();
        assert!(!err.is_remote_unavailable());
        assert_eq!(
            err.to_string(),
            "configuration error: missing token/auth credentials"
        );
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::ReadOnly(Characteristic::CurrentTemperature);
        assert_eq!(err.to_string(), "characteristic CurrentTemperature is read-only");
    }
}
