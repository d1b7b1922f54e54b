// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration.
//!
//! An [`AccessoryConfig`] mirrors the JSON block a home-automation host hands
//! to each accessory:
//!
//! ```json
//! {
//!   "accessory": "SmartPrugioThermostat",
//!   "name": "Boiler",
//!   "deviceId": "Ht03",
//!   "token": "...",
//!   "auth": "...",
//!   "pollIntervalSec": 30
//! }
//! ```
//!
//! Omitted fields take their defaults. Missing credentials can be supplied
//! through the `SMARTPRUGIO_TOKEN` and `SMARTPRUGIO_AUTH` environment
//! variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::protocol::HttpConfig;
use crate::rate_limiter::RateLimiter;
use crate::scheduler::PollingScheduler;
use crate::types::Category;

/// Environment variable holding the `token` header value.
pub const TOKEN_ENV: &str = "SMARTPRUGIO_TOKEN";
/// Environment variable holding the `Authorization` header value.
pub const AUTH_ENV: &str = "SMARTPRUGIO_AUTH";

/// Kind of accessory a configuration block describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessoryKind {
    /// A light.
    #[serde(rename = "SmartPrugioLight")]
    Light,
    /// A heating unit.
    #[serde(rename = "SmartPrugioThermostat")]
    Thermostat,
}

impl AccessoryKind {
    /// Returns the remote category this kind is listed under.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Light => Category::Lights,
            Self::Thermostat => Category::Heating,
        }
    }
}

/// Configuration of one accessory.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use smartprugio_lib::config::{AccessoryConfig, AccessoryKind};
///
/// let config = AccessoryConfig::from_json(
///     r#"{"accessory": "SmartPrugioLight", "deviceId": "Lt01", "token": "t", "auth": "a"}"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.accessory, AccessoryKind::Light);
/// assert_eq!(config.min_control_interval(), Duration::from_millis(600));
/// assert_eq!(config.poll_interval(), Duration::from_secs(10));
///
/// let config = AccessoryConfig::thermostat("Ht03")
///     .with_name("Boiler")
///     .with_credentials("token", "auth")
///     .with_poll_interval(Duration::ZERO);
/// assert!(!config.polling().is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryConfig {
    /// Accessory kind.
    pub accessory: AccessoryKind,
    /// Display name; defaults to the device id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Remote device id.
    #[serde(default)]
    pub device_id: String,
    /// API endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// `app_version` header.
    #[serde(default = "default_app_version")]
    pub app_version: String,
    /// `User-Agent` header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// `token` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// `Authorization` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    /// Minimum interval between control requests, in milliseconds.
    #[serde(default = "default_min_control_interval_ms")]
    pub min_control_interval_ms: u64,
    /// Polling interval in seconds; `0` disables polling.
    #[serde(default = "default_poll_interval_sec")]
    pub poll_interval_sec: u64,
}

fn default_base_url() -> String {
    HttpConfig::DEFAULT_BASE_URL.to_string()
}

fn default_app_version() -> String {
    HttpConfig::DEFAULT_APP_VERSION.to_string()
}

fn default_user_agent() -> String {
    HttpConfig::DEFAULT_USER_AGENT.to_string()
}

fn default_min_control_interval_ms() -> u64 {
    millis(RateLimiter::DEFAULT_MIN_INTERVAL)
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn default_poll_interval_sec() -> u64 {
    PollingScheduler::DEFAULT_INTERVAL.as_secs()
}

impl AccessoryConfig {
    /// Creates a configuration with defaults for the given kind.
    #[must_use]
    pub fn new(accessory: AccessoryKind, device_id: impl Into<String>) -> Self {
        Self {
            accessory,
            name: None,
            device_id: device_id.into(),
            base_url: default_base_url(),
            app_version: default_app_version(),
            user_agent: default_user_agent(),
            token: None,
            auth: None,
            min_control_interval_ms: default_min_control_interval_ms(),
            poll_interval_sec: default_poll_interval_sec(),
        }
    }

    /// Creates a light configuration.
    #[must_use]
    pub fn light(device_id: impl Into<String>) -> Self {
        Self::new(AccessoryKind::Light, device_id)
    }

    /// Creates a thermostat configuration.
    #[must_use]
    pub fn thermostat(device_id: impl Into<String>) -> Self {
        Self::new(AccessoryKind::Thermostat, device_id)
    }

    /// Reads a configuration block.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the JSON is malformed or the
    /// accessory kind is unknown.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the `token` and `Authorization` header values.
    #[must_use]
    pub fn with_credentials(mut self, token: impl Into<String>, auth: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.auth = Some(auth.into());
        self
    }

    /// Fills missing credentials from `SMARTPRUGIO_TOKEN` and
    /// `SMARTPRUGIO_AUTH`.
    #[must_use]
    pub fn with_env_credentials(self) -> Self {
        self.with_credentials_from(|key| std::env::var(key).ok())
    }

    /// Fills missing credentials from `lookup`, called with
    /// [`TOKEN_ENV`] and [`AUTH_ENV`].
    #[must_use]
    pub fn with_credentials_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.token.is_none() {
            self.token = lookup(TOKEN_ENV);
        }
        if self.auth.is_none() {
            self.auth = lookup(AUTH_ENV);
        }
        self
    }

    /// Sets the minimum interval between control requests.
    #[must_use]
    pub fn with_min_control_interval(mut self, interval: Duration) -> Self {
        self.min_control_interval_ms = millis(interval);
        self
    }

    /// Sets the polling interval, in whole seconds. `Duration::ZERO` disables
    /// polling.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_sec = interval.as_secs();
        self
    }

    /// Returns the remote category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.accessory.category()
    }

    /// Returns the minimum interval between control requests.
    #[must_use]
    pub fn min_control_interval(&self) -> Duration {
        Duration::from_millis(self.min_control_interval_ms)
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.polling().interval().unwrap_or_default()
    }

    /// Returns the polling configuration.
    #[must_use]
    pub fn polling(&self) -> PollingScheduler {
        PollingScheduler::from_secs(self.poll_interval_sec)
    }

    /// Returns the HTTP transport settings.
    #[must_use]
    pub fn to_http_config(&self) -> HttpConfig {
        let mut config = HttpConfig::new()
            .with_base_url(&self.base_url)
            .with_app_version(&self.app_version)
            .with_user_agent(&self.user_agent);
        if let Some(token) = &self.token {
            config = config.with_token(token);
        }
        if let Some(auth) = &self.auth {
            config = config.with_auth(auth);
        }
        config
    }
}
