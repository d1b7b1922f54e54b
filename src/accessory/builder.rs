// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory builder.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ConfigError, Error};
use crate::protocol::Protocol;
use crate::rate_limiter::RateLimiter;
use crate::scheduler::{PollingScheduler, TaskScheduler};
use crate::types::Category;

use super::shared::AccessoryCore;
use super::{
    AccessoryInformation, DEFAULT_RECONCILE_DELAY, LightAccessory, ThermostatAccessory,
};

/// Builder for [`LightAccessory`] and [`ThermostatAccessory`].
///
/// Created through [`LightAccessory::builder`] or
/// [`ThermostatAccessory::builder`]. Building must happen inside a Tokio
/// runtime, since the accessory starts its polling task right away.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use smartprugio_lib::accessory::ThermostatAccessory;
/// use smartprugio_lib::protocol::HttpConfig;
///
/// # async fn example() -> smartprugio_lib::Result<()> {
/// let client = Arc::new(HttpConfig::new().with_credentials("token", "auth").into_client()?);
///
/// let boiler = ThermostatAccessory::builder(client, "Ht03")
///     .with_name("Boiler")
///     .with_poll_interval(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AccessoryBuilder<P: Protocol, A> {
    client: Arc<P>,
    device_id: String,
    name: Option<String>,
    min_control_interval: Duration,
    polling: PollingScheduler,
    reconcile_delay: Duration,
    _accessory: PhantomData<fn() -> A>,
}

impl<P: Protocol, A> AccessoryBuilder<P, A> {
    pub(crate) fn new(client: Arc<P>, device_id: impl Into<String>) -> Self {
        Self {
            client,
            device_id: device_id.into(),
            name: None,
            min_control_interval: RateLimiter::DEFAULT_MIN_INTERVAL,
            polling: PollingScheduler::default(),
            reconcile_delay: DEFAULT_RECONCILE_DELAY,
            _accessory: PhantomData,
        }
    }

    /// Sets the display name. Defaults to the device id.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the minimum interval between control requests.
    #[must_use]
    pub fn with_min_control_interval(mut self, interval: Duration) -> Self {
        self.min_control_interval = interval;
        self
    }

    /// Sets the polling interval. `Duration::ZERO` disables polling.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.polling = PollingScheduler::new(interval);
        self
    }

    /// Sets the polling configuration.
    #[must_use]
    pub fn with_polling(mut self, polling: PollingScheduler) -> Self {
        self.polling = polling;
        self
    }

    /// Sets the delay before the read that follows a control request.
    #[must_use]
    pub fn with_reconcile_delay(mut self, delay: Duration) -> Self {
        self.reconcile_delay = delay;
        self
    }

    /// Validates the settings and creates the parts every accessory needs.
    fn into_parts(self, category: Category) -> Result<AccessoryParts<P>, Error> {
        let device_id = self.device_id.trim().to_string();
        if device_id.is_empty() {
            return Err(ConfigError::MissingDeviceId.into());
        }
        let tasks = TaskScheduler::current()?;
        let name = self.name.unwrap_or_else(|| device_id.clone());
        let information = AccessoryInformation::new(name, category, device_id);

        tracing::debug!(
            device_id = %information.device_id(),
            category = %category,
            poll_interval = ?self.polling.interval(),
            "Creating accessory"
        );

        Ok(AccessoryParts {
            core: Arc::new(AccessoryCore::new(
                self.client,
                information,
                self.min_control_interval,
            )),
            tasks,
            polling: self.polling,
            reconcile_delay: self.reconcile_delay,
        })
    }
}

impl<P: Protocol> AccessoryBuilder<P, LightAccessory<P>> {
    /// Builds the light and starts polling.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDeviceId` for a blank device id and
    /// `ConfigError::NoRuntime` outside a Tokio runtime.
    pub fn build(self) -> Result<LightAccessory<P>, Error> {
        Ok(LightAccessory::from_parts(self.into_parts(Category::Lights)?))
    }
}

impl<P: Protocol> AccessoryBuilder<P, ThermostatAccessory<P>> {
    /// Builds the thermostat and starts polling.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDeviceId` for a blank device id and
    /// `ConfigError::NoRuntime` outside a Tokio runtime.
    pub fn build(self) -> Result<ThermostatAccessory<P>, Error> {
        Ok(ThermostatAccessory::from_parts(
            self.into_parts(Category::Heating)?,
        ))
    }
}

/// Validated pieces an accessory is assembled from.
pub(crate) struct AccessoryParts<P: Protocol> {
    pub(crate) core: Arc<AccessoryCore<P>>,
    pub(crate) tasks: TaskScheduler,
    pub(crate) polling: PollingScheduler,
    pub(crate) reconcile_delay: Duration,
}
