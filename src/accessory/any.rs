// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessories built from configuration blocks.

use std::sync::Arc;

use crate::config::{AccessoryConfig, AccessoryKind};
use crate::error::Error;
use crate::protocol::{HttpClient, Protocol};
use crate::subscription::{Subscribable, SubscriptionId};

use super::{
    Accessory, AccessoryBuilder, AccessoryInformation, Characteristic, CharacteristicValue,
    LightAccessory, ThermostatAccessory,
};

/// Either kind of accessory, talking to the remote over HTTP.
///
/// # Examples
///
/// ```no_run
/// use smartprugio_lib::accessory::{Accessory, AnyAccessory};
/// use smartprugio_lib::config::AccessoryConfig;
///
/// # async fn example() -> smartprugio_lib::Result<()> {
/// let config = AccessoryConfig::from_json(
///     r#"{"accessory": "SmartPrugioThermostat", "name": "Boiler", "deviceId": "Ht03"}"#,
/// )?
/// .with_env_credentials();
///
/// let boiler = AnyAccessory::from_config(&config)?;
/// boiler.reconcile().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub enum AnyAccessory {
    /// A light.
    Light(LightAccessory<HttpClient>),
    /// A heating unit.
    Thermostat(ThermostatAccessory<HttpClient>),
}

impl AnyAccessory {
    /// Builds an accessory with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if credentials or the device id are missing, or
    /// if the base URL is unusable.
    pub fn from_config(config: &AccessoryConfig) -> Result<Self, Error> {
        let client = Arc::new(config.to_http_config().into_client()?);
        Self::with_client(config, client)
    }

    /// Builds an accessory sharing an existing HTTP client.
    ///
    /// The client's transport settings take precedence over the ones in
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the device id is missing.
    pub fn with_client(config: &AccessoryConfig, client: Arc<HttpClient>) -> Result<Self, Error> {
        let accessory = match config.accessory {
            AccessoryKind::Light => Self::Light(
                configure(LightAccessory::builder(client, &config.device_id), config).build()?,
            ),
            AccessoryKind::Thermostat => Self::Thermostat(
                configure(ThermostatAccessory::builder(client, &config.device_id), config)
                    .build()?,
            ),
        };
        Ok(accessory)
    }

    /// Returns the accessory kind.
    #[must_use]
    pub fn kind(&self) -> AccessoryKind {
        match self {
            Self::Light(_) => AccessoryKind::Light,
            Self::Thermostat(_) => AccessoryKind::Thermostat,
        }
    }
}

fn configure<P: Protocol, A>(
    builder: AccessoryBuilder<P, A>,
    config: &AccessoryConfig,
) -> AccessoryBuilder<P, A> {
    let builder = builder
        .with_min_control_interval(config.min_control_interval())
        .with_polling(config.polling());
    match &config.name {
        Some(name) => builder.with_name(name),
        None => builder,
    }
}

impl Accessory for AnyAccessory {
    fn information(&self) -> &AccessoryInformation {
        match self {
            Self::Light(light) => light.information(),
            Self::Thermostat(thermostat) => thermostat.information(),
        }
    }

    fn characteristics(&self) -> &'static [Characteristic] {
        match self {
            Self::Light(light) => Accessory::characteristics(light),
            Self::Thermostat(thermostat) => Accessory::characteristics(thermostat),
        }
    }

    async fn handle_get(&self, characteristic: Characteristic) -> Result<CharacteristicValue, Error> {
        match self {
            Self::Light(light) => light.handle_get(characteristic).await,
            Self::Thermostat(thermostat) => thermostat.handle_get(characteristic).await,
        }
    }

    async fn handle_set(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<(), Error> {
        match self {
            Self::Light(light) => light.handle_set(characteristic, value).await,
            Self::Thermostat(thermostat) => thermostat.handle_set(characteristic, value).await,
        }
    }

    async fn reconcile(&self) {
        match self {
            Self::Light(light) => Accessory::reconcile(light).await,
            Self::Thermostat(thermostat) => Accessory::reconcile(thermostat).await,
        }
    }
}

impl Subscribable for AnyAccessory {
    fn on_characteristic_updated<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Characteristic, CharacteristicValue) + Send + Sync + 'static,
    {
        match self {
            Self::Light(light) => light.on_characteristic_updated(callback),
            Self::Thermostat(thermostat) => thermostat.on_characteristic_updated(callback),
        }
    }

    fn on_updated<F>(&self, characteristic: Characteristic, callback: F) -> SubscriptionId
    where
        F: Fn(CharacteristicValue) + Send + Sync + 'static,
    {
        match self {
            Self::Light(light) => light.on_updated(characteristic, callback),
            Self::Thermostat(thermostat) => thermostat.on_updated(characteristic, callback),
        }
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self {
            Self::Light(light) => light.unsubscribe(id),
            Self::Thermostat(thermostat) => thermostat.unsubscribe(id),
        }
    }
}
