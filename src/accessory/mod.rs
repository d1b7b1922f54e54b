// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessories exposed to the home-automation layer.
//!
//! An accessory binds one remote device to the characteristics the UI layer
//! reads and writes. It owns a cached [`DeviceState`](crate::state::DeviceState)
//! that always holds a usable value, and keeps it in step with the remote
//! API in three ways:
//!
//! - **get**: every read request triggers a remote read; on failure the
//!   cached value is returned;
//! - **set**: the cache is updated optimistically, a control request is sent
//!   if the rate limiter allows it, and a delayed reconciliation is scheduled;
//! - **polling**: a periodic reconciliation refreshes the cache and pushes
//!   updates through the [`Subscribable`](crate::subscription::Subscribable)
//!   callbacks.
//!
//! Remote failures never reach the UI layer. The only errors an accessory
//! returns are for misuse of its characteristic table.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use smartprugio_lib::accessory::{Accessory, Characteristic, LightAccessory};
//! use smartprugio_lib::protocol::HttpConfig;
//!
//! # async fn example() -> smartprugio_lib::Result<()> {
//! let client = Arc::new(HttpConfig::new().with_credentials("token", "auth").into_client()?);
//! let light = LightAccessory::builder(client, "Lt01").build()?;
//!
//! light.handle_set(Characteristic::On, true.into()).await?;
//! let on = light.handle_get(Characteristic::On).await?;
//! println!("Light is {on}");
//! # Ok(())
//! # }
//! ```

mod builder;
mod characteristic;
mod information;
mod light;
mod shared;
mod thermostat;

#[cfg(feature = "http")]
mod any;

pub use builder::AccessoryBuilder;
pub use characteristic::{Characteristic, CharacteristicProps, CharacteristicValue};
pub use information::AccessoryInformation;
pub use light::LightAccessory;
pub use thermostat::ThermostatAccessory;

#[cfg(feature = "http")]
pub use any::AnyAccessory;

use std::future::Future;
use std::time::Duration;

use crate::error::Result;

/// Delay between an accepted control request and its follow-up read.
pub const DEFAULT_RECONCILE_DELAY: Duration = Duration::from_millis(800);

/// Characteristic dispatch table of an accessory.
///
/// The UI layer addresses characteristics by name; each accessory maps the
/// names it supports to its get and set handlers.
pub trait Accessory: Send + Sync {
    /// Returns the identification shown by the UI layer.
    fn information(&self) -> &AccessoryInformation;

    /// Returns the characteristics this accessory exposes.
    fn characteristics(&self) -> &'static [Characteristic];

    /// Handles a read request from the UI layer.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::UnsupportedCharacteristic` for characteristics
    /// not listed by [`characteristics`](Self::characteristics). Remote
    /// failures are absorbed and answered from the cache.
    fn handle_get(
        &self,
        characteristic: Characteristic,
    ) -> impl Future<Output = Result<CharacteristicValue>> + Send;

    /// Handles a write request from the UI layer.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError` for unsupported or read-only characteristics and
    /// `ValueError` for values of the wrong type or outside their domain.
    /// Remote failures are absorbed.
    fn handle_set(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Refreshes the cache from the remote API and pushes the refreshed
    /// characteristics. Failures are logged and swallowed.
    fn reconcile(&self) -> impl Future<Output = ()> + Send;
}
