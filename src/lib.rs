// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SmartPrugio` Lib - A Rust library bridging `SmartPrugio` cloud devices to
//! smart-home accessory frameworks.
//!
//! The `SmartPrugio` cloud API controls lights and a heating unit. It is slow,
//! rate-sensitive and eventually consistent: the read that follows a control
//! request does not necessarily reflect it. This library keeps a cached view
//! of each device that a UI layer can always read, and reconciles it with the
//! remote in the background.
//!
//! # Supported Features
//!
//! - **Lights**: a single `On` characteristic
//! - **Heating**: thermostat with set point, measured temperature, power and
//!   heating modes (cooling and automatic modes are shown as heating)
//! - **Rate limiting**: control requests per accessory are spaced out
//!   (600 ms by default); rapid toggles only update the cache
//! - **Reconciliation**: a delayed read after each control request, plus
//!   periodic polling
//! - **Failure masking**: remote failures are logged and answered from the
//!   cache
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use smartprugio_lib::accessory::{
//!     Accessory, Characteristic, CharacteristicValue, ThermostatAccessory,
//! };
//! use smartprugio_lib::protocol::HttpConfig;
//! use smartprugio_lib::subscription::Subscribable;
//!
//! #[tokio::main]
//! async fn main() -> smartprugio_lib::Result<()> {
//!     // One client per category can be shared by every accessory
//!     let client = Arc::new(
//!         HttpConfig::new()
//!             .with_credentials("token", "Bearer ...")
//!             .into_client()?,
//!     );
//!
//!     let boiler = ThermostatAccessory::builder(client, "Ht03")
//!         .with_name("Boiler")
//!         .build()?;
//!
//!     // Updates pushed by polling and reconciliation
//!     boiler.on_characteristic_updated(|characteristic, value| {
//!         println!("{characteristic} = {value}");
//!     });
//!
//!     boiler
//!         .handle_set(Characteristic::TargetTemperature, CharacteristicValue::Float(23.0))
//!         .await?;
//!     let current = boiler.handle_get(Characteristic::CurrentTemperature).await?;
//!     println!("It is {current} degrees");
//!     Ok(())
//! }
//! ```
//!
//! ## From a configuration block
//!
//! ```no_run
//! use smartprugio_lib::accessory::AnyAccessory;
//! use smartprugio_lib::config::AccessoryConfig;
//!
//! #[tokio::main]
//! async fn main() -> smartprugio_lib::Result<()> {
//!     let config = AccessoryConfig::from_json(
//!         r#"{"accessory": "SmartPrugioLight", "name": "Hall", "deviceId": "Lt01"}"#,
//!     )?
//!     .with_env_credentials();
//!
//!     let _hall = AnyAccessory::from_config(&config)?;
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! The library emits [`tracing`](https://docs.rs/tracing) events and installs
//! no subscriber. Remote requests are logged at `debug`, accepted control
//! requests at `info` and failed ones at `warn`.

pub mod accessory;
pub mod command;
#[cfg(feature = "http")]
pub mod config;
pub mod error;
pub mod protocol;
pub mod rate_limiter;
pub mod response;
pub mod scheduler;
pub mod state;
pub mod subscription;
pub mod types;

pub use accessory::{
    Accessory, AccessoryInformation, Characteristic, CharacteristicValue, LightAccessory,
    ThermostatAccessory,
};
#[cfg(feature = "http")]
pub use accessory::AnyAccessory;
#[cfg(feature = "http")]
pub use config::{AccessoryConfig, AccessoryKind};
pub use error::{ConfigError, DeviceError, Error, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use protocol::Protocol;
pub use rate_limiter::RateLimiter;
pub use response::find_attribute;
pub use scheduler::{PollingScheduler, TaskScheduler};
pub use subscription::{Subscribable, SubscriptionId};
pub use types::{AttributeCode, Category, PowerState, TargetHeatingMode, TargetTemperature};
