// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic update notifications.
//!
//! Accessories push refreshed values to the home-automation layer without
//! being asked: after a successful light read, after a thermostat
//! reconciliation, or when a heating mode is forced back to `Heat`. This
//! module carries those pushes.
//!
//! - [`SubscriptionId`] - A unique identifier for a subscription, used to unsubscribe
//! - [`CallbackRegistry`] - Registry that stores callbacks and dispatches updates
//! - [`Subscribable`] - Trait for accessories that push updates
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use smartprugio_lib::accessory::{Characteristic, LightAccessory};
//! use smartprugio_lib::protocol::HttpConfig;
//! use smartprugio_lib::subscription::Subscribable;
//!
//! # async fn example() -> smartprugio_lib::Result<()> {
//! let client = Arc::new(HttpConfig::new().with_credentials("token", "auth").into_client()?);
//! let light = LightAccessory::builder(client, "Lt01").build()?;
//!
//! let sub_id = light.on_updated(Characteristic::On, |value| {
//!     println!("Light is now {value}");
//! });
//!
//! // Later, unsubscribe
//! light.unsubscribe(sub_id);
//! # Ok(())
//! # }
//! ```

mod callback;
mod subscribable;

pub use callback::{CallbackRegistry, SubscriptionId};
pub use subscribable::Subscribable;
