// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for accessories that push characteristic updates.

use crate::accessory::{Characteristic, CharacteristicValue};
use crate::subscription::SubscriptionId;

/// Trait for types that push characteristic updates.
///
/// Callbacks run synchronously on the task that produced the update and must
/// not block.
pub trait Subscribable {
    /// Subscribes to updates of every characteristic.
    fn on_characteristic_updated<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Characteristic, CharacteristicValue) + Send + Sync + 'static;

    /// Subscribes to updates of one characteristic.
    fn on_updated<F>(&self, characteristic: Characteristic, callback: F) -> SubscriptionId
    where
        F: Fn(CharacteristicValue) + Send + Sync + 'static;

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
