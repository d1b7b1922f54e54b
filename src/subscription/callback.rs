// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for characteristic updates.
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry for storing and dispatching callbacks

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::accessory::{Characteristic, CharacteristicValue};

/// Unique identifier for a subscription.
///
/// IDs are unique within an accessory's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type UpdateCallback = Arc<dyn Fn(Characteristic, CharacteristicValue) + Send + Sync>;

type ValueCallback = Arc<dyn Fn(CharacteristicValue) + Send + Sync>;

/// Registry for an accessory's update callbacks.
///
/// Uses `parking_lot::RwLock` for interior mutability; the registry is shared
/// between the accessory and its background tasks.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    /// Callbacks receiving every update.
    update_callbacks: RwLock<HashMap<SubscriptionId, UpdateCallback>>,
    /// Callbacks bound to one characteristic.
    value_callbacks: RwLock<HashMap<SubscriptionId, (Characteristic, ValueCallback)>>,
}

impl CallbackRegistry {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            update_callbacks: RwLock::new(HashMap::new()),
            value_callbacks: RwLock::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // =========================================================================
    // Registration methods
    // =========================================================================

    /// Registers a callback for updates of every characteristic.
    pub fn on_characteristic_updated<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Characteristic, CharacteristicValue) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.update_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Registers a callback for updates of `characteristic` only.
    pub fn on_updated<F>(&self, characteristic: Characteristic, callback: F) -> SubscriptionId
    where
        F: Fn(CharacteristicValue) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.value_callbacks
            .write()
            .insert(id, (characteristic, Arc::new(callback)));
        id
    }

    // =========================================================================
    // Unsubscription
    // =========================================================================

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if self.update_callbacks.write().remove(&id).is_some() {
            return true;
        }
        self.value_callbacks.write().remove(&id).is_some()
    }

    /// Clears all callbacks.
    pub fn clear(&self) {
        self.update_callbacks.write().clear();
        self.value_callbacks.write().clear();
    }

    // =========================================================================
    // Dispatch methods
    // =========================================================================

    /// Pushes one characteristic update to matching callbacks.
    ///
    /// Callbacks are called synchronously in an arbitrary order.
    pub fn dispatch(&self, characteristic: Characteristic, value: CharacteristicValue) {
        {
            let callbacks = self.update_callbacks.read();
            for callback in callbacks.values() {
                callback(characteristic, value);
            }
        }

        let callbacks = self.value_callbacks.read();
        for (bound, callback) in callbacks.values() {
            if *bound == characteristic {
                callback(value);
            }
        }
    }

    /// Pushes several updates in order.
    pub fn dispatch_all<I>(&self, updates: I)
    where
        I: IntoIterator<Item = (Characteristic, CharacteristicValue)>,
    {
        for (characteristic, value) in updates {
            self.dispatch(characteristic, value);
        }
    }

    /// Returns the total number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.update_callbacks.read().len() + self.value_callbacks.read().len()
    }

    /// Returns `true` if no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("update_callbacks", &self.update_callbacks.read().len())
            .field("value_callbacks", &self.value_callbacks.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        let id = SubscriptionId::new(42);
        assert_eq!(id.to_string(), "Sub(42)");
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CallbackRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.callback_count(), 0);
    }

    #[test]
    fn update_callback_receives_every_characteristic() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();

        registry.on_characteristic_updated(move |c, v| {
            received_clone.lock().push((c, v));
        });

        registry.dispatch(Characteristic::On, CharacteristicValue::Bool(true));
        registry.dispatch(
            Characteristic::TargetTemperature,
            CharacteristicValue::Float(23.0),
        );

        assert_eq!(
            *received.lock(),
            vec![
                (Characteristic::On, CharacteristicValue::Bool(true)),
                (
                    Characteristic::TargetTemperature,
                    CharacteristicValue::Float(23.0)
                ),
            ]
        );
    }

    #[test]
    fn value_callback_is_filtered() {
        let registry = CallbackRegistry::new();
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();

        registry.on_updated(Characteristic::Active, move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch(Characteristic::On, CharacteristicValue::Bool(true));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        registry.dispatch(Characteristic::Active, CharacteristicValue::UInt(1));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_all_preserves_order() {
        let registry = CallbackRegistry::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();

        registry.on_characteristic_updated(move |c, _| received_clone.lock().push(c));
        registry.dispatch_all([
            (Characteristic::Active, CharacteristicValue::UInt(1)),
            (Characteristic::CurrentTemperature, CharacteristicValue::Float(21.0)),
        ]);

        assert_eq!(
            *received.lock(),
            vec![Characteristic::Active, Characteristic::CurrentTemperature]
        );
    }

    #[test]
    fn unsubscribe_and_clear() {
        let registry = CallbackRegistry::new();
        let a = registry.on_characteristic_updated(|_, _| {});
        let b = registry.on_updated(Characteristic::On, |_| {});
        assert_ne!(a, b);
        assert_eq!(registry.callback_count(), 2);

        assert!(registry.unsubscribe(b));
        assert!(!registry.unsubscribe(b));
        assert!(!registry.unsubscribe(SubscriptionId::new(999)));
        assert_eq!(registry.callback_count(), 1);

        registry.clear();
        assert!(registry.is_empty());
    }
}
