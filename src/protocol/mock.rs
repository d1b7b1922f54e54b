// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory [`Protocol`] used by unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::command::ControlRequest;
use crate::error::ProtocolError;
use crate::protocol::Protocol;
use crate::response::{ControlResponse, DeviceListing};
use crate::types::{AttributeCode, Category};

/// Serves a fixed listing and records every control request.
#[derive(Debug, Default)]
pub(crate) struct MockProtocol {
    listing: Mutex<DeviceListing>,
    read_delay: Mutex<Option<Duration>>,
    write_delay: Mutex<Option<Duration>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: Mutex<Vec<ControlRequest>>,
}

impl MockProtocol {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replaces the listing with a single device reporting `attributes`.
    pub(crate) fn set_device(&self, device_id: &str, attributes: &[(AttributeCode, &str)]) {
        let attrs: Vec<_> = attributes
            .iter()
            .map(|(code, value)| {
                serde_json::json!({"device_attr_cd": code.as_str(), "attr_cont": value})
            })
            .collect();
        let json = serde_json::json!([{
            "device_grp_list": [{
                "device_list": [{"device_id": device_id, "device_attr_list": attrs}]
            }]
        }]);
        *self.listing.lock() =
            serde_json::from_value(json).expect("mock listing should deserialize");
    }

    /// Replaces the listing with one that does not contain any device.
    pub(crate) fn clear_devices(&self) {
        *self.listing.lock() = DeviceListing::default();
    }

    pub(crate) fn set_read_delay(&self, delay: Duration) {
        *self.read_delay.lock() = Some(delay);
    }

    pub(crate) fn set_write_delay(&self, delay: Duration) {
        *self.write_delay.lock() = Some(delay);
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn writes(&self) -> Vec<ControlRequest> {
        self.writes.lock().clone()
    }
}

impl Protocol for MockProtocol {
    async fn list_devices(&self, _category: Category) -> Result<DeviceListing, ProtocolError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let delay = *self.read_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ProtocolError::Timeout(8000));
        }
        Ok(self.listing.lock().clone())
    }

    async fn control_device(
        &self,
        request: &ControlRequest,
    ) -> Result<ControlResponse, ProtocolError> {
        self.writes.lock().push(request.clone());
        let delay = *self.write_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ProtocolError::Status {
                status: 500,
                reason: "Internal Server Error".to_string(),
            });
        }
        Ok(ControlResponse::new(r#"{"result":"OK"}"#))
    }
}
