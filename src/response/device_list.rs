// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device list response parsing.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer};

use crate::error::ParseError;
use crate::types::AttributeCode;

/// Parsed body of a `GET /v1/control/device` query.
///
/// The API answers with a JSON array whose first element holds the device
/// groups of the requested category:
///
/// ```json
/// [{
///   "device_grp_list": [{
///     "device_list": [{
///       "device_id": "Lt03_pow01",
///       "device_attr_list": [{"device_attr_cd": "POWER", "attr_cont": "ON"}]
///     }]
///   }]
/// }]
/// ```
///
/// Missing lists are treated as empty.
///
/// # Examples
///
/// ```
/// use smartprugio_lib::response::DeviceListing;
/// use smartprugio_lib::types::AttributeCode;
///
/// let body = r#"[{"device_grp_list":[{"device_list":[
///     {"device_id":"Ht03","device_attr_list":[
///         {"device_attr_cd":"HTEMPERATURE","attr_cont":"23"}
///     ]}
/// ]}]}]"#;
///
/// let listing = DeviceListing::parse(body).unwrap();
/// let snapshot = listing.snapshot("Ht03").unwrap();
/// assert_eq!(snapshot.get(AttributeCode::HeatingTemperature), Some("23"));
/// assert!(listing.snapshot("Ht04").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DeviceListing(Vec<ListingPage>);

/// One element of the listing array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListingPage {
    /// Device groups in this page.
    #[serde(rename = "device_grp_list", default, deserialize_with = "null_as_empty")]
    pub groups: Vec<DeviceGroup>,
}

/// A group of devices (typically one room or circuit).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceGroup {
    /// Devices in this group.
    #[serde(rename = "device_list", default, deserialize_with = "null_as_empty")]
    pub devices: Vec<DeviceEntry>,
}

/// A device and its reported attributes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceEntry {
    /// Remote device identifier. Anything but a string never matches.
    #[serde(default, deserialize_with = "string_only")]
    pub device_id: Option<String>,
    /// Reported attributes.
    #[serde(rename = "device_attr_list", default, deserialize_with = "null_as_empty")]
    pub attributes: Vec<DeviceAttribute>,
}

/// A reported `{device_attr_cd, attr_cont}` pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeviceAttribute {
    /// Attribute code, kept raw so unknown codes survive parsing.
    #[serde(rename = "device_attr_cd", default, deserialize_with = "string_only")]
    pub code: Option<String>,
    /// Attribute value; numbers are converted to their string form.
    #[serde(rename = "attr_cont", default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

impl DeviceEntry {
    /// Returns the value of the first attribute with the given code.
    ///
    /// A first match without a value hides later duplicates.
    #[must_use]
    pub fn attribute(&self, code: AttributeCode) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.code.as_deref() == Some(code.as_str()))
            .and_then(|a| a.value.as_deref())
    }
}

impl DeviceListing {
    /// Parses a raw response body.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the body is not a JSON array of pages.
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        serde_json::from_str(body).map_err(Into::into)
    }

    /// Returns the device groups of the first page.
    #[must_use]
    pub fn groups(&self) -> &[DeviceGroup] {
        self.0
            .first()
            .map(|page| page.groups.as_slice())
            .unwrap_or_default()
    }

    /// Iterates over every device of the first page.
    pub fn devices(&self) -> impl Iterator<Item = &DeviceEntry> {
        self.groups().iter().flat_map(|g| g.devices.iter())
    }

    /// Finds a device by id.
    #[must_use]
    pub fn find_device(&self, device_id: &str) -> Option<&DeviceEntry> {
        self.devices()
            .find(|d| d.device_id.as_deref() == Some(device_id))
    }

    /// Flattens a device's attributes into a [`DeviceSnapshot`].
    ///
    /// Returns `None` if the device is not part of the listing.
    #[must_use]
    pub fn snapshot(&self, device_id: &str) -> Option<DeviceSnapshot> {
        self.find_device(device_id).map(DeviceSnapshot::from_entry)
    }
}

/// Looks up one attribute of one device.
///
/// Returns `None` both when the device is absent and when the attribute is
/// missing; use [`DeviceListing::snapshot`] to tell the two apart.
#[must_use]
pub fn find_attribute<'a>(
    listing: &'a DeviceListing,
    device_id: &str,
    code: AttributeCode,
) -> Option<&'a str> {
    listing.find_device(device_id)?.attribute(code)
}

/// Flat attribute map of one device at one point in time.
///
/// Snapshots are ephemeral: they are built per read and folded into the
/// accessory's cached state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSnapshot {
    device_id: String,
    attributes: BTreeMap<String, String>,
}

impl DeviceSnapshot {
    /// Builds a snapshot from a listing entry. The first occurrence of a
    /// code wins, even when it carries no value.
    #[must_use]
    pub fn from_entry(entry: &DeviceEntry) -> Self {
        let mut seen = BTreeSet::new();
        let mut attributes = BTreeMap::new();
        for attr in &entry.attributes {
            let Some(code) = &attr.code else { continue };
            if !seen.insert(code.as_str()) {
                continue;
            }
            if let Some(value) = &attr.value {
                attributes.insert(code.clone(), value.clone());
            }
        }
        Self {
            device_id: entry.device_id.clone().unwrap_or_default(),
            attributes,
        }
    }

    /// Creates a snapshot from explicit pairs.
    #[must_use]
    pub fn from_pairs<'a>(
        device_id: impl Into<String>,
        pairs: impl IntoIterator<Item = (AttributeCode, &'a str)>,
    ) -> Self {
        let mut attributes = BTreeMap::new();
        for (code, value) in pairs {
            attributes
                .entry(code.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
        Self {
            device_id: device_id.into(),
            attributes,
        }
    }

    /// Returns the device id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the raw value of an attribute, if reported.
    #[must_use]
    pub fn get(&self, code: AttributeCode) -> Option<&str> {
        self.attributes.get(code.as_str()).map(String::as_str)
    }

    /// Returns the number of reported attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if no attribute was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
