//! Vendor extension bag (`customData`).

use serde_json::Value;

use super::codec::CustomDataSerializer;
use super::field::{self, ElementError, FieldError, JsonObject};

pub const VENDOR_ID: &str = "vendorId";
const VENDOR_ID_MAX: usize = 255;

/// `customData`: a required `vendorId` plus any vendor-defined keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomData {
    pub vendor_id: String,
    /// Vendor keys, in the order they were received or inserted. Never holds `vendorId`.
    properties: JsonObject,
}

impl CustomData {
    pub fn new(vendor_id: impl Into<String>) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            properties: JsonObject::new(),
        }
    }

    /// Add a vendor key. `vendorId` is reserved and ignored here; set
    /// [`CustomData::vendor_id`] instead.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if key != VENDOR_ID {
            self.properties.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &JsonObject {
        &self.properties
    }

    /// Element parser for a `customData` value.
    pub fn decode(value: &Value) -> Result<Self, ElementError> {
        let obj = field::object(value)?;
        let vendor_id =
            field::required(obj, VENDOR_ID, |v| field::string_max(v, VENDOR_ID_MAX))?;
        let properties = obj
            .iter()
            .filter(|(k, _)| k.as_str() != VENDOR_ID)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Self {
            vendor_id,
            properties,
        })
    }

    pub fn to_json(&self) -> JsonObject {
        let mut out = JsonObject::new();
        out.insert(VENDOR_ID.to_owned(), Value::String(self.vendor_id.clone()));
        for (k, v) in &self.properties {
            out.insert(k.clone(), v.clone());
        }
        out
    }

    pub fn to_json_with(&self, custom: Option<CustomDataSerializer<'_>>) -> JsonObject {
        let out = self.to_json();
        match custom {
            Some(custom) => custom(self, out),
            None => out,
        }
    }
}

/// Decode the optional `customData` key of `obj`.
pub fn optional_custom_data(obj: &JsonObject) -> Result<Option<CustomData>, FieldError> {
    field::optional(obj, "customData", CustomData::decode)
}
