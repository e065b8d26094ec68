//! Data types shared by several response messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::codec::{CodecOptions, CustomDataSerializer};
use crate::protocol::custom_data::CustomData;
use crate::protocol::field::{self, ElementError, JsonObject};

/// `RegistrationStatusEnumType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum RegistrationStatus {
    Accepted,
    Pending,
    #[default]
    Rejected,
}

/// `DataTransferStatusEnumType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum DataTransferStatus {
    Accepted,
    #[default]
    Rejected,
    UnknownMessageId,
    UnknownVendorId,
}

const REASON_CODE_MAX: usize = 20;
const ADDITIONAL_INFO_MAX: usize = 512;

const STATUS_INFO_KEYS: [&str; 3] = ["reasonCode", "additionalInfo", "customData"];

/// `StatusInfoType`: machine-readable reason plus optional free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub reason_code: String,
    pub additional_info: Option<String>,
    pub custom_data: Option<CustomData>,
}

impl StatusInfo {
    pub fn new(reason_code: impl Into<String>) -> Self {
        Self {
            reason_code: reason_code.into(),
            additional_info: None,
            custom_data: None,
        }
    }

    pub fn with_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = Some(info.into());
        self
    }

    pub fn with_custom_data(mut self, custom_data: CustomData) -> Self {
        self.custom_data = Some(custom_data);
        self
    }

    pub fn decode(value: &Value, options: &CodecOptions) -> Result<Self, ElementError> {
        let obj = field::object(value)?;
        let info = Self {
            reason_code: field::required(obj, "reasonCode", |v| {
                field::string_max(v, REASON_CODE_MAX)
            })?,
            additional_info: field::optional(obj, "additionalInfo", |v| {
                field::string_max(v, ADDITIONAL_INFO_MAX)
            })?,
            custom_data: field::optional(obj, "customData", CustomData::decode)?,
        };
        field::reject_unknown(obj, &STATUS_INFO_KEYS, options)?;
        Ok(info)
    }

    pub fn to_json(&self) -> Value {
        self.to_json_with(None)
    }

    pub fn to_json_with(&self, custom_data: Option<CustomDataSerializer<'_>>) -> Value {
        let mut out = JsonObject::new();
        out.insert("reasonCode".to_owned(), Value::String(self.reason_code.clone()));
        if let Some(info) = &self.additional_info {
            out.insert("additionalInfo".to_owned(), Value::String(info.clone()));
        }
        if let Some(cd) = &self.custom_data {
            out.insert("customData".to_owned(), Value::Object(cd.to_json_with(custom_data)));
        }
        Value::Object(out)
    }
}
