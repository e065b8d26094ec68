//! `BootNotification` response: registration verdict and heartbeat interval.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::types::{RegistrationStatus, StatusInfo};
use crate::protocol::envelope::{Response, ResponseBody};
use crate::protocol::field::{self, ElementError, FieldSpec};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootNotificationResponse {
    pub current_time: DateTime<Utc>,
    /// Heartbeat interval (seconds) when accepted, retry delay otherwise.
    pub interval: i32,
    pub status: RegistrationStatus,
    pub status_info: Option<StatusInfo>,
}

impl BootNotificationResponse {
    pub fn new(current_time: DateTime<Utc>, interval: i32, status: RegistrationStatus) -> Self {
        Self {
            current_time,
            interval,
            status,
            status_info: None,
        }
    }
}

fn interval(value: &Value) -> Result<i32, ElementError> {
    let n = field::integer(value)?;
    i32::try_from(n).map_err(|_| ElementError::Range(format!("interval {n} out of range")))
}

impl ResponseBody for BootNotificationResponse {
    const ACTION: &'static str = "BootNotification";

    const FIELDS: &'static [FieldSpec<Self>] = &[
        FieldSpec::<Self>::required(
            "currentTime",
            |m, v, _| {
                m.current_time = field::datetime(v)?;
                Ok(())
            },
            |m, _| Some(field::encode_datetime(&m.current_time)),
        ),
        FieldSpec::<Self>::required(
            "interval",
            |m, v, _| {
                m.interval = interval(v)?;
                Ok(())
            },
            |m, _| Some(Value::from(m.interval)),
        ),
        FieldSpec::<Self>::required(
            "status",
            |m, v, _| {
                m.status = field::member(v)?;
                Ok(())
            },
            |m, _| field::to_json(&m.status),
        ),
        FieldSpec::<Self>::optional(
            "statusInfo",
            |m, v, options| {
                m.status_info = Some(StatusInfo::decode(v, options)?);
                Ok(())
            },
            |m, custom_data| m.status_info.as_ref().map(|s| s.to_json_with(custom_data)),
        ),
    ];

    const SCHEMA: &'static str = SCHEMA;
}

pub type BootNotification<R> = Response<R, BootNotificationResponse>;

const SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-06/schema#",
  "$id": "urn:OCPP:Cp:2:2020:3:BootNotificationResponse",
  "definitions": {
    "CustomDataType": {
      "type": "object",
      "properties": { "vendorId": { "type": "string", "maxLength": 255 } },
      "required": ["vendorId"]
    },
    "RegistrationStatusEnumType": {
      "type": "string",
      "additionalProperties": false,
      "enum": ["Accepted", "Pending", "Rejected"]
    },
    "StatusInfoType": {
      "type": "object",
      "additionalProperties": false,
      "properties": {
        "customData": { "$ref": "#/definitions/CustomDataType" },
        "reasonCode": { "type": "string", "maxLength": 20 },
        "additionalInfo": { "type": "string", "maxLength": 512 }
      },
      "required": ["reasonCode"]
    },
    "SignatureType": {
      "type": "object",
      "additionalProperties": false,
      "properties": {
        "keyId": { "type": "string", "maxLength": 20 },
        "value": { "type": "string", "maxLength": 2500 },
        "signingMethod": { "type": "string", "maxLength": 50 },
        "encodingMethod": { "type": "string", "maxLength": 50 },
        "customData": { "$ref": "#/definitions/CustomDataType" }
      },
      "required": ["keyId", "value"]
    }
  },
  "type": "object",
  "additionalProperties": false,
  "properties": {
    "currentTime": { "type": "string", "format": "date-time" },
    "interval": { "type": "integer" },
    "status": { "$ref": "#/definitions/RegistrationStatusEnumType" },
    "statusInfo": { "$ref": "#/definitions/StatusInfoType" },
    "signatures": { "type": "array", "items": { "$ref": "#/definitions/SignatureType" } },
    "customData": { "$ref": "#/definitions/CustomDataType" }
  },
  "required": ["currentTime", "interval", "status"]
}"##;
