//! `Heartbeat` response: the CSMS's current time.

use chrono::{DateTime, Utc};

use crate::protocol::envelope::{Response, ResponseBody};
use crate::protocol::field::{self, FieldSpec};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeartbeatResponse {
    pub current_time: DateTime<Utc>,
}

impl HeartbeatResponse {
    pub fn new(current_time: DateTime<Utc>) -> Self {
        Self { current_time }
    }
}

impl ResponseBody for HeartbeatResponse {
    const ACTION: &'static str = "Heartbeat";

    const FIELDS: &'static [FieldSpec<Self>] = &[FieldSpec::<Self>::required(
        "currentTime",
        |m, v, _| {
            m.current_time = field::datetime(v)?;
            Ok(())
        },
        |m, _| Some(field::encode_datetime(&m.current_time)),
    )];

    const SCHEMA: &'static str = SCHEMA;
}

pub type Heartbeat<R> = Response<R, HeartbeatResponse>;

const SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-06/schema#",
  "$id": "urn:OCPP:Cp:2:2020:3:HeartbeatResponse",
  "definitions": {
    "CustomDataType": {
      "type": "object",
      "properties": { "vendorId": { "type": "string", "maxLength": 255 } },
      "required": ["vendorId"]
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
    "signatures": { "type": "array", "items": { "$ref": "#/definitions/SignatureType" } },
    "customData": { "$ref": "#/definitions/CustomDataType" }
  },
  "required": ["currentTime"]
}"##;
