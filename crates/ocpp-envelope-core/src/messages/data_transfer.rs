//! `DataTransfer` response: vendor-specific status plus opaque data.

use serde_json::Value;

use super::types::{DataTransferStatus, StatusInfo};
use crate::protocol::envelope::{Response, ResponseBody};
use crate::protocol::field::{self, FieldSpec};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransferResponse {
    pub status: DataTransferStatus,
    pub status_info: Option<StatusInfo>,
    /// Any JSON value except `null`, which is the same as absent on the wire.
    data: Option<Value>,
}

impl DataTransferResponse {
    pub fn new(status: DataTransferStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn with_status_info(mut self, status_info: StatusInfo) -> Self {
        self.status_info = Some(status_info);
        self
    }

    /// Attach vendor data; `null` clears it.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data).filter(|v| !v.is_null());
        self
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

impl ResponseBody for DataTransferResponse {
    const ACTION: &'static str = "DataTransfer";

    const FIELDS: &'static [FieldSpec<Self>] = &[
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
        FieldSpec::<Self>::optional(
            "data",
            |m, v, _| {
                m.data = Some(v.clone());
                Ok(())
            },
            |m, _| m.data.clone(),
        ),
    ];

    const SCHEMA: &'static str = SCHEMA;
}

pub type DataTransfer<R> = Response<R, DataTransferResponse>;

const SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-06/schema#",
  "$id": "urn:OCPP:Cp:2:2020:3:DataTransferResponse",
  "definitions": {
    "CustomDataType": {
      "type": "object",
      "properties": { "vendorId": { "type": "string", "maxLength": 255 } },
      "required": ["vendorId"]
    },
    "DataTransferStatusEnumType": {
      "type": "string",
      "additionalProperties": false,
      "enum": ["Accepted", "Rejected", "UnknownMessageId", "UnknownVendorId"]
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
    "status": { "$ref": "#/definitions/DataTransferStatusEnumType" },
    "statusInfo": { "$ref": "#/definitions/StatusInfoType" },
    "data": {},
    "signatures": { "type": "array", "items": { "$ref": "#/definitions/SignatureType" } },
    "customData": { "$ref": "#/definitions/CustomDataType" }
  },
  "required": ["status"]
}"##;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::protocol::request::PendingCall;

    fn call() -> Arc<PendingCall> {
        Arc::new(PendingCall::new("dt-1", "DataTransfer"))
    }

    #[test]
    fn decode_all_fields() {
        let payload = json!({
            "status": "UnknownVendorId",
            "statusInfo": { "reasonCode": "NoVendor", "additionalInfo": "ACME unknown" },
            "data": { "k": [1, 2] }
        });
        let r = DataTransfer::try_parse(call(), &payload).unwrap();
        assert_eq!(r.body().status, DataTransferStatus::UnknownVendorId);
        let reason = r.body().status_info.as_ref().map(|s| s.reason_code.as_str());
        assert_eq!(reason, Some("NoVendor"));
        assert_eq!(r.body().data(), Some(&json!({ "k": [1, 2] })));
        assert_eq!(serde_json::Value::Object(r.to_json()), payload);
    }

    #[test]
    fn status_is_checked_before_status_info() {
        let payload = json!({ "status": "Nope", "statusInfo": {} });
        let err = DataTransfer::try_parse(call(), &payload).unwrap_err();
        assert!(err.to_string().contains("'status'"));
        assert_eq!(err.error_code().as_str(), "PropertyConstraintViolation");
    }

    #[test]
    fn nested_status_info_error_reports_inner_field() {
        let payload = json!({ "status": "Accepted", "statusInfo": { "reasonCode": 7 } });
        let err = DataTransfer::try_parse(call(), &payload).unwrap_err();
        assert!(err.to_string().contains("'statusInfo'"));
        assert!(err.to_string().contains("'reasonCode'"));
        assert_eq!(err.error_code().as_str(), "TypeConstraintViolation");
    }

    #[test]
    fn null_data_is_absent() {
        let payload = json!({ "status": "Accepted", "data": null });
        let r = DataTransfer::try_parse(call(), &payload).unwrap();
        assert_eq!(r.body().data(), None);
        assert!(!r.to_json().contains_key("data"));
    }

    #[test]
    fn null_data_round_trips_as_absent() {
        let body = DataTransferResponse::new(DataTransferStatus::Accepted).with_data(Value::Null);
        assert_eq!(body.data(), None);

        let r = DataTransfer::new(call(), body);
        let back = DataTransfer::try_parse(call(), &Value::Object(r.to_json())).unwrap();
        assert_eq!(back, r);
    }
}
