//! `StatusNotification` response. Carries no fields of its own.

use crate::protocol::envelope::{Response, ResponseBody};
use crate::protocol::field::FieldSpec;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusNotificationResponse;

impl ResponseBody for StatusNotificationResponse {
    const ACTION: &'static str = "StatusNotification";
    const FIELDS: &'static [FieldSpec<Self>] = &[];
    const SCHEMA: &'static str = SCHEMA;
}

pub type StatusNotification<R> = Response<R, StatusNotificationResponse>;

const SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-06/schema#",
  "$id": "urn:OCPP:Cp:2:2020:3:StatusNotificationResponse",
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
    "signatures": { "type": "array", "items": { "$ref": "#/definitions/SignatureType" } },
    "customData": { "$ref": "#/definitions/CustomDataType" }
  }
}"##;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::protocol::codec::CodecOptions;
    use crate::protocol::request::PendingCall;

    fn call() -> Arc<PendingCall> {
        Arc::new(PendingCall::new("42", "StatusNotification"))
    }

    #[test]
    fn empty_object_decodes() {
        let r = StatusNotification::try_parse(call(), &json!({})).unwrap();
        assert!(r.signatures().is_empty());
        assert!(r.custom_data().is_none());
        assert!(r.to_json().is_empty());
    }

    #[test]
    fn custom_data_vendor_id() {
        let payload = json!({ "customData": { "vendorId": "ACME" } });
        let r = StatusNotification::try_parse(call(), &payload).unwrap();
        assert_eq!(r.custom_data().map(|cd| cd.vendor_id.as_str()), Some("ACME"));
    }

    #[test]
    fn unknown_keys_pass_unless_strict() {
        let payload = json!({ "extra": true });
        assert!(StatusNotification::try_parse(call(), &payload).is_ok());

        let strict = CodecOptions {
            reject_unknown_fields: true,
        };
        let err = StatusNotification::try_parse_with(call(), &payload, None, &strict).unwrap_err();
        assert!(err.to_string().ends_with("unexpected field 'extra'"));
    }

    #[test]
    fn non_object_payload_is_formation_violation() {
        let err = StatusNotification::try_parse(call(), &json!([])).unwrap_err();
        assert_eq!(err.error_code().as_str(), "FormationViolation");
    }
}
