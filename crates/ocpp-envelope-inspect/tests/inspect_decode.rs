#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use ocpp_envelope_inspect::config;
use ocpp_envelope_inspect::inspect::{self, Action};

#[test]
fn strict_config_rejects_unknown_keys() {
    let cfg = config::load_from_str("version: 1\ncodec:\n  reject_unknown_fields: true\n").unwrap();
    let payload = json!({ "currentTime": "2024-03-01T08:30:00Z", "extra": 1 });

    let err = inspect::decode(Action::Heartbeat, "7", &payload, &cfg.codec).unwrap_err();
    assert_eq!(err.error_code().as_str(), "FormationViolation");

    let lenient = config::load_from_str("version: 1\n").unwrap();
    let ok = inspect::decode(Action::Heartbeat, "7", &payload, &lenient.codec).unwrap();
    assert_eq!(ok.encoded.get("currentTime"), Some(&json!("2024-03-01T08:30:00Z")));
    assert!(!ok.encoded.contains_key("extra"));
}

#[test]
fn decode_error_is_prefixed_with_action() {
    let err = inspect::decode(
        Action::BootNotification,
        "7",
        &json!({ "status": "Accepted" }),
        &Default::default(),
    )
    .unwrap_err();
    assert!(err
        .to_string()
        .starts_with("The given JSON representation of a BootNotification response is invalid"));
}

#[test]
fn failed_output_has_only_body_fields() {
    let i = inspect::failed(Action::BootNotification, "7");
    let keys: Vec<_> = i.encoded.keys().cloned().collect();
    assert_eq!(keys, ["currentTime", "interval", "status"]);
    assert_eq!(i.encoded.get("status"), Some(&json!("Rejected")));
}
