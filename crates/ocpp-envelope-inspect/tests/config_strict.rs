#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use ocpp_envelope_inspect::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
codec:
  reject_unknown_feilds: true # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.error_code().as_str(), "InternalError");
    assert!(err.to_string().starts_with("bad config: invalid yaml"));
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert!(!cfg.codec.reject_unknown_fields);
    assert!(cfg.output.pretty);
    assert_eq!(cfg.log.filter, "info");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
codec:
  reject_unknown_fields: true
output:
  pretty: false
log:
  filter: "ocpp_envelope_core=debug"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert!(cfg.codec.reject_unknown_fields);
    assert!(!cfg.output.pretty);
    assert_eq!(cfg.log.filter, "ocpp_envelope_core=debug");
}

#[test]
fn wrong_version_is_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.to_string(), "unsupported config version");
}

#[test]
fn empty_log_filter_is_rejected() {
    let err = config::load_from_str("version: 1\nlog:\n  filter: \"  \"\n").expect_err("must fail");
    assert!(err.to_string().contains("log.filter"));
}
