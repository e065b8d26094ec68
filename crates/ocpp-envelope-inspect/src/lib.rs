//! ocpp-envelope inspect library entry.
//!
//! Strict YAML config plus the decode / failed / schema-check operations the
//! `ocpp-envelope-inspect` binary exposes. Kept as a library so integration
//! tests can drive it without spawning the binary.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod inspect;
