//! ocpp-envelope core: the response envelope and codec contract shared by all
//! OCPP response messages.
//!
//! A response is bound to the request that produced it, decoded from and
//! encoded to a JSON object through a per-message field table, and open to
//! caller interceptors on both paths. Transport, request types and dispatch
//! live elsewhere.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. The one sanctioned
//! panic is `Response::parse`, for callers that treat a malformed payload as a
//! programming error.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod messages;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorCode, OcppError, Result};
