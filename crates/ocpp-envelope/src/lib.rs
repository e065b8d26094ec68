//! Top-level facade crate for ocpp-envelope.
//!
//! Re-exports the core envelope/codec crate and the inspect library so users
//! can depend on a single crate.

pub mod core {
    pub use ocpp_envelope_core::*;
}

pub mod inspect {
    pub use ocpp_envelope_inspect::*;
}
