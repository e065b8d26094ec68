//! Response envelope machinery.
//!
//! - `field`: field extraction and field tables.
//! - `outcome`: out-of-band result of an exchange.
//! - `request`: request handles used for correlation.
//! - `signature` / `custom_data`: the two extensions every message carries.
//! - `envelope`: the generic `Response<R, M>` value.
//! - `codec`: decode/encode with caller interceptors.
//! - `schema`: field table vs. JSON schema cross-check.
//!
//! Decoding never panics on hostile input; failures come back as `OcppError`.

pub mod codec;
pub mod custom_data;
pub mod envelope;
pub mod field;
pub mod outcome;
pub mod request;
pub mod schema;
pub mod signature;

pub use codec::{CodecOptions, CustomParser, CustomSerializer, Serializers};
pub use custom_data::CustomData;
pub use envelope::{Response, ResponseBody};
pub use field::{FieldError, FieldSpec, JsonObject, Presence};
pub use outcome::{Outcome, OutcomeKind};
pub use request::{PendingCall, Request, RequestId};
pub use signature::{Signature, SignatureSet};
