//! Generic response envelope.
//!
//! A [`Response`] pairs the request that produced it with an [`Outcome`], the
//! message-specific body `M`, and the two extension points every OCPP message
//! carries (`signatures`, `customData`).
//!
//! Equality and hashing cover the body, signatures and custom data only. The
//! request handle, outcome and timestamps are bookkeeping and are ignored, so
//! a decoded response equals one rebuilt from the same content.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::custom_data::CustomData;
use super::field::{self, FieldSpec, JsonObject};
use super::outcome::Outcome;
use super::signature::{Signature, SignatureSet};

/// Message-specific part of a response.
///
/// Implementors are plain structs whose `Default` is the zero-value used by
/// [`Response::failed`], plus a field table describing their wire shape.
pub trait ResponseBody: Default + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// OCPP action name, e.g. `"Heartbeat"`.
    const ACTION: &'static str;
    /// Wire fields in declaration order; decode and encode both follow it.
    const FIELDS: &'static [FieldSpec<Self>];
    /// JSON schema (draft-06) of the response payload.
    const SCHEMA: &'static str;
}

pub struct Response<R, M> {
    request: Arc<R>,
    outcome: Outcome,
    body: M,
    signatures: SignatureSet,
    custom_data: Option<CustomData>,
    response_timestamp: DateTime<Utc>,
}

impl<R, M: ResponseBody> Response<R, M> {
    /// Successful response built locally, without extensions.
    pub fn new(request: Arc<R>, body: M) -> Self {
        Self::from_parts(request, body, SignatureSet::new(), None)
    }

    /// Successful response from decoded parts.
    pub fn from_parts(
        request: Arc<R>,
        body: M,
        signatures: SignatureSet,
        custom_data: Option<CustomData>,
    ) -> Self {
        Self {
            request,
            outcome: Outcome::ok(),
            body,
            signatures,
            custom_data,
            response_timestamp: Utc::now(),
        }
    }

    /// Synthetic response for a request that never got a usable answer.
    pub fn failed(request: Arc<R>) -> Self {
        Self::failed_with(request, Outcome::server())
    }

    /// Like [`Response::failed`] with a caller-chosen outcome (timeout, rejection).
    pub fn failed_with(request: Arc<R>, outcome: Outcome) -> Self {
        Self {
            request,
            outcome,
            body: M::default(),
            signatures: SignatureSet::new(),
            custom_data: None,
            response_timestamp: Utc::now(),
        }
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signatures.insert(signature);
        self
    }

    pub fn with_signatures(mut self, signatures: SignatureSet) -> Self {
        self.signatures = signatures;
        self
    }

    pub fn with_custom_data(mut self, custom_data: CustomData) -> Self {
        self.custom_data = Some(custom_data);
        self
    }

    pub fn request(&self) -> &Arc<R> {
        &self.request
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn body(&self) -> &M {
        &self.body
    }

    pub fn signatures(&self) -> &SignatureSet {
        &self.signatures
    }

    pub fn custom_data(&self) -> Option<&CustomData> {
        self.custom_data.as_ref()
    }

    pub fn response_timestamp(&self) -> DateTime<Utc> {
        self.response_timestamp
    }

    pub fn into_body(self) -> M {
        self.body
    }
}

impl<R, M: Clone> Clone for Response<R, M> {
    fn clone(&self) -> Self {
        Self {
            request: Arc::clone(&self.request),
            outcome: self.outcome.clone(),
            body: self.body.clone(),
            signatures: self.signatures.clone(),
            custom_data: self.custom_data.clone(),
            response_timestamp: self.response_timestamp,
        }
    }
}

impl<R: fmt::Debug, M: fmt::Debug> fmt::Debug for Response<R, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("request", &self.request)
            .field("outcome", &self.outcome)
            .field("body", &self.body)
            .field("signatures", &self.signatures)
            .field("custom_data", &self.custom_data)
            .field("response_timestamp", &self.response_timestamp)
            .finish()
    }
}

impl<R, M: ResponseBody> PartialEq for Response<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
            && self.signatures == other.signatures
            && self.custom_data == other.custom_data
    }
}

impl<R, M: ResponseBody> Eq for Response<R, M> {}

impl<R, M: ResponseBody> Hash for Response<R, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut body = JsonObject::new();
        field::encode_table(&self.body, M::FIELDS, None, &mut body);
        field::hash_json(&Value::Object(body), state);
        self.signatures.hash(state);
        match &self.custom_data {
            Some(cd) => field::hash_json(&Value::Object(cd.to_json()), state),
            None => 0u8.hash(state),
        }
    }
}

impl<R, M: ResponseBody> Response<R, M> {
    /// Hash of the content that takes part in equality.
    pub fn fingerprint(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.hash(&mut h);
        h.finish()
    }
}

/// Type name only; diagnostic, not round-trippable.
impl<R, M: ResponseBody> fmt::Display for Response<R, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Response", M::ACTION)
    }
}
