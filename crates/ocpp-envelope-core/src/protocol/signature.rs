//! Message signatures (OCPP security extensions).
//!
//! Only presence and shape are handled here; verifying a signature belongs to
//! whoever holds the keys.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::Value;

use super::codec::{CodecOptions, CustomDataSerializer, SignatureSerializer};
use super::custom_data::CustomData;
use super::field::{self, ElementError, FieldError, JsonObject};

pub const SIGNATURES: &str = "signatures";

const KEY_ID_MAX: usize = 20;
const VALUE_MAX: usize = 2500;
const METHOD_MAX: usize = 50;

const KEYS: [&str; 5] = ["keyId", "value", "signingMethod", "encodingMethod", "customData"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub key_id: String,
    /// Encoded signature bytes, as sent.
    pub value: String,
    pub signing_method: Option<String>,
    pub encoding_method: Option<String>,
    pub custom_data: Option<CustomData>,
}

impl Signature {
    pub fn new(key_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            value: value.into(),
            signing_method: None,
            encoding_method: None,
            custom_data: None,
        }
    }

    pub fn with_signing_method(mut self, method: impl Into<String>) -> Self {
        self.signing_method = Some(method.into());
        self
    }

    pub fn with_encoding_method(mut self, method: impl Into<String>) -> Self {
        self.encoding_method = Some(method.into());
        self
    }

    pub fn with_custom_data(mut self, custom_data: CustomData) -> Self {
        self.custom_data = Some(custom_data);
        self
    }

    /// Element parser for one entry of a `signatures` array.
    pub fn decode(value: &Value, options: &CodecOptions) -> Result<Self, ElementError> {
        let obj = field::object(value)?;
        let method = |v: &Value| field::string_max(v, METHOD_MAX);
        let signature = Self {
            key_id: field::required(obj, "keyId", |v| field::string_max(v, KEY_ID_MAX))?,
            value: field::required(obj, "value", |v| field::string_max(v, VALUE_MAX))?,
            signing_method: field::optional(obj, "signingMethod", method)?,
            encoding_method: field::optional(obj, "encodingMethod", method)?,
            custom_data: field::optional(obj, "customData", CustomData::decode)?,
        };
        field::reject_unknown(obj, &KEYS, options)?;
        Ok(signature)
    }

    pub fn to_json_with(
        &self,
        custom: Option<SignatureSerializer<'_>>,
        custom_data: Option<CustomDataSerializer<'_>>,
    ) -> JsonObject {
        let mut out = JsonObject::new();
        out.insert("keyId".to_owned(), Value::String(self.key_id.clone()));
        out.insert("value".to_owned(), Value::String(self.value.clone()));
        if let Some(m) = &self.signing_method {
            out.insert("signingMethod".to_owned(), Value::String(m.clone()));
        }
        if let Some(m) = &self.encoding_method {
            out.insert("encodingMethod".to_owned(), Value::String(m.clone()));
        }
        if let Some(cd) = &self.custom_data {
            out.insert("customData".to_owned(), Value::Object(cd.to_json_with(custom_data)));
        }
        match custom {
            Some(custom) => custom(self, out),
            None => out,
        }
    }

    fn fingerprint(&self) -> u64 {
        let mut h = DefaultHasher::new();
        field::hash_json(&Value::Object(self.to_json_with(None, None)), &mut h);
        h.finish()
    }
}

/// Signatures attached to a message.
///
/// Duplicates are dropped on insert; iteration follows first-seen order and
/// equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct SignatureSet(Vec<Signature>);

impl SignatureSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns `false` if an equal signature was already present.
    pub fn insert(&mut self, signature: Signature) -> bool {
        if self.0.contains(&signature) {
            return false;
        }
        self.0.push(signature);
        true
    }

    pub fn contains(&self, signature: &Signature) -> bool {
        self.0.contains(signature)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signature> {
        self.0.iter()
    }

    pub fn to_json_with(
        &self,
        custom: Option<SignatureSerializer<'_>>,
        custom_data: Option<CustomDataSerializer<'_>>,
    ) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|s| Value::Object(s.to_json_with(custom, custom_data)))
                .collect(),
        )
    }
}

impl PartialEq for SignatureSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|s| other.contains(s))
    }
}

impl Eq for SignatureSet {}

impl Hash for SignatureSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut prints: Vec<u64> = self.iter().map(Signature::fingerprint).collect();
        prints.sort_unstable();
        prints.hash(state);
    }
}

impl FromIterator<Signature> for SignatureSet {
    fn from_iter<I: IntoIterator<Item = Signature>>(iter: I) -> Self {
        let mut set = SignatureSet::new();
        for s in iter {
            set.insert(s);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SignatureSet {
    type Item = &'a Signature;
    type IntoIter = std::slice::Iter<'a, Signature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Decode the optional `signatures` key of `obj`.
pub fn optional_signatures(
    obj: &JsonObject,
    options: &CodecOptions,
) -> Result<Option<SignatureSet>, FieldError> {
    field::optional_set(obj, SIGNATURES, |v| Signature::decode(v, options))
        .map(|found| found.map(SignatureSet::from_iter))
}
