//! Field extraction over JSON objects.
//!
//! Every decoder in this crate is built from three extractors:
//! - [`required`]: absence is `MissingField`.
//! - [`optional`]: absence yields `None`, never an error.
//! - [`optional_set`]: per-element parsing, first failing index wins.
//!
//! A JSON `null` counts as absent. Element parsers report an [`ElementError`],
//! which the extractor wraps into a field-scoped [`FieldError`].

use std::hash::{Hash, Hasher};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::codec::{CodecOptions, CustomDataSerializer};
use crate::error::ErrorCode;

/// Structured wire object.
pub type JsonObject = Map<String, Value>;

/// Why a present value was rejected by its element parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
    /// Wrong JSON type or unparsable text.
    #[error("{0}")]
    Type(String),
    /// Right type, value out of range (length, enum member, sign).
    #[error("{0}")]
    Range(String),
    /// A nested object failed one of its own fields.
    #[error("{0}")]
    Nested(Box<FieldError>),
}

impl From<FieldError> for ElementError {
    fn from(e: FieldError) -> Self {
        ElementError::Nested(Box::new(e))
    }
}

/// Field-scoped decode error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing required field '{0}'")]
    MissingField(String),
    #[error("malformed field '{name}': {cause}")]
    MalformedField { name: String, cause: ElementError },
    /// Key outside the declared field set (strict mode only).
    #[error("unexpected field '{0}'")]
    UnknownField(String),
}

impl FieldError {
    pub fn malformed(name: impl Into<String>, cause: ElementError) -> Self {
        FieldError::MalformedField {
            name: name.into(),
            cause,
        }
    }

    /// Name of the outermost field this error is scoped to.
    pub fn field_name(&self) -> &str {
        match self {
            FieldError::MissingField(name)
            | FieldError::MalformedField { name, .. }
            | FieldError::UnknownField(name) => name,
        }
    }

    /// CallError code for this failure; nested causes report the innermost code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            FieldError::MissingField(_) => ErrorCode::OccurrenceConstraintViolation,
            FieldError::UnknownField(_) => ErrorCode::FormationViolation,
            FieldError::MalformedField { cause, .. } => match cause {
                ElementError::Type(_) => ErrorCode::TypeConstraintViolation,
                ElementError::Range(_) => ErrorCode::PropertyConstraintViolation,
                ElementError::Nested(inner) => inner.error_code(),
            },
        }
    }
}

fn present<'a>(obj: &'a JsonObject, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|v| !v.is_null())
}

/// Decode a field that must be present.
pub fn required<T, F>(obj: &JsonObject, name: &str, parse: F) -> Result<T, FieldError>
where
    F: FnOnce(&Value) -> Result<T, ElementError>,
{
    let value = present(obj, name).ok_or_else(|| FieldError::MissingField(name.to_owned()))?;
    parse(value).map_err(|cause| FieldError::malformed(name, cause))
}

/// Decode a field that may be absent.
pub fn optional<T, F>(obj: &JsonObject, name: &str, parse: F) -> Result<Option<T>, FieldError>
where
    F: FnOnce(&Value) -> Result<T, ElementError>,
{
    present(obj, name)
        .map(|value| parse(value).map_err(|cause| FieldError::malformed(name, cause)))
        .transpose()
}

/// Decode an optional array field element by element.
///
/// `None` means the key was absent; `Some(vec![])` means an empty array was sent.
pub fn optional_set<T, F>(
    obj: &JsonObject,
    name: &str,
    parse: F,
) -> Result<Option<Vec<T>>, FieldError>
where
    F: Fn(&Value) -> Result<T, ElementError>,
{
    let Some(value) = present(obj, name) else {
        return Ok(None);
    };
    let items = value.as_array().ok_or_else(|| {
        FieldError::malformed(
            name,
            ElementError::Type(format!("expected an array, found {}", json_kind(value))),
        )
    })?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            parse(item).map_err(|cause| FieldError::malformed(format!("{name}[{idx}]"), cause))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// In strict mode, fail on the first key of `obj` not listed in `known`.
pub fn reject_unknown(
    obj: &JsonObject,
    known: &[&str],
    options: &CodecOptions,
) -> Result<(), FieldError> {
    if !options.reject_unknown_fields {
        return Ok(());
    }
    match obj.keys().find(|k| !known.contains(&k.as_str())) {
        Some(key) => Err(FieldError::UnknownField(key.clone())),
        None => Ok(()),
    }
}

/// Short JSON type name for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Feed `value` into `state` with object keys sorted, so the result agrees
/// with `Value` equality regardless of key order.
pub(crate) fn hash_json<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            n.to_string().hash(state);
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(items) => {
            4u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_json(item, state);
            }
        }
        Value::Object(obj) => {
            5u8.hash(state);
            obj.len().hash(state);
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort_unstable();
            for key in keys {
                key.hash(state);
                if let Some(v) = obj.get(key) {
                    hash_json(v, state);
                }
            }
        }
    }
}

// Element parsers

fn expected(what: &str, value: &Value) -> ElementError {
    ElementError::Type(format!("expected {what}, found {}", json_kind(value)))
}

pub fn object(value: &Value) -> Result<&JsonObject, ElementError> {
    value.as_object().ok_or_else(|| expected("an object", value))
}

pub fn string(value: &Value) -> Result<String, ElementError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| expected("a string", value))
}

/// String with a maximum length in characters.
pub fn string_max(value: &Value, max: usize) -> Result<String, ElementError> {
    let s = string(value)?;
    let len = s.chars().count();
    if len > max {
        return Err(ElementError::Range(format!(
            "string length {len} exceeds maximum of {max}"
        )));
    }
    Ok(s)
}

pub fn integer(value: &Value) -> Result<i64, ElementError> {
    value.as_i64().ok_or_else(|| expected("an integer", value))
}

/// RFC 3339 timestamp, normalized to UTC.
pub fn datetime(value: &Value) -> Result<DateTime<Utc>, ElementError> {
    let s = value
        .as_str()
        .ok_or_else(|| expected("a date-time string", value))?;
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ElementError::Type(format!("invalid date-time '{s}': {e}")))
}

pub fn encode_datetime(dt: &DateTime<Utc>) -> Value {
    Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Any serde type; a mismatch is a type error.
pub fn from_json<T: DeserializeOwned>(value: &Value) -> Result<T, ElementError> {
    T::deserialize(value).map_err(|e| ElementError::Type(e.to_string()))
}

/// String enumeration member; a string outside the enumeration is a range error.
pub fn member<T: DeserializeOwned>(value: &Value) -> Result<T, ElementError> {
    string(value)?;
    from_json(value).map_err(|e| match e {
        ElementError::Type(msg) => ElementError::Range(msg),
        other => other,
    })
}

/// Encode a serde type; `None` (with a warning) if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value)
        .map_err(|e| tracing::warn!(error = %e, "field encode failed"))
        .ok()
}

/// Whether a field must be present on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Stores a present value into the body. Nested objects honour the options.
pub type DecodeFn<M> = fn(&mut M, &Value, &CodecOptions) -> Result<(), ElementError>;
/// Yields `None` when the field is absent or empty and must not produce a key.
/// Nested `customData` goes through the given serializer.
pub type EncodeFn<M> = for<'m, 'a> fn(&'m M, Option<CustomDataSerializer<'a>>) -> Option<Value>;

/// One row of a message type's field table.
pub struct FieldSpec<M> {
    pub name: &'static str,
    pub presence: Presence,
    pub decode: DecodeFn<M>,
    pub encode: EncodeFn<M>,
}

impl<M> FieldSpec<M> {
    pub const fn required(name: &'static str, decode: DecodeFn<M>, encode: EncodeFn<M>) -> Self {
        Self {
            name,
            presence: Presence::Required,
            decode,
            encode,
        }
    }

    pub const fn optional(name: &'static str, decode: DecodeFn<M>, encode: EncodeFn<M>) -> Self {
        Self {
            name,
            presence: Presence::Optional,
            decode,
            encode,
        }
    }
}

/// Run a field table over `obj`, in declaration order, stopping at the first error.
pub fn decode_table<M: Default>(
    obj: &JsonObject,
    fields: &[FieldSpec<M>],
    options: &CodecOptions,
) -> Result<M, FieldError> {
    let mut body = M::default();
    for field in fields {
        let decode = field.decode;
        match field.presence {
            Presence::Required => required(obj, field.name, |v| decode(&mut body, v, options))?,
            Presence::Optional => {
                optional(obj, field.name, |v| decode(&mut body, v, options))?;
            }
        }
    }
    Ok(body)
}

/// Emit the populated fields of `body`, in declaration order.
pub fn encode_table<M>(
    body: &M,
    fields: &[FieldSpec<M>],
    custom_data: Option<CustomDataSerializer<'_>>,
    out: &mut JsonObject,
) {
    for field in fields {
        if let Some(value) = (field.encode)(body, custom_data) {
            out.insert(field.name.to_owned(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    fn obj(v: Value) -> JsonObject {
        match v {
            Value::Object(m) => m,
            _ => JsonObject::new(),
        }
    }

    #[test]
    fn required_missing_and_null_are_missing() {
        let o = obj(json!({ "b": null }));
        assert_eq!(
            required(&o, "a", string).unwrap_err(),
            FieldError::MissingField("a".into())
        );
        assert_eq!(
            required(&o, "b", string).unwrap_err(),
            FieldError::MissingField("b".into())
        );
    }

    #[test]
    fn optional_absent_is_none_not_error() {
        let o = obj(json!({ "b": null }));
        assert_eq!(optional(&o, "a", string).unwrap(), None);
        assert_eq!(optional(&o, "b", string).unwrap(), None);
    }

    #[test]
    fn type_mismatch_is_malformed() {
        let o = obj(json!({ "a": 5 }));
        let err = optional(&o, "a", string).unwrap_err();
        assert_eq!(err.field_name(), "a");
        assert_eq!(err.error_code(), ErrorCode::TypeConstraintViolation);
        assert_eq!(err.to_string(), "malformed field 'a': expected a string, found a number");
    }

    #[test]
    fn set_distinguishes_absent_from_empty() {
        let o = obj(json!({ "xs": [] }));
        assert_eq!(optional_set(&o, "xs", integer).unwrap(), Some(vec![]));
        assert_eq!(optional_set(&o, "ys", integer).unwrap(), None);
    }

    #[test]
    fn set_reports_first_failing_index() {
        let o = obj(json!({ "xs": [1, "two", "three"] }));
        let err = optional_set(&o, "xs", integer).unwrap_err();
        assert_eq!(err.field_name(), "xs[1]");
    }

    #[test]
    fn set_rejects_non_array() {
        let o = obj(json!({ "xs": {} }));
        let err = optional_set(&o, "xs", integer).unwrap_err();
        assert!(err.to_string().contains("expected an array"));
    }

    #[test]
    fn string_max_is_range_error() {
        let err = string_max(&json!("abcdef"), 3).unwrap_err();
        assert!(matches!(err, ElementError::Range(_)));
    }

    #[test]
    fn nested_error_reports_inner_code() {
        let inner = FieldError::MissingField("keyId".into());
        let outer = FieldError::malformed("signatures[0]", inner.into());
        assert_eq!(outer.error_code(), ErrorCode::OccurrenceConstraintViolation);
        assert_eq!(
            outer.to_string(),
            "malformed field 'signatures[0]': missing required field 'keyId'"
        );
    }

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    enum Colour {
        Red,
        Green,
    }

    #[test]
    fn member_splits_type_and_range() {
        assert_eq!(member::<Colour>(&json!("Green")).unwrap(), Colour::Green);
        assert!(matches!(member::<Colour>(&json!("Blue")), Err(ElementError::Range(_))));
        assert!(matches!(member::<Colour>(&json!(3)), Err(ElementError::Type(_))));
        assert_eq!(to_json(&Colour::Red), Some(json!("Red")));
    }

    #[test]
    fn reject_unknown_only_in_strict_mode() {
        let o = obj(json!({ "a": 1, "zz": 2 }));
        let strict = CodecOptions {
            reject_unknown_fields: true,
        };
        assert!(reject_unknown(&o, &["a"], &CodecOptions::default()).is_ok());
        assert_eq!(
            reject_unknown(&o, &["a"], &strict).unwrap_err(),
            FieldError::UnknownField("zz".into())
        );
        assert!(reject_unknown(&o, &["a", "zz"], &strict).is_ok());
    }

    #[test]
    fn datetime_normalizes_offset() {
        let dt = datetime(&json!("2024-05-01T12:00:00+02:00")).unwrap();
        assert_eq!(encode_datetime(&dt), json!("2024-05-01T10:00:00Z"));
        assert!(datetime(&json!("yesterday")).is_err());
    }
}
