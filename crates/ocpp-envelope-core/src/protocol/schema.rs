//! Cross-check between a message's field table and its JSON schema.
//!
//! The codec never validates against the schema at runtime. Drift between the
//! two is a bug, and [`check`] is how tests and tooling find it.

use std::fmt;

use serde_json::Value;

use super::envelope::ResponseBody;
use super::field::Presence;
use super::signature::SIGNATURES;
use crate::error::{OcppError, Result};

/// Envelope-level keys every response schema may declare.
const ENVELOPE_KEYS: [&str; 2] = [SIGNATURES, "customData"];

/// Top-level shape of a draft-06 object schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaShape {
    pub properties: Vec<String>,
    pub required: Vec<String>,
    pub additional_properties: bool,
}

impl SchemaShape {
    pub fn parse(schema: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(schema)
            .map_err(|e| OcppError::InvalidJson(format!("schema: {e}")))?;

        let properties: Vec<String> = root
            .get("properties")
            .and_then(Value::as_object)
            .map(|p| p.keys().cloned().collect())
            .ok_or_else(|| OcppError::InvalidJson("schema has no 'properties' object".into()))?;

        let required = match root.get("required") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_owned)
                        .ok_or_else(|| {
                            OcppError::InvalidJson("schema 'required' holds a non-string".into())
                        })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(OcppError::InvalidJson("schema 'required' is not an array".into()))
            }
        };

        // draft-06 default is `true`
        let additional_properties = root
            .get("additionalProperties")
            .and_then(Value::as_bool)
            .unwrap_or(true);

        Ok(Self {
            properties,
            required,
            additional_properties,
        })
    }

    fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// One disagreement between a field table and its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    /// Table declares a field the schema does not know.
    NotInSchema(String),
    /// Schema declares a property no table entry decodes.
    NotInTable(String),
    /// Both know the field but disagree on whether it is required.
    PresenceMismatch { field: String, table: Presence },
    /// Schema lists a required name that is not among its properties.
    UndeclaredRequired(String),
    /// Schema does not set `additionalProperties: false`.
    OpenSchema,
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drift::NotInSchema(name) => write!(f, "field '{name}' is decoded but not in schema"),
            Drift::NotInTable(name) => write!(f, "schema property '{name}' is never decoded"),
            Drift::PresenceMismatch { field, table } => {
                let schema = match table {
                    Presence::Required => Presence::Optional,
                    Presence::Optional => Presence::Required,
                };
                write!(f, "field '{field}' is {table:?} in the table but {schema:?} in the schema")
            }
            Drift::UndeclaredRequired(name) => {
                write!(f, "schema requires '{name}' without declaring it")
            }
            Drift::OpenSchema => f.write_str("schema allows additional properties"),
        }
    }
}

/// Compare `M`'s field table with `M::SCHEMA`.
pub fn check<M: ResponseBody>() -> Result<Vec<Drift>> {
    let shape = SchemaShape::parse(M::SCHEMA)?;
    Ok(diff(&shape, M::FIELDS.iter().map(|f| (f.name, f.presence))))
}

fn diff<'a>(
    shape: &SchemaShape,
    table: impl Iterator<Item = (&'a str, Presence)> + Clone,
) -> Vec<Drift> {
    let mut drift = Vec::new();

    if shape.additional_properties {
        drift.push(Drift::OpenSchema);
    }

    let envelope = ENVELOPE_KEYS.iter().map(|k| (*k, Presence::Optional));
    let declared = table.chain(envelope);

    for (name, presence) in declared.clone() {
        if !shape.properties.iter().any(|p| p == name) {
            drift.push(Drift::NotInSchema(name.to_owned()));
            continue;
        }
        let schema_presence = if shape.is_required(name) {
            Presence::Required
        } else {
            Presence::Optional
        };
        if schema_presence != presence {
            drift.push(Drift::PresenceMismatch {
                field: name.to_owned(),
                table: presence,
            });
        }
    }

    for prop in &shape.properties {
        if !declared.clone().any(|(name, _)| name == prop) {
            drift.push(Drift::NotInTable(prop.clone()));
        }
    }

    for req in &shape.required {
        if !shape.properties.contains(req) {
            drift.push(Drift::UndeclaredRequired(req.clone()));
        }
    }

    drift
}
