//! Entity records and identifiers
//!
//! Records are kept as opaque JSON objects. Only the identifier fields
//! (`id`, `name`) and the link lists of archetypes (`members`, `support`,
//! `related`) and sets (`contents`) are given a schema.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised when a record does not have the expected shape
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record is missing field '{0}'")]
    MissingField(String),

    #[error("record field '{field}' is invalid: {reason}")]
    InvalidField { field: String, reason: String },
}

/// Identifier of an entity: numeric id or name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Id(i64),
    Name(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, "{}", id),
            Identifier::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for Identifier {
    fn from(id: i64) -> Self {
        Identifier::Id(id)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Name(name.to_string())
    }
}

/// How a detail lookup addresses an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKey {
    Id(i64),
    Name(String),
}

impl EntityKey {
    /// All-digit input is an id, anything else a name
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = trimmed.parse() {
                return EntityKey::Id(id);
            }
        }
        EntityKey::Name(input.to_string())
    }

    /// Query parameter (name, value) for the data endpoints
    pub fn query_param(&self) -> (&'static str, String) {
        match self {
            EntityKey::Id(id) => ("id", id.to_string()),
            EntityKey::Name(name) => ("name", name.clone()),
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Id(id) => write!(f, "id {}", id),
            EntityKey::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// One card, archetype or set as returned by the remote service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord(Map<String, Value>);

impl EntityRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Identity used for deduplication: the id, else the name
    pub fn identity(&self) -> Option<Identifier> {
        self.id()
            .map(Identifier::Id)
            .or_else(|| self.name().map(Identifier::from))
    }

    /// Read an identifier list field.
    ///
    /// Absent is an error; `null` reads as an empty list.
    pub fn identifier_list(&self, field: &str) -> Result<Vec<Identifier>, RecordError> {
        match self.0.get(field) {
            None => Err(RecordError::MissingField(field.to_string())),
            Some(Value::Null) => Ok(Vec::new()),
            Some(value @ Value::Array(_)) => {
                serde_json::from_value(value.clone()).map_err(|e| RecordError::InvalidField {
                    field: field.to_string(),
                    reason: e.to_string(),
                })
            }
            Some(other) => Err(RecordError::InvalidField {
                field: field.to_string(),
                reason: format!("expected a list, found {}", json_type(other)),
            }),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Ordered, duplicate-free set of identifiers resolved in one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierBatch {
    ids: Vec<Identifier>,
}

impl IdentifierBatch {
    /// Build a batch; repeated identifiers keep their first position
    pub fn new(ids: impl IntoIterator<Item = Identifier>) -> Self {
        let mut seen = HashSet::new();
        let ids = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self { ids }
    }

    pub fn ids(&self) -> &[Identifier] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers of `self` not present in `other`, order kept
    pub fn without(&self, other: &IdentifierBatch) -> IdentifierBatch {
        let exclude: HashSet<&Identifier> = other.ids.iter().collect();
        IdentifierBatch {
            ids: self
                .ids
                .iter()
                .filter(|id| !exclude.contains(id))
                .cloned()
                .collect(),
        }
    }

    pub fn join(&self, separator: &str) -> String {
        self.ids
            .iter()
            .map(Identifier::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl FromIterator<Identifier> for IdentifierBatch {
    fn from_iter<T: IntoIterator<Item = Identifier>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Link lists of an archetype record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchetypeLinks {
    pub members: IdentifierBatch,
    pub support: IdentifierBatch,
    pub related: IdentifierBatch,
}

impl ArchetypeLinks {
    pub fn from_record(record: &EntityRecord) -> Result<Self, RecordError> {
        Ok(Self {
            members: IdentifierBatch::new(record.identifier_list("members")?),
            support: IdentifierBatch::new(record.identifier_list("support")?),
            related: IdentifierBatch::new(record.identifier_list("related")?),
        })
    }
}

/// Link list of a set record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetLinks {
    pub contents: IdentifierBatch,
}

impl SetLinks {
    pub fn from_record(record: &EntityRecord) -> Result<Self, RecordError> {
        Ok(Self {
            contents: IdentifierBatch::new(record.identifier_list("contents")?),
        })
    }
}
