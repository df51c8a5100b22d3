//! Attribute container
//!
//! [`ResourceData`] is the flat, schema-checked key/value set a read produces.
//! Every attribute is declared in a [`Schema`] with its [`AttributeKind`];
//! [`ResourceData::set`] refuses undeclared names and values of the wrong shape.

use crate::error::AssignError;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Shape of a declared attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    String,
    Int,
    /// Ordered list of nested records (objects)
    List,
    /// Unordered set of strings
    Set,
}

impl AttributeKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Int => "an integer",
            Self::List => "a list of records",
            Self::Set => "a set of strings",
        }
    }

    /// Check a value against this kind, normalizing sets on success
    fn coerce(&self, value: Value) -> Result<Value, &'static str> {
        match (self, value) {
            (Self::String, v @ Value::String(_)) => Ok(v),
            (Self::Int, Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(Value::Number(n)),
            (Self::List, Value::Array(items)) => {
                if let Some(bad) = items.iter().find(|item| !item.is_object()) {
                    return Err(describe(bad));
                }
                Ok(Value::Array(items))
            }
            (Self::Set, Value::Array(items)) => {
                let mut set = BTreeSet::new();
                for item in items {
                    match item {
                        Value::String(s) => {
                            set.insert(s);
                        }
                        other => return Err(describe(&other)),
                    }
                }
                Ok(Value::Array(set.into_iter().map(Value::String).collect()))
            }
            (_, other) => Err(describe(&other)),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a record",
    }
}

/// Declaration of one attribute
#[derive(Debug, Clone, Copy)]
pub struct AttributeSpec {
    pub kind: AttributeKind,
    pub required: bool,
}

/// Attribute declarations for a data source
#[derive(Debug, Clone, Default)]
pub struct Schema {
    attributes: BTreeMap<&'static str, AttributeSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required input attribute
    pub fn required(mut self, name: &'static str, kind: AttributeKind) -> Self {
        self.attributes.insert(name, AttributeSpec { kind, required: true });
        self
    }

    /// Declare a computed attribute
    pub fn computed(mut self, name: &'static str, kind: AttributeKind) -> Self {
        self.attributes.insert(name, AttributeSpec { kind, required: false });
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.get(name)
    }

    /// Schema of the source-share data source
    pub fn source_share() -> Self {
        use AttributeKind::*;

        Self::new()
            .required("share_replica", String)
            .computed("created_at", String)
            .computed("crn", String)
            .computed("encryption", String)
            .computed("encryption_key", String)
            .computed("href", String)
            .computed("iops", Int)
            .computed("latest_job", List)
            .computed("lifecycle_state", String)
            .computed("name", String)
            .computed("profile", String)
            .computed("replica_share", List)
            .computed("replication_cron_spec", String)
            .computed("replication_role", String)
            .computed("replication_status", String)
            .computed("replication_status_reasons", List)
            .computed("resource_group", String)
            .computed("resource_type", String)
            .computed("size", Int)
            .computed("source_share", List)
            .computed("share_targets", List)
            .computed("zone", String)
            .computed(crate::tags::TAGS_ATTRIBUTE, Set)
            .computed(crate::tags::ACCESS_TAGS_ATTRIBUTE, Set)
    }
}

/// State of one data source instance: identity plus attribute values
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: Schema,
    id: String,
    values: BTreeMap<String, Value>,
}

impl ResourceData {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            id: String::new(),
            values: BTreeMap::new(),
        }
    }

    /// Identity key; empty means "no such entity"
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Store a value after checking it against the schema
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), AssignError> {
        let Some(spec) = self.schema.get(name) else {
            return Err(AssignError::UnknownAttribute(name.to_string()));
        };

        let value = spec
            .kind
            .coerce(value.into())
            .map_err(|found| AssignError::KindMismatch {
                name: name.to_string(),
                expected: spec.kind.as_str(),
                found,
            })?;

        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Drop every computed value, keeping the required inputs
    pub fn clear_computed(&mut self) {
        let schema = &self.schema;
        self.values
            .retain(|name, _| schema.get(name).map(|spec| spec.required).unwrap_or(false));
    }

    /// Attributes as a JSON object, with the identity under `id`
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id.clone()));
        for (name, value) in &self.values {
            map.insert(name.clone(), value.clone());
        }
        Value::Object(map)
    }
}
