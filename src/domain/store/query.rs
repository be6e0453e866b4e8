use serde_json::Value;

use super::{Document, ID_FIELD};

/// Selects documents by top-level field values
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document in the collection
    All,
    /// Field equals the value
    Eq(String, Value),
    /// Field equals one of the values
    In(String, Vec<Value>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn is_in<V>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        Filter::In(field.into(), values.into_iter().map(Into::into).collect())
    }

    /// Whether the document satisfies the filter
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, value) => document.get(field) == Some(value),
            Filter::In(field, values) => document
                .get(field)
                .map(|v| values.contains(v))
                .unwrap_or(false),
        }
    }
}

/// Modification applied by `update_one`
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Merge these fields into the document (top level only)
    Set(Document),
    /// Append a value to an array field, creating the array if needed
    Push(String, Value),
    /// Remove every element equal to the value from an array field
    Pull(String, Value),
}

impl Update {
    pub fn push(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Update::Push(field.into(), value.into())
    }

    pub fn pull(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Update::Pull(field.into(), value.into())
    }

    /// Apply the update in place. The identity field is never rewritten.
    pub fn apply(&self, document: &mut Document) {
        match self {
            Update::Set(fields) => {
                for (key, value) in fields {
                    if key != ID_FIELD {
                        document.insert(key.clone(), value.clone());
                    }
                }
            }
            Update::Push(field, value) => {
                let slot = document
                    .entry(field.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
                match slot {
                    Value::Array(items) => items.push(value.clone()),
                    other => *other = Value::Array(vec![value.clone()]),
                }
            }
            Update::Pull(field, value) => {
                if let Some(Value::Array(items)) = document.get_mut(field) {
                    items.retain(|item| item != value);
                }
            }
        }
    }
}
