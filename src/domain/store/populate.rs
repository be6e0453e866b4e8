// Reference population helpers behind EntityStore::resolve_references

use std::collections::HashMap;

use serde_json::Value;

use super::{Document, ID_FIELD};

/// Collect every identity found at `path`, without duplicates
pub(super) fn collect_ids(document: &Document, path: &str) -> Vec<Value> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut ids = Vec::new();

    if let Some((head, rest)) = segments.split_first() {
        if let Some(value) = document.get(*head) {
            collect_from(value, rest, &mut ids);
        }
    }

    ids
}

fn collect_from(value: &Value, rest: &[&str], ids: &mut Vec<Value>) {
    match (value, rest.split_first()) {
        (Value::Array(items), _) => {
            for item in items {
                collect_from(item, rest, ids);
            }
        }
        (Value::Object(map), Some((head, tail))) => {
            if let Some(child) = map.get(*head) {
                collect_from(child, tail, ids);
            }
        }
        (Value::String(_), None) => {
            if !ids.contains(value) {
                ids.push(value.clone());
            }
        }
        _ => {}
    }
}

/// Key fetched documents by their identity
pub(super) fn index_by_id(documents: Vec<Document>) -> HashMap<String, Document> {
    documents
        .into_iter()
        .filter_map(|doc| {
            let id = doc.get(ID_FIELD)?.as_str()?.to_string();
            Some((id, doc))
        })
        .collect()
}

/// Swap identities at `path` for the documents in `lookup`
pub(super) fn substitute(document: &mut Document, path: &str, lookup: &HashMap<String, Document>) {
    let segments: Vec<&str> = path.split('.').collect();

    if let Some((head, rest)) = segments.split_first() {
        if let Some(value) = document.get_mut(*head) {
            substitute_in(value, rest, lookup);
        }
    }
}

fn substitute_in(value: &mut Value, rest: &[&str], lookup: &HashMap<String, Document>) {
    match rest.split_first() {
        None => match value {
            Value::String(id) => {
                let replacement = lookup
                    .get(id.as_str())
                    .cloned()
                    .map(Value::Object)
                    .unwrap_or(Value::Null);
                *value = replacement;
            }
            Value::Array(items) => {
                items.retain_mut(|item| {
                    let found = item.as_str().map(|id| lookup.get(id));
                    match found {
                        Some(Some(doc)) => {
                            *item = Value::Object(doc.clone());
                            true
                        }
                        Some(None) => false,
                        None => true,
                    }
                });
            }
            _ => {}
        },
        Some((head, tail)) => match value {
            Value::Array(items) => {
                for item in items {
                    substitute_in(item, rest, lookup);
                }
            }
            Value::Object(map) => {
                if let Some(child) = map.get_mut(*head) {
                    substitute_in(child, tail, lookup);
                }
            }
            _ => {}
        },
    }
}
