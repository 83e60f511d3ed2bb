//! Deep merge of extracted documents
//!
//! A job may be scanned more than once (a retry, a second photograph of the
//! same receipt). Re-extraction must never erase data a previous pass already
//! captured, so documents are combined with a recursive merge: mappings merge
//! key by key, lists union without duplicating entries, and a populated
//! scalar always beats an incoming one.

use serde_json::{Map, Value};

/// A generic extracted document: an ordered string-keyed JSON mapping.
pub type DocumentRecord = Map<String, Value>;

/// Merge a newly extracted document into a previously stored one.
///
/// When `existing` is absent or not a mapping the incoming document is
/// returned unchanged. Otherwise, for each key of `incoming`:
///
/// - nested mappings merge recursively (a non-mapping prior value counts as
///   absent),
/// - lists replace a non-list prior value, and union with a list prior
///   value — existing order is preserved and incoming items not already
///   present (structural equality) are appended in their incoming order,
/// - scalars are adopted only when the prior value is empty (`null`, `""`,
///   or `[]`).
///
/// The returned value is the authoritative merged document.
pub fn merge_documents(existing: Option<Value>, incoming: Value) -> Value {
    let Some(Value::Object(existing)) = existing else {
        return incoming;
    };
    let Value::Object(incoming) = incoming else {
        return Value::Object(existing);
    };
    Value::Object(merge_maps(existing, incoming))
}

fn merge_maps(mut existing: DocumentRecord, incoming: DocumentRecord) -> DocumentRecord {
    for (key, value) in incoming {
        match value {
            Value::Object(incoming_map) => {
                let prior = match existing.remove(&key) {
                    Some(Value::Object(map)) => map,
                    _ => Map::new(),
                };
                existing.insert(key, Value::Object(merge_maps(prior, incoming_map)));
            }
            Value::Array(incoming_list) => match existing.get_mut(&key) {
                Some(Value::Array(prior)) => {
                    for item in incoming_list {
                        if !prior.contains(&item) {
                            prior.push(item);
                        }
                    }
                }
                _ => {
                    existing.insert(key, Value::Array(incoming_list));
                }
            },
            scalar => {
                let keep_prior = existing.get(&key).is_some_and(is_populated);
                if !keep_prior {
                    existing.insert(key, scalar);
                }
            }
        }
    }
    existing
}

/// A value is populated unless it is `null`, an empty string, or an empty
/// list.
fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
