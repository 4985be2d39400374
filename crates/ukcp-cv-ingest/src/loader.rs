//! Raw vocabulary files: `<SCOPE>_<collection_id>.json`.

use crate::error::LoadError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// File name holding the raw terms of one collection.
pub fn raw_file_name(scope_name: &str, collection_id: &str) -> String {
    format!("{}_{collection_id}.json", scope_name.to_uppercase())
}

/// Load the raw term map for `collection_id` from the scope's file.
///
/// The file must be a JSON object whose `collection_id` key maps to an
/// object keyed by raw term name.
pub fn load_raw_collection(
    source: &Path,
    scope_name: &str,
    collection_id: &str,
) -> Result<Map<String, Value>, LoadError> {
    let path = source.join(raw_file_name(scope_name, collection_id));
    let text = fs::read_to_string(&path).map_err(|e| LoadError::Read {
        path: path.clone(),
        message: e.to_string(),
    })?;
    let document: Value = serde_json::from_str(&text).map_err(|e| LoadError::Parse {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let raw = match document {
        Value::Object(mut top) => top.remove(collection_id),
        _ => None,
    };
    match raw {
        Some(Value::Object(terms)) => {
            tracing::debug!(path = %path.display(), terms = terms.len(), "loaded raw vocabulary");
            Ok(terms)
        }
        Some(_) => Err(LoadError::NotAnObject {
            path,
            key: collection_id.to_string(),
        }),
        None => Err(LoadError::MissingKey {
            path,
            key: collection_id.to_string(),
        }),
    }
}
