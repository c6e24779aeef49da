//! Package manifest (package.json) rewriting
//!
//! The manifest is parsed, its `name` field replaced, and serialized again.
//! Key order from the template is preserved.

use crate::error::{Result, ScaffoldError};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Read the template manifest at `path` and return it with `name` replaced.
pub fn rename_manifest(path: &Path, name: &str) -> Result<String> {
    let content = fs::read_to_string(path)
        .map_err(ScaffoldError::io(format!("Failed to read {}", path.display())))?;
    let mut document: Map<String, Value> =
        match serde_json::from_str(&content).map_err(|source| ScaffoldError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })? {
            Value::Object(map) => map,
            _ => {
                return Err(ScaffoldError::ManifestNotObject {
                    path: path.to_path_buf(),
                })
            }
        };

    document.insert("name".to_string(), Value::String(name.to_string()));

    serde_json::to_string_pretty(&document).map_err(|source| ScaffoldError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}
