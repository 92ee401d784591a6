//! JSON boundary for config documents
//!
//! Reading, parsing and writing are the only places that touch the
//! filesystem or JSON text. Everything above works on `ConfigDocument`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::fields::{display_value, ConfigDocument, Variant, OPTIMIZER_KEY};
use crate::model::ModelError;

/// Read and parse a config document from disk
pub fn read_document(path: &Path) -> Result<ConfigDocument, ModelError> {
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ModelError::io(format!("Failed to read {}", path.display()), e))?;
    let doc = parse_document(&content)?;

    debug!(path = %path.display(), fields = doc.len(), "read config document");
    Ok(doc)
}

/// Parse JSON text, accepting only a top-level object
pub fn parse_document(text: &str) -> Result<ConfigDocument, ModelError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(ModelError::NotAnObject(json_kind(&other))),
    }
}

/// Pretty-print with two-space indentation; non-ASCII stays literal
pub fn to_pretty_json(doc: &ConfigDocument) -> Result<String, ModelError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// One-line description: variant and optimizer
pub fn describe(doc: &ConfigDocument) -> String {
    let optimizer = doc
        .get(OPTIMIZER_KEY)
        .filter(|v| !v.is_null())
        .map(display_value)
        .unwrap_or_else(|| "Unknown".to_string());

    format!("{} config using {} optimizer", Variant::classify(doc), optimizer)
}

/// Write a document into `dir`, creating the directory if needed.
///
/// An existing file with the same name is overwritten. Returns the
/// absolute path written.
pub fn write_document(
    doc: &ConfigDocument,
    dir: &Path,
    filename: &str,
) -> Result<PathBuf, ModelError> {
    fs::create_dir_all(dir)
        .map_err(|e| ModelError::io(format!("Failed to create {}", dir.display()), e))?;

    let path = dir.join(filename);
    let content = to_pretty_json(doc)?;
    fs::write(&path, content)
        .map_err(|e| ModelError::io(format!("Failed to write {}", path.display()), e))?;

    let resolved = fs::canonicalize(&path)
        .map_err(|e| ModelError::io(format!("Failed to resolve {}", path.display()), e))?;
    debug!(path = %resolved.display(), "wrote config document");
    Ok(resolved)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
