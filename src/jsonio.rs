//! JSON document IO shared by the manifest, preset and launch files.
//!
//! Everything is written with four-space indentation to match the files the
//! C++ tree ships with.

use crate::error::{Result, ScaffoldError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| ScaffoldError::fs(path, e))?;
    serde_json::from_str(&content).map_err(|e| ScaffoldError::json(path, e))
}

/// Render `value` the way every file of the tree is formatted.
pub fn to_pretty_string<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    let mut out = String::from_utf8_lossy(&buf).into_owned();
    out.push('\n');
    Ok(out)
}

/// Serialize `value` and write it to `path`. Nothing is written if
/// serialization fails.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = to_pretty_string(value).map_err(|e| ScaffoldError::json(path, e))?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::fs(parent, e))?;
    }
    fs::write(path, text).map_err(|e| ScaffoldError::fs(path, e))
}
