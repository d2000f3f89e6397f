//! Loading provider trees from JSON descriptions.
//!
//! The description mirrors the tree it builds:
//!
//! | JSON | Provider |
//! |------|----------|
//! | top-level object | [`MemoryDataProvider`] |
//! | top-level array | [`CompoundDataProvider`] of its objects / arrays |
//! | `"k": "text"` | string value |
//! | `"k": 42` | string value `"42"` |
//! | `"k": true` | boolean value |
//! | `"k": null` | nothing |
//! | `"k": {"$image": "plot.jpg"}` | image read from a file |
//! | `"k": {"$base64": "R0lGOA=="}` | image held in memory |
//! | `"k": {..}` | one child in group `k` |
//! | `"k": [{..}, {..}]` | children of group `k`, in order |
//!
//! Member order is preserved. Relative image paths resolve against the
//! directory of the description file.
//!
//! # Examples
//!
//! ```
//! use docdata_publish::json::from_json_str;
//!
//! let tree = from_json_str(r#"{"date": "1776-07-04", "items": [{"name": "a"}, {"name": "b"}]}"#)?;
//! let memory = tree.as_memory().expect("object describes a leaf provider");
//! assert_eq!(memory.string("date"), Some("1776-07-04"));
//! assert_eq!(memory.child_count("items"), 2);
//! # Ok::<(), docdata_publish::PublishError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use docdata_provider::{CompoundDataProvider, DataProvider, Image, MemoryDataProvider};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{PublishError, Result};

/// Path used for the document root in error messages.
const ROOT_PATH: &str = "$";

/// Image reference objects: `{"$image": path}` or `{"$base64": data}`.
#[derive(Debug, Deserialize)]
enum ImageRef {
    #[serde(rename = "$image")]
    Path(PathBuf),
    #[serde(rename = "$base64")]
    Base64(String),
}

/// Build a provider tree from a JSON string.
///
/// Relative image paths resolve against the current directory.
pub fn from_json_str(s: &str) -> Result<Box<dyn DataProvider>> {
    let value: Value = serde_json::from_str(s)?;
    from_json_value(&value, Path::new("."))
}

/// Build a provider tree from a JSON file.
///
/// Relative image paths resolve against the file's directory.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Box<dyn DataProvider>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    debug!(path = %path.display(), bytes = text.len(), "Loaded provider description");

    let base_dir = path.parent().unwrap_or(Path::new("."));
    from_json_value(&value, base_dir)
}

/// Build a provider tree from a parsed JSON value.
pub fn from_json_value(value: &Value, base_dir: &Path) -> Result<Box<dyn DataProvider>> {
    match value {
        Value::Object(map) => {
            reject_image_ref(map, ROOT_PATH)?;
            Ok(Box::new(memory_from_object(map, base_dir, ROOT_PATH)?))
        }
        Value::Array(items) => Ok(Box::new(compound_from_array(items, base_dir, ROOT_PATH)?)),
        other => Err(PublishError::invalid_description(
            ROOT_PATH,
            format!("expected an object or an array, found {}", kind(other)),
        )),
    }
}

fn compound_from_array(
    items: &[Value],
    base_dir: &Path,
    path: &str,
) -> Result<CompoundDataProvider> {
    let mut compound = CompoundDataProvider::new();
    for (index, item) in items.iter().enumerate() {
        let here = format!("{path}[{index}]");
        match item {
            Value::Object(map) => {
                reject_image_ref(map, &here)?;
                compound.push(memory_from_object(map, base_dir, &here)?);
            }
            Value::Array(nested) => {
                compound.push(compound_from_array(nested, base_dir, &here)?);
            }
            other => {
                return Err(PublishError::invalid_description(
                    here,
                    format!("expected an object or an array, found {}", kind(other)),
                ));
            }
        }
    }
    Ok(compound)
}

fn memory_from_object(
    map: &Map<String, Value>,
    base_dir: &Path,
    path: &str,
) -> Result<MemoryDataProvider> {
    let mut provider = MemoryDataProvider::new();

    for (key, value) in map {
        let here = format!("{path}.{key}");
        match value {
            Value::Null => {}
            Value::Bool(b) => {
                provider.add_boolean(key, *b);
            }
            Value::Number(n) => {
                provider.add_string(key, n.to_string());
            }
            Value::String(s) => {
                provider.add_string(key, s);
            }
            Value::Object(object) if is_image_ref(object) => {
                provider.add_image(key, image_from_ref(object, base_dir, &here)?);
            }
            Value::Object(object) => {
                provider.add_child(key, memory_from_object(object, base_dir, &here)?);
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{here}[{index}]");
                    let Value::Object(object) = item else {
                        return Err(PublishError::invalid_description(
                            item_path,
                            format!("group members must be objects, found {}", kind(item)),
                        ));
                    };
                    reject_image_ref(object, &item_path)?;
                    provider.add_child(key, memory_from_object(object, base_dir, &item_path)?);
                }
            }
        }
    }

    Ok(provider)
}

fn is_image_ref(map: &Map<String, Value>) -> bool {
    map.len() == 1 && map.keys().all(|key| key.starts_with('$'))
}

fn reject_image_ref(map: &Map<String, Value>, path: &str) -> Result<()> {
    if is_image_ref(map) {
        return Err(PublishError::invalid_description(
            path,
            "image references are only allowed as member values",
        ));
    }
    Ok(())
}

fn image_from_ref(map: &Map<String, Value>, base_dir: &Path, path: &str) -> Result<Image> {
    let image_ref: ImageRef = serde_json::from_value(Value::Object(map.clone()))
        .map_err(|e| PublishError::invalid_description(path, e.to_string()))?;

    match image_ref {
        ImageRef::Path(file) => Ok(Image::from_path(base_dir.join(file))),
        ImageRef::Base64(data) => STANDARD
            .decode(data.trim())
            .map(Image::from_bytes)
            .map_err(|e| {
                PublishError::invalid_description(path, format!("invalid base64 image: {e}"))
            }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
