//! Dotted-path access into configuration records.

use crate::error::EditError;
use serde_json::{Map, Value};

/// Reads the value at `path`, returning `None` if any segment is missing.
pub fn get_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, segment| current.as_object()?.get(segment))
}

/// Writes `value` at `path`, creating intermediate objects as needed.
///
/// Every other field of `record` is left untouched. Fails if a segment is
/// empty or if an intermediate value exists but is not an object.
pub fn set_path(record: &mut Value, path: &str, value: Value) -> Result<(), EditError> {
    let invalid = |message: &str| EditError::InvalidPath {
        path: path.to_string(),
        message: message.to_string(),
    };

    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(invalid("empty path segment"));
    }

    if record.is_null() {
        *record = Value::Object(Map::new());
    }

    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| invalid("empty path"))?;

    let mut current = record;
    for segment in parents {
        let object = current
            .as_object_mut()
            .ok_or_else(|| invalid(&format!("'{}' is not an object", segment)))?;
        current = object
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if current.is_null() {
            *current = Value::Object(Map::new());
        }
    }

    current
        .as_object_mut()
        .ok_or_else(|| invalid(&format!("parent of '{}' is not an object", last)))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Renders a configuration value the way validation patterns see it.
///
/// Missing values and `null` are empty; strings are taken verbatim.
pub fn value_as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
