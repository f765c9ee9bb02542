//! JSON encoding of USF documents.
//!
//! Decoding goes through an untyped `serde_json::Value` first so a missing
//! key and a badly shaped one can be told apart field by field.

use crate::domain::model::Usf;
use crate::utils::error::{Result, UsfError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

pub const ROOT_FIELD: &str = "(root)";

/// Invalid UTF-8 is reported like any other malformed JSON.
pub fn parse_value(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::error!("Error parsing JSON: {}", e);
        UsfError::ParseError(e)
    })
}

pub fn as_object(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        let message = format!("expected a JSON object, found {}", type_name(value));
        tracing::error!("Error reading field {}: {}", ROOT_FIELD, message);
        UsfError::TypeMismatchError {
            field: ROOT_FIELD.to_string(),
            message,
        }
    })
}

/// 取得必要欄位並轉為指定型別
pub fn required_field<T: DeserializeOwned>(object: &Map<String, Value>, field: &str) -> Result<T> {
    let value = object.get(field).ok_or_else(|| {
        tracing::error!("Missing field: {}", field);
        UsfError::MissingFieldError {
            field: field.to_string(),
        }
    })?;

    <T as serde::Deserialize>::deserialize(value).map_err(|e| {
        tracing::error!("Error reading field {}: {}", field, e);
        UsfError::TypeMismatchError {
            field: field.to_string(),
            message: e.to_string(),
        }
    })
}

/// Pretty-prints with `indent` spaces per level. Keys come out as
/// `version`, `subjects`, `periods`, `timetable`.
pub fn to_json_string(usf: &Usf, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    usf.serialize(&mut serializer)
        .map_err(|e| UsfError::SerializationError {
            message: e.to_string(),
        })?;

    String::from_utf8(buf).map_err(|e| UsfError::SerializationError {
        message: e.to_string(),
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
