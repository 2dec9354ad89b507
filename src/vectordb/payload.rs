//! Conversion from Qdrant payloads to [`Document`]s.
//!
//! Points are stored in the LangChain layout: the text under `page_content` and a
//! nested `metadata` object.

use std::collections::HashMap;

use qdrant_client::qdrant::Value;
use qdrant_client::qdrant::value::Kind;

use crate::document::Document;

use super::error::VectorDbError;

pub const CONTENT_FIELD: &str = "page_content";
pub const METADATA_FIELD: &str = "metadata";

/// Converts a Qdrant payload value into JSON. Non-finite doubles become `null`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match &value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(*b),
        Some(Kind::IntegerValue(i)) => serde_json::Value::from(*i),
        Some(Kind::DoubleValue(d)) => serde_json::Number::from_f64(*d)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s.clone()),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.iter().map(value_to_json).collect())
        }
        Some(Kind::StructValue(st)) => serde_json::Value::Object(
            st.fields
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Builds a [`Document`] from a point payload.
///
/// `page_content` must be a string. `metadata` is optional but must be an object when
/// present.
pub fn document_from_payload(
    collection: &str,
    payload: &HashMap<String, Value>,
) -> Result<Document, VectorDbError> {
    let content = match payload.get(CONTENT_FIELD).and_then(|v| v.kind.as_ref()) {
        Some(Kind::StringValue(s)) => s.clone(),
        _ => {
            return Err(VectorDbError::MalformedPayload {
                collection: collection.to_string(),
                message: format!("missing string field '{CONTENT_FIELD}'"),
            });
        }
    };

    let metadata = match payload.get(METADATA_FIELD).map(value_to_json) {
        None | Some(serde_json::Value::Null) => HashMap::new(),
        Some(serde_json::Value::Object(map)) => map.into_iter().collect(),
        Some(other) => {
            return Err(VectorDbError::MalformedPayload {
                collection: collection.to_string(),
                message: format!("'{METADATA_FIELD}' is not an object: {other}"),
            });
        }
    };

    Ok(Document { content, metadata })
}
