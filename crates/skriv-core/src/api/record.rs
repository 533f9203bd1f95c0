//! Record normalization
//!
//! Backends disagree about how a document identifier is spelled and
//! whether the response payload is wrapped in a `{ "data": ... }`
//! envelope. Everything here is pure so the normalization rules can be
//! tested without a transport.

use serde_json::Value;

use crate::models::Document;

use super::error::{ApiError, ApiResult};

/// Identifier field names, in priority order
pub const ID_FIELDS: &[&str] = &["id", "_id", "rowid", "_rowid", "_Id", "_ID"];

/// Strip a `{ "data": ... }` envelope from a response body
///
/// A no-op when the body is not an object or carries no `data` key.
pub fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Extract the canonical id from a backend record
///
/// Consults [`ID_FIELDS`] in order. String and numeric values are
/// accepted; empty strings are not ids.
pub fn normalize_id(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    for field in ID_FIELDS {
        let id = match object.get(*field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => continue,
        };
        if !id.is_empty() {
            return Some(id);
        }
    }
    None
}

/// Build a [`Document`] from a backend record
///
/// `fallback_id` is used when the record carries no recognizable id
/// field (e.g. the caller already knows the id from the request path).
pub fn document_from_value(value: &Value, fallback_id: Option<&str>) -> ApiResult<Document> {
    let id = normalize_id(value)
        .or_else(|| {
            fallback_id
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        })
        .ok_or_else(|| ApiError::malformed("record carries no recognizable id field"))?;

    let field = |name: &str| -> String {
        value
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Ok(Document {
        id,
        title: field("title"),
        content: field("content"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_present() {
        let value = json!({ "data": [{ "id": "1" }] });
        assert_eq!(unwrap_envelope(value), json!([{ "id": "1" }]));
    }

    #[test]
    fn test_unwrap_envelope_absent() {
        let value = json!({ "id": "1", "title": "T" });
        assert_eq!(unwrap_envelope(value.clone()), value);

        let array = json!([1, 2]);
        assert_eq!(unwrap_envelope(array.clone()), array);
    }

    #[test]
    fn test_normalize_id_priority_order() {
        // Every spelling normalizes
        for field in ID_FIELDS {
            let value = json!({ *field: "abc" });
            assert_eq!(normalize_id(&value), Some("abc".to_string()), "{field}");
        }

        // Earlier fields win over later ones
        let value = json!({ "_ID": "last", "rowid": "middle", "id": "first" });
        assert_eq!(normalize_id(&value), Some("first".to_string()));

        let value = json!({ "_rowid": 8, "_Id": "x" });
        assert_eq!(normalize_id(&value), Some("8".to_string()));
    }

    #[test]
    fn test_normalize_id_numeric() {
        let value = json!({ "rowid": 42 });
        assert_eq!(normalize_id(&value), Some("42".to_string()));
    }

    #[test]
    fn test_normalize_id_rejects_empty_and_missing() {
        assert_eq!(normalize_id(&json!({ "id": "" })), None);
        assert_eq!(normalize_id(&json!({ "title": "T" })), None);
        assert_eq!(normalize_id(&json!("not an object")), None);
        // An empty id falls through to the next candidate field
        let value = json!({ "id": "", "_id": "real" });
        assert_eq!(normalize_id(&value), Some("real".to_string()));
    }

    #[test]
    fn test_document_from_value() {
        let value = json!({ "_id": 7, "title": "T", "content": "C" });
        let doc = document_from_value(&value, None).unwrap();
        assert_eq!(doc.id, "7");
        assert_eq!(doc.title, "T");
        assert_eq!(doc.content, "C");
    }

    #[test]
    fn test_document_from_value_fallback_id() {
        let value = json!({ "title": "T" });
        let doc = document_from_value(&value, Some("from-path")).unwrap();
        assert_eq!(doc.id, "from-path");
        assert_eq!(doc.title, "T");
        assert!(doc.content.is_empty());
    }

    #[test]
    fn test_document_from_value_no_id_at_all() {
        let value = json!({ "title": "T" });
        let err = document_from_value(&value, None).unwrap_err();
        assert!(matches!(err, ApiError::Malformed { .. }));

        // An empty fallback is not an id either
        let err = document_from_value(&value, Some("")).unwrap_err();
        assert!(matches!(err, ApiError::Malformed { .. }));
    }
}
