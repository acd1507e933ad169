use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::NewOrder;

/// Column width of `agent_id` and `item`.
pub const MAX_FIELD_LEN: usize = 255;

/// Key used for errors that are not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field-level error payload, e.g. `{"item": ["This field is required."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, msg: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(msg.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// JSON object form, as sent in a 400 body.
    pub fn to_value(&self) -> Value {
        let obj = self
            .0
            .iter()
            .map(|(field, msgs)| {
                let msgs = msgs.iter().cloned().map(Value::String).collect();
                (field.clone(), Value::Array(msgs))
            })
            .collect::<Map<_, _>>();
        Value::Object(obj)
    }
}

/// Why a create-order body was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Body was not JSON at all.
    #[error("JSON parse error - {0}")]
    Malformed(String),
    /// Body was JSON but one or more fields failed.
    #[error("invalid fields: {}", .0.fields().collect::<Vec<_>>().join(", "))]
    Fields(FieldErrors),
}

impl ValidationError {
    /// Structured payload returned to the caller.
    pub fn payload(&self) -> Value {
        match self {
            Self::Malformed(_) => serde_json::json!({ "detail": self.to_string() }),
            Self::Fields(errs) => errs.to_value(),
        }
    }
}

/// Parse and validate a raw `POST /orders/` body.
pub fn parse_create_order(body: &[u8]) -> Result<NewOrder, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    validate_create_order(&value)
}

/// Validate a create-order payload.
///
/// Rules, applied to `agent_id` then `item`:
/// - the field is present and not null
/// - it is a string (numbers are accepted and stringified)
/// - it is not blank
/// - it is at most [`MAX_FIELD_LEN`] characters
///
/// Every failing field is reported. Accepted values are kept as given.
pub fn validate_create_order(value: &Value) -> Result<NewOrder, ValidationError> {
    let Value::Object(map) = value else {
        let mut errs = FieldErrors::new();
        errs.push(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                kind_name(value)
            ),
        );
        return Err(ValidationError::Fields(errs));
    };

    let mut errs = FieldErrors::new();
    let agent_id = string_field(map, "agent_id", &mut errs);
    let item = string_field(map, "item", &mut errs);

    match (agent_id, item) {
        (Some(agent_id), Some(item)) => Ok(NewOrder { agent_id, item }),
        _ => Err(ValidationError::Fields(errs)),
    }
}

fn string_field(map: &Map<String, Value>, field: &str, errs: &mut FieldErrors) -> Option<String> {
    let raw = match map.get(field) {
        None => {
            errs.push(field, "This field is required.");
            return None;
        }
        Some(Value::Null) => {
            errs.push(field, "This field may not be null.");
            return None;
        }
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            errs.push(field, "Not a valid string.");
            return None;
        }
    };

    if raw.trim().is_empty() {
        errs.push(field, "This field may not be blank.");
        return None;
    }
    if raw.chars().count() > MAX_FIELD_LEN {
        errs.push(
            field,
            format!("Ensure this field has no more than {MAX_FIELD_LEN} characters."),
        );
        return None;
    }
    Some(raw)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_errors(err: ValidationError) -> FieldErrors {
        match err {
            ValidationError::Fields(errs) => errs,
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_order() {
        let out = validate_create_order(&json!({"agent_id": "a1", "item": "latte"})).unwrap();
        assert_eq!(out.agent_id, "a1");
        assert_eq!(out.item, "latte");
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        let out = validate_create_order(&json!({"agent_id": "a1", "item": " flat white "})).unwrap();
        assert_eq!(out.item, " flat white ");
    }

    #[test]
    fn missing_item_is_required() {
        let errs = field_errors(validate_create_order(&json!({"agent_id": "a1"})).unwrap_err());
        assert_eq!(errs.get("item").unwrap(), ["This field is required."]);
        assert!(errs.get("agent_id").is_none());
    }

    #[test]
    fn reports_every_failing_field() {
        let errs = field_errors(validate_create_order(&json!({"item": ""})).unwrap_err());
        assert_eq!(errs.get("agent_id").unwrap(), ["This field is required."]);
        assert_eq!(errs.get("item").unwrap(), ["This field may not be blank."]);
    }

    #[test]
    fn whitespace_only_is_blank() {
        let errs = field_errors(
            validate_create_order(&json!({"agent_id": "a1", "item": "   "})).unwrap_err(),
        );
        assert_eq!(errs.get("item").unwrap(), ["This field may not be blank."]);
    }

    #[test]
    fn null_and_non_string_fields() {
        let errs = field_errors(
            validate_create_order(&json!({"agent_id": null, "item": ["latte"]})).unwrap_err(),
        );
        assert_eq!(errs.get("agent_id").unwrap(), ["This field may not be null."]);
        assert_eq!(errs.get("item").unwrap(), ["Not a valid string."]);
    }

    #[test]
    fn numbers_are_stringified() {
        let out = validate_create_order(&json!({"agent_id": 42, "item": "mocha"})).unwrap();
        assert_eq!(out.agent_id, "42");
    }

    #[test]
    fn rejects_overlong_item() {
        let item = "x".repeat(MAX_FIELD_LEN + 1);
        let errs = field_errors(
            validate_create_order(&json!({"agent_id": "a1", "item": item})).unwrap_err(),
        );
        assert_eq!(
            errs.get("item").unwrap(),
            ["Ensure this field has no more than 255 characters."]
        );

        let item = "x".repeat(MAX_FIELD_LEN);
        assert!(validate_create_order(&json!({"agent_id": "a1", "item": item})).is_ok());
    }

    #[test]
    fn non_object_body() {
        let errs = field_errors(validate_create_order(&json!(["latte"])).unwrap_err());
        assert_eq!(
            errs.get(NON_FIELD_ERRORS).unwrap(),
            ["Invalid data. Expected a dictionary, but got list."]
        );
    }

    #[test]
    fn malformed_body_payload_has_detail() {
        let err = parse_create_order(b"{not json").unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
        let payload = err.payload();
        let detail = payload["detail"].as_str().unwrap();
        assert!(detail.starts_with("JSON parse error - "));
    }

    #[test]
    fn field_errors_payload_shape() {
        let err = parse_create_order(br#"{"agent_id": "a1"}"#).unwrap_err();
        assert_eq!(err.payload(), json!({"item": ["This field is required."]}));
    }
}
