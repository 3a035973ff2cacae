//! Structural validator for task inputs and model outputs.
//!
//! Supports the JSON-schema subset the task definitions use:
//! - types: string, integer, number, boolean, array, object, null
//! - `enum` membership
//! - string `minLength` / `maxLength` / `pattern`
//! - numeric `minimum` / `maximum`
//! - array `minItems` / `maxItems` and per-element `items` (recursive)
//! - object `required` / `properties` (recursive) / `additionalProperties`

use crate::schema::error::{ValidationError, ValidationResult};
use regex::Regex;
use serde_json::Value;

/// Validates JSON values against a declared schema, reporting every violated
/// constraint with its field path.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: Value,
    /// In strict mode, object properties not named in the schema are rejected
    /// unless the schema says otherwise via `additionalProperties`.
    strict: bool,
}

impl SchemaValidator {
    pub fn new(schema: Value, strict: bool) -> Self {
        Self { schema, strict }
    }

    /// Strict validator: unknown object properties are rejected.
    pub fn strict(schema: Value) -> Self {
        Self::new(schema, true)
    }

    /// Lenient validator: unknown object properties pass through.
    pub fn lenient(schema: Value) -> Self {
        Self::new(schema, false)
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validate a value against the schema.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let mut errors = Vec::new();
        self.walk(value, &self.schema, "", &mut errors);
        if errors.is_empty() {
            ValidationResult::ok()
        } else {
            ValidationResult::rejected(errors)
        }
    }

    fn walk(&self, value: &Value, schema: &Value, path: &str, errors: &mut Vec<ValidationError>) {
        let declared = schema.get("type").and_then(Value::as_str);

        if schema
            .get("nullable")
            .and_then(Value::as_bool)
            .unwrap_or(false)
            && value.is_null()
        {
            return;
        }

        if let Some(expected) = declared {
            if !type_matches(value, expected) {
                errors.push(ValidationError::new(
                    format!("expected {}, got {}", expected, type_name(value)),
                    path,
                ));
                // Nothing below applies to a value of the wrong type.
                return;
            }
        }

        if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
            if !allowed.contains(value) {
                let listed: Vec<String> = allowed.iter().map(render_enum_value).collect();
                errors.push(ValidationError::new(
                    format!("not one of {}", listed.join(", ")),
                    path,
                ));
            }
        }

        match declared {
            Some("string") => self.check_string(value, schema, path, errors),
            Some("integer") | Some("number") => self.check_number(value, schema, path, errors),
            Some("array") => self.check_array(value, schema, path, errors),
            Some("object") => self.check_object(value, schema, path, errors),
            _ => {}
        }
    }

    fn check_string(
        &self,
        value: &Value,
        schema: &Value,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(s) = value.as_str() else { return };

        if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
            if (s.chars().count() as u64) < min {
                errors.push(ValidationError::new(
                    format!("string shorter than {} characters", min),
                    path,
                ));
            }
        }
        if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
            if (s.chars().count() as u64) > max {
                errors.push(ValidationError::new(
                    format!("string longer than {} characters", max),
                    path,
                ));
            }
        }
        if let Some(pattern) = schema.get("pattern").and_then(Value::as_str) {
            // An unparseable pattern in a schema is a definition bug; skip
            // rather than reject the value for it.
            if let Ok(re) = Regex::new(pattern) {
                if !re.is_match(s) {
                    errors.push(ValidationError::new(
                        format!("does not match pattern {:?}", pattern),
                        path,
                    ));
                }
            }
        }
    }

    fn check_number(
        &self,
        value: &Value,
        schema: &Value,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(n) = value.as_f64() else { return };

        if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
            if n < min {
                errors.push(ValidationError::new(format!("below minimum {}", min), path));
            }
        }
        if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
            if n > max {
                errors.push(ValidationError::new(format!("above maximum {}", max), path));
            }
        }
    }

    fn check_array(
        &self,
        value: &Value,
        schema: &Value,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(items) = value.as_array() else {
            return;
        };

        if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                errors.push(ValidationError::new(
                    format!("fewer than {} items", min),
                    path,
                ));
            }
        }
        if let Some(max) = schema.get("maxItems").and_then(Value::as_u64) {
            if (items.len() as u64) > max {
                errors.push(ValidationError::new(
                    format!("more than {} items", max),
                    path,
                ));
            }
        }
        if let Some(item_schema) = schema.get("items") {
            for (i, item) in items.iter().enumerate() {
                self.walk(item, item_schema, &format!("{}[{}]", path, i), errors);
            }
        }
    }

    fn check_object(
        &self,
        value: &Value,
        schema: &Value,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(obj) = value.as_object() else {
            return;
        };

        if let Some(required) = schema.get("required").and_then(Value::as_array) {
            for name in required.iter().filter_map(Value::as_str) {
                if !obj.contains_key(name) {
                    errors.push(ValidationError::new(
                        "missing required field",
                        join_path(path, name),
                    ));
                }
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        if let Some(props) = properties {
            for (name, prop_schema) in props {
                if let Some(field) = obj.get(name) {
                    self.walk(field, prop_schema, &join_path(path, name), errors);
                }
            }
        }

        let allow_extra = schema
            .get("additionalProperties")
            .and_then(Value::as_bool)
            .unwrap_or(!self.strict);
        if !allow_extra {
            for key in obj.keys() {
                let known = properties.map(|p| p.contains_key(key)).unwrap_or(false);
                if !known {
                    errors.push(ValidationError::new(
                        "unexpected field",
                        join_path(path, key),
                    ));
                }
            }
        }
    }
}

fn join_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

fn type_matches(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        // Unknown type names accept anything.
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn render_enum_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{:?}", s),
        other => other.to_string(),
    }
}
