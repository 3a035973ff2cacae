//! Builders for declaring task schemas as data.

use serde_json::{json, Value};

/// Builder for object schemas.
///
/// Task definitions declare their input and output shapes with this rather
/// than hand-assembling `serde_json::Map`s.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    properties: Vec<(String, Value)>,
    required: Vec<String>,
    allow_additional: bool,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.properties.push((name.into(), schema));
        self
    }

    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    /// Permit properties beyond the declared ones (off by default — model
    /// output is held to exactly the declared shape).
    pub fn allow_additional(mut self) -> Self {
        self.allow_additional = true;
        self
    }

    pub fn build(self) -> Value {
        let mut properties = serde_json::Map::new();
        for (name, schema) in self.properties {
            properties.insert(name, schema);
        }

        let mut map = serde_json::Map::new();
        map.insert("type".into(), json!("object"));
        map.insert("properties".into(), properties.into());
        if !self.required.is_empty() {
            map.insert("required".into(), self.required.into());
        }
        if !self.allow_additional {
            map.insert("additionalProperties".into(), json!(false));
        }
        map.into()
    }
}

/// Schema for a non-empty string, optionally capped in length.
pub fn non_empty_string(max_length: Option<u64>) -> Value {
    let mut schema = json!({"type": "string", "minLength": 1});
    if let Some(max) = max_length {
        schema["maxLength"] = max.into();
    }
    schema
}
