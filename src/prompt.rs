//! Prompt rendering helpers.
//!
//! Templates are plain functions of their validated input fields: same input,
//! byte-identical prompt, no I/O. Free-text fields are always interpolated
//! through [`quote`] so user content is carried as an opaque JSON string
//! literal — newlines, quotes, and anything resembling an instruction or a
//! structural marker stay inside the quotes.

use serde_json::{Map, Value};

/// A pure prompt template: validated input fields in, instruction string out.
pub type PromptFn = fn(&Map<String, Value>) -> String;

/// Encode free text as a JSON string literal.
///
/// This is the only way task templates may interpolate user-supplied text.
pub fn quote(text: &str) -> String {
    // Encoding a &str as JSON cannot fail.
    serde_json::to_string(text).unwrap_or_else(|_| String::from("\"\""))
}

/// Render a list of free-text entries as numbered, quoted lines.
pub fn quoted_list<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, quote(item)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fetch a string field from validated input. Input validation has already
/// guaranteed presence and type for required fields; the empty-string default
/// only covers optional fields.
pub fn str_field<'a>(fields: &'a Map<String, Value>, name: &str) -> &'a str {
    fields.get(name).and_then(Value::as_str).unwrap_or("")
}

/// Fetch a string-array field from validated input.
pub fn str_list_field<'a>(fields: &'a Map<String, Value>, name: &str) -> Vec<&'a str> {
    fields
        .get(name)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
