//! Polishing a log entry into clearer professional prose.

use crate::backend::GenerationConfig;
use crate::prompt::{quote, str_field};
use crate::schema::{non_empty_string, ObjectSchema};
use crate::task::TaskDefinition;
use crate::tasks::MAX_LOG_CHARS;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const NAME: &str = "polish";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolishOutput {
    pub polished_content: String,
}

fn prompt(fields: &Map<String, Value>) -> String {
    format!(
        "Rewrite the following daily industrial attachment log entry in \
         clear, professional language. Keep every fact, do not invent new \
         activities, and keep roughly the original length.\n\
         Log entry (as a JSON string): {}\n\
         Respond with a JSON object of the form {{\"polished_content\": \"...\"}}.",
        quote(str_field(fields, "log_content"))
    )
}

pub(crate) fn definition() -> Result<TaskDefinition> {
    TaskDefinition::new(
        NAME,
        ObjectSchema::new()
            .property("log_content", non_empty_string(Some(MAX_LOG_CHARS)))
            .required(["log_content"])
            .build(),
        ObjectSchema::new()
            .property("polished_content", non_empty_string(None))
            .required(["polished_content"])
            .build(),
        prompt,
        // Static by contract: every fallback carries the identical value.
        // Callers still hold the original entry text.
        json!({
            "polished_content":
                "Automatic polishing was unavailable for this entry; the original text has been kept."
        }),
        GenerationConfig::new(0.4, 1024),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_is_well_formed() {
        let task = definition().unwrap();
        assert_eq!(task.name(), NAME);
        assert!(task.fallback_value()["polished_content"]
            .as_str()
            .unwrap()
            .contains("original text has been kept"));
    }

    #[test]
    fn output_schema_rejects_empty_polish() {
        let task = definition().unwrap();
        assert!(!task
            .output_validator()
            .validate(&json!({"polished_content": ""}))
            .is_valid());
    }

    #[test]
    fn prompt_is_pure() {
        let fields = json!({"log_content": "today i fix printer and helped with cables"});
        let fields = fields.as_object().unwrap();
        assert_eq!(prompt(fields), prompt(fields));
    }
}
