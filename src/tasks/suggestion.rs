//! Suggesting what the next day's entry could cover.

use crate::backend::GenerationConfig;
use crate::prompt::{quote, str_field};
use crate::schema::{non_empty_string, ObjectSchema};
use crate::task::TaskDefinition;
use crate::tasks::MAX_LOG_CHARS;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const NAME: &str = "suggestion";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionOutput {
    pub suggestion: String,
}

fn prompt(fields: &Map<String, Value>) -> String {
    format!(
        "A student keeps a daily industrial attachment log. Based on their \
         previous entry, suggest in two or three sentences what the next \
         entry could focus on or follow up.\n\
         Previous entry (as a JSON string): {}\n\
         Respond with a JSON object of the form {{\"suggestion\": \"...\"}}.",
        quote(str_field(fields, "previous_log_content"))
    )
}

pub(crate) fn definition() -> Result<TaskDefinition> {
    TaskDefinition::new(
        NAME,
        ObjectSchema::new()
            .property("previous_log_content", non_empty_string(Some(MAX_LOG_CHARS)))
            .required(["previous_log_content"])
            .build(),
        ObjectSchema::new()
            .property("suggestion", non_empty_string(None))
            .required(["suggestion"])
            .build(),
        prompt,
        json!({
            "suggestion":
                "Continue documenting your daily tasks, the challenges you met, and what you learned from them."
        }),
        GenerationConfig::new(0.8, 256),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_is_well_formed() {
        let task = definition().unwrap();
        assert_eq!(task.name(), NAME);
        assert!(!task.fallback_value()["suggestion"]
            .as_str()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn input_uses_previous_entry_field() {
        let task = definition().unwrap();
        assert!(task
            .input_validator()
            .validate(&json!({"previous_log_content": "Configured the switch."}))
            .is_valid());
        // The sentiment/skills field name is not accepted here.
        assert!(!task
            .input_validator()
            .validate(&json!({"log_content": "Configured the switch."}))
            .is_valid());
    }

    #[test]
    fn prompt_interpolates_previous_entry() {
        let fields = json!({"previous_log_content": "Configured the core switch."});
        let rendered = prompt(fields.as_object().unwrap());
        assert!(rendered.contains("Configured the core switch."));
    }
}
