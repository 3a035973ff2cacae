//! Skill extraction from one log entry.

use crate::backend::GenerationConfig;
use crate::prompt::{quote, str_field};
use crate::schema::{non_empty_string, ObjectSchema};
use crate::task::TaskDefinition;
use crate::tasks::MAX_LOG_CHARS;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const NAME: &str = "skills";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsOutput {
    pub skills: Vec<String>,
}

fn prompt(fields: &Map<String, Value>) -> String {
    format!(
        "List the professional and technical skills demonstrated in the \
         following daily industrial attachment log entry. Name each skill \
         briefly (e.g. \"debugging\", \"report writing\"). If none are \
         evident, return an empty list.\n\
         Log entry (as a JSON string): {}\n\
         Respond with a JSON object of the form {{\"skills\": [\"...\"]}}.",
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
            .property(
                "skills",
                json!({
                    "type": "array",
                    "items": {"type": "string", "minLength": 1},
                    "maxItems": 25
                }),
            )
            .required(["skills"])
            .build(),
        prompt,
        json!({"skills": []}),
        GenerationConfig::new(0.2, 256),
    )
}
