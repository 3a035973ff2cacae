//! Sentiment classification for one log entry.

use crate::backend::GenerationConfig;
use crate::prompt::{quote, str_field};
use crate::schema::{non_empty_string, ObjectSchema};
use crate::task::TaskDefinition;
use crate::tasks::MAX_LOG_CHARS;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const NAME: &str = "sentiment";

/// Overall tone of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentOutput {
    pub sentiment: Sentiment,
}

fn prompt(fields: &Map<String, Value>) -> String {
    format!(
        "Classify the overall sentiment of the following daily industrial \
         attachment log entry as exactly one of Positive, Neutral, or Negative.\n\
         Log entry (as a JSON string): {}\n\
         Respond with a JSON object of the form {{\"sentiment\": \"Positive\" | \"Neutral\" | \"Negative\"}}.",
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
                "sentiment",
                json!({"type": "string", "enum": ["Positive", "Neutral", "Negative"]}),
            )
            .required(["sentiment"])
            .build(),
        prompt,
        json!({"sentiment": "Neutral"}),
        GenerationConfig::new(0.0, 64),
    )
}
