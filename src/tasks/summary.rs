//! Monthly summary over a set of log entries.

use crate::backend::GenerationConfig;
use crate::prompt::{quote, quoted_list, str_field, str_list_field};
use crate::schema::{non_empty_string, ObjectSchema};
use crate::task::TaskDefinition;
use crate::tasks::MAX_LOG_CHARS;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const NAME: &str = "monthly_summary";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummaryOutput {
    pub introduction: String,
    pub duties: String,
    pub problems: String,
    pub analysis: String,
    pub conclusion: String,
}

fn prompt(fields: &Map<String, Value>) -> String {
    let logs = quoted_list(str_list_field(fields, "logs"));
    let previous = str_field(fields, "previous_conclusion");
    let continuity = if previous.is_empty() {
        String::new()
    } else {
        format!(
            "The previous month's conclusion (as a JSON string) was: {}\n\
             Make the introduction follow on from it.\n",
            quote(previous)
        )
    };
    format!(
        "Write a monthly industrial attachment summary from the following \
         daily log entries. Cover five sections: an introduction, the duties \
         performed, the problems encountered, an analysis of what was \
         learned, and a conclusion.\n\
         Daily entries (each as a JSON string):\n{}\n{}\
         Respond with a JSON object of the form \
         {{\"introduction\": \"...\", \"duties\": \"...\", \"problems\": \"...\", \
         \"analysis\": \"...\", \"conclusion\": \"...\"}}.",
        logs, continuity
    )
}

pub(crate) fn definition() -> Result<TaskDefinition> {
    TaskDefinition::new(
        NAME,
        ObjectSchema::new()
            .property(
                "logs",
                json!({
                    "type": "array",
                    "items": {"type": "string", "minLength": 1, "maxLength": MAX_LOG_CHARS},
                    "minItems": 1,
                    "maxItems": 31
                }),
            )
            .property("previous_conclusion", json!({"type": "string", "maxLength": MAX_LOG_CHARS}))
            .required(["logs"])
            .build(),
        ObjectSchema::new()
            .property("introduction", non_empty_string(None))
            .property("duties", non_empty_string(None))
            .property("problems", non_empty_string(None))
            .property("analysis", non_empty_string(None))
            .property("conclusion", non_empty_string(None))
            .required(["introduction", "duties", "problems", "analysis", "conclusion"])
            .build(),
        prompt,
        json!({
            "introduction":
                "This month of the industrial attachment involved a range of day-to-day duties recorded in the daily logs.",
            "duties":
                "Daily duties were carried out as assigned and recorded in the individual log entries for this month.",
            "problems":
                "Challenges encountered during the month are described in the individual daily entries.",
            "analysis":
                "The month provided practical exposure to the workplace; see the daily entries for specifics.",
            "conclusion":
                "An automatic summary was unavailable for this month; the daily log entries remain the full record."
        }),
        GenerationConfig::new(0.6, 2048),
    )
}
