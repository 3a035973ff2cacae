//! Supervisor-style feedback on one log entry.

use crate::backend::GenerationConfig;
use crate::prompt::{quote, str_field};
use crate::schema::{non_empty_string, ObjectSchema};
use crate::task::TaskDefinition;
use crate::tasks::MAX_LOG_CHARS;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const NAME: &str = "feedback";

/// One assessed dimension: a 1-10 score with a short justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFeedback {
    pub score: i64,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackOutput {
    pub supervisor_comment: String,
    pub technical_depth: ScoredFeedback,
    pub professional_tone: ScoredFeedback,
    pub problem_solving_clarity: ScoredFeedback,
}

/// Schema for one `{score, feedback}` block.
fn scored_block() -> Value {
    ObjectSchema::new()
        .property("score", json!({"type": "integer", "minimum": 1, "maximum": 10}))
        .property("feedback", non_empty_string(None))
        .required(["score", "feedback"])
        .build()
}

fn prompt(fields: &Map<String, Value>) -> String {
    let goals = str_field(fields, "goals");
    let goals_line = if goals.is_empty() {
        String::new()
    } else {
        format!("Stated attachment goals (as a JSON string): {}\n", quote(goals))
    };
    format!(
        "You are an industrial attachment supervisor reviewing a student's \
         daily log entry. Write a short supervisor comment and score the entry \
         from 1 to 10 on technical depth, professional tone, and \
         problem-solving clarity, each with one sentence of feedback.\n\
         Log entry (as a JSON string): {}\n{}\
         Respond with a JSON object of the form \
         {{\"supervisor_comment\": \"...\", \
         \"technical_depth\": {{\"score\": 1-10, \"feedback\": \"...\"}}, \
         \"professional_tone\": {{\"score\": 1-10, \"feedback\": \"...\"}}, \
         \"problem_solving_clarity\": {{\"score\": 1-10, \"feedback\": \"...\"}}}}.",
        quote(str_field(fields, "log_content")),
        goals_line
    )
}

pub(crate) fn definition() -> Result<TaskDefinition> {
    // The fallback mirrors the nested shape the schema declares; a flat
    // fallback here would fail registration.
    let neutral = |dimension: &str| {
        json!({
            "score": 5,
            "feedback": format!("Automated {} feedback could not be generated for this entry.", dimension)
        })
    };

    TaskDefinition::new(
        NAME,
        ObjectSchema::new()
            .property("log_content", non_empty_string(Some(MAX_LOG_CHARS)))
            .property("goals", json!({"type": "string", "maxLength": MAX_LOG_CHARS}))
            .required(["log_content"])
            .build(),
        ObjectSchema::new()
            .property("supervisor_comment", non_empty_string(None))
            .property("technical_depth", scored_block())
            .property("professional_tone", scored_block())
            .property("problem_solving_clarity", scored_block())
            .required([
                "supervisor_comment",
                "technical_depth",
                "professional_tone",
                "problem_solving_clarity",
            ])
            .build(),
        prompt,
        json!({
            "supervisor_comment":
                "Feedback is temporarily unavailable. Please review this entry with your supervisor.",
            "technical_depth": neutral("technical-depth"),
            "professional_tone": neutral("professional-tone"),
            "problem_solving_clarity": neutral("problem-solving")
        }),
        GenerationConfig::new(0.7, 1024),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_is_well_formed() {
        let task = definition().unwrap();
        assert_eq!(task.name(), NAME);
        // Fallback conforms to the nested shape.
        assert_eq!(task.fallback_value()["technical_depth"]["score"], 5);
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let task = definition().unwrap();
        let mut output = task.fallback_value().clone();
        output["technical_depth"]["score"] = json!(11);

        let result = task.output_validator().validate(&output);
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].path, "technical_depth.score");
    }

    #[test]
    fn goals_are_optional() {
        let task = definition().unwrap();
        assert!(task
            .input_validator()
            .validate(&json!({"log_content": "Reviewed the network diagrams."}))
            .is_valid());
        assert!(task
            .input_validator()
            .validate(&json!({
                "log_content": "Reviewed the network diagrams.",
                "goals": "Learn network administration."
            }))
            .is_valid());
    }

    #[test]
    fn prompt_includes_goals_when_present() {
        let with_goals = json!({"log_content": "entry", "goals": "learn Rust"});
        let without = json!({"log_content": "entry"});

        let rendered = prompt(with_goals.as_object().unwrap());
        assert!(rendered.contains("attachment goals"));
        assert!(!prompt(without.as_object().unwrap()).contains("attachment goals"));
    }

    #[test]
    fn typed_output_decodes_from_fallback() {
        let task = definition().unwrap();
        let decoded: FeedbackOutput =
            serde_json::from_value(task.fallback_value().clone()).unwrap();
        assert_eq!(decoded.professional_tone.score, 5);
    }
}
