//! Task definitions and the immutable task registry.
//!
//! A task is one named AI-assisted operation: a prompt/schema pair plus a
//! fixed generation config and a static fallback value. Tasks are registered
//! once at process start and looked up by name per call; nothing about a
//! definition mutates afterwards.

use crate::backend::GenerationConfig;
use crate::prompt::PromptFn;
use crate::schema::SchemaValidator;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One named structured-generation task.
pub struct TaskDefinition {
    name: String,
    input: SchemaValidator,
    output: SchemaValidator,
    prompt: PromptFn,
    fallback_value: Value,
    config: GenerationConfig,
}

impl TaskDefinition {
    /// Define a task.
    ///
    /// The fallback value is checked against the output schema here: a
    /// fallback that does not itself satisfy the declared shape is a
    /// configuration error surfaced at registration, not a latent runtime
    /// surprise for rendering code.
    pub fn new(
        name: impl Into<String>,
        input_schema: Value,
        output_schema: Value,
        prompt: PromptFn,
        fallback_value: Value,
        config: GenerationConfig,
    ) -> Result<Self> {
        let name = name.into();
        let output = SchemaValidator::strict(output_schema);
        let fallback_check = output.validate(&fallback_value);
        if !fallback_check.is_valid() {
            return Err(Error::configuration(format!(
                "task {:?}: fallback value does not satisfy the output schema: {}",
                name,
                fallback_check.error_messages().join("; ")
            )));
        }

        Ok(Self {
            name,
            input: SchemaValidator::strict(input_schema),
            output,
            prompt,
            fallback_value,
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_validator(&self) -> &SchemaValidator {
        &self.input
    }

    pub fn output_validator(&self) -> &SchemaValidator {
        &self.output
    }

    pub fn output_schema(&self) -> &Value {
        self.output.schema()
    }

    /// Render the task's prompt from validated input fields.
    pub fn build_prompt(&self, fields: &Map<String, Value>) -> String {
        (self.prompt)(fields)
    }

    /// The static fallback value, identical for every failed call.
    pub fn fallback_value(&self) -> &Value {
        &self.fallback_value
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}

impl std::fmt::Debug for TaskDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskDefinition")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Name-to-definition map, built once and immutable thereafter.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, TaskDefinition>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task. Registering the same name twice is a configuration
    /// error — definitions are not silently replaced.
    pub fn register(&mut self, task: TaskDefinition) -> Result<()> {
        let name = task.name().to_string();
        if self.tasks.contains_key(&name) {
            return Err(Error::configuration(format!(
                "task {:?} is already registered",
                name
            )));
        }
        self.tasks.insert(name, task);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TaskDefinition> {
        self.tasks.get(name)
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
