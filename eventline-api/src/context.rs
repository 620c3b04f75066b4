//! Execution context of a task running inside an Eventline pipeline.
//!
//! The runner writes a JSON document describing the triggering event and the
//! task parameters before the task starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::event::Event;
use crate::Id;

pub const CONTEXT_PATH: &str = "/eventline/task/context";

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("cannot read context file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid context file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Context {
    /// Event that caused the pipeline to run.
    pub event: Event,
    /// Parameters given to the task in the pipeline definition.
    #[serde(default)]
    pub task_parameters: JsonValue,
    /// Instance number, from 1 to the number of instances of the task.
    #[serde(default = "first_instance", deserialize_with = "string_or_number")]
    pub instance_id: Id,
    /// Identities listed in the task definition, by name.
    #[serde(default)]
    pub identities: JsonValue,
}

impl Context {
    pub fn is_launched_by_command(&self) -> bool {
        is_launched_by_command(self)
    }

    pub fn is_launched_by_event(&self) -> bool {
        is_launched_by_event(self)
    }
}

fn first_instance() -> Id {
    "1".to_string()
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Id, D::Error> {
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "instance_id must be a string or a number, got {other}"
        ))),
    }
}

/// Reads the context from [`CONTEXT_PATH`].
pub async fn load_context() -> Result<Context, ContextError> {
    load_context_from(CONTEXT_PATH).await
}

pub async fn load_context_from(path: impl AsRef<Path>) -> Result<Context, ContextError> {
    let path = path.as_ref();
    let raw = tokio::fs::read(path).await.map_err(|source| ContextError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| ContextError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Commands produce events without a trigger.
pub fn is_launched_by_command(ctx: &Context) -> bool {
    ctx.event.trigger_id.is_none()
}

pub fn is_launched_by_event(ctx: &Context) -> bool {
    ctx.event.command_id.is_none()
}
