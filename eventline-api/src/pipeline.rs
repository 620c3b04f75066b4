use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use eventline_client::{Decoded, RequestError, Transport, Verb};
use serde_json::Value as JsonValue;

use crate::call::{discard, fetch};
use crate::query::{segment, with_query, ListResponse, Pagination};
use crate::Id;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Pipeline {
    pub id: Id,
    pub event_id: Option<Id>,
    pub org_id: Id,
    pub project_id: Id,
    pub trigger_id: Option<Id>,
    pub name: String,
    pub concurrent: bool,
    pub creation_time: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: PipelineStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    #[default]
    Created,
    Started,
    Aborted,
    Successful,
    Failed,
    /// Status added server-side after this crate was released.
    #[serde(other)]
    Unknown,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Created => "created",
            PipelineStatus::Started => "started",
            PipelineStatus::Aborted => "aborted",
            PipelineStatus::Successful => "successful",
            PipelineStatus::Failed => "failed",
            PipelineStatus::Unknown => "unknown",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            PipelineStatus::Aborted | PipelineStatus::Successful | PipelineStatus::Failed
        )
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value store attached to a pipeline.
pub type Scratchpad = BTreeMap<String, String>;

pub async fn list_pipelines(
    transport: &dyn Transport,
    pagination: &Pagination,
) -> Result<ListResponse<Pipeline>, RequestError> {
    fetch(transport, &with_query("/v0/pipelines", &pagination.to_query())).await
}

pub async fn get_pipeline(transport: &dyn Transport, id: &str) -> Result<Pipeline, RequestError> {
    fetch(transport, &pipeline_path(id)).await
}

pub async fn get_scratchpad(transport: &dyn Transport, pipeline_id: &str) -> Result<Scratchpad, RequestError> {
    fetch(transport, &scratchpad_path(pipeline_id)).await
}

pub async fn delete_scratchpad(transport: &dyn Transport, pipeline_id: &str) -> Result<(), RequestError> {
    discard(transport, Verb::Delete, &scratchpad_path(pipeline_id)).await
}

/// Value stored under `key`. Text bodies are returned as is, JSON strings
/// are unwrapped and any other JSON value is rendered compactly.
pub async fn get_scratchpad_entry(
    transport: &dyn Transport,
    pipeline_id: &str,
    key: &str,
) -> Result<String, RequestError> {
    let reply = transport
        .call(Verb::Get, &entry_path(pipeline_id, key), None)
        .await?;
    Ok(match reply.body {
        Decoded::Text(s) => s,
        Decoded::Json(JsonValue::String(s)) => s,
        Decoded::Json(other) => other.to_string(),
    })
}

/// Stores `value` under `key`; the request body is the raw value.
pub async fn set_scratchpad_entry(
    transport: &dyn Transport,
    pipeline_id: &str,
    key: &str,
    value: &str,
) -> Result<(), RequestError> {
    transport
        .call(Verb::Put, &entry_path(pipeline_id, key), Some(value.to_string()))
        .await
        .map(|_| ())
}

pub async fn delete_scratchpad_entry(
    transport: &dyn Transport,
    pipeline_id: &str,
    key: &str,
) -> Result<(), RequestError> {
    discard(transport, Verb::Delete, &entry_path(pipeline_id, key)).await
}

fn pipeline_path(id: &str) -> String {
    format!("/v0/pipelines/id/{}", segment(id))
}

fn scratchpad_path(pipeline_id: &str) -> String {
    format!("{}/scratchpad", pipeline_path(pipeline_id))
}

fn entry_path(pipeline_id: &str, key: &str) -> String {
    format!("{}/key/{}", scratchpad_path(pipeline_id), segment(key))
}
