//! Generic resources: commands, pipelines, tasks and triggers as declared in
//! a project.
//!
//! `Resource<T>` carries the type-specific definition in `spec.data`. The
//! list and get calls are generic over `T`; `JsonValue` works for any type,
//! and [`Command`](crate::Command), [`PipelineSpec`], [`Task`] or [`Trigger`] can be used
//! when the caller knows what it asked for.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use eventline_client::{RequestError, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::call::fetch;
use crate::command::Parameter;
use crate::query::{build_query, segment, with_query, ListResponse, Pagination, QueryField};
use crate::Id;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Resource<T = JsonValue> {
    #[serde(default)]
    pub id: Id,
    #[serde(default)]
    pub org_id: Id,
    #[serde(default)]
    pub project_id: Id,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
    pub spec: ResourceSpec<T>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResourceSpec<T = JsonValue> {
    #[serde(rename = "type")]
    pub kind: ResourceType,
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub data: T,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Command,
    Pipeline,
    Task,
    Trigger,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Command => "command",
            ResourceType::Pipeline => "pipeline",
            ResourceType::Task => "task",
            ResourceType::Trigger => "trigger",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "command" => Ok(ResourceType::Command),
            "pipeline" => Ok(ResourceType::Pipeline),
            "task" => Ok(ResourceType::Task),
            "trigger" => Ok(ResourceType::Trigger),
            other => Err(format!("unknown resource type {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineSpec {
    /// Whether several instances may run at the same time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrent: Option<bool>,
    pub tasks: Vec<PipelineTask>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Name of the task resource.
    pub task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<JsonValue>,
    /// Tasks of this pipeline that must complete first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<OnFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nb_instances: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nb_retries: Option<u32>,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_delay: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnFailure {
    Abort,
    Continue,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Task {
    pub runtime: TaskRuntime,
    pub steps: Vec<TaskStep>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identities: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TaskRuntime {
    /// Only `container` exists today.
    pub name: String,
    pub parameters: RuntimeParameters,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RuntimeParameters {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_type: Option<HostType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub registry_identities: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_containers: Vec<ExtraContainer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostType {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExtraContainer {
    pub name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    pub environment: BTreeMap<String, String>,
}

/// One step of a task; exactly one of `command`, `code` or `source` is
/// expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TaskStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Trigger {
    pub connector: String,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<JsonValue>,
    pub pipelines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResourcesRequest {
    pub pagination: Pagination,
    pub kind: Option<ResourceType>,
}

const LIST_RESOURCES_FIELDS: &[QueryField<ListResourcesRequest>] = &[QueryField {
    key: "type",
    value: |r| r.kind.map(|k| k.as_str().to_string()),
}];

pub async fn list_resources<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: &ListResourcesRequest,
) -> Result<ListResponse<Resource<T>>, RequestError> {
    let mut q = request.pagination.to_query();
    q.extend(build_query(request, LIST_RESOURCES_FIELDS));
    fetch(transport, &with_query("/v0/resources", &q)).await
}

pub async fn get_resource<T: DeserializeOwned>(transport: &dyn Transport, id: &str) -> Result<Resource<T>, RequestError> {
    fetch(transport, &format!("/v0/resources/id/{}", segment(id))).await
}

pub async fn get_resource_by_name<T: DeserializeOwned>(
    transport: &dyn Transport,
    name: &str,
) -> Result<Resource<T>, RequestError> {
    fetch(transport, &format!("/v0/resources/name/{}", segment(name))).await
}
