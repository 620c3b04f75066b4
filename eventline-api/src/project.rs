use std::fmt;

use eventline_client::{RequestError, Transport, Verb};

use crate::call::{discard, fetch, send};
use crate::query::{build_query, segment, with_query, ListResponse, QueryField};
use crate::Id;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: Id,
    pub name: String,
    pub org_id: Id,
}

/// Writable part of a project, used for creation and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NewProject {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProjectsRequest {
    pub after: Option<Id>,
    pub size: Option<u32>,
}

const LIST_PROJECTS_FIELDS: &[QueryField<ListProjectsRequest>] = &[
    QueryField {
        key: "after",
        value: |r| r.after.clone(),
    },
    QueryField {
        key: "size",
        value: |r| r.size.map(|n| n.to_string()),
    },
];

/// How `get_project` addresses a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectKey {
    Id(Id),
    Name(String),
}

impl ProjectKey {
    fn path(&self) -> String {
        match self {
            ProjectKey::Id(id) => format!("/v0/projects/id/{}", segment(id)),
            ProjectKey::Name(name) => format!("/v0/projects/name/{}", segment(name)),
        }
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKey::Id(id) => write!(f, "id {id}"),
            ProjectKey::Name(name) => write!(f, "name {name}"),
        }
    }
}

pub async fn list_projects(
    transport: &dyn Transport,
    request: &ListProjectsRequest,
) -> Result<ListResponse<Project>, RequestError> {
    let q = build_query(request, LIST_PROJECTS_FIELDS);
    fetch(transport, &with_query("/v0/projects", &q)).await
}

pub async fn get_project(transport: &dyn Transport, key: &ProjectKey) -> Result<Project, RequestError> {
    fetch(transport, &key.path()).await
}

pub async fn create_project(transport: &dyn Transport, project: &NewProject) -> Result<Project, RequestError> {
    send(transport, Verb::Post, "/v0/projects", project).await
}

pub async fn update_project(
    transport: &dyn Transport,
    id: &str,
    project: &NewProject,
) -> Result<Project, RequestError> {
    send(transport, Verb::Put, &format!("/v0/projects/id/{}", segment(id)), project).await
}

pub async fn delete_project(transport: &dyn Transport, id: &str) -> Result<(), RequestError> {
    discard(transport, Verb::Delete, &format!("/v0/projects/id/{}", segment(id))).await
}
