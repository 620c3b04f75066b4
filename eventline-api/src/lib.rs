#![forbid(unsafe_code)]

//! Typed Eventline API resources.
//!
//! Every wrapper takes a `&dyn Transport` (usually an
//! [`eventline_client::HttpTransport`]), maps its request to a verb, path and
//! optional JSON body, and narrows the decoded response. Transport errors are
//! returned unchanged.

pub mod account;
mod call;
pub mod command;
pub mod context;
pub mod env;
pub mod event;
pub mod organization;
pub mod pipeline;
pub mod project;
pub mod query;
pub mod resource;

/// Identifiers are opaque strings on the wire.
pub type Id = String;

pub use crate::account::{Account, AccountSettings, DateFormat};
pub use crate::command::{Command, Parameter, ParameterType};
pub use crate::context::{Context, ContextError, CONTEXT_PATH};
pub use crate::env::TaskEnvironment;
pub use crate::event::{Event, ListEventsRequest, NewEvent};
pub use crate::organization::Organization;
pub use crate::pipeline::{Pipeline, PipelineStatus, Scratchpad};
pub use crate::project::{ListProjectsRequest, NewProject, Project, ProjectKey};
pub use crate::query::{build_query, with_query, Cursor, ListResponse, Pagination, Query, QueryField};
pub use crate::resource::{ListResourcesRequest, Resource, ResourceSpec, ResourceType};

pub use eventline_client::{ErrorCode, RequestError, Transport};
