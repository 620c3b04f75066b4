use chrono::{DateTime, Utc};
use eventline_client::{RequestError, Transport, Verb};
use serde_json::Value as JsonValue;

use crate::call::{fetch, send};
use crate::query::{build_query, segment, with_query, ListResponse, Pagination, QueryField};
use crate::Id;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Event {
    pub id: Id,
    pub org_id: Id,
    /// Set when the event was produced by a trigger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_id: Option<Id>,
    /// Set when the event was produced by a command execution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_id: Option<Id>,
    pub creation_time: Option<DateTime<Utc>>,
    pub event_time: Option<DateTime<Utc>>,
    pub connector: String,
    pub name: String,
    pub data: JsonValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventsRequest {
    pub pagination: Pagination,
    pub pipeline_id: Option<Id>,
    pub connector: Option<String>,
    pub name: Option<String>,
}

const LIST_EVENTS_FIELDS: &[QueryField<ListEventsRequest>] = &[
    QueryField {
        key: "pipeline_id",
        value: |r| r.pipeline_id.clone(),
    },
    QueryField {
        key: "connector",
        value: |r| r.connector.clone(),
    },
    QueryField {
        key: "name",
        value: |r| r.name.clone(),
    },
];

/// Event submitted by `create_event`. A missing `event_time` means now.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub event_time: Option<DateTime<Utc>>,
    pub connector: String,
    pub name: String,
    pub data: JsonValue,
}

impl NewEvent {
    pub fn new(connector: impl Into<String>, name: impl Into<String>, data: JsonValue) -> Self {
        Self {
            event_time: None,
            connector: connector.into(),
            name: name.into(),
            data,
        }
    }

    pub fn at(mut self, event_time: DateTime<Utc>) -> Self {
        self.event_time = Some(event_time);
        self
    }
}

#[derive(serde::Serialize)]
struct EventBody<'a> {
    event_time: DateTime<Utc>,
    connector: &'a str,
    name: &'a str,
    data: &'a JsonValue,
}

pub async fn list_events(
    transport: &dyn Transport,
    request: &ListEventsRequest,
) -> Result<ListResponse<Event>, RequestError> {
    let mut q = request.pagination.to_query();
    q.extend(build_query(request, LIST_EVENTS_FIELDS));
    fetch(transport, &with_query("/v0/events", &q)).await
}

pub async fn get_event(transport: &dyn Transport, id: &str) -> Result<Event, RequestError> {
    fetch(transport, &format!("/v0/events/id/{}", segment(id))).await
}

pub async fn create_event(transport: &dyn Transport, event: &NewEvent) -> Result<Event, RequestError> {
    let body = EventBody {
        event_time: event.event_time.unwrap_or_else(Utc::now),
        connector: &event.connector,
        name: &event.name,
        data: &event.data,
    };
    send(transport, Verb::Post, "/v0/events", &body).await
}
