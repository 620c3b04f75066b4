mod common;

use chrono::{TimeZone, Utc};
use common::FakeTransport;
use eventline_api::account::{get_account, get_current_account, list_accounts};
use eventline_api::event::{create_event, get_event, list_events};
use eventline_api::organization::get_organization;
use eventline_api::pipeline::{
    delete_scratchpad, delete_scratchpad_entry, get_pipeline, get_scratchpad, get_scratchpad_entry, list_pipelines,
    set_scratchpad_entry,
};
use eventline_api::project::{create_project, delete_project, get_project, list_projects, update_project};
use eventline_api::resource::{get_resource, get_resource_by_name, list_resources, Trigger};
use eventline_api::{
    ErrorCode, ListEventsRequest, ListProjectsRequest, ListResourcesRequest, NewEvent, NewProject, Pagination,
    PipelineStatus, ProjectKey, RequestError, ResourceType,
};
use eventline_client::{Decoded, Reply, Verb};
use serde_json::{json, Value as JsonValue};

#[tokio::test]
async fn get_account_narrows_the_scenario_body() {
    let t = FakeTransport::json(json!({"id": "42", "name": "Ada"}));
    let account = get_account(&t, "42").await.unwrap();

    assert_eq!(account.id, "42");
    assert_eq!(account.name, "Ada");
    assert!(!account.disabled);
    let call = t.only_call();
    assert_eq!(call.verb, Verb::Get);
    assert_eq!(call.path, "/v0/accounts/id/42");
    assert_eq!(call.body, None);
}

#[tokio::test]
async fn transport_errors_pass_through_unchanged() {
    let err = RequestError::new(
        Some(404),
        ErrorCode::from_server("not_found"),
        json!({}),
        Some("no such account".to_string()),
    );
    let t = FakeTransport::replying(Err(err.clone()));

    assert_eq!(get_account(&t, "42").await.unwrap_err(), err);
}

#[tokio::test]
async fn unnarrowable_value_is_invalid_json() {
    let t = FakeTransport::json(json!("not an account"));
    let err = get_account(&t, "42").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidJson);
    assert_eq!(err.data, json!("not an account"));
    assert_eq!(err.status, Some(200));
}

#[tokio::test]
async fn unnarrowable_create_reply_keeps_its_status() {
    let t = FakeTransport::new();
    t.push_reply(Ok(Reply::new(201, Decoded::Text("created".to_string()))));
    let err = create_project(&t, &NewProject { name: "main".to_string() }).await.unwrap_err();
    assert_eq!(err.status, Some(201));
    assert_eq!(err.code, ErrorCode::InvalidJson);
    assert_eq!(err.data, json!("created"));
}

#[tokio::test]
async fn list_without_optional_fields_has_no_query() {
    let t = FakeTransport::json(json!({"elements": []}));
    list_accounts(&t, &Pagination::default()).await.unwrap();
    list_pipelines(&t, &Pagination::default()).await.unwrap();
    list_events(&t, &ListEventsRequest::default()).await.unwrap();
    list_projects(&t, &ListProjectsRequest::default()).await.unwrap();
    list_resources::<JsonValue>(&t, &ListResourcesRequest::default()).await.unwrap();

    let paths: Vec<String> = t.calls().into_iter().map(|c| c.path).collect();
    assert_eq!(
        paths,
        vec!["/v0/accounts", "/v0/pipelines", "/v0/events", "/v0/projects", "/v0/resources"]
    );
}

#[tokio::test]
async fn list_accounts_follows_cursor() {
    let t = FakeTransport::json(json!({
        "elements": [{"id": "1"}, {"id": "2"}],
        "next": {"after": "2", "size": 2}
    }));
    let page = list_accounts(&t, &Pagination::first(2)).await.unwrap();
    assert_eq!(page.elements.len(), 2);
    assert!(page.previous.is_none());

    let next = page.next.unwrap().to_pagination();
    list_accounts(&t, &next).await.unwrap();

    let calls = t.calls();
    assert_eq!(calls[0].path, "/v0/accounts?size=2");
    assert_eq!(calls[1].path, "/v0/accounts?after=2&size=2");
}

#[tokio::test]
async fn current_account_and_organization() {
    let t = FakeTransport::json(json!({"id": "a1", "settings": {"date_format": "absolute"}}));
    let account = get_current_account(&t).await.unwrap();
    assert_eq!(account.settings.date_format, eventline_api::DateFormat::Absolute);

    t.push(Ok(Decoded::Json(json!({"id": "o1", "name": "Exograd", "non_essential_mail_opt_in": true}))));
    let org = get_organization(&t).await.unwrap();
    assert_eq!(org.name, "Exograd");
    assert!(org.non_essential_mail_opt_in);
    assert_eq!(org.vat_id_number, None);

    let paths: Vec<String> = t.calls().into_iter().map(|c| c.path).collect();
    assert_eq!(paths, vec!["/v0/account", "/v0/org"]);
}

#[tokio::test]
async fn project_calls_use_expected_verbs_and_bodies() {
    let t = FakeTransport::new();
    let new = NewProject {
        name: "main".to_string(),
    };

    t.push(Ok(Decoded::Json(json!({"id": "p1", "name": "main", "org_id": "o1"}))));
    let created = create_project(&t, &new).await.unwrap();
    assert_eq!(created.id, "p1");

    update_project(&t, "p1", &new).await.unwrap();
    get_project(&t, &ProjectKey::Name("my project".to_string())).await.unwrap();
    get_project(&t, &ProjectKey::Id("p1".to_string())).await.unwrap();
    t.push(Ok(Decoded::Text(String::new())));
    delete_project(&t, "p1").await.unwrap();

    let calls = t.calls();
    assert_eq!((calls[0].verb, calls[0].path.as_str()), (Verb::Post, "/v0/projects"));
    assert_eq!(calls[0].json_body(), json!({"name": "main"}));
    assert_eq!((calls[1].verb, calls[1].path.as_str()), (Verb::Put, "/v0/projects/id/p1"));
    assert_eq!(calls[1].json_body(), json!({"name": "main"}));
    assert_eq!(calls[2].path, "/v0/projects/name/my%20project");
    assert_eq!(calls[3].path, "/v0/projects/id/p1");
    assert_eq!((calls[4].verb, calls[4].body.as_deref()), (Verb::Delete, None));
}

#[tokio::test]
async fn list_projects_maps_after_and_size() {
    let t = FakeTransport::json(json!({"elements": [{"id": "p1", "name": "main"}]}));
    let req = ListProjectsRequest {
        after: Some("p0".to_string()),
        size: Some(10),
    };
    let page = list_projects(&t, &req).await.unwrap();
    assert_eq!(page.elements[0].name, "main");
    assert_eq!(t.only_call().path, "/v0/projects?after=p0&size=10");
}

#[tokio::test]
async fn list_events_adds_filters_after_pagination() {
    let t = FakeTransport::json(json!({"elements": []}));
    let req = ListEventsRequest {
        pagination: Pagination {
            reverse: Some(true),
            ..Pagination::default()
        },
        pipeline_id: Some("pl1".to_string()),
        connector: None,
        name: Some("push".to_string()),
    };
    list_events(&t, &req).await.unwrap();
    assert_eq!(t.only_call().path, "/v0/events?reverse=true&pipeline_id=pl1&name=push");
}

#[tokio::test]
async fn create_event_sends_documented_shape() {
    let t = FakeTransport::json(json!({"id": "e1", "name": "push", "connector": "github"}));
    let at = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();
    let event = NewEvent::new("github", "push", json!({"ref": "main"})).at(at);

    let created = create_event(&t, &event).await.unwrap();
    assert_eq!(created.id, "e1");

    let call = t.only_call();
    assert_eq!((call.verb, call.path.as_str()), (Verb::Post, "/v0/events"));
    let body = call.json_body();
    assert_eq!(body["connector"], "github");
    assert_eq!(body["name"], "push");
    assert_eq!(body["data"], json!({"ref": "main"}));
    let sent: chrono::DateTime<Utc> = body["event_time"].as_str().unwrap().parse().unwrap();
    assert_eq!(sent, at);
    assert_eq!(body.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn create_event_defaults_time_to_now() {
    let t = FakeTransport::new();
    let before = Utc::now();
    create_event(&t, &NewEvent::new("generic", "tick", json!({}))).await.unwrap();
    let after = Utc::now();

    let body = t.only_call().json_body();
    let sent: chrono::DateTime<Utc> = body["event_time"].as_str().unwrap().parse().unwrap();
    assert!(sent >= before && sent <= after);
}

#[tokio::test]
async fn get_event_keeps_origin_ids() {
    let t = FakeTransport::json(json!({"id": "e1", "command_id": "c1", "data": {"x": 1}}));
    let event = get_event(&t, "e1").await.unwrap();
    assert_eq!(event.command_id.as_deref(), Some("c1"));
    assert_eq!(event.trigger_id, None);
    assert_eq!(event.data, json!({"x": 1}));
    assert_eq!(t.only_call().path, "/v0/events/id/e1");
}

#[tokio::test]
async fn get_pipeline_narrows_status_and_times() {
    let t = FakeTransport::json(json!({
        "id": "pl1",
        "name": "deploy",
        "status": "successful",
        "start_time": "2021-06-01T12:00:00Z",
        "end_time": "2021-06-01T12:05:00Z"
    }));
    let p = get_pipeline(&t, "pl1").await.unwrap();
    assert_eq!(p.status, PipelineStatus::Successful);
    assert!(p.status.is_finished());
    assert_eq!(p.start_time, Some(Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap()));
    assert_eq!(t.only_call().path, "/v0/pipelines/id/pl1");
}

#[tokio::test]
async fn scratchpad_calls() {
    let t = FakeTransport::new();
    t.push(Ok(Decoded::Json(json!({"a": "1", "b": "2"}))));
    let pad = get_scratchpad(&t, "pl1").await.unwrap();
    assert_eq!(pad.get("b").map(String::as_str), Some("2"));

    t.push(Ok(Decoded::Text("v1".to_string())));
    assert_eq!(get_scratchpad_entry(&t, "pl1", "my key").await.unwrap(), "v1");

    set_scratchpad_entry(&t, "pl1", "my key", "v2").await.unwrap();
    delete_scratchpad_entry(&t, "pl1", "my key").await.unwrap();
    delete_scratchpad(&t, "pl1").await.unwrap();

    let calls = t.calls();
    assert_eq!(calls[0].path, "/v0/pipelines/id/pl1/scratchpad");
    assert_eq!(calls[1].path, "/v0/pipelines/id/pl1/scratchpad/key/my%20key");
    assert_eq!((calls[2].verb, calls[2].body.as_deref()), (Verb::Put, Some("v2")));
    assert_eq!(calls[3].verb, Verb::Delete);
    assert_eq!(calls[3].path, "/v0/pipelines/id/pl1/scratchpad/key/my%20key");
    assert_eq!((calls[4].verb, calls[4].path.as_str()), (Verb::Delete, "/v0/pipelines/id/pl1/scratchpad"));
}

#[tokio::test]
async fn scratchpad_entry_unwraps_json_strings() {
    let t = FakeTransport::json(json!("hello"));
    assert_eq!(get_scratchpad_entry(&t, "pl1", "k").await.unwrap(), "hello");
    t.push(Ok(Decoded::Json(json!({"n": 1}))));
    assert_eq!(get_scratchpad_entry(&t, "pl1", "k").await.unwrap(), r#"{"n":1}"#);
}

#[tokio::test]
async fn resources_filter_by_type_and_narrow_payload() {
    let trigger = json!({
        "id": "r1",
        "spec": {
            "type": "trigger",
            "version": 1,
            "name": "on-push",
            "data": {"connector": "github", "event": "push", "pipelines": ["build"]}
        }
    });
    let t = FakeTransport::json(json!({"elements": [trigger.clone()]}));
    let req = ListResourcesRequest {
        pagination: Pagination::first(5),
        kind: Some(ResourceType::Trigger),
    };
    let page = list_resources::<Trigger>(&t, &req).await.unwrap();
    assert_eq!(page.elements[0].spec.data.pipelines, vec!["build".to_string()]);

    t.push(Ok(Decoded::Json(trigger.clone())));
    let r = get_resource::<JsonValue>(&t, "r1").await.unwrap();
    assert_eq!(r.spec.kind, ResourceType::Trigger);
    assert_eq!(r.spec.data["event"], "push");

    t.push(Ok(Decoded::Json(trigger)));
    let r = get_resource_by_name::<Trigger>(&t, "on-push").await.unwrap();
    assert_eq!(r.spec.data.connector, "github");

    let paths: Vec<String> = t.calls().into_iter().map(|c| c.path).collect();
    assert_eq!(
        paths,
        vec!["/v0/resources?size=5&type=trigger", "/v0/resources/id/r1", "/v0/resources/name/on-push"]
    );
}
