use chrono::{DateTime, Utc};
use eventline_api::event::{create_event, get_event, list_events};
use eventline_api::{ListEventsRequest, NewEvent};
use eventline_client::HttpTransport;
use serde_json::Value as JsonValue;

use crate::commands::EventsCommand;
use crate::exit_codes;
use crate::output::{print_error, OutputFormat};
use crate::utils::{connect, finish, request_failed};
use crate::{ConnectionArgs, OutputArgs};

pub async fn events_cmd(command: EventsCommand, conn: &ConnectionArgs, output: &OutputArgs) -> i32 {
    match command {
        EventsCommand::Create {
            connector,
            name,
            data,
            time,
        } => {
            // Reject bad input before touching the network.
            let event = match parse_new_event(&connector, &name, &data, time.as_deref()) {
                Ok(e) => e,
                Err(msg) => {
                    print_error(output.format, output.quiet, &msg);
                    return exit_codes::RUNTIME_ERROR;
                }
            };
            let transport = match connect(conn, output) {
                Ok(t) => t,
                Err(code) => return code,
            };
            finish(output, create_event(&transport, &event).await)
        }
        EventsCommand::Get { id } => {
            let transport = match connect(conn, output) {
                Ok(t) => t,
                Err(code) => return code,
            };
            finish(output, get_event(&transport, &id).await)
        }
        EventsCommand::List {
            pagination,
            pipeline_id,
            connector,
            name,
        } => {
            let req = ListEventsRequest {
                pagination: pagination.to_pagination(),
                pipeline_id,
                connector,
                name,
            };
            let transport = match connect(conn, output) {
                Ok(t) => t,
                Err(code) => return code,
            };
            list_cmd(&transport, &req, output).await
        }
    }
}

async fn list_cmd(transport: &HttpTransport, req: &ListEventsRequest, output: &OutputArgs) -> i32 {
    let page = match list_events(transport, req).await {
        Ok(p) => p,
        Err(e) => return request_failed(output, &e),
    };
    if output.format == OutputFormat::Text && !output.quiet {
        for e in &page.elements {
            let at = e.event_time.map(|t| t.to_rfc3339()).unwrap_or_default();
            println!("{}\t{}\t{}/{}", e.id, at, e.connector, e.name);
        }
        return exit_codes::SUCCESS;
    }
    finish(output, Ok(page))
}

fn parse_new_event(connector: &str, name: &str, data: &str, time: Option<&str>) -> Result<NewEvent, String> {
    let data: JsonValue = serde_json::from_str(data).map_err(|e| format!("invalid --data: {e}"))?;
    if !data.is_object() {
        return Err("invalid --data: expected a JSON object".to_string());
    }
    let mut event = NewEvent::new(connector, name, data);
    if let Some(time) = time {
        let at = DateTime::parse_from_rfc3339(time).map_err(|e| format!("invalid --time {time:?}: {e}"))?;
        event = event.at(at.with_timezone(&Utc));
    }
    Ok(event)
}
