use eventline_api::resource::{get_resource, get_resource_by_name, list_resources};
use eventline_api::{ListResourcesRequest, Resource};
use serde_json::Value as JsonValue;

use crate::commands::ResourcesCommand;
use crate::exit_codes;
use crate::output::OutputFormat;
use crate::utils::{connect, finish, request_failed};
use crate::{ConnectionArgs, OutputArgs};

pub async fn resources_cmd(command: ResourcesCommand, conn: &ConnectionArgs, output: &OutputArgs) -> i32 {
    let transport = match connect(conn, output) {
        Ok(t) => t,
        Err(code) => return code,
    };

    match command {
        ResourcesCommand::List { pagination, kind } => {
            let req = ListResourcesRequest {
                pagination: pagination.to_pagination(),
                kind,
            };
            let page = match list_resources::<JsonValue>(&transport, &req).await {
                Ok(p) => p,
                Err(e) => return request_failed(output, &e),
            };
            if output.format == OutputFormat::Text && !output.quiet {
                for r in &page.elements {
                    let state = if r.disabled { " (disabled)" } else { "" };
                    println!("{}\t{}\t{}{state}", r.id, r.spec.kind, r.spec.name);
                }
                return exit_codes::SUCCESS;
            }
            finish(output, Ok(page))
        }
        ResourcesCommand::Get { resource, by_name } => {
            let result: Result<Resource, _> = if by_name {
                get_resource_by_name(&transport, &resource).await
            } else {
                get_resource(&transport, &resource).await
            };
            finish(output, result)
        }
    }
}
