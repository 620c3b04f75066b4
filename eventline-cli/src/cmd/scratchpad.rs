use eventline_api::pipeline::{
    delete_scratchpad, delete_scratchpad_entry, get_scratchpad, get_scratchpad_entry, set_scratchpad_entry,
};
use serde_json::json;

use crate::commands::ScratchpadCommand;
use crate::exit_codes;
use crate::output::OutputFormat;
use crate::utils::{connect, finish, request_failed};
use crate::{ConnectionArgs, OutputArgs};

pub async fn scratchpad_cmd(command: ScratchpadCommand, conn: &ConnectionArgs, output: &OutputArgs) -> i32 {
    let transport = match connect(conn, output) {
        Ok(t) => t,
        Err(code) => return code,
    };

    match command {
        ScratchpadCommand::Get {
            pipeline_id,
            key: Some(key),
        } => {
            let value = match get_scratchpad_entry(&transport, &pipeline_id, &key).await {
                Ok(v) => v,
                Err(e) => return request_failed(output, &e),
            };
            // Raw value in text mode so it can be captured by shell scripts.
            if output.format == OutputFormat::Text && !output.quiet {
                println!("{value}");
                return exit_codes::SUCCESS;
            }
            finish(output, Ok(json!({"key": key, "value": value})))
        }
        ScratchpadCommand::Get { pipeline_id, key: None } => {
            let pad = match get_scratchpad(&transport, &pipeline_id).await {
                Ok(p) => p,
                Err(e) => return request_failed(output, &e),
            };
            if output.format == OutputFormat::Text && !output.quiet {
                for (k, v) in &pad {
                    println!("{k}={v}");
                }
                return exit_codes::SUCCESS;
            }
            finish(output, Ok(pad))
        }
        ScratchpadCommand::Set {
            pipeline_id,
            key,
            value,
        } => {
            let result = set_scratchpad_entry(&transport, &pipeline_id, &key, &value).await;
            finish(output, result.map(|()| json!({"key": key, "value": value})))
        }
        ScratchpadCommand::Delete {
            pipeline_id,
            key: Some(key),
        } => {
            let result = delete_scratchpad_entry(&transport, &pipeline_id, &key).await;
            finish(output, result.map(|()| json!({"deleted": key})))
        }
        ScratchpadCommand::Delete { pipeline_id, key: None } => {
            let result = delete_scratchpad(&transport, &pipeline_id).await;
            finish(output, result.map(|()| json!({"deleted": pipeline_id})))
        }
    }
}
