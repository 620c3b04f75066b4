use std::path::Path;

use eventline_api::context::load_context_from;
use eventline_api::{Context, TaskEnvironment};
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::OutputArgs;

#[derive(Serialize)]
struct ContextResult {
    environment: TaskEnvironment,
    launched_by: &'static str,
    context: Context,
}

pub async fn context_cmd(path: &Path, output: &OutputArgs) -> i32 {
    let context = match load_context_from(path).await {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let launched_by = if context.is_launched_by_command() {
        "command"
    } else {
        "event"
    };
    let result = ContextResult {
        environment: TaskEnvironment::from_env(),
        launched_by,
        context,
    };
    print_result(output.format, output.quiet, &result);
    exit_codes::SUCCESS
}
