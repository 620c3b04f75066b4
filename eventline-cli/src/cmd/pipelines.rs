use eventline_api::pipeline::{get_pipeline, list_pipelines};

use crate::commands::PipelinesCommand;
use crate::exit_codes;
use crate::output::OutputFormat;
use crate::utils::{connect, finish, request_failed};
use crate::{ConnectionArgs, OutputArgs};

pub async fn pipelines_cmd(command: PipelinesCommand, conn: &ConnectionArgs, output: &OutputArgs) -> i32 {
    let transport = match connect(conn, output) {
        Ok(t) => t,
        Err(code) => return code,
    };

    match command {
        PipelinesCommand::List { pagination } => {
            let page = match list_pipelines(&transport, &pagination.to_pagination()).await {
                Ok(p) => p,
                Err(e) => return request_failed(output, &e),
            };
            if output.format == OutputFormat::Text && !output.quiet {
                for p in &page.elements {
                    println!("{}\t{}\t{}", p.id, p.status, p.name);
                }
                return exit_codes::SUCCESS;
            }
            finish(output, Ok(page))
        }
        PipelinesCommand::Get { id } => finish(output, get_pipeline(&transport, &id).await),
    }
}
