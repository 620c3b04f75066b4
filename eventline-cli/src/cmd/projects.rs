use eventline_api::project::{
    create_project, delete_project, get_project, list_projects, update_project, ListProjectsRequest, NewProject,
    ProjectKey,
};
use serde_json::json;

use crate::commands::ProjectsCommand;
use crate::exit_codes;
use crate::output::OutputFormat;
use crate::utils::{connect, finish, request_failed};
use crate::{ConnectionArgs, OutputArgs};

pub async fn projects_cmd(command: ProjectsCommand, conn: &ConnectionArgs, output: &OutputArgs) -> i32 {
    let transport = match connect(conn, output) {
        Ok(t) => t,
        Err(code) => return code,
    };

    match command {
        ProjectsCommand::List { after, size } => {
            let page = match list_projects(&transport, &ListProjectsRequest { after, size }).await {
                Ok(p) => p,
                Err(e) => return request_failed(output, &e),
            };
            if output.format == OutputFormat::Text && !output.quiet {
                for p in &page.elements {
                    println!("{}\t{}", p.id, p.name);
                }
                if let Some(after) = page.next.as_ref().and_then(|c| c.after.as_deref()) {
                    println!("(more: --after {after})");
                }
                return exit_codes::SUCCESS;
            }
            finish(output, Ok(page))
        }
        ProjectsCommand::Get { project, by_name } => {
            let key = if by_name {
                ProjectKey::Name(project)
            } else {
                ProjectKey::Id(project)
            };
            finish(output, get_project(&transport, &key).await)
        }
        ProjectsCommand::Create { name } => finish(output, create_project(&transport, &NewProject { name }).await),
        ProjectsCommand::Update { id, name } => {
            finish(output, update_project(&transport, &id, &NewProject { name }).await)
        }
        ProjectsCommand::Delete { id } => {
            let result = delete_project(&transport, &id).await.map(|()| json!({"deleted": id}));
            finish(output, result)
        }
    }
}
