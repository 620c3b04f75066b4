use eventline_api::account::{get_account, get_current_account, list_accounts};

use crate::commands::AccountsCommand;
use crate::utils::{connect, finish};
use crate::{ConnectionArgs, OutputArgs};

pub async fn account_cmd(id: Option<&str>, conn: &ConnectionArgs, output: &OutputArgs) -> i32 {
    let transport = match connect(conn, output) {
        Ok(t) => t,
        Err(code) => return code,
    };
    let result = match id {
        Some(id) => get_account(&transport, id).await,
        None => get_current_account(&transport).await,
    };
    finish(output, result)
}

pub async fn accounts_cmd(command: AccountsCommand, conn: &ConnectionArgs, output: &OutputArgs) -> i32 {
    let transport = match connect(conn, output) {
        Ok(t) => t,
        Err(code) => return code,
    };
    match command {
        AccountsCommand::List { pagination } => {
            finish(output, list_accounts(&transport, &pagination.to_pagination()).await)
        }
    }
}
