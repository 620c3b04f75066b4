use eventline_api::organization::get_organization;

use crate::utils::{connect, finish};
use crate::{ConnectionArgs, OutputArgs};

pub async fn org_cmd(conn: &ConnectionArgs, output: &OutputArgs) -> i32 {
    let transport = match connect(conn, output) {
        Ok(t) => t,
        Err(code) => return code,
    };
    finish(output, get_organization(&transport).await)
}
