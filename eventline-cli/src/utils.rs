use eventline_client::{HttpTransport, RequestError};
use serde::Serialize;
use tracing::debug;

use crate::exit_codes;
use crate::output::{print_error, print_request_error, print_result};
use crate::{ConnectionArgs, OutputArgs};

/// Builds the transport, or prints why it cannot be built and returns the
/// exit code to use.
pub fn connect(conn: &ConnectionArgs, output: &OutputArgs) -> Result<HttpTransport, i32> {
    let built = conn.to_options().and_then(HttpTransport::new);
    match built {
        Ok(t) => {
            debug!(base_url = %t.base_url(), "transport ready");
            Ok(t)
        }
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            Err(exit_codes::CONFIG_ERROR)
        }
    }
}

/// Prints the outcome of one API call and maps it to an exit code.
pub fn finish<T: Serialize>(output: &OutputArgs, result: Result<T, RequestError>) -> i32 {
    match result {
        Ok(value) => {
            print_result(output.format, output.quiet, &value);
            exit_codes::SUCCESS
        }
        Err(e) => request_failed(output, &e),
    }
}

pub fn request_failed(output: &OutputArgs, err: &RequestError) -> i32 {
    print_request_error(output.format, output.quiet, err);
    exit_codes::REQUEST_FAILED
}
