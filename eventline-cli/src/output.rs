use eventline_client::RequestError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    let rendered = match format {
        OutputFormat::Text => serde_json::to_string_pretty(result),
        OutputFormat::Json => serde_json::to_string(result),
    };
    if let Ok(s) = rendered {
        println!("{s}");
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}

pub fn print_request_error(format: OutputFormat, quiet: bool, err: &RequestError) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => {
            let status = err.status.map(|s| format!(" (status {s})")).unwrap_or_default();
            let message = err.message.as_deref().unwrap_or("request failed");
            eprintln!("error: {}{status}: {message}", err.code);
        }
        OutputFormat::Json => {
            let body = serde_json::json!({
                "error": err.message,
                "code": err.code_str(),
                "status": err.status,
                "data": err.data,
            });
            eprintln!("{}", serde_json::to_string(&body).unwrap_or_default());
        }
    }
}
