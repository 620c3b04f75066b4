use eventline_client::{ErrorCode, Reply, RequestError, Transport, Verb};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

pub(crate) async fn fetch<T: DeserializeOwned>(transport: &dyn Transport, path: &str) -> Result<T, RequestError> {
    transport.call(Verb::Get, path, None).await?.into_typed()
}

pub(crate) async fn send<B, T>(transport: &dyn Transport, verb: Verb, path: &str, body: &B) -> Result<T, RequestError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let body = encode_body(body)?;
    transport.call(verb, path, Some(body)).await?.into_typed()
}

/// Calls that answer with nothing worth narrowing (deletes).
pub(crate) async fn discard(transport: &dyn Transport, verb: Verb, path: &str) -> Result<(), RequestError> {
    transport.call(verb, path, None).await.map(|_: Reply| ())
}

pub(crate) fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String, RequestError> {
    serde_json::to_string(body).map_err(|e| {
        RequestError::new(
            None,
            ErrorCode::UnknownError,
            JsonValue::Null,
            Some(format!("cannot encode request body: {e}")),
        )
    })
}
