use lambda_http::http::header::CONTENT_TYPE;
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, RequestPayloadExt, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::common::errors::Error;

/// Deserializes a JSON or form-urlencoded body.
///
/// `Ok(None)` means the request had no payload the runtime could recognise.
/// A body that fails to parse becomes a 400 carrying the parse error.
pub fn extract_request<T: DeserializeOwned>(request: &Request) -> Result<Option<T>, Error> {
    match request.payload::<T>() {
        Ok(val) => Ok(val),
        Err(err) => {
            let response = Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .header(CONTENT_TYPE, "text/html")
                .body(err.to_string().into())?;

            Err(Error::HttpError(response))
        }
    }
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(serde_json::to_string(body)?.into())?;

    Ok(response)
}

/// Builds `{"error": message}` with the given status as an [`Error::HttpError`].
pub fn http_error(status: StatusCode, message: &str) -> Error {
    match json_response(status, &json!({ "error": message })) {
        Ok(response) => Error::HttpError(response),
        Err(err) => err,
    }
}

pub fn text_response(status: StatusCode, body: impl Into<String>) -> Result<Response<Body>, Error> {
    let body: String = body.into();
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/html")
        .body(Body::from(body))?;

    Ok(response)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();
}
