use lambda_http::http::Method;
use lambda_http::{Body, Error as LambdaError, Request, Response};

use crate::common::errors::Error;
use crate::handlers::{assets, check, plan, webhook};
use crate::Services;

pub async fn dispatch(request: Request, services: &Services) -> Result<Response<Body>, Error> {
    let path = request.uri().path().to_string();

    match (request.method(), path.as_str()) {
        (&Method::POST, "/api/plan") => plan::process_request(request, services).await,
        (&Method::POST, "/api/webhook") => webhook::process_request(request, services).await,
        (&Method::GET, "/api/check") => check::process_request(request, services).await,
        (&Method::GET | &Method::HEAD, path) if !path.starts_with("/api/") => {
            assets::process_request(request, services).await
        }
        (method, path) => assets::not_found(method, path),
    }
}

/// Entry point for the all-in-one function.
pub async fn handle(request: Request, services: &Services) -> Result<Response<Body>, LambdaError> {
    dispatch(request, services)
        .await
        .or_else(Error::into_response)
}
