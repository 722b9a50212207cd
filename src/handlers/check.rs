use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use serde_json::json;
use tracing::info;

use crate::common::errors::Error;
use crate::common::utils::json_response;
use crate::handlers::request_key;
use crate::Services;

/// Hands out the stored plan once; afterwards the slot reads as waiting again.
#[tracing::instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
pub async fn process_request(
    request: Request,
    services: &Services,
) -> Result<Response<Body>, Error> {
    let key = request_key(&request)?;

    match services.store.take(key).await? {
        Some(final_plan) => {
            info!("Delivering plan for {}", key);
            json_response(StatusCode::OK, &json!({ "final_plan": final_plan }))
        }
        None => json_response(StatusCode::ACCEPTED, &json!({ "status": "waiting" })),
    }
}
