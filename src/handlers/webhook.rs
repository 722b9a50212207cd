use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, RequestExt, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::common::config::Config;
use crate::common::errors::Error;
use crate::common::utils::{extract_request, http_error, json_response};
use crate::common::{NO_FINAL_PLAN_ERROR, UNAUTHORIZED_ERROR};
use crate::handlers::{is_truthy, request_key};
use crate::Services;

pub const TOKEN_HEADER: &str = "x-relay-token";

#[derive(Debug, Default, Deserialize)]
struct WebhookRequest {
    #[serde(default)]
    outputs: Option<Value>,
}

impl WebhookRequest {
    fn into_final_plan(self) -> Option<Value> {
        match self.outputs? {
            Value::Object(mut outputs) => outputs.remove("final_plan").filter(is_truthy),
            _ => None,
        }
    }
}

/// Without a configured secret every caller is accepted.
fn authorize(request: &Request, config: &Config) -> Result<(), Error> {
    let Some(secret) = &config.webhook_secret else {
        return Ok(());
    };

    let params = request.query_string_parameters();
    let token = params.first("token").or_else(|| {
        request
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|val| val.to_str().ok())
    });

    if token == Some(secret.as_str()) {
        Ok(())
    } else {
        warn!("Rejected webhook without a valid token");
        Err(http_error(StatusCode::UNAUTHORIZED, UNAUTHORIZED_ERROR))
    }
}

#[tracing::instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
pub async fn process_request(
    request: Request,
    services: &Services,
) -> Result<Response<Body>, Error> {
    authorize(&request, &services.config)?;
    let key = request_key(&request)?;

    let payload = extract_request::<WebhookRequest>(&request)?.unwrap_or_default();
    let Some(final_plan) = payload.into_final_plan() else {
        warn!("Missing final_plan in webhook");
        return Err(http_error(StatusCode::BAD_REQUEST, NO_FINAL_PLAN_ERROR));
    };

    services.store.put(key, final_plan).await?;
    info!("Plan received from Relay for {}", key);

    json_response(StatusCode::OK, &json!({ "ok": true }))
}
