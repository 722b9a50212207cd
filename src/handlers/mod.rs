use lambda_http::http::StatusCode;
use lambda_http::{Request, RequestExt};
use serde_json::Value;

use crate::common::errors::Error;
use crate::common::utils::http_error;
use crate::common::INVALID_ID_ERROR;
use crate::store::PlanKey;

pub mod assets;
pub mod check;
pub mod plan;
pub mod webhook;

/// Reads the optional `id` query parameter. Without one the global slot is used.
pub(crate) fn request_key(request: &Request) -> Result<PlanKey, Error> {
    let params = request.query_string_parameters();
    PlanKey::parse(params.first("id")).map_err(|_| http_error(StatusCode::BAD_REQUEST, INVALID_ID_ERROR))
}

/// JavaScript truthiness, which decides whether a callback carried a plan.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(val) => *val,
        Value::Number(val) => val.as_f64().map_or(true, |val| val != 0.0 && !val.is_nan()),
        Value::String(val) => !val.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
