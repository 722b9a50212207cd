use lambda_http::{run, service_fn, Error as LambdaError, Request};

use plan_relay::common::utils::init_tracing;
use plan_relay::handlers::plan;
use plan_relay::Services;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing();

    let services = Services::init().await;

    run(service_fn(|request: Request| async {
        plan::process_request(request, &services)
            .await
            .or_else(|err| err.into_response())
    }))
    .await
}
