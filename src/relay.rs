use lambda_http::{run, service_fn, Error as LambdaError, Request};

use plan_relay::common::utils::init_tracing;
use plan_relay::{router, Services};

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing();

    let services = Services::init().await;

    run(service_fn(|request: Request| async {
        router::handle(request, &services).await
    }))
    .await
}
