use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use siteserve::invocation::{self, InvocationResponse};
use siteserve::logger;

#[tokio::main]
async fn main() -> Result<(), Error> {
    run(service_fn(handler)).await
}

async fn handler(event: LambdaEvent<Value>) -> Result<InvocationResponse, Error> {
    logger::log_invocation(&event.context.request_id);
    Ok(invocation::handle_from_env(&event.payload)?)
}
