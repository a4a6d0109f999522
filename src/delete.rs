use aws_config::BehaviorVersion;
use campus_parking::common::utils::into_lambda_response;
use campus_parking::common::{init_tracing, TABLE_NAME_DEFAULT};
use campus_parking::handlers::delete::process_request;
use campus_parking::store::DynamoSpotStore;
use lambda_http::{run, service_fn, Error as LambdaError, Request as LambdaRequest};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    init_tracing();

    let table_name = std::env::var("TABLE_NAME").unwrap_or(TABLE_NAME_DEFAULT.into());
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = DynamoSpotStore::new(aws_sdk_dynamodb::Client::new(&config), table_name);
    info!("Serving spots from table {}", store.table_name());
    let store = &store;

    run(service_fn(move |request: LambdaRequest| async move {
        into_lambda_response(process_request(request, store).await)
    }))
    .await
}
