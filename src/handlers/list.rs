use lambda_http::http::StatusCode;
use lambda_http::{Body, Request as LambdaRequest, Response as LambdaResponse};
use tracing::info;

use crate::common::errors::Error;
use crate::common::utils::json_response;
use crate::store::SpotStore;

/// Returns every registered spot. The request itself is not inspected.
#[tracing::instrument(skip(store))]
pub async fn process_request(
    _request: LambdaRequest,
    store: &dyn SpotStore,
) -> Result<LambdaResponse<Body>, Error> {
    let spots = store.scan_all().await?;
    info!("Listing {} spots", spots.len());

    json_response(StatusCode::OK, &spots)
}
