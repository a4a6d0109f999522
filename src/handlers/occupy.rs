use lambda_http::{Body, Request as LambdaRequest, Response as LambdaResponse};

use crate::common::errors::Error;
use crate::common::SpotStatus;
use crate::handlers::set_status;
use crate::store::SpotStore;

#[tracing::instrument(skip(store))]
pub async fn process_request(
    request: LambdaRequest,
    store: &dyn SpotStore,
) -> Result<LambdaResponse<Body>, Error> {
    set_status(request, store, SpotStatus::Occupied).await
}
