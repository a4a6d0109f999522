pub mod delete;
pub mod list;
pub mod lots;
pub mod occupy;
pub mod register;
pub mod release;

use lambda_http::http::StatusCode;
use lambda_http::{Body, Request as LambdaRequest, Response as LambdaResponse};
use serde::Deserialize;
use tracing::info;

use crate::common::errors::Error;
use crate::common::utils::{extract_request, json_response, require_spot_id};
use crate::common::SpotStatus;
use crate::store::SpotStore;

/// Body accepted by the occupy, release and delete handlers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpotRequest {
    pub spot_id: Option<String>,
}

pub(crate) fn spot_id_from(request: &LambdaRequest) -> Result<String, Error> {
    let request = extract_request::<SpotRequest>(request)?;
    require_spot_id(request.spot_id)
}

/// Moves an existing spot to `status`. Repeating the same transition only
/// refreshes `lastUpdated`.
pub(crate) async fn set_status(
    request: LambdaRequest,
    store: &dyn SpotStore,
    status: SpotStatus,
) -> Result<LambdaResponse<Body>, Error> {
    let spot_id = spot_id_from(&request)?;

    if store.get(&spot_id).await?.is_none() {
        return Err(Error::NotFound(spot_id));
    }

    let spot = store.update_status(&spot_id, status).await?;
    info!("Spot {} is now {}", spot.spot_id, spot.status);

    json_response(StatusCode::OK, &spot)
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use lambda_http::{Body, Request, Response};
    use serde_json::Value;

    use crate::common::errors::StoreError;
    use crate::common::{Spot, SpotStatus};
    use crate::store::SpotStore;

    pub fn request(body: &str) -> Request {
        lambda_http::http::Request::builder()
            .method("POST")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn empty_request() -> Request {
        lambda_http::http::Request::builder()
            .method("GET")
            .body(Body::Empty)
            .unwrap()
    }

    pub fn body_json(response: &Response<Body>) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    /// Store whose every call fails, for checking that store errors escape.
    pub struct FailingStore;

    fn failure() -> StoreError {
        StoreError::request(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "table unreachable",
        ))
    }

    #[async_trait]
    impl SpotStore for FailingStore {
        async fn get(&self, _spot_id: &str) -> Result<Option<Spot>, StoreError> {
            Err(failure())
        }

        async fn scan_all(&self) -> Result<Vec<Spot>, StoreError> {
            Err(failure())
        }

        async fn put(&self, _spot: &Spot) -> Result<(), StoreError> {
            Err(failure())
        }

        async fn update_status(
            &self,
            _spot_id: &str,
            _status: SpotStatus,
        ) -> Result<Spot, StoreError> {
            Err(failure())
        }

        async fn delete(&self, _spot_id: &str) -> Result<Option<Spot>, StoreError> {
            Err(failure())
        }
    }
}
