use lambda_http::http::StatusCode;
use lambda_http::{Body, Request as LambdaRequest, Response as LambdaResponse};
use serde_json::json;
use tracing::info;

use crate::common::errors::Error;
use crate::common::utils::json_response;
use crate::handlers::spot_id_from;
use crate::store::SpotStore;

/// Deletes a spot and answers with its last stored value.
#[tracing::instrument(skip(store))]
pub async fn process_request(
    request: LambdaRequest,
    store: &dyn SpotStore,
) -> Result<LambdaResponse<Body>, Error> {
    let spot_id = spot_id_from(&request)?;

    // Checked up front so a missing spot is always a 404, whatever delete returns.
    if store.get(&spot_id).await?.is_none() {
        return Err(Error::NotFound(spot_id));
    }

    match store.delete(&spot_id).await? {
        Some(spot) => {
            info!("Deleted spot {}", spot.spot_id);
            json_response(StatusCode::OK, &spot)
        }
        None => {
            info!("Deleted spot {} (no previous value returned)", spot_id);
            json_response(StatusCode::OK, &json!({ "spotId": spot_id, "deleted": true }))
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::common::errors::StoreError;
    use crate::common::{Spot, SpotStatus};
    use crate::handlers::test_support::{body_json, request};
    use crate::store::MemorySpotStore;

    /// Finds the spot but reports nothing back from the delete itself.
    struct SilentDeleteStore;

    #[async_trait]
    impl SpotStore for SilentDeleteStore {
        async fn get(&self, spot_id: &str) -> Result<Option<Spot>, StoreError> {
            Ok(Some(Spot::register(spot_id.into(), None, None, None)))
        }

        async fn scan_all(&self) -> Result<Vec<Spot>, StoreError> {
            Ok(Vec::new())
        }

        async fn put(&self, _spot: &Spot) -> Result<(), StoreError> {
            Ok(())
        }

        async fn update_status(
            &self,
            spot_id: &str,
            _status: SpotStatus,
        ) -> Result<Spot, StoreError> {
            Err(StoreError::Missing(spot_id.into()))
        }

        async fn delete(&self, _spot_id: &str) -> Result<Option<Spot>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn deletes_and_returns_previous_record() {
        let store = MemorySpotStore::new();
        store
            .put(&Spot::register("E5".into(), Some("Lot1".into()), None, None))
            .await
            .unwrap();
        store
            .update_status("E5", SpotStatus::Occupied)
            .await
            .unwrap();

        let response = process_request(request(r#"{"spotId":"E5"}"#), &store)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(&response);
        assert_eq!(body["spotId"], "E5");
        assert_eq!(body["status"], "OCCUPIED");
        assert_eq!(body["lotId"], "Lot1");
        assert!(store.get("E5").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn falls_back_when_store_returns_nothing() {
        let response = process_request(request(r#"{"spotId":"E5"}"#), &SilentDeleteStore)
            .await
            .unwrap();

        assert_eq!(
            body_json(&response),
            json!({"spotId": "E5", "deleted": true})
        );
    }

    #[tokio::test]
    async fn unknown_spot_is_not_found() {
        let store = MemorySpotStore::new();

        let err = process_request(request(r#"{"spotId":"E5"}"#), &store)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Spot E5 not found");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let err = process_request(request("spotId=E5"), &MemorySpotStore::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(ref message) if message == "Invalid JSON body"));
    }

    #[tokio::test]
    async fn null_spot_id_is_rejected() {
        let err = process_request(request(r#"{"spotId":null}"#), &MemorySpotStore::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
    }
}
