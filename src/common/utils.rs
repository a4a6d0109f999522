use lambda_http::http::StatusCode;
use lambda_http::{Body, Error as LambdaError, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::common::errors::Error;

const INVALID_JSON_ERROR: &str = "Invalid JSON body";
const SPOT_ID_REQUIRED_ERROR: &str = "spotId is required";

pub const HEADERS: [(&str, &str); 3] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "*"),
];

/// Parses the JSON body into `T`. A missing body reads as `{}`; unknown
/// fields are ignored.
pub fn extract_request<T: DeserializeOwned>(request: &Request) -> Result<T, Error> {
    let body: &[u8] = request.body();
    let body: &[u8] = if body.is_empty() { b"{}" } else { body };

    serde_json::from_slice(body).map_err(|err| {
        info!("Rejecting body: {}", err);
        Error::Validation(INVALID_JSON_ERROR.into())
    })
}

pub fn require_spot_id(spot_id: Option<String>) -> Result<String, Error> {
    match spot_id {
        Some(spot_id) if !spot_id.is_empty() => Ok(spot_id),
        _ => Err(Error::Validation(SPOT_ID_REQUIRED_ERROR.into())),
    }
}

pub fn json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    payload: &T,
) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(payload)?;
    let response = HEADERS
        .iter()
        .fold(Response::builder().status(status), |builder, (name, value)| {
            builder.header(*name, *value)
        })
        .body(Body::Text(body))?;

    Ok(response)
}

/// Turns a handler outcome into what the Lambda runtime expects. Client
/// errors become `{message}` responses; anything else fails the invocation.
pub fn into_lambda_response(
    result: Result<Response<Body>, Error>,
) -> Result<Response<Body>, LambdaError> {
    let err = match result {
        Ok(val) => return Ok(val),
        Err(err) => err,
    };

    match err.status_code() {
        Some(status) => {
            info!("Responding {}: {}", status.as_u16(), err);
            Ok(json_response(status, &json!({ "message": err.to_string() }))?)
        }
        None => {
            error!("Invocation failed: {}", err);
            Err(err.into())
        }
    }
}
