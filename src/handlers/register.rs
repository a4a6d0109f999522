use lambda_http::http::StatusCode;
use lambda_http::{Body, Request as LambdaRequest, Response as LambdaResponse};
use serde::Deserialize;
use tracing::info;

use crate::common::errors::Error;
use crate::common::utils::{extract_request, json_response, require_spot_id};
use crate::common::Spot;
use crate::store::SpotStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Request {
    pub spot_id: Option<String>,
    pub lot_id: Option<String>,
    pub lat: Option<Coordinate>,
    pub lon: Option<Coordinate>,
}

/// Coordinates may arrive as JSON numbers or numeric strings; anything else
/// is kept so the error can name the field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Coordinate {
    fn into_f64(self, field: &str) -> Result<f64, Error> {
        let value = match self {
            Coordinate::Number(value) => Some(value),
            Coordinate::Text(text) => text.trim().parse::<f64>().ok(),
            Coordinate::Other(_) => None,
        };

        value
            .filter(|value| value.is_finite())
            .ok_or_else(|| Error::Validation(format!("{field} must be a number")))
    }
}

fn coordinate(value: Option<Coordinate>, field: &str) -> Result<Option<f64>, Error> {
    value.map(|value| value.into_f64(field)).transpose()
}

/// Registers a spot as `AVAILABLE`. An existing spot with the same id is
/// overwritten.
#[tracing::instrument(skip(store))]
pub async fn process_request(
    request: LambdaRequest,
    store: &dyn SpotStore,
) -> Result<LambdaResponse<Body>, Error> {
    let request = extract_request::<Request>(&request)?;
    let spot_id = require_spot_id(request.spot_id)?;
    let lat = coordinate(request.lat, "lat")?;
    let lon = coordinate(request.lon, "lon")?;

    let spot = Spot::register(spot_id, request.lot_id, lat, lon);
    store.put(&spot).await?;
    info!("Registered spot {}", spot.spot_id);

    json_response(StatusCode::CREATED, &spot)
}
