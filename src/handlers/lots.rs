use std::collections::BTreeMap;

use lambda_http::http::StatusCode;
use lambda_http::{Body, Request as LambdaRequest, Response as LambdaResponse};
use serde::Serialize;
use tracing::info;

use crate::common::errors::Error;
use crate::common::utils::json_response;
use crate::common::{Spot, SpotStatus};
use crate::store::SpotStore;

pub const UNASSIGNED_LOT: &str = "Unassigned";

/// Occupancy counts for one lot, with the centre of its located spots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotSummary {
    pub lot_id: String,
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

#[derive(Default)]
struct Tally {
    total: usize,
    available: usize,
    occupied: usize,
    lat_sum: f64,
    lon_sum: f64,
    located: usize,
}

/// Groups spots by lot, sorted by lot id. Spots without a lot (or with a
/// blank one) fall under [`UNASSIGNED_LOT`].
pub fn summarize_lots(spots: &[Spot]) -> Vec<LotSummary> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for spot in spots {
        let lot_id = spot
            .lot_id
            .as_deref()
            .filter(|lot_id| !lot_id.trim().is_empty())
            .unwrap_or(UNASSIGNED_LOT);
        let tally = tallies.entry(lot_id).or_default();

        tally.total += 1;
        match spot.status {
            SpotStatus::Available => tally.available += 1,
            SpotStatus::Occupied => tally.occupied += 1,
        }

        if let (Some(lat), Some(lon)) = (spot.lat, spot.lon) {
            tally.lat_sum += lat;
            tally.lon_sum += lon;
            tally.located += 1;
        }
    }

    tallies
        .into_iter()
        .map(|(lot_id, tally)| {
            let centre = (tally.located > 0).then(|| {
                let located = tally.located as f64;
                (tally.lat_sum / located, tally.lon_sum / located)
            });

            LotSummary {
                lot_id: lot_id.to_string(),
                total: tally.total,
                available: tally.available,
                occupied: tally.occupied,
                lat: centre.map(|(lat, _)| lat),
                lon: centre.map(|(_, lon)| lon),
            }
        })
        .collect()
}

#[tracing::instrument(skip(store))]
pub async fn process_request(
    _request: LambdaRequest,
    store: &dyn SpotStore,
) -> Result<LambdaResponse<Body>, Error> {
    let spots = store.scan_all().await?;
    let summaries = summarize_lots(&spots);
    info!("Summarised {} spots into {} lots", spots.len(), summaries.len());

    json_response(StatusCode::OK, &summaries)
}
