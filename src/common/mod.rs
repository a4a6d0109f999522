pub mod errors;
pub mod utils;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::common::errors::StoreError;

pub const TABLE_NAME_DEFAULT: &str = "campus-parking-spots";

pub(crate) const SPOT_ID: &str = "spotId";
pub(crate) const STATUS: &str = "status";
pub(crate) const LOT_ID: &str = "lotId";
pub(crate) const LAT: &str = "lat";
pub(crate) const LON: &str = "lon";
pub(crate) const LAST_UPDATED: &str = "lastUpdated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotStatus {
    Available,
    Occupied,
}

impl SpotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotStatus::Available => "AVAILABLE",
            SpotStatus::Occupied => "OCCUPIED",
        }
    }
}

impl fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpotStatus {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "AVAILABLE" => Ok(SpotStatus::Available),
            "OCCUPIED" => Ok(SpotStatus::Occupied),
            other => Err(StoreError::MalformedRecord(format!(
                "unknown status: {other}"
            ))),
        }
    }
}

/// A parking spot as stored in the table and returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub spot_id: String,
    pub status: SpotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    pub last_updated: String,
}

impl Spot {
    /// A freshly registered spot: always `AVAILABLE`, stamped now.
    pub fn register(
        spot_id: String,
        lot_id: Option<String>,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Self {
        Self {
            spot_id,
            status: SpotStatus::Available,
            lot_id,
            lat,
            lon,
            last_updated: now_iso(),
        }
    }
}

impl From<Spot> for HashMap<String, AttributeValue> {
    fn from(spot: Spot) -> Self {
        let mut item = HashMap::from([
            (SPOT_ID.to_string(), AttributeValue::S(spot.spot_id)),
            (
                STATUS.to_string(),
                AttributeValue::S(spot.status.as_str().into()),
            ),
            (LAST_UPDATED.to_string(), AttributeValue::S(spot.last_updated)),
        ]);

        if let Some(lot_id) = spot.lot_id {
            item.insert(LOT_ID.to_string(), AttributeValue::S(lot_id));
        }
        if let Some(lat) = spot.lat {
            item.insert(LAT.to_string(), AttributeValue::N(lat.to_string()));
        }
        if let Some(lon) = spot.lon {
            item.insert(LON.to_string(), AttributeValue::N(lon.to_string()));
        }

        item
    }
}

impl TryFrom<HashMap<String, AttributeValue>> for Spot {
    type Error = StoreError;

    fn try_from(mut item: HashMap<String, AttributeValue>) -> Result<Self, Self::Error> {
        Ok(Self {
            spot_id: required_string(&mut item, SPOT_ID)?,
            status: required_string(&mut item, STATUS)?.parse()?,
            lot_id: optional_string(&mut item, LOT_ID)?,
            lat: optional_number(&mut item, LAT)?,
            lon: optional_number(&mut item, LON)?,
            last_updated: required_string(&mut item, LAST_UPDATED)?,
        })
    }
}

fn optional_string(
    item: &mut HashMap<String, AttributeValue>,
    name: &str,
) -> Result<Option<String>, StoreError> {
    match item.remove(name) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(value)) => Ok(Some(value)),
        Some(other) => Err(StoreError::MalformedRecord(format!(
            "{name} is not a string: {other:?}"
        ))),
    }
}

fn required_string(
    item: &mut HashMap<String, AttributeValue>,
    name: &str,
) -> Result<String, StoreError> {
    optional_string(item, name)?
        .ok_or_else(|| StoreError::MalformedRecord(format!("{name} is missing")))
}

fn optional_number(
    item: &mut HashMap<String, AttributeValue>,
    name: &str,
) -> Result<Option<f64>, StoreError> {
    match item.remove(name) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::N(value)) => value.parse().map(Some).map_err(|_| {
            StoreError::MalformedRecord(format!("{name} is not a number: {value}"))
        }),
        Some(other) => Err(StoreError::MalformedRecord(format!(
            "{name} is not a number: {other:?}"
        ))),
    }
}

/// Current UTC time, e.g. `2024-05-01T12:00:00.123456+00:00`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();
}
