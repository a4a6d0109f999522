use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use tracing::info;

use crate::common::errors::StoreError;
use crate::common::{now_iso, Spot, SpotStatus, SPOT_ID, STATUS};
use crate::store::SpotStore;

const UPDATE_STATUS_EXPRESSION: &str = "SET #s = :s, lastUpdated = :u";

pub struct DynamoSpotStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoSpotStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn key(spot_id: &str) -> AttributeValue {
    AttributeValue::S(spot_id.into())
}

#[async_trait]
impl SpotStore for DynamoSpotStore {
    async fn get(&self, spot_id: &str) -> Result<Option<Spot>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(SPOT_ID, key(spot_id))
            .send()
            .await
            .map_err(StoreError::request)?;

        output.item.map(Spot::try_from).transpose()
    }

    async fn scan_all(&self) -> Result<Vec<Spot>, StoreError> {
        let mut spots = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(StoreError::request)?;

            for item in output.items.unwrap_or_default() {
                spots.push(Spot::try_from(item)?);
            }

            match output.last_evaluated_key {
                Some(last_key) if !last_key.is_empty() => start_key = Some(last_key),
                _ => break,
            }
        }

        info!("Scanned {} spots from {}", spots.len(), self.table_name);
        Ok(spots)
    }

    async fn put(&self, spot: &Spot) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(spot.clone().into()))
            .send()
            .await
            .map_err(StoreError::request)?;

        Ok(())
    }

    async fn update_status(&self, spot_id: &str, status: SpotStatus) -> Result<Spot, StoreError> {
        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(SPOT_ID, key(spot_id))
            .update_expression(UPDATE_STATUS_EXPRESSION)
            .expression_attribute_names("#s", STATUS)
            .expression_attribute_values(":s", AttributeValue::S(status.as_str().into()))
            .expression_attribute_values(":u", AttributeValue::S(now_iso()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(StoreError::request)?;

        match output.attributes {
            Some(item) => Spot::try_from(item),
            None => Err(StoreError::Missing(spot_id.into())),
        }
    }

    async fn delete(&self, spot_id: &str) -> Result<Option<Spot>, StoreError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(SPOT_ID, key(spot_id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(StoreError::request)?;

        output.attributes.map(Spot::try_from).transpose()
    }
}
