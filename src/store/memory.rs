use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::common::errors::StoreError;
use crate::common::{now_iso, Spot, SpotStatus};
use crate::store::SpotStore;

/// In-process table keyed by spot id, for tests and local runs.
#[derive(Default)]
pub struct MemorySpotStore {
    spots: Mutex<HashMap<String, Spot>>,
}

impl MemorySpotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.spots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.spots.lock().await.is_empty()
    }
}

#[async_trait]
impl SpotStore for MemorySpotStore {
    async fn get(&self, spot_id: &str) -> Result<Option<Spot>, StoreError> {
        Ok(self.spots.lock().await.get(spot_id).cloned())
    }

    async fn scan_all(&self) -> Result<Vec<Spot>, StoreError> {
        Ok(self.spots.lock().await.values().cloned().collect())
    }

    async fn put(&self, spot: &Spot) -> Result<(), StoreError> {
        self.spots
            .lock()
            .await
            .insert(spot.spot_id.clone(), spot.clone());
        Ok(())
    }

    async fn update_status(&self, spot_id: &str, status: SpotStatus) -> Result<Spot, StoreError> {
        let mut spots = self.spots.lock().await;
        let spot = spots
            .get_mut(spot_id)
            .ok_or_else(|| StoreError::Missing(spot_id.into()))?;

        spot.status = status;
        spot.last_updated = now_iso();
        Ok(spot.clone())
    }

    async fn delete(&self, spot_id: &str) -> Result<Option<Spot>, StoreError> {
        Ok(self.spots.lock().await.remove(spot_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_overwrites_existing_record() {
        let store = MemorySpotStore::new();
        store
            .put(&Spot::register("A1".into(), Some("Lot1".into()), None, None))
            .await
            .unwrap();
        store
            .put(&Spot::register("A1".into(), Some("Lot2".into()), None, None))
            .await
            .unwrap();

        let spot = store.get("A1").await.unwrap().unwrap();
        assert_eq!(spot.lot_id.as_deref(), Some("Lot2"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_status_refreshes_timestamp() {
        let store = MemorySpotStore::new();
        let mut spot = Spot::register("A1".into(), None, None, None);
        spot.last_updated = "2000-01-01T00:00:00.000000+00:00".into();
        store.put(&spot).await.unwrap();

        let updated = store
            .update_status("A1", SpotStatus::Occupied)
            .await
            .unwrap();

        assert_eq!(updated.status, SpotStatus::Occupied);
        assert_ne!(updated.last_updated, spot.last_updated);
        assert_eq!(store.get("A1").await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_status_of_unknown_spot_creates_nothing() {
        let store = MemorySpotStore::new();

        let result = store.update_status("ZZZ", SpotStatus::Occupied).await;

        assert!(matches!(result, Err(StoreError::Missing(ref id)) if id == "ZZZ"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_returns_previous_value() {
        let store = MemorySpotStore::new();
        let spot = Spot::register("A1".into(), None, None, None);
        store.put(&spot).await.unwrap();

        assert_eq!(store.delete("A1").await.unwrap(), Some(spot));
        assert_eq!(store.delete("A1").await.unwrap(), None);
        assert!(store.get("A1").await.unwrap().is_none());
    }
}
