//! Access to the spot table.
//!
//! Every handler goes through [`SpotStore`]; the Lambda binaries wire in
//! [`DynamoSpotStore`], tests use [`MemorySpotStore`]. Each method is a single
//! store call with no retries and no conditional checks.

mod dynamo;
mod memory;

use async_trait::async_trait;

use crate::common::errors::StoreError;
use crate::common::{Spot, SpotStatus};

pub use dynamo::DynamoSpotStore;
pub use memory::MemorySpotStore;

#[async_trait]
pub trait SpotStore: Send + Sync {
    /// Current record for `spot_id`, or `None` if there is none.
    async fn get(&self, spot_id: &str) -> Result<Option<Spot>, StoreError>;

    /// Every stored record, in no particular order.
    async fn scan_all(&self) -> Result<Vec<Spot>, StoreError>;

    /// Writes `spot`, replacing any record with the same id.
    async fn put(&self, spot: &Spot) -> Result<(), StoreError>;

    /// Sets `status` and refreshes `lastUpdated`, returning the updated record.
    /// Callers check existence first; what happens for an unknown id depends
    /// on the store.
    async fn update_status(&self, spot_id: &str, status: SpotStatus) -> Result<Spot, StoreError>;

    /// Removes the record and returns it as it was before removal.
    async fn delete(&self, spot_id: &str) -> Result<Option<Spot>, StoreError>;
}
