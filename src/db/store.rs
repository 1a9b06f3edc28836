//! Storage traits for option records and spot prices.

use crate::models::{OptionRecord, SpotPrice};
use crate::sort::SortSpec;
use async_trait::async_trait;
use thiserror::Error;

/// Storage error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be converted into a domain record.
    #[error("invalid stored row: {0}")]
    Decode(String),

    /// Snapshot file could not be read.
    #[error("failed to read snapshot: {0}")]
    Snapshot(#[from] std::io::Error),

    /// Snapshot file is not valid JSON.
    #[error("failed to parse snapshot: {0}")]
    SnapshotFormat(#[from] serde_json::Error),

    /// The sort field does not exist on the queried rows.
    #[error("unsupported sort field for {0}")]
    UnsupportedSort(String),
}

/// Read access to stored option chain observations.
#[async_trait]
pub trait NiftyService: Send + Sync {
    /// Records filed under trade date `day`.
    async fn find_all(&self, day: &str, sort: SortSpec) -> Result<Vec<OptionRecord>, StoreError>;

    /// Records whose source timestamp falls on `day`.
    async fn find_by_updated_at_source(
        &self,
        day: &str,
        sort: SortSpec,
    ) -> Result<Vec<OptionRecord>, StoreError>;

    /// Distinct time labels observed on `day`, ordered by label in the
    /// direction of `sort`.
    async fn inserted_time_list(&self, day: &str, sort: SortSpec)
    -> Result<Vec<String>, StoreError>;
}

/// Read access to stored index prices.
#[async_trait]
pub trait SpotPriceService: Send + Sync {
    /// Most recently inserted price for `symbol`.
    async fn last_inserted(&self, symbol: &str) -> Result<Option<SpotPrice>, StoreError>;

    /// Prices for `symbol` observed on `day`.
    async fn spot_prices_by_symbol(
        &self,
        symbol: &str,
        day: &str,
        sort: SortSpec,
    ) -> Result<Vec<SpotPrice>, StoreError>;
}
