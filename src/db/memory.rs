//! In-memory store, optionally seeded from a JSON snapshot.

use crate::calendar::{is_on_day, time_label};
use crate::db::schema::Snapshot;
use crate::db::store::{NiftyService, SpotPriceService, StoreError};
use crate::models::{OptionRecord, SpotPrice};
use crate::sort::{SortDirection, SortField, SortSpec};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::info;


/// Option records and spot prices held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    options: RwLock<Vec<OptionRecord>>,
    spot_prices: RwLock<Vec<SpotPrice>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the contents of `snapshot`.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            options: RwLock::new(snapshot.options),
            spot_prices: RwLock::new(snapshot.spot_prices),
        }
    }

    /// Loads a JSON snapshot file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path.as_ref())?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        info!(
            path = %path.as_ref().display(),
            options = snapshot.options.len(),
            spot_prices = snapshot.spot_prices.len(),
            "Loaded snapshot"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Appends an option record.
    pub fn insert_option(&self, record: OptionRecord) {
        self.options.write().push(record);
    }

    /// Appends a spot price.
    pub fn insert_spot_price(&self, spot: SpotPrice) {
        self.spot_prices.write().push(spot);
    }

    fn select_options<F>(&self, sort: SortSpec, keep: F) -> Vec<OptionRecord>
    where
        F: Fn(&OptionRecord) -> bool,
    {
        let mut selected: Vec<OptionRecord> = self
            .options
            .read()
            .iter()
            .filter(|record| keep(*record))
            .cloned()
            .collect();
        selected.sort_by(|a, b| {
            sort.direction
                .apply(compare_options(a, b, sort.field).then(a.id.cmp(&b.id)))
        });
        selected
    }
}

fn compare_optional_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

fn compare_options(a: &OptionRecord, b: &OptionRecord, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::StrikePrice => a.strike_price.cmp(&b.strike_price),
        SortField::UpdatedAtSource => a.updated_at_source.cmp(&b.updated_at_source),
        SortField::ChangeInOi => a.change_in_oi.cmp(&b.change_in_oi),
        SortField::OpenInterest => a.open_interest.cmp(&b.open_interest),
        SortField::LastPrice => compare_optional_f64(a.last_price, b.last_price),
    }
}

fn compare_spots(a: &SpotPrice, b: &SpotPrice, field: SortField) -> Ordering {
    match field {
        SortField::UpdatedAtSource => a.updated_at_source.cmp(&b.updated_at_source),
        SortField::LastPrice => a.last_price.total_cmp(&b.last_price),
        _ => a.id.cmp(&b.id),
    }
}

#[async_trait]
impl NiftyService for MemoryStore {
    async fn find_all(&self, day: &str, sort: SortSpec) -> Result<Vec<OptionRecord>, StoreError> {
        Ok(self.select_options(sort, |record| record.trade_date == day))
    }

    async fn find_by_updated_at_source(
        &self,
        day: &str,
        sort: SortSpec,
    ) -> Result<Vec<OptionRecord>, StoreError> {
        Ok(self.select_options(sort, |record| is_on_day(&record.updated_at_source, day)))
    }

    async fn inserted_time_list(
        &self,
        day: &str,
        sort: SortSpec,
    ) -> Result<Vec<String>, StoreError> {
        let labels: BTreeSet<String> = self
            .options
            .read()
            .iter()
            .filter(|record| is_on_day(&record.updated_at_source, day))
            .map(|record| time_label(&record.updated_at_source, day).to_string())
            .collect();

        Ok(match sort.direction {
            SortDirection::Ascending => labels.into_iter().collect(),
            SortDirection::Descending => labels.into_iter().rev().collect(),
        })
    }
}

#[async_trait]
impl SpotPriceService for MemoryStore {
    async fn last_inserted(&self, symbol: &str) -> Result<Option<SpotPrice>, StoreError> {
        Ok(self
            .spot_prices
            .read()
            .iter()
            .filter(|spot| spot.symbol == symbol)
            .max_by_key(|spot| spot.id)
            .cloned())
    }

    async fn spot_prices_by_symbol(
        &self,
        symbol: &str,
        day: &str,
        sort: SortSpec,
    ) -> Result<Vec<SpotPrice>, StoreError> {
        if !sort.field.applies_to_spot() {
            return Err(StoreError::UnsupportedSort(format!(
                "spot prices: {}",
                sort.field.column()
            )));
        }

        let mut selected: Vec<SpotPrice> = self
            .spot_prices
            .read()
            .iter()
            .filter(|spot| spot.symbol == symbol && is_on_day(&spot.updated_at_source, day))
            .cloned()
            .collect();
        selected.sort_by(|a, b| {
            sort.direction
                .apply(compare_spots(a, b, sort.field).then(a.id.cmp(&b.id)))
        });
        Ok(selected)
    }
}
