//! Application state management.

use crate::calendar::TradingCalendar;
use crate::compartment::CompartmentBounds;
use crate::config::{Config, ConfigError, MarketConfig};
use crate::db::{MemoryStore, NiftyService, PgStore, SpotPriceService};
use std::sync::Arc;
use tracing::info;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Option chain records.
    pub nifty: Arc<dyn NiftyService>,
    /// Index spot prices.
    pub spot_prices: Arc<dyn SpotPriceService>,
    /// Day label source.
    pub calendar: TradingCalendar,
    /// Compartment strike ranges.
    pub bounds: CompartmentBounds,
    /// Market symbols.
    pub market: MarketConfig,
    /// ATM rounding step.
    pub strike_step: i64,
}

impl AppState {
    /// Creates state over the given stores.
    ///
    /// # Errors
    /// Returns error if the market configuration is invalid.
    pub fn new(
        config: &Config,
        nifty: Arc<dyn NiftyService>,
        spot_prices: Arc<dyn SpotPriceService>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            nifty,
            spot_prices,
            calendar: TradingCalendar::from_config(&config.market)?,
            bounds: CompartmentBounds::from(&config.compartment),
            market: config.market.clone(),
            strike_step: config.compartment.strike_step,
        })
    }

    /// Creates state backed by a single in-memory store.
    ///
    /// # Errors
    /// Returns error if the market configuration is invalid.
    pub fn in_memory(config: &Config, store: MemoryStore) -> Result<Self, ConfigError> {
        let store = Arc::new(store);
        Self::new(config, store.clone(), store)
    }

    /// Creates state from configuration, connecting to PostgreSQL when a
    /// database is configured and falling back to the in-memory store.
    ///
    /// # Errors
    /// Returns error if the database or snapshot cannot be opened.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        if let Some(database) = &config.database {
            let store = Arc::new(PgStore::connect(&database.url).await?);
            if database.run_migrations {
                store.run_migrations().await?;
            }
            info!("Using PostgreSQL store");
            return Ok(Self::new(config, store.clone(), store)?);
        }

        let store = match &config.storage.snapshot {
            Some(path) => MemoryStore::load(path)?,
            None => {
                info!("No database or snapshot configured, starting with an empty store");
                MemoryStore::new()
            }
        };
        Ok(Self::in_memory(config, store)?)
    }
}
