//! PostgreSQL-backed store.

use crate::db::schema::{NiftyRow, SpotPriceRow};
use crate::db::store::{NiftyService, SpotPriceService, StoreError};
use crate::models::{OptionRecord, SpotPrice};
use crate::sort::SortSpec;
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::{debug, info};

const NIFTY_COLUMNS: &str = "id, strike_price, option_type, expiry_date, last_price, \
     open_interest, change_in_oi, total_traded_volume, implied_volatility, trade_date, \
     updated_at_source";

const SPOT_COLUMNS: &str = "id, symbol, last_price, updated_at_source";

/// Store reading the `nifty` and `spot_price` tables.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects to PostgreSQL.
    ///
    /// # Arguments
    /// * `database_url` - PostgreSQL connection string
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        info!("Database connection pool established");

        Ok(Self { pool })
    }

    /// Creates the option chain tables if they do not exist.
    ///
    /// # Errors
    /// Returns an error if migrations fail.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn fetch_records(
        &self,
        filter: &str,
        bind: String,
        sort: SortSpec,
    ) -> Result<Vec<OptionRecord>, StoreError> {
        let sql = format!(
            "SELECT {NIFTY_COLUMNS} FROM nifty WHERE {filter} {}",
            sort.order_by_clause()
        );

        let rows: Vec<NiftyRow> = sqlx::query_as(&sql)
            .bind(bind)
            .fetch_all(&self.pool)
            .await?;
        debug!(rows = rows.len(), %sql, "fetched option records");

        rows.into_iter().map(OptionRecord::try_from).collect()
    }
}

/// `LIKE` pattern matching timestamps that start with `day`.
fn day_pattern(day: &str) -> String {
    let escaped = day
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("{escaped}%")
}

#[async_trait]
impl NiftyService for PgStore {
    async fn find_all(&self, day: &str, sort: SortSpec) -> Result<Vec<OptionRecord>, StoreError> {
        self.fetch_records("trade_date = $1", day.to_string(), sort)
            .await
    }

    async fn find_by_updated_at_source(
        &self,
        day: &str,
        sort: SortSpec,
    ) -> Result<Vec<OptionRecord>, StoreError> {
        self.fetch_records("LTRIM(updated_at_source) LIKE $1", day_pattern(day), sort)
            .await
    }

    async fn inserted_time_list(
        &self,
        day: &str,
        sort: SortSpec,
    ) -> Result<Vec<String>, StoreError> {
        let sql = format!(
            "SELECT DISTINCT TRIM(SUBSTRING(LTRIM(updated_at_source) FROM CHAR_LENGTH($1::text) + 1)) AS label \
             FROM nifty WHERE LTRIM(updated_at_source) LIKE $2 ORDER BY label {}",
            sort.direction.sql()
        );

        let labels: Vec<String> = sqlx::query_scalar(&sql)
            .bind(day)
            .bind(day_pattern(day))
            .fetch_all(&self.pool)
            .await?;
        debug!(labels = labels.len(), day, "fetched inserted time list");

        Ok(labels)
    }
}

#[async_trait]
impl SpotPriceService for PgStore {
    async fn last_inserted(&self, symbol: &str) -> Result<Option<SpotPrice>, StoreError> {
        let sql = format!(
            "SELECT {SPOT_COLUMNS} FROM spot_price WHERE symbol = $1 ORDER BY id DESC LIMIT 1"
        );

        let row: Option<SpotPriceRow> = sqlx::query_as(&sql)
            .bind(symbol)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SpotPrice::from))
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

        let sql = format!(
            "SELECT {SPOT_COLUMNS} FROM spot_price \
             WHERE symbol = $1 AND LTRIM(updated_at_source) LIKE $2 {}",
            sort.order_by_clause()
        );

        let rows: Vec<SpotPriceRow> = sqlx::query_as(&sql)
            .bind(symbol)
            .bind(day_pattern(day))
            .fetch_all(&self.pool)
            .await?;
        debug!(rows = rows.len(), symbol, day, "fetched spot prices");

        Ok(rows.into_iter().map(SpotPrice::from).collect())
    }
}
