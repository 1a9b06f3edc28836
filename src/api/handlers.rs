//! API request handlers.

use crate::calendar::spot_label;
use crate::compartment::{CompartmentBuilder, Compartments, rank_latest_first};
use crate::error::ApiError;
use crate::models::{
    AnalysisResponse, HealthResponse, IndexesResponse, OptionKind, RefreshResponse, SortParams,
};
use crate::sort::SortSpec;
use crate::state::AppState;
use crate::strike::atm_strike;
use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Option Chain
// ============================================================================

/// Today's raw option feed, split into calls and puts.
#[utoipa::path(
    get,
    path = "/nifty/refresh/{sort_by}/{order_by}",
    params(SortParams),
    responses(
        (status = 200, description = "Option feed for today", body = RefreshResponse),
        (status = 400, description = "Unknown sort field")
    ),
    tag = "Nifty"
)]
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Path(params): Path<SortParams>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let sort = SortSpec::from_path(&params.sort_by, params.order_by.as_deref())?;
    let day = state.calendar.today();

    let records = state.nifty.find_all(&day, sort).await?;
    let spot = state
        .spot_prices
        .last_inserted(&state.market.index_symbol)
        .await?;
    debug!(day = %day, records = records.len(), "refresh");

    Ok(Json(RefreshResponse {
        nifty_ce_list: rank_latest_first(&records, OptionKind::Call),
        nifty_pe_list: rank_latest_first(&records, OptionKind::Put),
        nifty_spot_price: spot.map(|spot| spot.last_price),
    }))
}

/// Change-in-open-interest compartments around the ATM strike.
#[utoipa::path(
    get,
    path = "/nifty/refreshAnalysis/{sort_by}/{order_by}",
    params(SortParams),
    responses(
        (status = 200, description = "Compartment analysis for today", body = AnalysisResponse),
        (status = 400, description = "Unknown sort field")
    ),
    tag = "Nifty"
)]
pub async fn refresh_analysis(
    State(state): State<Arc<AppState>>,
    Path(params): Path<SortParams>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let sort = SortSpec::from_path(&params.sort_by, params.order_by.as_deref())?;
    let day = state.calendar.today();

    let spot = state
        .spot_prices
        .last_inserted(&state.market.index_symbol)
        .await?;
    let atm = spot
        .as_ref()
        .and_then(|spot| atm_strike(spot.last_price, state.strike_step));

    let time_labels = state.nifty.inserted_time_list(&day, sort).await?;

    let compartments = match atm {
        Some(atm) => {
            let records = state.nifty.find_by_updated_at_source(&day, sort).await?;
            debug!(
                day = %day,
                atm,
                records = records.len(),
                labels = time_labels.len(),
                "refresh analysis"
            );
            CompartmentBuilder::new(atm, &day, state.bounds).build_all(&records, &time_labels)
        }
        None => {
            warn!(
                day = %day,
                symbol = %state.market.index_symbol,
                "No usable spot price, returning empty compartments"
            );
            Compartments::default()
        }
    };

    Ok(Json(AnalysisResponse {
        compartment1: compartments.calls_at_or_below,
        compartment2: compartments.calls_above,
        compartment3: compartments.puts_at_or_below,
        compartment4: compartments.puts_above,
        inserted_time_list: time_labels,
        nifty_atm: atm,
        nifty_spot: spot.as_ref().map(|spot| spot_label(spot, &day)),
        current_date: day,
    }))
}

// ============================================================================
// Indexes
// ============================================================================

/// Today's index price series.
#[utoipa::path(
    get,
    path = "/nifty/refreshIndexes",
    responses(
        (status = 200, description = "Index prices for today", body = IndexesResponse)
    ),
    tag = "Indexes"
)]
pub async fn refresh_indexes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IndexesResponse>, ApiError> {
    let day = state.calendar.today();
    let sort = SortSpec::id_ascending();

    let nifty_today = state
        .spot_prices
        .spot_prices_by_symbol(&state.market.index_symbol, &day, sort)
        .await?;
    let bank_nifty_today = state
        .spot_prices
        .spot_prices_by_symbol(&state.market.bank_index_symbol, &day, sort)
        .await?;
    debug!(
        day = %day,
        nifty = nifty_today.len(),
        bank_nifty = bank_nifty_today.len(),
        "refresh indexes"
    );

    Ok(Json(IndexesResponse {
        nifty_today,
        bank_nifty_today,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::MemoryStore;
    use crate::models::{OptionRecord, SpotPrice};
    use chrono::NaiveDate;

    const DAY: &str = "19-Oct-2026";

    fn option(id: i64, strike: i64, kind: OptionKind, time: &str, change_in_oi: i64) -> OptionRecord {
        OptionRecord {
            id,
            strike_price: strike,
            option_type: kind,
            expiry_date: "30-Oct-2026".to_string(),
            last_price: Some(85.0),
            open_interest: Some(120_000),
            change_in_oi: Some(change_in_oi),
            total_traded_volume: Some(4_500),
            implied_volatility: Some(11.8),
            trade_date: DAY.to_string(),
            updated_at_source: format!("{DAY} {time}"),
        }
    }

    fn spot(id: i64, symbol: &str, price: f64, time: &str) -> SpotPrice {
        SpotPrice {
            id,
            symbol: symbol.to_string(),
            last_price: price,
            updated_at_source: format!("{DAY} {time}"),
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.market.fixed_day = NaiveDate::from_ymd_opt(2026, 10, 19);
        config
    }

    fn create_test_state(store: MemoryStore) -> Arc<AppState> {
        Arc::new(AppState::in_memory(&test_config(), store).unwrap())
    }

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_option(option(1, 19950, OptionKind::Call, "09:15:00", 100));
        store.insert_option(option(2, 20050, OptionKind::Put, "09:15:00", -30));
        store.insert_option(option(3, 19950, OptionKind::Call, "09:20:00", 200));
        store.insert_option(option(4, 20100, OptionKind::Call, "09:20:00", 55));
        store.insert_option(option(5, 19800, OptionKind::Put, "09:20:00", 999));
        store.insert_spot_price(spot(1, "NIFTY", 19990.4, "09:15:00"));
        store.insert_spot_price(spot(2, "BANKNIFTY", 45110.0, "09:15:00"));
        store.insert_spot_price(spot(3, "NIFTY", 20012.35, "09:20:00"));
        store
    }

    fn params(sort_by: &str, order_by: Option<&str>) -> Path<SortParams> {
        Path(SortParams {
            sort_by: sort_by.to_string(),
            order_by: order_by.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await.0;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_refresh_splits_and_ranks() {
        let state = create_test_state(seeded_store());

        let response = refresh(State(state), params("id", Some("ASC")))
            .await
            .unwrap()
            .0;

        let call_ids: Vec<i64> = response.nifty_ce_list.iter().map(|r| r.id).collect();
        let put_ids: Vec<i64> = response.nifty_pe_list.iter().map(|r| r.id).collect();
        assert_eq!(call_ids, vec![4, 3, 1]);
        assert_eq!(put_ids, vec![5, 2]);
        assert_eq!(response.nifty_spot_price, Some(20012.35));
    }

    #[tokio::test]
    async fn test_refresh_unknown_sort_field() {
        let state = create_test_state(seeded_store());

        let result = refresh(State(state), params("volume", None)).await;

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_refresh_analysis_compartments() {
        let state = create_test_state(seeded_store());

        let response = refresh_analysis(State(state), params("id", Some("ASC")))
            .await
            .unwrap()
            .0;

        assert_eq!(response.nifty_atm, Some(20000));
        assert_eq!(response.nifty_spot.as_deref(), Some("09:20:00: 20012.35"));
        assert_eq!(response.current_date, DAY);
        assert_eq!(response.inserted_time_list, vec!["09:15:00", "09:20:00"]);

        let calls_below = &response.compartment1[&19950];
        assert_eq!(calls_below["09:15:00"], 100);
        assert_eq!(calls_below["09:20:00"], 200);

        let calls_above = &response.compartment2[&20100];
        assert_eq!(calls_above["09:15:00"], 0);
        assert_eq!(calls_above["09:20:00"], 55);

        assert!(response.compartment3.is_empty());
        assert_eq!(response.compartment4[&20050]["09:15:00"], -30);
    }

    #[tokio::test]
    async fn test_refresh_analysis_descending_labels() {
        let state = create_test_state(seeded_store());

        let response = refresh_analysis(State(state), params("id", Some("DESC")))
            .await
            .unwrap()
            .0;

        assert_eq!(response.inserted_time_list, vec!["09:20:00", "09:15:00"]);
        let labels: Vec<&String> = response.compartment1[&19950].keys().collect();
        assert_eq!(labels, vec!["09:15:00", "09:20:00"]);
    }

    #[tokio::test]
    async fn test_refresh_analysis_without_spot() {
        let store = MemoryStore::new();
        store.insert_option(option(1, 20000, OptionKind::Call, "09:15:00", 10));
        let state = create_test_state(store);

        let response = refresh_analysis(State(state), params("id", None))
            .await
            .unwrap()
            .0;

        assert_eq!(response.nifty_atm, None);
        assert_eq!(response.nifty_spot, None);
        assert!(response.compartment1.is_empty());
        assert!(response.compartment4.is_empty());
        assert_eq!(response.inserted_time_list, vec!["09:15:00"]);
    }

    #[tokio::test]
    async fn test_refresh_indexes() {
        let state = create_test_state(seeded_store());

        let response = refresh_indexes(State(state)).await.unwrap().0;

        let nifty_ids: Vec<i64> = response.nifty_today.iter().map(|s| s.id).collect();
        assert_eq!(nifty_ids, vec![1, 3]);
        assert_eq!(response.bank_nifty_today.len(), 1);
        assert_eq!(response.bank_nifty_today[0].last_price, 45110.0);
    }

    #[tokio::test]
    async fn test_refresh_indexes_empty_day() {
        let mut config = test_config();
        config.market.fixed_day = NaiveDate::from_ymd_opt(2026, 10, 20);
        let state = Arc::new(AppState::in_memory(&config, seeded_store()).unwrap());

        let response = refresh_indexes(State(state)).await.unwrap().0;

        assert!(response.nifty_today.is_empty());
        assert!(response.bank_nifty_today.is_empty());
    }
}
