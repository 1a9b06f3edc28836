//! Database row types and the JSON snapshot format.

use crate::db::StoreError;
use crate::models::{OptionKind, OptionRecord, SpotPrice};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `nifty` table.
#[derive(Debug, Clone, FromRow)]
pub struct NiftyRow {
    /// Unique identifier.
    pub id: i64,
    /// Strike price.
    pub strike_price: i64,
    /// `CE` or `PE`.
    pub option_type: String,
    /// Contract expiry.
    pub expiry_date: String,
    /// Last traded price.
    pub last_price: Option<f64>,
    /// Open interest.
    pub open_interest: Option<i64>,
    /// Change in open interest.
    pub change_in_oi: Option<i64>,
    /// Traded volume.
    pub total_traded_volume: Option<i64>,
    /// Implied volatility.
    pub implied_volatility: Option<f64>,
    /// Trade date label.
    pub trade_date: String,
    /// Source timestamp.
    pub updated_at_source: String,
}

impl TryFrom<NiftyRow> for OptionRecord {
    type Error = StoreError;

    fn try_from(row: NiftyRow) -> Result<Self, Self::Error> {
        let option_type = OptionKind::from_code(&row.option_type).ok_or_else(|| {
            StoreError::Decode(format!(
                "row {} has unknown option type {:?}",
                row.id, row.option_type
            ))
        })?;

        Ok(Self {
            id: row.id,
            strike_price: row.strike_price,
            option_type,
            expiry_date: row.expiry_date,
            last_price: row.last_price,
            open_interest: row.open_interest,
            change_in_oi: row.change_in_oi,
            total_traded_volume: row.total_traded_volume,
            implied_volatility: row.implied_volatility,
            trade_date: row.trade_date,
            updated_at_source: row.updated_at_source,
        })
    }
}

/// Row of the `spot_price` table.
#[derive(Debug, Clone, FromRow)]
pub struct SpotPriceRow {
    /// Unique identifier.
    pub id: i64,
    /// Index symbol.
    pub symbol: String,
    /// Last traded price.
    pub last_price: f64,
    /// Source timestamp.
    pub updated_at_source: String,
}

impl From<SpotPriceRow> for SpotPrice {
    fn from(row: SpotPriceRow) -> Self {
        Self {
            id: row.id,
            symbol: row.symbol,
            last_price: row.last_price,
            updated_at_source: row.updated_at_source,
        }
    }
}

/// Contents of a snapshot file for the in-memory store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Option chain observations.
    #[serde(default)]
    pub options: Vec<OptionRecord>,
    /// Index spot prices.
    #[serde(default)]
    pub spot_prices: Vec<SpotPrice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(option_type: &str) -> NiftyRow {
        NiftyRow {
            id: 11,
            strike_price: 20050,
            option_type: option_type.to_string(),
            expiry_date: "30-Oct-2026".to_string(),
            last_price: Some(88.1),
            open_interest: Some(120_000),
            change_in_oi: None,
            total_traded_volume: Some(5_000),
            implied_volatility: Some(11.2),
            trade_date: "19-Oct-2026".to_string(),
            updated_at_source: "19-Oct-2026 09:15:00".to_string(),
        }
    }

    #[test]
    fn test_nifty_row_conversion() {
        let record = OptionRecord::try_from(row("PE")).unwrap();

        assert_eq!(record.id, 11);
        assert_eq!(record.option_type, OptionKind::Put);
        assert_eq!(record.change_in_oi, None);
        assert_eq!(record.updated_at_source, "19-Oct-2026 09:15:00");
    }

    #[test]
    fn test_nifty_row_unknown_option_type() {
        let result = OptionRecord::try_from(row("XX"));
        assert!(matches!(result, Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_spot_price_row_conversion() {
        let spot = SpotPrice::from(SpotPriceRow {
            id: 3,
            symbol: "BANKNIFTY".to_string(),
            last_price: 45120.5,
            updated_at_source: "19-Oct-2026 09:15:00".to_string(),
        });

        assert_eq!(spot.symbol, "BANKNIFTY");
        assert_eq!(spot.last_price, 45120.5);
    }

    #[test]
    fn test_snapshot_deserialization() {
        let json = r#"{
            "options": [{
                "id": 1,
                "strikePrice": 20000,
                "optionType": "CE",
                "changeInOi": 100,
                "tradeDate": "19-Oct-2026",
                "updatedAtSource": "19-Oct-2026 09:15:00"
            }],
            "spotPrices": [{
                "id": 1,
                "symbol": "NIFTY",
                "lastPrice": 20012.35,
                "updatedAtSource": "19-Oct-2026 09:15:00"
            }]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.options.len(), 1);
        assert_eq!(snapshot.options[0].change_in_oi, Some(100));
        assert_eq!(snapshot.spot_prices[0].symbol, "NIFTY");
    }

    #[test]
    fn test_snapshot_sections_optional() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.options.is_empty());
        assert!(snapshot.spot_prices.is_empty());
    }
}
