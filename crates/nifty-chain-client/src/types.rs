//! Response types for the option chain API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;


/// Sort direction sent as the `{orderBy}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Path segment for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Option kind as published by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    /// Call option.
    #[serde(rename = "CE")]
    Call,
    /// Put option.
    #[serde(rename = "PE")]
    Put,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CE"),
            Self::Put => write!(f, "PE"),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Error body returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
}

// ============================================================================
// Option Chain
// ============================================================================

/// One observed snapshot of an option contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRecord {
    /// Insertion-ordered identifier.
    pub id: i64,
    /// Strike price.
    pub strike_price: i64,
    /// Call or put.
    pub option_type: OptionKind,
    /// Contract expiry.
    #[serde(default)]
    pub expiry_date: String,
    /// Last traded price.
    #[serde(default)]
    pub last_price: Option<f64>,
    /// Open interest.
    #[serde(default)]
    pub open_interest: Option<i64>,
    /// Change in open interest.
    #[serde(default)]
    pub change_in_oi: Option<i64>,
    /// Contracts traded today.
    #[serde(default)]
    pub total_traded_volume: Option<i64>,
    /// Implied volatility in percent.
    #[serde(default)]
    pub implied_volatility: Option<f64>,
    /// Trade date label.
    pub trade_date: String,
    /// Source timestamp.
    pub updated_at_source: String,
}

/// Today's raw option feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Calls, most recently inserted first.
    #[serde(rename = "niftyCeList")]
    pub nifty_ce_list: Vec<OptionRecord>,
    /// Puts, most recently inserted first.
    #[serde(rename = "niftyPeList")]
    pub nifty_pe_list: Vec<OptionRecord>,
    /// Last index price.
    #[serde(rename = "niftySpotPrice")]
    pub nifty_spot_price: Option<f64>,
}

/// Strike → (time label → change in open interest).
pub type CompartmentMap = BTreeMap<i64, BTreeMap<String, i64>>;

/// Compartment analysis around the ATM strike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Calls at or below ATM.
    pub compartment1: CompartmentMap,
    /// Calls above ATM.
    pub compartment2: CompartmentMap,
    /// Puts at or below ATM.
    pub compartment3: CompartmentMap,
    /// Puts above ATM.
    pub compartment4: CompartmentMap,
    /// Distinct observation labels seen today.
    #[serde(rename = "insertedTimeList")]
    pub inserted_time_list: Vec<String>,
    /// ATM strike.
    #[serde(rename = "niftyATM")]
    pub nifty_atm: Option<i64>,
    /// `"<label>: <price>"` of the last spot observation.
    #[serde(rename = "niftySpot")]
    pub nifty_spot: Option<String>,
    /// Day label of the analysis.
    #[serde(rename = "currentDate")]
    pub current_date: String,
}

impl AnalysisResponse {
    /// Compartments in response order.
    #[must_use]
    pub fn compartments(&self) -> [&CompartmentMap; 4] {
        [
            &self.compartment1,
            &self.compartment2,
            &self.compartment3,
            &self.compartment4,
        ]
    }
}

// ============================================================================
// Indexes
// ============================================================================

/// Last traded price of an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPrice {
    /// Insertion-ordered identifier.
    pub id: i64,
    /// Index symbol.
    pub symbol: String,
    /// Last traded price.
    pub last_price: f64,
    /// Source timestamp.
    pub updated_at_source: String,
}

/// Today's index price series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexesResponse {
    /// NIFTY observations.
    #[serde(rename = "niftyToday")]
    pub nifty_today: Vec<SpotPrice>,
    /// BANKNIFTY observations.
    #[serde(rename = "bankNiftyToday")]
    pub bank_nifty_today: Vec<SpotPrice>,
}
