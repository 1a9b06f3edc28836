//! Domain records and request/response models for the REST API.

use crate::compartment::CompartmentMap;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};


/// Option kind as published by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OptionKind {
    /// Call option (`CE`).
    #[serde(rename = "CE")]
    Call,
    /// Put option (`PE`).
    #[serde(rename = "PE")]
    Put,
}

impl OptionKind {
    /// Exchange code for this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
        }
    }

    /// Parses an exchange code (`CE`/`PE`, case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CE" => Some(Self::Call),
            "PE" => Some(Self::Put),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One observed snapshot of an option contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionRecord {
    /// Insertion-ordered identifier.
    pub id: i64,
    /// Strike price in index points.
    pub strike_price: i64,
    /// Call or put.
    pub option_type: OptionKind,
    /// Contract expiry as published by the exchange.
    #[serde(default)]
    pub expiry_date: String,
    /// Last traded price of the contract.
    #[serde(default)]
    pub last_price: Option<f64>,
    /// Outstanding contracts.
    #[serde(default)]
    pub open_interest: Option<i64>,
    /// Change in open interest since the previous observation.
    #[serde(default)]
    pub change_in_oi: Option<i64>,
    /// Contracts traded today.
    #[serde(default)]
    pub total_traded_volume: Option<i64>,
    /// Implied volatility in percent.
    #[serde(default)]
    pub implied_volatility: Option<f64>,
    /// Day label under which the record was stored (e.g. `19-Oct-2026`).
    pub trade_date: String,
    /// Source timestamp, `"<day> <HH:MM:SS>"`.
    pub updated_at_source: String,
}

/// Last traded price of an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpotPrice {
    /// Insertion-ordered identifier.
    pub id: i64,
    /// Index symbol (e.g. `NIFTY`).
    pub symbol: String,
    /// Last traded price.
    pub last_price: f64,
    /// Source timestamp, `"<day> <HH:MM:SS>"`.
    pub updated_at_source: String,
}

/// Path parameters shared by the refresh endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct SortParams {
    /// Field to sort by.
    pub sort_by: String,
    /// `ASC` for ascending, anything else for descending.
    #[serde(default)]
    pub order_by: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Today's raw option feed split by kind.
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    /// Call records, most recently inserted first.
    #[serde(rename = "niftyCeList")]
    pub nifty_ce_list: Vec<OptionRecord>,
    /// Put records, most recently inserted first.
    #[serde(rename = "niftyPeList")]
    pub nifty_pe_list: Vec<OptionRecord>,
    /// Last index price, if one has been stored.
    #[serde(rename = "niftySpotPrice")]
    pub nifty_spot_price: Option<f64>,
}

/// Change-in-open-interest compartments around the ATM strike.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResponse {
    /// Calls at or below ATM.
    #[schema(value_type = Object)]
    pub compartment1: CompartmentMap,
    /// Calls above ATM.
    #[schema(value_type = Object)]
    pub compartment2: CompartmentMap,
    /// Puts at or below ATM.
    #[schema(value_type = Object)]
    pub compartment3: CompartmentMap,
    /// Puts above ATM.
    #[schema(value_type = Object)]
    pub compartment4: CompartmentMap,
    /// Distinct observation labels seen today, in the requested order.
    #[serde(rename = "insertedTimeList")]
    pub inserted_time_list: Vec<String>,
    /// ATM strike, absent when no spot price is stored.
    #[serde(rename = "niftyATM")]
    pub nifty_atm: Option<i64>,
    /// `"<label>: <price>"` of the last spot observation.
    #[serde(rename = "niftySpot")]
    pub nifty_spot: Option<String>,
    /// Day label the analysis ran for.
    #[serde(rename = "currentDate")]
    pub current_date: String,
}

/// Today's index price series.
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexesResponse {
    /// NIFTY observations, oldest first.
    #[serde(rename = "niftyToday")]
    pub nifty_today: Vec<SpotPrice>,
    /// BANKNIFTY observations, oldest first.
    #[serde(rename = "bankNiftyToday")]
    pub bank_nifty_today: Vec<SpotPrice>,
}
