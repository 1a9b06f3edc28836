//! Change-in-open-interest compartments around the ATM strike.
//!
//! The option chain for the day is split into four compartments by option
//! kind and by which side of the ATM strike a contract sits on. Each
//! compartment maps a strike to a dense time series of change in open
//! interest, aligned on the distinct observation labels seen today.
//!
//! ```text
//!            atm - width - ext        atm              atm + width
//!   calls  ------(======= 1 =======]=====( ===== 2 ===== ]------
//!   puts   ------(======= 3 =======]=====( ===== 4 ===== ]------
//! ```

use crate::calendar::time_label;
use crate::config::CompartmentConfig;
use crate::models::{OptionKind, OptionRecord};
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// Label → change in open interest, ordered by label.
pub type StrikeSeries = BTreeMap<String, i64>;

/// Strike → aligned series.
pub type CompartmentMap = BTreeMap<i64, StrikeSeries>;

/// Which side of the ATM strike a compartment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtmSide {
    /// `atm - width - lower_extension < strike <= atm`.
    AtOrBelow,
    /// `atm < strike <= atm + width`.
    Above,
}

/// One of the four fixed strike/kind buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compartment {
    /// Calls at or below ATM.
    CallsAtOrBelow,
    /// Calls above ATM.
    CallsAbove,
    /// Puts at or below ATM.
    PutsAtOrBelow,
    /// Puts above ATM.
    PutsAbove,
}

impl Compartment {
    /// All compartments in response order.
    pub const ALL: [Compartment; 4] = [
        Compartment::CallsAtOrBelow,
        Compartment::CallsAbove,
        Compartment::PutsAtOrBelow,
        Compartment::PutsAbove,
    ];

    /// Option kind held by this compartment.
    #[must_use]
    pub const fn option_kind(self) -> OptionKind {
        match self {
            Self::CallsAtOrBelow | Self::CallsAbove => OptionKind::Call,
            Self::PutsAtOrBelow | Self::PutsAbove => OptionKind::Put,
        }
    }

    /// Side of the ATM strike covered by this compartment.
    #[must_use]
    pub const fn side(self) -> AtmSide {
        match self {
            Self::CallsAtOrBelow | Self::PutsAtOrBelow => AtmSide::AtOrBelow,
            Self::CallsAbove | Self::PutsAbove => AtmSide::Above,
        }
    }

    /// Returns true if the record belongs to this compartment.
    #[must_use]
    pub fn contains(self, record: &OptionRecord, atm: i64, bounds: CompartmentBounds) -> bool {
        record.option_type == self.option_kind()
            && bounds.contains(self.side(), atm, record.strike_price)
    }
}

/// Strike range widths shared by all compartments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompartmentBounds {
    /// `strikes_per_compartment * strike_step`.
    pub width: i64,
    /// Extra depth added below the at-or-below compartments.
    pub lower_extension: i64,
}

impl CompartmentBounds {
    /// Creates bounds from a width and a lower extension.
    #[must_use]
    pub const fn new(width: i64, lower_extension: i64) -> Self {
        Self {
            width,
            lower_extension,
        }
    }

    /// Tests a strike against the range for `side`.
    #[must_use]
    pub fn contains(self, side: AtmSide, atm: i64, strike: i64) -> bool {
        match side {
            AtmSide::AtOrBelow => {
                strike <= atm && strike > atm - self.width - self.lower_extension
            }
            AtmSide::Above => strike > atm && strike <= atm + self.width,
        }
    }
}

impl From<&CompartmentConfig> for CompartmentBounds {
    fn from(config: &CompartmentConfig) -> Self {
        Self::new(
            i64::from(config.strikes_per_compartment) * config.strike_step,
            config.lower_extension,
        )
    }
}

impl Default for CompartmentBounds {
    fn default() -> Self {
        Self::from(&CompartmentConfig::default())
    }
}

/// The four compartments of one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compartments {
    /// Calls at or below ATM.
    pub calls_at_or_below: CompartmentMap,
    /// Calls above ATM.
    pub calls_above: CompartmentMap,
    /// Puts at or below ATM.
    pub puts_at_or_below: CompartmentMap,
    /// Puts above ATM.
    pub puts_above: CompartmentMap,
}

/// Builds compartments for a single day and ATM strike.
#[derive(Debug, Clone)]
pub struct CompartmentBuilder<'a> {
    atm: i64,
    day: &'a str,
    bounds: CompartmentBounds,
}

impl<'a> CompartmentBuilder<'a> {
    /// Creates a builder for `day` centred on `atm`.
    #[must_use]
    pub fn new(atm: i64, day: &'a str, bounds: CompartmentBounds) -> Self {
        Self { atm, day, bounds }
    }

    /// Builds one compartment.
    #[must_use]
    pub fn build(
        &self,
        compartment: Compartment,
        records: &[OptionRecord],
        time_labels: &[String],
    ) -> CompartmentMap {
        build_compartment(records, time_labels, self.day, |record| {
            compartment.contains(record, self.atm, self.bounds)
        })
    }

    /// Builds all four compartments.
    #[must_use]
    pub fn build_all(&self, records: &[OptionRecord], time_labels: &[String]) -> Compartments {
        Compartments {
            calls_at_or_below: self.build(Compartment::CallsAtOrBelow, records, time_labels),
            calls_above: self.build(Compartment::CallsAbove, records, time_labels),
            puts_at_or_below: self.build(Compartment::PutsAtOrBelow, records, time_labels),
            puts_above: self.build(Compartment::PutsAbove, records, time_labels),
        }
    }
}

/// Filters `records` with `predicate`, groups them by strike and aligns each
/// group on `time_labels`.
///
/// Every strike gets one entry per label; labels with no matching record are
/// zero. Series are ordered by label regardless of the order of
/// `time_labels`.
pub fn build_compartment<P>(
    records: &[OptionRecord],
    time_labels: &[String],
    day: &str,
    predicate: P,
) -> CompartmentMap
where
    P: Fn(&OptionRecord) -> bool,
{
    let mut by_strike: BTreeMap<i64, Vec<&OptionRecord>> = BTreeMap::new();
    for record in records {
        if predicate(record) {
            by_strike.entry(record.strike_price).or_default().push(record);
        }
    }

    by_strike
        .into_iter()
        .map(|(strike, group)| {
            let series = time_labels
                .iter()
                .map(|label| (label.clone(), change_in_oi_at(&group, label, day)))
                .collect();
            (strike, series)
        })
        .collect()
}

/// Change in open interest of the first record observed at `label`, or zero.
#[must_use]
pub fn change_in_oi_at(group: &[&OptionRecord], label: &str, day: &str) -> i64 {
    group
        .iter()
        .find(|record| time_label(&record.updated_at_source, day) == label)
        .and_then(|record| record.change_in_oi)
        .unwrap_or(0)
}

/// Records of one kind, most recently inserted first.
#[must_use]
pub fn rank_latest_first(records: &[OptionRecord], kind: OptionKind) -> Vec<OptionRecord> {
    let mut ranked: Vec<OptionRecord> = records
        .iter()
        .filter(|record| record.option_type == kind)
        .cloned()
        .collect();
    ranked.sort_by(|a, b| b.id.cmp(&a.id));
    ranked
}

