//! Unit tests for compartment bucketing.

use super::*;

const DAY: &str = "19-Oct-2026";
const ATM: i64 = 20000;

fn record(id: i64, strike: i64, kind: OptionKind, time: &str, change_in_oi: Option<i64>) -> OptionRecord {
    OptionRecord {
        id,
        strike_price: strike,
        option_type: kind,
        expiry_date: "30-Oct-2026".to_string(),
        last_price: Some(120.5),
        open_interest: Some(50_000),
        change_in_oi,
        total_traded_volume: Some(1_000),
        implied_volatility: Some(12.4),
        trade_date: DAY.to_string(),
        updated_at_source: format!("{DAY} {time}"),
    }
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn builder() -> CompartmentBuilder<'static> {
    CompartmentBuilder::new(ATM, DAY, CompartmentBounds::default())
}

// ============================================================================
// CompartmentBounds Tests
// ============================================================================

#[test]
fn test_default_bounds() {
    let bounds = CompartmentBounds::default();
    assert_eq!(bounds.width, 150);
    assert_eq!(bounds.lower_extension, 50);
}

#[test]
fn test_bounds_from_config() {
    let config = CompartmentConfig {
        strike_step: 100,
        strikes_per_compartment: 4,
        lower_extension: 0,
    };

    assert_eq!(CompartmentBounds::from(&config), CompartmentBounds::new(400, 0));
}

#[test]
fn test_at_or_below_range() {
    let bounds = CompartmentBounds::default();

    assert!(bounds.contains(AtmSide::AtOrBelow, ATM, 20000));
    assert!(bounds.contains(AtmSide::AtOrBelow, ATM, 19850));
    assert!(bounds.contains(AtmSide::AtOrBelow, ATM, 19801));
    assert!(!bounds.contains(AtmSide::AtOrBelow, ATM, 19800));
    assert!(!bounds.contains(AtmSide::AtOrBelow, ATM, 20050));
}

#[test]
fn test_above_range() {
    let bounds = CompartmentBounds::default();

    assert!(!bounds.contains(AtmSide::Above, ATM, 20000));
    assert!(bounds.contains(AtmSide::Above, ATM, 20050));
    assert!(bounds.contains(AtmSide::Above, ATM, 20150));
    assert!(!bounds.contains(AtmSide::Above, ATM, 20200));
}

// ============================================================================
// Compartment Tests
// ============================================================================

#[test]
fn test_compartment_order_and_kinds() {
    let kinds: Vec<OptionKind> = Compartment::ALL.iter().map(|c| c.option_kind()).collect();
    let sides: Vec<AtmSide> = Compartment::ALL.iter().map(|c| c.side()).collect();

    assert_eq!(
        kinds,
        vec![OptionKind::Call, OptionKind::Call, OptionKind::Put, OptionKind::Put]
    );
    assert_eq!(
        sides,
        vec![AtmSide::AtOrBelow, AtmSide::Above, AtmSide::AtOrBelow, AtmSide::Above]
    );
}

#[test]
fn test_compartment_contains_checks_kind() {
    let bounds = CompartmentBounds::default();
    let call = record(1, 19950, OptionKind::Call, "09:15:00", Some(1));

    assert!(Compartment::CallsAtOrBelow.contains(&call, ATM, bounds));
    assert!(!Compartment::PutsAtOrBelow.contains(&call, ATM, bounds));
    assert!(!Compartment::CallsAbove.contains(&call, ATM, bounds));
}

// ============================================================================
// Builder Tests
// ============================================================================

#[test]
fn test_series_follow_labels_and_zero_fill() {
    let records = vec![
        record(1, 19950, OptionKind::Call, "09:15", Some(100)),
        record(2, 19950, OptionKind::Call, "09:20", Some(200)),
    ];

    let map = builder().build(
        Compartment::CallsAtOrBelow,
        &records,
        &labels(&["09:20", "09:15", "09:30"]),
    );

    let series = &map[&19950];
    let entries: Vec<(&str, i64)> = series.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(entries, vec![("09:15", 100), ("09:20", 200), ("09:30", 0)]);
}

#[test]
fn test_every_strike_is_dense() {
    let records = vec![
        record(1, 19900, OptionKind::Call, "09:15", Some(10)),
        record(2, 20000, OptionKind::Call, "09:20", Some(20)),
    ];
    let time_labels = labels(&["09:15", "09:20"]);

    let map = builder().build(Compartment::CallsAtOrBelow, &records, &time_labels);

    assert_eq!(map.len(), 2);
    for series in map.values() {
        assert_eq!(series.len(), time_labels.len());
    }
    assert_eq!(map[&19900]["09:20"], 0);
    assert_eq!(map[&20000]["09:15"], 0);
}

#[test]
fn test_strikes_outside_range_excluded() {
    let records = vec![
        record(1, 19800, OptionKind::Call, "09:15", Some(1)),
        record(2, 19850, OptionKind::Call, "09:15", Some(2)),
        record(3, 20150, OptionKind::Call, "09:15", Some(3)),
        record(4, 20200, OptionKind::Call, "09:15", Some(4)),
    ];
    let time_labels = labels(&["09:15"]);

    let below = builder().build(Compartment::CallsAtOrBelow, &records, &time_labels);
    let above = builder().build(Compartment::CallsAbove, &records, &time_labels);

    assert_eq!(below.keys().copied().collect::<Vec<_>>(), vec![19850]);
    assert_eq!(above.keys().copied().collect::<Vec<_>>(), vec![20150]);
}

#[test]
fn test_first_match_wins_for_duplicate_label() {
    let records = vec![
        record(1, 20000, OptionKind::Put, "09:15", Some(-40)),
        record(2, 20000, OptionKind::Put, "09:15", Some(999)),
    ];

    let map = builder().build(Compartment::PutsAtOrBelow, &records, &labels(&["09:15"]));

    assert_eq!(map[&20000]["09:15"], -40);
}

#[test]
fn test_missing_change_in_oi_is_zero() {
    let records = vec![record(1, 20100, OptionKind::Put, "09:15", None)];

    let map = builder().build(Compartment::PutsAbove, &records, &labels(&["09:15"]));

    assert_eq!(map[&20100]["09:15"], 0);
}

#[test]
fn test_build_all_splits_by_kind_and_side() {
    let records = vec![
        record(1, 19950, OptionKind::Call, "09:15", Some(11)),
        record(2, 20050, OptionKind::Call, "09:15", Some(12)),
        record(3, 19950, OptionKind::Put, "09:15", Some(13)),
        record(4, 20050, OptionKind::Put, "09:15", Some(14)),
    ];

    let compartments = builder().build_all(&records, &labels(&["09:15"]));

    assert_eq!(compartments.calls_at_or_below[&19950]["09:15"], 11);
    assert_eq!(compartments.calls_above[&20050]["09:15"], 12);
    assert_eq!(compartments.puts_at_or_below[&19950]["09:15"], 13);
    assert_eq!(compartments.puts_above[&20050]["09:15"], 14);
    assert_eq!(compartments.calls_above.len(), 1);
}

#[test]
fn test_no_labels_gives_empty_series() {
    let records = vec![record(1, 20000, OptionKind::Call, "09:15", Some(5))];

    let map = builder().build(Compartment::CallsAtOrBelow, &records, &[]);

    assert!(map[&20000].is_empty());
}

#[test]
fn test_no_records_gives_empty_compartments() {
    let compartments = builder().build_all(&[], &labels(&["09:15"]));
    assert_eq!(compartments, Compartments::default());
}

// ============================================================================
// Helper Tests
// ============================================================================

#[test]
fn test_change_in_oi_at() {
    let a = record(1, 20000, OptionKind::Call, "09:15", Some(7));
    let b = record(2, 20000, OptionKind::Call, "09:20", Some(9));
    let group = vec![&a, &b];

    assert_eq!(change_in_oi_at(&group, "09:20", DAY), 9);
    assert_eq!(change_in_oi_at(&group, "09:25", DAY), 0);
}

#[test]
fn test_rank_latest_first() {
    let records = vec![
        record(1, 20000, OptionKind::Call, "09:15", Some(1)),
        record(2, 20000, OptionKind::Put, "09:15", Some(1)),
        record(3, 20050, OptionKind::Call, "09:20", Some(1)),
    ];

    let calls = rank_latest_first(&records, OptionKind::Call);
    let puts = rank_latest_first(&records, OptionKind::Put);

    assert_eq!(calls.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1]);
    assert_eq!(puts.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
}
