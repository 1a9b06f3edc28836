//! Trading day labels and observation time labels.
//!
//! Source timestamps are stored as `"<day> <time>"` where `<day>` uses the
//! configured day format (`19-Oct-2026`). Everything keyed by time of day
//! strips the day prefix to obtain a time label.

use crate::config::{ConfigError, MarketConfig};
use crate::models::SpotPrice;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Derives day labels in the exchange timezone.
#[derive(Debug, Clone)]
pub struct TradingCalendar {
    timezone: Tz,
    day_format: String,
    fixed_day: Option<NaiveDate>,
}

impl TradingCalendar {
    /// Creates a calendar that follows the wall clock in `timezone`.
    #[must_use]
    pub fn new(timezone: Tz, day_format: impl Into<String>) -> Self {
        Self {
            timezone,
            day_format: day_format.into(),
            fixed_day: None,
        }
    }

    /// Pins the calendar to `day`, e.g. to replay a stored session.
    #[must_use]
    pub fn with_fixed_day(mut self, day: NaiveDate) -> Self {
        self.fixed_day = Some(day);
        self
    }

    /// Builds a calendar from the market section of the configuration.
    ///
    /// # Errors
    /// Returns error if the timezone is unknown.
    pub fn from_config(config: &MarketConfig) -> Result<Self, ConfigError> {
        let timezone: Tz = config.timezone.parse().map_err(|_| {
            ConfigError::InvalidValue(format!("unknown timezone: {}", config.timezone))
        })?;

        let calendar = Self::new(timezone, config.day_format.clone());
        Ok(match config.fixed_day {
            Some(day) => calendar.with_fixed_day(day),
            None => calendar,
        })
    }

    /// Exchange timezone.
    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Current date in the exchange timezone, or the fixed day.
    #[must_use]
    pub fn today_date(&self) -> NaiveDate {
        self.fixed_day
            .unwrap_or_else(|| Utc::now().with_timezone(&self.timezone).date_naive())
    }

    /// Current day label, e.g. `19-Oct-2026`.
    #[must_use]
    pub fn today(&self) -> String {
        self.format_day(self.today_date())
    }

    /// Formats `date` with the configured day format.
    #[must_use]
    pub fn format_day(&self, date: NaiveDate) -> String {
        date.format(&self.day_format).to_string()
    }
}

/// Strips the `day` prefix from a source timestamp and trims whitespace.
///
/// Timestamps from another day are returned trimmed but otherwise intact, so
/// they never match a label of `day`.
#[must_use]
pub fn time_label<'a>(updated_at_source: &'a str, day: &str) -> &'a str {
    let stamp = updated_at_source.trim_start();
    stamp.strip_prefix(day).unwrap_or(stamp).trim()
}

/// Returns true if a source timestamp was observed on `day`.
#[must_use]
pub fn is_on_day(updated_at_source: &str, day: &str) -> bool {
    updated_at_source.trim_start().starts_with(day)
}

/// Renders a spot observation as `"<label>: <price>"`.
#[must_use]
pub fn spot_label(spot: &SpotPrice, day: &str) -> String {
    format!(
        "{}: {}",
        time_label(&spot.updated_at_source, day),
        spot.last_price
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> TradingCalendar {
        TradingCalendar::new(chrono_tz::Asia::Kolkata, "%d-%b-%Y")
    }

    #[test]
    fn test_format_day() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(calendar().format_day(date), "19-Oct-2026");
    }

    #[test]
    fn test_fixed_day_overrides_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let calendar = calendar().with_fixed_day(date);

        assert_eq!(calendar.today_date(), date);
        assert_eq!(calendar.today(), "05-Mar-2024");
    }

    #[test]
    fn test_from_config_rejects_unknown_timezone() {
        let config = MarketConfig {
            timezone: "Mars/Olympus".to_string(),
            ..MarketConfig::default()
        };

        assert!(TradingCalendar::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_fixed_day() {
        let config = MarketConfig {
            fixed_day: NaiveDate::from_ymd_opt(2026, 10, 19),
            ..MarketConfig::default()
        };

        let calendar = TradingCalendar::from_config(&config).unwrap();
        assert_eq!(calendar.timezone(), chrono_tz::Asia::Kolkata);
        assert_eq!(calendar.today(), "19-Oct-2026");
    }

    #[test]
    fn test_time_label_strips_day_and_whitespace() {
        assert_eq!(
            time_label("19-Oct-2026 09:15:00", "19-Oct-2026"),
            "09:15:00"
        );
        assert_eq!(
            time_label("  19-Oct-2026   09:15:00 ", "19-Oct-2026"),
            "09:15:00"
        );
    }

    #[test]
    fn test_time_label_other_day_kept() {
        assert_eq!(
            time_label("18-Oct-2026 15:29:00", "19-Oct-2026"),
            "18-Oct-2026 15:29:00"
        );
    }

    #[test]
    fn test_is_on_day() {
        assert!(is_on_day("19-Oct-2026 09:15:00", "19-Oct-2026"));
        assert!(is_on_day(" 19-Oct-2026 09:15:00", "19-Oct-2026"));
        assert!(!is_on_day("18-Oct-2026 09:15:00", "19-Oct-2026"));
    }

    #[test]
    fn test_spot_label() {
        let spot = SpotPrice {
            id: 4,
            symbol: "NIFTY".to_string(),
            last_price: 20012.35,
            updated_at_source: "19-Oct-2026 09:20:00".to_string(),
        };

        assert_eq!(spot_label(&spot, "19-Oct-2026"), "09:20:00: 20012.35");
    }
}
