//! Sort specification parsed from the `{sortBy}/{orderBy}` path segments.

use std::cmp::Ordering;
use thiserror::Error;

/// Sort parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// The requested field is not sortable.
    #[error("unknown sort field: {0}")]
    UnknownField(String),
}

/// Sortable record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Insertion order.
    Id,
    /// Strike price.
    StrikePrice,
    /// Source timestamp.
    UpdatedAtSource,
    /// Change in open interest.
    ChangeInOi,
    /// Open interest.
    OpenInterest,
    /// Last traded price.
    LastPrice,
}

impl SortField {
    /// Parses a field name in camelCase or snake_case.
    ///
    /// # Errors
    /// Returns error if the name is not a sortable field.
    pub fn parse(name: &str) -> Result<Self, SortError> {
        match name.trim() {
            "id" => Ok(Self::Id),
            "strikePrice" | "strike_price" => Ok(Self::StrikePrice),
            "updatedAtSource" | "updated_at_source" => Ok(Self::UpdatedAtSource),
            "changeInOi" | "change_in_oi" => Ok(Self::ChangeInOi),
            "openInterest" | "open_interest" => Ok(Self::OpenInterest),
            "lastPrice" | "last_price" => Ok(Self::LastPrice),
            other => Err(SortError::UnknownField(other.to_string())),
        }
    }

    /// Column name backing this field.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::StrikePrice => "strike_price",
            Self::UpdatedAtSource => "updated_at_source",
            Self::ChangeInOi => "change_in_oi",
            Self::OpenInterest => "open_interest",
            Self::LastPrice => "last_price",
        }
    }

    /// Returns true if spot price rows carry this field.
    #[must_use]
    pub const fn applies_to_spot(self) -> bool {
        matches!(self, Self::Id | Self::UpdatedAtSource | Self::LastPrice)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// `ASC` is ascending, any other value descending, absent ascending.
    #[must_use]
    pub fn from_order_by(order_by: Option<&str>) -> Self {
        match order_by {
            None | Some("ASC") => Self::Ascending,
            Some(_) => Self::Descending,
        }
    }

    /// SQL keyword for this direction.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// Applies the direction to an ascending ordering.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Field and direction for ordering query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to order by.
    pub field: SortField,
    /// Direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort specification.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Ascending by insertion order.
    #[must_use]
    pub const fn id_ascending() -> Self {
        Self::new(SortField::Id, SortDirection::Ascending)
    }

    /// Parses the `{sortBy}` and optional `{orderBy}` path segments.
    ///
    /// # Errors
    /// Returns error if `sort_by` is not a sortable field.
    pub fn from_path(sort_by: &str, order_by: Option<&str>) -> Result<Self, SortError> {
        Ok(Self::new(
            SortField::parse(sort_by)?,
            SortDirection::from_order_by(order_by),
        ))
    }

    /// `ORDER BY` clause for this specification.
    #[must_use]
    pub fn order_by_clause(&self) -> String {
        format!(
            "ORDER BY {} {}, id {}",
            self.field.column(),
            self.direction.sql(),
            self.direction.sql()
        )
    }
}
