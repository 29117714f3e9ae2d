//! Column sort state and the comparator it drives.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use supsearch_core::SupplierRecord;
use thiserror::Error;

use crate::normalize::{normalize_price, parse_rating};

/// A column the user can sort by.
///
/// There is no "none" variant: the unsorted state is only
/// reachable through [`SortState::reset`], never by selecting a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Rating,
    Name,
}

impl SortKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Rating => "rating",
            SortKey::Name => "name",
        }
    }

    /// Compares two records on this key in ascending order.
    #[must_use]
    pub fn compare(self, a: &SupplierRecord, b: &SupplierRecord) -> Ordering {
        match self {
            SortKey::Price => normalize_price(&a.price).total_cmp(&normalize_price(&b.price)),
            SortKey::Rating => parse_rating(&a.rating).cmp(&parse_rating(&b.rating)),
            SortKey::Name => a
                .store_name
                .to_lowercase()
                .cmp(&b.store_name.to_lowercase()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort column \"{0}\" (expected price, rating or name)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "rating" => Ok(SortKey::Rating),
            "name" | "store" => Ok(SortKey::Name),
            _ => Err(ParseSortKeyError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the active column header.
    #[must_use]
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    /// Applies the direction to an ascending comparison. Flipping the
    /// comparator (rather than reversing the output) keeps equal keys in
    /// input order both ways.
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Current sort column and direction.
///
/// `field == None` means "keep the order the backend returned".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SortState {
    pub field: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// The user picked column `key`: the same column flips direction, a
    /// different column starts ascending.
    pub fn select(&mut self, key: SortKey) {
        if self.field == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Returns the state after selecting `key`, leaving `self` untouched.
    #[must_use]
    pub fn selected(mut self, key: SortKey) -> Self {
        self.select(key);
        self
    }

    /// Back to `(none, ascending)`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.field.is_none()
    }

    /// Direction-aware comparison. With no active field every pair compares
    /// equal, so a stable sort leaves the input order intact.
    #[must_use]
    pub fn compare(&self, a: &SupplierRecord, b: &SupplierRecord) -> Ordering {
        match self.field {
            Some(key) => self.direction.apply(key.compare(a, b)),
            None => Ordering::Equal,
        }
    }

    /// Returns a new ordering of `records`. The slice itself is not touched.
    #[must_use]
    pub fn sorted<'a>(&self, records: &'a [SupplierRecord]) -> Vec<&'a SupplierRecord> {
        let mut ordered: Vec<&SupplierRecord> = records.iter().collect();
        if self.field.is_some() {
            // `sort_by` is stable.
            ordered.sort_by(|a, b| self.compare(a, b));
        }
        ordered
    }

    /// Header label such as `"price ▼"`, or `"unsorted"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.field {
            Some(key) => format!("{key} {}", self.direction.indicator()),
            None => "unsorted".to_string(),
        }
    }
}
