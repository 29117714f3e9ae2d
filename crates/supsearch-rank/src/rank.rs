//! Best-price selection and the ranked view handed to renderers.

use supsearch_core::SupplierRecord;

use crate::normalize::{is_unavailable, normalize_price};
use crate::sort::SortState;

/// Minimum normalized price across `records`.
///
/// Returns `f64::INFINITY` when the set is empty or no record has a usable
/// price.
#[must_use]
pub fn best_price(records: &[SupplierRecord]) -> f64 {
    records
        .iter()
        .map(|r| normalize_price(&r.price))
        .fold(f64::INFINITY, f64::min)
}

/// Returns `true` if `record` holds the best price. Records without a
/// usable price are never flagged, even when `min_price` is infinite.
#[must_use]
pub fn is_best(record: &SupplierRecord, min_price: f64) -> bool {
    let price = normalize_price(&record.price);
    // Both sides come out of `normalize_price`, so exact equality is what we want.
    #[allow(clippy::float_cmp)]
    let matches = price == min_price;
    price.is_finite() && matches
}

/// Price text to show for `record`: `detailed_price` when it is present,
/// non-blank and not an "unavailable" marker, otherwise `price`.
#[must_use]
pub fn display_price(record: &SupplierRecord) -> &str {
    match record.detailed_price.as_deref() {
        Some(detailed) if !detailed.trim().is_empty() && !is_unavailable(detailed) => detailed,
        _ => &record.price,
    }
}

/// One row of a ranked result set.
#[derive(Debug, Clone)]
pub struct RankedRow<'a> {
    /// 1-based position after sorting.
    pub rank: usize,
    pub record: &'a SupplierRecord,
    pub is_best: bool,
}

impl<'a> RankedRow<'a> {
    #[must_use]
    pub fn display_price(&self) -> &'a str {
        display_price(self.record)
    }

    /// MOQ text, or `None` when it is blank or an "unavailable" marker.
    #[must_use]
    pub fn moq(&self) -> Option<&'a str> {
        self.record
            .moq
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty() && !is_unavailable(m))
    }
}

/// Ordered, flagged view over a borrowed result set.
#[derive(Debug, Clone)]
pub struct RankedView<'a> {
    pub sort: SortState,
    /// `None` when no record has a usable price.
    pub best_price: Option<f64>,
    pub rows: Vec<RankedRow<'a>>,
}

impl<'a> RankedView<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows flagged as holding the best price, in display order.
    pub fn best_rows(&self) -> impl Iterator<Item = &RankedRow<'a>> {
        self.rows.iter().filter(|row| row.is_best)
    }
}

/// Derives the display order and best-price flags for `records` under
/// `sort`. The best price is computed over the whole set.
#[must_use]
pub fn rank_records(records: &[SupplierRecord], sort: SortState) -> RankedView<'_> {
    let min_price = best_price(records);

    let rows = sort
        .sorted(records)
        .into_iter()
        .enumerate()
        .map(|(idx, record)| RankedRow {
            rank: idx + 1,
            record,
            is_best: is_best(record, min_price),
        })
        .collect();

    RankedView {
        sort,
        best_price: min_price.is_finite().then_some(min_price),
        rows,
    }
}
