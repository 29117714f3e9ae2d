//! Sort/rank engine for supplier search results.
//!
//! Everything in this crate is synchronous and pure: the ordering and the
//! best-price flags are recomputed from `(records, SortState)` on every call
//! and the input records are only ever borrowed.

pub mod normalize;
pub mod rank;
pub mod sort;

pub use normalize::{normalize_price, parse_rating};
pub use rank::{best_price, display_price, is_best, rank_records, RankedRow, RankedView};
pub use sort::{ParseSortKeyError, SortDirection, SortKey, SortState};
