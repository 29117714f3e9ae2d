//! Search orchestration state machine.
//!
//! [`SearchSession`] owns everything a search screen needs: the current
//! phase, the fetched records, the sort state and the last validation
//! message. Each transition replaces state wholesale, so combinations such
//! as "searching and failed at once" cannot be represented.
//!
//! ```text
//! idle ──submit──▶ searching ──ok, non-empty──▶ results
//!                      │      ──ok, empty──────▶ empty
//!                      │      ──failure────────▶ error
//!                      ◀──────────submit──────────┘ (from any phase)
//! ```
//!
//! Every submit issues a [`SearchTicket`]. Only the ticket from the latest
//! submit can complete the search; older tickets are ignored, so a slow
//! stale response never overwrites a newer one.

use chrono::{DateTime, Utc};
use supsearch_core::{SearchResponse, SupplierRecord};
use supsearch_rank::{rank_records, RankedView, SortKey, SortState};
use thiserror::Error;

use crate::client::SupplierSearch;
use crate::error::SearchError;

/// Message shown when a search fails for any reason.
pub const SEARCH_ERROR_MESSAGE: &str = "Error searching for suppliers";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please enter a product name")]
    EmptyQuery,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// Nothing searched yet.
    #[default]
    Idle,
    Searching {
        query: String,
    },
    Results {
        query: String,
        suppliers: Vec<SupplierRecord>,
    },
    /// The search succeeded but returned no suppliers.
    Empty {
        query: String,
    },
    Error {
        query: String,
        message: String,
    },
}

impl SearchPhase {
    /// Query of the latest submitted search, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchPhase::Idle => None,
            SearchPhase::Searching { query }
            | SearchPhase::Results { query, .. }
            | SearchPhase::Empty { query }
            | SearchPhase::Error { query, .. } => Some(query),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SearchPhase::Idle => "idle",
            SearchPhase::Searching { .. } => "searching",
            SearchPhase::Results { .. } => "results",
            SearchPhase::Empty { .. } => "empty",
            SearchPhase::Error { .. } => "error",
        }
    }
}

/// Proof of a submitted search. Pass it back to [`SearchSession::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    /// The trimmed query to send to the search collaborator.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Default)]
pub struct SearchSession {
    phase: SearchPhase,
    sort: SortState,
    generation: u64,
    validation: Option<SessionError>,
    completed_at: Option<DateTime<Utc>>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    #[must_use]
    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Message from the last rejected submit, cleared by the next accepted one.
    #[must_use]
    pub fn validation_message(&self) -> Option<String> {
        self.validation.as_ref().map(ToString::to_string)
    }

    /// When the latest search finished, successfully or not.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn has_searched(&self) -> bool {
        !matches!(self.phase, SearchPhase::Idle)
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        matches!(self.phase, SearchPhase::Searching { .. })
    }

    /// Records currently held; empty unless the phase is `Results`.
    #[must_use]
    pub fn suppliers(&self) -> &[SupplierRecord] {
        match &self.phase {
            SearchPhase::Results { suppliers, .. } => suppliers,
            _ => &[],
        }
    }

    /// Starts a search for `raw_query`.
    ///
    /// A blank query leaves the phase untouched and records a validation
    /// message. Otherwise the session enters `Searching`, the sort state is
    /// reset and any earlier ticket becomes stale.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyQuery`] when `raw_query` is blank after
    /// trimming.
    pub fn submit(&mut self, raw_query: &str) -> Result<SearchTicket, SessionError> {
        let query = raw_query.trim();
        if query.is_empty() {
            tracing::debug!(phase = self.phase.name(), "rejected blank query");
            self.validation = Some(SessionError::EmptyQuery);
            return Err(SessionError::EmptyQuery);
        }

        self.generation += 1;
        self.validation = None;
        self.sort.reset();
        self.phase = SearchPhase::Searching {
            query: query.to_owned(),
        };

        Ok(SearchTicket {
            generation: self.generation,
            query: query.to_owned(),
        })
    }

    /// Finishes the search identified by `ticket` with `outcome`.
    ///
    /// Returns `false` and changes nothing when `ticket` is stale (a newer
    /// search was submitted) or already completed.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<SearchResponse, SearchError>,
    ) -> bool {
        let current = ticket.generation == self.generation
            && matches!(self.phase, SearchPhase::Searching { .. });
        if !current {
            tracing::debug!(
                query = %ticket.query,
                ticket = ticket.generation,
                latest = self.generation,
                "ignoring stale search result"
            );
            return false;
        }

        let query = ticket.query.clone();
        self.phase = match outcome {
            Ok(response) if response.suppliers.is_empty() => {
                tracing::info!(%query, "no suppliers found");
                SearchPhase::Empty { query }
            }
            Ok(response) => {
                tracing::info!(%query, suppliers = response.suppliers.len(), "search completed");
                SearchPhase::Results {
                    query,
                    suppliers: response.suppliers,
                }
            }
            Err(e) => {
                tracing::warn!(%query, error = %e, "supplier search failed");
                SearchPhase::Error {
                    query,
                    message: SEARCH_ERROR_MESSAGE.to_owned(),
                }
            }
        };
        self.sort.reset();
        self.completed_at = Some(Utc::now());
        true
    }

    /// The user picked a column header.
    pub fn select_sort(&mut self, key: SortKey) {
        self.sort.select(key);
    }

    /// Ranked view of the held records under the current sort state, or
    /// `None` outside the `Results` phase.
    #[must_use]
    pub fn view(&self) -> Option<RankedView<'_>> {
        match &self.phase {
            SearchPhase::Results { suppliers, .. } => Some(rank_records(suppliers, self.sort)),
            _ => None,
        }
    }

    /// Submits `raw_query`, awaits `searcher`, and completes the search.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyQuery`] for a blank query; `searcher` is
    /// not called in that case. Search failures are not errors here: they
    /// move the session into the `Error` phase.
    pub async fn run<S: SupplierSearch>(
        &mut self,
        searcher: &S,
        raw_query: &str,
    ) -> Result<&SearchPhase, SessionError> {
        let ticket = self.submit(raw_query)?;
        let outcome = searcher.search(ticket.query()).await;
        self.complete(&ticket, outcome);
        Ok(&self.phase)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
