//! One-shot `search` command.

use supsearch_client::{SearchPhase, SearchSession, SupplierSearch};
use supsearch_rank::SortKey;

use crate::render::{render_session, OutputFormat};

pub(crate) const EXIT_OK: u8 = 0;
/// The search reached the backend and failed.
pub(crate) const EXIT_FAILURE: u8 = 1;
/// The query was blank; nothing was sent.
pub(crate) const EXIT_USAGE: u8 = 2;

/// Runs one search, applies the column selections in `sorts` in order and
/// prints the result. Returns the process exit status.
///
/// Exits non-zero when the query is blank or the search ends in the error
/// phase. An empty result set is a success.
///
/// # Errors
///
/// Returns an error only if rendering fails.
pub(crate) async fn run_search<S: SupplierSearch>(
    searcher: &S,
    query: &str,
    sorts: &[SortKey],
    format: OutputFormat,
) -> anyhow::Result<u8> {
    let mut session = SearchSession::new();

    if session.run(searcher, query).await.is_err() {
        eprint!("{}", render_session(&session, OutputFormat::Table)?);
        return Ok(EXIT_USAGE);
    }

    for key in sorts {
        session.select_sort(*key);
    }

    print!("{}", render_session(&session, format)?);

    if matches!(session.phase(), SearchPhase::Error { .. }) {
        Ok(EXIT_FAILURE)
    } else {
        Ok(EXIT_OK)
    }
}
