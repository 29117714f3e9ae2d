//! Text and JSON rendering of a search session.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Utc};
use serde::Serialize;
use supsearch_client::{SearchPhase, SearchSession};
use supsearch_core::SupplierRecord;
use supsearch_rank::{normalize_price, RankedRow, RankedView, SortKey, SortState};

const MOQ_PLACEHOLDER: &str = "-";
const BEST_MARKER: &str = "★";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Cards,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s.trim(), true)
            .map_err(|_| format!("unknown format \"{s}\" (expected table, cards or json)"))
    }
}

/// Renders whatever the session currently shows.
pub(crate) fn render_session(session: &SearchSession, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return render_json(session);
    }

    let mut out = String::new();
    if let Some(message) = session.validation_message() {
        writeln!(out, "! {message}")?;
    }

    match session.phase() {
        SearchPhase::Idle => {}
        SearchPhase::Searching { query } => {
            writeln!(out, "Searching for the best suppliers for \"{query}\"...")?;
        }
        SearchPhase::Empty { query } => {
            writeln!(out, "No suppliers found for \"{query}\"")?;
            writeln!(out, "Try a different product name")?;
        }
        SearchPhase::Error { message, .. } => {
            writeln!(out, "! {message}")?;
        }
        SearchPhase::Results { .. } => {
            if let Some(view) = session.view() {
                let body = match format {
                    OutputFormat::Cards => render_cards(&view)?,
                    _ => render_table(&view)?,
                };
                out.push_str(&body);
                writeln!(out, "{}", summary_line(&view, session.completed_at()))?;
            }
        }
    }

    Ok(out)
}

/// Fixed-width table, one row per supplier.
pub(crate) fn render_table(view: &RankedView<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{:<4}{:<28}{:<36}{:<26}{:<16}{:<20}LINK",
        "#",
        header(view.sort, SortKey::Name, "STORE"),
        "PRODUCT",
        header(view.sort, SortKey::Price, "PRICE"),
        "MOQ",
        header(view.sort, SortKey::Rating, "RATING"),
    )?;

    for row in &view.rows {
        let rank = if row.is_best {
            format!("{}{BEST_MARKER}", row.rank)
        } else {
            row.rank.to_string()
        };
        writeln!(
            out,
            "{:<4}{:<28}{:<36}{:<26}{:<16}{:<20}{}",
            rank,
            truncate(&row.record.store_name, 26),
            truncate(&row.record.product_name, 34),
            truncate(row.display_price(), 24),
            truncate(row.moq().unwrap_or(MOQ_PLACEHOLDER), 14),
            truncate(&row.record.rating, 18),
            row.record.link(),
        )?;
    }
    Ok(out)
}

/// One block per supplier, closer to the browser card layout.
pub(crate) fn render_cards(view: &RankedView<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for row in &view.rows {
        render_card(&mut out, row)?;
        out.push('\n');
    }
    Ok(out)
}

fn render_card(out: &mut String, row: &RankedRow<'_>) -> fmt::Result {
    let record = row.record;
    let best = if row.is_best {
        format!("  {BEST_MARKER} best price")
    } else {
        String::new()
    };
    writeln!(out, "#{}  {}{best}", row.rank, record.product_name)?;
    writeln!(out, "    Store:  {} <{}>", record.store_name, record.store_url)?;
    writeln!(out, "    Price:  {}", row.display_price())?;
    writeln!(out, "    MOQ:    {}", row.moq().unwrap_or(MOQ_PLACEHOLDER))?;
    writeln!(out, "    Rating: {}", record.rating)?;
    writeln!(out, "    Link:   {}", record.link())
}

/// Column header with the sort indicator when `key` is the active column.
fn header(sort: SortState, key: SortKey, label: &str) -> String {
    if sort.field == Some(key) {
        format!("{label} {}", sort.direction.indicator())
    } else {
        label.to_owned()
    }
}

fn summary_line(view: &RankedView<'_>, completed_at: Option<DateTime<Utc>>) -> String {
    let count = view.len();
    let noun = if count == 1 { "supplier" } else { "suppliers" };
    let mut line = format!("{count} {noun} · {}", view.sort.label());
    if let Some(best) = view.best_price {
        line.push_str(&format!(" · best price {best:.2}"));
    }
    if let Some(at) = completed_at {
        line.push_str(&format!(" · searched {}", at.format("%Y-%m-%d %H:%M UTC")));
    }
    line
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    rank: usize,
    is_best: bool,
    display_price: &'a str,
    /// `None` when the price text is unusable.
    normalized_price: Option<f64>,
    #[serde(flatten)]
    record: &'a SupplierRecord,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    phase: &'static str,
    query: Option<&'a str>,
    message: Option<String>,
    sort: SortState,
    best_price: Option<f64>,
    completed_at: Option<DateTime<Utc>>,
    suppliers: Vec<JsonRow<'a>>,
}

fn render_json(session: &SearchSession) -> anyhow::Result<String> {
    let view = session.view();
    let message = match session.phase() {
        SearchPhase::Error { message, .. } => Some(message.clone()),
        _ => session.validation_message(),
    };

    let suppliers = view
        .as_ref()
        .map(|v| {
            v.rows
                .iter()
                .map(|row| {
                    let normalized = normalize_price(&row.record.price);
                    JsonRow {
                        rank: row.rank,
                        is_best: row.is_best,
                        display_price: row.display_price(),
                        normalized_price: normalized.is_finite().then_some(normalized),
                        record: row.record,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let output = JsonOutput {
        phase: session.phase().name(),
        query: session.phase().query(),
        message,
        sort: session.sort(),
        best_price: view.as_ref().and_then(|v| v.best_price),
        completed_at: session.completed_at(),
        suppliers,
    };

    let mut json = serde_json::to_string_pretty(&output)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
