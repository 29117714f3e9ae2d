//! Interactive `shell` command: the browser page's search box and column
//! headers as a line-oriented loop.

use std::io::Write;

use supsearch_client::{SearchSession, SupplierSearch};
use supsearch_rank::SortKey;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::{render_session, OutputFormat};

const HELP: &str = "\
commands:
  search <product>   search suppliers (a bare line also searches)
  sort <column>      sort by price, rating or name; repeat to flip direction
  show               print the current results again
  format <format>    table, cards or json
  help               this text
  quit               leave the shell
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Search(String),
    Sort(SortKey),
    Show,
    Format(OutputFormat),
    Help,
    Quit,
    Nothing,
}

/// Parses one input line. Anything that is not a known command word is
/// treated as a product name.
pub(crate) fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Nothing);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Ok(ShellCommand::Search(rest.to_owned())),
        "sort" => rest
            .parse::<SortKey>()
            .map(ShellCommand::Sort)
            .map_err(|e| e.to_string()),
        "show" => Ok(ShellCommand::Show),
        "format" => rest.parse::<OutputFormat>().map(ShellCommand::Format),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        _ => Ok(ShellCommand::Search(line.to_owned())),
    }
}

/// Reads commands from `input` until `quit` or end of input, writing every
/// response to `out`.
///
/// # Errors
///
/// Returns an error if `input` cannot be read or `out` cannot be written.
pub(crate) async fn run_shell<S, R, W>(
    searcher: &S,
    input: R,
    out: &mut W,
    mut format: OutputFormat,
) -> anyhow::Result<()>
where
    S: SupplierSearch,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = SearchSession::new();
    let mut lines = input.lines();

    write!(out, "{HELP}")?;
    prompt(out)?;

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(ShellCommand::Search(query)) => {
                if !query.trim().is_empty() {
                    writeln!(out, "Searching for the best suppliers...")?;
                }
                match session.run(searcher, &query).await {
                    Ok(phase) => tracing::debug!(phase = phase.name(), "shell search finished"),
                    Err(e) => tracing::debug!(error = %e, "shell search not submitted"),
                }
                write!(out, "{}", render_session(&session, format)?)?;
            }
            Ok(ShellCommand::Sort(key)) => {
                if session.view().is_some() {
                    session.select_sort(key);
                    write!(out, "{}", render_session(&session, format)?)?;
                } else {
                    writeln!(out, "nothing to sort yet")?;
                }
            }
            Ok(ShellCommand::Show) => write!(out, "{}", render_session(&session, format)?)?,
            Ok(ShellCommand::Format(next)) => {
                format = next;
                writeln!(out, "output format set")?;
            }
            Ok(ShellCommand::Help) => write!(out, "{HELP}")?,
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Nothing) => {}
            Err(message) => writeln!(out, "! {message}")?,
        }
        prompt(out)?;
    }

    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> anyhow::Result<()> {
    write!(out, "supsearch> ")?;
    out.flush()?;
    Ok(())
}
