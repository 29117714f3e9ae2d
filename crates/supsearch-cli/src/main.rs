mod render;
mod search;
mod shell;

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use supsearch_client::SupplierSearchClient;
use supsearch_rank::SortKey;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::render::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "supsearch")]
#[command(about = "Search suppliers for a product and rank the results")]
struct Cli {
    /// Search API base URL, overriding `SUPSEARCH_API_BASE_URL`.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one search and print the ranked suppliers.
    Search {
        /// Product name; multiple words are joined with spaces.
        query: Vec<String>,

        /// Column selection, applied in order. Repeating a column flips
        /// its direction (`--sort price --sort price` is price descending).
        #[arg(long = "sort", value_enum)]
        sort: Vec<SortArg>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Interactive search loop.
    Shell {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Price,
    Rating,
    Name,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Price => SortKey::Price,
            SortArg::Rating => SortKey::Rating,
            SortArg::Name => SortKey::Name,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = supsearch_core::load_app_config_with(cli.base_url.as_deref())?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = SupplierSearchClient::from_config(&config, None)
        .map_err(|e| anyhow::anyhow!("failed to build search client: {e}"))?;
    tracing::debug!(env = %config.env, base_url = client.base_url(), "search client ready");

    match cli.command {
        Commands::Search {
            query,
            sort,
            format,
        } => {
            let keys: Vec<SortKey> = sort.into_iter().map(SortKey::from).collect();
            let code = search::run_search(&client, &query.join(" "), &keys, format).await?;
            Ok(ExitCode::from(code))
        }
        Commands::Shell { format } => {
            let input = BufReader::new(tokio::io::stdin());
            shell::run_shell(&client, input, &mut std::io::stdout(), format).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests;
