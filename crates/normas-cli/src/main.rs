mod consult;
mod display;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use normas_core::{ScoringWeights, extract_entities};
use normas_fetch::{DEFAULT_TIMEOUT_SECS, SnippetClient};
use normas_store::RegulationStore;
use tracing_subscriber::EnvFilter;

/// Normas Curitiba: regulations relevant to an architecture, urbanism or
/// OOH/LED project.
#[derive(Parser)]
#[command(name = "normas", version, about)]
struct Cli {
    /// Regulation table (CSV with nome, numero, assunto, url, keywords, relevancia).
    #[arg(long, env = "NORMAS_TABLE", default_value = "leis.csv", global = true)]
    table: PathBuf,

    /// JSON file overriding the scoring weights.
    #[arg(long, env = "NORMAS_WEIGHTS", global = true)]
    weights: Option<PathBuf>,

    /// Timeout for each regulation page request.
    #[arg(long, env = "NORMAS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the regulations relevant to a project description.
    Consult {
        /// Free-text project description, e.g. "painel LED OOH 25m² Av Batel ZR-3".
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,

        /// Show at most this many regulations.
        #[arg(long)]
        limit: Option<usize>,

        /// Skip fetching regulation pages.
        #[arg(long)]
        no_snippets: bool,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the entities recognised in a project description.
    Entities {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// List the loaded regulations.
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Results go to stdout; logs stay on stderr. Quiet unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("normas v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Entities { description } => {
            let entities = extract_entities(&description.join(" "));
            display::print_entities(&entities);
        }
        Command::List { limit } => {
            let store = load_store(&cli.table)?;
            display::print_loaded(&store);
            display::print_regulations(store.iter().take(limit.unwrap_or(usize::MAX)));
        }
        Command::Consult {
            description,
            limit,
            no_snippets,
            json,
        } => {
            let store = load_store(&cli.table)?;
            let weights = match &cli.weights {
                Some(path) => ScoringWeights::from_json_file(path)
                    .with_context(|| format!("loading scoring weights from {}", path.display()))?,
                None => ScoringWeights::default(),
            };
            let client = if no_snippets {
                None
            } else {
                Some(
                    SnippetClient::with_timeout(Duration::from_secs(cli.timeout_secs))
                        .context("building HTTP client")?,
                )
            };

            let query = description.join(" ");
            let results =
                consult::consult(&store, client.as_ref(), &query, &weights, limit).await;

            if json {
                display::print_matches_json(&results)?;
            } else {
                display::print_loaded(&store);
                display::print_matches(&results);
            }
        }
    }

    Ok(())
}

fn load_store(path: &std::path::Path) -> anyhow::Result<RegulationStore> {
    RegulationStore::load(path)
        .with_context(|| format!("loading regulation table {}", path.display()))
}
