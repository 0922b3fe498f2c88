// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use azsearch_sample::demo::orchestrator::{print_results, setup_failure_message};
use azsearch_sample::utils::logging::{format_error, format_info, format_success, format_warning};
use azsearch_sample::{
    Config, DefaultCredential, DemoOrchestrator, IndexStatus, RunReport, SearchIndex,
    SearchOptions, TokenCredential,
};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "azsearch_sample")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Azure AI Search sample: create an index, upload a document, search it", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE", env = "AZSEARCH_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ensure the index, upload a sample document and run two searches
    Run,

    /// Create the sample index unless it already exists
    EnsureIndex,

    /// Search the configured index
    Search {
        /// Search text; defaults to AZSEARCH_QUERY
        query: Option<String>,

        #[arg(short, long)]
        top: Option<u32>,

        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Delete the configured index
    Reset {
        #[arg(long)]
        confirm: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    azsearch_sample::utils::logging::init_logger(cli.color, cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    info!(?config, "Configuration loaded");

    if config.endpoint.is_none() {
        println!(
            "{}",
            format_warning(
                "Please set AZSEARCH_ENDPOINT (and optionally AZSEARCH_API_KEY / AZSEARCH_INDEX_NAME)."
            )
        );
        return Ok(());
    }

    let orchestrator = match DemoOrchestrator::bootstrap(&config, default_token_source).await {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            println!("{}", format_error(&setup_failure_message(&e)));
            return Err(e).context("Client setup failed");
        }
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(&orchestrator).await,
        Commands::EnsureIndex => cmd_ensure_index(&orchestrator).await,
        Commands::Search { query, top, filter } => {
            cmd_search(&orchestrator, query, top, filter).await
        }
        Commands::Reset { confirm } => cmd_reset(&orchestrator, confirm).await,
    }

    Ok(())
}

fn default_token_source() -> azsearch_sample::Result<Arc<dyn TokenCredential>> {
    Ok(Arc::new(DefaultCredential::create()?))
}

async fn cmd_run(orchestrator: &DemoOrchestrator) {
    match orchestrator.run().await {
        RunReport::Completed { index, .. } => {
            info!(?index, "Demo run completed");
        }
        RunReport::Aborted { step, error } => {
            warn!(%step, %error, "Demo run aborted");
        }
    }
}

async fn cmd_ensure_index(orchestrator: &DemoOrchestrator) {
    let name = orchestrator.settings().index_name.clone();
    match orchestrator.ensure_index(&SearchIndex::sample(&name)).await {
        Ok(IndexStatus::Created) => {
            println!("{}", format_success(&format!("Created index '{name}'.")))
        }
        Ok(IndexStatus::AlreadyExists) => {
            println!("{}", format_info(&format!("Index '{name}' already exists.")))
        }
        Err(e) => println!(
            "{}",
            format_error(&format!("Failed to create index and it does not exist: {e}"))
        ),
    }
}

async fn cmd_search(
    orchestrator: &DemoOrchestrator,
    query: Option<String>,
    top: Option<u32>,
    filter: Option<String>,
) {
    let text = query.unwrap_or_else(|| orchestrator.settings().query.clone());

    let mut options = SearchOptions::text(&text);
    options.top = top;
    options.filter = filter;

    match orchestrator.documents().search_get(&options).await {
        Ok(results) => print_results(&format!("Query search ('{text}')"), "Match", &results),
        Err(e) => println!("{}", format_error(&format!("Query search failed: {e}"))),
    }
}

async fn cmd_reset(orchestrator: &DemoOrchestrator, confirm: bool) {
    let name = orchestrator.settings().index_name.clone();
    if !confirm {
        println!(
            "{}",
            format_warning(&format!("This deletes index '{name}'. Use --confirm to proceed."))
        );
        return;
    }

    match orchestrator.indexes().delete(&name).await {
        Ok(()) => println!("{}", format_success(&format!("Deleted index '{name}'."))),
        Err(e) => println!("{}", format_error(&format!("Delete failed: {e}"))),
    }
}
