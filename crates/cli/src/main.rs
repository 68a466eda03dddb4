//! LoanDesk CLI entry point.
//!
//! Commands:
//! - `serve`   Start the HTTP gateway
//! - `ask`     Answer a single customer query
//! - `prepay`  Quote a loan prepayment
//! - `summary` Show a customer's account overview
//! - `search`  Search the FAQ or policy collection
//! - `demo`    Run the scripted demo session
//! - `status`  Show the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::search::SearchKind;

#[derive(Parser)]
#[command(
    name = "loandesk",
    about = "LoanDesk: banking support assistant for existing loans and accounts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/.loandesk/config.toml
    #[arg(short, long, global = true, env = "LOANDESK_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask the assistant a question on behalf of a customer
    Ask {
        /// Customer identifier, e.g. CUST001
        #[arg(long)]
        customer: String,

        /// The question
        query: String,

        /// Print the whole result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Calculate a prepayment against one loan
    Prepay {
        #[arg(long)]
        customer: String,

        #[arg(long)]
        loan: String,

        /// Amount to prepay
        #[arg(long)]
        amount: String,

        /// Print the whole result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a customer's account and loan summary
    Summary {
        customer: String,
    },

    /// Search the knowledge base directly
    Search {
        #[arg(value_enum)]
        kind: SearchKind,

        query: String,

        /// Number of results
        #[arg(short = 'n', long)]
        results: Option<usize>,
    },

    /// Run the scripted demo session
    Demo {
        #[arg(long, default_value = "CUST001")]
        customer: String,
    },

    /// Show the effective configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => commands::serve::run(config, port).await?,
        Commands::Ask {
            customer,
            query,
            json,
        } => commands::ask::run(&config, &customer, &query, json).await?,
        Commands::Prepay {
            customer,
            loan,
            amount,
            json,
        } => commands::prepay::run(&config, &customer, &loan, &amount, json).await?,
        Commands::Summary { customer } => commands::summary::run(&config, &customer)?,
        Commands::Search {
            kind,
            query,
            results,
        } => commands::search::run(&config, kind, &query, results)?,
        Commands::Demo { customer } => commands::demo::run(&config, &customer).await?,
        Commands::Status => commands::status::run(&config, cli.config.as_deref()).await,
    }

    Ok(())
}
