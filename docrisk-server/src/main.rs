use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod web;

#[derive(Parser)]
#[command(name = "docrisk")]
#[command(about = "Document upload and compliance risk analysis service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API and upload page
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
    /// Analyze a local file and print the risk report
    Analyze {
        /// Path to the file to analyze
        file: PathBuf,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch pages and extract contact emails
    Scrape {
        /// URLs to scrape
        urls: Vec<String>,

        /// File containing one URL per line
        #[arg(short, long)]
        list: Option<PathBuf>,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; --verbose overrides RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting DocRisk");

    match cli.command {
        Commands::Serve { host, port } => web::start_server(host, port).await,
        Commands::Analyze { file, json } => cli::analyze_command(file, json).await,
        Commands::Scrape {
            urls,
            list,
            timeout,
        } => cli::scrape_command(urls, list, timeout).await,
    }
}
