//! skriv CLI
//!
//! Command-line interface for skriv - document editing against a remote
//! backend whose API dialect is discovered at request time.

use anyhow::Result;
use clap::{Parser, Subcommand};

use skriv_core::{Config, DocClient};

mod commands;
mod editor;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "skriv")]
#[command(about = "skriv - edit documents on a remote backend")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all documents
    #[command(alias = "ls")]
    List,
    /// Show a single document
    Show {
        /// Document id
        id: String,
    },
    /// Create a new document
    #[command(alias = "new")]
    Create {
        /// Document title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// Document content (opens editor if not provided)
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Edit a document
    Edit {
        /// Document id
        id: String,
    },
    /// Delete a document
    #[command(alias = "rm")]
    Delete {
        /// Document id
        id: String,
    },
    /// Show backend status
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, timeout_secs)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config management works without a reachable backend
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load()?;
    let client = DocClient::new(&config)?;

    match cli.command {
        Commands::List => commands::doc::list(&client, &output).await,
        Commands::Show { id } => commands::doc::show(&client, &id, &output).await,
        Commands::Create { title, content } => {
            commands::doc::create(&client, title, content, &output).await
        }
        Commands::Edit { id } => commands::doc::edit(&client, &id, &output).await,
        Commands::Delete { id } => commands::doc::delete(&client, &id, &output).await,
        Commands::Status => commands::status::show(&config, &client, &output).await,
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

/// Route tracing output to stderr, filtered by RUST_LOG
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
