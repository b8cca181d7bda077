use clap::Parser;
use docstore_config::ConfigLoader;
use docstore_core::SetPolicy;
use std::path::PathBuf;

mod commands;
mod execute;

use commands::Commands;

#[derive(Parser)]
#[command(name = "docstore")]
#[command(about = "A file-backed JSON document store", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the documents
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Audit log file (relative to the data directory unless absolute)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// How `set` treats keys missing from the document
    #[arg(long, global = true, value_parser = ["permissive", "strict"])]
    set_policy: Option<String>,

    /// Serialize concurrent writes to the same document
    #[arg(long, global = true)]
    lock_documents: bool,

    /// Diagnostic log level (takes precedence over RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Servers narrate their lifecycle; one-shot commands stay quiet
    let default_level = match &cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    docstore_utils::tracing::init(cli.log_level.as_deref(), default_level)
        .map_err(eyre::Report::msg)?;

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.file(path);
    }
    if let Some(dir) = cli.data_dir {
        loader = loader.data_dir(dir);
    }
    if let Some(path) = cli.log_file {
        loader = loader.log_file(path);
    }
    if let Some(policy) = cli.set_policy {
        loader = loader.set_policy(policy.parse::<SetPolicy>()?);
    }
    if cli.lock_documents {
        loader = loader.lock_documents(true);
    }
    let config = loader.load()?;

    cli.command.execute(config).await
}
