use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "qbl")]
#[command(about = "Quibble ticket reconciliation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold the merged transaction log into the master record and rewrite
    /// the point-of-sale snapshot.
    Reconcile {
        /// Layered config paths in merge order. None = built-in defaults.
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Print the report as one JSON object instead of key=value lines.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Concatenate session transaction logs into one merged log.
    Merge {
        /// Merged log to write.
        #[arg(long)]
        output: PathBuf,

        /// Session logs, in the order they should be applied.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> site -> overrides)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Ignore if .env.local is missing.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Reconcile { config_paths, json } => {
            commands::reconcile::run_reconcile(&config_paths, json)?;
        }

        Commands::Merge { output, inputs } => {
            commands::merge::run_merge(&inputs, &output)?;
        }

        Commands::ConfigHash { paths } => {
            let loaded = commands::load_config(&paths)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}

/// stdout carries results; logs go to stderr.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
