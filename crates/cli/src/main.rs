//! prgraph CLI - source-code graph builder for PR context

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prgraph")]
#[command(about = "Build code graphs from changed files and their imports", long_about = None)]
#[command(version = prgraph_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: <repo>/.prgraph.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value = "terminal")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the import closure of a changed-file set and emit its graph
    Closure {
        /// Path to the checked-out working tree
        repo: PathBuf,

        /// Changed files, relative to the repo root (comma-separated)
        #[arg(long, value_delimiter = ',')]
        changed: Vec<PathBuf>,

        /// File listing changed paths, one per line (as produced by a diff)
        #[arg(long)]
        changed_file: Option<PathBuf>,

        /// Write the combined graph as node-link JSON to this path
        #[arg(long)]
        graph_out: Option<PathBuf>,
    },

    /// List the top-level definitions of a single source file
    Defs {
        /// Source file to inspect
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Terminal,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Closure {
            repo,
            changed,
            changed_file,
            graph_out,
        } => commands::closure::run(
            &repo,
            changed,
            changed_file.as_deref(),
            graph_out.as_deref(),
            cli.config.as_deref(),
            cli.format == OutputFormat::Json,
        ),
        Commands::Defs { file } => commands::defs::run(&file, cli.format == OutputFormat::Json),
    }
}
