//! Calltree CLI entry point

use calltree_core::Polarity;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "calltree")]
#[command(about = "Caller/callee graphs from textual references", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Corpus root path (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the edge index
    Index {
        /// Clear the index and rescan every unit
        #[arg(short, long)]
        force: bool,
    },
    /// Print the layered graph around a symbol
    Graph {
        /// Symbol the graph is centred on
        principal: String,

        /// `leaf` for everything that reaches the symbol, `root` for everything it reaches
        #[arg(short, long, default_value = "leaf")]
        polarity: Polarity,

        /// Maximum distance from the principal (-1 for unbounded)
        #[arg(short = 'd', long, default_value_t = -1, allow_negative_numbers = true)]
        max_depth: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Reverse the layer order for display
        #[arg(long)]
        flip: bool,
    },
    /// Report root and leaf graph sizes for every symbol
    Sizes {
        /// Polarity whose graph size orders the report
        #[arg(short, long, default_value = "root")]
        sort_by: Polarity,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Remove the edge index
    Clear,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("calltree={}", log_level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Calltree v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Corpus root: {}", cli.root.display());

    match cli.command {
        Commands::Index { force } => commands::index(&cli.root, force),
        Commands::Graph {
            principal,
            polarity,
            max_depth,
            json,
            flip,
        } => commands::graph(&cli.root, &principal, polarity, max_depth, json, flip),
        Commands::Sizes { sort_by, output } => commands::sizes(&cli.root, sort_by, output),
        Commands::Clear => commands::clear(&cli.root),
        Commands::Version => {
            println!("Calltree v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
