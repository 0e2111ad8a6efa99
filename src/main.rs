mod commands;
mod config;
mod diagnostics;
mod info;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "bibleref", about = "Parse, validate and extract Bible citations", version)]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
    /// Log more to stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the books of the canon with their chapter counts
    Books {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every passage found in text (reads stdin when TEXT is omitted)
    Extract {
        /// Stop after the first valid passage
        #[arg(long)]
        first: bool,
        /// Output one JSON object per line
        #[arg(long)]
        json: bool,
        /// Free text to search
        text: Option<String>,
    },
    /// Output a reference document of syntax, config, and current state
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse each argument as exactly one passage
    Parse {
        /// Output one JSON object per line
        #[arg(long)]
        json: bool,
        /// Citations to parse
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Report citations in files under a directory as path:line
    Scan {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Directory to walk
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

/// Install the stderr logger. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| return EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Books { json } => commands::books(json),
        Commands::Extract { first, json, text } => commands::extract(text.as_deref(), first, json),
        Commands::Info { json } => {
            commands::info(json);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Parse { json, texts } => commands::parse(&texts, json),
        Commands::Scan { json, root } => commands::scan(&root, json),
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}
