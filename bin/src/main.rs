//! shiftlabel CLI - anomaly labeling and feature pipeline for hourly OHLCV data.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod settings;

use settings::{EnrichArgs, IoArgs, LabelArgs, TransformArgs};

#[derive(Parser)]
#[command(name = "shiftlabel")]
#[command(about = "Threshold anomaly labeling with curve shifting for OHLCV tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file (TOML). Command-line flags take precedence.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Label every OHLCV table in a folder
    Label {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        label: LabelArgs,
    },

    /// Append technical indicators to labeled tables
    Enrich {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        enrich: EnrichArgs,
    },

    /// Compute percent variation and robust-scale enriched tables
    Transform {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Run label, enrich and transform in sequence
    Run {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        label: LabelArgs,

        #[command(flatten)]
        enrich: EnrichArgs,

        #[command(flatten)]
        transform: TransformArgs,
    },

    /// Show the label distribution of labeled tables
    Summary {
        /// Folder containing labeled CSV tables
        #[arg(long, alias = "input_folder")]
        input_folder: PathBuf,
    },

    /// Print the effective settings as TOML
    Config,
}

/// Initializes logging from `RUST_LOG`, falling back to the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let mut settings = settings::load(cli.config.as_deref())?;

    match command {
        Commands::Label { io, label } => {
            io.apply(&mut settings);
            label.apply(&mut settings);
            commands::stage::run_stage(commands::stage::StageKind::Label, &io, &settings, cli.quiet)
                .await
        }
        Commands::Enrich { io, enrich } => {
            io.apply(&mut settings);
            enrich.apply(&mut settings);
            commands::stage::run_stage(commands::stage::StageKind::Enrich, &io, &settings, cli.quiet)
                .await
        }
        Commands::Transform { io, transform } => {
            io.apply(&mut settings);
            transform.apply(&mut settings);
            commands::stage::run_stage(
                commands::stage::StageKind::Transform,
                &io,
                &settings,
                cli.quiet,
            )
            .await
        }
        Commands::Run {
            io,
            label,
            enrich,
            transform,
        } => {
            io.apply(&mut settings);
            label.apply(&mut settings);
            enrich.apply(&mut settings);
            transform.apply(&mut settings);
            commands::run::run_all(&io, &settings, cli.quiet).await
        }
        Commands::Summary { input_folder } => commands::summary::summary(&input_folder),
        Commands::Config => commands::config::show_config(&settings),
    }
}
