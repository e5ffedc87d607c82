use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use dado_application::DiceService;
use dado_infrastructure::ConfigService;

mod commands;
mod logging;
mod render;
mod shell;

use commands::{Action, parse_count};

#[derive(Parser)]
#[command(name = "dado")]
#[command(about = "dado - tabletop dice roller with a persistent roll history", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/dado/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// History file, overriding the configured location
    #[arg(long, global = true)]
    history_file: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Starts the interactive shell when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll one die; +N keeps the best of N rolls, -N the worst
    Roll {
        /// Die label, e.g. d20
        die: String,
        /// Advantage (+N) or disadvantage (-N); non-numbers count as 0
        #[arg(allow_hyphen_values = true, default_value = "0")]
        modifier: String,
    },
    /// Roll a mix of dice and add them up
    Sum {
        /// LABEL=COUNT pairs, e.g. d6=2 d4=1
        #[arg(required = true, value_parser = parse_count)]
        counts: Vec<(String, u32)>,
    },
    /// Show past rolls, newest first
    History {
        /// Only show the last N rolls
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Erase the roll history
    Clear,
    /// List the configured dice and their assets
    Dice,
    /// Interactive session
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose);

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };

    tracing::debug!("[Bootstrap] Opening dice service");
    let mut service = DiceService::open(&config_service, cli.history_file)
        .context("Failed to load dado configuration")?;

    let action = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => return shell::run(&mut service),
        Commands::Roll { die, modifier } => Action::Roll { die, modifier },
        Commands::Sum { counts } => Action::Sum { counts },
        Commands::History { limit } => Action::History { limit },
        Commands::Clear => Action::Clear,
        Commands::Dice => Action::Dice,
    };

    commands::execute(&mut service, &action, &mut std::io::stdout().lock())
}
