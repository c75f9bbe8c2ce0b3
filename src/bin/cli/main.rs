mod app;
mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "memory-trainer-cli", about = "Memory trainer CLI", version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store review data in this directory instead of the default
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List built-in levels
    Levels,

    /// Generate and print a shuffled deck
    Deck {
        /// Level id (case-insensitive prefix match)
        level: String,
        /// Shuffle seed for a reproducible deck
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the pre-round hints for a level
    Hints {
        /// Level id (case-insensitive prefix match)
        level: String,
        /// Shuffle seed for a reproducible deck
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List difficult pairs scheduled for review
    Review {
        /// Only show pairs that are due now
        #[arg(long)]
        due: bool,
        /// Delete all review data
        #[arg(long)]
        clear: bool,
    },

    /// Play a level interactively
    Play {
        /// Level id (defaults to the first level)
        level: Option<String>,
        /// Show the pre-round hint screen before the countdown
        #[arg(long)]
        hints: bool,
        /// Shuffle seed for a reproducible deck
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir.clone())?;

    match cli.command {
        Some(Command::Levels) => {
            commands::levels::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Deck { level, seed }) => {
            commands::deck::run(&app, &level, seed, &cli.format, use_color)?;
        }
        Some(Command::Hints { level, seed }) => {
            commands::hints::run(&app, &level, seed, &cli.format, use_color)?;
        }
        Some(Command::Review { due, clear }) => {
            commands::review::run(&app, due, clear, &cli.format, use_color)?;
        }
        Some(Command::Play { level, hints, seed }) => {
            run_play(&app, level.as_deref(), hints, seed, use_color)?;
        }
        None => {
            // No subcommand: play the first level
            run_play(&app, None, false, None, use_color)?;
        }
    }

    Ok(())
}

fn run_play(
    app: &app::App,
    level: Option<&str>,
    hints: bool,
    seed: Option<u64>,
    use_color: bool,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(commands::play::run(app, level, hints, seed, use_color))
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
