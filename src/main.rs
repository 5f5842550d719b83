mod config;
mod food;
mod game;
mod input;
mod score;
mod session;
mod snake;
mod term;

use std::{fs::File, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Difficulty, GameConfig};
use game::{Outcome, SnakeGame};
use session::Ending;

pub type TermInt = u16;
/// A grid cell in window units, always a multiple of the step size.
pub type Coords = (i32, i32);

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Classic snake in the terminal")]
struct Cli {
    /// Game speed
    #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let log_file = File::create(path)
            .with_context(|| format!("Error creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
            )
            .with_writer(Arc::new(log_file))
            .with_ansi(false)
            .init();
    }

    let mut game = SnakeGame::new(GameConfig::new(cli.difficulty))?;
    let outcome = game.run()?;

    info!(?outcome, "exiting");
    match outcome {
        Outcome::Ended { ending: Ending::BoardFull, score } => println!("You won! Final score: {}", score),
        Outcome::Ended { score, .. } => println!("You lost. Final score: {}", score),
        Outcome::Quit => println!("Bye!"),
    }

    Ok(())
}
