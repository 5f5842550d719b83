use std::{thread::sleep, time::Instant};

use crate::config::GameConfig;
use crate::input::Command;
use crate::session::{Ending, Session, WorldState};
use crate::snake::Direction;
use crate::term::TermManager;

use anyhow::{bail, Context, Result};
use tracing::{error, info};

/// How a call to `play` finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ended { ending: Ending, score: u32 },
    Quit,
}

pub struct SnakeGame {
    config: GameConfig,
    paused: bool,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        let term = TermManager::new(&config).context("Error preparing the terminal")?;
        Ok(SnakeGame { config, paused: false, term })
    }

    /// Runs the intro and one session, and puts the terminal back the way it
    /// was whatever happens in between.
    pub fn run(&mut self) -> Result<Outcome> {
        self.term.setup().context("Error entering game screen")?;
        let res = self.show_intro().and_then(|quit| {
            if quit { Ok(Outcome::Quit) } else { self.play() }
        });
        let restored = self.term.restore().context("Error restoring terminal");
        finish(res, restored)
    }

    /// Returns true if the player asked to quit instead of starting.
    fn show_intro(&mut self) -> Result<bool> {
        self.term.clear()?;
        self.term.draw_borders()?;
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "P to pause",
            "Esc, Q or CTRL+C to quit",
            "",
            "Press any key to begin",
        ])?;

        let key = self.term.read_key_blocking()?;
        Ok(Command::from(&key) == Command::Quit)
    }

    pub fn play(&mut self) -> Result<Outcome> {
        let mut session = Session::new(self.config.clone()).context("Error placing the first food")?;
        let tick = self.config.difficulty.tick_interval();
        let mut dir_change: Option<Direction> = None;

        info!(difficulty = ?self.config.difficulty, "game started");

        self.term.clear()?;
        self.term.draw_borders()?;
        self.term.draw_world(&session.world())?;

        let mut next_tick = Instant::now() + tick;

        loop {
            for key_ev in self.term.read_key_events_until(next_tick)? {
                match Command::from(&key_ev) {
                    Command::Turn(dir) => dir_change = Some(dir),
                    Command::Pause => self.toggle_pause(&session.world())?,
                    Command::Quit => {
                        info!(score = session.score(), "player quit");
                        return Ok(Outcome::Quit);
                    }
                    Command::None => {}
                }
            }
            next_tick += tick;

            if self.paused {
                dir_change = None;
                continue;
            }

            if let Some(dir) = dir_change.take() {
                session.change_heading(dir);
            }

            let world = session.turn();
            self.term.draw_world(&world)?;

            if world.is_terminal() {
                let ending = self.game_over(&world)?;
                return Ok(Outcome::Ended { ending, score: world.score });
            }

            // Don't try to catch up after a slow frame
            let now = Instant::now();
            if next_tick < now {
                next_tick = now;
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, world: &WorldState) -> Result<Ending> {
        let (title, ending) = match world.ending {
            Some(Ending::BoardFull) => ("YOU WON", Ending::BoardFull),
            Some(ending) => ("YOU LOST", ending),
            None => bail!("game over screen for a session still running"),
        };

        self.term.show_message(&[title, &*format!("Score : {}", world.score)])?;
        sleep(self.config.game_over_delay);
        Ok(ending)
    }

    fn toggle_pause(&mut self, world: &WorldState) -> Result<()> {
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");

        if self.paused {
            self.term.show_message(&["Paused", "Press P to resume", "or Esc to quit"])?;
        } else {
            self.term.draw_world(world)?;
        }

        Ok(())
    }
}

/// The game's own error wins; a restore failure on top of it is only logged.
fn finish(res: Result<Outcome>, restored: Result<()>) -> Result<Outcome> {
    match (res, restored) {
        (Err(e), Err(restore_err)) => {
            error!(error = %restore_err, "terminal not restored after a failed game");
            Err(e)
        }
        (res, restored) => restored.and(res),
    }
}
