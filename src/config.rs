use std::time::Duration;

use clap::ValueEnum;
use crossterm::style::Color;

use crate::Coords;

/// Game speed, as the number of turns played per second.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn tick_rate(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 25,
            Difficulty::Hard => 40,
        }
    }

    pub fn tick_interval(self) -> Duration {
        Duration::from_secs(1) / self.tick_rate()
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Palette {
    pub snake: Color,
    pub food: Color,
    pub background: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette { snake: Color::Green, food: Color::Red, background: Color::Black, text: Color::White }
    }
}

/// Everything a session and its renderer need to know up front. Sizes are in
/// window units; a grid cell is `step` units wide.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub step: i32,
    pub score_increment: u32,
    pub initial_head: Coords,
    pub initial_length: usize,
    pub difficulty: Difficulty,
    pub game_over_delay: Duration,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 720,
            height: 480,
            step: 10,
            score_increment: 10,
            initial_head: (100, 50),
            initial_length: 3,
            difficulty: Difficulty::Easy,
            game_over_delay: Duration::from_secs(3),
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        GameConfig { difficulty, ..Default::default() }
    }

    pub fn columns(&self) -> i32 {
        self.width / self.step
    }

    pub fn rows(&self) -> i32 {
        self.height / self.step
    }

    /// Largest x a cell may have and still be on the grid.
    pub fn max_x(&self) -> i32 {
        self.width - self.step
    }

    pub fn max_y(&self) -> i32 {
        self.height - self.step
    }

    pub fn contains(&self, (x, y): Coords) -> bool {
        (0..=self.max_x()).contains(&x) && (0..=self.max_y()).contains(&y)
    }
}
