use crate::Coords;

use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

/// Random draws before falling back to scanning the whole grid.
const MAX_RANDOM_ATTEMPTS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FoodError {
    #[error("no free cell left for food on a {columns}x{rows} grid")]
    NoFreeCell { columns: i32, rows: i32 },
}

/// Picks food cells inside the grid, leaving out the outer row and column
/// so a whole food box always fits on screen.
pub struct FoodPlacer<R> {
    columns: i32,
    rows: i32,
    step: i32,
    rng: R,
}

impl<R: Rng> FoodPlacer<R> {
    pub fn new(width: i32, height: i32, step: i32, rng: R) -> Self {
        FoodPlacer { columns: width / step, rows: height / step, step, rng }
    }

    pub fn place(&mut self, excluded: &[Coords]) -> Result<Coords, FoodError> {
        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let cell = (
                self.rng.gen_range(1..self.columns) * self.step,
                self.rng.gen_range(1..self.rows) * self.step,
            );
            if !excluded.contains(&cell) {
                return Ok(cell);
            }
        }

        let free: Vec<Coords> = self.candidates().filter(|cell| !excluded.contains(cell)).collect();
        free.choose(&mut self.rng)
            .copied()
            .ok_or(FoodError::NoFreeCell { columns: self.columns, rows: self.rows })
    }

    fn candidates(&self) -> impl Iterator<Item = Coords> {
        let (columns, rows, step) = (self.columns, self.rows, self.step);
        (1..rows).flat_map(move |y| (1..columns).map(move |x| (x * step, y * step)))
    }
}
