use serde::{Deserialize, Serialize};

use crate::history::TurnSnapshot;

/// The persisted session, stable across program runs. The board is an N by N
/// grid of values, 0 for empty; the history carries the bounded undo log with
/// its own score and frozen flag per entry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub board: Vec<Vec<u32>>,
    pub score: u32,
    pub best_score: u32,
    pub frozen: bool,
    pub won: bool,
    pub history: Vec<TurnSnapshot>,
}

impl SavedGame {
    /// Shape and value check against the expected grid size. A saved game
    /// that fails here is treated as absent, never partially applied.
    pub fn is_coherent(&self, size: usize) -> bool {
        grid_is_coherent(&self.board, size)
            && self.history.iter().all(|snapshot| grid_is_coherent(&snapshot.board, size))
    }
}

fn grid_is_coherent(grid: &[Vec<u32>], size: usize) -> bool {
    grid.len() == size
        && grid.iter().all(|line| {
            line.len() == size
                && line.iter().all(|&value| value == 0 || (value >= 2 && value.is_power_of_two()))
        })
}
