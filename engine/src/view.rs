use serde::{Deserialize, Serialize};

use crate::board::Tile;
use crate::constants::OVERSIZED_TILE;

/// One tile as a renderer needs it: stable id for reconciliation, position,
/// and the per-turn animation hints.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TileView {
    pub id: u64,
    pub value: u32,
    pub row: usize,
    pub col: usize,
    pub newly_spawned: bool,
    pub just_merged: bool,
    /// Presentation hint for values past the winning tile. Not a logic
    /// boundary.
    pub oversized: bool,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id().as_u64(),
            value: tile.value(),
            row: tile.row(),
            col: tile.col(),
            newly_spawned: tile.newly_spawned(),
            just_merged: tile.merged_this_turn(),
            oversized: tile.value() > OVERSIZED_TILE,
        }
    }
}

/// Everything a renderer needs to reconcile after an operation returns.
/// Derived on demand from the live state; tiles come sorted by position.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameView {
    pub grid: Vec<Vec<u32>>,
    pub tiles: Vec<TileView>,
    pub score: u32,
    pub best_score: u32,
    pub frozen: bool,
    pub won: bool,
}
