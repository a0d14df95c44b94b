use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::EngineError;

/// Opaque identity of a live tile. Ids are unique for the lifetime of a
/// session and are never persisted; restoring a snapshot mints fresh ones.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u64);

impl TileId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A numbered piece on the grid. Values are powers of two starting at 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub(crate) id: TileId,
    pub(crate) value: u32,
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) merged_this_turn: bool,
    pub(crate) newly_spawned: bool,
}

impl Tile {
    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn merged_this_turn(&self) -> bool {
        self.merged_this_turn
    }

    pub fn newly_spawned(&self) -> bool {
        self.newly_spawned
    }
}

/// The single source of truth for tile placement. Every live tile is owned
/// here; everything else refers to tiles by id or by value copy.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Vec<Option<TileId>>>,
    tiles: HashMap<TileId, Tile>,
    next_id: u64,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![None; size]; size],
            tiles: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn tile_at(&self, row: usize, col: usize) -> Option<TileId> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.cells[row][col]
    }

    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    fn insert_tile(
        &mut self,
        value: u32,
        row: usize,
        col: usize,
        merged_this_turn: bool,
        newly_spawned: bool,
    ) -> TileId {
        debug_assert!(self.in_bounds(row, col));
        debug_assert!(self.cells[row][col].is_none());
        let id = TileId(self.next_id);
        self.next_id += 1;
        self.cells[row][col] = Some(id);
        self.tiles.insert(
            id,
            Tile {
                id,
                value,
                row,
                col,
                merged_this_turn,
                newly_spawned,
            },
        );
        id
    }

    /// Creates a tile at the given cell. Fails when the cell is occupied or
    /// outside the grid.
    pub fn place(&mut self, value: u32, row: usize, col: usize) -> Result<TileId, EngineError> {
        if !self.in_bounds(row, col) {
            return Err(EngineError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        if self.cells[row][col].is_some() {
            return Err(EngineError::OccupiedCell { row, col });
        }
        Ok(self.insert_tile(value, row, col, false, false))
    }

    /// Spawns one tile at a uniformly chosen empty cell, 2 with probability
    /// `1 - four_chance` and 4 otherwise. Does nothing on a full board.
    pub fn spawn_random(&mut self, rng: &mut impl Rng, four_chance: f64) -> Option<TileId> {
        let empties = self.empty_cells();
        let &(row, col) = empties.choose(rng)?;
        let value = if rng.gen_bool(four_chance) { 4 } else { 2 };
        Some(self.insert_tile(value, row, col, false, true))
    }

    /// Detaches a tile from its cell and drops it. No-op when the id is
    /// already gone.
    pub fn remove(&mut self, id: TileId) {
        if let Some(tile) = self.tiles.remove(&id) {
            if self.cells[tile.row][tile.col] == Some(id) {
                self.cells[tile.row][tile.col] = None;
            }
        }
    }

    /// Relocates a tile to an empty cell. Returns false without mutating when
    /// the tile is already there, the target is occupied, or either side of
    /// the transfer is invalid.
    pub fn move_tile(&mut self, id: TileId, new_row: usize, new_col: usize) -> bool {
        if !self.in_bounds(new_row, new_col) {
            return false;
        }
        let (row, col) = match self.tiles.get(&id) {
            Some(tile) => (tile.row, tile.col),
            None => return false,
        };
        if row == new_row && col == new_col {
            return false;
        }
        if self.cells[new_row][new_col].is_some() {
            return false;
        }
        self.cells[row][col] = None;
        self.cells[new_row][new_col] = Some(id);
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.row = new_row;
            tile.col = new_col;
        }
        true
    }

    /// Collapses two equal tiles into one of twice the value, sitting at the
    /// target's cell and carrying the merged-this-turn mark. Returns None
    /// when the pair is not mergeable, leaving both tiles in place.
    pub fn merge_tiles(&mut self, mover: TileId, target: TileId) -> Option<TileId> {
        let (a, b) = (self.tiles.get(&mover)?, self.tiles.get(&target)?);
        if a.value != b.value || a.merged_this_turn || b.merged_this_turn {
            return None;
        }
        let value = a.value * 2;
        let (row, col) = (b.row, b.col);
        self.remove(mover);
        self.remove(target);
        Some(self.insert_tile(value, row, col, true, false))
    }

    /// Clears the per-turn marks on every live tile. Runs at the start of
    /// each turn.
    pub fn prepare_for_move(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.merged_this_turn = false;
            tile.newly_spawned = false;
        }
    }

    /// Unoccupied cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empties = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.cells[row][col].is_none() {
                    empties.push((row, col));
                }
            }
        }
        empties
    }

    /// Value-only export of the grid, 0 for empty cells.
    pub fn snapshot(&self) -> Vec<Vec<u32>> {
        self.cells
            .iter()
            .map(|line| {
                line.iter()
                    .map(|cell| {
                        cell.and_then(|id| self.tiles.get(&id))
                            .map(|tile| tile.value)
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .collect()
    }

    /// Replaces the whole grid with the given values. Existing tiles are
    /// dropped first; restored tiles are not marked new.
    pub fn restore(&mut self, values: &[Vec<u32>]) {
        self.clear();
        for (row, line) in values.iter().enumerate().take(self.size) {
            for (col, &value) in line.iter().enumerate().take(self.size) {
                if value > 0 {
                    self.insert_tile(value, row, col, false, false);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.cells = vec![vec![None; self.size]; self.size];
    }

    /// True when any cell is empty or any two axis-adjacent tiles hold equal
    /// values. Adjacency is symmetric, so rightward and downward checks
    /// cover every pair.
    pub fn has_legal_move(&self) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                let Some(value) = self.value_at(row, col) else {
                    return true;
                };
                if col + 1 < self.size && self.value_at(row, col + 1) == Some(value) {
                    return true;
                }
                if row + 1 < self.size && self.value_at(row + 1, col) == Some(value) {
                    return true;
                }
            }
        }
        false
    }

    fn value_at(&self, row: usize, col: usize) -> Option<u32> {
        self.cells[row][col].and_then(|id| self.tiles.get(&id)).map(|tile| tile.value)
    }

    pub fn max_tile(&self) -> u32 {
        self.tiles.values().map(|tile| tile.value).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn place_and_read_back() {
        let mut board = Board::new(4);
        let id = board.place(2, 1, 2).unwrap();
        assert_eq!(board.tile_at(1, 2), Some(id));
        let tile = board.tile(id).unwrap();
        assert_eq!((tile.value(), tile.row(), tile.col()), (2, 1, 2));
        assert!(!tile.newly_spawned());
    }

    #[test]
    fn place_rejects_occupied_and_out_of_bounds() {
        let mut board = Board::new(4);
        board.place(2, 0, 0).unwrap();
        assert_eq!(
            board.place(4, 0, 0),
            Err(EngineError::OccupiedCell { row: 0, col: 0 })
        );
        assert_eq!(
            board.place(2, 4, 0),
            Err(EngineError::OutOfBounds { row: 4, col: 0, size: 4 })
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let mut board = Board::new(4);
        let id = board.place(2, 0, 0).unwrap();
        board.remove(id);
        board.remove(id);
        assert_eq!(board.tile_count(), 0);
        assert_eq!(board.tile_at(0, 0), None);
    }

    #[test]
    fn move_tile_updates_both_cells() {
        let mut board = Board::new(4);
        let id = board.place(2, 0, 3).unwrap();
        assert!(board.move_tile(id, 0, 0));
        assert_eq!(board.tile_at(0, 3), None);
        assert_eq!(board.tile_at(0, 0), Some(id));
    }

    #[test]
    fn move_tile_refuses_occupied_same_cell_and_out_of_bounds() {
        let mut board = Board::new(4);
        let id = board.place(2, 0, 0).unwrap();
        board.place(4, 0, 1).unwrap();
        assert!(!board.move_tile(id, 0, 1));
        assert!(!board.move_tile(id, 0, 0));
        assert!(!board.move_tile(id, 0, 4));
        assert_eq!(board.tile_at(0, 0), Some(id));
    }

    #[test]
    fn merge_tiles_doubles_at_target_cell() {
        let mut board = Board::new(4);
        let mover = board.place(2, 0, 1).unwrap();
        let target = board.place(2, 0, 0).unwrap();
        let merged = board.merge_tiles(mover, target).unwrap();
        let tile = board.tile(merged).unwrap();
        assert_eq!((tile.value(), tile.row(), tile.col()), (4, 0, 0));
        assert!(tile.merged_this_turn());
        assert_eq!(board.tile_count(), 1);
    }

    #[test]
    fn merge_tiles_refuses_unequal_or_already_merged() {
        let mut board = Board::new(4);
        let a = board.place(2, 0, 1).unwrap();
        let b = board.place(4, 0, 0).unwrap();
        assert_eq!(board.merge_tiles(a, b), None);

        let mut board = Board::new(4);
        let mover = board.place(2, 0, 1).unwrap();
        let target = board.place(2, 0, 0).unwrap();
        let merged = board.merge_tiles(mover, target).unwrap();
        let late = board.place(4, 0, 1).unwrap();
        assert_eq!(board.merge_tiles(late, merged), None);
    }

    #[test]
    fn empty_cells_are_row_major() {
        let mut board = Board::new(2);
        board.place(2, 0, 1).unwrap();
        assert_eq!(board.empty_cells(), vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn snapshot_then_restore_round_trips_values() {
        let mut board = Board::new(3);
        board.place(2, 0, 0).unwrap();
        board.place(8, 2, 1).unwrap();
        let snap = board.snapshot();
        assert_eq!(snap, vec![vec![2, 0, 0], vec![0, 0, 0], vec![0, 8, 0]]);

        let mut other = Board::new(3);
        other.restore(&snap);
        assert_eq!(other.snapshot(), snap);
        assert!(other.tiles().all(|tile| !tile.newly_spawned()));
    }

    #[test]
    fn restore_clears_previous_tiles() {
        let mut board = Board::new(2);
        board.place(2, 0, 0).unwrap();
        board.restore(&[vec![0, 4], vec![0, 0]]);
        assert_eq!(board.tile_count(), 1);
        assert_eq!(board.snapshot(), vec![vec![0, 4], vec![0, 0]]);
    }

    #[test]
    fn spawn_random_fills_an_empty_cell_with_2_or_4() {
        let mut board = Board::new(4);
        let mut rng = StdRng::seed_from_u64(7);
        let id = board.spawn_random(&mut rng, 0.1).unwrap();
        let tile = board.tile(id).unwrap();
        assert!(tile.value() == 2 || tile.value() == 4);
        assert!(tile.newly_spawned());
    }

    #[test]
    fn spawn_random_on_full_board_is_a_no_op() {
        let mut board = Board::new(2);
        for (row, col) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            board.place(2, row, col).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(board.spawn_random(&mut rng, 0.1), None);
        assert_eq!(board.tile_count(), 4);
    }

    #[test]
    fn has_legal_move_detects_empty_cells_and_adjacent_pairs() {
        let mut board = Board::new(2);
        assert!(board.has_legal_move());

        board.restore(&[vec![2, 4], vec![4, 2]]);
        assert!(!board.has_legal_move());

        board.restore(&[vec![2, 2], vec![4, 8]]);
        assert!(board.has_legal_move());

        board.restore(&[vec![2, 4], vec![2, 8]]);
        assert!(board.has_legal_move());
    }

    #[test]
    fn prepare_for_move_clears_turn_marks() {
        let mut board = Board::new(4);
        let mover = board.place(2, 0, 1).unwrap();
        let target = board.place(2, 0, 0).unwrap();
        let merged = board.merge_tiles(mover, target).unwrap();
        board.prepare_for_move();
        assert!(!board.tile(merged).unwrap().merged_this_turn());
    }
}
