pub const DEFAULT_GRID_SIZE: usize = 4;
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Reaching this tile value marks the session as won.
pub const WINNING_TILE: u32 = 2048;
/// Tiles strictly above this value are flagged oversized for renderers.
pub const OVERSIZED_TILE: u32 = 2048;

pub const STARTING_TILES: usize = 2;
pub const SPAWN_FOUR_CHANCE: f64 = 0.1;

pub const LEADERBOARD_LIMIT: usize = 10;
pub const DEFAULT_PLAYER_NAME: &str = "Player";
pub const MAX_PLAYER_NAME_LENGTH: usize = 24;

pub const GRID_SIZE_ENV: &str = "MERGE_GRID_SIZE";
pub const HISTORY_CAPACITY_ENV: &str = "MERGE_HISTORY_CAPACITY";

pub const MIN_GRID_SIZE: usize = 2;
pub const MAX_GRID_SIZE: usize = 16;
