use std::env;

use crate::constants::{
    DEFAULT_GRID_SIZE, DEFAULT_HISTORY_CAPACITY, GRID_SIZE_ENV, HISTORY_CAPACITY_ENV,
    MAX_GRID_SIZE, MIN_GRID_SIZE, SPAWN_FOUR_CHANCE, WINNING_TILE,
};

/// Session parameters. The grid size is fixed for the lifetime of a game;
/// there is no mid-game resizing.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub grid_size: usize,
    pub history_capacity: usize,
    pub winning_tile: u32,
    pub spawn_four_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            winning_tile: WINNING_TILE,
            spawn_four_chance: SPAWN_FOUR_CHANCE,
        }
    }
}

impl GameConfig {
    /// Defaults with environment overrides for grid size and history depth.
    /// Out-of-range values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(size) = env_usize(GRID_SIZE_ENV) {
            if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
                config.grid_size = size;
            }
        }
        if let Some(capacity) = env_usize(HISTORY_CAPACITY_ENV) {
            if capacity >= 1 {
                config.history_capacity = capacity;
            }
        }
        config
    }
}

fn env_usize(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_game() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 4);
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.winning_tile, 2048);
        assert!((config.spawn_four_chance - 0.1).abs() < f64::EPSILON);
    }
}
