use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::snapshot::SavedGame;

/// One leaderboard row. The date stamp is formatted by the vault when the
/// entry is recorded.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub player: String,
    pub score: u32,
    pub recorded_on: String,
}

/// Durable store consulted by the game controller. Implementations decide
/// where the bytes live; the controller treats every failure as survivable
/// and keeps running in memory.
pub trait DataVault {
    /// Persists the full session. Failures are logged by the caller and
    /// never abort a turn.
    fn save(&mut self, state: &SavedGame) -> Result<(), VaultError>;

    /// Returns the persisted session, or None when there is nothing usable.
    /// Corrupt data is indistinguishable from an absent save.
    fn load(&self) -> Option<SavedGame>;

    fn best_score(&self) -> u32;

    fn set_best_if_higher(&mut self, score: u32) -> Result<(), VaultError>;

    /// Appends a date-stamped entry, re-sorts by score descending, and keeps
    /// only the top entries.
    fn record_score(&mut self, player: &str, score: u32) -> Result<(), VaultError>;

    fn leaderboard(&self) -> Vec<ScoreEntry>;

    fn clear_leaderboard(&mut self) -> Result<(), VaultError>;

    fn clear_all(&mut self) -> Result<(), VaultError>;
}

/// Vault that stores nothing. For fully detached sessions and tests that do
/// not care about persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVault;

impl DataVault for NullVault {
    fn save(&mut self, _state: &SavedGame) -> Result<(), VaultError> {
        Ok(())
    }

    fn load(&self) -> Option<SavedGame> {
        None
    }

    fn best_score(&self) -> u32 {
        0
    }

    fn set_best_if_higher(&mut self, _score: u32) -> Result<(), VaultError> {
        Ok(())
    }

    fn record_score(&mut self, _player: &str, _score: u32) -> Result<(), VaultError> {
        Ok(())
    }

    fn leaderboard(&self) -> Vec<ScoreEntry> {
        Vec::new()
    }

    fn clear_leaderboard(&mut self) -> Result<(), VaultError> {
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), VaultError> {
        Ok(())
    }
}
