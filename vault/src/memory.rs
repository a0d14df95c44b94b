use engine::{DataVault, SavedGame, ScoreEntry, VaultError};

use crate::scoreboard;

/// In-process store with the same contract as the durable vaults. Never
/// fails; everything is gone when the process exits.
#[derive(Debug, Default, Clone)]
pub struct MemoryVault {
    state: Option<SavedGame>,
    best: u32,
    scores: Vec<ScoreEntry>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataVault for MemoryVault {
    fn save(&mut self, state: &SavedGame) -> Result<(), VaultError> {
        self.state = Some(state.clone());
        Ok(())
    }

    fn load(&self) -> Option<SavedGame> {
        self.state.clone()
    }

    fn best_score(&self) -> u32 {
        self.best
    }

    fn set_best_if_higher(&mut self, score: u32) -> Result<(), VaultError> {
        if score > self.best {
            self.best = score;
        }
        Ok(())
    }

    fn record_score(&mut self, player: &str, score: u32) -> Result<(), VaultError> {
        scoreboard::push_entry(&mut self.scores, player, score);
        Ok(())
    }

    fn leaderboard(&self) -> Vec<ScoreEntry> {
        self.scores.clone()
    }

    fn clear_leaderboard(&mut self) -> Result<(), VaultError> {
        self.scores.clear();
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), VaultError> {
        self.state = None;
        self.best = 0;
        self.scores.clear();
        Ok(())
    }
}
