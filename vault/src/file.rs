use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use engine::{DataVault, SavedGame, ScoreEntry, VaultError};

use crate::scoreboard;

pub const STATE_FILE: &str = "game_state_v2.json";
pub const BEST_FILE: &str = "best_score_v2.json";
pub const SCOREBOARD_FILE: &str = "scoreboard_v2.json";

/// JSON documents in a caller-chosen directory, one per concern: session
/// state, best score, scoreboard. Unreadable or unparseable documents read
/// as absent so a damaged disk never wedges the game.
#[derive(Debug, Clone)]
pub struct FileVault {
    dir: PathBuf,
}

impl FileVault {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|err| VaultError::Unavailable(err.to_string()))?;
        Ok(Self { dir })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.path(name);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!("failed to read {}: {err}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("treating corrupt {} as absent: {err}", path.display());
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), VaultError> {
        let encoded =
            serde_json::to_string(value).map_err(|err| VaultError::Codec(err.to_string()))?;
        fs::write(self.path(name), encoded)
            .map_err(|err| VaultError::Unavailable(err.to_string()))
    }

    fn remove(&self, name: &str) -> Result<(), VaultError> {
        match fs::remove_file(self.path(name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(VaultError::Unavailable(err.to_string())),
        }
    }
}

impl DataVault for FileVault {
    fn save(&mut self, state: &SavedGame) -> Result<(), VaultError> {
        self.write_json(STATE_FILE, state)
    }

    fn load(&self) -> Option<SavedGame> {
        self.read_json(STATE_FILE)
    }

    fn best_score(&self) -> u32 {
        self.read_json(BEST_FILE).unwrap_or(0)
    }

    fn set_best_if_higher(&mut self, score: u32) -> Result<(), VaultError> {
        if score > self.best_score() {
            self.write_json(BEST_FILE, &score)?;
        }
        Ok(())
    }

    fn record_score(&mut self, player: &str, score: u32) -> Result<(), VaultError> {
        let mut entries = self.leaderboard();
        scoreboard::push_entry(&mut entries, player, score);
        self.write_json(SCOREBOARD_FILE, &entries)
    }

    fn leaderboard(&self) -> Vec<ScoreEntry> {
        self.read_json(SCOREBOARD_FILE).unwrap_or_default()
    }

    fn clear_leaderboard(&mut self) -> Result<(), VaultError> {
        self.remove(SCOREBOARD_FILE)
    }

    fn clear_all(&mut self) -> Result<(), VaultError> {
        self.remove(STATE_FILE)?;
        self.remove(BEST_FILE)?;
        self.remove(SCOREBOARD_FILE)
    }
}
