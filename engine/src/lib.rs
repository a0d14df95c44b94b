//! Core logic for a grid merge puzzle: board and tile model, slide-and-merge
//! resolution, bounded undo history, the turn lifecycle controller, and the
//! persistence contract. Rendering, input handling, and storage backends
//! live with the callers.

pub mod board;
pub mod config;
pub mod constants;
pub mod direction;
pub mod error;
pub mod game;
pub mod history;
pub mod resolver;
pub mod snapshot;
pub mod validation;
pub mod vault;
pub mod view;

pub use board::{Board, Tile, TileId};
pub use config::GameConfig;
pub use direction::Direction;
pub use error::{EngineError, VaultError};
pub use game::{Game, Phase};
pub use history::{History, TurnSnapshot};
pub use resolver::MoveOutcome;
pub use snapshot::SavedGame;
pub use vault::{DataVault, NullVault, ScoreEntry};
pub use view::{GameView, TileView};
