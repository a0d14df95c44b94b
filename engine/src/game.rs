use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::constants::STARTING_TILES;
use crate::direction::Direction;
use crate::error::EngineError;
use crate::history::{History, TurnSnapshot};
use crate::resolver::{self, MoveOutcome};
use crate::snapshot::SavedGame;
use crate::vault::DataVault;
use crate::view::{GameView, TileView};

/// Where the controller is inside a turn. Between resolving and settling the
/// renderer plays its slide animation; every request arriving then is
/// rejected, never queued, so turns stay totally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Resolving,
}

/// Orchestrates the turn lifecycle over an injected vault: validate, resolve,
/// spawn, record history, persist. Owns the board and all session state
/// exclusively.
#[derive(Debug)]
pub struct Game<V: DataVault> {
    config: GameConfig,
    board: Board,
    history: History,
    vault: V,
    rng: StdRng,
    score: u32,
    best_score: u32,
    frozen: bool,
    won: bool,
    phase: Phase,
}

impl<V: DataVault> Game<V> {
    /// Opens a session against the vault, resuming the persisted game when a
    /// coherent one exists and starting fresh otherwise.
    pub fn new(config: GameConfig, vault: V) -> Self {
        Self::with_rng(config, vault, StdRng::from_entropy())
    }

    /// Like `new` but with a pinned tile-spawn sequence. Intended for tests
    /// and reproducible sessions.
    pub fn seeded(config: GameConfig, vault: V, seed: u64) -> Self {
        Self::with_rng(config, vault, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, vault: V, rng: StdRng) -> Self {
        let mut game = Self {
            board: Board::new(config.grid_size),
            history: History::new(config.history_capacity),
            vault,
            rng,
            score: 0,
            best_score: 0,
            frozen: false,
            won: false,
            phase: Phase::Idle,
            config,
        };
        game.best_score = game.vault.best_score();
        if !game.resume_saved() {
            game.fresh_start();
        }
        game
    }

    fn resume_saved(&mut self) -> bool {
        let Some(saved) = self.vault.load() else {
            return false;
        };
        if !saved.is_coherent(self.config.grid_size) {
            warn!("discarding saved session with an incoherent board");
            return false;
        }
        self.board.restore(&saved.board);
        self.score = saved.score;
        self.best_score = self.best_score.max(saved.best_score);
        self.frozen = saved.frozen;
        self.won = saved.won;
        self.history.clear();
        for snapshot in saved.history {
            self.history.push(snapshot);
        }
        if self.history.is_empty() {
            self.push_snapshot();
        }
        true
    }

    fn fresh_start(&mut self) {
        self.board.clear();
        self.score = 0;
        self.frozen = false;
        self.won = false;
        self.history.clear();
        for _ in 0..STARTING_TILES {
            self.board
                .spawn_random(&mut self.rng, self.config.spawn_four_chance);
        }
        self.push_snapshot();
        self.persist();
    }

    /// Resolves one move. On success the controller stays in `Resolving`
    /// until `settle` runs; a move that changes nothing returns to idle with
    /// zero side effects. Rejected outright while frozen or mid-turn.
    pub fn make_move(&mut self, direction: Direction) -> Result<MoveOutcome, EngineError> {
        if self.phase != Phase::Idle {
            return Err(EngineError::TurnInFlight);
        }
        if self.frozen {
            return Err(EngineError::Frozen);
        }
        self.phase = Phase::Resolving;
        debug!(%direction, "resolving move");
        self.board.prepare_for_move();
        let outcome = resolver::resolve(&mut self.board, direction);
        if !outcome.moved {
            self.phase = Phase::Idle;
            return Ok(outcome);
        }
        self.score += outcome.score_gained;
        if self.score > self.best_score {
            self.best_score = self.score;
            if let Err(err) = self.vault.set_best_if_higher(self.score) {
                warn!("failed to persist best score: {err}");
            }
        }
        Ok(outcome)
    }

    /// Completes the turn begun by a successful `make_move`: spawns one
    /// random tile, records the snapshot, refreshes the terminal flags, and
    /// persists. The caller decides how long to wait between the two phases;
    /// headless callers use `step` and wait not at all.
    pub fn settle(&mut self) -> Result<(), EngineError> {
        if self.phase != Phase::Resolving {
            return Err(EngineError::NoTurnInFlight);
        }
        self.board
            .spawn_random(&mut self.rng, self.config.spawn_four_chance);
        self.push_snapshot();
        if !self.won && self.board.max_tile() >= self.config.winning_tile {
            self.won = true;
            info!(score = self.score, "winning tile reached");
        }
        if !self.board.has_legal_move() {
            self.frozen = true;
            info!(score = self.score, "no legal move remains; session frozen");
        }
        self.persist();
        self.phase = Phase::Idle;
        Ok(())
    }

    /// One whole turn with the settle delay collapsed to zero.
    pub fn step(&mut self, direction: Direction) -> Result<MoveOutcome, EngineError> {
        let outcome = self.make_move(direction)?;
        if outcome.moved {
            self.settle()?;
        }
        Ok(outcome)
    }

    /// Returns to the previous turn. Rejected mid-turn, when frozen, or when
    /// only the current state remains in history.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        if self.phase != Phase::Idle {
            return Err(EngineError::TurnInFlight);
        }
        if self.frozen {
            return Err(EngineError::Frozen);
        }
        let snapshot = self.history.undo()?;
        self.board.restore(&snapshot.board);
        self.score = snapshot.score;
        self.frozen = snapshot.frozen;
        self.persist();
        Ok(())
    }

    /// Discards the session and starts over with two spawned tiles.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        if self.phase != Phase::Idle {
            return Err(EngineError::TurnInFlight);
        }
        info!("starting a new game");
        self.fresh_start();
        Ok(())
    }

    fn push_snapshot(&mut self) {
        self.history.push(TurnSnapshot {
            board: self.board.snapshot(),
            score: self.score,
            frozen: self.frozen,
        });
    }

    fn persist(&mut self) {
        let state = self.saved_state();
        if let Err(err) = self.vault.save(&state) {
            warn!("failed to persist game state: {err}");
        }
    }

    /// The session exactly as it goes to the vault.
    pub fn saved_state(&self) -> SavedGame {
        SavedGame {
            board: self.board.snapshot(),
            score: self.score,
            best_score: self.best_score,
            frozen: self.frozen,
            won: self.won,
            history: self.history.entries().cloned().collect(),
        }
    }

    /// Render contract: the full tile list with animation hints, plus scores
    /// and flags. Fully derivable after every operation.
    pub fn view(&self) -> GameView {
        let mut tiles: Vec<TileView> = self.board.tiles().map(TileView::from).collect();
        tiles.sort_by_key(|tile| (tile.row, tile.col));
        GameView {
            grid: self.board.snapshot(),
            tiles,
            score: self.score,
            best_score: self.best_score,
            frozen: self.frozen,
            won: self.won,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn frozen(&self) -> bool {
        self.frozen
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }
}
