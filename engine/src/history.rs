use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Value-only record of the board at the end of a completed turn. Tile
/// identity is not preserved across a snapshot boundary.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TurnSnapshot {
    pub board: Vec<Vec<u32>>,
    pub score: u32,
    pub frozen: bool,
}

/// Bounded undo log. Purely time-ordered: pushing past capacity evicts the
/// oldest entry, and access is append/pop only.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<TurnSnapshot>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TurnSnapshot> {
        self.entries.back()
    }

    pub fn entries(&self) -> impl Iterator<Item = &TurnSnapshot> {
        self.entries.iter()
    }

    pub fn push(&mut self, snapshot: TurnSnapshot) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Drops the most recent entry and returns a copy of the one before it,
    /// which is the state to restore. With one entry or none there is
    /// nothing to return to.
    pub fn undo(&mut self) -> Result<TurnSnapshot, EngineError> {
        if self.entries.len() <= 1 {
            return Err(EngineError::NoHistory);
        }
        self.entries.pop_back();
        match self.entries.back() {
            Some(snapshot) => Ok(snapshot.clone()),
            None => Err(EngineError::NoHistory),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
