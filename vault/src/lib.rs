//! Persistence gateways for the merge puzzle engine: an in-memory store for
//! tests and headless sessions, and a JSON file store for durable desktop
//! sessions. Both keep the date-stamped, descending, top-ten leaderboard.

mod file;
mod memory;
mod scoreboard;

pub use file::{FileVault, BEST_FILE, SCOREBOARD_FILE, STATE_FILE};
pub use memory::MemoryVault;
