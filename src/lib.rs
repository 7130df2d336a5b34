//! Basketball game-event statistics engine
//!
//! A Rust library and CLI that treats an append-only, timestamped log of
//! discrete in-game events (shots, rebounds, assists, fouls, substitutions)
//! as the single source of truth, and reconstructs every derived view from
//! that log alone.
//!
//! ## Features
//!
//! - **Event Log**: append-only SQLite store; the store-assigned sequence
//!   number is the canonical replay order, corrections are compensating
//!   events rather than edits
//! - **Box Scores**: per-player and per-team stat lines with shooting
//!   percentages, efficiency ratings, and court time
//! - **Score Progression**: a step function of the game score, one point per
//!   scoring event
//! - **Plus-Minus**: interval-correct attribution from substitution events
//! - **Play-by-Play**: human-readable narrative and fixed-column CSV export
//! - **Season Statistics**: accumulated totals and per-game averages across
//!   finished games
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courtlog::{engine::{boxscore, GameLog}, storage::EventStore, GameId};
//!
//! # fn example() -> courtlog::Result<()> {
//! let store = EventStore::new()?;
//! let log = GameLog::load(&store, GameId::new(1))?;
//! let lines = boxscore::box_score(&log, chrono::Utc::now());
//! for (player_id, line) in &lines {
//!     println!("{}: {} pts", player_id, line.points);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Override the database location (defaults to the platform data dir):
//! ```bash
//! export COURTLOG_DB_PATH=/tmp/courtlog.db
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod engine;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{ActionType, EventId, GameId, PlayerId, TeamId};
pub use error::{Result, StatError};
pub use storage::{EventStore, DB_PATH_ENV_VAR};
