//! Error types for the courtlog statistics engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatError>;

#[derive(Error, Debug)]
pub enum StatError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid action type: {action}")]
    InvalidAction { action: String },

    #[error("Quarter {quarter} is out of range for this game (1..={max})")]
    QuarterOutOfRange { quarter: u32, max: u32 },

    #[error("Player {player_id} is not on either roster of game {game_id}")]
    PlayerNotOnRoster { player_id: i64, game_id: i64 },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: i64 },

    #[error("Team not found: {team_id}")]
    TeamNotFound { team_id: i64 },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: i64 },

    #[error("Invalid game status: {status}")]
    InvalidGameStatus { status: String },

    #[error("Invalid season type: {season_type}")]
    InvalidSeasonType { season_type: String },

    #[error("Failed to parse id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Empty event batch")]
    EmptyBatch,
}
