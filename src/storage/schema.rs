//! Database schema and connection management

use crate::error::{Result, StatError};
use dirs::data_dir;
use rusqlite::Connection;
use std::path::PathBuf;

/// Environment variable overriding the default database location.
pub const DB_PATH_ENV_VAR: &str = "COURTLOG_DB_PATH";

/// Connection manager for the event store
pub struct EventStore {
    pub(crate) conn: Connection,
}

impl EventStore {
    /// Open the store at the default (or `COURTLOG_DB_PATH`) location and
    /// ensure tables exist.
    pub fn new() -> Result<Self> {
        let db_path = Self::database_path()?;

        // Ensure the data directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a throwaway in-memory store; used by tests and dry runs.
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Get the path to the database file
    fn database_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DB_PATH_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        let base = data_dir().ok_or_else(|| StatError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine data directory",
        )))?;
        Ok(base.join("courtlog").join("games.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                team_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY,
                team_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                number INTEGER NOT NULL,
                FOREIGN KEY (team_id) REFERENCES teams(team_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS games (
                game_id INTEGER PRIMARY KEY,
                home_team_id INTEGER NOT NULL,
                away_team_id INTEGER NOT NULL,
                date INTEGER NOT NULL,
                duration_minutes INTEGER NOT NULL,
                quarters INTEGER NOT NULL,
                status TEXT NOT NULL,
                season_type TEXT NOT NULL,
                FOREIGN KEY (home_team_id) REFERENCES teams(team_id),
                FOREIGN KEY (away_team_id) REFERENCES teams(team_id)
            )",
            [],
        )?;

        // event_id (rowid) is the canonical replay order; timestamps are
        // retained for display and clock math only.
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS game_events (
                event_id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id INTEGER NOT NULL,
                player_id INTEGER NOT NULL,
                team_id INTEGER NOT NULL,
                quarter INTEGER NOT NULL,
                action_type TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                shot_x REAL,
                shot_y REAL,
                assisted_by INTEGER,
                rebounded_by INTEGER,
                FOREIGN KEY (game_id) REFERENCES games(game_id),
                FOREIGN KEY (player_id) REFERENCES players(player_id)
            )",
            [],
        )?;

        // Create indexes for performance
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_events_game
             ON game_events(game_id, event_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_events_game_player
             ON game_events(game_id, player_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_players_team
             ON players(team_id)",
            [],
        )?;

        Ok(())
    }
}
