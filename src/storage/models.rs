//! Data models for the storage layer

use crate::cli::types::{ActionType, EventId, GameId, PlayerId, TeamId};
use crate::error::StatError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Team read model; the surrounding product owns team management, the engine
/// only needs ids and display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
}

/// Player read model, keyed to a single team roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub name: String,
    pub number: u32,
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Pending,
    Live,
    Paused,
    Finished,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Pending => "pending",
            GameStatus::Live => "live",
            GameStatus::Paused => "paused",
            GameStatus::Finished => "finished",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for GameStatus {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(GameStatus::Pending),
            "live" => Ok(GameStatus::Live),
            "paused" => Ok(GameStatus::Paused),
            "finished" => Ok(GameStatus::Finished),
            _ => Err(StatError::InvalidGameStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Competition context of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonType {
    Regular,
    Playoff,
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeasonType::Regular => "regular",
            SeasonType::Playoff => "playoff",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SeasonType {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(SeasonType::Regular),
            "playoff" => Ok(SeasonType::Playoff),
            _ => Err(StatError::InvalidSeasonType {
                season_type: s.to_string(),
            }),
        }
    }
}

/// One scheduled or played game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: GameId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    /// Tip-off instant; all quarter clock math is relative to this.
    pub date: DateTime<Utc>,
    pub duration_minutes: u32,
    pub quarters: u32,
    pub status: GameStatus,
    pub season_type: SeasonType,
}

impl Game {
    /// Wall-clock length of one quarter in seconds.
    pub fn quarter_duration_seconds(&self) -> i64 {
        (self.duration_minutes as i64 * 60) / self.quarters as i64
    }

    /// Whether the game clock is still meaningful for open on-court intervals.
    pub fn is_in_progress(&self) -> bool {
        matches!(self.status, GameStatus::Live | GameStatus::Paused)
    }
}

/// One stored game event. Immutable once appended; `event_id` is assigned
/// strictly increasing by the store and is the canonical replay order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub event_id: EventId,
    pub game_id: GameId,
    pub player_id: PlayerId,
    /// Derived from the player's roster at append time, never client-supplied.
    pub team_id: TeamId,
    pub quarter: u32,
    pub action: ActionType,
    /// Wall-clock instant of recording; display and clock math only.
    pub timestamp: DateTime<Utc>,
    /// Court-relative shot coordinates as 0-100 percentages.
    pub shot_x: Option<f64>,
    pub shot_y: Option<f64>,
    pub assisted_by: Option<PlayerId>,
    /// `None` on a rebound row marks a team rebound credited to the
    /// representative on-court player carried in `player_id`.
    pub rebounded_by: Option<PlayerId>,
}

/// An event as submitted for appending, before the store assigns its id,
/// team, and (when absent) timestamp.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub quarter: u32,
    pub action: ActionType,
    /// Defaults to the store's clock when not supplied.
    pub timestamp: Option<DateTime<Utc>>,
    pub shot_x: Option<f64>,
    pub shot_y: Option<f64>,
    pub assisted_by: Option<PlayerId>,
    pub rebounded_by: Option<PlayerId>,
}

impl NewEvent {
    /// A bare event with no shot metadata, the common case for most actions.
    pub fn simple(game_id: GameId, player_id: PlayerId, quarter: u32, action: ActionType) -> Self {
        Self {
            game_id,
            player_id,
            quarter,
            action,
            timestamp: None,
            shot_x: None,
            shot_y: None,
            assisted_by: None,
            rebounded_by: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
