//! Pure projections over a game's event log
//!
//! Every module in here is a deterministic function of a [`GameLog`]
//! snapshot; nothing mutates the log, so all of them may run in parallel and
//! recomputation can never drift from the stored events:
//! - `oncourt`: player presence intervals from substitution events
//! - `score`: score progression and current score
//! - `boxscore`: per-player and per-team stat lines
//! - `plusminus`: on-court point differential attribution
//! - `efficiency`: EFF / PIR ratings
//! - `season`: cross-game accumulation and per-game averages
//! - `playbyplay`: narrative entries and CSV export

pub mod boxscore;
pub mod efficiency;
pub mod oncourt;
pub mod playbyplay;
pub mod plusminus;
pub mod score;
pub mod season;

pub use boxscore::BoxScoreLine;
pub use oncourt::PlayerInterval;
pub use playbyplay::PlayEntry;
pub use score::ScorePoint;

use crate::cli::types::{GameId, PlayerId, TeamId};
use crate::error::Result;
use crate::storage::{EventStore, Game, GameEvent, Player, Team};
use std::collections::HashMap;

/// Immutable snapshot of everything the projections need for one game:
/// the game row, its full event log in replay order, and both rosters.
///
/// Loaded once per request so reads never observe a half-appended batch.
pub struct GameLog {
    pub game: Game,
    /// Ascending store-assigned event id; the canonical replay order.
    pub events: Vec<GameEvent>,
    pub players: HashMap<PlayerId, Player>,
    pub teams: HashMap<TeamId, Team>,
}

impl GameLog {
    /// Load the snapshot for a game
    pub fn load(store: &EventStore, game_id: GameId) -> Result<Self> {
        let game = store.get_game(game_id)?;
        let events = store.events_for_game(game_id)?;

        let mut players = HashMap::new();
        for player in store.roster_for_game(&game)? {
            players.insert(player.player_id, player);
        }

        let mut teams = HashMap::new();
        for team_id in [game.home_team_id, game.away_team_id] {
            let team = store.get_team(team_id)?;
            teams.insert(team_id, team);
        }

        Ok(Self {
            game,
            events,
            players,
            teams,
        })
    }

    pub fn is_home(&self, team_id: TeamId) -> bool {
        team_id == self.game.home_team_id
    }

    /// Roster players of one team, jersey-number order
    pub fn team_players(&self, team_id: TeamId) -> Vec<&Player> {
        let mut players: Vec<&Player> = self
            .players
            .values()
            .filter(|p| p.team_id == team_id)
            .collect();
        players.sort_by_key(|p| (p.number, p.player_id));
        players
    }

    /// Resolve a player name; `None` is a tolerated referential gap
    pub fn player_name(&self, player_id: PlayerId) -> Option<&str> {
        self.players.get(&player_id).map(|p| p.name.as_str())
    }

    pub fn team_name(&self, team_id: TeamId) -> Option<&str> {
        self.teams.get(&team_id).map(|t| t.name.as_str())
    }

    /// The events that move the score, in replay order
    pub fn scoring_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(|e| e.action.is_scoring())
    }

    /// Last store-assigned event id, used as the projection cache key
    pub fn last_event_id(&self) -> i64 {
        self.events.last().map(|e| e.event_id.as_i64()).unwrap_or(0)
    }
}
