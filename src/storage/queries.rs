//! Append path and read queries for the event store

use super::{models::*, schema::EventStore};
use crate::cli::types::{ActionType, EventId, GameId, PlayerId, TeamId};
use crate::error::{Result, StatError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

impl EventStore {
    /// Create a team and return its assigned id
    pub fn create_team(&mut self, name: &str) -> Result<TeamId> {
        self.conn
            .execute("INSERT INTO teams (name) VALUES (?)", params![name])?;
        Ok(TeamId::new(self.conn.last_insert_rowid()))
    }

    /// Create a player on a team's roster and return its assigned id
    pub fn create_player(&mut self, team_id: TeamId, name: &str, number: u32) -> Result<PlayerId> {
        self.conn.execute(
            "INSERT INTO players (team_id, name, number) VALUES (?, ?, ?)",
            params![team_id.as_i64(), name, number],
        )?;
        Ok(PlayerId::new(self.conn.last_insert_rowid()))
    }

    /// Create a game in `pending` status and return its assigned id
    pub fn create_game(
        &mut self,
        home_team_id: TeamId,
        away_team_id: TeamId,
        date: DateTime<Utc>,
        duration_minutes: u32,
        quarters: u32,
        season_type: SeasonType,
    ) -> Result<GameId> {
        self.conn.execute(
            "INSERT INTO games (home_team_id, away_team_id, date, duration_minutes,
                                quarters, status, season_type)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                home_team_id.as_i64(),
                away_team_id.as_i64(),
                date.timestamp_millis(),
                duration_minutes,
                quarters,
                GameStatus::Pending.to_string(),
                season_type.to_string(),
            ],
        )?;
        Ok(GameId::new(self.conn.last_insert_rowid()))
    }

    /// Move a game through its lifecycle (pending -> live -> paused/finished)
    pub fn set_game_status(&mut self, game_id: GameId, status: GameStatus) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE games SET status = ? WHERE game_id = ?",
            params![status.to_string(), game_id.as_i64()],
        )?;
        if updated == 0 {
            return Err(StatError::GameNotFound {
                game_id: game_id.as_i64(),
            });
        }
        Ok(())
    }

    /// Get a game by id
    pub fn get_game(&self, game_id: GameId) -> Result<Game> {
        let mut stmt = self.conn.prepare(
            "SELECT game_id, home_team_id, away_team_id, date, duration_minutes,
                    quarters, status, season_type
             FROM games WHERE game_id = ?",
        )?;

        let result = stmt.query_row(params![game_id.as_i64()], Self::row_to_game);

        match result {
            Ok(game) => Ok(game),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StatError::GameNotFound {
                game_id: game_id.as_i64(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a team by id
    pub fn get_team(&self, team_id: TeamId) -> Result<Team> {
        let result = self.conn.query_row(
            "SELECT team_id, name FROM teams WHERE team_id = ?",
            params![team_id.as_i64()],
            |row| {
                Ok(Team {
                    team_id: TeamId::new(row.get(0)?),
                    name: row.get(1)?,
                })
            },
        );

        match result {
            Ok(team) => Ok(team),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StatError::TeamNotFound {
                team_id: team_id.as_i64(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a player by id
    pub fn get_player(&self, player_id: PlayerId) -> Result<Player> {
        let result = self.conn.query_row(
            "SELECT player_id, team_id, name, number FROM players WHERE player_id = ?",
            params![player_id.as_i64()],
            Self::row_to_player,
        );

        match result {
            Ok(player) => Ok(player),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StatError::PlayerNotFound {
                player_id: player_id.as_i64(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// All players on one team's roster, in jersey-number order
    pub fn players_for_team(&self, team_id: TeamId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, team_id, name, number FROM players
             WHERE team_id = ? ORDER BY number, player_id",
        )?;

        let rows = stmt.query_map(params![team_id.as_i64()], Self::row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Both rosters of a game (home roster first, jersey-number order within each)
    pub fn roster_for_game(&self, game: &Game) -> Result<Vec<Player>> {
        let mut roster = self.players_for_team(game.home_team_id)?;
        roster.extend(self.players_for_team(game.away_team_id)?);
        Ok(roster)
    }

    /// All finished games, oldest first; the season aggregation input
    pub fn finished_games(&self) -> Result<Vec<Game>> {
        let mut stmt = self.conn.prepare(
            "SELECT game_id, home_team_id, away_team_id, date, duration_minutes,
                    quarters, status, season_type
             FROM games WHERE status = 'finished' ORDER BY date, game_id",
        )?;

        let rows = stmt.query_map([], Self::row_to_game)?;

        let mut games = Vec::new();
        for row in rows {
            games.push(row?);
        }
        Ok(games)
    }

    /// Append one event to a game's log.
    ///
    /// Validates the game exists, the quarter is in range, and the player is
    /// on either roster; derives `team_id` from the roster and assigns the
    /// timestamp when the caller did not supply one. The assigned `event_id`
    /// is strictly increasing and is the log's replay order.
    pub fn append_event(&mut self, event: NewEvent) -> Result<GameEvent> {
        let batch = self.append_batch(vec![event])?;
        Ok(batch.into_iter().next().expect("batch of one"))
    }

    /// Append a logical batch of events atomically.
    ///
    /// All rows are validated up front and inserted in a single transaction:
    /// either the whole action (e.g. shot + assist + rebound) is recorded or
    /// none of it is.
    pub fn append_batch(&mut self, events: Vec<NewEvent>) -> Result<Vec<GameEvent>> {
        if events.is_empty() {
            return Err(StatError::EmptyBatch);
        }

        // Validate every row before touching the log
        let mut validated = Vec::with_capacity(events.len());
        for event in events {
            let game = self.get_game(event.game_id)?;
            if event.quarter == 0 || event.quarter > game.quarters {
                return Err(StatError::QuarterOutOfRange {
                    quarter: event.quarter,
                    max: game.quarters,
                });
            }
            let player = match self.get_player(event.player_id) {
                Ok(player) => player,
                Err(StatError::PlayerNotFound { .. }) => {
                    return Err(StatError::PlayerNotOnRoster {
                        player_id: event.player_id.as_i64(),
                        game_id: event.game_id.as_i64(),
                    })
                }
                Err(e) => return Err(e),
            };
            if player.team_id != game.home_team_id && player.team_id != game.away_team_id {
                return Err(StatError::PlayerNotOnRoster {
                    player_id: event.player_id.as_i64(),
                    game_id: event.game_id.as_i64(),
                });
            }
            validated.push((event, player.team_id));
        }

        let tx = self.conn.transaction()?;
        let mut stored = Vec::with_capacity(validated.len());
        for (event, team_id) in validated {
            let timestamp = event.timestamp.unwrap_or_else(Utc::now);
            tx.execute(
                "INSERT INTO game_events
                 (game_id, player_id, team_id, quarter, action_type, timestamp,
                  shot_x, shot_y, assisted_by, rebounded_by)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    event.game_id.as_i64(),
                    event.player_id.as_i64(),
                    team_id.as_i64(),
                    event.quarter,
                    event.action.code(),
                    timestamp.timestamp_millis(),
                    event.shot_x,
                    event.shot_y,
                    event.assisted_by.map(|p| p.as_i64()),
                    event.rebounded_by.map(|p| p.as_i64()),
                ],
            )?;
            stored.push(GameEvent {
                event_id: EventId::new(tx.last_insert_rowid()),
                game_id: event.game_id,
                player_id: event.player_id,
                team_id,
                quarter: event.quarter,
                action: event.action,
                timestamp,
                shot_x: event.shot_x,
                shot_y: event.shot_y,
                assisted_by: event.assisted_by,
                rebounded_by: event.rebounded_by,
            });
        }
        tx.commit()?;

        Ok(stored)
    }

    /// A game's full log in replay order (ascending store-assigned event id)
    pub fn events_for_game(&self, game_id: GameId) -> Result<Vec<GameEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT event_id, game_id, player_id, team_id, quarter, action_type,
                    timestamp, shot_x, shot_y, assisted_by, rebounded_by
             FROM game_events WHERE game_id = ? ORDER BY event_id",
        )?;

        let rows = stmt.query_map(params![game_id.as_i64()], Self::row_to_event)?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }

    /// One player's events in a game, in replay order
    pub fn events_for_player(&self, game_id: GameId, player_id: PlayerId) -> Result<Vec<GameEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT event_id, game_id, player_id, team_id, quarter, action_type,
                    timestamp, shot_x, shot_y, assisted_by, rebounded_by
             FROM game_events WHERE game_id = ? AND player_id = ? ORDER BY event_id",
        )?;

        let rows = stmt.query_map(
            params![game_id.as_i64(), player_id.as_i64()],
            Self::row_to_event,
        )?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }

    /// Helper to convert a database row to a Game
    pub(crate) fn row_to_game(row: &Row) -> rusqlite::Result<Game> {
        let status_str: String = row.get(6)?;
        let season_str: String = row.get(7)?;
        let date_ms: i64 = row.get(3)?;

        Ok(Game {
            game_id: GameId::new(row.get(0)?),
            home_team_id: TeamId::new(row.get(1)?),
            away_team_id: TeamId::new(row.get(2)?),
            date: DateTime::from_timestamp_millis(date_ms).unwrap_or_default(),
            duration_minutes: row.get(4)?,
            quarters: row.get(5)?,
            status: status_str
                .parse()
                .map_err(|_| rusqlite::Error::InvalidQuery)?,
            season_type: season_str
                .parse()
                .map_err(|_| rusqlite::Error::InvalidQuery)?,
        })
    }

    /// Helper to convert a database row to a Player
    pub(crate) fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
        Ok(Player {
            player_id: PlayerId::new(row.get(0)?),
            team_id: TeamId::new(row.get(1)?),
            name: row.get(2)?,
            number: row.get(3)?,
        })
    }

    /// Helper to convert a database row to a GameEvent
    pub(crate) fn row_to_event(row: &Row) -> rusqlite::Result<GameEvent> {
        let action_str: String = row.get(5)?;
        let action: ActionType = action_str.parse().map_err(|_| {
            rusqlite::Error::InvalidColumnType(5, "action_type".to_string(), rusqlite::types::Type::Text)
        })?;
        let ts_ms: i64 = row.get(6)?;

        Ok(GameEvent {
            event_id: EventId::new(row.get(0)?),
            game_id: GameId::new(row.get(1)?),
            player_id: PlayerId::new(row.get(2)?),
            team_id: TeamId::new(row.get(3)?),
            quarter: row.get(4)?,
            action,
            timestamp: DateTime::from_timestamp_millis(ts_ms).unwrap_or_default(),
            shot_x: row.get(7)?,
            shot_y: row.get(8)?,
            assisted_by: row.get::<_, Option<i64>>(9)?.map(PlayerId::new),
            rebounded_by: row.get::<_, Option<i64>>(10)?.map(PlayerId::new),
        })
    }
}
