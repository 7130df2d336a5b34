//! On-court presence derived from substitution events
//!
//! A `SUB_IN` opens an interval for a player, a `SUB_OUT` closes the most
//! recent open one; an interval with no exit means "still on court". There
//! is no implicit starting five: presence is wholly a consequence of the
//! recorded events, so the recorder must emit `SUB_IN` for each starter at
//! tip-off.

use super::GameLog;
use crate::cli::types::{ActionType, PlayerId};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// One `[enter, exit)` window a player spent on court. `exit == None` means
/// the player has not been subbed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInterval {
    pub player_id: PlayerId,
    pub enter: DateTime<Utc>,
    pub exit: Option<DateTime<Utc>>,
}

impl PlayerInterval {
    /// Whether `instant` falls inside this interval. Open intervals extend
    /// through "now", i.e. they contain every instant at or after `enter`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        if instant < self.enter {
            return false;
        }
        match self.exit {
            Some(exit) => instant < exit,
            None => true,
        }
    }

    /// Seconds covered, with open intervals measured up to `now`
    pub fn duration_seconds(&self, now: DateTime<Utc>) -> i64 {
        let end = self.exit.unwrap_or(now);
        (end - self.enter).num_seconds().max(0)
    }
}

/// Derive every player's presence intervals from the log, in replay order.
pub fn intervals(log: &GameLog) -> HashMap<PlayerId, Vec<PlayerInterval>> {
    let mut result: HashMap<PlayerId, Vec<PlayerInterval>> = HashMap::new();

    for event in &log.events {
        match event.action {
            ActionType::SubIn => {
                let player_intervals = result.entry(event.player_id).or_default();
                // A second SUB_IN without an exit is a recording anomaly:
                // close the open interval at this instant and reopen.
                if let Some(open) = player_intervals.iter_mut().rev().find(|i| i.exit.is_none()) {
                    log::warn!(
                        "player {} subbed in twice without exiting (game {}); closing open interval",
                        event.player_id,
                        event.game_id
                    );
                    open.exit = Some(event.timestamp);
                }
                player_intervals.push(PlayerInterval {
                    player_id: event.player_id,
                    enter: event.timestamp,
                    exit: None,
                });
            }
            ActionType::SubOut => {
                let player_intervals = result.entry(event.player_id).or_default();
                match player_intervals.iter_mut().rev().find(|i| i.exit.is_none()) {
                    Some(open) => open.exit = Some(event.timestamp),
                    None => log::warn!(
                        "player {} subbed out without a matching sub-in (game {}); event ignored",
                        event.player_id,
                        event.game_id
                    ),
                }
            }
            _ => {}
        }
    }

    result
}

/// A single player's intervals, in order of entry
pub fn intervals_for(log: &GameLog, player_id: PlayerId) -> Vec<PlayerInterval> {
    intervals(log).remove(&player_id).unwrap_or_default()
}

/// Who was on court at `instant`
pub fn on_court_at(log: &GameLog, instant: DateTime<Utc>) -> HashSet<PlayerId> {
    on_court_at_from(&intervals(log), instant)
}

/// `on_court_at` over precomputed intervals, for callers replaying many instants
pub fn on_court_at_from(
    intervals: &HashMap<PlayerId, Vec<PlayerInterval>>,
    instant: DateTime<Utc>,
) -> HashSet<PlayerId> {
    intervals
        .iter()
        .filter(|(_, windows)| windows.iter().any(|w| w.contains(instant)))
        .map(|(player_id, _)| *player_id)
        .collect()
}

/// Who is on court now (intervals with no recorded exit)
pub fn on_court_now(log: &GameLog) -> HashSet<PlayerId> {
    intervals(log)
        .into_iter()
        .filter(|(_, windows)| windows.iter().any(|w| w.exit.is_none()))
        .map(|(player_id, _)| player_id)
        .collect()
}

/// Total seconds on court per player.
///
/// Closed intervals count in full; open intervals count up to `now`. Callers
/// pass the wall clock for a game in progress and the final whistle (the last
/// event's timestamp) for archival reads.
pub fn seconds_on_court(log: &GameLog, now: DateTime<Utc>) -> HashMap<PlayerId, i64> {
    intervals(log)
        .into_iter()
        .map(|(player_id, windows)| {
            let total = windows.iter().map(|w| w.duration_seconds(now)).sum();
            (player_id, total)
        })
        .collect()
}

/// Whether the log carries any substitution data at all
pub fn has_substitution_data(log: &GameLog) -> bool {
    log.events.iter().any(|e| e.action.is_substitution())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{EventId, GameId, TeamId};
    use crate::storage::{Game, GameEvent, GameStatus, SeasonType};
    use chrono::TimeZone;

    fn test_game() -> Game {
        Game {
            game_id: GameId::new(1),
            home_team_id: TeamId::new(1),
            away_team_id: TeamId::new(2),
            date: Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap(),
            duration_minutes: 40,
            quarters: 4,
            status: GameStatus::Live,
            season_type: SeasonType::Regular,
        }
    }

    fn sub_event(id: i64, player: i64, action: ActionType, offset_secs: i64) -> GameEvent {
        let game = test_game();
        GameEvent {
            event_id: EventId::new(id),
            game_id: game.game_id,
            player_id: PlayerId::new(player),
            team_id: game.home_team_id,
            quarter: 1,
            action,
            timestamp: game.date + chrono::Duration::seconds(offset_secs),
            shot_x: None,
            shot_y: None,
            assisted_by: None,
            rebounded_by: None,
        }
    }

    fn log_with(events: Vec<GameEvent>) -> GameLog {
        GameLog {
            game: test_game(),
            events,
            players: HashMap::new(),
            teams: HashMap::new(),
        }
    }

    #[test]
    fn test_interval_pairs_up_sub_events() {
        let log = log_with(vec![
            sub_event(1, 7, ActionType::SubIn, 0),
            sub_event(2, 7, ActionType::SubOut, 300),
            sub_event(3, 7, ActionType::SubIn, 500),
        ]);

        let windows = intervals_for(&log, PlayerId::new(7));
        assert_eq!(windows.len(), 2);
        assert!(windows[0].exit.is_some());
        assert!(windows[1].exit.is_none());
        assert_eq!(
            windows[0].duration_seconds(log.game.date + chrono::Duration::seconds(900)),
            300
        );
    }

    #[test]
    fn test_double_sub_in_closes_then_reopens() {
        let log = log_with(vec![
            sub_event(1, 7, ActionType::SubIn, 0),
            sub_event(2, 7, ActionType::SubIn, 120),
        ]);

        let windows = intervals_for(&log, PlayerId::new(7));
        assert_eq!(windows.len(), 2);
        assert_eq!(
            windows[0].exit,
            Some(log.game.date + chrono::Duration::seconds(120))
        );
        assert!(windows[1].exit.is_none());
    }

    #[test]
    fn test_orphan_sub_out_is_ignored() {
        let log = log_with(vec![sub_event(1, 7, ActionType::SubOut, 60)]);
        let windows = intervals_for(&log, PlayerId::new(7));
        assert!(windows.is_empty());
    }

    #[test]
    fn test_on_court_at_half_open_boundary() {
        let log = log_with(vec![
            sub_event(1, 7, ActionType::SubIn, 0),
            sub_event(2, 7, ActionType::SubOut, 300),
        ]);
        let start = log.game.date;

        // Inside the window
        assert!(on_court_at(&log, start + chrono::Duration::seconds(299))
            .contains(&PlayerId::new(7)));
        // The exit instant itself is excluded: [enter, exit)
        assert!(!on_court_at(&log, start + chrono::Duration::seconds(300))
            .contains(&PlayerId::new(7)));
        // The entry instant is included
        assert!(on_court_at(&log, start).contains(&PlayerId::new(7)));
    }

    #[test]
    fn test_on_court_now_reports_open_intervals() {
        let log = log_with(vec![
            sub_event(1, 7, ActionType::SubIn, 0),
            sub_event(2, 8, ActionType::SubIn, 0),
            sub_event(3, 7, ActionType::SubOut, 200),
        ]);

        let now_on = on_court_now(&log);
        assert!(!now_on.contains(&PlayerId::new(7)));
        assert!(now_on.contains(&PlayerId::new(8)));
    }

    #[test]
    fn test_seconds_on_court_extends_open_interval_to_now() {
        let log = log_with(vec![
            sub_event(1, 7, ActionType::SubIn, 0),
            sub_event(2, 7, ActionType::SubOut, 300),
            sub_event(3, 8, ActionType::SubIn, 100),
        ]);
        let now = log.game.date + chrono::Duration::seconds(700);

        let seconds = seconds_on_court(&log, now);
        assert_eq!(seconds[&PlayerId::new(7)], 300);
        assert_eq!(seconds[&PlayerId::new(8)], 600);
    }

    #[test]
    fn test_has_substitution_data() {
        let without = log_with(vec![sub_event(1, 7, ActionType::TwoPointMade, 0)]);
        assert!(!has_substitution_data(&without));

        let with = log_with(vec![sub_event(1, 7, ActionType::SubIn, 0)]);
        assert!(has_substitution_data(&with));
    }
}
