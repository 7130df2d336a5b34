//! Score reconstruction from the event log
//!
//! Only `2PM`, `3PM`, and `FTM` move the score; replaying them in log order
//! yields a monotonic step function suitable for plotting and for
//! plus-minus attribution.

use super::GameLog;
use serde::Serialize;

/// One point on the score-progression curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScorePoint {
    /// 0 for the implicit start point, then one step per scoring event
    pub sequence: u32,
    pub home: u32,
    pub away: u32,
}

/// The full score progression, starting with an implicit 0-0 point and
/// emitting exactly one new point per scoring event.
pub fn progression(log: &GameLog) -> Vec<ScorePoint> {
    let mut points = vec![ScorePoint {
        sequence: 0,
        home: 0,
        away: 0,
    }];

    let mut home = 0u32;
    let mut away = 0u32;
    for event in log.scoring_events() {
        let delta = event.action.points();
        if log.is_home(event.team_id) {
            home += delta;
        } else {
            away += delta;
        }
        points.push(ScorePoint {
            sequence: points.len() as u32,
            home,
            away,
        });
    }

    points
}

/// Current (home, away) score: the last progression point
pub fn current_score(log: &GameLog) -> (u32, u32) {
    let last = *progression(log).last().expect("progression is never empty");
    (last.home, last.away)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{ActionType, EventId, GameId, PlayerId, TeamId};
    use crate::storage::{Game, GameEvent, GameStatus, SeasonType};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    fn scoring_log(actions: Vec<(ActionType, bool)>) -> GameLog {
        let game = Game {
            game_id: GameId::new(1),
            home_team_id: TeamId::new(1),
            away_team_id: TeamId::new(2),
            date: Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap(),
            duration_minutes: 40,
            quarters: 4,
            status: GameStatus::Live,
            season_type: SeasonType::Regular,
        };
        let events = actions
            .into_iter()
            .enumerate()
            .map(|(i, (action, is_home))| GameEvent {
                event_id: EventId::new(i as i64 + 1),
                game_id: game.game_id,
                player_id: PlayerId::new(if is_home { 10 } else { 20 }),
                team_id: if is_home {
                    game.home_team_id
                } else {
                    game.away_team_id
                },
                quarter: 1,
                action,
                timestamp: game.date + chrono::Duration::seconds(i as i64 * 10),
                shot_x: None,
                shot_y: None,
                assisted_by: None,
                rebounded_by: None,
            })
            .collect();
        GameLog {
            game,
            events,
            players: HashMap::new(),
            teams: HashMap::new(),
        }
    }

    #[test]
    fn test_progression_starts_at_zero() {
        let log = scoring_log(vec![]);
        let points = progression(&log);
        assert_eq!(
            points,
            vec![ScorePoint {
                sequence: 0,
                home: 0,
                away: 0
            }]
        );
        assert_eq!(current_score(&log), (0, 0));
    }

    #[test]
    fn test_only_scoring_events_emit_points() {
        let log = scoring_log(vec![
            (ActionType::TwoPointMade, true),
            (ActionType::ThreePointMiss, false),
            (ActionType::DefensiveRebound, true),
            (ActionType::FreeThrowMade, false),
            (ActionType::ThreePointMade, false),
        ]);

        let points = progression(&log);
        // Implicit origin + one point per scoring event (2PM, FTM, 3PM)
        assert_eq!(points.len(), 4);
        assert_eq!(points[1], ScorePoint { sequence: 1, home: 2, away: 0 });
        assert_eq!(points[2], ScorePoint { sequence: 2, home: 2, away: 1 });
        assert_eq!(points[3], ScorePoint { sequence: 3, home: 2, away: 4 });
        assert_eq!(current_score(&log), (2, 4));
    }

    #[test]
    fn test_point_values_per_action() {
        let log = scoring_log(vec![
            (ActionType::FreeThrowMade, true),
            (ActionType::TwoPointMade, true),
            (ActionType::ThreePointMade, true),
        ]);
        assert_eq!(current_score(&log), (6, 0));
    }
}
