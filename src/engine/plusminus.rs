//! Plus-minus: net point differential while a player is on court
//!
//! For every scoring event, every on-court player of the scoring team
//! receives `+delta` and every on-court opponent `-delta`, so the deltas of
//! a single basket always sum to zero across both teams. This correlates
//! the score reconstruction with the on-court tracker instead of smearing
//! the final score differential over everyone who ever appeared in the box
//! score.

use super::{boxscore, oncourt, GameLog};
use crate::cli::types::PlayerId;
use std::collections::{HashMap, HashSet};

/// Plus-minus for every player credited in the game.
///
/// Requires recorded `SUB_IN`/`SUB_OUT` events. A log with no substitution
/// data at all falls back to assuming every player named in any event was on
/// court for the entire game; that is an explicit, logged degradation, not a
/// silent zero.
pub fn plus_minus_all(log: &GameLog) -> HashMap<PlayerId, i32> {
    let mut result: HashMap<PlayerId, i32> = HashMap::new();

    if !oncourt::has_substitution_data(log) {
        if log.scoring_events().next().is_some() {
            log::warn!(
                "game {} has no substitution events; plus-minus assumes full-game presence for all {} credited players",
                log.game.game_id,
                log.events.iter().map(|e| e.player_id).collect::<HashSet<_>>().len()
            );
        }
        let everyone: HashSet<PlayerId> = log.events.iter().map(|e| e.player_id).collect();
        for event in log.scoring_events() {
            apply_deltas(log, &everyone, event, &mut result);
        }
        return result;
    }

    let intervals = oncourt::intervals(log);
    for event in log.scoring_events() {
        let on_court = oncourt::on_court_at_from(&intervals, event.timestamp);
        apply_deltas(log, &on_court, event, &mut result);
    }
    result
}

/// Plus-minus for one player
pub fn plus_minus(log: &GameLog, player_id: PlayerId) -> i32 {
    plus_minus_all(log).get(&player_id).copied().unwrap_or(0)
}

fn apply_deltas(
    log: &GameLog,
    on_court: &HashSet<PlayerId>,
    event: &crate::storage::GameEvent,
    result: &mut HashMap<PlayerId, i32>,
) {
    let delta = event.action.points() as i32;
    for &player_id in on_court {
        let Some(team_id) = boxscore::player_team(log, player_id) else {
            continue;
        };
        let signed = if team_id == event.team_id { delta } else { -delta };
        *result.entry(player_id).or_insert(0) += signed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{ActionType, EventId, GameId, TeamId};
    use crate::storage::{Game, GameEvent, GameStatus, Player, SeasonType};
    use chrono::{TimeZone, Utc};

    struct LogBuilder {
        log: GameLog,
        next_id: i64,
    }

    impl LogBuilder {
        fn new() -> Self {
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
            LogBuilder {
                log: GameLog {
                    game,
                    events: Vec::new(),
                    players: HashMap::new(),
                    teams: HashMap::new(),
                },
                next_id: 1,
            }
        }

        fn player(mut self, id: i64, home: bool) -> Self {
            let team_id = if home {
                self.log.game.home_team_id
            } else {
                self.log.game.away_team_id
            };
            self.log.players.insert(
                PlayerId::new(id),
                Player {
                    player_id: PlayerId::new(id),
                    team_id,
                    name: format!("Player {}", id),
                    number: id as u32,
                },
            );
            self
        }

        fn event(mut self, player: i64, action: ActionType, offset_secs: i64) -> Self {
            let player_id = PlayerId::new(player);
            let team_id = self.log.players[&player_id].team_id;
            self.log.events.push(GameEvent {
                event_id: EventId::new(self.next_id),
                game_id: self.log.game.game_id,
                player_id,
                team_id,
                quarter: 1,
                action,
                timestamp: self.log.game.date + chrono::Duration::seconds(offset_secs),
                shot_x: None,
                shot_y: None,
                assisted_by: None,
                rebounded_by: None,
            });
            self.next_id += 1;
            self
        }
    }

    #[test]
    fn test_on_court_players_receive_signed_delta() {
        // P1, P2 home on court; P3 away on court; home scores a three
        let builder = LogBuilder::new()
            .player(1, true)
            .player(2, true)
            .player(3, false)
            .event(1, ActionType::SubIn, 0)
            .event(2, ActionType::SubIn, 0)
            .event(3, ActionType::SubIn, 0)
            .event(1, ActionType::ThreePointMade, 60);

        let pm = plus_minus_all(&builder.log);
        assert_eq!(pm[&PlayerId::new(1)], 3);
        assert_eq!(pm[&PlayerId::new(2)], 3);
        assert_eq!(pm[&PlayerId::new(3)], -3);
    }

    #[test]
    fn test_subbed_out_player_is_unaffected() {
        // P1 subs out before P2's basket; that basket must not move P1
        let builder = LogBuilder::new()
            .player(1, true)
            .player(2, true)
            .player(3, false)
            .event(1, ActionType::SubIn, 0)
            .event(2, ActionType::SubIn, 0)
            .event(3, ActionType::SubIn, 0)
            .event(1, ActionType::SubOut, 100)
            .event(2, ActionType::TwoPointMade, 200);

        let pm = plus_minus_all(&builder.log);
        assert_eq!(pm.get(&PlayerId::new(1)).copied().unwrap_or(0), 0);
        assert_eq!(pm[&PlayerId::new(2)], 2);
        assert_eq!(pm[&PlayerId::new(3)], -2);
    }

    #[test]
    fn test_deltas_sum_to_zero_with_balanced_lineups() {
        let builder = LogBuilder::new()
            .player(1, true)
            .player(2, true)
            .player(3, false)
            .player(4, false)
            .event(1, ActionType::SubIn, 0)
            .event(2, ActionType::SubIn, 0)
            .event(3, ActionType::SubIn, 0)
            .event(4, ActionType::SubIn, 0)
            .event(1, ActionType::TwoPointMade, 50)
            .event(3, ActionType::ThreePointMade, 90)
            .event(2, ActionType::FreeThrowMade, 130);

        let pm = plus_minus_all(&builder.log);
        let total: i32 = pm.values().sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn test_fallback_without_substitution_data() {
        // No SUB events at all: everyone credited in the log counts as
        // present for every basket.
        let builder = LogBuilder::new()
            .player(1, true)
            .player(2, true)
            .player(3, false)
            .event(1, ActionType::TwoPointMade, 10)
            .event(2, ActionType::Assist, 10)
            .event(3, ActionType::ThreePointMade, 80);

        let pm = plus_minus_all(&builder.log);
        assert_eq!(pm[&PlayerId::new(1)], -1);
        assert_eq!(pm[&PlayerId::new(2)], -1);
        assert_eq!(pm[&PlayerId::new(3)], 1);
    }

    #[test]
    fn test_basket_at_exit_instant_excludes_leaving_player() {
        // [enter, exit): a basket at the exact sub-out instant does not
        // credit the leaving player
        let builder = LogBuilder::new()
            .player(1, true)
            .player(2, true)
            .event(1, ActionType::SubIn, 0)
            .event(2, ActionType::SubIn, 0)
            .event(1, ActionType::SubOut, 100)
            .event(2, ActionType::TwoPointMade, 100);

        let pm = plus_minus_all(&builder.log);
        assert_eq!(pm.get(&PlayerId::new(1)).copied().unwrap_or(0), 0);
        assert_eq!(pm[&PlayerId::new(2)], 2);
    }
}
