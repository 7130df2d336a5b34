//! Box-score aggregation: per-player and per-team stat lines
//!
//! The fold below is the single source of the stat table; every page-level
//! view of totals is this function plus formatting.

use super::{efficiency, oncourt, plusminus, GameLog};
use crate::cli::types::{ActionType, PlayerId, TeamId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Aggregated stat line for one player (or, summed, one team).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoxScoreLine {
    pub points: u32,
    pub fgm: u32,
    pub fga: u32,
    pub fg2m: u32,
    pub fg2a: u32,
    pub fg3m: u32,
    pub fg3a: u32,
    pub ftm: u32,
    pub fta: u32,
    pub oreb: u32,
    pub dreb: u32,
    pub reb: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    pub tov: u32,
    pub pf: u32,
    pub pfd: u32,
    pub eff: i32,
    pub pir: i32,
    pub plus_minus: i32,
    pub seconds_on_court: i64,
}

impl BoxScoreLine {
    /// Fold one action into the line. Substitutions are consumed by the
    /// on-court tracker and have no stat effect here.
    pub fn apply(&mut self, action: ActionType) {
        match action {
            ActionType::TwoPointMade => {
                self.fgm += 1;
                self.fga += 1;
                self.fg2m += 1;
                self.fg2a += 1;
                self.points += 2;
            }
            ActionType::TwoPointMiss => {
                self.fga += 1;
                self.fg2a += 1;
            }
            ActionType::ThreePointMade => {
                self.fgm += 1;
                self.fga += 1;
                self.fg3m += 1;
                self.fg3a += 1;
                self.points += 3;
            }
            ActionType::ThreePointMiss => {
                self.fga += 1;
                self.fg3a += 1;
            }
            ActionType::FreeThrowMade => {
                self.ftm += 1;
                self.fta += 1;
                self.points += 1;
            }
            ActionType::FreeThrowMiss => {
                self.fta += 1;
            }
            ActionType::OffensiveRebound => {
                self.oreb += 1;
                self.reb += 1;
            }
            ActionType::DefensiveRebound => {
                self.dreb += 1;
                self.reb += 1;
            }
            ActionType::Assist => self.ast += 1,
            ActionType::Steal => self.stl += 1,
            ActionType::Block => self.blk += 1,
            ActionType::Turnover => self.tov += 1,
            ActionType::PersonalFoul => self.pf += 1,
            ActionType::FoulDrawn => self.pfd += 1,
            ActionType::SubIn | ActionType::SubOut => {}
        }
    }

    /// Sum another line into this one
    pub fn add(&mut self, other: &BoxScoreLine) {
        self.points += other.points;
        self.fgm += other.fgm;
        self.fga += other.fga;
        self.fg2m += other.fg2m;
        self.fg2a += other.fg2a;
        self.fg3m += other.fg3m;
        self.fg3a += other.fg3a;
        self.ftm += other.ftm;
        self.fta += other.fta;
        self.oreb += other.oreb;
        self.dreb += other.dreb;
        self.reb += other.reb;
        self.ast += other.ast;
        self.stl += other.stl;
        self.blk += other.blk;
        self.tov += other.tov;
        self.pf += other.pf;
        self.pfd += other.pfd;
        self.eff += other.eff;
        self.pir += other.pir;
        self.plus_minus += other.plus_minus;
        self.seconds_on_court += other.seconds_on_court;
    }

    pub fn fg_pct(&self) -> f64 {
        shooting_percentage(self.fgm, self.fga)
    }

    pub fn fg2_pct(&self) -> f64 {
        shooting_percentage(self.fg2m, self.fg2a)
    }

    pub fn fg3_pct(&self) -> f64 {
        shooting_percentage(self.fg3m, self.fg3a)
    }

    pub fn ft_pct(&self) -> f64 {
        shooting_percentage(self.ftm, self.fta)
    }
}

/// `made / attempted` as a percentage. Exactly 0.0 when nothing was
/// attempted: the stat tables display this unconditionally, so it must never
/// be NaN or an error.
pub fn shooting_percentage(made: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    made as f64 / attempted as f64 * 100.0
}

/// The team a player is attributed to: roster first, then the team recorded
/// on the player's own events (tolerates roster gaps in old logs).
pub fn player_team(log: &GameLog, player_id: PlayerId) -> Option<TeamId> {
    if let Some(player) = log.players.get(&player_id) {
        return Some(player.team_id);
    }
    log.events
        .iter()
        .find(|e| e.player_id == player_id)
        .map(|e| e.team_id)
}

/// Full per-player box score for a game.
///
/// The result is an ordered map so recomputing over an unchanged log is
/// byte-identical. `now` bounds open on-court intervals while the game is in
/// progress; for finished games the last event's timestamp is used instead.
pub fn box_score(log: &GameLog, now: DateTime<Utc>) -> BTreeMap<PlayerId, BoxScoreLine> {
    let mut lines: BTreeMap<PlayerId, BoxScoreLine> = BTreeMap::new();

    for event in &log.events {
        lines.entry(event.player_id).or_default().apply(event.action);
    }

    let clock_end = if log.game.is_in_progress() {
        now
    } else {
        log.events.last().map(|e| e.timestamp).unwrap_or(log.game.date)
    };
    for (player_id, seconds) in oncourt::seconds_on_court(log, clock_end) {
        lines.entry(player_id).or_default().seconds_on_court = seconds;
    }

    for (player_id, value) in plusminus::plus_minus_all(log) {
        lines.entry(player_id).or_default().plus_minus = value;
    }

    for line in lines.values_mut() {
        line.eff = efficiency::eff(line);
        line.pir = efficiency::pir(line);
    }

    lines
}

/// Team totals: the sum of that team's box-score rows
pub fn team_totals(log: &GameLog, team_id: TeamId, now: DateTime<Utc>) -> BoxScoreLine {
    let mut total = BoxScoreLine::default();
    for (player_id, line) in box_score(log, now) {
        if player_team(log, player_id) == Some(team_id) {
            total.add(&line);
        }
    }
    total
}

/// Per-quarter team scoring, one entry per configured quarter
pub fn quarter_points(log: &GameLog, team_id: TeamId) -> Vec<u32> {
    let mut per_quarter = vec![0u32; log.game.quarters as usize];
    for event in log.scoring_events() {
        if event.team_id == team_id {
            if let Some(slot) = per_quarter.get_mut(event.quarter as usize - 1) {
                *slot += event.action.points();
            }
        }
    }
    per_quarter
}

/// One located field-goal attempt for the shot chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShotRecord {
    /// Court-relative percentage coordinates, 0-100
    pub x: f64,
    pub y: f64,
    pub made: bool,
    pub three: bool,
}

/// Located field-goal attempts per player (events without coordinates are
/// simply absent here; they still count in the box score).
pub fn shot_chart(log: &GameLog) -> HashMap<PlayerId, Vec<ShotRecord>> {
    let mut shots: HashMap<PlayerId, Vec<ShotRecord>> = HashMap::new();
    for event in &log.events {
        if !event.action.is_field_goal_attempt() {
            continue;
        }
        let (Some(x), Some(y)) = (event.shot_x, event.shot_y) else {
            continue;
        };
        shots.entry(event.player_id).or_default().push(ShotRecord {
            x,
            y,
            made: event.action.points() > 0,
            three: matches!(
                event.action,
                ActionType::ThreePointMade | ActionType::ThreePointMiss
            ),
        });
    }
    shots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_two_point_made() {
        let mut line = BoxScoreLine::default();
        line.apply(ActionType::TwoPointMade);

        assert_eq!(line.points, 2);
        assert_eq!(line.fgm, 1);
        assert_eq!(line.fga, 1);
        assert_eq!(line.fg2m, 1);
        assert_eq!(line.fg2a, 1);
        assert_eq!(line.fg3a, 0);
    }

    #[test]
    fn test_fold_three_point_counts_as_field_goal() {
        let mut line = BoxScoreLine::default();
        line.apply(ActionType::ThreePointMade);
        line.apply(ActionType::ThreePointMiss);

        assert_eq!(line.points, 3);
        assert_eq!(line.fgm, 1);
        assert_eq!(line.fga, 2);
        assert_eq!(line.fg3m, 1);
        assert_eq!(line.fg3a, 2);
    }

    #[test]
    fn test_fold_rebounds_split_and_total() {
        let mut line = BoxScoreLine::default();
        line.apply(ActionType::OffensiveRebound);
        line.apply(ActionType::DefensiveRebound);
        line.apply(ActionType::DefensiveRebound);

        assert_eq!(line.oreb, 1);
        assert_eq!(line.dreb, 2);
        assert_eq!(line.reb, 3);
    }

    #[test]
    fn test_substitutions_have_no_stat_effect() {
        let mut line = BoxScoreLine::default();
        line.apply(ActionType::SubIn);
        line.apply(ActionType::SubOut);
        assert_eq!(line, BoxScoreLine::default());
    }

    #[test]
    fn test_percentage_zero_attempts_is_zero_not_nan() {
        assert_eq!(shooting_percentage(0, 0), 0.0);
        let line = BoxScoreLine::default();
        assert_eq!(line.fg_pct(), 0.0);
        assert_eq!(line.ft_pct(), 0.0);
    }

    #[test]
    fn test_percentage_value() {
        assert_eq!(shooting_percentage(1, 2), 50.0);
        assert_eq!(shooting_percentage(3, 4), 75.0);
    }

    #[test]
    fn test_add_sums_every_field() {
        let mut a = BoxScoreLine::default();
        a.apply(ActionType::TwoPointMade);
        a.plus_minus = 3;
        a.seconds_on_court = 120;

        let mut b = BoxScoreLine::default();
        b.apply(ActionType::FreeThrowMade);
        b.plus_minus = -1;
        b.seconds_on_court = 60;

        let mut sum = BoxScoreLine::default();
        sum.add(&a);
        sum.add(&b);

        assert_eq!(sum.points, 3);
        assert_eq!(sum.fta, 1);
        assert_eq!(sum.plus_minus, 2);
        assert_eq!(sum.seconds_on_court, 180);
    }
}
