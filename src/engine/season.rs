//! Cross-game accumulation and per-game averages
//!
//! The "average" display mode divides every accumulated total, including
//! EFF/PIR and plus-minus, by games played. Shooting percentages are never
//! averaged that way: dividing already-divided numbers is wrong, so they are
//! always recomputed from the accumulated makes and attempts.

use super::boxscore::BoxScoreLine;
use serde::Serialize;

/// Running totals for one player across games
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SeasonLine {
    pub games: u32,
    pub totals: BoxScoreLine,
}

impl SeasonLine {
    /// Fold one game's box-score line into the running totals
    pub fn accumulate(&mut self, line: &BoxScoreLine) {
        self.games += 1;
        self.totals.add(line);
    }

    /// Shooting percentages over the whole accumulation
    pub fn fg_pct(&self) -> f64 {
        self.totals.fg_pct()
    }

    pub fn fg3_pct(&self) -> f64 {
        self.totals.fg3_pct()
    }

    pub fn ft_pct(&self) -> f64 {
        self.totals.ft_pct()
    }

    /// Per-game averages of every accumulated total. Percentages are carried
    /// over from the totals unchanged.
    pub fn average(&self) -> AveragedLine {
        let games = self.games.max(1) as f64;
        AveragedLine {
            games: self.games,
            points: self.totals.points as f64 / games,
            fgm: self.totals.fgm as f64 / games,
            fga: self.totals.fga as f64 / games,
            fg3m: self.totals.fg3m as f64 / games,
            fg3a: self.totals.fg3a as f64 / games,
            ftm: self.totals.ftm as f64 / games,
            fta: self.totals.fta as f64 / games,
            reb: self.totals.reb as f64 / games,
            ast: self.totals.ast as f64 / games,
            stl: self.totals.stl as f64 / games,
            blk: self.totals.blk as f64 / games,
            tov: self.totals.tov as f64 / games,
            pf: self.totals.pf as f64 / games,
            pfd: self.totals.pfd as f64 / games,
            eff: self.totals.eff as f64 / games,
            pir: self.totals.pir as f64 / games,
            plus_minus: self.totals.plus_minus as f64 / games,
            fg_pct: self.totals.fg_pct(),
            fg3_pct: self.totals.fg3_pct(),
            ft_pct: self.totals.ft_pct(),
        }
    }
}

/// Per-game averages; `*_pct` fields are recomputed from season totals, not
/// averaged per game.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AveragedLine {
    pub games: u32,
    pub points: f64,
    pub fgm: f64,
    pub fga: f64,
    pub fg3m: f64,
    pub fg3a: f64,
    pub ftm: f64,
    pub fta: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
    pub pf: f64,
    pub pfd: f64,
    pub eff: f64,
    pub pir: f64,
    pub plus_minus: f64,
    pub fg_pct: f64,
    pub fg3_pct: f64,
    pub ft_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::ActionType;

    fn line_with(actions: &[ActionType]) -> BoxScoreLine {
        let mut line = BoxScoreLine::default();
        for action in actions {
            line.apply(*action);
        }
        line
    }

    #[test]
    fn test_accumulate_counts_games() {
        let mut season = SeasonLine::default();
        season.accumulate(&line_with(&[ActionType::TwoPointMade]));
        season.accumulate(&line_with(&[ActionType::ThreePointMade]));

        assert_eq!(season.games, 2);
        assert_eq!(season.totals.points, 5);
        assert_eq!(season.totals.fgm, 2);
    }

    #[test]
    fn test_average_divides_totals() {
        let mut season = SeasonLine::default();
        season.accumulate(&line_with(&[
            ActionType::TwoPointMade,
            ActionType::TwoPointMade,
        ]));
        season.accumulate(&line_with(&[ActionType::TwoPointMade]));

        let avg = season.average();
        assert_eq!(avg.points, 3.0);
        assert_eq!(avg.fgm, 1.5);
    }

    #[test]
    fn test_percentages_come_from_totals_not_per_game_averages() {
        let mut season = SeasonLine::default();
        // Game 1: 1/1, game 2: 0/3. Averaging per-game percentages would
        // give 50%; the correct season figure is 1/4 = 25%.
        season.accumulate(&line_with(&[ActionType::TwoPointMade]));
        season.accumulate(&line_with(&[
            ActionType::TwoPointMiss,
            ActionType::TwoPointMiss,
            ActionType::TwoPointMiss,
        ]));

        assert_eq!(season.fg_pct(), 25.0);
        assert_eq!(season.average().fg_pct, 25.0);
    }

    #[test]
    fn test_zero_games_average_is_defined() {
        let season = SeasonLine::default();
        let avg = season.average();
        assert_eq!(avg.points, 0.0);
        assert_eq!(avg.fg_pct, 0.0);
    }

    #[test]
    fn test_percentage_with_zero_attempts_stays_zero() {
        let mut season = SeasonLine::default();
        season.accumulate(&line_with(&[ActionType::Steal]));
        assert_eq!(season.ft_pct(), 0.0);
    }
}
