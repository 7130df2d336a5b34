//! Box score command: per-player lines and team totals for one game.

use crate::cli::types::{GameId, PlayerId, TeamId};
use crate::commands::common::{format_minutes, format_plus_minus, CommandContext};
use crate::core::cache::{ProjectionKey, GLOBAL_CACHE};
use crate::engine::{boxscore, BoxScoreLine, GameLog};
use crate::error::Result;
use crate::storage::GameStatus;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the printed/serialized box score
#[derive(Debug, Serialize)]
struct BoxScoreRow<'a> {
    player_id: i64,
    name: String,
    team: &'a str,
    #[serde(flatten)]
    line: BoxScoreLine,
}

pub fn handle_box_score(game_id: GameId, as_json: bool) -> Result<()> {
    let ctx = CommandContext::new(false)?;
    let log = GameLog::load(&ctx.db, game_id)?;

    let lines = compute_box_score(&log);

    let home_rows = team_rows(&log, &lines, log.game.home_team_id);
    let away_rows = team_rows(&log, &lines, log.game.away_team_id);
    let home_totals = sum_rows(&home_rows);
    let away_totals = sum_rows(&away_rows);

    if as_json {
        let output = serde_json::json!({
            "game_id": game_id,
            "home": {
                "team": log.team_name(log.game.home_team_id),
                "players": home_rows,
                "totals": home_totals,
                "quarter_points": boxscore::quarter_points(&log, log.game.home_team_id),
            },
            "away": {
                "team": log.team_name(log.game.away_team_id),
                "players": away_rows,
                "totals": away_totals,
                "quarter_points": boxscore::quarter_points(&log, log.game.away_team_id),
            },
            "shot_chart": boxscore::shot_chart(&log)
                .into_iter()
                .map(|(player_id, shots)| (player_id.to_string(), shots))
                .collect::<std::collections::HashMap<_, _>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (label, rows, totals) in [
        ("Home", &home_rows, &home_totals),
        ("Away", &away_rows, &away_totals),
    ] {
        let team_name = rows.first().map(|r| r.team).unwrap_or("");
        println!("{}: {}", label, team_name);
        println!(
            "{:<22} {:>5} {:>4} {:>7} {:>7} {:>7} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>5} {:>5} {:>5}",
            "Player", "MIN", "PTS", "FG", "3P", "FT", "REB", "AST", "STL", "BLK", "TOV", "PF",
            "EFF", "PIR", "+/-"
        );
        for row in rows {
            let line = &row.line;
            println!(
                "{:<22} {:>5} {:>4} {:>3}/{:<3} {:>3}/{:<3} {:>3}/{:<3} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>5} {:>5} {:>5}",
                row.name,
                format_minutes(line.seconds_on_court),
                line.points,
                line.fgm,
                line.fga,
                line.fg3m,
                line.fg3a,
                line.ftm,
                line.fta,
                line.reb,
                line.ast,
                line.stl,
                line.blk,
                line.tov,
                line.pf,
                line.eff,
                line.pir,
                format_plus_minus(line.plus_minus),
            );
        }
        println!(
            "{:<22} {:>5} {:>4}  FG {:.1}%  3P {:.1}%  FT {:.1}%",
            "Totals",
            format_minutes(totals.seconds_on_court),
            totals.points,
            totals.fg_pct(),
            totals.fg3_pct(),
            totals.ft_pct(),
        );
        println!();
    }

    Ok(())
}

/// Compute (or fetch) the per-player box score for a loaded log.
///
/// Only finished games consult the cache: their open intervals are settled,
/// so the projection depends on nothing but the log itself. For a live game
/// the court seconds keep growing between polls with no new events, and a
/// cached value would go stale.
pub fn compute_box_score(log: &GameLog) -> BTreeMap<PlayerId, BoxScoreLine> {
    let cacheable = log.game.status == GameStatus::Finished;
    let key = ProjectionKey {
        game_id: log.game.game_id,
        last_event_id: log.last_event_id(),
    };

    if cacheable {
        if let Some(cached) = GLOBAL_CACHE.box_scores.get(&key) {
            return cached;
        }
    }

    let lines = boxscore::box_score(log, Utc::now());

    if cacheable {
        GLOBAL_CACHE.box_scores.put(key, lines.clone());
    }
    lines
}

fn team_rows<'a>(
    log: &'a GameLog,
    lines: &BTreeMap<PlayerId, BoxScoreLine>,
    team_id: TeamId,
) -> Vec<BoxScoreRow<'a>> {
    let mut rows: Vec<BoxScoreRow> = lines
        .iter()
        .filter(|(player_id, _)| boxscore::player_team(log, **player_id) == Some(team_id))
        .map(|(player_id, line)| BoxScoreRow {
            player_id: player_id.as_i64(),
            name: log
                .player_name(*player_id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", player_id)),
            team: log.team_name(team_id).unwrap_or_default(),
            line: *line,
        })
        .collect();
    rows.sort_by(|a, b| b.line.points.cmp(&a.line.points).then(a.player_id.cmp(&b.player_id)));
    rows
}

fn sum_rows(rows: &[BoxScoreRow]) -> BoxScoreLine {
    let mut totals = BoxScoreLine::default();
    for row in rows {
        totals.add(&row.line);
    }
    totals
}
