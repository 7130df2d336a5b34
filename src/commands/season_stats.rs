//! Season statistics command: accumulate every finished game's box score.
//!
//! Logs are loaded sequentially (the store connection is not shared across
//! threads), then the per-game folds run in parallel; they are pure
//! functions of their snapshots.

use crate::cli::types::PlayerId;
use crate::commands::common::{format_plus_minus, CommandContext};
use crate::engine::{boxscore, season::SeasonLine, GameLog};
use crate::error::Result;
use chrono::Utc;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
struct SeasonRow {
    player_id: i64,
    name: String,
    team: String,
    #[serde(flatten)]
    line: SeasonLine,
}

pub fn handle_season_stats(average: bool, as_json: bool) -> Result<()> {
    let ctx = CommandContext::new(false)?;

    let games = ctx.db.finished_games()?;
    let mut logs = Vec::with_capacity(games.len());
    for game in &games {
        logs.push(GameLog::load(&ctx.db, game.game_id)?);
    }

    let now = Utc::now();
    let per_game: Vec<_> = logs
        .par_iter()
        .map(|log| boxscore::box_score(log, now))
        .collect();

    let mut accumulated: HashMap<PlayerId, SeasonLine> = HashMap::new();
    let mut names: HashMap<PlayerId, (String, String)> = HashMap::new();

    for (log, lines) in logs.iter().zip(&per_game) {
        for (player_id, line) in lines {
            accumulated.entry(*player_id).or_default().accumulate(line);
            names.entry(*player_id).or_insert_with(|| {
                let name = log
                    .player_name(*player_id)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", player_id));
                let team = boxscore::player_team(log, *player_id)
                    .and_then(|t| log.team_name(t))
                    .unwrap_or_default()
                    .to_string();
                (name, team)
            });
        }
    }

    let mut rows: Vec<SeasonRow> = accumulated
        .into_iter()
        .map(|(player_id, line)| {
            let (name, team) = names.remove(&player_id).unwrap_or_default();
            SeasonRow {
                player_id: player_id.as_i64(),
                name,
                team,
                line,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.line
            .totals
            .points
            .cmp(&a.line.totals.points)
            .then(a.player_id.cmp(&b.player_id))
    });

    if as_json {
        if average {
            let averaged: Vec<_> = rows
                .iter()
                .map(|row| {
                    serde_json::json!({
                        "player_id": row.player_id,
                        "name": row.name,
                        "team": row.team,
                        "average": row.line.average(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&averaged)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        return Ok(());
    }

    println!(
        "{:<22} {:<16} {:>3} {:>6} {:>7} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "Player", "Team", "GP", "PTS", "FG%", "REB", "AST", "STL", "BLK", "EFF", "+/-"
    );
    for row in &rows {
        if average {
            let avg = row.line.average();
            println!(
                "{:<22} {:<16} {:>3} {:>6.1} {:>6.1}% {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1}",
                row.name,
                row.team,
                avg.games,
                avg.points,
                avg.fg_pct,
                avg.reb,
                avg.ast,
                avg.stl,
                avg.blk,
                avg.eff,
                avg.plus_minus,
            );
        } else {
            let totals = &row.line.totals;
            println!(
                "{:<22} {:<16} {:>3} {:>6} {:>6.1}% {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
                row.name,
                row.team,
                row.line.games,
                totals.points,
                row.line.fg_pct(),
                totals.reb,
                totals.ast,
                totals.stl,
                totals.blk,
                totals.eff,
                format_plus_minus(totals.plus_minus),
            );
        }
    }

    Ok(())
}
