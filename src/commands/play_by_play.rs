//! Play-by-play command: the chronological narrative of a game.

use crate::cli::types::GameId;
use crate::commands::common::CommandContext;
use crate::engine::{playbyplay, GameLog};
use crate::error::Result;

pub fn handle_play_by_play(game_id: GameId, quarter: Option<u32>, as_json: bool) -> Result<()> {
    let ctx = CommandContext::new(false)?;
    let log = GameLog::load(&ctx.db, game_id)?;

    let mut entries = playbyplay::narrative(&log);
    if let Some(quarter) = quarter {
        entries.retain(|e| e.quarter == quarter);
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let home = log.team_name(log.game.home_team_id).unwrap_or("Home");
    let away = log.team_name(log.game.away_team_id).unwrap_or("Away");
    println!("{} vs {}, {}", home, away, log.game.date.format("%d/%m/%Y"));

    if entries.is_empty() {
        println!("(no events recorded)");
        return Ok(());
    }

    for entry in &entries {
        println!(
            "Q{} {}  {:>3}-{:<3}  {} {}",
            entry.quarter,
            entry.clock_label,
            entry.home_score,
            entry.away_score,
            entry.player,
            entry.description,
        );
    }

    Ok(())
}
