//! CSV export command: write the fixed-column play-by-play file.

use crate::cli::types::GameId;
use crate::commands::common::CommandContext;
use crate::engine::{playbyplay, GameLog};
use crate::error::Result;
use std::path::PathBuf;

pub fn handle_export_csv(game_id: GameId, output: Option<PathBuf>) -> Result<()> {
    let ctx = CommandContext::new(false)?;
    let log = GameLog::load(&ctx.db, game_id)?;

    let bytes = playbyplay::to_csv(&log)?;

    let path = output.unwrap_or_else(|| {
        let home = log.team_name(log.game.home_team_id).unwrap_or("home");
        let away = log.team_name(log.game.away_team_id).unwrap_or("away");
        PathBuf::from(format!(
            "{}_vs_{}_play_by_play.csv",
            home.replace(' ', "_"),
            away.replace(' ', "_")
        ))
    });

    std::fs::write(&path, &bytes)?;
    println!(
        "exported {} events to {}",
        log.events.len(),
        path.display()
    );

    Ok(())
}
