//! Score progression command: the step function behind the score chart.

use crate::cli::types::GameId;
use crate::commands::common::CommandContext;
use crate::core::cache::{ProjectionKey, GLOBAL_CACHE};
use crate::engine::{score, GameLog};
use crate::error::Result;
use crate::storage::GameStatus;

pub fn handle_progression(game_id: GameId, as_json: bool) -> Result<()> {
    let ctx = CommandContext::new(false)?;
    let log = GameLog::load(&ctx.db, game_id)?;

    // The progression depends only on the log, so finished games can come
    // straight from the cache
    let cacheable = log.game.status == GameStatus::Finished;
    let key = ProjectionKey {
        game_id,
        last_event_id: log.last_event_id(),
    };
    let points = if cacheable {
        GLOBAL_CACHE.progressions.get(&key).unwrap_or_else(|| {
            let computed = score::progression(&log);
            GLOBAL_CACHE.progressions.put(key, computed.clone());
            computed
        })
    } else {
        score::progression(&log)
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    let home = log.team_name(log.game.home_team_id).unwrap_or("Home");
    let away = log.team_name(log.game.away_team_id).unwrap_or("Away");
    println!("{} vs {}", home, away);
    for point in &points {
        println!("#{:<4} {:>3} - {:<3}", point.sequence, point.home, point.away);
    }
    let (final_home, final_away) = score::current_score(&log);
    println!("Final: {} {} - {} {}", home, final_home, final_away, away);

    Ok(())
}
