//! Record one logical action as an atomic event batch.
//!
//! The scorer presses one button; what lands in the log may be several rows
//! (shot + assist + rebound). They are appended in a single transaction so
//! the log can never hold an assist without its shot.

use crate::cli::types::{ActionType, GameId, PlayerId, TeamId};
use crate::commands::common::CommandContext;
use crate::engine::{oncourt, GameLog};
use crate::error::{Result, StatError};
use crate::storage::NewEvent;

/// Parameters for one recorded action
pub struct RecordParams {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub quarter: u32,
    pub action: ActionType,
    pub shot_x: Option<f64>,
    pub shot_y: Option<f64>,
    pub assisted_by: Option<PlayerId>,
    pub rebounded_by: Option<PlayerId>,
    /// Team credited with a team rebound when no individual player
    /// recovered the ball (e.g. out of bounds).
    pub team_rebound: Option<TeamId>,
}

pub fn handle_record(params: RecordParams) -> Result<()> {
    let mut ctx = CommandContext::new(false)?;

    let shooter = ctx.db.get_player(params.player_id)?;

    let mut main = NewEvent::simple(
        params.game_id,
        params.player_id,
        params.quarter,
        params.action,
    );
    main.shot_x = params.shot_x;
    main.shot_y = params.shot_y;
    main.assisted_by = params.assisted_by;
    main.rebounded_by = params.rebounded_by;

    let mut batch = vec![main];

    // Companion assist row
    if let Some(assist_id) = params.assisted_by {
        batch.push(NewEvent::simple(
            params.game_id,
            assist_id,
            params.quarter,
            ActionType::Assist,
        ));
    }

    // Companion rebound row: offensive when the recovering side is the
    // shooter's own team, defensive otherwise
    if let Some(rebounder_id) = params.rebounded_by {
        let rebounder = ctx.db.get_player(rebounder_id)?;
        let rebound = if rebounder.team_id == shooter.team_id {
            ActionType::OffensiveRebound
        } else {
            ActionType::DefensiveRebound
        };
        batch.push(NewEvent::simple(
            params.game_id,
            rebounder_id,
            params.quarter,
            rebound,
        ));
    } else if let Some(team_id) = params.team_rebound {
        let rebound = if team_id == shooter.team_id {
            ActionType::OffensiveRebound
        } else {
            ActionType::DefensiveRebound
        };
        let representative = team_rebound_representative(&ctx, params.game_id, team_id)?;
        // rebounded_by stays None: that is the stored marker for a team
        // rebound, the representative only carries the row
        batch.push(NewEvent::simple(
            params.game_id,
            representative,
            params.quarter,
            rebound,
        ));
    }

    let stored = ctx.db.append_batch(batch)?;

    for event in &stored {
        println!(
            "recorded #{} {} for player {} (game {}, Q{})",
            event.event_id, event.action, event.player_id, event.game_id, event.quarter
        );
    }

    Ok(())
}

/// The player who carries a team rebound row: the first on-court player of
/// the recovering team (jersey-number order), falling back to the first
/// roster player when the log has no substitution data.
fn team_rebound_representative(
    ctx: &CommandContext,
    game_id: GameId,
    team_id: TeamId,
) -> Result<PlayerId> {
    let log = GameLog::load(&ctx.db, game_id)?;
    let on_court = oncourt::on_court_now(&log);

    let roster = log.team_players(team_id);
    let representative = roster
        .iter()
        .find(|p| on_court.contains(&p.player_id))
        .or_else(|| {
            log::warn!(
                "no on-court player recorded for team {} in game {}; attributing team rebound to the first roster player",
                team_id,
                game_id
            );
            roster.first()
        })
        .map(|p| p.player_id);

    representative.ok_or(StatError::TeamNotFound {
        team_id: team_id.as_i64(),
    })
}
