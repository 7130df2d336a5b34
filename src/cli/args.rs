//! CLI argument definitions and parsing structures.

use super::types::{ActionType, GameId, PlayerId, TeamId};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "courtlog", about = "Basketball game-event statistics engine")]
pub struct Courtlog {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record one logical scoring action as an atomic event batch.
    ///
    /// A shot with an assist and a rebound becomes one transaction: either
    /// every row of the action is stored or none is, so a partial failure
    /// can never leave an assist without its shot.
    Record {
        /// Game to append to.
        #[clap(long, short)]
        game_id: GameId,

        /// Player credited with the main action.
        #[clap(long, short)]
        player_id: PlayerId,

        /// Quarter the action happened in (1-based).
        #[clap(long, short)]
        quarter: u32,

        /// Action code: 2PM, 2PA, 3PM, 3PA, FTM, FTA, OREB, DREB, AST, STL,
        /// BLK, TOV, PF, PFD, SUB_IN, SUB_OUT.
        #[clap(value_parser = clap::value_parser!(ActionType))]
        action: ActionType,

        /// Shot X coordinate as a court-relative percentage (0-100).
        #[clap(long)]
        shot_x: Option<f64>,

        /// Shot Y coordinate as a court-relative percentage (0-100).
        #[clap(long)]
        shot_y: Option<f64>,

        /// Player who assisted the made shot; records a companion AST event.
        #[clap(long)]
        assisted_by: Option<PlayerId>,

        /// Player who rebounded the missed shot; records a companion
        /// OREB/DREB event classified by the shooter's team.
        #[clap(long)]
        rebounded_by: Option<PlayerId>,

        /// Team credited with a team rebound (ball out of bounds); the
        /// rebound row is attributed to that team's first on-court player.
        #[clap(long)]
        team_rebound: Option<TeamId>,
    },

    /// Per-player box score and team totals for a game.
    BoxScore {
        /// Game to aggregate.
        #[clap(long, short)]
        game_id: GameId,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Score progression of a game: one point per scoring event.
    Progression {
        /// Game to reconstruct.
        #[clap(long, short)]
        game_id: GameId,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Chronological play-by-play narrative of a game.
    PlayByPlay {
        /// Game to narrate.
        #[clap(long, short)]
        game_id: GameId,

        /// Only show events from this quarter.
        #[clap(long, short)]
        quarter: Option<u32>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Export the play-by-play as CSV (UTF-8 with BOM, fixed column layout).
    ExportCsv {
        /// Game to export.
        #[clap(long, short)]
        game_id: GameId,

        /// Output file; defaults to `<home>_vs_<away>_play_by_play.csv`.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// Accumulated or per-game-average player statistics across all
    /// finished games.
    SeasonStats {
        /// Show per-game averages instead of accumulated totals.
        #[clap(long)]
        average: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}
