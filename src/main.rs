//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use courtlog::{
    cli::{Commands, Courtlog},
    commands::{
        box_score::handle_box_score,
        export_csv::handle_export_csv,
        play_by_play::handle_play_by_play,
        progression::handle_progression,
        record_event::{handle_record, RecordParams},
        season_stats::handle_season_stats,
    },
};

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let app = Courtlog::parse();

    match app.command {
        Commands::Record {
            game_id,
            player_id,
            quarter,
            action,
            shot_x,
            shot_y,
            assisted_by,
            rebounded_by,
            team_rebound,
        } => handle_record(RecordParams {
            game_id,
            player_id,
            quarter,
            action,
            shot_x,
            shot_y,
            assisted_by,
            rebounded_by,
            team_rebound,
        })?,

        Commands::BoxScore { game_id, json } => handle_box_score(game_id, json)?,

        Commands::Progression { game_id, json } => handle_progression(game_id, json)?,

        Commands::PlayByPlay {
            game_id,
            quarter,
            json,
        } => handle_play_by_play(game_id, quarter, json)?,

        Commands::ExportCsv { game_id, output } => handle_export_csv(game_id, output)?,

        Commands::SeasonStats { average, json } => handle_season_stats(average, json)?,
    }

    Ok(())
}
