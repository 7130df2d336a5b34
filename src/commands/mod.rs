//! Command implementations for the courtlog CLI

pub mod box_score;
pub mod common;
pub mod export_csv;
pub mod play_by_play;
pub mod progression;
pub mod record_event;
pub mod season_stats;
