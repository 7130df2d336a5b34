//! Play-by-play narrative and CSV export
//!
//! Two clock representations coexist deliberately: the live narrative shows
//! a countdown (`quarter length - elapsed`), while the CSV `Minutes` column
//! records the count-up elapsed time, matching conventional play-by-play
//! export formats. Both derive from the same event timestamp and must not be
//! conflated.

use super::GameLog;
use crate::cli::types::{ActionType, TeamId};
use crate::error::Result;
use chrono::{DateTime, Utc};
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

/// UTF-8 byte-order mark; spreadsheet tools key their encoding detection on it.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One narrative entry
#[derive(Debug, Clone, Serialize)]
pub struct PlayEntry {
    pub event_id: i64,
    pub quarter: u32,
    pub timestamp: DateTime<Utc>,
    /// Countdown quarter clock, e.g. "07:23"
    pub clock_label: String,
    pub player_id: i64,
    pub player: String,
    pub team: String,
    pub action: ActionType,
    pub description: String,
    pub home_score: u32,
    pub away_score: u32,
}

/// Narrative phrase for an action
fn action_phrase(action: ActionType) -> &'static str {
    match action {
        ActionType::TwoPointMade => "scores a two pointer",
        ActionType::TwoPointMiss => "misses a two pointer",
        ActionType::ThreePointMade => "scores a three pointer",
        ActionType::ThreePointMiss => "misses a three pointer",
        ActionType::FreeThrowMade => "scores a free throw",
        ActionType::FreeThrowMiss => "misses a free throw",
        ActionType::OffensiveRebound => "gets an offensive rebound",
        ActionType::DefensiveRebound => "gets a defensive rebound",
        ActionType::Assist => "assists",
        ActionType::Steal => "steals the ball",
        ActionType::Block => "blocks an opponent",
        ActionType::Turnover => "loses the ball",
        ActionType::PersonalFoul => "commits a personal foul",
        ActionType::FoulDrawn => "draws a personal foul",
        ActionType::SubIn => "subs in",
        ActionType::SubOut => "subs out",
    }
}

/// Event name used in the CSV `Event` column
fn csv_event_name(action: ActionType) -> &'static str {
    match action {
        ActionType::TwoPointMade => "Two pointer made",
        ActionType::TwoPointMiss => "Two pointer missed",
        ActionType::ThreePointMade => "Three pointer made",
        ActionType::ThreePointMiss => "Three pointer missed",
        ActionType::FreeThrowMade => "Free throw made",
        ActionType::FreeThrowMiss => "Free throw missed",
        ActionType::OffensiveRebound => "Offensive rebound",
        ActionType::DefensiveRebound => "Defensive rebound",
        ActionType::Assist => "Assist",
        ActionType::Steal => "Steal",
        ActionType::Block => "Block",
        ActionType::Turnover => "Turnover",
        ActionType::PersonalFoul => "Personal foul",
        ActionType::FoulDrawn => "Personal foul drawn",
        ActionType::SubIn => "Sub in",
        ActionType::SubOut => "Sub out",
    }
}

fn format_mmss(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Seconds into the current quarter at `instant`
fn quarter_elapsed_seconds(log: &GameLog, instant: DateTime<Utc>) -> i64 {
    let quarter_len = log.game.quarter_duration_seconds().max(1);
    let total_elapsed = (instant - log.game.date).num_seconds().max(0);
    total_elapsed % quarter_len
}

/// Countdown clock shown live: time remaining in the quarter
pub fn countdown_label(log: &GameLog, instant: DateTime<Utc>) -> String {
    let quarter_len = log.game.quarter_duration_seconds().max(1);
    format_mmss(quarter_len - quarter_elapsed_seconds(log, instant))
}

/// Count-up clock recorded in the CSV `Minutes` column
pub fn elapsed_label(log: &GameLog, instant: DateTime<Utc>) -> String {
    format_mmss(quarter_elapsed_seconds(log, instant))
}

/// The chronological narrative: every event in replay order with its
/// description and the running score.
///
/// Referential gaps never fail the narrative: an unresolvable assist or
/// rebound annotation is omitted, an unresolvable main player keeps the
/// entry with a placeholder name.
pub fn narrative(log: &GameLog) -> Vec<PlayEntry> {
    let mut entries = Vec::with_capacity(log.events.len());
    let mut home = 0u32;
    let mut away = 0u32;

    for event in &log.events {
        let delta = event.action.points();
        if delta > 0 {
            if log.is_home(event.team_id) {
                home += delta;
            } else {
                away += delta;
            }
        }

        let player = match log.player_name(event.player_id) {
            Some(name) => name.to_string(),
            None => {
                log::warn!(
                    "event {} references unknown player {}; using placeholder",
                    event.event_id,
                    event.player_id
                );
                format!("#{}", event.player_id)
            }
        };

        let mut description = action_phrase(event.action).to_string();
        if let Some(assist_id) = event.assisted_by {
            if let Some(name) = log.player_name(assist_id) {
                description.push_str(&format!(" (assisted by {})", name));
            }
        }
        if let Some(rebound_id) = event.rebounded_by {
            if let Some(name) = log.player_name(rebound_id) {
                description.push_str(&format!(" (rebounded by {})", name));
            }
        }

        entries.push(PlayEntry {
            event_id: event.event_id.as_i64(),
            quarter: event.quarter,
            timestamp: event.timestamp,
            clock_label: countdown_label(log, event.timestamp),
            player_id: event.player_id.as_i64(),
            player,
            team: log
                .team_name(event.team_id)
                .unwrap_or_default()
                .to_string(),
            action: event.action,
            description,
            home_score: home,
            away_score: away,
        });
    }

    entries
}

/// Starting five of one team: the first five distinct players subbed in,
/// falling back to the first five distinct players appearing in any event
/// for logs that predate substitution tracking.
fn starters(log: &GameLog, team_id: TeamId) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for pass in [true, false] {
        for event in &log.events {
            if names.len() == 5 {
                break;
            }
            if event.team_id != team_id {
                continue;
            }
            if pass && event.action != ActionType::SubIn {
                continue;
            }
            if seen.insert(event.player_id) {
                names.push(
                    log.player_name(event.player_id)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("#{}", event.player_id)),
                );
            }
        }
        if names.len() == 5 {
            break;
        }
    }

    names.resize(5, String::new());
    names
}

/// Export the play-by-play as UTF-8 CSV with a BOM, every field quoted, one
/// data row per event in ascending play order, `Play id` counting from 0.
pub fn to_csv(log: &GameLog) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record([
        "Game",
        "Date",
        "Home player 1",
        "Home player 2",
        "Home player 3",
        "Home player 4",
        "Home player 5",
        "Away player 1",
        "Away player 2",
        "Away player 3",
        "Away player 4",
        "Away player 5",
        "Quarter",
        "Minutes",
        "Home score",
        "Away score",
        "Play id",
        "Team",
        "Offensive system",
        "Defensive system",
        "Player",
        "Event",
        "Description",
    ])?;

    let home_name = log.team_name(log.game.home_team_id).unwrap_or_default();
    let away_name = log.team_name(log.game.away_team_id).unwrap_or_default();
    let game_name = format!("{} vs {}", home_name, away_name);
    let game_date = log.game.date.format("%d/%m/%Y").to_string();
    let home_starters = starters(log, log.game.home_team_id);
    let away_starters = starters(log, log.game.away_team_id);

    for (index, entry) in narrative(log).iter().enumerate() {
        let mut record: Vec<String> = Vec::with_capacity(23);
        record.push(game_name.clone());
        record.push(game_date.clone());
        record.extend(home_starters.iter().cloned());
        record.extend(away_starters.iter().cloned());
        record.push(entry.quarter.to_string());
        record.push(elapsed_label(log, entry.timestamp));
        record.push(entry.home_score.to_string());
        record.push(entry.away_score.to_string());
        record.push(index.to_string());
        record.push(entry.team.clone());
        record.push(String::new());
        record.push(String::new());
        record.push(entry.player.clone());
        record.push(csv_event_name(entry.action).to_string());
        record.push(entry.description.clone());
        writer.write_record(&record)?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::{EventId, GameId, PlayerId, TeamId};
    use crate::storage::{Game, GameEvent, GameStatus, Player, SeasonType, Team};
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn test_log() -> GameLog {
        let game = Game {
            game_id: GameId::new(1),
            home_team_id: TeamId::new(1),
            away_team_id: TeamId::new(2),
            date: Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap(),
            duration_minutes: 40,
            quarters: 4,
            status: GameStatus::Live,
            season_type: SeasonType::Regular,
        };

        let mut players = HashMap::new();
        for (id, team, name) in [
            (10, 1, "Ada Moreno"),
            (11, 1, "Bea Kovacs"),
            (20, 2, "Cleo Danner"),
        ] {
            players.insert(
                PlayerId::new(id),
                Player {
                    player_id: PlayerId::new(id),
                    team_id: TeamId::new(team),
                    name: name.to_string(),
                    number: id as u32,
                },
            );
        }

        let mut teams = HashMap::new();
        teams.insert(
            TeamId::new(1),
            Team {
                team_id: TeamId::new(1),
                name: "Hawks".to_string(),
            },
        );
        teams.insert(
            TeamId::new(2),
            Team {
                team_id: TeamId::new(2),
                name: "Bulls".to_string(),
            },
        );

        GameLog {
            game,
            events: Vec::new(),
            players,
            teams,
        }
    }

    fn push_event(
        log: &mut GameLog,
        player: i64,
        team: i64,
        action: ActionType,
        offset_secs: i64,
    ) {
        let id = log.events.len() as i64 + 1;
        log.events.push(GameEvent {
            event_id: EventId::new(id),
            game_id: log.game.game_id,
            player_id: PlayerId::new(player),
            team_id: TeamId::new(team),
            quarter: 1,
            action,
            timestamp: log.game.date + chrono::Duration::seconds(offset_secs),
            shot_x: None,
            shot_y: None,
            assisted_by: None,
            rebounded_by: None,
        });
    }

    #[test]
    fn test_countdown_and_elapsed_are_complementary() {
        let log = test_log();
        // 10-minute quarters; 137 seconds into the first quarter
        let instant = log.game.date + chrono::Duration::seconds(137);

        assert_eq!(elapsed_label(&log, instant), "02:17");
        assert_eq!(countdown_label(&log, instant), "07:43");
    }

    #[test]
    fn test_clock_wraps_into_later_quarters() {
        let log = test_log();
        // 612 seconds = 12 seconds into the second quarter
        let instant = log.game.date + chrono::Duration::seconds(612);

        assert_eq!(elapsed_label(&log, instant), "00:12");
        assert_eq!(countdown_label(&log, instant), "09:48");
    }

    #[test]
    fn test_clock_before_tipoff_clamps_to_zero_elapsed() {
        let log = test_log();
        let instant = log.game.date - chrono::Duration::seconds(30);
        assert_eq!(elapsed_label(&log, instant), "00:00");
    }

    #[test]
    fn test_narrative_running_score() {
        let mut log = test_log();
        push_event(&mut log, 10, 1, ActionType::TwoPointMade, 10);
        push_event(&mut log, 20, 2, ActionType::Steal, 20);
        push_event(&mut log, 20, 2, ActionType::ThreePointMade, 30);

        let entries = narrative(&log);
        assert_eq!(entries.len(), 3);
        assert_eq!((entries[0].home_score, entries[0].away_score), (2, 0));
        // Non-scoring events carry the score forward unchanged
        assert_eq!((entries[1].home_score, entries[1].away_score), (2, 0));
        assert_eq!((entries[2].home_score, entries[2].away_score), (2, 3));
    }

    #[test]
    fn test_narrative_description_with_assist() {
        let mut log = test_log();
        push_event(&mut log, 10, 1, ActionType::TwoPointMade, 10);
        log.events[0].assisted_by = Some(PlayerId::new(11));

        let entries = narrative(&log);
        assert_eq!(
            entries[0].description,
            "scores a two pointer (assisted by Bea Kovacs)"
        );
    }

    #[test]
    fn test_narrative_omits_unresolvable_assist() {
        let mut log = test_log();
        push_event(&mut log, 10, 1, ActionType::TwoPointMade, 10);
        log.events[0].assisted_by = Some(PlayerId::new(999));

        let entries = narrative(&log);
        // The annotation is dropped, the entry survives
        assert_eq!(entries[0].description, "scores a two pointer");
    }

    #[test]
    fn test_narrative_placeholder_for_unknown_player() {
        let mut log = test_log();
        push_event(&mut log, 999, 1, ActionType::Turnover, 10);

        let entries = narrative(&log);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].player, "#999");
    }

    #[test]
    fn test_starters_prefer_sub_in_events() {
        let mut log = test_log();
        // A bench player acts first, then the starter subs in
        push_event(&mut log, 11, 1, ActionType::Turnover, 1);
        push_event(&mut log, 10, 1, ActionType::SubIn, 2);

        let names = starters(&log, TeamId::new(1));
        assert_eq!(names[0], "Ada Moreno");
        // Remaining slots filled from event appearances, then padded
        assert_eq!(names[1], "Bea Kovacs");
        assert_eq!(names[2], "");
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_csv_has_bom_header_and_one_row_per_event() {
        let mut log = test_log();
        push_event(&mut log, 10, 1, ActionType::SubIn, 0);
        push_event(&mut log, 10, 1, ActionType::TwoPointMade, 15);
        push_event(&mut log, 20, 2, ActionType::FreeThrowMade, 40);

        let bytes = to_csv(&log).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);

        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // Header + one row per event
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("\"Game\",\"Date\""));

        // Fields are always quoted; Play id counts from 0
        assert!(lines[1].contains("\"0\""));
        assert!(lines[2].contains("\"1\""));
        assert!(lines[1].contains("\"Hawks vs Bulls\""));
        assert!(lines[1].contains("\"14/03/2026\""));
        assert!(lines[2].contains("\"Two pointer made\""));

        // Running score at the final row matches the reconstruction
        assert!(lines[3].contains("\"2\"") && lines[3].contains("\"1\""));
    }
}
