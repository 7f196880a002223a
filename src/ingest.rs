//! Battle log ingestion.
//!
//! Parses the raw text logs players upload. Two line shapes matter, both
//! timestamped `(YYYYMMDD,HH:MM:SS)`:
//!
//! - kill:     `[战况]<killer> 击杀 <victim> !坐标:<x>，<y>  (...)`
//! - blessing: `[公告]  <player> 得到了 <name> 的祝福! (...)`
//!
//! Everything else in the log (chat, system notices) is noise and is
//! skipped. A malformed timestamp skips the line too; parsing is never
//! fatal.

use chrono::NaiveDateTime;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::models::{BattleRecord, BlessingRecord, Person, PlayerRecord, TimeWindow};

/// Result of parsing one uploaded log.
#[derive(Debug, Default)]
pub struct ParsedLog {
    pub kills: Vec<BattleRecord>,
    pub blessings: Vec<BlessingRecord>,
    pub lines_total: usize,
    pub lines_skipped: usize,
}

fn kill_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[战况\](.*?) 击杀 (.*?) !坐标:(\d+)，(\d+)  \((\d{8},\d{2}:\d{2}:\d{2})\)")
            .unwrap()
    })
}

fn blessing_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[公告\]  (.*?) 得到了 (.*?) 的祝福! \((\d{8},\d{2}:\d{2}:\d{2})\)").unwrap()
    })
}

/// Parse a log timestamp in `YYYYMMDD,HH:MM:SS` form.
pub fn parse_log_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y%m%d,%H:%M:%S").ok()
}

/// Parse a full battle log.
pub fn parse_battle_log(content: &str) -> ParsedLog {
    let mut result = ParsedLog::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        result.lines_total += 1;

        if let Some(caps) = kill_pattern().captures(line) {
            let ts_str = &caps[5];
            match parse_log_timestamp(ts_str) {
                Some(ts) => {
                    // Coordinates are \d+ by the pattern, parse cannot fail
                    let x: u32 = caps[3].parse().unwrap_or(0);
                    let y: u32 = caps[4].parse().unwrap_or(0);
                    result.kills.push(BattleRecord::new(
                        caps[1].trim().to_string(),
                        caps[2].trim().to_string(),
                        x,
                        y,
                        ts,
                    ));
                }
                None => {
                    warn!("Bad kill timestamp, skipping line: {}", ts_str);
                    result.lines_skipped += 1;
                }
            }
            continue;
        }

        if let Some(caps) = blessing_pattern().captures(line) {
            let ts_str = &caps[3];
            match parse_log_timestamp(ts_str) {
                Some(ts) => {
                    result.blessings.push(BlessingRecord::new(
                        caps[1].trim().to_string(),
                        caps[2].trim().to_string(),
                        ts,
                    ));
                }
                None => {
                    warn!("Bad blessing timestamp, skipping line: {}", ts_str);
                    result.lines_skipped += 1;
                }
            }
            continue;
        }

        result.lines_skipped += 1;
    }

    info!(
        "Parsed log: {} kills, {} blessings ({} of {} lines skipped)",
        result.kills.len(),
        result.blessings.len(),
        result.lines_skipped,
        result.lines_total
    );

    result
}

/// Build per-player records from stored events and the roster.
///
/// Only roster persons appear in the output, and only those with at least
/// one kill or death inside the window (players who merely received a
/// blessing are not ranked, matching the original query). Output follows
/// roster order; rank assignment happens later in `calculate`.
pub fn build_player_records(
    kills: &[BattleRecord],
    blessings: &[BlessingRecord],
    roster: &[Person],
    window: &TimeWindow,
) -> Vec<PlayerRecord> {
    #[derive(Default)]
    struct Tally {
        kills: u32,
        deaths: u32,
        blessings: u32,
    }

    let mut tallies: HashMap<&str, Tally> = HashMap::new();

    for event in kills {
        if !window.contains(event.occurred_at) {
            continue;
        }
        tallies.entry(&event.killer).or_default().kills += 1;
        tallies.entry(&event.victim).or_default().deaths += 1;
    }

    for event in blessings {
        if !window.contains(event.occurred_at) {
            continue;
        }
        tallies.entry(&event.player).or_default().blessings += 1;
    }

    let mut records = Vec::new();
    for person in roster {
        let Some(tally) = tallies.get(person.name.as_str()) else {
            continue;
        };
        if tally.kills == 0 && tally.deaths == 0 {
            continue;
        }
        records.push(
            PlayerRecord::new(
                person.name.clone(),
                person.faction.clone(),
                person.job.clone(),
                tally.kills,
                tally.deaths,
                tally.blessings,
            )
            .with_group(person.group_name.clone()),
        );
    }

    debug!("Built {} player records from {} roster entries", records.len(), roster.len());
    records
}
