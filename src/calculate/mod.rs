//! Statistics calculation engine.
//!
//! Pure derived-metric computation over player records:
//! - Battle score and kill/death ratio
//! - Rank-band level classification
//! - Leaderboard ordering and rank assignment
//! - Faction roll-ups and grouped-view collapsing

mod aggregate;

pub use aggregate::{aggregate_by_faction, collapse_groups};

use crate::models::{Level, PlayerRecord};

/// Battle score: kills*3 + blessings - deaths.
///
/// Signed and unclamped; a player who mostly dies goes negative. Whether
/// the UI floors at zero is a presentation decision, not made here.
pub fn compute_score(kills: u32, deaths: u32, blessings: u32) -> i64 {
    kills as i64 * 3 + blessings as i64 - deaths as i64
}

/// Kill/death ratio rounded to 2 decimal places.
///
/// Zero deaths counts as a divisor of 1, so the ratio equals the kill
/// count. Product policy inherited from the original dashboards, not a
/// mathematical default.
pub fn compute_kd_ratio(kills: u32, deaths: u32) -> f64 {
    if deaths == 0 {
        kills as f64
    } else {
        round2(kills as f64 / deaths as f64)
    }
}

/// Map a 1-based leaderboard rank to its level band.
pub fn rank_to_level(rank: u32) -> Level {
    Level::from_rank(rank)
}

/// Sort records into leaderboard order and assign 1-based ranks.
///
/// Ordering follows the original ranking query: score desc, then kills
/// desc, then deaths asc. The sort is stable, so equal records keep their
/// input order. Every record gets a rank and the level derived from it.
pub fn assign_ranks(records: &mut [PlayerRecord]) {
    records.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(b.kills.cmp(&a.kills))
            .then(a.deaths.cmp(&b.deaths))
    });

    for (i, record) in records.iter_mut().enumerate() {
        record.assign_rank(i as u32 + 1);
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
