//! Round robin: every participant meets every other exactly once.

use crate::logic::seeding::seed_order;
use crate::models::{Match, Participant, Stage};

/// `n(n-1)/2` matches, one per pair `(i, j)` with `i < j` in seed order, all in round 1.
///
/// Spreading the pairs over rounds to avoid back-to-back games is left to scheduling.
pub fn round_robin(participants: &[Participant]) -> Vec<Match> {
    all_play_all(&seed_order(participants), Stage::Main, None, 1)
}

/// Pair every entrant with every later one, numbering from `first_match_number`.
pub(crate) fn all_play_all(
    entrants: &[&Participant],
    stage: Stage,
    group_name: Option<&str>,
    first_match_number: u32,
) -> Vec<Match> {
    let n = entrants.len();
    let mut fixtures = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, home) in entrants.iter().enumerate() {
        for away in &entrants[i + 1..] {
            let number = first_match_number + fixtures.len() as u32;
            let mut m = Match::new(1, number, stage).between(home.id, away.id);
            if let Some(name) = group_name {
                m = m.in_group(name);
            }
            fixtures.push(m);
        }
    }
    fixtures
}
