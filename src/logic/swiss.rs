//! Swiss system, first round only. Later rounds depend on results.

use crate::logic::seeding::seed_order;
use crate::models::{Match, Participant, Stage};

/// Adjacent-seed pairs: 1 v 2, 3 v 4, ... With an odd count the lowest seed sits out.
pub fn swiss_first_round(participants: &[Participant]) -> Vec<Match> {
    let ranked = seed_order(participants);
    let pairs = ranked.chunks_exact(2);
    if let [bye] = pairs.remainder() {
        log::info!("Swiss round 1: {} receives a bye", bye.name);
    }
    pairs
        .enumerate()
        .map(|(i, pair)| Match::new(1, i as u32 + 1, Stage::Swiss).between(pair[0].id, pair[1].id))
        .collect()
}
