//! Sanity checks on a generated fixture list before it is handed off for storage.

use crate::models::{Match, MatchId, TournamentConstraints, TournamentError};
use std::collections::HashMap;

/// Reject fixture lists that cannot fit the tournament or whose progression links are broken.
///
/// The count check uses `max_matches_per_day × days` only, independent of the
/// participant capacity computed at creation. Every `next_match_id` and
/// `loser_next_match_id` must name a match in a later round, and no match may be
/// fed by more than two links.
pub fn validate_fixtures(fixtures: &[Match], constraints: &TournamentConstraints) -> Result<(), TournamentError> {
    let allowed = constraints.max_possible_matches();
    if fixtures.len() as u64 > allowed {
        return Err(TournamentError::CapacityExceeded {
            generated: fixtures.len(),
            allowed,
        });
    }

    let rounds: HashMap<MatchId, u32> = fixtures.iter().map(|m| (m.id, m.round_number)).collect();
    let mut feeders: HashMap<MatchId, usize> = HashMap::new();
    for m in fixtures {
        for target in [m.next_match_id, m.loser_next_match_id].into_iter().flatten() {
            match rounds.get(&target) {
                Some(&round) if round > m.round_number => {}
                _ => return Err(TournamentError::BrokenProgression(m.id)),
            }
            let count = feeders.entry(target).or_insert(0);
            *count += 1;
            if *count > 2 {
                return Err(TournamentError::BrokenProgression(m.id));
            }
        }
    }
    Ok(())
}
