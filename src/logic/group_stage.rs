//! Group stage into knockout: round robin groups, top two of each group advance.

use crate::logic::knockout::BracketGraph;
use crate::logic::round_robin::all_play_all;
use crate::logic::seeding::seed_order;
use crate::models::{FormatConfig, Match, Participant, Stage, TournamentError};

/// Group size assumed when the format config does not say.
pub const DEFAULT_GROUP_SIZE: u32 = 4;

/// Group letters: A..Z, then numbers.
fn group_name(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Snake-seeded groups, a round robin in each, then a knockout among group winners
/// and runners-up whose participants are not known yet.
///
/// Groups come from `number_of_groups`, or `ceil(n / group_size)` (at most `n / 2`) without it.
/// Every group needs at least two players, so `n >= 2 × groups`.
pub fn group_to_knockout(participants: &[Participant], config: &FormatConfig) -> Result<Vec<Match>, TournamentError> {
    let ranked = seed_order(participants);
    let n = ranked.len();
    let group_size = config.group_size().unwrap_or(DEFAULT_GROUP_SIZE) as usize;
    let groups = config
        .groups()
        .map_or_else(|| n.div_ceil(group_size).min(n / 2), |g| g as usize);
    if groups == 0 || n < 2 * groups {
        return Err(TournamentError::InsufficientParticipants(n));
    }

    // Seed snake: 1..G left to right, G+1..2G right to left, and so on.
    let mut members: Vec<Vec<&Participant>> = vec![Vec::new(); groups];
    for (i, &p) in ranked.iter().enumerate() {
        let lap = i / groups;
        let pos = i % groups;
        let g = if lap % 2 == 0 { pos } else { groups - 1 - pos };
        members[g].push(p);
    }

    let mut fixtures: Vec<Match> = Vec::new();
    for (g, group) in members.iter().enumerate() {
        let name = group_name(g);
        log::debug!("Group {}: {} participants", name, group.len());
        let first = fixtures.len() as u32 + 1;
        fixtures.extend(all_play_all(group, Stage::Group, Some(name.as_str()), first));
    }

    // Knockout entrants by rank: all group winners, then all runners-up.
    let labels: Vec<String> = (0..groups)
        .map(|g| format!("Winner Group {}", group_name(g)))
        .chain((0..groups).map(|g| format!("Runner-up Group {}", group_name(g))))
        .collect();
    let mut graph = BracketGraph::new(vec![None; 2 * groups]).with_labels(labels);
    graph.knockout(2, Stage::Knockout)?;
    let first = fixtures.len() as u32 + 1;
    fixtures.extend(graph.into_matches(first));
    Ok(fixtures)
}
