//! Single and double elimination brackets.

use crate::logic::knockout::{BracketGraph, Feed, NodeId};
use crate::logic::seeding::seed_order;
use crate::models::{FormatConfig, Match, Participant, ParticipantId, Stage, TournamentError};

fn ranked_entrants(participants: &[Participant]) -> Vec<Option<ParticipantId>> {
    seed_order(participants).into_iter().map(|p| Some(p.id)).collect()
}

/// Seeded single elimination: `n - 1` matches over `ceil(log2 n)` rounds.
///
/// Top seeds receive the byes and go straight into round two. With
/// `third_place_match`, the semifinal losers meet in an extra match in the
/// final round.
pub fn single_elimination(participants: &[Participant], config: &FormatConfig) -> Result<Vec<Match>, TournamentError> {
    let mut graph = BracketGraph::new(ranked_entrants(participants));
    let rounds = graph.knockout(1, Stage::Main)?;

    if config.third_place_match && rounds.len() >= 2 {
        let semis = &rounds[rounds.len() - 2];
        let final_round = rounds.len() as u32;
        graph.add(final_round, Stage::ThirdPlace, [Feed::Loser(semis[0]), Feed::Loser(semis[1])]);
    }
    Ok(graph.into_matches(1))
}

/// Double elimination: winners bracket, losers bracket, and a grand final.
///
/// Losers of winners round 1 pair up in losers round 1. Each later winners
/// round drops its losers, in reverse order, onto the surviving losers-bracket
/// players, with a halving round in between. Round numbers are shared by both
/// brackets so every link points to a later round. No bracket reset.
pub fn double_elimination(participants: &[Participant]) -> Result<Vec<Match>, TournamentError> {
    let mut graph = BracketGraph::new(ranked_entrants(participants));
    let winners = graph.knockout(1, Stage::Winners)?;
    let winners_rounds = winners.len() as u32;

    let mut round = 1;
    let losers_champion = match winners.split_first() {
        Some((first, later)) if !later.is_empty() => {
            round += 1;
            let mut current: Vec<NodeId> = first
                .chunks_exact(2)
                .map(|pair| graph.add(round, Stage::Losers, [Feed::Loser(pair[0]), Feed::Loser(pair[1])]))
                .collect();
            for dropping in later {
                round += 1;
                current = current
                    .iter()
                    .zip(dropping.iter().rev())
                    .map(|(&survivor, &dropped)| {
                        graph.add(round, Stage::Losers, [Feed::Winner(survivor), Feed::Loser(dropped)])
                    })
                    .collect();
                if current.len() > 1 {
                    round += 1;
                    current = current
                        .chunks_exact(2)
                        .map(|pair| graph.add(round, Stage::Losers, [Feed::Winner(pair[0]), Feed::Winner(pair[1])]))
                        .collect();
                }
            }
            Feed::Winner(current[0])
        }
        // Two entrants: the winners-final loser goes straight to the grand final.
        _ => Feed::Loser(winners[0][0]),
    };

    let winners_champion = Feed::Winner(winners[winners.len() - 1][0]);
    let grand_final_round = winners_rounds.max(round) + 1;
    graph.add(grand_final_round, Stage::GrandFinal, [winners_champion, losers_champion]);
    Ok(graph.into_matches(1))
}
