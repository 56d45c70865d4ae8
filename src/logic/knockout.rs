//! Knockout bracket graph shared by the elimination formats.
//!
//! Matches are nodes fed by an entrant, a bye, or the winner or loser of an
//! earlier node. A node with a bye on either side never becomes a fixture:
//! whoever arrives on the other side moves straight on.

use crate::logic::bracket::bracket_positions;
use crate::models::{Match, ParticipantId, Stage, TournamentError};

pub(crate) type NodeId = usize;

/// Source of one side of a bracket node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Feed {
    /// Entrant by rank.
    Entrant(usize),
    Bye,
    Winner(NodeId),
    Loser(NodeId),
}

#[derive(Clone, Copy, Debug)]
struct Node {
    round: u32,
    stage: Stage,
    feeds: [Feed; 2],
}

/// Who actually turns up through a feed once byes are collapsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Arrival {
    Nobody,
    Entrant(usize),
    WinnerOf(NodeId),
    LoserOf(NodeId),
}

#[derive(Clone, Copy, Debug)]
enum Resolved {
    Played([Arrival; 2]),
    /// Bye on at least one side; the other arrival passes through.
    Skipped(Arrival),
}

#[derive(Clone, Debug)]
pub(crate) struct BracketGraph {
    /// By rank; `None` marks an entrant not known yet.
    entrants: Vec<Option<ParticipantId>>,
    /// Descriptions of pending entrants by rank, for match notes.
    labels: Vec<String>,
    nodes: Vec<Node>,
}

impl BracketGraph {
    pub(crate) fn new(entrants: Vec<Option<ParticipantId>>) -> Self {
        Self {
            entrants,
            labels: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub(crate) fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub(crate) fn add(&mut self, round: u32, stage: Stage, feeds: [Feed; 2]) -> NodeId {
        self.nodes.push(Node { round, stage, feeds });
        self.nodes.len() - 1
    }

    /// Seeded single-elimination tree over all entrants, first round numbered `first_round`.
    ///
    /// Entrants are laid out by `bracket_positions` on the next power of two; the
    /// slots past the last entrant are byes. Returns node ids per round, the last
    /// round holding only the final.
    pub(crate) fn knockout(&mut self, first_round: u32, stage: Stage) -> Result<Vec<Vec<NodeId>>, TournamentError> {
        let count = self.entrants.len();
        if count < 2 {
            return Err(TournamentError::InsufficientParticipants(count));
        }
        let positions = bracket_positions(count.next_power_of_two())?;
        let slot = |pos: usize| if pos < count { Feed::Entrant(pos) } else { Feed::Bye };

        let mut current: Vec<NodeId> = positions
            .chunks_exact(2)
            .map(|pair| self.add(first_round, stage, [slot(pair[0]), slot(pair[1])]))
            .collect();
        let mut rounds = Vec::new();
        let mut round = first_round;
        while current.len() > 1 {
            round += 1;
            let next = current
                .chunks_exact(2)
                .map(|pair| self.add(round, stage, [Feed::Winner(pair[0]), Feed::Winner(pair[1])]))
                .collect();
            rounds.push(std::mem::replace(&mut current, next));
        }
        rounds.push(current);
        Ok(rounds)
    }

    /// Turn every played node into a `Match`, numbered from `first_match_number`
    /// in node order, and wire winner and loser links between them.
    pub(crate) fn into_matches(self, first_match_number: u32) -> Vec<Match> {
        let mut resolved: Vec<Resolved> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let arrivals = node.feeds.map(|feed| arrival(feed, &resolved));
            resolved.push(match arrivals {
                [Arrival::Nobody, other] | [other, Arrival::Nobody] => Resolved::Skipped(other),
                _ => Resolved::Played(arrivals),
            });
        }

        let mut matches: Vec<Match> = Vec::new();
        let mut match_of: Vec<Option<usize>> = vec![None; self.nodes.len()];
        for (id, (node, state)) in self.nodes.iter().zip(&resolved).enumerate() {
            let Resolved::Played(arrivals) = state else {
                continue;
            };
            let mut m = Match::new(node.round, first_match_number + matches.len() as u32, node.stage);
            m.participant_1 = self.known(arrivals[0]);
            m.participant_2 = self.known(arrivals[1]);
            m.notes = self.notes(arrivals, &matches, &match_of);
            match_of[id] = Some(matches.len());
            matches.push(m);
        }

        for (id, state) in resolved.iter().enumerate() {
            let (Resolved::Played(arrivals), Some(target)) = (state, match_of[id]) else {
                continue;
            };
            let target_id = matches[target].id;
            for side in arrivals {
                match *side {
                    Arrival::WinnerOf(source) => {
                        if let Some(s) = match_of[source] {
                            matches[s].next_match_id = Some(target_id);
                        }
                    }
                    Arrival::LoserOf(source) => {
                        if let Some(s) = match_of[source] {
                            matches[s].loser_next_match_id = Some(target_id);
                        }
                    }
                    Arrival::Nobody | Arrival::Entrant(_) => {}
                }
            }
        }
        matches
    }

    fn known(&self, arrival: Arrival) -> Option<ParticipantId> {
        match arrival {
            Arrival::Entrant(rank) => self.entrants.get(rank).copied().flatten(),
            _ => None,
        }
    }

    fn label(&self, arrival: Arrival) -> Option<&str> {
        match arrival {
            Arrival::Entrant(rank) if self.known(arrival).is_none() => self.labels.get(rank).map(String::as_str),
            _ => None,
        }
    }

    /// "Winner Group A vs Winner of match 3" when a side waits on a labelled entrant.
    fn notes(&self, arrivals: &[Arrival; 2], matches: &[Match], match_of: &[Option<usize>]) -> Option<String> {
        if arrivals.iter().all(|a| self.label(*a).is_none()) {
            return None;
        }
        let describe = |a: Arrival| -> String {
            if let Some(label) = self.label(a) {
                return label.to_string();
            }
            let number = |node: NodeId| match_of[node].map(|i| matches[i].match_number);
            match a {
                Arrival::WinnerOf(node) => number(node).map_or("TBD".to_string(), |n| format!("Winner of match {n}")),
                Arrival::LoserOf(node) => number(node).map_or("TBD".to_string(), |n| format!("Loser of match {n}")),
                _ => "TBD".to_string(),
            }
        };
        Some(format!("{} vs {}", describe(arrivals[0]), describe(arrivals[1])))
    }
}

fn arrival(feed: Feed, resolved: &[Resolved]) -> Arrival {
    match feed {
        Feed::Entrant(rank) => Arrival::Entrant(rank),
        Feed::Bye => Arrival::Nobody,
        Feed::Winner(node) => match resolved[node] {
            Resolved::Played(_) => Arrival::WinnerOf(node),
            Resolved::Skipped(through) => through,
        },
        Feed::Loser(node) => match resolved[node] {
            Resolved::Played(_) => Arrival::LoserOf(node),
            Resolved::Skipped(_) => Arrival::Nobody,
        },
    }
}
