//! Match (fixture), Stage, and MatchStatus.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Part of the tournament a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Single elimination bracket or round robin.
    Main,
    ThirdPlace,
    /// Double elimination: upper bracket.
    Winners,
    /// Double elimination: lower bracket.
    Losers,
    GrandFinal,
    Group,
    Knockout,
    Swiss,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single fixture. Participant slots may be empty while waiting on an earlier result.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round_number: u32,
    /// Sequential within one generation call, starting at 1.
    pub match_number: u32,
    pub stage: Stage,
    pub group_name: Option<String>,
    pub participant_1: Option<ParticipantId>,
    pub participant_2: Option<ParticipantId>,
    pub status: MatchStatus,
    /// None if not yet played.
    pub winner: Option<ParticipantId>,
    /// Match the winner advances into. Always in a later round.
    pub next_match_id: Option<MatchId>,
    /// Match the loser drops into (double elimination, third-place match).
    pub loser_next_match_id: Option<MatchId>,
    /// Where pending participants will come from, e.g. "Winner Group A".
    pub notes: Option<String>,
}

impl Match {
    pub fn new(round_number: u32, match_number: u32, stage: Stage) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_number,
            match_number,
            stage,
            group_name: None,
            participant_1: None,
            participant_2: None,
            status: MatchStatus::Pending,
            winner: None,
            next_match_id: None,
            loser_next_match_id: None,
            notes: None,
        }
    }

    /// Set both participant slots.
    pub fn between(mut self, participant_1: ParticipantId, participant_2: ParticipantId) -> Self {
        self.participant_1 = Some(participant_1);
        self.participant_2 = Some(participant_2);
        self
    }

    pub fn in_group(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    /// Both participants known and no result yet.
    pub fn is_ready(&self) -> bool {
        self.status == MatchStatus::Pending
            && self.participant_1.is_some()
            && self.participant_2.is_some()
    }

    pub fn involves(&self, participant_id: ParticipantId) -> bool {
        self.participant_1 == Some(participant_id) || self.participant_2 == Some(participant_id)
    }

    /// The participant facing `participant_id`, if both slots are filled.
    pub fn opponent_of(&self, participant_id: ParticipantId) -> Option<ParticipantId> {
        match (self.participant_1, self.participant_2) {
            (Some(a), Some(b)) if a == participant_id => Some(b),
            (Some(a), Some(b)) if b == participant_id => Some(a),
            _ => None,
        }
    }

    /// Fill the first empty participant slot. Returns false when both are taken.
    pub fn fill_open_slot(&mut self, participant_id: ParticipantId) -> bool {
        if self.participant_1.is_none() {
            self.participant_1 = Some(participant_id);
            true
        } else if self.participant_2.is_none() {
            self.participant_2 = Some(participant_id);
            true
        } else {
            false
        }
    }
}
