//! Participant data structure and manual seed entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in matches and lookups).
pub type ParticipantId = Uuid;

/// A registered participant (individual or team).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// 1-based seed; `None` until seeding assigns one.
    pub seed: Option<u32>,
    pub wins: u32,
    pub losses: u32,
}

impl Participant {
    /// Create a new unseeded participant with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            seed: None,
            wins: 0,
            losses: 0,
        }
    }

    /// Same as `new`, carrying a seed requested at registration.
    pub fn with_seed(name: impl Into<String>, seed: Option<u32>) -> Self {
        Self {
            seed,
            ..Self::new(name)
        }
    }

    /// Record a match win for this participant.
    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    /// Record a match loss for this participant.
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }
}

/// Organizer-chosen seed for one participant (manual seeding).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ManualSeed {
    pub participant_id: ParticipantId,
    pub seed: u32,
}
