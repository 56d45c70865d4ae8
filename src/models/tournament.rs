//! Tournament, TournamentStatus, and TournamentError.

use crate::logic::calculate_capacity;
use crate::models::constraints::{FormatType, TournamentConstraints};
use crate::models::fixture::{Match, MatchId};
use crate::models::participant::{Participant, ParticipantId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors from capacity calculation, fixture generation, and tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Capacity below 2, or malformed constraint data.
    #[error("Invalid tournament constraints: {0}")]
    InvalidConstraints(String),
    /// Bracket positions requested for a size that is not a power of two >= 2.
    #[error("Bracket size {0} is not a power of two of at least 2")]
    InvalidSize(usize),
    #[error("Need at least 2 participants to generate fixtures (have {0})")]
    InsufficientParticipants(usize),
    #[error("Unsupported tournament format: {0}")]
    UnsupportedFormat(FormatType),
    #[error("{generated} fixtures generated but capacity only allows {allowed} matches")]
    CapacityExceeded { generated: usize, allowed: u64 },
    /// A progression link points nowhere, backwards, or into a full match.
    #[error("Broken progression link on match {0}")]
    BrokenProgression(MatchId),
    /// Tournament is not in a state that allows this action.
    #[error("Invalid state for this action (tournament is {0})")]
    InvalidState(TournamentStatus),
    #[error("Tournament name must be between 3 and 255 characters")]
    InvalidName,
    /// Names are unique, case-insensitive.
    #[error("A participant with this name already exists")]
    DuplicateParticipantName,
    #[error("Tournament is full ({0} participants)")]
    TournamentFull(u32),
    #[error("Participant not found")]
    ParticipantNotFound(ParticipantId),
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
    #[error("Match not found")]
    MatchNotFound(MatchId),
    /// Match already decided or still waiting on a participant.
    #[error("Match is not ready for a result")]
    MatchNotReady(MatchId),
    #[error("Participant does not play in this match")]
    NotInMatch {
        match_id: MatchId,
        participant_id: ParticipantId,
    },
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of a tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Created with a computed capacity; not yet visible.
    #[default]
    Draft,
    RegistrationOpen,
    /// Fixtures may be generated, exactly once.
    RegistrationClosed,
    InProgress,
    Completed,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TournamentStatus::Draft => "draft",
            TournamentStatus::RegistrationOpen => "registration_open",
            TournamentStatus::RegistrationClosed => "registration_closed",
            TournamentStatus::InProgress => "in_progress",
            TournamentStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// A tournament with its constraints, registrations, and generated fixtures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub constraints: TournamentConstraints,
    /// Participant capacity computed from the constraints at creation.
    pub capacity_limit: u32,
    pub status: TournamentStatus,
    pub participants: Vec<Participant>,
    /// Empty until fixtures are generated.
    pub matches: Vec<Match>,
}

impl Tournament {
    /// Create a tournament in Draft, computing its capacity. Fails if the constraints
    /// are malformed or support fewer than 2 participants.
    pub fn new(name: impl Into<String>, constraints: TournamentConstraints) -> Result<Self, TournamentError> {
        let name = name.into().trim().to_string();
        if !(3..=255).contains(&name.chars().count()) {
            return Err(TournamentError::InvalidName);
        }
        let capacity_limit = calculate_capacity(&constraints)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            constraints,
            capacity_limit,
            status: TournamentStatus::Draft,
            participants: Vec::new(),
            matches: Vec::new(),
        })
    }

    pub fn get_participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    /// Register a participant (RegistrationOpen only). Names must be unique (case-insensitive)
    /// and the tournament must be below its capacity.
    pub fn add_participant(&mut self, name: impl Into<String>) -> Result<ParticipantId, TournamentError> {
        self.add_seeded_participant(name, None)
    }

    /// As `add_participant`, keeping a seed requested at registration for manual seeding.
    pub fn add_seeded_participant(
        &mut self,
        name: impl Into<String>,
        seed: Option<u32>,
    ) -> Result<ParticipantId, TournamentError> {
        if self.status != TournamentStatus::RegistrationOpen {
            return Err(TournamentError::InvalidState(self.status));
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::InvalidName);
        }
        let is_duplicate = self
            .participants
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateParticipantName);
        }
        if self.participants.len() >= self.capacity_limit as usize {
            return Err(TournamentError::TournamentFull(self.capacity_limit));
        }
        let participant = Participant::with_seed(name_trimmed, seed);
        let id = participant.id;
        self.participants.push(participant);
        Ok(id)
    }

    /// Remove a participant by id (RegistrationOpen only).
    pub fn remove_participant(&mut self, participant_id: ParticipantId) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::RegistrationOpen {
            return Err(TournamentError::InvalidState(self.status));
        }
        let idx = self
            .participants
            .iter()
            .position(|p| p.id == participant_id)
            .ok_or(TournamentError::ParticipantNotFound(participant_id))?;
        self.participants.remove(idx);
        Ok(())
    }
}
