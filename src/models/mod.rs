//! Data structures for tournament planning: constraints, participants, matches, tournament state.

mod constraints;
mod fixture;
mod participant;
mod tournament;

pub use constraints::{
    DayHours, FormatConfig, FormatType, OperationalHours, TournamentConstraints, MAX_BUFFER_TIME,
    MAX_MATCH_DURATION, MIN_MATCH_DURATION,
};
pub use fixture::{Match, MatchId, MatchStatus, Stage};
pub use participant::{ManualSeed, Participant, ParticipantId};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentStatus};
