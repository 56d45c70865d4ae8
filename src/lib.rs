//! Tournament planner: capacity calculation and fixture generation, with models and host-side logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_winner, apply_seeding, bracket_positions, calculate_capacity, close_registration,
    double_elimination, generate_fixtures, generate_tournament_fixtures, group_to_knockout,
    import_roster, publish_tournament, record_match_winner, round_robin, single_elimination,
    swiss_first_round, validate_fixtures, CapacityBreakdown, MatchOutcome, SeedingMethod,
};
pub use models::{
    DayHours, FormatConfig, FormatType, ManualSeed, Match, MatchId, MatchStatus, OperationalHours,
    Participant, ParticipantId, Stage, Tournament, TournamentConstraints, TournamentError,
    TournamentId, TournamentStatus,
};
