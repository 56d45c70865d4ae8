//! Tournament business logic: capacity, seeding, fixture generation, registration, results.

mod bracket;
mod capacity;
mod elimination;
mod fixtures;
mod group_stage;
mod knockout;
mod progression;
mod registration;
mod round_robin;
mod seeding;
mod swiss;
mod validation;

pub use bracket::bracket_positions;
pub use capacity::{calculate_capacity, CapacityBreakdown, DEFAULT_SWISS_ROUNDS};
pub use elimination::{double_elimination, single_elimination};
pub use fixtures::{generate_fixtures, generate_tournament_fixtures};
pub use group_stage::{group_to_knockout, DEFAULT_GROUP_SIZE};
pub use progression::{advance_winner, record_match_winner, MatchOutcome};
pub use registration::{close_registration, import_roster, publish_tournament};
pub use round_robin::round_robin;
pub use seeding::{apply_seeding, SeedingMethod};
pub use swiss::swiss_first_round;
pub use validation::validate_fixtures;
