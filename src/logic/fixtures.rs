//! Fixture generation: seeding, the format's generator, then validation.

use crate::logic::elimination::{double_elimination, single_elimination};
use crate::logic::group_stage::group_to_knockout;
use crate::logic::round_robin::round_robin;
use crate::logic::seeding::{apply_seeding, SeedingMethod};
use crate::logic::swiss::swiss_first_round;
use crate::logic::validation::validate_fixtures;
use crate::models::{
    FormatType, ManualSeed, Match, Participant, Tournament, TournamentConstraints, TournamentError,
    TournamentStatus,
};
use rand::Rng;

/// Build the full fixture list for the constraints' format.
///
/// Seeds `participants` in place (see `apply_seeding`) before generating. The
/// caller is responsible for the tournament's registration state and for
/// running this at most once per tournament.
pub fn generate_fixtures<R: Rng + ?Sized>(
    constraints: &TournamentConstraints,
    participants: &mut [Participant],
    method: SeedingMethod,
    manual_seeds: &[ManualSeed],
    rng: &mut R,
) -> Result<Vec<Match>, TournamentError> {
    if participants.len() < 2 {
        return Err(TournamentError::InsufficientParticipants(participants.len()));
    }
    if constraints.format == FormatType::Custom {
        return Err(TournamentError::UnsupportedFormat(constraints.format));
    }

    apply_seeding(participants, method, manual_seeds, rng);

    let config = &constraints.format_config;
    let fixtures = match constraints.format {
        FormatType::SingleElimination => single_elimination(participants, config)?,
        FormatType::DoubleElimination => double_elimination(participants)?,
        FormatType::RoundRobin => round_robin(participants),
        FormatType::GroupToKnockout => group_to_knockout(participants, config)?,
        FormatType::Swiss => swiss_first_round(participants),
        FormatType::Custom => return Err(TournamentError::UnsupportedFormat(constraints.format)),
    };

    validate_fixtures(&fixtures, constraints)?;
    log::info!(
        "Generated {} fixtures for {} participants ({} format)",
        fixtures.len(),
        participants.len(),
        constraints.format
    );
    Ok(fixtures)
}

/// Generate and store fixtures for a tournament (RegistrationClosed -> InProgress).
///
/// With manual seeding and no explicit seeds, seeds carried by the participants
/// (for example from a roster import) are used.
pub fn generate_tournament_fixtures<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    method: SeedingMethod,
    manual_seeds: &[ManualSeed],
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::RegistrationClosed {
        return Err(TournamentError::InvalidState(tournament.status));
    }

    let carried: Vec<ManualSeed>;
    let manual_seeds = if method == SeedingMethod::Manual && manual_seeds.is_empty() {
        carried = tournament
            .participants
            .iter()
            .filter_map(|p| p.seed.map(|seed| ManualSeed { participant_id: p.id, seed }))
            .collect();
        &carried[..]
    } else {
        manual_seeds
    };

    let fixtures = generate_fixtures(
        &tournament.constraints,
        &mut tournament.participants,
        method,
        manual_seeds,
        rng,
    )?;
    tournament.matches = fixtures;
    tournament.status = TournamentStatus::InProgress;
    Ok(())
}
