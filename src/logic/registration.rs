//! Registration phase: publish, roster import, close (Draft -> RegistrationOpen -> RegistrationClosed).

use crate::models::{ParticipantId, Tournament, TournamentError, TournamentStatus};
use serde::Deserialize;

/// Open registration on a Draft tournament.
pub fn publish_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Draft {
        return Err(TournamentError::InvalidState(tournament.status));
    }
    tournament.status = TournamentStatus::RegistrationOpen;
    log::info!(
        "Tournament {} open for registration (capacity {})",
        tournament.id,
        tournament.capacity_limit
    );
    Ok(())
}

/// Close registration; requires at least 2 participants so fixtures can be generated.
pub fn close_registration(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::RegistrationOpen {
        return Err(TournamentError::InvalidState(tournament.status));
    }
    if tournament.participants.len() < 2 {
        return Err(TournamentError::InsufficientParticipants(tournament.participants.len()));
    }
    tournament.status = TournamentStatus::RegistrationClosed;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    seed: Option<u32>,
}

/// Register every row of a CSV roster (header `name,seed`; seed optional).
///
/// All or nothing: a malformed row, duplicate name, or overflow leaves the
/// tournament untouched.
pub fn import_roster(tournament: &mut Tournament, csv_text: &str) -> Result<Vec<ParticipantId>, TournamentError> {
    if tournament.status != TournamentStatus::RegistrationOpen {
        return Err(TournamentError::InvalidState(tournament.status));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());
    let rows = reader
        .deserialize::<RosterRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TournamentError::InvalidRoster(e.to_string()))?;

    let mut staged = tournament.clone();
    let ids = rows
        .into_iter()
        .map(|row| staged.add_seeded_participant(row.name, row.seed))
        .collect::<Result<Vec<_>, _>>()?;
    *tournament = staged;
    log::info!("Imported {} participants into tournament {}", ids.len(), tournament.id);
    Ok(ids)
}
