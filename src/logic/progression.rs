//! Match results: move winners (and double-elimination losers) along their progression links.

use crate::models::{
    FormatType, Match, MatchId, MatchStatus, ParticipantId, Tournament, TournamentError, TournamentStatus,
};

/// Who won and lost a decided match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchOutcome {
    pub winner: ParticipantId,
    pub loser: ParticipantId,
}

fn place(fixtures: &mut [Match], from: MatchId, target: MatchId, participant: ParticipantId) -> Result<(), TournamentError> {
    let next = fixtures
        .iter_mut()
        .find(|m| m.id == target)
        .ok_or(TournamentError::BrokenProgression(from))?;
    if next.fill_open_slot(participant) {
        Ok(())
    } else {
        Err(TournamentError::BrokenProgression(from))
    }
}

/// Decide a match and fill the next matches' open slots with its winner and loser.
///
/// The match must be pending with both participants set, and `winner` must be one of them.
pub fn advance_winner(
    fixtures: &mut [Match],
    match_id: MatchId,
    winner: ParticipantId,
) -> Result<MatchOutcome, TournamentError> {
    let idx = fixtures
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let m = &fixtures[idx];
    if !m.is_ready() {
        return Err(TournamentError::MatchNotReady(match_id));
    }
    let loser = m.opponent_of(winner).ok_or(TournamentError::NotInMatch {
        match_id,
        participant_id: winner,
    })?;
    let (next, loser_next) = (m.next_match_id, m.loser_next_match_id);
    // Check destinations before deciding anything.
    for target in [next, loser_next].into_iter().flatten() {
        let open = fixtures
            .iter()
            .any(|n| n.id == target && (n.participant_1.is_none() || n.participant_2.is_none()));
        if !open {
            return Err(TournamentError::BrokenProgression(match_id));
        }
    }

    fixtures[idx].winner = Some(winner);
    fixtures[idx].status = MatchStatus::Completed;
    if let Some(target) = next {
        place(fixtures, match_id, target, winner)?;
    }
    if let Some(target) = loser_next {
        place(fixtures, match_id, target, loser)?;
    }
    Ok(MatchOutcome { winner, loser })
}

/// Record a result on an InProgress tournament and update both participants' stats.
///
/// The tournament completes once every match is decided (Swiss excepted: its
/// later rounds are paired elsewhere).
pub fn record_match_winner(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner: ParticipantId,
) -> Result<MatchOutcome, TournamentError> {
    if tournament.status != TournamentStatus::InProgress {
        return Err(TournamentError::InvalidState(tournament.status));
    }
    let outcome = advance_winner(&mut tournament.matches, match_id, winner)?;

    tournament
        .get_participant_mut(outcome.winner)
        .ok_or(TournamentError::ParticipantNotFound(outcome.winner))?
        .add_win();
    tournament
        .get_participant_mut(outcome.loser)
        .ok_or(TournamentError::ParticipantNotFound(outcome.loser))?
        .add_loss();

    let all_decided = tournament.matches.iter().all(|m| m.status == MatchStatus::Completed);
    if all_decided && tournament.constraints.format != FormatType::Swiss {
        tournament.status = TournamentStatus::Completed;
        log::info!("Tournament {} completed", tournament.id);
    }
    Ok(outcome)
}
