//! Integration tests for the tournament lifecycle: registration, fixtures, and results.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_planner::{
    close_registration, generate_tournament_fixtures, import_roster, publish_tournament,
    record_match_winner, DayHours, FormatConfig, FormatType, MatchStatus, OperationalHours,
    SeedingMethod, Stage, Tournament, TournamentConstraints, TournamentError, TournamentStatus,
};
use uuid::Uuid;

/// One day, 09:00-17:00, one venue: 12 venue slots, capped at `per_day` matches.
fn constraints(format: FormatType, per_day: u32) -> TournamentConstraints {
    let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    let mut hours = OperationalHours::new();
    hours.insert("saturday".to_string(), DayHours::new("09:00", "17:00"));
    TournamentConstraints {
        start_date: date,
        end_date: date,
        timezone: "UTC".to_string(),
        max_matches_per_day: per_day,
        operational_hours: hours,
        avg_match_duration: 30,
        buffer_time: 10,
        venue_count: 1,
        format,
        format_config: FormatConfig::default(),
    }
}

fn open_tournament(format: FormatType, per_day: u32) -> Tournament {
    let mut t = Tournament::new("Spring Open", constraints(format, per_day)).unwrap();
    publish_tournament(&mut t).unwrap();
    t
}

fn started(format: FormatType, per_day: u32, n: usize) -> Tournament {
    let mut t = open_tournament(format, per_day);
    for i in 0..n {
        t.add_participant(format!("Player {i}")).unwrap();
    }
    close_registration(&mut t).unwrap();
    generate_tournament_fixtures(&mut t, SeedingMethod::AsRegistered, &[], &mut StdRng::seed_from_u64(5))
        .unwrap();
    t
}

/// Report results until nothing is ready; player 1 always wins. Returns matches played.
fn play_out(t: &mut Tournament) -> usize {
    let mut played = 0;
    loop {
        let ready = t.matches.iter().find(|m| m.is_ready()).map(|m| (m.id, m.participant_1));
        let Some((id, Some(winner))) = ready else {
            break;
        };
        record_match_winner(t, id, winner).unwrap();
        played += 1;
    }
    played
}

#[test]
fn new_computes_capacity_and_starts_in_draft() {
    let t = Tournament::new("  Spring Open ", constraints(FormatType::SingleElimination, 4)).unwrap();
    assert_eq!(t.name, "Spring Open");
    assert_eq!(t.capacity_limit, 5);
    assert_eq!(t.status, TournamentStatus::Draft);
    assert!(t.participants.is_empty() && t.matches.is_empty());
}

#[test]
fn new_rejects_bad_name_and_tight_constraints() {
    let c = constraints(FormatType::SingleElimination, 4);
    assert!(matches!(Tournament::new("ab", c), Err(TournamentError::InvalidName)));
    assert!(matches!(
        Tournament::new("Spring Open", constraints(FormatType::Swiss, 4)),
        Err(TournamentError::InvalidConstraints(_))
    ));
}

#[test]
fn registration_requires_open_state() {
    let mut t = Tournament::new("Spring Open", constraints(FormatType::SingleElimination, 4)).unwrap();
    assert_eq!(
        t.add_participant("Ann"),
        Err(TournamentError::InvalidState(TournamentStatus::Draft))
    );
    publish_tournament(&mut t).unwrap();
    assert_eq!(t.status, TournamentStatus::RegistrationOpen);
    assert_eq!(
        publish_tournament(&mut t),
        Err(TournamentError::InvalidState(TournamentStatus::RegistrationOpen))
    );
}

#[test]
fn names_are_unique_ignoring_case() {
    let mut t = open_tournament(FormatType::SingleElimination, 4);
    t.add_participant("Ann").unwrap();
    assert_eq!(t.add_participant(" ANN "), Err(TournamentError::DuplicateParticipantName));
    assert_eq!(t.add_participant("   "), Err(TournamentError::InvalidName));
    assert_eq!(t.participants.len(), 1);
}

#[test]
fn registration_stops_at_capacity() {
    let mut t = open_tournament(FormatType::SingleElimination, 4);
    for i in 0..5 {
        t.add_participant(format!("Player {i}")).unwrap();
    }
    assert_eq!(t.add_participant("Late"), Err(TournamentError::TournamentFull(5)));
}

#[test]
fn remove_participant() {
    let mut t = open_tournament(FormatType::SingleElimination, 4);
    let ann = t.add_participant("Ann").unwrap();
    t.add_participant("Bob").unwrap();
    t.remove_participant(ann).unwrap();
    assert_eq!(t.participants.len(), 1);
    assert_eq!(t.remove_participant(ann), Err(TournamentError::ParticipantNotFound(ann)));
}

#[test]
fn close_needs_two_participants() {
    let mut t = open_tournament(FormatType::SingleElimination, 4);
    t.add_participant("Ann").unwrap();
    assert_eq!(close_registration(&mut t), Err(TournamentError::InsufficientParticipants(1)));
    t.add_participant("Bob").unwrap();
    close_registration(&mut t).unwrap();
    assert_eq!(t.status, TournamentStatus::RegistrationClosed);
    assert_eq!(
        t.add_participant("Cat"),
        Err(TournamentError::InvalidState(TournamentStatus::RegistrationClosed))
    );
}

#[test]
fn fixtures_are_generated_once_after_close() {
    let mut t = open_tournament(FormatType::SingleElimination, 4);
    for name in ["Ann", "Bob", "Cat", "Dan", "Eve"] {
        t.add_participant(name).unwrap();
    }
    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(
        generate_tournament_fixtures(&mut t, SeedingMethod::Random, &[], &mut rng),
        Err(TournamentError::InvalidState(TournamentStatus::RegistrationOpen))
    );

    close_registration(&mut t).unwrap();
    generate_tournament_fixtures(&mut t, SeedingMethod::Random, &[], &mut rng).unwrap();
    assert_eq!(t.status, TournamentStatus::InProgress);
    assert_eq!(t.matches.len(), 4);
    let mut seeds: Vec<u32> = t.participants.iter().filter_map(|p| p.seed).collect();
    seeds.sort_unstable();
    assert_eq!(seeds, [1, 2, 3, 4, 5]);

    assert_eq!(
        generate_tournament_fixtures(&mut t, SeedingMethod::Random, &[], &mut rng),
        Err(TournamentError::InvalidState(TournamentStatus::InProgress))
    );
    assert_eq!(t.matches.len(), 4);
}

#[test]
fn import_roster_registers_rows_with_seeds() {
    let mut t = open_tournament(FormatType::SingleElimination, 4);
    let csv = "name,seed\nAlice, 2\nBob,\nCarol,1\n";
    let ids = import_roster(&mut t, csv).unwrap();
    assert_eq!(ids.len(), 3);
    let seeds: Vec<(&str, Option<u32>)> = t.participants.iter().map(|p| (p.name.as_str(), p.seed)).collect();
    assert_eq!(seeds, [("Alice", Some(2)), ("Bob", None), ("Carol", Some(1))]);

    // Manual seeding without explicit seeds uses the imported ones.
    close_registration(&mut t).unwrap();
    generate_tournament_fixtures(&mut t, SeedingMethod::Manual, &[], &mut StdRng::seed_from_u64(5)).unwrap();
    let order: Vec<&str> = t.participants.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(order, ["Carol", "Alice", "Bob"]);
    // Top seed Carol has the bye; Alice and Bob open.
    let first = &t.matches[0];
    assert_eq!(first.round_number, 1);
    assert!(!first.involves(t.participants[0].id));
}

#[test]
fn import_roster_is_all_or_nothing() {
    let mut t = open_tournament(FormatType::SingleElimination, 4);
    t.add_participant("Bob").unwrap();

    assert_eq!(
        import_roster(&mut t, "name,seed\nAlice,1\nbob,2\n"),
        Err(TournamentError::DuplicateParticipantName)
    );
    assert!(matches!(
        import_roster(&mut t, "name,seed\nAlice,first\n"),
        Err(TournamentError::InvalidRoster(_))
    ));
    assert_eq!(
        import_roster(&mut t, "name\nA1\nA2\nA3\nA4\nA5\n"),
        Err(TournamentError::TournamentFull(5))
    );
    assert_eq!(t.participants.len(), 1);
}

#[test]
fn results_advance_winners_and_complete_tournament() {
    let mut t = started(FormatType::SingleElimination, 4, 5);
    assert_eq!(play_out(&mut t), 4);
    assert_eq!(t.status, TournamentStatus::Completed);
    assert!(t.matches.iter().all(|m| m.status == MatchStatus::Completed && m.winner.is_some()));

    let unbeaten: Vec<_> = t.participants.iter().filter(|p| p.losses == 0).collect();
    assert_eq!(unbeaten.len(), 1);
    let final_match = t.matches.iter().find(|m| m.next_match_id.is_none()).unwrap();
    assert_eq!(final_match.winner, Some(unbeaten[0].id));
    assert_eq!(t.participants.iter().map(|p| p.losses).sum::<u32>(), 4);
}

#[test]
fn double_elimination_plays_through_grand_final() {
    let mut t = started(FormatType::DoubleElimination, 20, 4);
    assert_eq!(t.matches.len(), 6);
    assert_eq!(play_out(&mut t), 6);
    assert_eq!(t.status, TournamentStatus::Completed);

    let grand_final = t.matches.iter().find(|m| m.stage == Stage::GrandFinal).unwrap();
    assert!(grand_final.winner.is_some());
    // No bracket reset: the champion is unbeaten and everyone else lost twice.
    let champion = grand_final.winner.unwrap();
    for p in &t.participants {
        let expected = if p.id == champion { 0 } else { 2 };
        assert_eq!(p.losses, expected, "{}", p.name);
    }
}

#[test]
fn result_errors() {
    let mut t = started(FormatType::SingleElimination, 4, 4);
    let semi = t.matches[0].clone();
    let final_id = semi.next_match_id.unwrap();
    let a = semi.participant_1.unwrap();

    assert_eq!(
        record_match_winner(&mut t, final_id, a),
        Err(TournamentError::MatchNotReady(final_id))
    );
    let stranger = Uuid::new_v4();
    assert_eq!(
        record_match_winner(&mut t, semi.id, stranger),
        Err(TournamentError::NotInMatch { match_id: semi.id, participant_id: stranger })
    );
    let unknown = Uuid::new_v4();
    assert_eq!(
        record_match_winner(&mut t, unknown, a),
        Err(TournamentError::MatchNotFound(unknown))
    );

    record_match_winner(&mut t, semi.id, a).unwrap();
    assert_eq!(
        record_match_winner(&mut t, semi.id, a),
        Err(TournamentError::MatchNotReady(semi.id))
    );
    let final_match = t.matches.iter().find(|m| m.id == final_id).unwrap();
    assert_eq!(final_match.participant_1, Some(a));
}

#[test]
fn results_need_a_started_tournament() {
    let mut t = open_tournament(FormatType::SingleElimination, 4);
    assert_eq!(
        record_match_winner(&mut t, Uuid::new_v4(), Uuid::new_v4()),
        Err(TournamentError::InvalidState(TournamentStatus::RegistrationOpen))
    );
}

#[test]
fn swiss_stays_in_progress_after_first_round() {
    let mut t = started(FormatType::Swiss, 10, 4);
    assert_eq!(play_out(&mut t), 2);
    assert_eq!(t.status, TournamentStatus::InProgress);
}
