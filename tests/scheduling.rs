//! Integration tests for pairing, match composition, and schedule generation.

use pickleball_scheduler::{
    choose_resting_player, compose_matches, cycle_length, generate_multi_court_schedule,
    generate_schedule, generate_single_court_schedule, insert_player, match_score, max_courts,
    regenerate_schedule, score_pairings, select_round_pairings, MatchHistory, PairCounts, Pairing,
    RestCounts, Schedule, ScheduleError, ScheduleMode, ScheduleSettings,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn roster(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

fn assert_rounds_well_formed(schedule: &Schedule) {
    for (i, round) in schedule.rounds.iter().enumerate() {
        let mut seen = HashSet::new();
        for p in round.participants() {
            assert!(seen.insert(p.to_string()), "round {i}: {p} plays twice");
        }
        for p in &round.resting {
            assert!(seen.insert(p.clone()), "round {i}: {p} both plays and rests");
        }
        for m in &round.matches {
            assert!(m.team_1.is_disjoint(&m.team_2));
            assert_ne!(m.team_1.first(), m.team_1.second());
            assert_ne!(m.team_2.first(), m.team_2.second());
        }
    }
}

#[test]
fn four_players_one_round_is_one_match_nobody_rests() {
    let mut rng = StdRng::seed_from_u64(1);
    let players = vec!["A", "B", "C", "D"];
    let s = generate_single_court_schedule(&players, 1, &mut rng).unwrap();
    assert_eq!(s.rounds.len(), 1);
    let round = &s.rounds[0];
    assert_eq!(round.matches.len(), 1);
    assert!(round.resting.is_empty());
    assert!(round.unmatched.is_empty());
    let mut on_court: Vec<&str> = round.participants().collect();
    on_court.sort();
    assert_eq!(on_court, vec!["A", "B", "C", "D"]);
    assert_rounds_well_formed(&s);
}

#[test]
fn five_players_one_round_one_rests() {
    let mut rng = StdRng::seed_from_u64(2);
    let players = vec!["A", "B", "C", "D", "E"];
    let s = generate_single_court_schedule(&players, 1, &mut rng).unwrap();
    let round = &s.rounds[0];
    assert_eq!(round.resting.len(), 1);
    assert_eq!(round.matches.len(), 1);
    assert_eq!(s.rest_count(&round.resting[0]), 1);
    assert_eq!(s.rest_counts.values().sum::<u32>(), 1);
    assert_rounds_well_formed(&s);
}

#[test]
fn rest_rotates_to_least_rested_players() {
    let mut rng = StdRng::seed_from_u64(3);
    let s = generate_single_court_schedule(&roster(5), 5, &mut rng).unwrap();
    // Five rounds, five players, minimum-rest choice: everybody rests exactly once.
    for p in &s.players {
        assert_eq!(s.rest_count(p), 1, "{p}");
    }
}

#[test]
fn six_players_leave_one_pairing_unmatched() {
    let mut rng = StdRng::seed_from_u64(4);
    let s = generate_single_court_schedule(&roster(6), 2, &mut rng).unwrap();
    for round in &s.rounds {
        assert_eq!(round.matches.len(), 1);
        assert_eq!(round.unmatched.len(), 1);
        assert!(round.resting.is_empty());
    }
}

#[test]
fn single_court_counters_match_rounds() {
    let mut rng = StdRng::seed_from_u64(5);
    let s = generate_single_court_schedule(&roster(9), 6, &mut rng).unwrap();
    assert_rounds_well_formed(&s);
    // 9 players: one rests, 4 pairings, 2 matches per round.
    assert_eq!(s.pairing_counts.total(), 6 * 4);
    assert_eq!(s.matchup_counts.total(), 6 * 2 * 4);
    assert_eq!(s.rest_counts.values().sum::<u32>(), 6);
}

#[test]
fn same_seed_same_schedule() {
    let players = roster(7);
    let a = generate_single_court_schedule(&players, 4, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = generate_single_court_schedule(&players, 4, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a.rounds, b.rounds);
    assert_eq!(a.pairing_counts, b.pairing_counts);
    assert_eq!(a.matchup_counts, b.matchup_counts);
    assert_eq!(a.rest_counts, b.rest_counts);
}

#[test]
fn roster_validation_errors() {
    let mut rng = StdRng::seed_from_u64(6);
    assert_eq!(
        generate_single_court_schedule(&["A"], 1, &mut rng).unwrap_err(),
        ScheduleError::InsufficientPlayers { required: 2, found: 1 }
    );
    assert_eq!(
        generate_single_court_schedule(&["A", "a", "B", "C"], 1, &mut rng).unwrap_err(),
        ScheduleError::DuplicatePlayerName("a".to_string())
    );
    assert_eq!(
        generate_single_court_schedule(&["A", "  ", "B", "C"], 1, &mut rng).unwrap_err(),
        ScheduleError::EmptyPlayerName
    );
    assert_eq!(
        generate_single_court_schedule(&roster(4), 0, &mut rng).unwrap_err(),
        ScheduleError::InvalidRoundCount
    );
    assert!(matches!(
        generate_single_court_schedule(&["A & B", "C", "D", "E"], 1, &mut rng),
        Err(ScheduleError::InvalidPlayerName(_))
    ));
}

#[test]
fn names_that_extend_the_match_separator_are_rejected() {
    let mut rng = StdRng::seed_from_u64(14);
    for name in ["vs.", " vs. ", "Bo vs.", "vs. Bo", "Al vs. Bo"] {
        assert_eq!(
            generate_single_court_schedule(&[name, "C", "D", "E"], 1, &mut rng).unwrap_err(),
            ScheduleError::InvalidPlayerName(name.trim().to_string()),
            "{name:?}"
        );
    }
    let mut s = generate_single_court_schedule(&roster(4), 1, &mut rng).unwrap();
    assert!(matches!(
        insert_player("Bo vs.", &mut s, &mut rng),
        Err(ScheduleError::InvalidPlayerName(_))
    ));
    assert_eq!(s.players.len(), 4);

    // Close to the separator but unambiguous.
    let s = generate_single_court_schedule(&["vs", "Ann vs", "vs.Bo", "Bo.vs."], 1, &mut rng)
        .unwrap();
    assert_eq!(s.players.len(), 4);
}

#[test]
fn regenerating_keeps_late_entries_and_settings() {
    let mut rng = StdRng::seed_from_u64(15);
    let mut s = generate_multi_court_schedule(&roster(8), 3, 2, &mut rng).unwrap();
    insert_player("Late", &mut s, &mut rng).unwrap();

    let fresh = regenerate_schedule(&s, &mut rng).unwrap();
    assert_ne!(fresh.id, s.id);
    assert_eq!(fresh.players, s.players);
    assert_eq!(fresh.settings, s.settings);
    assert!(fresh.late_additions.is_empty());
    assert_eq!(fresh.rounds.len(), 3);
    assert_rounds_well_formed(&fresh);
    for round in &fresh.rounds {
        assert!(round.is_resting("Late") || round.match_for("Late").is_some());
        assert_eq!(round.matches.len(), 2);
        assert_eq!(round.resting.len(), 1);
    }
}

#[test]
fn multi_court_rejects_too_many_courts() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(
        generate_multi_court_schedule(&roster(7), 3, 2, &mut rng).unwrap_err(),
        ScheduleError::InvalidCourtCount { courts: 2, max: 1 }
    );
    assert_eq!(
        generate_multi_court_schedule(&roster(3), 3, 1, &mut rng).unwrap_err(),
        ScheduleError::InsufficientPlayers { required: 4, found: 3 }
    );
    assert!(matches!(
        generate_multi_court_schedule(&roster(8), 3, 0, &mut rng),
        Err(ScheduleError::InvalidCourtCount { courts: 0, .. })
    ));
}

#[test]
fn multi_court_fills_courts_and_rests_the_rest() {
    let mut rng = StdRng::seed_from_u64(8);
    let s = generate_multi_court_schedule(&roster(10), 6, 2, &mut rng).unwrap();
    assert_eq!(s.rounds.len(), 6);
    assert_eq!(s.settings.mode, ScheduleMode::MultiCourt);
    assert_rounds_well_formed(&s);
    for round in &s.rounds {
        assert_eq!(round.matches.len(), 2);
        assert_eq!(round.resting.len(), 2);
        assert!(round.unmatched.is_empty());
    }
    assert_eq!(s.pairing_counts.total(), 6 * 2 * 2);
    assert_eq!(s.matchup_counts.total(), 6 * 2 * 4);
    assert_eq!(s.rest_counts.values().sum::<u32>(), 12);
}

#[test]
fn multi_court_everyone_plays_when_roster_fills_courts() {
    let mut rng = StdRng::seed_from_u64(9);
    let s = generate_multi_court_schedule(&roster(8), 3, 2, &mut rng).unwrap();
    for round in &s.rounds {
        assert!(round.resting.is_empty());
        assert_eq!(round.participants().count(), 8);
    }
}

#[test]
fn generate_schedule_dispatches_on_mode() {
    let mut rng = StdRng::seed_from_u64(10);
    let single = generate_schedule(&roster(8), &ScheduleSettings::new(2, 1), &mut rng).unwrap();
    assert_eq!(single.settings.mode, ScheduleMode::SingleCourt);
    assert_eq!(single.rounds[0].matches.len(), 2);

    let multi = generate_schedule(
        &roster(8),
        &ScheduleSettings::new(2, 1).with_mode(ScheduleMode::MultiCourt),
        &mut rng,
    )
    .unwrap();
    assert_eq!(multi.settings.mode, ScheduleMode::MultiCourt);
    assert_eq!(multi.rounds[0].matches.len(), 1);
    assert_eq!(multi.rounds[0].resting.len(), 4);
}

#[test]
fn cycle_and_court_limits() {
    assert_eq!(cycle_length(8, 2), 1);
    assert_eq!(cycle_length(10, 2), 1);
    assert_eq!(cycle_length(4, 1), 1);
    assert_eq!(max_courts(3), 1);
    assert_eq!(max_courts(9), 2);
    assert_eq!(max_courts(16), 4);
}

#[test]
fn resting_player_has_fewest_rests() {
    let mut rng = StdRng::seed_from_u64(11);
    let players: Vec<String> = roster(3);
    let mut rests = RestCounts::new();
    rests.insert("P0".into(), 2);
    rests.insert("P1".into(), 1);
    rests.insert("P2".into(), 1);
    for _ in 0..20 {
        let r = choose_resting_player(&players, &rests, &mut rng).unwrap();
        assert!(r == "P1" || r == "P2");
    }
}

#[test]
fn repeat_partnership_penalty_is_quadratic() {
    let mut counts = PairCounts::new();
    counts.increment("A", "B");
    counts.increment("B", "A");
    counts.increment("C", "D");
    let pairs = vec![Pairing::new("A", "B"), Pairing::new("D", "C"), Pairing::new("E", "F")];
    assert_eq!(score_pairings(&pairs, &counts), 4 * 10 + 10);
}

#[test]
fn balancer_commits_exactly_one_per_winning_pair() {
    let mut rng = StdRng::seed_from_u64(12);
    let players = roster(6);
    let mut counts = PairCounts::new();
    counts.increment("P0", "P1");
    let before = counts.clone();
    let (pairings, resting) =
        select_round_pairings(&players, &mut counts, &RestCounts::new(), &mut rng);
    assert!(resting.is_none());
    assert_eq!(pairings.len(), 3);
    for p in &pairings {
        assert_eq!(
            counts.get(p.first(), p.second()),
            before.get(p.first(), p.second()) + 1
        );
        assert_eq!(counts.get(p.second(), p.first()), counts.get(p.first(), p.second()));
    }
    assert_eq!(counts.total(), before.total() + 3);
}

#[test]
fn balancer_avoids_repeat_partners_when_it_can() {
    let mut rng = StdRng::seed_from_u64(13);
    let players = vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()];
    let mut counts = PairCounts::new();
    // A-B and C-D partnered heavily; A-C / B-D and A-D / B-C are fresh.
    for _ in 0..3 {
        counts.increment("A", "B");
        counts.increment("C", "D");
    }
    let (pairings, _) = select_round_pairings(&players, &mut counts, &RestCounts::new(), &mut rng);
    for p in &pairings {
        let key = p.key();
        assert_ne!(key, Pairing::new("A", "B").key());
        assert_ne!(key, Pairing::new("C", "D").key());
    }
}

#[test]
fn composer_prefers_unfaced_opponents() {
    let ab = Pairing::new("A", "B");
    let cd = Pairing::new("C", "D");
    let ef = Pairing::new("E", "F");
    let mut history = MatchHistory::new();
    history.record(&ab, &cd);
    let counts = PairCounts::new();
    assert_eq!(match_score(&ab, &cd, &history, &counts), 0);
    assert_eq!(match_score(&ab, &ef, &history, &counts), 10);

    let mut matchups = PairCounts::new();
    let composed = compose_matches(vec![ab.clone(), cd.clone(), ef.clone()], &mut history, &mut matchups);
    assert_eq!(composed.matches.len(), 1);
    assert_eq!(composed.matches[0].team_1, ab);
    assert_eq!(composed.matches[0].team_2, ef);
    assert_eq!(composed.unmatched, vec![cd]);
    assert!(history.has_faced(&ef, &ab));
    for (a, b) in [("A", "E"), ("A", "F"), ("B", "E"), ("B", "F")] {
        assert_eq!(matchups.get(a, b), 1);
        assert_eq!(matchups.get(b, a), 1);
    }
    assert_eq!(matchups.total(), 4);
}

#[test]
fn composer_balances_prior_opponent_exposure() {
    let ab = Pairing::new("A", "B");
    let cd = Pairing::new("C", "D");
    let ef = Pairing::new("E", "F");
    let gh = Pairing::new("G", "H");
    let mut history = MatchHistory::new();
    let mut matchups = PairCounts::new();
    matchups.increment("A", "C");
    matchups.increment("B", "D");
    let composed = compose_matches(vec![ab, cd, ef.clone(), gh], &mut history, &mut matchups);
    assert_eq!(composed.matches.len(), 2);
    assert_eq!(composed.matches[0].team_2, ef);
}

#[test]
fn composer_stops_when_no_pairings_are_disjoint() {
    let mut history = MatchHistory::new();
    let mut matchups = PairCounts::new();
    let composed = compose_matches(
        vec![Pairing::new("A", "B"), Pairing::new("A", "C"), Pairing::new("B", "C")],
        &mut history,
        &mut matchups,
    );
    assert!(composed.matches.is_empty());
    assert_eq!(composed.unmatched.len(), 3);
    assert!(matchups.is_empty());
}
