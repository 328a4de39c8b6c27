//! Round/cycle scheduler: runs the balancer and composer over the requested rounds.

use crate::logic::matching::{compose_matches, record_match};
use crate::logic::pairing::select_round_pairings;
use crate::models::{
    validate_roster, Match, MatchHistory, RestCounts, Round, Schedule, ScheduleError, ScheduleMode,
    ScheduleSettings,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Players on one court.
pub const PLAYERS_PER_COURT: usize = 4;

/// Fewest players single-court mode can pair.
pub const MIN_SINGLE_COURT_PLAYERS: usize = 2;

/// Most courts a roster can fill (never below 1).
pub fn max_courts(player_count: usize) -> usize {
    (player_count / PLAYERS_PER_COURT).max(1)
}

/// Rounds played from one shuffle of the roster in multi-court mode: games per player per
/// cycle, plus one if the roster does not split evenly over the courts.
pub fn cycle_length(player_count: usize, courts: usize) -> usize {
    let seats = courts * PLAYERS_PER_COURT;
    if player_count == 0 || seats == 0 {
        return 1;
    }
    let games = seats / player_count;
    let rests = usize::from(player_count % seats != 0);
    (games + rests).max(1)
}

/// Generate a fresh schedule in the mode the settings ask for.
pub fn generate_schedule<S: AsRef<str>, R: Rng + ?Sized>(
    players: &[S],
    settings: &ScheduleSettings,
    rng: &mut R,
) -> Result<Schedule, ScheduleError> {
    match settings.mode {
        ScheduleMode::SingleCourt => generate_single_court_schedule(players, settings.rounds, rng),
        ScheduleMode::MultiCourt => {
            generate_multi_court_schedule(players, settings.rounds, settings.courts, rng)
        }
    }
}

/// New schedule for the current roster (late additions included) with the same settings.
/// Counters start fresh; late additions become regular players.
pub fn regenerate_schedule<R: Rng + ?Sized>(
    schedule: &Schedule,
    rng: &mut R,
) -> Result<Schedule, ScheduleError> {
    generate_schedule(&schedule.players, &schedule.settings, rng)
}

/// Every round pairs the whole roster (one player rests when the count is odd) and then
/// composes the pairings into matches.
pub fn generate_single_court_schedule<S: AsRef<str>, R: Rng + ?Sized>(
    players: &[S],
    rounds: usize,
    rng: &mut R,
) -> Result<Schedule, ScheduleError> {
    if rounds == 0 {
        return Err(ScheduleError::InvalidRoundCount);
    }
    let players = validate_roster(players)?;
    if players.len() < MIN_SINGLE_COURT_PLAYERS {
        return Err(ScheduleError::InsufficientPlayers {
            required: MIN_SINGLE_COURT_PLAYERS,
            found: players.len(),
        });
    }

    let settings = ScheduleSettings::new(rounds, 1).with_mode(ScheduleMode::SingleCourt);
    let mut schedule = Schedule::new(players, settings);
    let mut history = MatchHistory::new();

    for round_number in 1..=rounds {
        let (pairings, resting) = select_round_pairings(
            &schedule.players,
            &mut schedule.pairing_counts,
            &schedule.rest_counts,
            rng,
        );
        let composed = compose_matches(pairings, &mut history, &mut schedule.matchup_counts);
        if let Some(p) = &resting {
            *schedule.rest_counts.entry(p.clone()).or_insert(0) += 1;
        }
        log::debug!(
            "round {}: {} match(es), resting {:?}",
            round_number,
            composed.matches.len(),
            resting
        );
        schedule.rounds.push(Round {
            matches: composed.matches,
            resting: resting.into_iter().collect(),
            unmatched: composed.unmatched,
        });
    }

    log::info!(
        "generated single-court schedule {}: {} players, {} rounds",
        schedule.id,
        schedule.players.len(),
        rounds
    );
    Ok(schedule)
}

/// Fill `courts` courts with 4 players each, every round; the rest sit out.
///
/// The roster is reshuffled every [`cycle_length`] rounds, with the players who rested
/// most drawn first. Within a cycle, those who rested are drawn first in the next round.
/// Each group of 4 is split into teams by the balancer (rest tracking off) and forms one
/// match without composer scoring.
pub fn generate_multi_court_schedule<S: AsRef<str>, R: Rng + ?Sized>(
    players: &[S],
    rounds: usize,
    courts: usize,
    rng: &mut R,
) -> Result<Schedule, ScheduleError> {
    if rounds == 0 {
        return Err(ScheduleError::InvalidRoundCount);
    }
    let players = validate_roster(players)?;
    let n = players.len();
    if n < PLAYERS_PER_COURT {
        return Err(ScheduleError::InsufficientPlayers {
            required: PLAYERS_PER_COURT,
            found: n,
        });
    }
    if courts == 0 || courts * PLAYERS_PER_COURT > n {
        return Err(ScheduleError::InvalidCourtCount {
            courts,
            max: max_courts(n),
        });
    }

    let settings = ScheduleSettings::new(rounds, courts).with_mode(ScheduleMode::MultiCourt);
    let mut schedule = Schedule::new(players, settings);
    let mut history = MatchHistory::new();
    let no_rest_tracking = RestCounts::new();
    let cycle = cycle_length(n, courts);

    let mut played = 0;
    while played < rounds {
        let cycle_rounds = cycle.min(rounds - played);
        let mut pool = schedule.players.clone();
        pool.shuffle(rng);
        // Drawn from the back: fewest rests first in line to sit out.
        pool.sort_by_key(|p| schedule.rest_counts.get(p).copied().unwrap_or(0));

        for _ in 0..cycle_rounds {
            let mut matches = Vec::with_capacity(courts);
            for _ in 0..courts {
                if pool.len() < PLAYERS_PER_COURT {
                    break;
                }
                let group = pool.split_off(pool.len() - PLAYERS_PER_COURT);
                let (pairings, _) = select_round_pairings(
                    &group,
                    &mut schedule.pairing_counts,
                    &no_rest_tracking,
                    rng,
                );
                let mut teams = pairings.into_iter();
                if let (Some(team_1), Some(team_2)) = (teams.next(), teams.next()) {
                    let m = Match::new(team_1, team_2);
                    record_match(&m, &mut history, &mut schedule.matchup_counts);
                    matches.push(m);
                }
            }

            let resting = std::mem::take(&mut pool);
            for p in &resting {
                *schedule.rest_counts.entry(p.clone()).or_insert(0) += 1;
            }
            pool = matches
                .iter()
                .flat_map(|m| m.players())
                .map(str::to_string)
                .chain(resting.iter().cloned())
                .collect();

            log::debug!(
                "round {}: {} court(s) in play, resting {:?}",
                schedule.rounds.len() + 1,
                matches.len(),
                resting
            );
            schedule.rounds.push(Round {
                matches,
                resting,
                unmatched: Vec::new(),
            });
        }
        played += cycle_rounds;
    }

    log::info!(
        "generated multi-court schedule {}: {} players, {} courts, {} rounds",
        schedule.id,
        n,
        courts,
        rounds
    );
    Ok(schedule)
}
