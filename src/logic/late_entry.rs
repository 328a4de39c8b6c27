//! Late entry: splice a newly registered player into every round of an existing schedule.

use crate::models::{validate_player_name, Match, Pairing, Schedule, ScheduleError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Add `name` to the roster and to every round already generated, past rounds included.
///
/// Counter entries for the newcomer are zero-initialized against every existing player first.
/// Then, per round:
/// - someone resting: the newcomer takes a random resting player's slot in the resting list
///   and the displaced player moves to the end of it;
/// - nobody resting: a random player of a random match is bumped to rest, and the other three
///   plus the newcomer are shuffled into two fresh teams (no balancer scoring). The rebuilt
///   match keeps its court slot, so the other matches keep their indices.
///
/// Partnership and matchup counts are not re-tallied for rebuilt matches.
pub fn insert_player<R: Rng + ?Sized>(
    name: &str,
    schedule: &mut Schedule,
    rng: &mut R,
) -> Result<(), ScheduleError> {
    let name = validate_player_name(name)?;
    if schedule.has_player(&name) {
        return Err(ScheduleError::DuplicatePlayerName(name));
    }

    for existing in &schedule.players {
        schedule.pairing_counts.ensure(&name, existing);
        schedule.matchup_counts.ensure(&name, existing);
    }
    schedule.rest_counts.insert(name.clone(), 0);
    schedule.players.push(name.clone());
    schedule.late_additions.push(name.clone());

    for (index, round) in schedule.rounds.iter_mut().enumerate() {
        let rested = if !round.resting.is_empty() {
            let slot = rng.gen_range(0..round.resting.len());
            let displaced = std::mem::replace(&mut round.resting[slot], name.clone());
            round.resting.push(displaced);
            name.clone()
        } else if !round.matches.is_empty() {
            let slot = rng.gen_range(0..round.matches.len());
            let mut group: Vec<String> = round.matches[slot]
                .players()
                .iter()
                .map(|p| p.to_string())
                .collect();
            let bumped = group.remove(rng.gen_range(0..group.len()));
            group.push(name.clone());
            group.shuffle(rng);
            round.matches[slot] = Match::new(
                Pairing::new(group[0].clone(), group[1].clone()),
                Pairing::new(group[2].clone(), group[3].clone()),
            );
            round.resting.push(bumped.clone());
            bumped
        } else {
            round.resting.push(name.clone());
            name.clone()
        };
        *schedule.rest_counts.entry(rested.clone()).or_insert(0) += 1;
        log::debug!("late entry {} in round {}: {} rests", name, index + 1, rested);
    }

    log::info!(
        "added late entry {} to schedule {} ({} rounds adjusted)",
        name,
        schedule.id,
        schedule.rounds.len()
    );
    Ok(())
}
