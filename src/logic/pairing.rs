//! Partnership balancer: splits a pool of players into teams of two, avoiding repeat partners.

use crate::models::{PairCounts, Pairing, RestCounts};
use rand::seq::SliceRandom;
use rand::Rng;

/// Random candidate pairings tried per round.
pub const PAIRING_TRIALS: usize = 10;

/// Multiplier of the squared repeat count.
pub const REPEAT_PARTNER_PENALTY: u64 = 10;

/// Pick the player to sit out: uniformly among those with the fewest rests so far.
/// Players missing from `rest_counts` count as never rested.
pub fn choose_resting_player<R: Rng + ?Sized>(
    players: &[String],
    rest_counts: &RestCounts,
    rng: &mut R,
) -> Option<String> {
    let rests = |p: &String| rest_counts.get(p).copied().unwrap_or(0);
    let min_rests = players.iter().map(rests).min()?;
    let candidates: Vec<&String> = players.iter().filter(|p| rests(*p) == min_rests).collect();
    candidates.choose(rng).map(|p| (*p).clone())
}

/// Sum over pairs: 0 for a new partnership, `count² × 10` for a repeat.
pub fn score_pairings(pairings: &[Pairing], pairing_counts: &PairCounts) -> u64 {
    pairings
        .iter()
        .map(|pair| {
            let count = u64::from(pairing_counts.get(pair.first(), pair.second()));
            count * count * REPEAT_PARTNER_PENALTY
        })
        .sum()
}

/// Shuffle the pool and pair up consecutive players.
fn random_pairings<R: Rng + ?Sized>(pool: &[String], rng: &mut R) -> Vec<Pairing> {
    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled
        .chunks_exact(2)
        .map(|chunk| Pairing::new(chunk[0].clone(), chunk[1].clone()))
        .collect()
}

/// Best-of-[`PAIRING_TRIALS`] pairing of `players` for one round.
///
/// 1. Odd pool: one player rests (see [`choose_resting_player`]) and is left out.
/// 2. Try random pairings, keep the lowest [`score_pairings`] (first found on ties).
/// 3. Commit: every winning pair's partnership count goes up by one.
///
/// Returns the pairings and the resting player, if any. Fewer than two players yields no
/// pairings; callers guard the player count.
pub fn select_round_pairings<R: Rng + ?Sized>(
    players: &[String],
    pairing_counts: &mut PairCounts,
    rest_counts: &RestCounts,
    rng: &mut R,
) -> (Vec<Pairing>, Option<String>) {
    let mut pool = players.to_vec();
    let resting = if pool.len() % 2 == 1 {
        choose_resting_player(&pool, rest_counts, rng)
    } else {
        None
    };
    if let Some(r) = &resting {
        pool.retain(|p| p != r);
    }

    let mut best: Option<(u64, Vec<Pairing>)> = None;
    for _ in 0..PAIRING_TRIALS {
        let candidate = random_pairings(&pool, rng);
        let score = score_pairings(&candidate, pairing_counts);
        if best.as_ref().map_or(true, |(best_score, _)| score < *best_score) {
            best = Some((score, candidate));
        }
    }
    let (score, pairings) = best.unwrap_or_default();

    for pair in &pairings {
        pairing_counts.increment(pair.first(), pair.second());
    }
    log::debug!(
        "paired {} players into {} teams (repeat score {}), resting: {:?}",
        pool.len(),
        pairings.len(),
        score,
        resting
    );

    (pairings, resting)
}
