//! Match composer: greedily turns a round's pairings into head-to-head matches.

use crate::models::{Match, MatchHistory, PairCounts, Pairing};
use std::collections::VecDeque;

/// Weight of facing a team not met before.
pub const NOVELTY_WEIGHT: i64 = 10;

/// Output of [`compose_matches`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ComposedMatches {
    pub matches: Vec<Match>,
    /// Pairings left without an opponent (an odd pairing count leaves exactly one).
    pub unmatched: Vec<Pairing>,
}

/// `novelty × 10 − balance`, where novelty is 0 if `anchor` already faced `candidate` and
/// balance is the summed opponent count of the four cross pairs.
pub fn match_score(
    anchor: &Pairing,
    candidate: &Pairing,
    history: &MatchHistory,
    matchup_counts: &PairCounts,
) -> i64 {
    let novelty = if history.has_faced(anchor, candidate) { 0 } else { 1 };
    let balance: i64 = anchor
        .players()
        .iter()
        .flat_map(|a| candidate.players().map(|b| matchup_counts.get(a, b)))
        .map(i64::from)
        .sum();
    novelty * NOVELTY_WEIGHT - balance
}

/// Commit a match: both teams remember each other, and each cross pair's opponent
/// count goes up by one.
pub fn record_match(m: &Match, history: &mut MatchHistory, matchup_counts: &mut PairCounts) {
    history.record(&m.team_1, &m.team_2);
    for (a, b) in m.cross_pairs() {
        matchup_counts.increment(a, b);
    }
}

/// Compose matches from `pairings`, in order.
///
/// The first remaining pairing is the anchor; it plays the disjoint pairing with the highest
/// [`match_score`] (first found on ties). An anchor with no disjoint opponent goes to the
/// back. Once every remaining pairing has failed as anchor, the rest are returned unmatched.
pub fn compose_matches(
    pairings: Vec<Pairing>,
    history: &mut MatchHistory,
    matchup_counts: &mut PairCounts,
) -> ComposedMatches {
    let mut remaining: VecDeque<Pairing> = pairings.into();
    let mut matches = Vec::with_capacity(remaining.len() / 2);
    let mut failed_anchors = 0;

    while remaining.len() > 1 && failed_anchors < remaining.len() {
        let Some(anchor) = remaining.pop_front() else {
            break;
        };
        let mut best: Option<(usize, i64)> = None;
        for (i, candidate) in remaining.iter().enumerate() {
            if !anchor.is_disjoint(candidate) {
                continue;
            }
            let score = match_score(&anchor, candidate, history, matchup_counts);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((i, score));
            }
        }

        match best.and_then(|(i, _)| remaining.remove(i)) {
            Some(opponent) => {
                let m = Match::new(anchor, opponent);
                record_match(&m, history, matchup_counts);
                matches.push(m);
                failed_anchors = 0;
            }
            None => {
                remaining.push_back(anchor);
                failed_anchors += 1;
            }
        }
    }

    let unmatched: Vec<Pairing> = remaining.into();
    if !unmatched.is_empty() {
        log::debug!(
            "{} pairing(s) left without an opponent: {:?}",
            unmatched.len(),
            unmatched
        );
    }
    ComposedMatches { matches, unmatched }
}
