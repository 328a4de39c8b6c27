//! Bookkeeping counters: symmetric pair counts, per-team match history, and rest counts.

use crate::models::game::Pairing;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Number of rounds each player has sat out.
pub type RestCounts = BTreeMap<String, u32>;

/// Unordered pair of players. The two names are stored sorted, so `(a, b)` and `(b, a)`
/// are the same key.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PairKey(String, String);

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_owned(), b.to_owned())
        } else {
            Self(b.to_owned(), a.to_owned())
        }
    }

    pub fn players(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }
}

/// Serialized form of one counter entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairCount {
    pub players: [String; 2],
    pub count: u32,
}

/// Count per unordered pair of players. Used for partnerships (teammates) and
/// matchups (opponents).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PairCount>", into = "Vec<PairCount>")]
pub struct PairCounts {
    counts: BTreeMap<PairKey, u32>,
}

impl PairCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for the pair; 0 when never recorded.
    pub fn get(&self, a: &str, b: &str) -> u32 {
        self.counts.get(&PairKey::new(a, b)).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, a: &str, b: &str) {
        debug_assert_ne!(a, b);
        *self.counts.entry(PairKey::new(a, b)).or_insert(0) += 1;
    }

    /// Make sure the pair has an entry (0 if new). Existing counts are left alone.
    pub fn ensure(&mut self, a: &str, b: &str) {
        self.counts.entry(PairKey::new(a, b)).or_insert(0);
    }

    /// Whether the pair has an entry, even a zero one.
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.counts.contains_key(&PairKey::new(a, b))
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.counts.iter().map(|(k, &c)| {
            let (a, b) = k.players();
            (a, b, c)
        })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

impl From<Vec<PairCount>> for PairCounts {
    fn from(entries: Vec<PairCount>) -> Self {
        let mut counts = BTreeMap::new();
        for PairCount { players: [a, b], count } in entries {
            *counts.entry(PairKey::new(&a, &b)).or_insert(0) += count;
        }
        Self { counts }
    }
}

impl From<PairCounts> for Vec<PairCount> {
    fn from(counts: PairCounts) -> Self {
        counts
            .counts
            .into_iter()
            .map(|(PairKey(a, b), count)| PairCount { players: [a, b], count })
            .collect()
    }
}

/// Opposing teams each (ordered) team has already faced. Only biases the composer's
/// novelty score; lives for one generation run.
#[derive(Clone, Debug, Default)]
pub struct MatchHistory {
    faced: HashMap<Pairing, HashSet<Pairing>>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_faced(&self, team: &Pairing, opponent: &Pairing) -> bool {
        self.faced
            .get(team)
            .is_some_and(|opponents| opponents.contains(opponent))
    }

    /// Record the meeting in both directions.
    pub fn record(&mut self, team_1: &Pairing, team_2: &Pairing) {
        self.faced
            .entry(team_1.clone())
            .or_default()
            .insert(team_2.clone());
        self.faced
            .entry(team_2.clone())
            .or_default()
            .insert(team_1.clone());
    }

    pub fn is_empty(&self) -> bool {
        self.faced.is_empty()
    }
}
