//! Pairing (a two-player team), Match (two disjoint pairings on one court), and Team.

use crate::models::counts::PairKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    One,
    Two,
}

/// Two teammates for one round. Order is kept as produced by the balancer; match history
/// is keyed on it.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Pairing(String, String);

impl Pairing {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        let (first, second) = (first.into(), second.into());
        debug_assert_ne!(first, second, "a pairing needs two different players");
        Self(first, second)
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }

    pub fn players(&self) -> [&str; 2] {
        [&self.0, &self.1]
    }

    pub fn contains(&self, player: &str) -> bool {
        self.0 == player || self.1 == player
    }

    /// True when no player is on both teams.
    pub fn is_disjoint(&self, other: &Pairing) -> bool {
        !other.contains(&self.0) && !other.contains(&self.1)
    }

    /// Order-independent key, as used by the partnership counter.
    pub fn key(&self) -> PairKey {
        PairKey::new(&self.0, &self.1)
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {}", self.0, self.1)
    }
}

/// One court's game for one round.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub team_1: Pairing,
    pub team_2: Pairing,
}

impl Match {
    pub fn new(team_1: Pairing, team_2: Pairing) -> Self {
        debug_assert!(team_1.is_disjoint(&team_2), "teams of a match must be disjoint");
        Self { team_1, team_2 }
    }

    /// All four players, team 1 first.
    pub fn players(&self) -> [&str; 4] {
        let [a, b] = self.team_1.players();
        let [c, d] = self.team_2.players();
        [a, b, c, d]
    }

    pub fn contains(&self, player: &str) -> bool {
        self.team_1.contains(player) || self.team_2.contains(player)
    }

    pub fn team(&self, team: Team) -> &Pairing {
        match team {
            Team::One => &self.team_1,
            Team::Two => &self.team_2,
        }
    }

    /// The four (team 1 player, team 2 player) opponent combinations.
    pub fn cross_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.team_1
            .players()
            .into_iter()
            .flat_map(move |a| self.team_2.players().into_iter().map(move |b| (a, b)))
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs. {}", self.team_1, self.team_2)
    }
}
