//! Schedule, Round, ScheduleSettings, and ScheduleError.

use crate::models::counts::{PairCounts, RestCounts};
use crate::models::game::{Match, Pairing};
use crate::models::player::PlayerSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Errors returned to the caller; none of them are retried internally.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// Not enough players for the requested mode.
    InsufficientPlayers { required: usize, found: usize },
    /// More courts than the roster can fill with 4 players each (or zero courts).
    InvalidCourtCount { courts: usize, max: usize },
    /// At least one round is required.
    InvalidRoundCount,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName(String),
    /// Blank or whitespace-only name.
    EmptyPlayerName,
    /// Name contains characters reserved by the printable schedule.
    InvalidPlayerName(String),
    /// No match at this round / match index.
    MatchNotFound { round: usize, match_index: usize },
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InsufficientPlayers { required, found } => {
                write!(f, "Need at least {} players (have {})", required, found)
            }
            ScheduleError::InvalidCourtCount { courts, max } => {
                write!(f, "Cannot use {} courts (at most {} for this roster)", courts, max)
            }
            ScheduleError::InvalidRoundCount => write!(f, "Need at least 1 round"),
            ScheduleError::DuplicatePlayerName(name) => {
                write!(f, "A player named {} already exists", name)
            }
            ScheduleError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            ScheduleError::InvalidPlayerName(name) => write!(
                f,
                "Player name {:?} may not contain '&', ' vs. ' or line breaks, nor begin or end with 'vs.'",
                name
            ),
            ScheduleError::MatchNotFound { round, match_index } => {
                write!(f, "No match {} in round {}", match_index + 1, round + 1)
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Unique identifier for a generated schedule.
pub type ScheduleId = Uuid;

/// How players are spread over the courts each round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// The whole roster is paired every round, then pairings are composed into matches.
    #[default]
    SingleCourt,
    /// Fixed number of courts, 4 players drawn per court; everyone else rests.
    MultiCourt,
}

/// What the caller asks for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    pub rounds: usize,
    pub courts: usize,
    pub mode: ScheduleMode,
}

impl ScheduleSettings {
    /// Single-court mode for one court, multi-court otherwise.
    pub fn new(rounds: usize, courts: usize) -> Self {
        let mode = if courts > 1 {
            ScheduleMode::MultiCourt
        } else {
            ScheduleMode::SingleCourt
        };
        Self { rounds, courts, mode }
    }

    pub fn with_mode(self, mode: ScheduleMode) -> Self {
        Self { mode, ..self }
    }
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self::new(3, 1)
    }
}

/// One time slot: the matches played and who sits out.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub matches: Vec<Match>,
    pub resting: Vec<String>,
    /// Pairings the composer could not place in a match (odd pairing count).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<Pairing>,
}

impl Round {
    /// Players on court this round.
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().flat_map(|m| m.players())
    }

    pub fn is_resting(&self, player: &str) -> bool {
        self.resting.iter().any(|p| p == player)
    }

    pub fn match_for(&self, player: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.contains(player))
    }
}

/// A generated tournament: rounds plus the counters built while generating them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub created_at: DateTime<Utc>,
    pub settings: ScheduleSettings,
    /// Roster in entry order, late additions included.
    pub players: Vec<String>,
    /// Players added after generation.
    pub late_additions: Vec<String>,
    pub rounds: Vec<Round>,
    /// Times each pair were teammates.
    pub pairing_counts: PairCounts,
    /// Times each pair were opponents.
    pub matchup_counts: PairCounts,
    pub rest_counts: RestCounts,
}

impl Schedule {
    /// Empty schedule with fresh counters; every player starts with zero rests.
    pub fn new(players: Vec<String>, settings: ScheduleSettings) -> Self {
        let rest_counts = players.iter().map(|p| (p.clone(), 0)).collect();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            settings,
            players,
            late_additions: Vec::new(),
            rounds: Vec::with_capacity(settings.rounds),
            pairing_counts: PairCounts::new(),
            matchup_counts: PairCounts::new(),
            rest_counts,
        }
    }

    /// Roster lookup, case-insensitive like name validation.
    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.eq_ignore_ascii_case(name))
    }

    pub fn rest_count(&self, player: &str) -> u32 {
        self.rest_counts.get(player).copied().unwrap_or(0)
    }

    /// Summary for one player, computed from the rounds as they stand now.
    pub fn player_summary(&self, player: &str) -> Option<PlayerSummary> {
        if !self.players.iter().any(|p| p == player) {
            return None;
        }
        let mut partners = BTreeSet::new();
        let mut opponents = BTreeSet::new();
        let mut games_played = 0;
        let mut times_rested = 0;
        for round in &self.rounds {
            if round.is_resting(player) {
                times_rested += 1;
            }
            if let Some(m) = round.match_for(player) {
                games_played += 1;
                let (own, other) = if m.team_1.contains(player) {
                    (&m.team_1, &m.team_2)
                } else {
                    (&m.team_2, &m.team_1)
                };
                partners.extend(own.players().into_iter().filter(|p| *p != player));
                opponents.extend(other.players());
            }
        }
        Some(PlayerSummary {
            name: player.to_string(),
            games_played,
            times_rested,
            distinct_partners: partners.len(),
            distinct_opponents: opponents.len(),
            late_addition: self.late_additions.iter().any(|p| p == player),
        })
    }

    /// Summaries for the whole roster, in roster order.
    pub fn player_summaries(&self) -> Vec<PlayerSummary> {
        self.players
            .iter()
            .filter_map(|p| self.player_summary(p))
            .collect()
    }
}
