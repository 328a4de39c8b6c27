//! Data structures for the scheduler: players, pairings, matches, rounds, counters.

mod counts;
mod game;
mod player;
mod schedule;

pub use counts::{MatchHistory, PairCount, PairCounts, PairKey, RestCounts};
pub use game::{Match, Pairing, Team};
pub use player::{validate_player_name, validate_roster, PlayerSummary};
pub use schedule::{Round, Schedule, ScheduleError, ScheduleId, ScheduleMode, ScheduleSettings};
