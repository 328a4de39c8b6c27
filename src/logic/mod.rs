//! Scheduling logic: pairing, match composition, schedule generation, late entry, export.

mod export;
mod late_entry;
mod matching;
mod pairing;
mod scheduler;
mod standings;

pub use export::{
    parse_printable_schedule, printable_schedule, ExportError, EXPORT_FILE_NAME, SCHEDULE_TITLE,
};
pub use late_entry::insert_player;
pub use matching::{compose_matches, match_score, record_match, ComposedMatches, NOVELTY_WEIGHT};
pub use pairing::{
    choose_resting_player, score_pairings, select_round_pairings, PAIRING_TRIALS,
    REPEAT_PARTNER_PENALTY,
};
pub use scheduler::{
    cycle_length, generate_multi_court_schedule, generate_schedule, generate_single_court_schedule,
    max_courts, regenerate_schedule, MIN_SINGLE_COURT_PLAYERS, PLAYERS_PER_COURT,
};
pub use standings::{MatchResult, RecordedResult, Scorecard, Standing};
