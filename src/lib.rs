//! Pickleball doubles scheduler: library with models and scheduling logic.

pub mod logic;
pub mod models;

pub use logic::{
    choose_resting_player, compose_matches, cycle_length, generate_multi_court_schedule,
    generate_schedule, generate_single_court_schedule, insert_player, match_score, max_courts,
    parse_printable_schedule, printable_schedule, record_match, regenerate_schedule, score_pairings,
    select_round_pairings, ComposedMatches, ExportError, MatchResult, RecordedResult, Scorecard,
    Standing, EXPORT_FILE_NAME,
};
pub use models::{
    Match, MatchHistory, PairCounts, PairKey, Pairing, PlayerSummary, RestCounts, Round, Schedule,
    ScheduleError, ScheduleId, ScheduleMode, ScheduleSettings, Team,
};
