//! Player names and the per-player summary view.

use crate::models::schedule::ScheduleError;
use serde::{Deserialize, Serialize};

/// Validate and normalize a display name: trimmed, non-empty, and free of the separators
/// the printable schedule uses (`&`, ` vs. `, line breaks). Names that are `vs.`, or start
/// with `vs. ` or end with ` vs.`, are rejected too.
pub fn validate_player_name(name: &str) -> Result<String, ScheduleError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::EmptyPlayerName);
    }
    // A name next to the " vs. " separator must not form another one.
    let clashes_with_separator = trimmed.contains(" vs. ")
        || trimmed == "vs."
        || trimmed.ends_with(" vs.")
        || trimmed.starts_with("vs. ");
    if trimmed.contains('&') || clashes_with_separator || trimmed.chars().any(char::is_control) {
        return Err(ScheduleError::InvalidPlayerName(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Validate a whole roster. Names are unique, case-insensitive.
pub fn validate_roster<S: AsRef<str>>(players: &[S]) -> Result<Vec<String>, ScheduleError> {
    let mut roster: Vec<String> = Vec::with_capacity(players.len());
    for name in players {
        let name = validate_player_name(name.as_ref())?;
        if roster.iter().any(|p| p.eq_ignore_ascii_case(&name)) {
            return Err(ScheduleError::DuplicatePlayerName(name));
        }
        roster.push(name);
    }
    Ok(roster)
}

/// Statistics view of one player across a schedule (for API / display).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub games_played: u32,
    pub times_rested: u32,
    pub distinct_partners: usize,
    pub distinct_opponents: usize,
    /// Joined after the schedule was generated.
    pub late_addition: bool,
}
