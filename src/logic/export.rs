//! Printable plain-text schedule, and reading its match lines back.

use crate::models::{Match, Pairing, Schedule, ScheduleMode};
use std::fmt::Write;

/// First line of the printable schedule.
pub const SCHEDULE_TITLE: &str = "Pickleball Doubles Tournament - Match Results";

/// Suggested download name.
pub const EXPORT_FILE_NAME: &str = "pickleball_tournament_schedule.txt";

const WINNER_LINE: &str = "Winner: [ ] Team 1  [ ] Team 2";
const MATCH_SEPARATOR: &str = "---";

/// Errors reading a printable schedule back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExportError {
    /// A match line appeared before any `Round N:` header.
    MatchOutsideRound { line: usize },
    /// A match line that is not `A & B vs. C & D`.
    MalformedMatch { line: usize, text: String },
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::MatchOutsideRound { line } => {
                write!(f, "Line {}: match listed before any round header", line)
            }
            ExportError::MalformedMatch { line, text } => {
                write!(f, "Line {}: cannot read match {:?}", line, text)
            }
        }
    }
}

impl std::error::Error for ExportError {}

/// Render the schedule with a tick-box scoreline under each match, for printing.
pub fn printable_schedule(schedule: &Schedule) -> String {
    let label = match schedule.settings.mode {
        ScheduleMode::SingleCourt => "Match",
        ScheduleMode::MultiCourt => "Court",
    };
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}\n", SCHEDULE_TITLE);
    for (round_number, round) in schedule.rounds.iter().enumerate() {
        let _ = writeln!(out, "Round {}:", round_number + 1);
        match round.resting.as_slice() {
            [] => {}
            [one] => {
                let _ = writeln!(out, "Player resting this round: {}", one);
            }
            many => {
                let _ = writeln!(out, "Players resting this round: {}", many.join(", "));
            }
        }
        for (match_number, m) in round.matches.iter().enumerate() {
            let _ = writeln!(out, "{} {}: {}", label, match_number + 1, m);
            let _ = writeln!(out, "{}", WINNER_LINE);
            let _ = writeln!(out, "{}", MATCH_SEPARATOR);
        }
        out.push('\n');
    }
    out
}

fn parse_pairing(text: &str) -> Option<Pairing> {
    let (a, b) = text.split_once(" & ")?;
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() || a == b {
        return None;
    }
    Some(Pairing::new(a, b))
}

fn parse_match(text: &str) -> Option<Match> {
    let (team_1, team_2) = text.split_once(" vs. ")?;
    let (team_1, team_2) = (parse_pairing(team_1)?, parse_pairing(team_2)?);
    team_1.is_disjoint(&team_2).then(|| Match::new(team_1, team_2))
}

/// Matches per round, in order, from text produced by [`printable_schedule`].
/// Lines other than round headers and `Match`/`Court` lines are skipped.
pub fn parse_printable_schedule(text: &str) -> Result<Vec<Vec<Match>>, ExportError> {
    let mut rounds: Vec<Vec<Match>> = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let line_number = index + 1;
        if line.starts_with("Round ") && line.ends_with(':') {
            rounds.push(Vec::new());
            continue;
        }
        if !(line.starts_with("Match ") || line.starts_with("Court ")) {
            continue;
        }
        let body = match line.split_once(": ") {
            Some((_, body)) => body,
            None => {
                return Err(ExportError::MalformedMatch {
                    line: line_number,
                    text: line.to_string(),
                })
            }
        };
        let m = parse_match(body).ok_or_else(|| ExportError::MalformedMatch {
            line: line_number,
            text: body.to_string(),
        })?;
        rounds
            .last_mut()
            .ok_or(ExportError::MatchOutsideRound { line: line_number })?
            .push(m);
    }
    Ok(rounds)
}
