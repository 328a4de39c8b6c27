//! Match results and the leaderboard built from them.

use crate::models::{Match, Schedule, ScheduleError, Team};
use serde::{Deserialize, Serialize};

/// Entered result of one match. `winner: None` means not played yet.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Option<Team>,
    pub team_1_score: u32,
    pub team_2_score: u32,
}

impl MatchResult {
    pub fn won_by(winner: Team, team_1_score: u32, team_2_score: u32) -> Self {
        Self {
            winner: Some(winner),
            team_1_score,
            team_2_score,
        }
    }

    pub fn score_difference(&self) -> u32 {
        self.team_1_score.abs_diff(self.team_2_score)
    }
}

/// A result with the match it was entered for.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RecordedResult {
    pub round: usize,
    pub match_index: usize,
    /// The match as scheduled when the result was entered.
    pub teams: Match,
    pub result: MatchResult,
}

/// One leaderboard line.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player: String,
    pub points: u32,
    pub wins: u32,
    pub losses: u32,
    pub late_addition: bool,
}

/// Results entered so far for one schedule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub points_per_win: u32,
    pub results: Vec<RecordedResult>,
}

impl Default for Scorecard {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Scorecard {
    pub fn new(points_per_win: u32) -> Self {
        Self {
            points_per_win,
            results: Vec::new(),
        }
    }

    /// Enter (or replace) the result of match `match_index` in `round` (both 0-based).
    pub fn record(
        &mut self,
        schedule: &Schedule,
        round: usize,
        match_index: usize,
        result: MatchResult,
    ) -> Result<(), ScheduleError> {
        let teams = schedule
            .rounds
            .get(round)
            .and_then(|r| r.matches.get(match_index))
            .cloned()
            .ok_or(ScheduleError::MatchNotFound { round, match_index })?;
        self.results
            .retain(|r| !(r.round == round && r.match_index == match_index));
        self.results.push(RecordedResult {
            round,
            match_index,
            teams,
            result,
        });
        Ok(())
    }

    /// Whether the recorded match is still the one scheduled in that slot.
    fn is_current(recorded: &RecordedResult, schedule: &Schedule) -> bool {
        schedule
            .rounds
            .get(recorded.round)
            .and_then(|r| r.matches.get(recorded.match_index))
            .is_some_and(|m| *m == recorded.teams)
    }

    /// Leaderboard over the whole roster.
    ///
    /// Each winner earns `points_per_win` plus the score difference. Results for matches that
    /// were rebuilt since (late entry) are ignored. Sorted by points, best first, then name.
    pub fn standings(&self, schedule: &Schedule) -> Vec<Standing> {
        let mut table: Vec<Standing> = schedule
            .players
            .iter()
            .map(|p| Standing {
                player: p.clone(),
                late_addition: schedule.late_additions.contains(p),
                ..Standing::default()
            })
            .collect();

        for recorded in self.results.iter().filter(|r| Self::is_current(r, schedule)) {
            let Some(winner) = recorded.result.winner else {
                continue;
            };
            let loser = match winner {
                Team::One => Team::Two,
                Team::Two => Team::One,
            };
            let points = self.points_per_win + recorded.result.score_difference();
            for entry in table.iter_mut() {
                if recorded.teams.team(winner).contains(&entry.player) {
                    entry.wins += 1;
                    entry.points += points;
                } else if recorded.teams.team(loser).contains(&entry.player) {
                    entry.losses += 1;
                }
            }
        }

        table.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.player.cmp(&b.player)));
        table
    }
}
