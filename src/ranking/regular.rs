//! Regular league points: 2 for a win, 1 for a draw, goal difference as tie-break.

use crate::models::{Match, MatchOutcome, Player};

use super::strategy::{RankingStrategy, ScorePair, ScoreSheet};
use super::RankingError;

/// Classic points table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegularStrategy;

impl RegularStrategy {
    pub const NAME: &'static str = "regular";

    /// Primary points for (home, away).
    pub fn primary_points(m: &Match) -> (i64, i64) {
        match m.outcome() {
            MatchOutcome::HomeWin => (2, 0),
            MatchOutcome::AwayWin => (0, 2),
            MatchOutcome::Draw => (1, 1),
        }
    }

    /// Secondary points for (home, away): the signed goal difference.
    pub fn secondary_points(m: &Match) -> (f64, f64) {
        let difference = m.goal_difference() as f64;
        (difference, -difference)
    }
}

impl RankingStrategy for RegularStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn compute_score_pairs(
        &self,
        players: &[Player],
        matches: &[Match],
    ) -> Result<ScoreSheet, RankingError> {
        let mut sheet: ScoreSheet = players.iter().map(|p| (p.id, ScorePair::default())).collect();

        for m in matches {
            let (home_primary, away_primary) = Self::primary_points(m);
            let (home_secondary, away_secondary) = Self::secondary_points(m);

            let home = sheet.get_mut(&m.home_player_id).ok_or_else(|| {
                RankingError::InvalidInput(format!("match {} has unknown home player", m.id))
            })?;
            home.primary += home_primary;
            home.secondary += home_secondary;

            let away = sheet.get_mut(&m.away_player_id).ok_or_else(|| {
                RankingError::InvalidInput(format!("match {} has unknown away player", m.id))
            })?;
            away.primary += away_primary;
            away.secondary += away_secondary;
        }

        Ok(sheet)
    }
}
