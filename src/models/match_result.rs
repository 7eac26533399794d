//! Match model — a single completed game between a home and an away player.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId};

/// Result of a match from the home player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// A completed match.
///
/// Scores are unsigned: a negative score cannot be represented, so a record
/// carrying one is rejected when it is deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Unique identifier
    pub id: MatchId,

    /// Player listed first
    pub home_player_id: PlayerId,

    /// Player listed second
    pub away_player_id: PlayerId,

    /// Goals scored by the home player
    pub home_score: u32,

    /// Goals scored by the away player
    pub away_score: u32,

    /// Calendar date the match was played
    pub date: NaiveDate,

    /// When the match was recorded; orders matches played on the same date
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Create a new Match with a random ID.
    pub fn new(
        home_player_id: PlayerId,
        away_player_id: PlayerId,
        home_score: u32,
        away_score: u32,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MatchId::new(),
            home_player_id,
            away_player_id,
            home_score,
            away_score,
            date,
            created_at,
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    /// Signed goal difference from the home player's side.
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.home_score) - i64::from(self.away_score)
    }

    /// Key the league store sorts matches by.
    pub fn chronological_key(&self) -> (NaiveDate, DateTime<Utc>) {
        (self.date, self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(home_score: u32, away_score: u32) -> Match {
        Match::new(
            PlayerId::from_u128(1),
            PlayerId::from_u128(2),
            home_score,
            away_score,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Utc.timestamp_opt(1_709_280_000, 0).unwrap(),
        )
    }

    #[test]
    fn test_match_outcome() {
        assert_eq!(sample(3, 1).outcome(), MatchOutcome::HomeWin);
        assert_eq!(sample(0, 2).outcome(), MatchOutcome::AwayWin);
        assert_eq!(sample(2, 2).outcome(), MatchOutcome::Draw);
    }

    #[test]
    fn test_goal_difference_is_signed() {
        assert_eq!(sample(3, 1).goal_difference(), 2);
        assert_eq!(sample(0, 4).goal_difference(), -4);
        assert_eq!(sample(1, 1).goal_difference(), 0);
    }

    #[test]
    fn test_negative_score_rejected_on_deserialize() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000009",
            "home_player_id": "00000000-0000-0000-0000-000000000001",
            "away_player_id": "00000000-0000-0000-0000-000000000002",
            "home_score": -1,
            "away_score": 0,
            "date": "2024-03-01",
            "created_at": "2024-03-01T08:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Match>(json).is_err());
    }

    #[test]
    fn test_match_serialization() {
        let m = sample(2, 1);
        let json = serde_json::to_string(&m).unwrap();
        let deserialized: Match = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
