//! Head-to-head aggregation of match scores per player pair.

use std::collections::HashMap;

use crate::models::{Match, PlayerId};

use super::RankingError;

/// Aggregate record of one player against one opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRecord {
    /// The two players never met (always the case on the diagonal).
    NeverPlayed,
    /// Total goals across every meeting, from the row player's side.
    Played { scored: u64, conceded: u64 },
}

/// Square table of pair records over players in ascending id order.
#[derive(Debug, Clone)]
pub struct HeadToHead {
    player_ids: Vec<PlayerId>,
    /// `goals[i * n + j]`: goals `i` scored against `j`, `None` if never met
    goals: Vec<Option<u64>>,
}

impl HeadToHead {
    /// Aggregate `matches` over `player_ids`.
    ///
    /// Ids are sorted ascending; row/column `k` of the table belongs to the
    /// `k`-th smallest id.
    pub fn build(player_ids: &[PlayerId], matches: &[Match]) -> Result<Self, RankingError> {
        let mut player_ids = player_ids.to_vec();
        player_ids.sort();

        let index: HashMap<PlayerId, usize> = player_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();
        let n = player_ids.len();
        let mut goals = vec![None; n * n];

        for m in matches {
            let home = *index.get(&m.home_player_id).ok_or_else(|| {
                RankingError::InvalidInput(format!(
                    "match {} references unknown home player {}",
                    m.id, m.home_player_id
                ))
            })?;
            let away = *index.get(&m.away_player_id).ok_or_else(|| {
                RankingError::InvalidInput(format!(
                    "match {} references unknown away player {}",
                    m.id, m.away_player_id
                ))
            })?;
            if home == away {
                return Err(RankingError::InvalidInput(format!(
                    "match {} has player {} playing themself",
                    m.id, m.home_player_id
                )));
            }

            let home_goals = goals[home * n + away].get_or_insert(0);
            *home_goals += u64::from(m.home_score);
            let away_goals = goals[away * n + home].get_or_insert(0);
            *away_goals += u64::from(m.away_score);
        }

        Ok(Self { player_ids, goals })
    }

    /// Players in table order.
    pub fn player_ids(&self) -> &[PlayerId] {
        &self.player_ids
    }

    /// Number of rows (and columns) of the table.
    pub fn player_count(&self) -> usize {
        self.player_ids.len()
    }

    /// Record of player `i` against player `j` (table indices).
    pub fn record(&self, i: usize, j: usize) -> PairRecord {
        let n = self.player_count();
        match (self.goals[i * n + j], self.goals[j * n + i]) {
            (Some(scored), Some(conceded)) => PairRecord::Played { scored, conceded },
            _ => PairRecord::NeverPlayed,
        }
    }

    /// Whether any pair in the table has met.
    pub fn any_played(&self) -> bool {
        self.goals.iter().any(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn id(n: u128) -> PlayerId {
        PlayerId::from_u128(n)
    }

    fn game(home: u128, away: u128, home_score: u32, away_score: u32) -> Match {
        Match::new(
            id(home),
            id(away),
            home_score,
            away_score,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Utc.timestamp_opt(0, 0).unwrap(),
        )
    }

    #[test]
    fn test_goals_accumulate_across_meetings() {
        let matches = vec![game(1, 2, 3, 1), game(2, 1, 2, 2)];
        let table = HeadToHead::build(&[id(1), id(2)], &matches).unwrap();

        assert_eq!(
            table.record(0, 1),
            PairRecord::Played {
                scored: 5,
                conceded: 3
            }
        );
        assert_eq!(
            table.record(1, 0),
            PairRecord::Played {
                scored: 3,
                conceded: 5
            }
        );
    }

    #[test]
    fn test_goalless_meeting_is_played_not_absent() {
        let table = HeadToHead::build(&[id(1), id(2)], &[game(1, 2, 0, 0)]).unwrap();
        assert_eq!(
            table.record(0, 1),
            PairRecord::Played {
                scored: 0,
                conceded: 0
            }
        );
    }

    #[test]
    fn test_unplayed_pairs_and_diagonal() {
        let table = HeadToHead::build(&[id(1), id(2), id(3)], &[game(1, 2, 1, 0)]).unwrap();

        for i in 0..3 {
            assert_eq!(table.record(i, i), PairRecord::NeverPlayed);
        }
        assert_eq!(table.record(0, 2), PairRecord::NeverPlayed);
        assert_eq!(table.record(2, 1), PairRecord::NeverPlayed);
        assert!(table.any_played());
    }

    #[test]
    fn test_table_order_is_ascending_id() {
        let table = HeadToHead::build(&[id(3), id(1), id(2)], &[]).unwrap();
        assert_eq!(table.player_ids(), &[id(1), id(2), id(3)]);
        assert_eq!(table.player_count(), 3);
        assert!(!table.any_played());
    }

    #[test]
    fn test_unknown_player_rejected() {
        let result = HeadToHead::build(&[id(1), id(2)], &[game(1, 7, 1, 0)]);
        assert!(matches!(result, Err(RankingError::InvalidInput(_))));
    }

    #[test]
    fn test_self_match_rejected() {
        let result = HeadToHead::build(&[id(1), id(2)], &[game(2, 2, 1, 0)]);
        assert!(matches!(result, Err(RankingError::InvalidInput(_))));
    }
}
