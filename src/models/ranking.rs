//! Ranking output models: standings tables and ranking history.

use serde::{Deserialize, Serialize};

use super::{LeagueId, PlayerId};

/// Accumulated points of one player before positions are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub player_id: PlayerId,
    pub username: String,

    /// Main ranking key
    pub pts_primary: i64,

    /// Tie-break key; fractional when draws award half points
    pub pts_secondary: f64,
}

impl ScoreRow {
    /// A row with no points yet.
    pub fn empty(player_id: PlayerId, username: impl Into<String>) -> Self {
        Self {
            player_id,
            username: username.into(),
            pts_primary: 0,
            pts_secondary: 0.0,
        }
    }
}

/// One positioned line of a standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    /// 1-based rank
    pub position: usize,
    pub league_id: LeagueId,
    pub player_id: PlayerId,
    pub username: String,
    pub pts_primary: i64,
    pub pts_secondary: f64,
}

impl RankingRow {
    pub fn from_score_row(row: ScoreRow, position: usize, league_id: LeagueId) -> Self {
        Self {
            position,
            league_id,
            player_id: row.player_id,
            username: row.username,
            pts_primary: row.pts_primary,
            pts_secondary: row.pts_secondary,
        }
    }
}

/// Standings of a league at one point in time. Every supplied player appears
/// exactly once and positions run `1..=len` without gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingTable {
    pub league_id: LeagueId,
    pub rows: Vec<RankingRow>,
}

impl RankingTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row of the given player, if present.
    pub fn row_for(&self, player_id: PlayerId) -> Option<&RankingRow> {
        self.rows.iter().find(|r| r.player_id == player_id)
    }

    /// Player ids in standings order.
    pub fn player_order(&self) -> Vec<PlayerId> {
        self.rows.iter().map(|r| r.player_id).collect()
    }
}

/// Trajectory of one player's primary points across the match log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub player_id: PlayerId,

    /// Primary points after each prefix; `data[0]` is the pre-season 0
    pub data: Vec<i64>,

    /// Final display label, `"{position}. {username} ({pts_primary})"`
    pub label: String,

    /// Final position
    pub position: usize,
}

/// Per-player time series of standings, one step per match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingHistory {
    /// `"start"` followed by one label per match
    pub labels: Vec<String>,

    /// One dataset per player, ascending by final position
    pub datasets: Vec<Dataset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RankingTable {
        let league_id = LeagueId::from_u128(100);
        let rows = vec![
            RankingRow::from_score_row(
                ScoreRow {
                    player_id: PlayerId::from_u128(2),
                    username: "bob".to_string(),
                    pts_primary: 2,
                    pts_secondary: 1.0,
                },
                1,
                league_id,
            ),
            RankingRow::from_score_row(
                ScoreRow::empty(PlayerId::from_u128(1), "alice"),
                2,
                league_id,
            ),
        ];
        RankingTable { league_id, rows }
    }

    #[test]
    fn test_row_for_and_player_order() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.row_for(PlayerId::from_u128(1)).unwrap().username, "alice");
        assert!(table.row_for(PlayerId::from_u128(9)).is_none());
        assert_eq!(
            table.player_order(),
            vec![PlayerId::from_u128(2), PlayerId::from_u128(1)]
        );
    }

    #[test]
    fn test_ranking_row_serialization_carries_position_and_league() {
        let table = table();
        let json = serde_json::to_value(&table.rows[0]).unwrap();
        assert_eq!(json["position"], 1);
        assert_eq!(json["pts_primary"], 2);
        assert_eq!(json["league_id"], "00000000-0000-0000-0000-000000000064");
    }
}
