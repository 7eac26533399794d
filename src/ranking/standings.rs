//! Standings assembly: turns a score sheet into a positioned ranking table.

use std::collections::BTreeMap;

use crate::models::{LeagueId, Player, PlayerId, RankingRow, RankingTable, ScoreRow};

use super::strategy::ScoreSheet;

/// Assemble the ranking table for `players` from `sheet`.
///
/// Every player starts at (0, 0) and receives whatever the sheet holds for
/// them. Rows are listed in ascending player id order, then stable-sorted by
/// secondary points and finally by primary points, both descending. Players
/// level on both keys therefore stay in ascending id order.
pub fn assemble(players: &[Player], sheet: &ScoreSheet, league_id: LeagueId) -> RankingTable {
    let mut rows: BTreeMap<PlayerId, ScoreRow> = players
        .iter()
        .map(|p| (p.id, ScoreRow::empty(p.id, p.username.clone())))
        .collect();

    for (player_id, points) in sheet {
        if let Some(row) = rows.get_mut(player_id) {
            row.pts_primary += points.primary;
            row.pts_secondary += points.secondary;
        }
    }

    let mut ordered: Vec<ScoreRow> = rows.into_values().collect();
    ordered.sort_by(|a, b| b.pts_secondary.total_cmp(&a.pts_secondary));
    ordered.sort_by(|a, b| b.pts_primary.cmp(&a.pts_primary));

    let rows = ordered
        .into_iter()
        .enumerate()
        .map(|(index, row)| RankingRow::from_score_row(row, index + 1, league_id))
        .collect();

    RankingTable { league_id, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::strategy::ScorePair;
    use pretty_assertions::assert_eq;

    fn id(n: u128) -> PlayerId {
        PlayerId::from_u128(n)
    }

    fn players() -> Vec<Player> {
        // Deliberately not in id order
        vec![
            Player::new(id(3), "carol"),
            Player::new(id(1), "alice"),
            Player::new(id(2), "bob"),
        ]
    }

    #[test]
    fn test_primary_dominates_secondary() {
        let sheet: ScoreSheet = [
            (id(1), ScorePair::new(2, -5.0)),
            (id(2), ScorePair::new(4, 0.0)),
            (id(3), ScorePair::new(2, 3.0)),
        ]
        .into_iter()
        .collect();

        let table = assemble(&players(), &sheet, LeagueId::from_u128(9));

        assert_eq!(table.player_order(), vec![id(2), id(3), id(1)]);
        let positions: Vec<_> = table.rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert!(table.rows.iter().all(|r| r.league_id == LeagueId::from_u128(9)));
    }

    #[test]
    fn test_full_ties_keep_ascending_id() {
        let sheet: ScoreSheet = [
            (id(1), ScorePair::new(1, 0.5)),
            (id(2), ScorePair::new(1, 0.5)),
            (id(3), ScorePair::new(1, 0.5)),
        ]
        .into_iter()
        .collect();

        let table = assemble(&players(), &sheet, LeagueId::from_u128(9));
        assert_eq!(table.player_order(), vec![id(1), id(2), id(3)]);
    }

    #[test]
    fn test_players_missing_from_sheet_rank_with_zero() {
        let sheet: ScoreSheet = [(id(3), ScorePair::new(2, 1.0))].into_iter().collect();

        let table = assemble(&players(), &sheet, LeagueId::from_u128(9));

        assert_eq!(table.len(), 3);
        assert_eq!(table.player_order(), vec![id(3), id(1), id(2)]);
        let alice = table.row_for(id(1)).unwrap();
        assert_eq!((alice.pts_primary, alice.pts_secondary), (0, 0.0));
        assert_eq!(alice.username, "alice");
    }

    #[test]
    fn test_empty_league() {
        let table = assemble(&[], &ScoreSheet::new(), LeagueId::from_u128(9));
        assert!(table.is_empty());
    }
}
