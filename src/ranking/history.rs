//! Ranking history: standings replayed over every prefix of the match log.
//!
//! Each prefix is ranked from scratch, so the cost is one full ranking per
//! match. Callers with large leagues should cache the result.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::models::{
    Dataset, LeagueId, Match, Player, PlayerId, RankingHistory, RankingRow, RankingTable,
};

use super::standings;
use super::strategy::{RankingStrategy, ScoreSheet};
use super::RankingError;

/// Label of the step before any match is played.
pub const START_LABEL: &str = "start";

/// `"{home} - {away} ({home_score} - {away_score})"`.
pub fn match_label(
    m: &Match,
    usernames: &HashMap<PlayerId, &str>,
) -> Result<String, RankingError> {
    let name = |id: &PlayerId| {
        usernames.get(id).copied().ok_or_else(|| {
            RankingError::InvalidInput(format!("match {} references unknown player {}", m.id, id))
        })
    };

    Ok(format!(
        "{} - {} ({} - {})",
        name(&m.home_player_id)?,
        name(&m.away_player_id)?,
        m.home_score,
        m.away_score
    ))
}

fn dataset_label(row: &RankingRow) -> String {
    format!("{}. {} ({})", row.position, row.username, row.pts_primary)
}

/// Replay `matches` in the given order and collect per-player trajectories.
pub fn replay(
    strategy: &dyn RankingStrategy,
    league_id: LeagueId,
    players: &[Player],
    matches: &[Match],
) -> Result<RankingHistory, RankingError> {
    let usernames: HashMap<PlayerId, &str> = players
        .iter()
        .map(|p| (p.id, p.username.as_str()))
        .collect();

    // Seeded from the zero-match standings so a league without matches still
    // has a label and position per player.
    let baseline = standings::assemble(players, &ScoreSheet::new(), league_id);
    let mut datasets: BTreeMap<PlayerId, Dataset> = baseline
        .rows
        .iter()
        .map(|row| {
            let dataset = Dataset {
                player_id: row.player_id,
                data: vec![0],
                label: dataset_label(row),
                position: row.position,
            };
            (row.player_id, dataset)
        })
        .collect();

    let mut labels = Vec::with_capacity(matches.len() + 1);
    labels.push(START_LABEL.to_string());

    for end in 1..=matches.len() {
        let prefix = &matches[..end];
        labels.push(match_label(&prefix[end - 1], &usernames)?);

        let sheet = strategy.compute_score_pairs(players, prefix)?;
        let table: RankingTable = standings::assemble(players, &sheet, league_id);

        for row in &table.rows {
            if let Some(dataset) = datasets.get_mut(&row.player_id) {
                dataset.data.push(row.pts_primary);
                dataset.label = dataset_label(row);
                dataset.position = row.position;
            }
        }
    }

    let mut datasets: Vec<Dataset> = datasets.into_values().collect();
    datasets.sort_by_key(|d| d.position);

    debug!(
        strategy = strategy.name(),
        steps = labels.len(),
        players = datasets.len(),
        "Replayed ranking history"
    );

    Ok(RankingHistory { labels, datasets })
}
