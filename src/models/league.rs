//! League model and the immutable snapshot handed to the ranking engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{LeagueId, Match, MatchId, Player, PlayerId};
use crate::ranking::RankingError;

/// League record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    /// Unique identifier
    pub id: LeagueId,

    /// Display name
    pub name: String,

    /// Name of the ranking strategy this league is ranked with. Unset
    /// leagues use the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking_system: Option<String>,
}

impl League {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: LeagueId::new(),
            name: name.into(),
            ranking_system: None,
        }
    }

    pub fn with_ranking_system(mut self, ranking_system: impl Into<String>) -> Self {
        self.ranking_system = Some(ranking_system.into());
        self
    }

    /// The league's own strategy name, or `default` when unset or blank.
    pub fn ranking_system_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.ranking_system
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(default)
    }
}

/// Match listing row with player names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub id: MatchId,
    pub date: NaiveDate,
    pub home_player_username: String,
    pub away_player_username: String,
    pub home_score: u32,
    pub away_score: u32,
}

/// A fully materialized league: the league record, its players and its matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub league: League,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
}

impl LeagueSnapshot {
    pub fn new(league: League, players: Vec<Player>, matches: Vec<Match>) -> Self {
        Self {
            league,
            players,
            matches,
        }
    }

    /// Put players in ascending id order and matches in ascending
    /// `(date, created_at)` order. Both sorts are stable.
    pub fn into_ordered(mut self) -> Self {
        self.players.sort_by_key(|p| p.id);
        self.matches.sort_by_key(Match::chronological_key);
        self
    }

    /// Matches with usernames in place of player ids.
    ///
    /// Fails on a match naming a player that is not in the league.
    pub fn match_summaries(&self) -> Result<Vec<MatchSummary>, RankingError> {
        let usernames: HashMap<PlayerId, &str> = self
            .players
            .iter()
            .map(|p| (p.id, p.username.as_str()))
            .collect();

        self.matches
            .iter()
            .map(|m| -> Result<MatchSummary, RankingError> {
                let name_of = |id: &PlayerId| {
                    usernames.get(id).map(|name| name.to_string()).ok_or_else(|| {
                        RankingError::InvalidInput(format!(
                            "match {} references player {} who is not in the league",
                            m.id, id
                        ))
                    })
                };

                Ok(MatchSummary {
                    id: m.id,
                    date: m.date,
                    home_player_username: name_of(&m.home_player_id)?,
                    away_player_username: name_of(&m.away_player_id)?,
                    home_score: m.home_score,
                    away_score: m.away_score,
                })
            })
            .collect()
    }
}
