//! Ranking engine.
//!
//! Computes league standings from an ordered snapshot of players and matches
//! under a named strategy, and replays those standings across the match log:
//! - **dominance**: the bounded dominance transform `h`
//! - **head_to_head**: per-pair goal aggregation
//! - **strategy**: the `RankingStrategy` trait and registry
//! - **regular** / **perron_frobenius**: built-in strategies
//! - **standings**: sorting and positioning
//! - **history**: prefix replay
//!
//! The engine is pure: it reads the snapshot, never mutates it, and either
//! returns a complete table or an error.

pub mod dominance;
pub mod head_to_head;
pub mod history;
pub mod perron_frobenius;
pub mod regular;
pub mod standings;
pub mod strategy;

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::config::RankingConfig;
use crate::models::{LeagueId, Match, Player, RankingHistory, RankingTable};

pub use perron_frobenius::PerronFrobeniusStrategy;
pub use regular::RegularStrategy;
pub use strategy::{RankingStrategy, ScorePair, ScoreSheet, StrategyConstructor, StrategyRegistry};

/// Errors that can occur while ranking a league.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Unknown ranking strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate dominance matrix: {0}")]
    DegenerateMatrix(String),
}

/// Entry point for callers: strategy lookup, input validation, computation.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    registry: StrategyRegistry,
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(registry: StrategyRegistry, config: RankingConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Current standings of a league.
    ///
    /// `matches` must already be in chronological order; it is used as given.
    pub fn compute_ranking(
        &self,
        strategy_name: &str,
        league_id: LeagueId,
        players: &[Player],
        matches: &[Match],
    ) -> Result<RankingTable, RankingError> {
        let strategy = self.registry.create(strategy_name, &self.config)?;
        validate_snapshot(players, matches)?;

        debug!(
            strategy = strategy.name(),
            %league_id,
            players = players.len(),
            matches = matches.len(),
            "Computing ranking"
        );

        let sheet = strategy.compute_score_pairs(players, matches)?;
        Ok(standings::assemble(players, &sheet, league_id))
    }

    /// Standings after every match, reshaped into per-player trajectories.
    pub fn compute_ranking_history(
        &self,
        strategy_name: &str,
        league_id: LeagueId,
        players: &[Player],
        matches: &[Match],
    ) -> Result<RankingHistory, RankingError> {
        let strategy = self.registry.create(strategy_name, &self.config)?;
        validate_snapshot(players, matches)?;

        debug!(
            strategy = strategy.name(),
            %league_id,
            players = players.len(),
            matches = matches.len(),
            "Computing ranking history"
        );

        history::replay(strategy.as_ref(), league_id, players, matches)
    }
}

/// Reject snapshots the strategies cannot rank consistently.
pub fn validate_snapshot(players: &[Player], matches: &[Match]) -> Result<(), RankingError> {
    let mut known = HashSet::with_capacity(players.len());
    for player in players {
        if !known.insert(player.id) {
            return Err(RankingError::InvalidInput(format!(
                "player {} appears more than once",
                player.id
            )));
        }
    }

    for m in matches {
        for player_id in [m.home_player_id, m.away_player_id] {
            if !known.contains(&player_id) {
                return Err(RankingError::InvalidInput(format!(
                    "match {} references player {} who is not in the league",
                    m.id, player_id
                )));
            }
        }
        if m.home_player_id == m.away_player_id {
            return Err(RankingError::InvalidInput(format!(
                "match {} has player {} playing themself",
                m.id, m.home_player_id
            )));
        }
    }

    Ok(())
}
