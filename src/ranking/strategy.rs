//! Ranking strategy trait and the name-keyed strategy registry.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::RankingConfig;
use crate::models::{Match, Player, PlayerId};

use super::perron_frobenius::PerronFrobeniusStrategy;
use super::regular::RegularStrategy;
use super::RankingError;

/// Points a strategy awards to one player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScorePair {
    pub primary: i64,
    pub secondary: f64,
}

impl ScorePair {
    pub fn new(primary: i64, secondary: f64) -> Self {
        Self { primary, secondary }
    }
}

/// Points per player, keyed (and iterated) in ascending player id order.
pub type ScoreSheet = BTreeMap<PlayerId, ScorePair>;

/// Core trait for all ranking strategies.
///
/// Implementations read the snapshot and never modify it. Players missing
/// from the returned sheet are ranked with zero points.
pub trait RankingStrategy: Send + Sync {
    /// Registry name, also used in logs.
    fn name(&self) -> &'static str;

    /// Compute (primary, secondary) points for every player from `matches`.
    fn compute_score_pairs(
        &self,
        players: &[Player],
        matches: &[Match],
    ) -> Result<ScoreSheet, RankingError>;
}

/// Builds a strategy instance from the engine configuration.
pub type StrategyConstructor = fn(&RankingConfig) -> Box<dyn RankingStrategy>;

/// Name → constructor mapping.
///
/// Explicitly constructed and passed to the engine; `Default` registers the
/// built-in strategies.
#[derive(Clone)]
pub struct StrategyRegistry {
    constructors: BTreeMap<String, StrategyConstructor>,
}

impl StrategyRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Register (or replace) a strategy under `name`.
    pub fn register(&mut self, name: impl Into<String>, constructor: StrategyConstructor) {
        self.constructors.insert(name.into(), constructor);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Instantiate the strategy registered under `name`.
    pub fn create(
        &self,
        name: &str,
        config: &RankingConfig,
    ) -> Result<Box<dyn RankingStrategy>, RankingError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| RankingError::UnknownStrategy(name.to_string()))?;
        Ok(constructor(config))
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(RegularStrategy::NAME, |_| Box::new(RegularStrategy));
        registry.register(PerronFrobeniusStrategy::NAME, |config| {
            Box::new(PerronFrobeniusStrategy::new(config.perron_frobenius.clone()))
        });
        registry
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}
