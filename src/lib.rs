//! # League Ranker
//!
//! Standings for competitive leagues from pairwise match results.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, matches, leagues, ranking tables)
//! - **ranking**: Ranking engine, strategies and history replay
//! - **storage**: Filesystem league snapshots (JSON, JSONL)
//! - **config**: Configuration loading and validation

pub mod config;
pub mod models;
pub mod ranking;
pub mod storage;

pub use models::*;
pub use ranking::{RankingEngine, RankingError, RankingStrategy, StrategyRegistry};
