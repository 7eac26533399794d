//! Filesystem league store.
//!
//! Each league lives in its own directory:
//! - `league.json`: the league record
//! - `players.jsonl`: one player per line
//! - `matches.jsonl`: one match per line
//!
//! Loading returns an ordered [`LeagueSnapshot`]: players ascending by id and
//! matches ascending by `(date, created_at)`.

mod jsonl;

pub use jsonl::*;

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::models::{League, LeagueId, LeagueSnapshot, Match, Player};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed record at {path:?} line {line}: {source}")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("League not found: {0}")]
    LeagueNotFound(LeagueId),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn leagues_dir(&self) -> PathBuf {
        self.data_dir.join("leagues")
    }

    pub fn league_dir(&self, league_id: LeagueId) -> PathBuf {
        self.leagues_dir().join(league_id.to_string())
    }

    pub fn league_path(&self, league_id: LeagueId) -> PathBuf {
        self.league_dir(league_id).join("league.json")
    }

    pub fn entity_path(&self, league_id: LeagueId, entity: EntityType) -> PathBuf {
        self.league_dir(league_id).join(entity.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Load a league with its players and matches, in ranking order.
pub fn load_league(
    config: &StorageConfig,
    league_id: LeagueId,
) -> Result<LeagueSnapshot, StorageError> {
    let league_path = config.league_path(league_id);
    if !league_path.exists() {
        return Err(StorageError::LeagueNotFound(league_id));
    }

    let league: League = serde_json::from_str(&fs::read_to_string(&league_path)?)?;
    let players: Vec<Player> =
        JsonlReader::new(config.entity_path(league_id, EntityType::Player)).read_all()?;
    let matches: Vec<Match> =
        JsonlReader::new(config.entity_path(league_id, EntityType::Match)).read_all()?;

    info!(
        %league_id,
        players = players.len(),
        matches = matches.len(),
        "Loaded league snapshot"
    );

    Ok(LeagueSnapshot::new(league, players, matches).into_ordered())
}

/// Write a league snapshot, replacing any previous files.
pub fn save_league(config: &StorageConfig, snapshot: &LeagueSnapshot) -> Result<(), StorageError> {
    let league_id = snapshot.league.id;
    fs::create_dir_all(config.league_dir(league_id))?;
    fs::write(
        config.league_path(league_id),
        serde_json::to_string_pretty(&snapshot.league)?,
    )?;

    JsonlWriter::new(config.entity_path(league_id, EntityType::Player))
        .write_all(&snapshot.players)?;
    JsonlWriter::new(config.entity_path(league_id, EntityType::Match))
        .write_all(&snapshot.matches)?;

    Ok(())
}

/// IDs of every league directory under the data dir, sorted.
pub fn list_leagues(config: &StorageConfig) -> Result<Vec<LeagueId>, StorageError> {
    let dir = config.leagues_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut leagues = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Some(id) = entry.file_name().to_str().and_then(|s| s.parse().ok()) {
                leagues.push(id);
            }
        }
    }

    leagues.sort();
    Ok(leagues)
}
