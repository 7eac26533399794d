use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_ranker::config::AppConfig;
use league_ranker::models::{LeagueId, LeagueSnapshot, RankingTable};
use league_ranker::ranking::{RankingEngine, StrategyRegistry};
use league_ranker::storage::{self, JsonlWriter, StorageConfig};

#[derive(Parser)]
#[command(name = "league-ranker")]
#[command(about = "League standings with pluggable ranking strategies")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./league-ranker.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current standings of a league
    Rank {
        /// League ID
        #[arg(long)]
        league: LeagueId,

        /// Strategy name (default: the league's own, then the configured default)
        #[arg(long)]
        strategy: Option<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Also write the ranking rows to this JSONL file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the ranking history of a league as JSON
    History {
        /// League ID
        #[arg(long)]
        league: LeagueId,

        /// Strategy name (default: the league's own, then the configured default)
        #[arg(long)]
        strategy: Option<String>,
    },

    /// List the matches of a league in chronological order
    Matches {
        /// League ID
        #[arg(long)]
        league: LeagueId,
    },

    /// List leagues found in the data directory
    Leagues,

    /// List registered ranking strategies
    Strategies,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

    // Initialize tracing
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting league-ranker v{}", env!("CARGO_PKG_VERSION"));

    let storage_config =
        StorageConfig::new(cli.data_dir.clone().unwrap_or_else(|| config.data_dir.clone()));
    let engine = RankingEngine::new(StrategyRegistry::default(), config.ranking.clone());

    match cli.command {
        Commands::Rank {
            league,
            strategy,
            format,
            output,
        } => {
            let snapshot = storage::load_league(&storage_config, league)?;
            let strategy = resolve_strategy(strategy, &snapshot, &config);

            let table = engine
                .compute_ranking(&strategy, league, &snapshot.players, &snapshot.matches)
                .with_context(|| format!("Failed to rank league {}", league))?;

            match format {
                OutputFormat::Table => print_table(&snapshot, &strategy, &table),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table.rows)?),
            }

            if let Some(path) = output {
                let written = JsonlWriter::new(path.clone()).write_all(&table.rows)?;
                tracing::info!("Wrote {} ranking rows to {:?}", written, path);
            }
        }

        Commands::History { league, strategy } => {
            let snapshot = storage::load_league(&storage_config, league)?;
            let strategy = resolve_strategy(strategy, &snapshot, &config);

            let history = engine
                .compute_ranking_history(&strategy, league, &snapshot.players, &snapshot.matches)
                .with_context(|| {
                    format!("Failed to build ranking history for league {}", league)
                })?;

            println!("{}", serde_json::to_string_pretty(&history)?);
        }

        Commands::Matches { league } => {
            let snapshot = storage::load_league(&storage_config, league)?;

            println!("\n=== {} ===", snapshot.league.name);
            for m in snapshot.match_summaries()? {
                println!(
                    "{}  {} - {} ({} - {})",
                    m.date,
                    m.home_player_username,
                    m.away_player_username,
                    m.home_score,
                    m.away_score
                );
            }
        }

        Commands::Leagues => {
            for league_id in storage::list_leagues(&storage_config)? {
                let snapshot = storage::load_league(&storage_config, league_id)?;
                println!(
                    "{}  {} ({}, {} players, {} matches)",
                    league_id,
                    snapshot.league.name,
                    snapshot.league.ranking_system_or(&config.ranking.default_strategy),
                    snapshot.players.len(),
                    snapshot.matches.len()
                );
            }
        }

        Commands::Strategies => {
            for name in engine.registry().names() {
                let marker = if name == config.ranking.default_strategy {
                    " (default)"
                } else {
                    ""
                };
                println!("{}{}", name, marker);
            }
        }
    }

    Ok(())
}

/// Explicit flag first, then the league's own system, then the configured default.
fn resolve_strategy(
    flag: Option<String>,
    snapshot: &LeagueSnapshot,
    config: &AppConfig,
) -> String {
    flag.unwrap_or_else(|| {
        snapshot
            .league
            .ranking_system_or(&config.ranking.default_strategy)
            .to_string()
    })
}

fn print_table(snapshot: &LeagueSnapshot, strategy: &str, table: &RankingTable) {
    println!("\n=== {} ({}) ===", snapshot.league.name, strategy);
    println!("{:>4}  {:<24} {:>8} {:>8}", "Pos", "Player", "Pts", "Tie");
    for row in &table.rows {
        println!(
            "{:>4}  {:<24} {:>8} {:>8}",
            row.position, row.username, row.pts_primary, row.pts_secondary
        );
    }
    println!("\n{} players, {} matches", table.len(), snapshot.matches.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_ranker::models::League;

    fn snapshot(league_json: &str) -> LeagueSnapshot {
        let league: League = serde_json::from_str(league_json).unwrap();
        LeagueSnapshot::new(league, Vec::new(), Vec::new())
    }

    fn config(default_strategy: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.ranking.default_strategy = default_strategy.to_string();
        config
    }

    #[test]
    fn test_league_without_strategy_uses_configured_default() {
        let snapshot = snapshot(r#"{"id": "00000000-0000-0000-0000-000000000001", "name": "Club"}"#);

        let resolved = resolve_strategy(None, &snapshot, &config("perron_frobenius"));
        assert_eq!(resolved, "perron_frobenius");
    }

    #[test]
    fn test_strategy_resolution_order() {
        let snapshot = snapshot(
            r#"{"id": "00000000-0000-0000-0000-000000000001", "name": "Club", "ranking_system": "regular"}"#,
        );
        let config = config("perron_frobenius");

        assert_eq!(resolve_strategy(None, &snapshot, &config), "regular");
        assert_eq!(
            resolve_strategy(Some("perron_frobenius".to_string()), &snapshot, &config),
            "perron_frobenius"
        );
    }
}
