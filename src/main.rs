use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use battle_stats::api::state::AppState;
use battle_stats::calculate::{assign_ranks, collapse_groups};
use battle_stats::config::AppConfig;
use battle_stats::ingest::{build_player_records, parse_battle_log};
use battle_stats::models::{
    dedup_roster, faction_matches, BattleRecord, BlessingRecord, Person, TimeWindow,
};
use battle_stats::storage::{dedup_by_id, EntityType, JsonlReader, JsonlWriter, StorageConfig};

#[derive(Parser)]
#[command(name = "battle-stats")]
#[command(about = "Game battle statistics tracker")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Parse a battle log file and store its events
    Ingest {
        /// Path to the battle log text file
        path: String,

        /// Drop previously stored events first
        #[arg(long)]
        replace: bool,

        /// Parse and report but don't store
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the player rankings table
    Rankings {
        /// Only show players of this faction
        #[arg(long)]
        faction: Option<String>,

        /// Only show players with this job
        #[arg(long)]
        job: Option<String>,

        /// Time range: today, yesterday, week, month, three_months, all
        #[arg(long, default_value = "all")]
        time_range: String,

        /// Collapse grouped players into one row per group
        #[arg(long)]
        grouped: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if std::path::Path::new(&cli.config).exists() {
        AppConfig::from_file(&PathBuf::from(&cli.config))
            .with_context(|| format!("Failed to load config from {}", cli.config))?
    } else {
        AppConfig::default()
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting battle-stats v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState {
                storage: Arc::new(storage),
                upload_max_bytes: config.upload.max_bytes,
            };
            let app = battle_stats::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Ingest {
            path,
            replace,
            dry_run,
        } => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read battle log: {}", path))?;
            let parsed = parse_battle_log(&content);

            println!("\n=== Ingest Results ===");
            println!("Lines read:       {}", parsed.lines_total);
            println!("Lines skipped:    {}", parsed.lines_skipped);
            println!("Kill events:      {}", parsed.kills.len());
            println!("Blessing events:  {}", parsed.blessings.len());

            if dry_run {
                println!("\n(dry run - no data written to disk)");
                return Ok(());
            }

            let kill_writer =
                JsonlWriter::<BattleRecord>::for_entity(&storage, EntityType::BattleRecord);
            let blessing_writer =
                JsonlWriter::<BlessingRecord>::for_entity(&storage, EntityType::BlessingRecord);
            if replace {
                kill_writer.replace_all(&parsed.kills)?;
                blessing_writer.replace_all(&parsed.blessings)?;
                println!("\nStored (replaced previous events).");
            } else {
                kill_writer.append_batch(&parsed.kills)?;
                blessing_writer.append_batch(&parsed.blessings)?;
                println!("\nStored (appended).");
            }
        }
        Commands::Rankings {
            faction,
            job,
            time_range,
            grouped,
        } => {
            let now = chrono::Utc::now().naive_utc();
            let window = TimeWindow::from_keyword(&time_range, now)
                .with_context(|| format!("Unknown time range: {}", time_range))?;

            let kills = JsonlReader::<BattleRecord>::for_entity(&storage, EntityType::BattleRecord)
                .read_all()
                .unwrap_or_default();
            let kills = dedup_by_id(kills, |k| k.id.as_str());

            let blessings =
                JsonlReader::<BlessingRecord>::for_entity(&storage, EntityType::BlessingRecord)
                    .read_all()
                    .unwrap_or_default();
            let blessings = dedup_by_id(blessings, |b| b.id.as_str());

            let roster = JsonlReader::<Person>::for_entity(&storage, EntityType::Person)
                .read_all()
                .unwrap_or_default();
            let roster = dedup_roster(roster);

            let mut records = build_player_records(&kills, &blessings, &roster, &window);
            if let Some(key) = &faction {
                records.retain(|r| faction_matches(&r.faction, key));
            }
            if let Some(j) = &job {
                records.retain(|r| r.job == *j);
            }
            if grouped {
                records = collapse_groups(records);
            }
            assign_ranks(&mut records);

            if records.is_empty() {
                println!("No battle activity in the selected window.");
                return Ok(());
            }

            println!(
                "{:<5} {:<16} {:<10} {:<10} {:>6} {:>7} {:>10} {:>7} {:>7}  {}",
                "Rank", "Player", "Faction", "Job", "Kills", "Deaths", "Blessings", "Score", "K/D",
                "Level"
            );
            for r in &records {
                println!(
                    "{:<5} {:<16} {:<10} {:<10} {:>6} {:>7} {:>10} {:>7} {:>7.2}  {}",
                    r.rank.map(|n| n.to_string()).unwrap_or_default(),
                    r.name,
                    r.faction,
                    r.job,
                    r.kills,
                    r.deaths,
                    r.blessings,
                    r.score,
                    r.kd_ratio,
                    r.level
                );
            }
        }
    }

    Ok(())
}
