use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use sportsarb_core::ConfigLoader;
use sportsarb_data::repositories::{event_repo, quote_repo, venue_repo};
use sportsarb_data::Database;
use sportsarb_engine::{materialize_quote, scan_all, ArbDetector};
use sportsarb_web_api::ApiServer;

#[derive(Parser)]
#[command(name = "sportsarb")]
#[command(about = "Cross-venue sports arbitrage backend", long_about = None)]
struct Cli {
    /// Configuration profile overlay (config/Config.<profile>.toml)
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Server address; defaults to the configured host and port
        #[arg(short, long)]
        addr: Option<String>,
    },
    /// Run one arbitrage detection pass over all events
    Scan,
    /// Detect arbitrage opportunities for a single event
    Detect {
        /// Sports event id
        #[arg(long)]
        event_id: i32,
    },
    /// Upsert the configured venues and their fee models
    SyncVenues,
    /// Recompute derived pricing fields for every stored quote
    Rematerialize,
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match &cli.profile {
        Some(profile) => ConfigLoader::load_with_profile(profile)?,
        None => ConfigLoader::load()?,
    };
    let db = Database::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| {
                format!("{}:{}", config.server.host, config.server.port)
            });
            ApiServer::new(db, config.detection).serve(&addr).await?;
        }
        Commands::Scan => {
            let detected = scan_all(&db, &config.detection).await?;
            println!("detected {detected} arbitrage opportunities");
        }
        Commands::Detect { event_id } => {
            let detector = ArbDetector::new(config.detection);
            let mut tx = db.begin().await?;
            let Some(event) = event_repo::get(&mut tx, event_id).await? else {
                bail!("sports event {event_id} not found");
            };
            let created = detector.detect_for_event(&mut tx, &event).await?;
            tx.commit().await?;

            if created.is_empty() {
                println!("no arbitrage opportunities for event {event_id}");
            }
            for opp in created {
                println!(
                    "#{} {}/{} stake {} worst-case pnl {} roi {}",
                    opp.id,
                    opp.market_type,
                    opp.outcome_group.as_deref().unwrap_or("-"),
                    opp.total_stake,
                    opp.worst_case_pnl,
                    opp.worst_case_roi,
                );
            }
        }
        Commands::SyncVenues => {
            let mut tx = db.begin().await?;
            for seed in &config.venues {
                let venue = venue_repo::upsert(&mut tx, seed).await?;
                info!(venue_id = %venue.id, "venue synced");
            }
            tx.commit().await?;
            println!("synced {} venues", config.venues.len());
        }
        Commands::Rematerialize => {
            let mut tx = db.begin().await?;
            let rows = quote_repo::all_for_materialize(&mut tx).await?;
            let mut updated: u64 = 0;
            for mut row in rows {
                let fee_model = row.venue_fee_model.as_ref().map(|json| &json.0);
                materialize_quote(&mut row.quote, fee_model)?;
                quote_repo::update_derived(&mut tx, &row.quote).await?;
                updated += 1;
            }
            tx.commit().await?;
            println!("rematerialized {updated} quotes");
        }
        Commands::Migrate => {
            db.migrate().await?;
            println!("migrations applied");
        }
    }

    Ok(())
}
