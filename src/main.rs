use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use tracing_subscriber::EnvFilter;

use pigeon_pool::config::Settings;
use pigeon_pool::{api, cli, db};

#[derive(Parser)]
#[command(name = "pigeon-pool")]
#[command(about = "Scoring engine for a weekly football pick'em pool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Defaults to API_PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Initialize the database
    InitDb,
    /// Load a demo season
    Seed,
    /// Import picks from a CSV file
    ImportPicks {
        path: PathBuf,
    },
    /// Print the results board for a locked week
    Week {
        week: u32,
    },
    /// Print year-to-date standings
    Ytd {
        /// Write the standings to a CSV file instead of stdout
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Show the current week and schedule signal
    CurrentWeek,
}

async fn open_pool(settings: &Settings) -> Result<SqlitePool> {
    let pool = db::create_pool(&settings.database_url).await?;
    db::init_database(&pool).await?;
    Ok(pool)
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env()?;

    // RUST_LOG wins over LOGGING_LEVEL
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::debug!("Loaded settings for environment '{}'", settings.app_env);

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port }) => {
            let port = port.unwrap_or(settings.api_port);
            tracing::info!("Starting Pigeon Pool API server on port {}", port);
            api::serve(&settings, port).await?;
        }
        Some(Commands::InitDb) => {
            tracing::info!("Initializing database...");
            open_pool(&settings).await?;
            println!("✅ Database ready at {}", settings.database_url);
        }
        Some(Commands::Seed) => {
            let pool = open_pool(&settings).await?;
            db::seed_data(&pool).await?;
        }
        Some(Commands::ImportPicks { path }) => {
            let pool = open_pool(&settings).await?;
            cli::import_picks(&pool, &path).await?;
        }
        Some(Commands::Week { week }) => {
            let pool = open_pool(&settings).await?;
            cli::show_week(&pool, week).await?;
        }
        Some(Commands::Ytd { csv }) => {
            let pool = open_pool(&settings).await?;
            cli::show_ytd(&pool, &settings.payouts, csv.as_deref()).await?;
        }
        Some(Commands::CurrentWeek) => {
            let pool = open_pool(&settings).await?;
            cli::show_current_week(&pool).await?;
        }
        None => {
            // Default to serving
            tracing::info!("Starting Pigeon Pool API server on port {}", settings.api_port);
            api::serve(&settings, settings.api_port).await?;
        }
    }

    Ok(())
}
