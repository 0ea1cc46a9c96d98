//! Linkboard server
//!
//! Serves the bookmark REST API, or populates a demo dataset.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linkboard_api::{ApiServer, ApiServerConfig};
use linkboard_db::{seed, Session, DEFAULT_DATABASE_URL};
use sea_orm::DatabaseConnection;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Linkboard - save links, label them and arrange them on boards
#[derive(Parser, Debug)]
#[command(name = "linkboard")]
#[command(about = "Linkboard - save links, label them and arrange them on boards")]
#[command(version)]
#[command(long_version = concat!(env!("GIT_TAG"), "\nCommit: ", env!("GIT_HASH"), "\nBuilt: ", env!("BUILD_TIME")))]
struct Cli {
    /// Database URL (sqlite://path?mode=rwc or postgres://...)
    #[arg(long, global = true, env = "LINKBOARD_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Address to bind the API server
    #[arg(long, global = true, env = "LINKBOARD_BIND_ADDR", default_value = "127.0.0.1:8000")]
    bind_addr: SocketAddr,

    /// Disable CORS for localhost origins
    #[arg(long, global = true)]
    no_cors: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the REST API server (default)
    Serve,

    /// Populate the database with a demo user, links, labels and a board
    #[command(long_about = r#"
Populate the database with a demo dataset: one user, three links, three
labels and one board. The links carry labels, the board is the user's
favorite and main board, and it filters on one label.

Log in afterwards with:
  email:    user@email.com
  password: 12345678
    "#)]
    Seed,
}

/// Setup logging with the specified log level
fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

async fn open_database(database_url: &str) -> Result<DatabaseConnection> {
    let db = linkboard_db::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database {}", database_url))?;

    linkboard_db::migrate(&db)
        .await
        .context("Failed to run database migrations")?;

    Ok(db)
}

async fn run_seed(db: &DatabaseConnection) -> Result<()> {
    let session = Session::begin(db).await.context("Failed to open session")?;

    let seeded = seed::populate(&session)
        .await
        .context("Failed to populate demo data")?;
    session.commit().await.context("Failed to commit demo data")?;

    info!(
        "Demo user {} ready (login: {} / {})",
        seeded.user_id,
        seed::DEMO_EMAIL,
        seed::DEMO_PASSWORD
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli.log_level);

    let db = open_database(&cli.database_url).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Seed => run_seed(&db).await,
        Commands::Serve => {
            info!("Linkboard starting...");

            let server = ApiServer::new(
                ApiServerConfig {
                    bind_addr: cli.bind_addr,
                    enable_cors: !cli.no_cors,
                },
                db,
            );

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl+C, shutting down...");
                }
                result = server.start() => {
                    if let Err(e) = result {
                        error!("API server error: {:#}", e);
                        return Err(e);
                    }
                }
            }

            info!("Linkboard stopped");
            Ok(())
        }
    }
}
