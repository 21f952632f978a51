use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pizzeria_api::{build_router, config::Config, state::AppState};
use pizzeria_store::{establish_connection, run_migrations, seed::seed};

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations and serve the HTTP API
    Serve,
    /// Apply pending migrations
    Migrate,
    /// Replace all rows with the sample data set
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Migrate => {
            let mut conn = establish_connection(&config.database_url)?;
            let applied = run_migrations(&mut conn)?;
            info!(applied, database = %config.database_url, "migrations complete");
            Ok(())
        }
        Commands::Seed => {
            let mut conn = establish_connection(&config.database_url)?;
            run_migrations(&mut conn)?;
            seed(&mut conn)?;
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::open(&config.database_url)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(database = %config.database_url, "Pizzeria API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
