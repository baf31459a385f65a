use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecohotel_board::config::{AppConfig, LedgerConfig};
use ecohotel_board::database::Database;
use ecohotel_board::ledger::EthereumConnector;
use ecohotel_board::web::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecohotel_board=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EcoHotel Board");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => fatal(&e),
    };
    info!("Configuration loaded");

    // Ledger parameters are a startup precondition
    let ledger_config = match LedgerConfig::load(Path::new(&config.ledger_config_path)) {
        Ok(ledger_config) => Arc::new(ledger_config),
        Err(e) => fatal(&e),
    };
    info!("Ledger configuration loaded from {}", config.ledger_config_path);

    let database = match Database::new(&config.database_url).await {
        Ok(database) => database,
        Err(e) => fatal(&e),
    };
    info!("Database connected");

    database.run_migrations().await?;
    info!("Database migrations completed");

    let connector = EthereumConnector::new(ledger_config);
    info!("Ledger network at {}", connector.config().api_url());

    let state = AppState::new(database, Arc::new(connector));
    let app = build_app(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn fatal(err: &dyn std::fmt::Display) -> ! {
    error!("{}", err);
    std::process::exit(1);
}
