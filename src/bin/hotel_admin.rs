//! Hotel administration CLI
//!
//! Hotels are reference data; this tool is the out-of-band way to create
//! and inspect them.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ecohotel_board::config::AppConfig;
use ecohotel_board::database::queries::Queries;
use ecohotel_board::database::Database;

#[derive(Parser)]
#[command(name = "hotel-admin")]
#[command(about = "Manage the eco hotels known to the report board")]
struct Cli {
    /// Configuration file (defaults to ./ecohotel.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a hotel
    Add {
        /// Hotel display name
        #[arg(short, long)]
        name: String,
    },
    /// List hotels and the number of stored reports
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let database = Database::new(&config.database_url).await?;
    database.run_migrations().await?;

    match cli.command {
        Commands::Add { name } => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("Hotel name must not be empty");
            }
            let hotel = database.create_hotel(name).await?;
            println!("Added hotel {} with id {}", hotel.name, hotel.id);
        }
        Commands::List => {
            let hotels = Queries::list_hotels(database.pool()).await?;
            if hotels.is_empty() {
                println!("No hotels registered");
            }
            for hotel in hotels {
                println!("{:>4}  {}", hotel.id, hotel.name);
            }
            let reports = Queries::count_reports(database.pool()).await?;
            println!("{} report(s) recorded", reports);
        }
    }

    Ok(())
}
