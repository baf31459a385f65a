pub mod models;
pub mod queries;
pub mod schema;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use models::{Hotel, Report};

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Database { pool })
    }

    /// Private in-memory database with the schema applied. Pinned to a single
    /// connection since every SQLite memory connection is its own database.
    pub async fn new_in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let database = Database { pool };
        database.run_migrations().await?;
        Ok(database)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(schema::INITIAL_SCHEMA)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn create_hotel(&self, name: &str) -> Result<Hotel, sqlx::Error> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            INSERT INTO hotels (name)
            VALUES (?)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        debug!("Created hotel {} ({})", hotel.name, hotel.id);
        Ok(hotel)
    }

    /// Insert a report row and return its id. The row is written with whatever
    /// hash/tx id the caller supplies; only the recorder writes recorded rows.
    pub async fn insert_report(
        &self,
        report: &Report,
        hash: Option<&str>,
        tx_id: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reports (hotel_id, energy_produced, energy_consumed, date, hash, tx_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(report.hotel_id)
        .bind(report.energy_produced)
        .bind(report.energy_consumed)
        .bind(report.date)
        .bind(hash)
        .bind(tx_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
