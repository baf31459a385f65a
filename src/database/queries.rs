use sqlx::SqlitePool;
use crate::database::models::*;

pub struct Queries;

impl Queries {
    pub async fn list_hotels(pool: &SqlitePool) -> Result<Vec<Hotel>, sqlx::Error> {
        sqlx::query_as::<_, Hotel>("SELECT id, name FROM hotels ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn get_hotel(pool: &SqlitePool, hotel_id: i64) -> Result<Option<Hotel>, sqlx::Error> {
        sqlx::query_as::<_, Hotel>("SELECT id, name FROM hotels WHERE id = ?")
            .bind(hotel_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn get_report(pool: &SqlitePool, report_id: i64) -> Result<Option<Report>, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, hotel_id, energy_produced, energy_consumed, date, hash, tx_id
            FROM reports
            WHERE id = ?
            "#,
        )
        .bind(report_id)
        .fetch_optional(pool)
        .await
    }

    /// All reports with their hotel name, newest first
    pub async fn list_reports(pool: &SqlitePool) -> Result<Vec<ReportListing>, sqlx::Error> {
        sqlx::query_as::<_, ReportListing>(
            r#"
            SELECT r.id, r.hotel_id, h.name AS hotel_name, r.energy_produced,
                   r.energy_consumed, r.date, r.hash, r.tx_id
            FROM reports r
            JOIN hotels h ON h.id = r.hotel_id
            ORDER BY r.date DESC, r.id DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count_reports(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(pool)
            .await
    }
}
