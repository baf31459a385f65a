use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
}

/// An energy report for one hotel.
///
/// A report starts unrecorded (`hash` and `tx_id` both `None`) and becomes
/// recorded once the recorder has written its hash to the ledger and stored
/// the row. Both fields are only ever set together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Report {
    pub id: Option<i64>,
    pub hotel_id: i64,
    pub energy_produced: i64,
    pub energy_consumed: i64,
    pub date: NaiveDate,
    pub hash: Option<String>,
    pub tx_id: Option<String>,
}

impl Report {
    pub fn new(hotel_id: i64, energy_produced: i64, energy_consumed: i64) -> Self {
        Self {
            id: None,
            hotel_id,
            energy_produced,
            energy_consumed,
            date: Utc::now().date_naive(),
            hash: None,
            tx_id: None,
        }
    }

    pub fn is_recorded(&self) -> bool {
        self.hash.is_some() && self.tx_id.is_some()
    }
}

/// Report row joined with its hotel's display name, as listed on the board.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReportListing {
    pub id: i64,
    pub hotel_id: i64,
    pub hotel_name: String,
    pub energy_produced: i64,
    pub energy_consumed: i64,
    pub date: NaiveDate,
    pub hash: Option<String>,
    pub tx_id: Option<String>,
}
