use tracing::{info, warn};

use crate::database::models::Report;
use crate::database::Database;
use crate::error::EcoHotelError;
use crate::ledger::LedgerWriter;
use crate::reports::content_hash::content_hash;

/// Writes report hashes to the ledger and stores the recorded report.
#[derive(Clone)]
pub struct ReportRecorder {
    database: Database,
}

impl ReportRecorder {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Hash `report`, submit the hash through `ledger`, then persist the report
    /// with its hash and transaction id.
    ///
    /// If submission fails the error is returned as-is and `report` is left
    /// untouched and unsaved. There is no retry and no rollback on the ledger
    /// side: a storage failure after a successful submission leaves an
    /// orphaned transaction, which is only logged.
    pub async fn record(
        &self,
        ledger: &dyn LedgerWriter,
        report: &mut Report,
    ) -> Result<(), EcoHotelError> {
        if report.hash.is_some() || report.tx_id.is_some() {
            return Err(EcoHotelError::ValidationError(
                "Report has already been recorded".to_string(),
            ));
        }
        if report.energy_produced < 0 || report.energy_consumed < 0 {
            return Err(EcoHotelError::ValidationError(
                "Energy values must be non-negative".to_string(),
            ));
        }

        let hash = content_hash(report);
        let tx_id = ledger.submit(hash.as_bytes()).await?;

        let id = match self
            .database
            .insert_report(report, Some(&hash), Some(tx_id.as_str()))
            .await
        {
            Ok(id) => id,
            Err(e) => {
                warn!(
                    "Ledger transaction {} for hotel {} has no stored report: {}",
                    tx_id, report.hotel_id, e
                );
                return Err(e.into());
            }
        };

        info!(
            "Recorded report {} for hotel {} (hash {}, tx {})",
            id, report.hotel_id, hash, tx_id
        );

        report.id = Some(id);
        report.hash = Some(hash);
        report.tx_id = Some(tx_id.into_inner());
        Ok(())
    }
}
