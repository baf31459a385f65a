#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ecohotel_board::database::models::Hotel;
use ecohotel_board::database::Database;
use ecohotel_board::ledger::{LedgerConnector, LedgerError, LedgerWriter, TransactionId};

/// Setup an in-memory SQLite database for testing
pub async fn setup_test_db() -> Database {
    Database::new_in_memory().await.expect("Failed to create test database")
}

/// Database with the reference hotels already created
pub async fn setup_test_db_with_hotels() -> (Database, Vec<Hotel>) {
    let db = setup_test_db().await;
    let mut hotels = Vec::new();
    for name in ["Pomelia", "Casa Verde", "Solaria"] {
        hotels.push(db.create_hotel(name).await.expect("Failed to create hotel"));
    }
    (db, hotels)
}

/// In-process ledger double. Remembers every payload and answers with a
/// deterministic transaction id, or fails every submission.
#[derive(Clone, Default)]
pub struct ScriptedLedger {
    fail: bool,
    submissions: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl ScriptedLedger {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn submissions(&self) -> Vec<Vec<u8>> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerWriter for ScriptedLedger {
    fn address(&self) -> String {
        "0x00000000000000000000000000000000000000aa".to_string()
    }

    async fn submit(&self, payload: &[u8]) -> Result<TransactionId, LedgerError> {
        if self.fail {
            return Err(LedgerError::Rpc {
                code: -32000,
                message: "insufficient funds for gas * price + value".to_string(),
            });
        }
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(payload.to_vec());
        Ok(TransactionId::new(format!("0x{:064x}", submissions.len())))
    }
}

/// Connector handing out clones of one [`ScriptedLedger`]
pub struct ScriptedConnector {
    pub ledger: ScriptedLedger,
    pub connections: AtomicUsize,
}

impl ScriptedConnector {
    pub fn new(ledger: ScriptedLedger) -> Arc<Self> {
        Arc::new(Self {
            ledger,
            connections: AtomicUsize::new(0),
        })
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl LedgerConnector for ScriptedConnector {
    fn connect(&self) -> Result<Box<dyn LedgerWriter>, LedgerError> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.ledger.clone()))
    }
}
