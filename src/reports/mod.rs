//! Report Recording Module
//!
//! Binds an energy report to a ledger proof: the report's note is hashed,
//! the hash is written to the ledger, and the hash plus transaction id are
//! stored with the report.

pub mod content_hash;
pub mod recorder;

pub use content_hash::{content_hash, report_note};
pub use recorder::ReportRecorder;
