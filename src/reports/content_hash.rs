use sha2::{Digest, Sha256};

use crate::database::models::Report;

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// Canonical note for a report; this exact text is what gets hashed.
pub fn report_note(energy_produced: i64, energy_consumed: i64) -> String {
    format!(
        "Energy Produced: {}\t Energy Consumed: {}",
        energy_produced, energy_consumed
    )
}

/// Lowercase hex SHA-256 of the report's note.
pub fn content_hash(report: &Report) -> String {
    let note = report_note(report.energy_produced, report.energy_consumed);
    hex::encode(Sha256::digest(note.as_bytes()))
}

pub fn is_well_formed_hash(hash: &str) -> bool {
    hash.len() == HASH_HEX_LEN
        && hash
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_format() {
        assert_eq!(
            report_note(500, 300),
            "Energy Produced: 500\t Energy Consumed: 300"
        );
    }

    #[test]
    fn test_known_digests() {
        let report = Report::new(1, 100, 50);
        assert_eq!(
            content_hash(&report),
            "59dcb1986ac0acef378d368ca2ccce78adf1a364d9e13086414e0d38a20f09bb"
        );

        let report = Report::new(1, 500, 300);
        assert_eq!(
            content_hash(&report),
            "db78d1de7582a4ff22ab4700ea9b2f0659693331d6bf898b8e64118565794767"
        );
    }

    #[test]
    fn test_hash_ignores_hotel_and_date() {
        let mut a = Report::new(1, 0, 0);
        let b = Report::new(2, 0, 0);
        a.date = a.date.pred_opt().unwrap();
        assert_eq!(content_hash(&a), content_hash(&b));
        assert_eq!(
            content_hash(&a),
            "4e898b7b5112e6b63b7894ae0ff9221e83a95b9ad909c4b86c93d7e98d985259"
        );
    }

    #[test]
    fn test_well_formed_hash() {
        assert!(is_well_formed_hash(&content_hash(&Report::new(1, 7, 9))));
        assert!(!is_well_formed_hash("abc"));
        assert!(!is_well_formed_hash(&"G".repeat(HASH_HEX_LEN)));
        assert!(!is_well_formed_hash(&"A".repeat(HASH_HEX_LEN)));
    }
}
