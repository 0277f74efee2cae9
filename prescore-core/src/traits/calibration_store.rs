//! Calibration store boundary.
//!
//! Rolling calibration state is the engine's only shared mutable
//! resource. It is an explicit, injectable store keyed by
//! (platform, format_type) — constructed once per process and passed by
//! reference to both the outcome tracker and the historical scorer —
//! never a module-level singleton.

use crate::types::calibration::CalibrationRecord;
use crate::types::content::FormatType;

/// Append-and-read store of calibration records keyed by
/// (platform, format_type).
///
/// Implementations must support concurrent appends and reads without
/// serializing unrelated keys against each other. The sharded in-memory
/// implementation lives in `prescore-engine`.
pub trait CalibrationStore: Send + Sync {
    /// Append one record under its (platform, format_type) key.
    fn append(&self, record: CalibrationRecord);

    /// All records for a key, oldest first. Returns an owned snapshot so
    /// readers never hold a lock across scoring work.
    fn records_for(&self, platform: &str, format_type: FormatType) -> Vec<CalibrationRecord>;

    /// Number of records for a key.
    fn len_for(&self, platform: &str, format_type: FormatType) -> usize {
        self.records_for(platform, format_type).len()
    }

    /// Bulk-load history from the persistence collaborator at startup.
    fn warm_up(&self, records: Vec<CalibrationRecord>) {
        for record in records {
            self.append(record);
        }
    }
}
