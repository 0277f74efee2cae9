//! Sharded in-memory calibration store.
//!
//! One shard per (platform, format_type) key, each behind its own
//! `RwLock`. The outer map lock is held only long enough to clone a
//! shard handle, so appends and reads for unrelated keys never
//! serialize against each other.

use std::sync::{Arc, RwLock};

use prescore_core::traits::CalibrationStore;
use prescore_core::types::{CalibrationRecord, FormatType};
use rustc_hash::FxHashMap;

type ShardKey = (String, FormatType);
type Shard = Arc<RwLock<Vec<CalibrationRecord>>>;

/// In-process implementation of [`CalibrationStore`]. Constructed once
/// per process and shared by reference with the tracker and the
/// historical scorer.
#[derive(Default)]
pub struct SharedCalibrationStore {
    shards: RwLock<FxHashMap<ShardKey, Shard>>,
}

impl SharedCalibrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn shard(&self, platform: &str, format_type: FormatType) -> Option<Shard> {
        let shards = self.shards.read().unwrap_or_else(|e| e.into_inner());
        shards
            .get(&(platform.to_string(), format_type))
            .cloned()
    }

    fn shard_or_insert(&self, platform: &str, format_type: FormatType) -> Shard {
        if let Some(shard) = self.shard(platform, format_type) {
            return shard;
        }
        let mut shards = self.shards.write().unwrap_or_else(|e| e.into_inner());
        shards
            .entry((platform.to_string(), format_type))
            .or_default()
            .clone()
    }
}

impl CalibrationStore for SharedCalibrationStore {
    fn append(&self, record: CalibrationRecord) {
        let shard = self.shard_or_insert(&record.platform, record.format_type);
        let mut records = shard.write().unwrap_or_else(|e| e.into_inner());
        records.push(record);
    }

    fn records_for(&self, platform: &str, format_type: FormatType) -> Vec<CalibrationRecord> {
        match self.shard(platform, format_type) {
            Some(shard) => {
                let records = shard.read().unwrap_or_else(|e| e.into_inner());
                records.clone()
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc as StdArc;
    use std::thread;

    fn record(platform: &str, format_type: FormatType, actual: f64) -> CalibrationRecord {
        CalibrationRecord {
            predicted_score: 50.0,
            actual_score: actual,
            calibration_delta: actual - 50.0,
            platform: platform.to_string(),
            format_type,
            posted_at: 0,
        }
    }

    #[test]
    fn test_append_and_read_isolated_by_key() {
        let store = SharedCalibrationStore::new();
        store.append(record("youtube", FormatType::ShortForm, 60.0));
        store.append(record("youtube", FormatType::LongForm, 70.0));
        store.append(record("tiktok", FormatType::ShortForm, 80.0));

        assert_eq!(store.records_for("youtube", FormatType::ShortForm).len(), 1);
        assert_eq!(store.records_for("youtube", FormatType::LongForm).len(), 1);
        assert_eq!(store.records_for("tiktok", FormatType::ShortForm).len(), 1);
        assert!(store.records_for("tiktok", FormatType::LongForm).is_empty());
    }

    #[test]
    fn test_warm_up_bulk_load() {
        let store = SharedCalibrationStore::new();
        store.warm_up(vec![
            record("youtube", FormatType::ShortForm, 60.0),
            record("youtube", FormatType::ShortForm, 70.0),
        ]);
        assert_eq!(store.len_for("youtube", FormatType::ShortForm), 2);
    }

    #[test]
    fn test_concurrent_appends_across_keys() {
        let store = StdArc::new(SharedCalibrationStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = StdArc::clone(&store);
                thread::spawn(move || {
                    let platform = if i % 2 == 0 { "youtube" } else { "tiktok" };
                    for _ in 0..100 {
                        store.append(record(platform, FormatType::ShortForm, 50.0));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len_for("youtube", FormatType::ShortForm), 400);
        assert_eq!(store.len_for("tiktok", FormatType::ShortForm), 400);
    }
}
