use crate::storage::format::{private_size, CHUNK_SIZE};
use crate::storage::store::RecordStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Corrupted(String),
    Suspicious(String),
}

pub struct Diagnostics;

impl Diagnostics {
    /// Structural check of an open store's directory.
    ///
    /// The checksum only covers record data, so a damaged directory goes
    /// unnoticed at open time; this walks it explicitly.
    pub fn check_health(store: &RecordStore) -> HealthStatus {
        if !store.is_data_mapped() {
            return HealthStatus::Corrupted("Store is not mapped".to_string());
        }

        let header = store.header();

        // Check 1: Slot accounting
        if header.used > header.count {
            return HealthStatus::Corrupted(format!(
                "Used slots over limit: {}/{}",
                header.used, header.count
            ));
        }

        // Check 2: Bounds and alignment
        let public_size = store.public_size();
        let reserved = private_size(header.count) / CHUNK_SIZE * CHUNK_SIZE;
        let mut spans = Vec::new();

        for (slot, entry) in store.entries() {
            if entry.end() > public_size {
                return HealthStatus::Corrupted(format!(
                    "Record {} in slot {} ends at {}, past the data region ({})",
                    entry.id(),
                    slot,
                    entry.end(),
                    public_size
                ));
            }
            if (entry.offset() as usize) < reserved {
                return HealthStatus::Corrupted(format!(
                    "Record {} in slot {} overlaps the reserved chunks",
                    entry.id(),
                    slot
                ));
            }
            if entry.offset() as usize % CHUNK_SIZE != 0 {
                return HealthStatus::Suspicious(format!(
                    "Record {} in slot {} is not chunk aligned (offset {})",
                    entry.id(),
                    slot,
                    entry.offset()
                ));
            }
            spans.push((entry.offset() as usize, entry.end(), entry.id()));
        }

        // Check 3: Overlaps and duplicate ids
        spans.sort_unstable();
        for pair in spans.windows(2) {
            let (_, prev_end, prev_id) = pair[0];
            let (next_start, _, next_id) = pair[1];
            if next_start < prev_end {
                return HealthStatus::Corrupted(format!(
                    "Records {} and {} overlap",
                    prev_id, next_id
                ));
            }
        }

        let mut ids: Vec<u16> = spans.iter().map(|&(_, _, id)| id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return HealthStatus::Corrupted(format!("Duplicate record id {}", pair[0]));
        }

        HealthStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecordStoreConfig;
    use crate::storage::format::{entry_range, DirectoryEntry};
    use tempfile::TempDir;

    #[test]
    fn test_fresh_store_is_healthy() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let mut store = RecordStore::open(RecordStoreConfig::new(dir.path().join("h.bin"), 256, 4));
        store.get_record(1, 24);
        store.get_record(2, 3);

        assert_eq!(Diagnostics::check_health(&store), HealthStatus::Healthy);
        Ok(())
    }

    #[test]
    fn test_overlapping_entries_are_corrupted() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let config = RecordStoreConfig::new(dir.path().join("h.bin"), 256, 4);
        {
            let mut store = RecordStore::open(config.clone());
            store.get_record(1, 16);
            store.get_record(2, 16);
        }

        // point record 2 into the middle of record 1; the directory is not checksummed
        let mut bytes = std::fs::read(&config.path)?;
        let first: DirectoryEntry = bytemuck::pod_read_unaligned(&bytes[entry_range(0)]);
        let bad = DirectoryEntry::new(2, first.offset() + 8, 16);
        bytes[entry_range(1)].copy_from_slice(bytemuck::bytes_of(&bad));
        std::fs::write(&config.path, &bytes)?;

        let store = RecordStore::open(config);
        assert!(store.is_valid());
        assert!(matches!(
            Diagnostics::check_health(&store),
            HealthStatus::Corrupted(_)
        ));
        Ok(())
    }
}
