// src/storage/memory.rs
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::{PolicyRecord, SiteId};

use super::traits::{PolicyBackend, StorageError};

/// In-memory policy backend for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<HashMap<SiteId, PolicyRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sites (for assertions).
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl PolicyBackend for MemoryBackend {
    fn get(&self, site: &SiteId) -> Result<Option<PolicyRecord>, StorageError> {
        Ok(self.records.read().get(site).cloned())
    }

    fn put(&self, record: &PolicyRecord) -> Result<(), StorageError> {
        self.records
            .write()
            .insert(record.site_id.clone(), record.clone());
        Ok(())
    }

    fn sites(&self) -> Result<Vec<SiteId>, StorageError> {
        let mut sites: Vec<SiteId> = self.records.read().keys().cloned().collect();
        sites.sort();
        Ok(sites)
    }
}
