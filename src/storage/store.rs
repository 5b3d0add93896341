// src/storage/store.rs
use ahash::AHasher;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{PolicyRecord, SiteId};

use super::file::FileBackend;
use super::memory::MemoryBackend;
use super::traits::{PolicyBackend, StorageError};

/// Number of write-lock shards.
/// Must be a power of 2 for fast modulo via bitwise AND.
const NUM_SHARDS: usize = 16;

/// Site policy store over an injected durable backend.
///
/// Writes for the same site are serialized through a sharded lock so a
/// reader always sees a complete record. Reads take no store-level lock.
#[derive(Debug)]
pub struct PolicyStore {
    backend: Arc<dyn PolicyBackend>,
    write_shards: Vec<Mutex<()>>,
}

impl PolicyStore {
    /// Create a store over the given backend.
    pub fn new(backend: Arc<dyn PolicyBackend>) -> Self {
        let write_shards = (0..NUM_SHARDS).map(|_| Mutex::new(())).collect();

        PolicyStore {
            backend,
            write_shards,
        }
    }

    /// Create a store backed by an in-memory map.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Open a file-backed store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::new(Arc::new(FileBackend::open(path)?)))
    }

    /// Create or replace the rules for a site.
    ///
    /// The previous record, if any, is overwritten entirely. Returns the
    /// record as stored once it is durable.
    pub fn write_site_rules<I, S>(
        &self,
        site: impl Into<SiteId>,
        approval_limit: Decimal,
        banned_vendors: I,
    ) -> Result<PolicyRecord, StorageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let record = PolicyRecord::new(site, approval_limit, banned_vendors);
        if let Err(reason) = record.validate() {
            warn!(site = %record.site_id, %reason, "Rejected policy record");
            return Err(StorageError::InvalidRecord(reason));
        }

        let shard = &self.write_shards[self.shard_index(record.site_id.as_str())];
        let _guard = shard.lock();

        self.backend.put(&record)?;

        info!(
            site = %record.site_id,
            approval_limit = %record.approval_limit,
            banned = record.banned_vendors.len(),
            "Stored site rules"
        );

        Ok(record)
    }

    /// Read the rules for a site.
    ///
    /// `Ok(None)` means no rules were ever stored for the site.
    pub fn read_site_rules(&self, site: &SiteId) -> Result<Option<PolicyRecord>, StorageError> {
        let record = self.backend.get(site)?;
        debug!(site = %site, found = record.is_some(), "Read site rules");
        Ok(record)
    }

    /// List all sites with stored rules.
    pub fn sites(&self) -> Result<Vec<SiteId>, StorageError> {
        self.backend.sites()
    }

    /// Compute the write shard for a site ID.
    #[inline]
    fn shard_index(&self, site: &str) -> usize {
        let mut hasher = AHasher::default();
        site.hash(&mut hasher);
        (hasher.finish() as usize) & (NUM_SHARDS - 1)
    }
}
