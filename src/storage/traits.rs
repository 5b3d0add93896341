// src/storage/traits.rs
use std::fmt::Debug;
use std::io;
use thiserror::Error;

use crate::domain::{PolicyRecord, SiteId};

/// Errors raised by the durable policy medium.
///
/// These are structural failures and are always surfaced to the caller.
/// Business outcomes such as a site without rules are never reported here.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("Invalid policy store format")]
    InvalidFormat,

    #[error("Unsupported policy store format version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid policy record: {0}")]
    InvalidRecord(String),
}

/// Durable key-value medium for site policies.
///
/// Implementations hold no business logic. `put` replaces the whole record
/// for a site and must not return before the write is durable.
pub trait PolicyBackend: Send + Sync + Debug {
    /// Fetch the record for a site, `None` when no rules were ever stored.
    fn get(&self, site: &SiteId) -> Result<Option<PolicyRecord>, StorageError>;

    /// Create or overwrite the record for `record.site_id`.
    fn put(&self, record: &PolicyRecord) -> Result<(), StorageError>;

    /// All sites with stored rules, in ascending order.
    fn sites(&self) -> Result<Vec<SiteId>, StorageError>;
}
