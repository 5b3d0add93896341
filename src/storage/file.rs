// src/storage/file.rs
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::{PolicyRecord, SiteId};

use super::traits::{PolicyBackend, StorageError};

/// Current on-disk document version.
pub const FORMAT_VERSION: u32 = 1;

/// Rules stored for one site inside the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRules {
    #[serde(with = "rust_decimal::serde::str")]
    approval_limit: Decimal,

    #[serde(default)]
    banned_vendors: Vec<String>,
}

/// Whole policy store as persisted on disk.
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    format_version: u32,

    updated_at: DateTime<Utc>,

    #[serde(default)]
    sites: BTreeMap<String, StoredRules>,
}

impl StoreDocument {
    fn empty() -> Self {
        StoreDocument {
            format_version: FORMAT_VERSION,
            updated_at: Utc::now(),
            sites: BTreeMap::new(),
        }
    }
}

/// Policy backend persisting every site in a single JSON document.
///
/// The file holds one line, `JSON\tCRC32`. Writes go to a temp file that is
/// synced and renamed over the existing file, so readers observe either the
/// previous document or the new one.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the document
    write_lock: Mutex<()>,
}

impl FileBackend {
    /// Open a store file, creating its directory if needed.
    ///
    /// An existing file is read once so a corrupt store fails here rather
    /// than on the first order.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let backend = FileBackend {
            path,
            write_lock: Mutex::new(()),
        };

        match backend.load_document()? {
            Some(doc) => info!(
                path = %backend.path.display(),
                sites = doc.sites.len(),
                "Opened policy store"
            ),
            None => info!(path = %backend.path.display(), "Policy store file not found, starting empty"),
        }

        Ok(backend)
    }

    /// Get the store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_document(&self) -> Result<Option<StoreDocument>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        decode_document(&content).map(Some)
    }

    fn save_document(&self, doc: &StoreDocument) -> Result<(), StorageError> {
        let line = encode_document(doc)?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or(StorageError::InvalidFormat)?;
        let temp_path = self.path.with_file_name(format!(".{}.tmp", file_name));

        let written =
            write_synced(&temp_path, &line).and_then(|_| fs::rename(&temp_path, &self.path));
        if let Err(e) = written {
            // Cleanup is best effort; the write error is what gets reported
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        sync_parent_dir(&self.path)?;

        debug!(path = %self.path.display(), sites = doc.sites.len(), "Policy store written");
        Ok(())
    }
}

impl PolicyBackend for FileBackend {
    fn get(&self, site: &SiteId) -> Result<Option<PolicyRecord>, StorageError> {
        let Some(doc) = self.load_document()? else {
            return Ok(None);
        };

        Ok(doc.sites.get(site.as_str()).map(|rules| {
            PolicyRecord::new(
                site.clone(),
                rules.approval_limit,
                rules.banned_vendors.iter().cloned(),
            )
        }))
    }

    fn put(&self, record: &PolicyRecord) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();

        let mut doc = self.load_document()?.unwrap_or_else(StoreDocument::empty);
        doc.sites.insert(
            record.site_id.as_str().to_string(),
            StoredRules {
                approval_limit: record.approval_limit,
                banned_vendors: record.banned_vendors.to_vec(),
            },
        );
        doc.updated_at = Utc::now();

        self.save_document(&doc)
    }

    fn sites(&self) -> Result<Vec<SiteId>, StorageError> {
        Ok(self
            .load_document()?
            .map(|doc| doc.sites.into_keys().map(SiteId).collect())
            .unwrap_or_default())
    }
}

fn write_synced(path: &Path, line: &str) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(line.as_bytes())?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

/// Render a document as `JSON\tCRC32\n`.
fn encode_document(doc: &StoreDocument) -> Result<String, StorageError> {
    let json = serde_json::to_string(doc)?;
    let checksum = crc32fast::hash(json.as_bytes());
    Ok(format!("{}\t{:08x}\n", json, checksum))
}

fn decode_document(content: &str) -> Result<StoreDocument, StorageError> {
    let line = content.trim_end_matches(&['\n', '\r'][..]);
    let (json, checksum_hex) = line.rsplit_once('\t').ok_or(StorageError::InvalidFormat)?;

    let expected =
        u32::from_str_radix(checksum_hex, 16).map_err(|_| StorageError::InvalidFormat)?;
    let actual = crc32fast::hash(json.as_bytes());
    if expected != actual {
        return Err(StorageError::ChecksumMismatch { expected, actual });
    }

    let doc: StoreDocument = serde_json::from_str(json)?;
    if doc.format_version != FORMAT_VERSION {
        return Err(StorageError::UnsupportedVersion(doc.format_version));
    }

    // Stored records must satisfy the same constraints as fresh writes
    for (site, rules) in &doc.sites {
        PolicyRecord::new(site.as_str(), rules.approval_limit, rules.banned_vendors.iter().cloned())
            .validate()
            .map_err(StorageError::InvalidRecord)?;
    }

    Ok(doc)
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent().filter(|d| !d.as_os_str().is_empty()) {
        Some(dir) => File::open(dir)?.sync_all(),
        None => File::open(".")?.sync_all(),
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pune() -> PolicyRecord {
        PolicyRecord::new("Pune", Decimal::new(40000, 0), ["BadRock Cements"])
    }

    #[test]
    fn test_write_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policies.json");

        {
            let backend = FileBackend::open(&path).unwrap();
            backend.put(&pune()).unwrap();
        }

        let reopened = FileBackend::open(&path).unwrap();
        let loaded = reopened.get(&SiteId::new("Pune")).unwrap().unwrap();
        assert_eq!(loaded, pune());
        assert_eq!(reopened.sites().unwrap(), vec![SiteId::new("Pune")]);
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::open(temp_dir.path().join("nested/policies.json")).unwrap();

        assert!(backend.get(&SiteId::new("Pune")).unwrap().is_none());
        assert!(backend.sites().unwrap().is_empty());
    }

    #[test]
    fn test_overwrite_keeps_other_sites() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::open(temp_dir.path().join("policies.json")).unwrap();

        backend.put(&pune()).unwrap();
        backend
            .put(&PolicyRecord::new("Nagpur", Decimal::new(10000, 0), Vec::<String>::new()))
            .unwrap();
        backend
            .put(&PolicyRecord::new("Pune", Decimal::new(50000, 0), ["Shaky Steel"]))
            .unwrap();

        let pune = backend.get(&SiteId::new("Pune")).unwrap().unwrap();
        assert_eq!(pune.approval_limit, Decimal::new(50000, 0));
        assert_eq!(pune.banned_vendors.as_slice(), ["Shaky Steel".to_string()]);
        assert!(backend.get(&SiteId::new("Nagpur")).unwrap().is_some());
    }

    #[test]
    fn test_tampered_file_fails_checksum() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policies.json");
        let backend = FileBackend::open(&path).unwrap();
        backend.put(&pune()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        fs::write(&path, content.replace("40000", "90000")).unwrap();

        let err = backend.get(&SiteId::new("Pune")).unwrap_err();
        assert!(matches!(err, StorageError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_garbage_file_rejected_on_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policies.json");
        fs::write(&path, "{ not a store").unwrap();

        let err = FileBackend::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::InvalidFormat));
    }

    #[test]
    fn test_empty_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policies.json");
        fs::write(&path, "").unwrap();

        assert!(FileBackend::open(&path).is_err());
    }

    #[test]
    fn test_unsupported_version() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policies.json");

        let json = r#"{"format_version":7,"updated_at":"2025-01-01T00:00:00Z","sites":{}}"#;
        let checksum = crc32fast::hash(json.as_bytes());
        fs::write(&path, format!("{}\t{:08x}\n", json, checksum)).unwrap();

        let err = FileBackend::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::UnsupportedVersion(7)));
    }

    fn write_raw(path: &Path, json: &str) {
        let checksum = crc32fast::hash(json.as_bytes());
        fs::write(path, format!("{}\t{:08x}\n", json, checksum)).unwrap();
    }

    #[test]
    fn test_negative_stored_limit_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policies.json");
        write_raw(
            &path,
            r#"{"format_version":1,"updated_at":"2025-01-01T00:00:00Z","sites":{"Pune":{"approval_limit":"-40000","banned_vendors":[]}}}"#,
        );

        let err = FileBackend::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::InvalidRecord(_)));
    }

    #[test]
    fn test_empty_stored_site_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policies.json");
        let backend = FileBackend::open(&path).unwrap();
        write_raw(
            &path,
            r#"{"format_version":1,"updated_at":"2025-01-01T00:00:00Z","sites":{"":{"approval_limit":"10"},"Pune":{"approval_limit":"40000"}}}"#,
        );

        assert!(matches!(
            backend.get(&SiteId::new("Pune")),
            Err(StorageError::InvalidRecord(_))
        ));
        assert!(matches!(backend.sites(), Err(StorageError::InvalidRecord(_))));
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("policies.json");
        let backend = FileBackend::open(&path).unwrap();

        // A directory in place of the store file makes the rename fail
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = backend.save_document(&StoreDocument::empty()).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
        assert!(!temp_dir.path().join(".policies.json.tmp").exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::open(temp_dir.path().join("policies.json")).unwrap();
        backend.put(&pune()).unwrap();

        let names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["policies.json".to_string()]);
    }
}
