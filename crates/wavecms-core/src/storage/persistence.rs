//! Site document persistence
//!
//! Handles saving and loading the JSON site document. Uses atomic
//! writes (write to temp file, then rename) so the document is never
//! left in a partially-written state.
//!
//! Storage location: `~/.local/share/wavecms/site.json` (configurable
//! via `SiteConfig`).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::document::SiteDocument;
use crate::storage::error::{StorageError, StorageResult};

/// Suffix appended to a corrupt document's file name before it is
/// moved aside (`site.json` becomes `site.json.corrupt.backup`)
const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt.backup";

/// Persistence layer for the site document
pub struct JsonPersistence {
    config: SiteConfig,
}

impl JsonPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Check if a site document exists on disk
    pub fn exists(&self) -> bool {
        self.config.site_data_path().exists()
    }

    /// Save the site document using an atomic write
    pub fn save(&self, doc: &SiteDocument) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(doc).map_err(StorageError::Serialize)?;
        let target_path = self.config.site_data_path();

        atomic_write(&target_path, &bytes)?;
        debug!(path = %target_path.display(), bytes = bytes.len(), "saved site document");
        Ok(())
    }

    /// Load the site document from disk
    ///
    /// Returns `None` if no document has ever been saved. A document
    /// that exists but cannot be parsed is moved aside to a
    /// `.corrupt.backup` file and reported as
    /// [`StorageError::CorruptDocument`] rather than being silently
    /// discarded.
    pub fn load(&self) -> StorageResult<Option<SiteDocument>> {
        let path = self.config.site_data_path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| StorageError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        match serde_json::from_slice::<SiteDocument>(&bytes) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                let backup_path = corrupt_backup_path(&path);
                warn!(
                    path = %path.display(),
                    backup = %backup_path.display(),
                    "site document is corrupt, moving aside"
                );
                fs::rename(&path, &backup_path).map_err(|rename_err| {
                    StorageError::AtomicWriteFailed {
                        from: path.clone(),
                        to: backup_path.clone(),
                        source: rename_err,
                    }
                })?;
                Err(StorageError::CorruptDocument {
                    path,
                    backup_path,
                    details: e.to_string(),
                })
            }
        }
    }

    /// Load the existing document or seed a new one
    ///
    /// Idempotent initialization: if a document exists on disk it is
    /// returned untouched; otherwise the seeded starter document is
    /// created, saved, and returned.
    pub fn load_or_seed(&self) -> StorageResult<SiteDocument> {
        if let Some(doc) = self.load()? {
            return Ok(doc);
        }

        let doc = SiteDocument::seeded(&self.config);
        self.save(&doc)?;
        debug!("seeded new site document");
        Ok(doc)
    }

    /// Delete the stored site document
    ///
    /// Use with caution!
    pub fn delete_all(&self) -> StorageResult<()> {
        let path = self.config.site_data_path();
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::from_io(e, path))?;
        }
        Ok(())
    }
}

/// Backup location for a corrupt document
///
/// The suffix is appended to the whole file name rather than swapped
/// in for the extension, so the original name stays recognizable.
fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(CORRUPT_BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Temp file lives in the same directory so the rename stays on one
    // filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
