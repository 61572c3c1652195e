//! File-backed storage.
//!
//! Each scope is a single JSON object (`key -> value`) stored on disk:
//! - durable: the platform data directory (e.g. `~/.local/share/company-directory/`)
//! - session: a folder under the OS temp directory, which does not outlive a reboot

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::adapter::{Persistence, Scope};
use crate::error::{Result, StorageError};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "company-directory";
const APP_NAME: &str = "Company Directory";
const DURABLE_FILENAME: &str = "durable.json";
const SESSION_FILENAME: &str = "session.json";

/// Platform data directory for durable storage.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn default_durable_dir() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Temp-directory folder for session storage.
pub fn default_session_dir() -> PathBuf {
    std::env::temp_dir().join(APP_ORG)
}

/// One scope's JSON document on disk.
#[derive(Debug, Clone)]
pub struct ScopeFile {
    path: PathBuf,
    quota: Option<usize>,
}

impl ScopeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota: None,
        }
    }

    /// Limit the serialized document to `bytes`.
    #[must_use]
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable document is moved before it is replaced.
    pub fn corrupt_path(&self) -> PathBuf {
        self.path.with_extension("json.corrupt")
    }

    fn read(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                StorageError::Serialization {
                    key: self.path.display().to_string(),
                    source,
                }
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::io("read", &self.path, e)),
        }
    }

    /// Write the document atomically (temp file + rename).
    fn write(&self, scope: Scope, key: &str, entries: &BTreeMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries).map_err(|source| {
            StorageError::Serialization {
                key: key.to_string(),
                source,
            }
        })?;
        if let Some(quota) = self.quota
            && bytes.len() > quota
        {
            return Err(StorageError::QuotaExceeded {
                scope,
                key: key.to_string(),
                size: bytes.len(),
                quota,
            });
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::io("create directory", parent, e))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut file =
            File::create(&temp_path).map_err(|e| StorageError::io("create", &temp_path, e))?;
        file.write_all(&bytes)
            .map_err(|e| StorageError::io("write", &temp_path, e))?;
        file.sync_all()
            .map_err(|e| StorageError::io("sync", &temp_path, e))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|e| StorageError::io("rename", &self.path, e))?;
        Ok(())
    }
}

/// Storage backed by one JSON file per scope.
#[derive(Debug, Clone)]
pub struct FileStore {
    durable: ScopeFile,
    session: ScopeFile,
}

impl FileStore {
    pub fn new(durable: ScopeFile, session: ScopeFile) -> Self {
        Self { durable, session }
    }

    /// Store both scopes under the given directories.
    pub fn in_dirs(durable_dir: &Path, session_dir: &Path) -> Self {
        Self::new(
            ScopeFile::new(durable_dir.join(DURABLE_FILENAME)),
            ScopeFile::new(session_dir.join(SESSION_FILENAME)),
        )
    }

    /// Store under the platform data directory and the OS temp directory.
    pub fn open_default() -> Result<Self> {
        let durable_dir = default_durable_dir().ok_or_else(|| StorageError::Unavailable {
            scope: Scope::Durable,
            reason: "could not determine the platform data directory".to_string(),
        })?;
        let store = Self::in_dirs(&durable_dir, &default_session_dir());
        tracing::debug!(
            durable = %store.durable.path.display(),
            session = %store.session.path.display(),
            "opened file storage"
        );
        Ok(store)
    }

    pub fn scope_file(&self, scope: Scope) -> &ScopeFile {
        match scope {
            Scope::Durable => &self.durable,
            Scope::Session => &self.session,
        }
    }
}

impl Persistence for FileStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        let mut entries = self.scope_file(scope).read()?;
        Ok(entries.remove(key))
    }

    fn set(&mut self, scope: Scope, key: &str, value: &str) -> Result<()> {
        let file = self.scope_file(scope);
        let mut entries = match file.read() {
            Ok(entries) => entries,
            Err(error @ StorageError::Serialization { .. }) => {
                let aside = file.corrupt_path();
                tracing::warn!(
                    %scope,
                    %error,
                    moved_to = %aside.display(),
                    "replacing unreadable storage document"
                );
                fs::rename(&file.path, &aside)
                    .map_err(|e| StorageError::io("rename", &file.path, e))?;
                BTreeMap::new()
            }
            Err(error) => return Err(error),
        };
        entries.insert(key.to_string(), value.to_string());
        file.write(scope, key, &entries)?;
        tracing::trace!(%scope, key, bytes = value.len(), "stored value");
        Ok(())
    }
}
