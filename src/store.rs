//! File-backed license store.
//!
//! The store owns the full license collection and is the only component
//! that touches the backing file. Reads hand out clones; every mutation
//! runs as a single critical section under the write lock and is
//! committed to disk with a write-to-temp-then-rename step before it
//! becomes visible in memory.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tempfile::NamedTempFile;

use crate::error::{AppError, Result};
use crate::models::License;

#[derive(Debug)]
pub struct LicenseStore {
    path: PathBuf,
    licenses: RwLock<HashMap<String, License>>,
}

impl LicenseStore {
    /// Open the store, loading the full collection from `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file
    /// is a `Storage` error; callers treat that as fatal at startup
    /// rather than serving requests against a collection that may have
    /// silently lost records.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let licenses = load(&path)?;
        Ok(Self {
            path,
            licenses: RwLock::new(licenses),
        })
    }

    /// Look up a license by key. Returns a clone; callers never hold a
    /// reference into the live collection.
    pub fn find_by_key(&self, key: &str) -> Result<Option<License>> {
        Ok(self.read_guard()?.get(key).cloned())
    }

    /// The full collection, ordered by creation time.
    pub fn all(&self) -> Result<Vec<License>> {
        let mut licenses: Vec<License> = self.read_guard()?.values().cloned().collect();
        licenses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.key.cmp(&b.key)));
        Ok(licenses)
    }

    /// Insert or replace a license by key.
    pub fn upsert(&self, license: License) -> Result<()> {
        self.update(|licenses| {
            licenses.insert(license.key.clone(), license);
            Ok(())
        })
    }

    /// Run a read-modify-write step as one critical section.
    ///
    /// The closure gets a scratch copy of the collection. On `Ok` the
    /// copy is committed to disk and then swapped in as the live
    /// collection; on any error both memory and file stay untouched.
    /// All writers serialize here, which is what keeps two concurrent
    /// activations from both observing the same free seat.
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, License>) -> Result<T>,
    ) -> Result<T> {
        let mut licenses = self.write_guard()?;
        let mut next = licenses.clone();
        let value = f(&mut next)?;
        persist(&self.path, &next)?;
        *licenses = next;
        Ok(value)
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, HashMap<String, License>>> {
        self.licenses
            .read()
            .map_err(|_| AppError::Storage("license store lock poisoned".into()))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, License>>> {
        self.licenses
            .write()
            .map_err(|_| AppError::Storage("license store lock poisoned".into()))
    }
}

fn load(path: &Path) -> Result<HashMap<String, License>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| AppError::Storage(format!("read {}: {e}", path.display())))?;
    let records: Vec<License> = serde_json::from_str(&contents)
        .map_err(|e| AppError::Storage(format!("parse {}: {e}", path.display())))?;

    let mut licenses = HashMap::with_capacity(records.len());
    for license in records {
        if let Some(previous) = licenses.insert(license.key.clone(), license) {
            return Err(AppError::Storage(format!(
                "duplicate license key {} in {}",
                previous.key,
                path.display()
            )));
        }
    }
    Ok(licenses)
}

/// Serialize the collection and atomically replace the backing file.
/// A concurrent `open()` sees either the old contents or the new ones,
/// never a partial write.
fn persist(path: &Path, licenses: &HashMap<String, License>) -> Result<()> {
    let mut records: Vec<&License> = licenses.values().collect();
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.key.cmp(&b.key)));

    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| AppError::Storage(format!("encode licenses: {e}")))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| AppError::Storage(format!("create temp file in {}: {e}", dir.display())))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| AppError::Storage(format!("write temp file: {e}")))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| AppError::Storage(format!("sync temp file: {e}")))?;
    tmp.persist(path)
        .map_err(|e| AppError::Storage(format!("replace {}: {e}", path.display())))?;

    Ok(())
}
