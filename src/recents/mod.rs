//! Recently selected items, remembered across invocations
//!
//! The store is a single JSON document mapping a serialized [`CategoryKey`]
//! to an array of at most [`MAX_RECENTS`] items, most recent first:
//!
//! ```json
//! {
//!   "[\"ec2-instance\",\"default\",\"us-east-1\"]": [
//!     { "InstanceId": "i-0abc", "State": { "Name": "running" } }
//!   ]
//! }
//! ```
//!
//! Reads and writes are not coordinated between processes. Two invocations
//! saving at the same time race and the last writer wins; that is acceptable
//! for a tool run by one operator at a time.
//!
//! Errors never reach the caller: [`RecentsStore::load`] and
//! [`RecentsStore::save`] log and carry on. The `try_` variants expose the
//! underlying [`RecentsError`] for callers that care.

mod error;

pub use error::RecentsError;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum number of entries kept per category
pub const MAX_RECENTS: usize = 20;

const RECENTS_DIR: &str = ".aws-select";
const RECENTS_FILENAME: &str = "recents.json";

type RecentsDocument = BTreeMap<String, Vec<Value>>;

/// Ordered identifier of one selection context
///
/// Two selections with equal keys share a recents list. Keys usually start
/// with the resource kind and end with the profile and region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryKey(Vec<String>);

impl CategoryKey {
    /// Build a key from its parts
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Append more scoping values
    #[must_use]
    pub fn scoped<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(parts.into_iter().map(Into::into));
        self
    }

    /// The parts of the key, in order
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Serialized form used as the document key
    #[must_use]
    pub fn serialized(&self) -> String {
        // A Vec<String> always serializes
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

/// Persistent most-recently-selected cache
#[derive(Debug, Clone)]
pub struct RecentsStore {
    path: PathBuf,
}

impl RecentsStore {
    /// Create a store backed by the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `~/.aws-select/recents.json`
    ///
    /// Returns `None` if the home directory cannot be determined.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(RECENTS_DIR).join(RECENTS_FILENAME))
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the recents for `key`, most recent first
    ///
    /// A missing file yields an empty list silently; any other failure is
    /// logged and also yields an empty list.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &CategoryKey) -> Vec<T> {
        match self.try_load(key) {
            Ok(items) => items,
            Err(e) if e.is_missing_file() => Vec::new(),
            Err(e) => {
                tracing::warn!("failed to load recent selections from {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Load the recents for `key`, reporting failures
    ///
    /// Entries that no longer deserialize as `T` are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RecentsError` if the file cannot be read or parsed.
    pub fn try_load<T: DeserializeOwned>(&self, key: &CategoryKey) -> Result<Vec<T>, RecentsError> {
        let mut document = self.read_document()?;
        let entries = document.remove(&key.serialized()).unwrap_or_default();

        Ok(entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::debug!("skipping unreadable recent entry: {e}");
                    None
                }
            })
            .collect())
    }

    /// Record `item` as the most recent selection for `key`
    ///
    /// Any entry with the same id is replaced and the list is truncated to
    /// [`MAX_RECENTS`]. Failures are logged, never returned.
    pub fn save<T, I, F>(&self, key: &CategoryKey, item: &T, get_id: F)
    where
        T: Serialize + DeserializeOwned,
        I: PartialEq,
        F: Fn(&T) -> Option<I>,
    {
        if let Err(e) = self.try_save(key, item, get_id) {
            tracing::warn!("failed to save selection to {}: {e}", self.path.display());
        }
    }

    /// Record `item` as the most recent selection, reporting failures
    ///
    /// # Errors
    ///
    /// Returns `RecentsError` if the directory cannot be created or the
    /// document cannot be written. An unreadable existing document is treated
    /// as empty and overwritten.
    pub fn try_save<T, I, F>(&self, key: &CategoryKey, item: &T, get_id: F) -> Result<(), RecentsError>
    where
        T: Serialize + DeserializeOwned,
        I: PartialEq,
        F: Fn(&T) -> Option<I>,
    {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let mut document = self.read_document().unwrap_or_else(|e| {
            if !e.is_missing_file() {
                tracing::debug!("replacing unreadable recents document: {e}");
            }
            RecentsDocument::new()
        });

        let new_entry = serde_json::to_value(item).map_err(|source| self.json_error(source))?;
        let new_id = get_id(item);

        let entries = document.entry(key.serialized()).or_default();
        entries.retain(|entry| {
            let Some(new_id) = &new_id else {
                return true;
            };
            serde_json::from_value::<T>(entry.clone())
                .ok()
                .and_then(|existing| get_id(&existing))
                .is_none_or(|id| id != *new_id)
        });
        entries.insert(0, new_entry);
        entries.truncate(MAX_RECENTS);

        self.write_document(&document)
    }

    fn read_document(&self) -> Result<RecentsDocument, RecentsError> {
        let data = fs::read(&self.path).map_err(|source| self.io_error(source))?;
        serde_json::from_slice(&data).map_err(|source| self.json_error(source))
    }

    fn write_document(&self, document: &RecentsDocument) -> Result<(), RecentsError> {
        let data = serde_json::to_vec_pretty(document).map_err(|source| self.json_error(source))?;
        fs::write(&self.path, data).map_err(|source| self.io_error(source))?;
        self.restrict_permissions()
    }

    #[cfg(unix)]
    fn restrict_permissions(&self) -> Result<(), RecentsError> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
            .map_err(|source| self.io_error(source))
    }

    #[cfg(not(unix))]
    fn restrict_permissions(&self) -> Result<(), RecentsError> {
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> RecentsError {
        RecentsError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> RecentsError {
        RecentsError::Json {
            path: self.path.clone(),
            source,
        }
    }
}
