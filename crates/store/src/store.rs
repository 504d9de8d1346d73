//! File-backed ledger store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use splitledger_core::Ledger;
use splitledger_shared::config::StorageConfig;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::records::LedgerFile;

/// Loads and saves a whole ledger as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    path: PathBuf,
    pretty: bool,
}

impl JsonLedgerStore {
    /// Creates a store for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
        }
    }

    /// Creates a store from the storage configuration section.
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.path.clone(), config.pretty)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// holds records that violate ledger rules.
    pub fn load(&self) -> Result<Ledger, StoreError> {
        self.read().inspect_err(|err| {
            debug!(
                path = %self.path.display(),
                code = err.error_code(),
                "Ledger load failed: {err}"
            );
        })
    }

    fn read(&self) -> Result<Ledger, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: LedgerFile = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        let ledger = file.into_ledger()?;

        info!(
            path = %self.path.display(),
            members = ledger.member_count(),
            expenses = ledger.expense_count(),
            "Ledger loaded"
        );
        Ok(ledger)
    }

    /// Loads the ledger, or returns an empty one if the file does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`JsonLedgerStore::load`] for any failure other than a
    /// missing file.
    pub fn load_or_default(&self) -> Result<Ledger, StoreError> {
        match self.load() {
            Err(StoreError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No ledger file yet, starting empty");
                Ok(Ledger::new())
            }
            other => other,
        }
    }

    /// Saves the ledger.
    ///
    /// Writes to a `.tmp` sibling first and renames it over the target, so
    /// a failed write never truncates an existing ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        self.write(ledger).inspect_err(|err| {
            warn!(
                path = %self.path.display(),
                code = err.error_code(),
                "Ledger save failed: {err}"
            );
        })
    }

    fn write(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let file = LedgerFile::from_ledger(ledger);
        let json = if self.pretty {
            serde_json::to_string_pretty(&file)
        } else {
            serde_json::to_string(&file)
        }
        .map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(
            path = %self.path.display(),
            members = ledger.member_count(),
            expenses = ledger.expense_count(),
            "Ledger saved"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}
