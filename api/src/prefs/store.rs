//! Key-value stores holding the preference document.
#![allow(async_fn_in_trait)]

use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

use super::user_prefs::PrefsDocument;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("preference file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference document is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}

/// An asynchronous store for the preference document.
pub trait PreferenceStore {
    /// Reads the whole document.
    async fn get(&self) -> Result<PrefsDocument, StoreError>;

    /// Replaces a single top-level entry of the document.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Persists the document as a pretty-printed JSON file.
///
/// A missing file reads as an empty document; the file is created on the
/// first `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<PrefsDocument, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(PrefsDocument::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PrefsDocument::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for JsonFileStore {
    async fn get(&self) -> Result<PrefsDocument, StoreError> {
        self.read_document().await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut doc = self.read_document().await?;
        doc.set(key, value);
        let bytes = serde_json::to_vec_pretty(&doc)?;
        tokio::fs::write(&self.path, bytes).await?;

        tracing::debug!("wrote {} to {}", key, self.path.display());
        Ok(())
    }
}

/// Keeps the document in memory and records every write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: RwLock<PrefsDocument>,
    writes: RwLock<Vec<(String, Value)>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: PrefsDocument) -> Self {
        Self {
            doc: RwLock::new(doc),
            ..Self::default()
        }
    }

    /// Makes every following `get` and `set` fail with `Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All `set` calls that succeeded, oldest first.
    pub async fn writes(&self) -> Vec<(String, Value)> {
        self.writes.read().await.clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    async fn get(&self) -> Result<PrefsDocument, StoreError> {
        self.check_available()?;
        Ok(self.doc.read().await.clone())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.check_available()?;
        self.doc.write().await.set(key, value.clone());
        self.writes.write().await.push((key.to_string(), value));
        Ok(())
    }
}
