//! Process-wide store for the active record batch
//!
//! Exactly one batch is live at a time: each parse pass replaces the whole
//! set atomically by swapping an `Arc`, so a concurrent reader sees either
//! the entire old batch or the entire new one, never a mix. The store also
//! carries the global visibility flag the host consults before computing
//! annotations.

use crate::types::ErrorRecord;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Shared store of parsed records plus the visibility toggle
pub struct ErrorStore {
    batch: RwLock<Arc<[ErrorRecord]>>,
    visible: AtomicBool,
}

impl ErrorStore {
    /// Create an empty, visible store
    pub fn new() -> Self {
        Self {
            batch: RwLock::new(Arc::from(Vec::new())),
            visible: AtomicBool::new(true),
        }
    }

    /// Atomically install a new batch, discarding the previous one
    pub fn replace_all(&self, records: Vec<ErrorRecord>) {
        debug!(count = records.len(), "installing new record batch");
        let batch: Arc<[ErrorRecord]> = Arc::from(records);
        *self.write_lock() = batch;
    }

    /// Drop all records (a new build started, or errors were dismissed)
    pub fn clear(&self) {
        self.replace_all(Vec::new());
    }

    /// Snapshot of the current batch
    ///
    /// The snapshot stays coherent even if `replace_all` runs concurrently;
    /// it simply keeps the batch that was live when it was taken.
    pub fn snapshot(&self) -> Arc<[ErrorRecord]> {
        self.read_lock().clone()
    }

    /// All records for a normalized path with the given classification index
    pub fn query(&self, path: &Path, class_index: usize) -> Vec<ErrorRecord> {
        self.snapshot()
            .iter()
            .filter(|r| r.class_index == class_index && r.file == path)
            .cloned()
            .collect()
    }

    /// All records for a normalized path, regardless of classification
    pub fn records_for(&self, path: &Path) -> Vec<ErrorRecord> {
        self.snapshot()
            .iter()
            .filter(|r| r.file == path)
            .cloned()
            .collect()
    }

    /// Number of records in the active batch
    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    /// Whether the active batch is empty
    pub fn is_empty(&self) -> bool {
        self.read_lock().is_empty()
    }

    /// Set the process-wide visibility of annotations
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
    }

    /// Whether annotations should currently be shown
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, Arc<[ErrorRecord]>> {
        // A poisoned lock only means a reader panicked mid-clone; the
        // Arc inside is still coherent, so recover it.
        self.batch.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Arc<[ErrorRecord]>> {
        self.batch.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ErrorStore {
    fn default() -> Self {
        Self::new()
    }
}
