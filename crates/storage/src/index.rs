//! Secondary indices for repository lookups
//!
//! This module provides secondary indices that avoid scanning the record
//! tables of a `ResultFileManager`:
//! - RunNameIndex: Maps run name → RunId so runs are shared across files
//! - FileRunIndex: Maps FileId → Set<FileRunId> so unloading a file is O(file runs)

use scave_core::{FileId, FileRunId, RunId};
use std::collections::{HashMap, HashSet};

/// Secondary index: run name → RunId
///
/// A run recorded in several result files is represented by one `Run`
/// record; this index finds it by name.
#[derive(Debug, Default)]
pub struct RunNameIndex {
    index: HashMap<String, RunId>,
}

impl RunNameIndex {
    /// Create a new empty RunNameIndex
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
        }
    }

    /// Register a run name
    ///
    /// Returns the previously registered id if the name was already present;
    /// the existing mapping is kept in that case.
    pub fn insert(&mut self, run_name: &str, run_id: RunId) -> Option<RunId> {
        if let Some(existing) = self.index.get(run_name) {
            return Some(*existing);
        }
        self.index.insert(run_name.to_string(), run_id);
        None
    }

    /// Look up a run by name
    pub fn get(&self, run_name: &str) -> Option<RunId> {
        self.index.get(run_name).copied()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get the number of runs in the index
    pub fn len(&self) -> usize {
        self.index.len()
    }
}

/// Secondary index: FileId → FileRunIds
///
/// Enables dropping every file-run of a file when the file is unloaded.
#[derive(Debug, Default)]
pub struct FileRunIndex {
    index: HashMap<FileId, HashSet<FileRunId>>,
}

impl FileRunIndex {
    /// Create a new empty FileRunIndex
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
        }
    }

    /// Add a file-run to its file's set
    pub fn insert(&mut self, file_id: FileId, file_run: FileRunId) {
        self.index.entry(file_id).or_default().insert(file_run);
    }

    /// Get all file-runs of a file
    pub fn get(&self, file_id: &FileId) -> Option<&HashSet<FileRunId>> {
        self.index.get(file_id)
    }

    /// Remove and return all file-runs of a file
    pub fn remove_file(&mut self, file_id: &FileId) -> HashSet<FileRunId> {
        self.index.remove(file_id).unwrap_or_default()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get the number of files in the index
    pub fn len(&self) -> usize {
        self.index.len()
    }
}
