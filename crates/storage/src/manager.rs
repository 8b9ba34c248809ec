//! ResultFileManager: in-memory result repository
//!
//! This module implements the ResultRepository trait using:
//! - A slot table of loaded files, each owning its scalar/vector/histogram tables
//! - A run table shared by all files, deduplicated by run name
//! - A file-run table associating files with the runs recorded in them
//! - Secondary indices for run names and per-file file-runs
//!
//! # Design Notes
//!
//! - **Identifiers are positional**: an `Id` encodes kind, file slot and the
//!   position in that file's table for the kind, so resolution is O(1).
//! - **Slots are never reused**: unloading a file leaves its slot empty, so
//!   identifiers into the unloaded file fail resolution instead of aliasing
//!   items of a later file.
//! - **No internal locking**: mutation takes `&mut self`. Share it as
//!   `SharedResultFileManager` and hold the read guard while sorting.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use scave_core::{
    Error, FileId, FileRun, FileRunId, HistogramResult, Id, ItemData, ItemKind, ItemMetadata,
    Result, ResultFile, ResultRepository, Run, RunId, VectorResult,
};

use crate::index::{FileRunIndex, RunNameIndex};

/// A repository shared between threads
pub type SharedResultFileManager = Arc<RwLock<ResultFileManager>>;

/// Fields common to every item kind
#[derive(Debug, Clone)]
struct ItemHeader {
    file_run: FileRunId,
    module_name: String,
    name: String,
}

#[derive(Debug, Clone)]
struct ScalarEntry {
    header: ItemHeader,
    value: f64,
}

#[derive(Debug, Clone)]
struct VectorEntry {
    header: ItemHeader,
    data: VectorResult,
}

#[derive(Debug, Clone)]
struct HistogramEntry {
    header: ItemHeader,
    data: HistogramResult,
}

/// A loaded file together with the items recorded in it
#[derive(Debug, Clone)]
struct FileEntry {
    file: ResultFile,
    scalars: Vec<ScalarEntry>,
    vectors: Vec<VectorEntry>,
    histograms: Vec<HistogramEntry>,
}

impl FileEntry {
    fn item_count(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Scalar => self.scalars.len(),
            ItemKind::Vector => self.vectors.len(),
            ItemKind::Histogram => self.histograms.len(),
        }
    }
}

/// In-memory result repository
///
/// Holds files, runs and result items, and resolves identifiers against
/// them. Identifiers handed out by `add_scalar`, `add_vector` and
/// `add_histogram` stay valid until their file is unloaded.
#[derive(Debug, Default)]
pub struct ResultFileManager {
    /// File slot table; `None` marks an unloaded file
    files: Vec<Option<FileEntry>>,
    /// Run table, indexed by `RunId`
    runs: Vec<Run>,
    /// File-run table; `None` marks a file-run dropped with its file
    file_runs: Vec<Option<FileRun>>,
    /// Secondary index: run name → RunId
    run_names: RunNameIndex,
    /// Secondary index: FileId → FileRunIds
    file_run_index: FileRunIndex,
}

impl ResultFileManager {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap this repository for sharing between threads
    pub fn into_shared(self) -> SharedResultFileManager {
        Arc::new(RwLock::new(self))
    }

    // ========================================================================
    // Files
    // ========================================================================

    /// Register a result file
    ///
    /// If a file with the same path is already loaded, its id is returned.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if all 65536 file slots have been used.
    pub fn add_file(&mut self, file_path: &str) -> Result<FileId> {
        if let Some(existing) = self.file_by_path(file_path) {
            return Ok(existing);
        }
        let slot = self.files.len();
        let slot16 = u16::try_from(slot).map_err(|_| Error::OutOfRange {
            index: slot,
            len: u16::MAX as usize + 1,
        })?;
        let id = FileId(slot16);
        self.files.push(Some(FileEntry {
            file: ResultFile::new(id, file_path),
            scalars: Vec::new(),
            vectors: Vec::new(),
            histograms: Vec::new(),
        }));
        info!(target: "scave::storage", file = %file_path, slot = slot16, "File loaded");
        Ok(id)
    }

    /// Unload a file, invalidating every identifier that points into it
    ///
    /// File-runs of the file are dropped; runs themselves remain.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file is not loaded.
    pub fn unload_file(&mut self, file_id: FileId) -> Result<()> {
        let entry = self
            .files
            .get_mut(file_id.0 as usize)
            .and_then(Option::take)
            .ok_or_else(|| Error::NotFound(format!("file {:?}", file_id)))?;

        let dropped = self.file_run_index.remove_file(&file_id);
        for file_run in &dropped {
            if let Some(slot) = self.file_runs.get_mut(file_run.0 as usize) {
                *slot = None;
            }
        }
        info!(
            target: "scave::storage",
            file = %entry.file.file_path,
            file_runs = dropped.len(),
            "File unloaded"
        );
        Ok(())
    }

    /// Look up a loaded file
    pub fn file(&self, file_id: FileId) -> Result<&ResultFile> {
        self.file_entry(file_id).map(|entry| &entry.file)
    }

    /// Find a loaded file by path
    pub fn file_by_path(&self, file_path: &str) -> Option<FileId> {
        self.files
            .iter()
            .flatten()
            .find(|entry| entry.file.file_path == file_path)
            .map(|entry| entry.file.id)
    }

    /// Number of loaded files
    pub fn file_count(&self) -> usize {
        self.files.iter().flatten().count()
    }

    fn file_entry(&self, file_id: FileId) -> Result<&FileEntry> {
        self.files
            .get(file_id.0 as usize)
            .and_then(Option::as_ref)
            .ok_or_else(|| Error::NotFound(format!("file {:?}", file_id)))
    }

    fn file_entry_mut(&mut self, file_id: FileId) -> Result<&mut FileEntry> {
        self.files
            .get_mut(file_id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or_else(|| Error::NotFound(format!("file {:?}", file_id)))
    }

    // ========================================================================
    // Runs
    // ========================================================================

    /// Find a run by name, creating it if needed
    pub fn get_or_add_run(&mut self, run_name: &str) -> RunId {
        if let Some(existing) = self.run_names.get(run_name) {
            return existing;
        }
        let id = RunId(self.runs.len() as u32);
        self.runs.push(Run::new(id, run_name));
        self.run_names.insert(run_name, id);
        debug!(target: "scave::storage", run = %run_name, "Run added");
        id
    }

    /// Set (or overwrite) a run attribute
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the run does not exist.
    pub fn set_run_attribute(&mut self, run_id: RunId, name: &str, value: &str) -> Result<()> {
        let run = self
            .runs
            .get_mut(run_id.0 as usize)
            .ok_or_else(|| Error::NotFound(format!("run {:?}", run_id)))?;
        run.attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Look up a run
    pub fn run(&self, run_id: RunId) -> Result<&Run> {
        self.runs
            .get(run_id.0 as usize)
            .ok_or_else(|| Error::NotFound(format!("run {:?}", run_id)))
    }

    /// Find a run by name
    pub fn run_by_name(&self, run_name: &str) -> Option<RunId> {
        self.run_names.get(run_name)
    }

    // ========================================================================
    // File-runs
    // ========================================================================

    /// Associate a loaded file with a run
    ///
    /// Returns the existing association if there is one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file is not loaded or the run does not exist.
    pub fn add_file_run(&mut self, file_id: FileId, run_id: RunId) -> Result<FileRunId> {
        self.file_entry(file_id)?;
        self.run(run_id)?;

        if let Some(existing) = self
            .file_run_index
            .get(&file_id)
            .into_iter()
            .flatten()
            .copied()
            .find(|fr| self.file_run(*fr).map_or(false, |fr| fr.run == run_id))
        {
            return Ok(existing);
        }

        let id = FileRunId(self.file_runs.len() as u32);
        self.file_runs.push(Some(FileRun {
            id,
            file: file_id,
            run: run_id,
        }));
        self.file_run_index.insert(file_id, id);
        debug!(target: "scave::storage", file = ?file_id, run = ?run_id, "File-run added");
        Ok(id)
    }

    /// Look up a live file-run
    pub fn file_run(&self, file_run: FileRunId) -> Result<&FileRun> {
        self.file_runs
            .get(file_run.0 as usize)
            .and_then(Option::as_ref)
            .ok_or_else(|| Error::NotFound(format!("file-run {:?}", file_run)))
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// Record a scalar under `file_run`
    pub fn add_scalar(
        &mut self,
        file_run: FileRunId,
        module_name: &str,
        name: &str,
        value: f64,
    ) -> Result<Id> {
        let (file_id, header) = self.new_header(file_run, module_name, name)?;
        let entry = self.file_entry_mut(file_id)?;
        let id = next_id(ItemKind::Scalar, file_id, entry)?;
        entry.scalars.push(ScalarEntry { header, value });
        Ok(id)
    }

    /// Record a vector under `file_run`
    pub fn add_vector(
        &mut self,
        file_run: FileRunId,
        module_name: &str,
        name: &str,
        data: VectorResult,
    ) -> Result<Id> {
        let (file_id, header) = self.new_header(file_run, module_name, name)?;
        let entry = self.file_entry_mut(file_id)?;
        let id = next_id(ItemKind::Vector, file_id, entry)?;
        entry.vectors.push(VectorEntry { header, data });
        Ok(id)
    }

    /// Record a histogram under `file_run`
    pub fn add_histogram(
        &mut self,
        file_run: FileRunId,
        module_name: &str,
        name: &str,
        data: HistogramResult,
    ) -> Result<Id> {
        let (file_id, header) = self.new_header(file_run, module_name, name)?;
        let entry = self.file_entry_mut(file_id)?;
        let id = next_id(ItemKind::Histogram, file_id, entry)?;
        entry.histograms.push(HistogramEntry { header, data });
        Ok(id)
    }

    fn new_header(
        &self,
        file_run: FileRunId,
        module_name: &str,
        name: &str,
    ) -> Result<(FileId, ItemHeader)> {
        let file_id = self.file_run(file_run)?.file;
        Ok((
            file_id,
            ItemHeader {
                file_run,
                module_name: module_name.to_string(),
                name: name.to_string(),
            },
        ))
    }

    /// Identifiers of all scalars in loaded files, in file then position order
    pub fn all_scalars(&self) -> Vec<Id> {
        self.all_of_kind(ItemKind::Scalar)
    }

    /// Identifiers of all vectors in loaded files
    pub fn all_vectors(&self) -> Vec<Id> {
        self.all_of_kind(ItemKind::Vector)
    }

    /// Identifiers of all histograms in loaded files
    pub fn all_histograms(&self) -> Vec<Id> {
        self.all_of_kind(ItemKind::Histogram)
    }

    /// Identifiers of all items in loaded files, scalars then vectors then histograms
    pub fn all_items(&self) -> Vec<Id> {
        let mut ids = self.all_scalars();
        ids.extend(self.all_vectors());
        ids.extend(self.all_histograms());
        ids
    }

    fn all_of_kind(&self, kind: ItemKind) -> Vec<Id> {
        self.files
            .iter()
            .flatten()
            .flat_map(|entry| {
                (0..entry.item_count(kind)).map(move |pos| Id::new(kind, entry.file.id.0, pos as u32))
            })
            .collect()
    }
}

/// Identifier for the next item of `kind` appended to `entry`
fn next_id(kind: ItemKind, file_id: FileId, entry: &FileEntry) -> Result<Id> {
    let count = entry.item_count(kind);
    let position = u32::try_from(count).map_err(|_| Error::OutOfRange {
        index: count,
        len: u32::MAX as usize,
    })?;
    Ok(Id::new(kind, file_id.0, position))
}

impl ResultRepository for ResultFileManager {
    fn resolve(&self, id: Id) -> Result<ItemMetadata<'_>> {
        let kind = id
            .kind()
            .ok_or_else(|| Error::integrity(id, format!("unknown item kind {:#x}", id.type_bits())))?;
        let entry = self
            .files
            .get(id.file_slot() as usize)
            .and_then(Option::as_ref)
            .ok_or_else(|| Error::integrity(id, "file not loaded"))?;

        let pos = id.position() as usize;
        let out_of_range = || Error::integrity(id, format!("no {} at position {}", kind, pos));
        let (header, data) = match kind {
            ItemKind::Scalar => {
                let e = entry.scalars.get(pos).ok_or_else(out_of_range)?;
                (&e.header, ItemData::Scalar(e.value))
            }
            ItemKind::Vector => {
                let e = entry.vectors.get(pos).ok_or_else(out_of_range)?;
                (&e.header, ItemData::Vector(&e.data))
            }
            ItemKind::Histogram => {
                let e = entry.histograms.get(pos).ok_or_else(out_of_range)?;
                (&e.header, ItemData::Histogram(&e.data))
            }
        };

        let file_run = self
            .file_run(header.file_run)
            .map_err(|_| Error::integrity(id, "file-run no longer exists"))?;
        let run = self
            .runs
            .get(file_run.run.0 as usize)
            .ok_or_else(|| Error::integrity(id, "run no longer exists"))?;

        Ok(ItemMetadata {
            id,
            file_run: header.file_run,
            file: &entry.file,
            run,
            module_name: &header.module_name,
            name: &header.name,
            data,
        })
    }
}
