//! Repository metadata types
//!
//! Records a result repository keeps about files, runs and items. Only the
//! fields needed to order identifiers are modeled; raw samples and bin
//! contents stay with the repository implementation.

use crate::types::{FileId, FileRunId, Id, ItemKind, RunId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A loaded result file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFile {
    /// Repository handle
    pub id: FileId,
    /// Full path as given when the file was loaded
    pub file_path: String,
    /// Directory part of `file_path`, including the trailing `/`
    pub directory: String,
    /// File name part of `file_path`
    pub file_name: String,
}

impl ResultFile {
    /// Create a file record, splitting `file_path` into directory and name
    pub fn new(id: FileId, file_path: impl Into<String>) -> Self {
        let file_path = file_path.into();
        let (directory, file_name) = split_file_path(&file_path);
        Self {
            id,
            directory: directory.to_string(),
            file_name: file_name.to_string(),
            file_path,
        }
    }
}

/// Split a path into `(directory, file_name)`, directory keeping its trailing `/`
pub fn split_file_path(path: &str) -> (&str, &str) {
    match path.rfind(['/', '\\']) {
        Some(pos) => path.split_at(pos + 1),
        None => ("", path),
    }
}

/// A simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Repository handle
    pub id: RunId,
    /// Unique run name
    pub run_name: String,
    /// Run attributes (configname, replication, seed, ...)
    pub attributes: BTreeMap<String, String>,
}

impl Run {
    /// Create a run with no attributes
    pub fn new(id: RunId, run_name: impl Into<String>) -> Self {
        Self {
            id,
            run_name: run_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Look up a run attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Association of a result file with a run recorded in it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRun {
    /// Repository handle
    pub id: FileRunId,
    /// Owning file
    pub file: FileId,
    /// Owning run
    pub run: RunId,
}

/// Summary statistics recorded for vectors and histograms
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of observations
    pub count: i64,
    /// Arithmetic mean
    pub mean: f64,
    /// Standard deviation
    pub stddev: f64,
    /// Smallest observation
    pub min: f64,
    /// Largest observation
    pub max: f64,
}

/// Per-vector data needed for ordering
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorResult {
    /// Vector id as declared in the result file
    pub vector_id: i32,
    /// Summary statistics of the vector's values
    pub stats: Statistics,
    /// Simulation time of the first sample
    pub start_time: f64,
    /// Simulation time of the last sample
    pub end_time: f64,
}

/// Per-histogram data needed for ordering
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistogramResult {
    /// Summary statistics of the recorded distribution
    pub stats: Statistics,
}

/// Kind-specific payload of a resolved item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemData<'a> {
    /// Scalar value
    Scalar(f64),
    /// Vector summary
    Vector(&'a VectorResult),
    /// Histogram summary
    Histogram(&'a HistogramResult),
}

/// An identifier resolved against a repository
///
/// Borrows from the repository, so it is only valid while the repository
/// is not mutated (typically for the duration of a read lock).
#[derive(Debug, Clone, Copy)]
pub struct ItemMetadata<'a> {
    /// Identifier this metadata was resolved from
    pub id: Id,
    /// File-run the item was recorded under
    pub file_run: FileRunId,
    /// Owning file
    pub file: &'a ResultFile,
    /// Owning run
    pub run: &'a Run,
    /// Full path of the recording module
    pub module_name: &'a str,
    /// Result name
    pub name: &'a str,
    /// Kind-specific payload
    pub data: ItemData<'a>,
}

impl<'a> ItemMetadata<'a> {
    /// Kind of the resolved item
    pub fn kind(&self) -> ItemKind {
        match self.data {
            ItemData::Scalar(_) => ItemKind::Scalar,
            ItemData::Vector(_) => ItemKind::Vector,
            ItemData::Histogram(_) => ItemKind::Histogram,
        }
    }

    /// Scalar value, if this is a scalar
    pub fn scalar_value(&self) -> Option<f64> {
        match self.data {
            ItemData::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Vector summary, if this is a vector
    pub fn vector(&self) -> Option<&'a VectorResult> {
        match self.data {
            ItemData::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Summary statistics, for vectors and histograms
    pub fn stats(&self) -> Option<&'a Statistics> {
        match self.data {
            ItemData::Vector(v) => Some(&v.stats),
            ItemData::Histogram(h) => Some(&h.stats),
            ItemData::Scalar(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_file_path() {
        assert_eq!(split_file_path("results/General-0.sca"), ("results/", "General-0.sca"));
        assert_eq!(split_file_path("/a/b/c.vec"), ("/a/b/", "c.vec"));
        assert_eq!(split_file_path("plain.sca"), ("", "plain.sca"));
        assert_eq!(split_file_path("dir\\win.sca"), ("dir\\", "win.sca"));
        assert_eq!(split_file_path("dir/"), ("dir/", ""));
    }

    #[test]
    fn test_result_file_new() {
        let file = ResultFile::new(FileId(3), "/tmp/results/run1.vec");
        assert_eq!(file.directory, "/tmp/results/");
        assert_eq!(file.file_name, "run1.vec");
        assert_eq!(file.file_path, "/tmp/results/run1.vec");
    }

    #[test]
    fn test_run_attribute() {
        let mut run = Run::new(RunId(0), "General-0-20240101");
        run.attributes.insert("configname".into(), "General".into());
        assert_eq!(run.attribute("configname"), Some("General"));
        assert_eq!(run.attribute("seed"), None);
    }

    #[test]
    fn test_item_metadata_accessors() {
        let file = ResultFile::new(FileId(0), "a.vec");
        let run = Run::new(RunId(0), "r");
        let vector = VectorResult {
            vector_id: 4,
            stats: Statistics {
                count: 10,
                mean: 1.5,
                ..Statistics::default()
            },
            start_time: 0.0,
            end_time: 9.0,
        };
        let meta = ItemMetadata {
            id: Id::new(ItemKind::Vector, 0, 0),
            file_run: FileRunId(0),
            file: &file,
            run: &run,
            module_name: "net.host[0]",
            name: "rtt",
            data: ItemData::Vector(&vector),
        };
        assert_eq!(meta.kind(), ItemKind::Vector);
        assert_eq!(meta.vector().map(|v| v.vector_id), Some(4));
        assert_eq!(meta.stats().map(|s| s.count), Some(10));
        assert_eq!(meta.scalar_value(), None);
    }
}
