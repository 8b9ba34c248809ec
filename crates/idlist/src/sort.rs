//! Sorting identifier lists by repository metadata
//!
//! Each sort criterion is a `SortKey` variant dispatched to a comparison
//! over resolved `ItemMetadata`. Strings compare in dictionary order
//! (`dict_cmp`), numbers with `f64::total_cmp`.
//!
//! # Driver
//!
//! 1. Resolve every identifier (integrity check), then check the kind the
//!    key requires, if any. Nothing is mutated when either fails.
//! 2. If the first element already sorts after the last in the requested
//!    direction, reverse the list first. A list sorted the other way round
//!    then costs O(n) instead of a full sort.
//! 3. Sort with the key, arguments swapped for descending order.
//!
//! Metadata is read live: a repository mutated between two sorts can give
//! different results. Hold the repository's read lock for the duration of
//! a sort (`sort_locked`) when other threads may mutate it.

use std::cmp::Ordering;
use std::fmt;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, warn};

use scave_core::{dict_cmp, ItemKind, ItemMetadata, Result, ResultRepository, VectorResult};

use crate::config::SortConfig;
use crate::list::IdList;

/// Sort criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey<'a> {
    /// File path, then run name; items of the same file-run are equal
    FileAndRun,
    /// Run name, then file path; items of the same file-run are equal
    RunAndFile,
    /// Directory of the owning file
    Directory,
    /// File name of the owning file
    FileName,
    /// Run name
    Run,
    /// Module name
    Module,
    /// Item name
    Name,
    /// Scalar value (scalars only)
    ScalarValue,
    /// Vector id (vectors only)
    VectorId,
    /// Number of samples (vectors only)
    VectorLength,
    /// Mean of samples (vectors only)
    VectorMean,
    /// Standard deviation of samples (vectors only)
    VectorStdDev,
    /// Minimum sample (vectors only)
    VectorMin,
    /// Maximum sample (vectors only)
    VectorMax,
    /// Time of the first sample (vectors only)
    VectorStartTime,
    /// Time of the last sample (vectors only)
    VectorEndTime,
    /// Value of the named run attribute; runs lacking it sort last
    RunAttribute(&'a str),
}

impl<'a> SortKey<'a> {
    /// Item kind every identifier must have for this key, if any
    pub fn required_kind(&self) -> Option<ItemKind> {
        match self {
            SortKey::ScalarValue => Some(ItemKind::Scalar),
            SortKey::VectorId
            | SortKey::VectorLength
            | SortKey::VectorMean
            | SortKey::VectorStdDev
            | SortKey::VectorMin
            | SortKey::VectorMax
            | SortKey::VectorStartTime
            | SortKey::VectorEndTime => Some(ItemKind::Vector),
            _ => None,
        }
    }

    /// Compare two resolved items under this key
    pub fn compare(&self, a: &ItemMetadata<'_>, b: &ItemMetadata<'_>) -> Ordering {
        match self {
            SortKey::FileAndRun => {
                if a.file_run == b.file_run {
                    Ordering::Equal
                } else if a.file.id == b.file.id {
                    dict_cmp(&a.run.run_name, &b.run.run_name)
                } else {
                    dict_cmp(&a.file.file_path, &b.file.file_path)
                }
            }
            SortKey::RunAndFile => {
                if a.file_run == b.file_run {
                    Ordering::Equal
                } else if a.run.id == b.run.id {
                    dict_cmp(&a.file.file_path, &b.file.file_path)
                } else {
                    dict_cmp(&a.run.run_name, &b.run.run_name)
                }
            }
            SortKey::Directory => dict_cmp(&a.file.directory, &b.file.directory),
            SortKey::FileName => dict_cmp(&a.file.file_name, &b.file.file_name),
            SortKey::Run => dict_cmp(&a.run.run_name, &b.run.run_name),
            SortKey::Module => dict_cmp(a.module_name, b.module_name),
            SortKey::Name => dict_cmp(a.name, b.name),
            SortKey::ScalarValue => cmp_f64(a.scalar_value(), b.scalar_value()),
            SortKey::VectorId => cmp_vectors(a, b, |x, y| x.vector_id.cmp(&y.vector_id)),
            SortKey::VectorLength => cmp_vectors(a, b, |x, y| x.stats.count.cmp(&y.stats.count)),
            SortKey::VectorMean => cmp_vector_f64(a, b, |v| v.stats.mean),
            SortKey::VectorStdDev => cmp_vector_f64(a, b, |v| v.stats.stddev),
            SortKey::VectorMin => cmp_vector_f64(a, b, |v| v.stats.min),
            SortKey::VectorMax => cmp_vector_f64(a, b, |v| v.stats.max),
            SortKey::VectorStartTime => cmp_vector_f64(a, b, |v| v.start_time),
            SortKey::VectorEndTime => cmp_vector_f64(a, b, |v| v.end_time),
            SortKey::RunAttribute(name) => {
                match (a.run.attribute(name), b.run.attribute(name)) {
                    (Some(x), Some(y)) => dict_cmp(x, y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        }
    }

    /// Strict "less than" under this key
    pub fn less(&self, a: &ItemMetadata<'_>, b: &ItemMetadata<'_>) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

impl fmt::Display for SortKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::RunAttribute(name) => write!(f, "RunAttribute({})", name),
            other => write!(f, "{:?}", other),
        }
    }
}

fn cmp_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => Ordering::Equal,
    }
}

/// Compare two items as vectors; non-vectors (rejected before sorting) tie
fn cmp_vectors(
    a: &ItemMetadata<'_>,
    b: &ItemMetadata<'_>,
    cmp: impl Fn(&VectorResult, &VectorResult) -> Ordering,
) -> Ordering {
    match (a.vector(), b.vector()) {
        (Some(x), Some(y)) => cmp(x, y),
        _ => Ordering::Equal,
    }
}

fn cmp_vector_f64(
    a: &ItemMetadata<'_>,
    b: &ItemMetadata<'_>,
    field: impl Fn(&VectorResult) -> f64,
) -> Ordering {
    cmp_f64(a.vector().map(&field), b.vector().map(&field))
}

impl IdList {
    /// Sort by `key` using the default configuration
    ///
    /// # Errors
    ///
    /// Returns `IntegrityViolation` if an identifier does not resolve, or
    /// `HeterogeneityViolation` if `key` requires a kind the list does not
    /// consist of. The list is unchanged on error.
    pub fn sort_by_key<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        key: SortKey<'_>,
        ascending: bool,
    ) -> Result<()> {
        self.sort_with_config(repo, key, ascending, &SortConfig::default())
    }

    /// Sort by `key` while holding the repository's read lock
    pub fn sort_locked<R: ResultRepository>(
        &mut self,
        repo: &RwLock<R>,
        key: SortKey<'_>,
        ascending: bool,
    ) -> Result<()> {
        let guard = repo.read();
        self.sort_by_key(&*guard, key, ascending)
    }

    /// Sort by `key` with an explicit configuration
    pub fn sort_with_config<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        key: SortKey<'_>,
        ascending: bool,
        config: &SortConfig,
    ) -> Result<()> {
        let started = Instant::now();

        let mut items = self.resolve_all(repo)?;
        if let Some(kind) = key.required_kind() {
            self.check_kind(kind)?;
        }

        let reversed = config.reverse_presorted
            && items.len() >= 2
            && key.less(&items[0], &items[items.len() - 1]) != ascending;
        if reversed {
            items.reverse();
        }

        if ascending {
            items.sort_by(|a, b| key.compare(a, b));
        } else {
            items.sort_by(|a, b| key.compare(b, a));
        }
        self.ids = items.iter().map(|item| item.id).collect();

        let elapsed = started.elapsed();
        debug!(
            target: "scave::idlist",
            key = %key,
            ascending,
            reversed,
            len = self.ids.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "sort"
        );
        if elapsed.as_millis() as u64 > config.slow_sort_threshold_ms {
            warn!(
                target: "scave::idlist",
                key = %key,
                len = self.ids.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Slow sort"
            );
        }
        Ok(())
    }

    /// Sort by file path, then run name
    pub fn sort_by_file_and_run<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::FileAndRun, ascending)
    }

    /// Sort by run name, then file path
    pub fn sort_by_run_and_file<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::RunAndFile, ascending)
    }

    /// Sort by directory of the owning file
    pub fn sort_by_directory<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::Directory, ascending)
    }

    /// Sort by file name of the owning file
    pub fn sort_by_file_name<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::FileName, ascending)
    }

    /// Sort by run name
    pub fn sort_by_run<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::Run, ascending)
    }

    /// Sort by module name
    pub fn sort_by_module<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::Module, ascending)
    }

    /// Sort by item name
    pub fn sort_by_name<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::Name, ascending)
    }

    /// Sort scalars by value
    pub fn sort_scalars_by_value<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::ScalarValue, ascending)
    }

    /// Sort vectors by vector id
    pub fn sort_vectors_by_vector_id<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::VectorId, ascending)
    }

    /// Sort vectors by sample count
    pub fn sort_vectors_by_length<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::VectorLength, ascending)
    }

    /// Sort vectors by mean
    pub fn sort_vectors_by_mean<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::VectorMean, ascending)
    }

    /// Sort vectors by standard deviation
    pub fn sort_vectors_by_std_dev<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::VectorStdDev, ascending)
    }

    /// Sort vectors by minimum
    pub fn sort_vectors_by_min<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::VectorMin, ascending)
    }

    /// Sort vectors by maximum
    pub fn sort_vectors_by_max<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::VectorMax, ascending)
    }

    /// Sort vectors by time of the first sample
    pub fn sort_vectors_by_start_time<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::VectorStartTime, ascending)
    }

    /// Sort vectors by time of the last sample
    pub fn sort_vectors_by_end_time<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::VectorEndTime, ascending)
    }

    /// Sort by the value of a run attribute; items whose run lacks it go last
    /// (first when descending)
    pub fn sort_by_run_attribute<R: ResultRepository + ?Sized>(
        &mut self,
        repo: &R,
        attribute: &str,
        ascending: bool,
    ) -> Result<()> {
        self.sort_by_key(repo, SortKey::RunAttribute(attribute), ascending)
    }
}
