//! Shared fixture for IdList integration tests

#![allow(dead_code)]

use scave_core::{FileId, HistogramResult, Id, Statistics, VectorResult};
use scave_storage::ResultFileManager;

/// A small repository with known orderings
///
/// Files and runs:
/// - A = "res/dir9/x-10.sca", B = "res/dir10/x-2.sca"
/// - run-1 (replication "#10"), run-2 (replication "#2", experiment "exp9")
/// - file-runs (A, run-2), (B, run-1), (A, run-1)
///
/// Scalars (module, name, value):
/// - s_a2 in (A, run-2): "net.host[9]",  "alpha", -1.5
/// - s_b1 in (B, run-1): "net.Host[1]",  "count",  7.25
/// - s_a1 in (A, run-1): "net.host[10]", "Bytes",  3.0
///
/// Vectors (all in (B, run-1)) and one histogram in (A, run-2).
pub struct Fixture {
    pub mgr: ResultFileManager,
    pub file_a: FileId,
    pub file_b: FileId,
    pub s_a2: Id,
    pub s_b1: Id,
    pub s_a1: Id,
    pub v1: Id,
    pub v2: Id,
    pub v3: Id,
    pub h1: Id,
}

#[allow(clippy::too_many_arguments)]
pub fn vector(
    vector_id: i32,
    count: i64,
    mean: f64,
    stddev: f64,
    min: f64,
    max: f64,
    start_time: f64,
    end_time: f64,
) -> VectorResult {
    VectorResult {
        vector_id,
        stats: Statistics {
            count,
            mean,
            stddev,
            min,
            max,
        },
        start_time,
        end_time,
    }
}

pub fn fixture() -> Fixture {
    let mut mgr = ResultFileManager::new();
    let file_a = mgr.add_file("res/dir9/x-10.sca").unwrap();
    let file_b = mgr.add_file("res/dir10/x-2.sca").unwrap();
    let run1 = mgr.get_or_add_run("run-1");
    let run2 = mgr.get_or_add_run("run-2");
    mgr.set_run_attribute(run1, "replication", "#10").unwrap();
    mgr.set_run_attribute(run2, "replication", "#2").unwrap();
    mgr.set_run_attribute(run2, "experiment", "exp9").unwrap();

    let fr_a2 = mgr.add_file_run(file_a, run2).unwrap();
    let fr_b1 = mgr.add_file_run(file_b, run1).unwrap();
    let fr_a1 = mgr.add_file_run(file_a, run1).unwrap();

    let s_a2 = mgr.add_scalar(fr_a2, "net.host[9]", "alpha", -1.5).unwrap();
    let s_b1 = mgr.add_scalar(fr_b1, "net.Host[1]", "count", 7.25).unwrap();
    let s_a1 = mgr.add_scalar(fr_a1, "net.host[10]", "Bytes", 3.0).unwrap();

    let v1 = mgr
        .add_vector(fr_b1, "net.q", "len", vector(5, 100, 2.0, 0.5, 0.0, 9.0, 0.0, 100.0))
        .unwrap();
    let v2 = mgr
        .add_vector(fr_b1, "net.q", "len", vector(3, 10, 4.0, 1.5, -1.0, 3.0, 5.0, 50.0))
        .unwrap();
    let v3 = mgr
        .add_vector(fr_b1, "net.q", "len", vector(8, 50, 1.0, 0.1, 2.0, 4.0, 2.0, 70.0))
        .unwrap();

    let h1 = mgr
        .add_histogram(fr_a2, "net.q", "delay", HistogramResult::default())
        .unwrap();

    Fixture {
        mgr,
        file_a,
        file_b,
        s_a2,
        s_b1,
        s_a1,
        v1,
        v2,
        v3,
        h1,
    }
}
