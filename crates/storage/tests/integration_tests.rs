//! Integration tests for the storage layer
//!
//! These tests verify that ResultFileManager works correctly as a complete system:
//! - Identifier resolution across several files and runs
//! - Index consistency after unloading files
//! - Shared access through `SharedResultFileManager`

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use proptest::prelude::*;
use scave_core::{Error, FileRunId, Id, ItemKind, ResultRepository, VectorResult};
use scave_storage::ResultFileManager;

// ============================================================================
// Helper Functions
// ============================================================================

/// Load `files` files with `runs` runs each, returning every file-run
fn populate(mgr: &mut ResultFileManager, files: usize, runs: usize) -> Vec<FileRunId> {
    let mut file_runs = Vec::new();
    for f in 0..files {
        let file = mgr.add_file(&format!("results/General-{}.sca", f)).unwrap();
        for r in 0..runs {
            let run = mgr.get_or_add_run(&format!("General-{}", r));
            file_runs.push(mgr.add_file_run(file, run).unwrap());
        }
    }
    file_runs
}

// ============================================================================
// Resolution
// ============================================================================

mod resolution {
    use super::*;

    #[test]
    fn test_ids_are_distinct_across_files_and_kinds() {
        let mut mgr = ResultFileManager::new();
        let file_runs = populate(&mut mgr, 3, 2);

        let mut seen = HashSet::new();
        for fr in &file_runs {
            assert!(seen.insert(mgr.add_scalar(*fr, "m", "s", 1.0).unwrap()));
            assert!(seen.insert(mgr.add_vector(*fr, "m", "v", VectorResult::default()).unwrap()));
        }
        assert_eq!(seen.len(), 12);
        assert_eq!(mgr.all_items().len(), 12);
    }

    #[test]
    fn test_resolved_metadata_matches_file_run() {
        let mut mgr = ResultFileManager::new();
        let file_runs = populate(&mut mgr, 2, 3);

        for fr in &file_runs {
            let id = mgr.add_scalar(*fr, "net.host", "rtt", 0.5).unwrap();
            let expected = *mgr.file_run(*fr).unwrap();
            let meta = mgr.resolve(id).unwrap();
            assert_eq!(meta.file_run, *fr);
            assert_eq!(meta.file.id, expected.file);
            assert_eq!(meta.run.id, expected.run);
            assert_eq!(id.file_slot(), expected.file.0);
        }
    }

    #[test]
    fn test_runs_shared_between_files() {
        let mut mgr = ResultFileManager::new();
        populate(&mut mgr, 4, 2);
        // Two distinct run names across four files
        let r0 = mgr.run_by_name("General-0").unwrap();
        let r1 = mgr.run_by_name("General-1").unwrap();
        assert_ne!(r0, r1);
        assert_eq!(mgr.run(r0).unwrap().run_name, "General-0");
    }

    #[test]
    fn test_windows_style_path_split() {
        let mut mgr = ResultFileManager::new();
        let file = mgr.add_file("C:\\sim\\results\\a.vec").unwrap();
        let f = mgr.file(file).unwrap();
        assert_eq!(f.directory, "C:\\sim\\results\\");
        assert_eq!(f.file_name, "a.vec");
    }

    #[test]
    fn test_kind_of_uses_tag_only() {
        let mgr = ResultFileManager::new();
        let id = Id::new(ItemKind::Vector, 3, 7);
        assert_eq!(mgr.kind_of(id), Some(ItemKind::Vector));
        assert!(!mgr.contains(id));
    }
}

// ============================================================================
// Unloading
// ============================================================================

mod unloading {
    use super::*;

    #[test]
    fn test_unload_leaves_other_files_intact() {
        let mut mgr = ResultFileManager::new();
        let file_runs = populate(&mut mgr, 3, 1);
        let ids: Vec<Id> = file_runs
            .iter()
            .map(|fr| mgr.add_scalar(*fr, "m", "x", 1.0).unwrap())
            .collect();

        let middle = mgr.file_run(file_runs[1]).unwrap().file;
        mgr.unload_file(middle).unwrap();

        assert!(mgr.resolve(ids[0]).is_ok());
        assert!(matches!(
            mgr.resolve(ids[1]),
            Err(Error::IntegrityViolation { .. })
        ));
        assert!(mgr.resolve(ids[2]).is_ok());
        assert_eq!(mgr.all_scalars(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn test_reload_same_path_gets_new_slot() {
        let mut mgr = ResultFileManager::new();
        let file_runs = populate(&mut mgr, 1, 1);
        let old_id = mgr.add_scalar(file_runs[0], "m", "x", 1.0).unwrap();
        let old_file = mgr.file_by_path("results/General-0.sca").unwrap();

        mgr.unload_file(old_file).unwrap();
        assert_eq!(mgr.file_by_path("results/General-0.sca"), None);

        let new_file = mgr.add_file("results/General-0.sca").unwrap();
        assert_ne!(new_file, old_file);
        let run = mgr.run_by_name("General-0").unwrap();
        let fr = mgr.add_file_run(new_file, run).unwrap();
        let new_id = mgr.add_scalar(fr, "m", "x", 1.0).unwrap();

        assert_ne!(new_id, old_id);
        assert!(mgr.resolve(old_id).is_err());
        assert!(mgr.resolve(new_id).is_ok());
    }

    #[test]
    fn test_items_cannot_be_added_to_dropped_file_run() {
        let mut mgr = ResultFileManager::new();
        let file_runs = populate(&mut mgr, 1, 1);
        let file = mgr.file_run(file_runs[0]).unwrap().file;
        mgr.unload_file(file).unwrap();
        assert!(matches!(
            mgr.add_scalar(file_runs[0], "m", "x", 1.0),
            Err(Error::NotFound(_))
        ));
    }
}

// ============================================================================
// Shared Access
// ============================================================================

mod shared_access {
    use super::*;

    #[test]
    fn test_concurrent_readers_with_writer() {
        let mut mgr = ResultFileManager::new();
        let file_runs = populate(&mut mgr, 1, 1);
        let ids: Vec<Id> = (0..100)
            .map(|i| mgr.add_scalar(file_runs[0], "m", "x", i as f64).unwrap())
            .collect();
        let shared = mgr.into_shared();
        let ids = Arc::new(ids);

        let mut handles = Vec::new();
        for _ in 0..4 {
            let shared = Arc::clone(&shared);
            let ids = Arc::clone(&ids);
            handles.push(thread::spawn(move || {
                for _ in 0..50 {
                    let guard = shared.read();
                    for id in ids.iter() {
                        assert!(guard.resolve(*id).is_ok());
                    }
                }
            }));
        }

        let writer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..20 {
                    shared.write().add_file(&format!("extra/{}.sca", i)).unwrap();
                }
            })
        };

        for h in handles {
            h.join().unwrap();
        }
        writer.join().unwrap();
        assert_eq!(shared.read().file_count(), 21);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_every_added_item_resolves(values in prop::collection::vec(-1e6f64..1e6, 1..50)) {
        let mut mgr = ResultFileManager::new();
        let file_runs = populate(&mut mgr, 2, 2);
        for (i, v) in values.iter().enumerate() {
            let fr = file_runs[i % file_runs.len()];
            let id = mgr.add_scalar(fr, "m", "x", *v).unwrap();
            let meta = mgr.resolve(id).unwrap();
            prop_assert_eq!(meta.scalar_value(), Some(*v));
            prop_assert_eq!(meta.file_run, fr);
        }
        prop_assert_eq!(mgr.all_scalars().len(), values.len());
    }
}
