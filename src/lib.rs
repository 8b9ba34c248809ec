//! Scave - identifier collections over simulation result repositories
//!
//! A result repository holds scalars, vectors and histograms recorded by
//! simulation runs, grouped by result file and run. Result browsers and
//! analysis tools refer to items by opaque 64-bit identifiers and keep
//! selections of them in an [`IdList`]: an ordered, duplicate-free
//! collection with set algebra, integrity checks and sorting by any item
//! attribute.
//!
//! # Quick Start
//!
//! ```
//! use scave::{IdList, ResultFileManager, SortKey};
//!
//! let mut mgr = ResultFileManager::new();
//! let file = mgr.add_file("results/General-0.sca")?;
//! let run = mgr.get_or_add_run("General-0-20240101");
//! let fr = mgr.add_file_run(file, run)?;
//!
//! let mut list = IdList::new();
//! list.add(mgr.add_scalar(fr, "net.host[1]", "rtt", 0.5)?);
//! list.add(mgr.add_scalar(fr, "net.host[0]", "rtt", 0.25)?);
//!
//! list.sort_by_key(&mgr, SortKey::Module, true)?;
//! assert_eq!(mgr_module(&mgr, &list, 0), "net.host[0]");
//! # fn mgr_module(m: &ResultFileManager, l: &IdList, i: usize) -> String {
//! #     use scave::ResultRepository;
//! #     m.resolve(l.get(i).unwrap()).unwrap().module_name.to_string()
//! # }
//! # Ok::<(), scave::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `scave-core`: identifiers, item metadata, errors, the repository trait
//! - `scave-storage`: the in-memory `ResultFileManager`
//! - `scave-idlist`: `IdList`, sorting, marshalling and sort configuration

pub use scave_core::*;
pub use scave_idlist::*;
pub use scave_storage::*;
