//! In-memory index over hierarchical domain names.
//!
//! `nametree` stores opaque values under DNS-style names (dot-separated
//! labels, most-significant label last) and answers three kinds of lookup:
//! exact match, closest-encloser match (the most specific registered
//! ancestor), and not-found. The distinction between "the literal node
//! exists but carries no data" and "an ancestor carries data" is handled by
//! re-walking the traversal path with the sub-domain containment predicate.
//!
//! Locking is pluggable at construction time: [`DomainIndex`] defaults to a
//! single-threaded variant with no synchronization overhead, while
//! [`SharedDomainIndex`] wraps the same structure in a reader/writer lock
//! for concurrent use.
//!
//! ```
//! use nametree::{DomainIndex, SearchResult};
//!
//! let index: DomainIndex<u32> = DomainIndex::new();
//! index.insert(&"example.com".parse().unwrap(), 1);
//! index.insert(&"www.example.com".parse().unwrap(), 2);
//!
//! let (name, data, result) = index.search(&"foo.www.example.com".parse().unwrap());
//! assert_eq!(result, SearchResult::ClosestEncloser);
//! assert_eq!(name.unwrap().to_string(), "www.example.com");
//! assert_eq!(data, Some(2));
//! ```

pub mod chain;
pub mod display;
pub mod errors;
pub mod index;
pub mod lock;
pub mod name;
pub mod tree;
pub mod util;

pub use chain::NodeChain;
pub use display::TreeDisplay;
pub use errors::{NameError, TreeError, TreeResult};
pub use index::{DomainIndex, SearchResult, SharedDomainIndex};
pub use lock::{LockStrategy, Shared, SingleThreaded};
pub use name::DomainName;
pub use tree::{FindResult, NameTree};
