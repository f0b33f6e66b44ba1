//! The domain index: classified search over the label trie under a
//! pluggable lock.
//!
//! The trie's raw traversal outcome is conservative. A "not found" from the
//! trie may have stopped at a structural placeholder, so the index re-walks
//! the node chain with the sub-domain containment predicate to find the
//! nearest ancestor that genuinely carries data, and only then classifies
//! the query as exact match, closest encloser, or not found.

use std::marker::PhantomData;

use tracing::instrument;

use crate::chain::NodeChain;
use crate::errors::TreeResult;
use crate::lock::{LockStrategy, Shared, SingleThreaded};
use crate::name::DomainName;
use crate::tree::{FindResult, NameTree};

/// Classified outcome of [`DomainIndex::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    /// The query name itself is registered
    ExactMatch,
    /// A strict ancestor of the query carries data
    ClosestEncloser,
    /// No registered name encloses the query
    NotFound,
}

/// In-memory index over hierarchical domain names.
///
/// The default lock parameter gives a single-threaded index with no
/// synchronization overhead; [`SharedDomainIndex`] selects the concurrent
/// reader/writer variant. Mutation goes through `&self`: the lock strategy
/// provides the interior mutability.
#[derive(Debug)]
pub struct DomainIndex<T, L = SingleThreaded<NameTree<T>>>
where
    L: LockStrategy<NameTree<T>>,
{
    tree: L,
    marker: PhantomData<T>,
}

/// Concurrently usable domain index: any number of readers, writers
/// exclusive.
pub type SharedDomainIndex<T> = DomainIndex<T, Shared<NameTree<T>>>;

impl<T, L> Default for DomainIndex<T, L>
where
    L: LockStrategy<NameTree<T>>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, L> DomainIndex<T, L>
where
    L: LockStrategy<NameTree<T>>,
{
    pub fn new() -> Self {
        Self {
            tree: L::new(NameTree::new()),
            marker: PhantomData,
        }
    }

    /// Looks up `name`, returning the matched name, its data, and the
    /// classification. `(None, None, NotFound)` when no registered name
    /// encloses the query.
    ///
    /// Structural placeholders are not matches: a query whose literal node
    /// exists but carries no entry falls back to its closest encloser, or
    /// to not-found.
    #[instrument(level = "debug", skip(self))]
    pub fn search(&self, name: &DomainName) -> (Option<DomainName>, Option<T>, SearchResult)
    where
        T: Clone,
    {
        let tree = self.tree.read();
        let mut chain = NodeChain::new();
        let (found, outcome) = tree.search(name, &mut chain);
        match outcome {
            FindResult::Exact => (
                Some(name.clone()),
                tree.node(found).data().cloned(),
                SearchResult::ExactMatch,
            ),
            FindResult::Partial => {
                // Discard chain entries deeper than the terminal node
                while let Some(top) = chain.top() {
                    if top == found {
                        break;
                    }
                    chain.pop();
                }
                debug_assert!(!chain.is_empty(), "partial-match node missing from its chain");
                (
                    chain.absolute_name(&*tree),
                    tree.node(found).data().cloned(),
                    SearchResult::ClosestEncloser,
                )
            }
            FindResult::NotFound => {
                // The trie's signal is conservative: re-derive true ancestor
                // status from the chain, skipping placeholders
                while let Some(top) = chain.top() {
                    let parent = tree.node(top);
                    if !parent.is_empty() && name.is_subdomain(&tree.node_name(top)) {
                        return (
                            chain.absolute_name(&*tree),
                            parent.data().cloned(),
                            SearchResult::ClosestEncloser,
                        );
                    }
                    chain.pop();
                }
                (None, None, SearchResult::NotFound)
            }
        }
    }

    /// Like [`search`](Self::search), but returns the absolute names of the
    /// whole ancestor path (root-first) instead of flattening to the nearest
    /// match. Classification agrees with `search` for the same input.
    #[instrument(level = "debug", skip(self))]
    pub fn search_parents(&self, name: &DomainName) -> (Vec<DomainName>, SearchResult) {
        let tree = self.tree.read();
        let mut chain = NodeChain::new();
        let (found, outcome) = tree.search(name, &mut chain);
        match outcome {
            FindResult::Exact => (chain.names(&*tree), SearchResult::ExactMatch),
            FindResult::Partial => {
                while let Some(top) = chain.top() {
                    if top == found {
                        break;
                    }
                    chain.pop();
                }
                (chain.names(&*tree), SearchResult::ClosestEncloser)
            }
            FindResult::NotFound => {
                while let Some(top) = chain.top() {
                    let parent = tree.node(top);
                    if !parent.is_empty() && name.is_subdomain(&tree.node_name(top)) {
                        return (chain.names(&*tree), SearchResult::ClosestEncloser);
                    }
                    chain.pop();
                }
                (Vec::new(), SearchResult::NotFound)
            }
        }
    }

    /// Registers `data` under `name`, creating structural intermediates as
    /// needed. An existing entry for the exact name is silently overwritten.
    #[instrument(level = "debug", skip(self, data))]
    pub fn insert(&self, name: &DomainName, data: T) {
        let mut tree = self.tree.write();
        let node = tree.insert(name);
        tree.node_mut(node).set_data(data);
    }

    /// Like [`insert`](Self::insert), but returns the previous entry for the
    /// exact name (`None` for a fresh insert), letting callers distinguish
    /// insert from replace without a separate existence check.
    #[instrument(level = "debug", skip(self, data))]
    pub fn insert_or_replace(&self, name: &DomainName, data: T) -> Option<T> {
        let mut tree = self.tree.write();
        let node = tree.insert(name);
        tree.node_mut(node).set_data(data)
    }

    /// Removes the entry for exactly `name`, returning its data. Errors when
    /// the name was never registered.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, name: &DomainName) -> TreeResult<T> {
        let mut tree = self.tree.write();
        tree.remove(name)
    }

    /// Invokes `f` once per registered entry, in hierarchy order.
    ///
    /// The callback runs under the shared lock: mutating the index from
    /// inside it deadlocks the concurrent variant and panics the
    /// single-threaded one.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        let tree = self.tree.read();
        tree.for_each(|node| {
            if let Some(data) = node.data() {
                f(data);
            }
        });
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }

    pub(crate) fn with_tree<R>(&self, f: impl FnOnce(&NameTree<T>) -> R) -> R {
        f(&self.tree.read())
    }
}
