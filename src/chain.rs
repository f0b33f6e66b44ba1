//! Node chain: the path of tree nodes walked by one traversal.
//!
//! A chain is ephemeral. It is filled by [`NameTree::search`], consumed by
//! the caller to re-interpret the raw traversal outcome, and discarded.
//! Implemented as a plain `Vec`-backed stack, root-first.

use generational_arena::Index;

use crate::name::DomainName;
use crate::tree::NameTree;

#[derive(Debug, Default)]
pub struct NodeChain {
    path: Vec<Index>,
}

impl NodeChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// The deepest node on the chain.
    pub fn top(&self) -> Option<Index> {
        self.path.last().copied()
    }

    pub fn pop(&mut self) -> Option<Index> {
        self.path.pop()
    }

    pub(crate) fn push(&mut self, idx: Index) {
        self.path.push(idx);
    }

    /// The absolute name represented by the chain, i.e. the name of its
    /// deepest node.
    pub fn absolute_name<T>(&self, tree: &NameTree<T>) -> Option<DomainName> {
        self.top().map(|idx| tree.node_name(idx))
    }

    /// Absolute names of every node on the chain, root-first.
    pub fn names<T>(&self, tree: &NameTree<T>) -> Vec<DomainName> {
        self.path.iter().map(|&idx| tree.node_name(idx)).collect()
    }
}
