//! Arena-based label trie keyed by domain name.
//!
//! Uses a generational arena for memory-safe node references and O(1)
//! lookups. Each node owns one label; a node's absolute name is the label
//! path from the node up to the root. Nodes may exist purely as structural
//! waypoints: reaching a node is not the same as that node representing a
//! registered entry, which is why [`NameTree::search`] reports a raw outcome
//! that callers re-interpret.

use std::collections::BTreeMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::chain::NodeChain;
use crate::errors::{TreeError, TreeResult};
use crate::name::DomainName;

/// Tree node holding one label and an optional data payload.
#[derive(Debug)]
pub struct Node<T> {
    /// Label of this node within its parent
    pub(crate) label: String,
    /// Index of the parent node, None for the root
    pub(crate) parent: Option<Index>,
    /// Children keyed by label; BTreeMap keeps traversal in hierarchy order
    pub(crate) children: BTreeMap<String, Index>,
    /// Payload, None for structural placeholders
    pub(crate) data: Option<T>,
}

impl<T> Node<T> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Child indices keyed by label.
    pub fn children(&self) -> &BTreeMap<String, Index> {
        &self.children
    }

    /// Replaces the payload, returning the previous one.
    pub fn set_data(&mut self, data: T) -> Option<T> {
        self.data.replace(data)
    }

    /// True if the node is a pure structural placeholder.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

/// Raw traversal outcome of [`NameTree::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindResult {
    /// A data-bearing node for the exact query name exists
    Exact,
    /// Only part of the query was consumed; the terminal node is the deepest
    /// data-bearing ancestor on the walked path
    Partial,
    /// No data-bearing ancestor was seen on the walked path
    NotFound,
}

/// Label trie over a generational arena.
#[derive(Debug)]
pub struct NameTree<T> {
    arena: Arena<Node<T>>,
    root: Index,
}

impl<T> Default for NameTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NameTree<T> {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node {
            label: String::new(),
            parent: None,
            children: BTreeMap::new(),
            data: None,
        });
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    /// Resolves an arena index held by this tree. Indices handed out by this
    /// tree stay valid until the node is removed; a stale index is an
    /// invariant breach and panics.
    pub fn node(&self, idx: Index) -> &Node<T> {
        &self.arena[idx]
    }

    pub fn node_mut(&mut self, idx: Index) -> &mut Node<T> {
        &mut self.arena[idx]
    }

    /// Creates (or finds) the node for `name`, creating structural
    /// intermediates as needed, and returns its index.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, name: &DomainName) -> Index {
        let mut cur = self.root;
        for label in name.labels().iter().rev() {
            let existing = self.arena[cur].children.get(label).copied();
            cur = match existing {
                Some(idx) => idx,
                None => {
                    let child = self.arena.insert(Node {
                        label: label.clone(),
                        parent: Some(cur),
                        children: BTreeMap::new(),
                        data: None,
                    });
                    self.arena[cur].children.insert(label.clone(), child);
                    child
                }
            };
        }
        cur
    }

    /// Extended traversal primitive. Descends the trie along `name`'s labels
    /// (most-significant first), pushing every node visited onto `chain`,
    /// and returns the terminal node with the raw outcome:
    ///
    /// - [`FindResult::Exact`]: every label was consumed and the terminal
    ///   node carries data. Structural placeholders are invisible here: a
    ///   fully-consumed descent onto an empty node falls through to the
    ///   outcomes below.
    /// - [`FindResult::Partial`]: the query was not matched in full but a
    ///   data-bearing ancestor was seen; that ancestor is the terminal node.
    ///   The chain may contain nodes deeper than the terminal.
    /// - [`FindResult::NotFound`]: no data-bearing node lies on the walked
    ///   path.
    #[instrument(level = "trace", skip(self, chain))]
    pub fn search(&self, name: &DomainName, chain: &mut NodeChain) -> (Index, FindResult) {
        let mut cur = self.root;
        let mut deepest_data: Option<Index> = None;
        let mut matched = 0;
        for label in name.labels().iter().rev() {
            match self.arena[cur].children.get(label) {
                Some(&child) => {
                    cur = child;
                    chain.push(child);
                    if self.arena[child].data.is_some() {
                        deepest_data = Some(child);
                    }
                    matched += 1;
                }
                None => break,
            }
        }

        if matched == name.label_count() && self.arena[cur].data.is_some() {
            (cur, FindResult::Exact)
        } else if let Some(idx) = deepest_data {
            (idx, FindResult::Partial)
        } else {
            (cur, FindResult::NotFound)
        }
    }

    /// Removes the entry for `name`, returning its payload. Structural
    /// placeholders left childless by the removal are pruned bottom-up.
    /// Names that were never registered (including names that only exist as
    /// placeholders) report [`TreeError::NameNotFound`].
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, name: &DomainName) -> TreeResult<T> {
        let mut cur = self.root;
        for label in name.labels().iter().rev() {
            match self.arena[cur].children.get(label) {
                Some(&child) => cur = child,
                None => return Err(TreeError::NameNotFound(name.clone())),
            }
        }
        let data = self.arena[cur]
            .data
            .take()
            .ok_or_else(|| TreeError::NameNotFound(name.clone()))?;

        let mut idx = cur;
        while idx != self.root {
            let node = &self.arena[idx];
            if node.data.is_some() || !node.children.is_empty() {
                break;
            }
            let Some(parent) = node.parent else { break };
            let label = node.label.clone();
            self.arena.remove(idx);
            self.arena[parent].children.remove(&label);
            idx = parent;
        }

        Ok(data)
    }

    /// Computes the absolute name of a node by walking its parent links.
    pub fn node_name(&self, idx: Index) -> DomainName {
        let mut labels = Vec::new();
        let mut cur = Some(idx);
        while let Some(i) = cur {
            let node = &self.arena[i];
            if node.parent.is_some() {
                labels.push(node.label.clone());
            }
            cur = node.parent;
        }
        DomainName::from_labels(labels)
    }

    /// Visits every node depth-first, children in label order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Node<T>),
    {
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            let node = &self.arena[idx];
            // Push children in reverse order for label-order traversal
            for &child in node.children.values().rev() {
                stack.push(child);
            }
            f(node);
        }
    }

    /// Number of data-bearing entries.
    pub fn len(&self) -> usize {
        self.arena.iter().filter(|(_, n)| n.data.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> DomainName {
        s.parse().unwrap()
    }

    #[test]
    fn given_inserted_name_when_searching_then_reports_exact() {
        let mut tree = NameTree::new();
        let idx = tree.insert(&name("example.com"));
        tree.node_mut(idx).set_data(1u32);

        let mut chain = NodeChain::new();
        let (found, outcome) = tree.search(&name("example.com"), &mut chain);
        assert_eq!(outcome, FindResult::Exact);
        assert_eq!(tree.node(found).data(), Some(&1));
        assert_eq!(chain.len(), 2);
        assert_eq!(
            chain.absolute_name(&tree).unwrap().to_string(),
            "example.com"
        );
    }

    #[test]
    fn given_placeholder_node_when_searching_exactly_then_placeholder_is_invisible() {
        let mut tree = NameTree::new();
        let idx = tree.insert(&name("www.example.com"));
        tree.node_mut(idx).set_data(1u32);

        // "com" and "example.com" exist only as structural waypoints; a
        // fully-consumed descent onto one is not a match
        let mut chain = NodeChain::new();
        let (_, outcome) = tree.search(&name("example.com"), &mut chain);
        assert_eq!(outcome, FindResult::NotFound);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn given_placeholder_node_with_data_ancestor_when_searching_exactly_then_reports_partial() {
        let mut tree = NameTree::new();
        let idx = tree.insert(&name("com"));
        tree.node_mut(idx).set_data(9u32);
        tree.insert(&name("www.example.com"));

        let mut chain = NodeChain::new();
        let (found, outcome) = tree.search(&name("example.com"), &mut chain);
        assert_eq!(outcome, FindResult::Partial);
        assert_eq!(tree.node_name(found).to_string(), "com");
    }

    #[test]
    fn given_deeper_query_when_searching_then_reports_partial_at_data_ancestor() {
        let mut tree = NameTree::new();
        let idx = tree.insert(&name("example.com"));
        tree.node_mut(idx).set_data(1u32);
        tree.insert(&name("a.b.example.com"));

        let mut chain = NodeChain::new();
        let (found, outcome) = tree.search(&name("x.b.example.com"), &mut chain);
        assert_eq!(outcome, FindResult::Partial);
        assert_eq!(tree.node_name(found).to_string(), "example.com");
        // Chain went deeper than the terminal, down to the "b" placeholder
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn given_no_data_ancestor_when_searching_then_reports_not_found() {
        let mut tree = NameTree::new();
        let idx = tree.insert(&name("www.example.com"));
        tree.node_mut(idx).set_data(1u32);

        let mut chain = NodeChain::new();
        let (_, outcome) = tree.search(&name("foo.example.com"), &mut chain);
        assert_eq!(outcome, FindResult::NotFound);
        // Placeholder path was still walked
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn given_removal_when_branch_becomes_empty_then_prunes_placeholders() {
        let mut tree = NameTree::new();
        let idx = tree.insert(&name("a.b.example.com"));
        tree.node_mut(idx).set_data(1u32);
        let idx = tree.insert(&name("example.com"));
        tree.node_mut(idx).set_data(2u32);

        assert_eq!(tree.remove(&name("a.b.example.com")).unwrap(), 1);

        // The "a" and "b" placeholders are gone; "example.com" still resolves
        let mut chain = NodeChain::new();
        let (_, outcome) = tree.search(&name("b.example.com"), &mut chain);
        assert_eq!(outcome, FindResult::Partial);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn given_placeholder_when_removing_then_reports_not_found() {
        let mut tree = NameTree::new();
        let idx = tree.insert(&name("www.example.com"));
        tree.node_mut(idx).set_data(1u32);

        let err = tree.remove(&name("example.com")).unwrap_err();
        assert_eq!(err, TreeError::NameNotFound(name("example.com")));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn given_entries_when_iterating_then_visits_each_node_once() {
        let mut tree = NameTree::new();
        for (n, v) in [("example.com", 1u32), ("www.example.com", 2), ("org", 3)] {
            let idx = tree.insert(&name(n));
            tree.node_mut(idx).set_data(v);
        }

        let mut seen = Vec::new();
        tree.for_each(|node| {
            if let Some(&v) = node.data() {
                seen.push(v);
            }
        });
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(tree.len(), 3);
    }
}
