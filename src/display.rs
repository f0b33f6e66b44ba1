//! Terminal rendering of the name hierarchy via `termtree`.

use generational_arena::Index;
use termtree::Tree;

use crate::index::DomainIndex;
use crate::lock::LockStrategy;
use crate::tree::NameTree;

pub trait TreeDisplay {
    /// Renders the label hierarchy; registered entries are marked with `*`.
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T> TreeDisplay for NameTree<T> {
    fn to_tree_string(&self) -> Tree<String> {
        fn build<T>(tree: &NameTree<T>, idx: Index, parent: &mut Tree<String>) {
            let node = tree.node(idx);
            for (label, &child_idx) in node.children() {
                let child = tree.node(child_idx);
                let text = if child.is_empty() {
                    label.clone()
                } else {
                    format!("{label} *")
                };
                let mut child_tree = Tree::new(text);
                build(tree, child_idx, &mut child_tree);
                parent.push(child_tree);
            }
        }

        let mut root = Tree::new(".".to_string());
        build(self, self.root(), &mut root);
        root
    }
}

impl<T, L> TreeDisplay for DomainIndex<T, L>
where
    L: LockStrategy<NameTree<T>>,
{
    fn to_tree_string(&self) -> Tree<String> {
        self.with_tree(|tree| tree.to_tree_string())
    }
}
