//! Rendering of a [`Tree`] as an indented text diagram.

use std::collections::HashMap;
use std::fmt::Display;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::tree::{NodeId, Tree};

/// Deepest level that is rendered; anything below is collapsed into `...`.
pub const MAX_RENDER_DEPTH: usize = 256;

pub trait TreeDisplay {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<T: Display> TreeDisplay for Tree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> TermTree<String> {
        // Pre-order visits parents first, so each level derives from its parent's.
        let mut levels: HashMap<NodeId, usize> = HashMap::new();
        for (id, node) in self.iter() {
            let level = node
                .parent()
                .and_then(|parent| levels.get(&parent))
                .map_or(0, |level| level + 1);
            levels.insert(id, level);
        }

        // Post-order builds children before their parent.
        let mut built: HashMap<NodeId, TermTree<String>> = HashMap::new();
        for (id, node) in self.iter_postorder() {
            let level = levels.get(&id).copied().unwrap_or(0);
            if level > MAX_RENDER_DEPTH {
                continue;
            }
            let label = TermTree::new(node.data.to_string());
            let rendered = if level == MAX_RENDER_DEPTH && !node.is_leaf() {
                label.with_leaves([TermTree::new("...".to_string())])
            } else {
                label.with_leaves(
                    node.children()
                        .iter()
                        .filter_map(|child| built.remove(child)),
                )
            };
            built.insert(id, rendered);
        }

        built
            .remove(&self.root())
            .unwrap_or_else(|| TermTree::new(String::new()))
    }
}
