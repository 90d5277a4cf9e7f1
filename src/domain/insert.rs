//! Identity-directed insertion.

use tracing::{debug, instrument};

use crate::domain::node::Node;
use crate::domain::unfold::{unfold, Step};

enum Search<I, T> {
    Visit(Node<I, T>),
    Fresh(I, T),
}

impl<I, T> Node<I, T>
where
    I: PartialEq + Clone,
    T: Clone,
{
    /// Adds the leaf `(new_id, value)` as first child of every node whose id
    /// equals `target_id`.
    ///
    /// Every match receives its own copy: duplicate ids anywhere in the tree,
    /// including a match nested below another match, each get one new child.
    /// The inserted leaves are not searched themselves. Without any match the
    /// tree comes back unchanged.
    #[instrument(level = "trace", skip_all)]
    pub fn push_deep(self, target_id: &I, new_id: I, value: T) -> Self {
        let mut matches = 0usize;
        let tree = unfold(Search::Visit(self), |seed| match seed {
            Search::Fresh(leaf_id, leaf_value) => {
                Step::Done(Node::singleton(leaf_id, leaf_value))
            }
            Search::Visit(node) => {
                let (id, node_value, children) = node.into_parts();
                let inserted = if id == *target_id {
                    matches += 1;
                    Some(Search::Fresh(new_id.clone(), value.clone()))
                } else {
                    None
                };
                Step::Branch {
                    id,
                    value: node_value,
                    children: inserted
                        .into_iter()
                        .chain(children.into_iter().map(Search::Visit)),
                }
            }
        });
        debug!(matches, "push_deep inserted children");
        tree
    }
}
