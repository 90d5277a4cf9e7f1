//! Read-only traversals: iteration, folding, search and depth checks.

use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::node::Node;

impl<I, T> Node<I, T> {
    /// Pre-order iterator: a node before its children, children left to right.
    pub fn iter(&self) -> PreOrderIter<'_, I, T> {
        PreOrderIter { stack: vec![self] }
    }

    /// Post-order iterator: all children left to right before their parent.
    pub fn iter_postorder(&self) -> PostOrderIter<'_, I, T> {
        PostOrderIter {
            stack: vec![(self, false)],
        }
    }

    /// Values in pre-order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|node| &node.value)
    }

    /// Consumes the tree, yielding its values in pre-order.
    pub fn into_values(self) -> IntoValues<I, T> {
        IntoValues { stack: vec![self] }
    }

    /// Folds every value in the tree.
    ///
    /// The accumulator is updated with the node's own value first, then
    /// threaded through each child subtree in turn, each child folded
    /// completely before its next sibling: `combine(value, acc)` is applied
    /// once per node in pre-order.
    #[instrument(level = "trace", skip_all)]
    pub fn reduce<Acc, F>(&self, initial: Acc, mut combine: F) -> Acc
    where
        F: FnMut(&T, Acc) -> Acc,
    {
        self.iter()
            .fold(initial, |acc, node| combine(&node.value, acc))
    }

    /// Number of nodes, root included.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels; a singleton has depth 1.
    #[instrument(level = "trace", skip_all)]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in node.children() {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }

    /// Values of all leaves, left to right.
    pub fn leaves(&self) -> Vec<&T> {
        self.iter()
            .filter(|node| !node.has_children())
            .map(|node| &node.value)
            .collect()
    }

    /// Fails with [`TreeError::DepthLimitExceeded`] if the tree is deeper
    /// than `limit` levels, otherwise returns the depth.
    ///
    /// Stops descending as soon as the limit is crossed.
    #[instrument(level = "debug", skip(self))]
    pub fn check_depth(&self, limit: usize) -> TreeResult<usize> {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];

        while let Some((node, depth)) = stack.pop() {
            if depth > limit {
                debug!(depth, limit, "depth limit exceeded");
                return Err(TreeError::DepthLimitExceeded { depth, limit });
            }
            max_depth = max_depth.max(depth);
            for child in node.children() {
                stack.push((child, depth + 1));
            }
        }

        Ok(max_depth)
    }
}

impl<I: PartialEq, T> Node<I, T> {
    /// First node in pre-order whose id equals `id`.
    pub fn find(&self, id: &I) -> Option<&Node<I, T>> {
        self.iter().find(|node| node.id == *id)
    }

    /// Every node whose id equals `id`, in pre-order.
    pub fn find_all(&self, id: &I) -> Vec<&Node<I, T>> {
        self.iter().filter(|node| node.id == *id).collect()
    }
}

pub struct PreOrderIter<'a, I, T> {
    stack: Vec<&'a Node<I, T>>,
}

impl<'a, I, T> Iterator for PreOrderIter<'a, I, T> {
    type Item = &'a Node<I, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // reversed so the leftmost child is popped first
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

pub struct PostOrderIter<'a, I, T> {
    stack: Vec<(&'a Node<I, T>, bool)>,
}

impl<'a, I, T> Iterator for PostOrderIter<'a, I, T> {
    type Item = &'a Node<I, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, visited)) = self.stack.pop() {
            if visited {
                return Some(node);
            }
            self.stack.push((node, true));
            for child in node.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Owning pre-order iterator over values, see [`Node::into_values`].
///
/// Nodes are taken apart one at a time; the pending stack holds the unvisited
/// siblings of every open level.
pub struct IntoValues<I, T> {
    stack: Vec<Node<I, T>>,
}

impl<I, T> Iterator for IntoValues<I, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (_, value, children) = self.stack.pop()?.into_parts();
        self.stack.extend(children.into_iter().rev());
        Some(value)
    }
}

impl<I, T> IntoIterator for Node<I, T> {
    type Item = T;
    type IntoIter = IntoValues<I, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_values()
    }
}

impl<'a, I, T> IntoIterator for &'a Node<I, T> {
    type Item = &'a Node<I, T>;
    type IntoIter = PreOrderIter<'a, I, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
