//! The identity-aware rose tree node: constructors and accessors.
//!
//! `Clone`, `PartialEq`, `Hash`, `Debug` and dropping are written by hand
//! with explicit stacks, so none of them recurse once per tree level.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use crate::domain::unfold::{unfold, Step};

/// A rose tree node: an identifier, a value and an ordered list of children.
///
/// The identifier is independent of the value so that callers can address
/// nodes by id across transformations. Identifiers are not required to be
/// unique within a tree.
///
/// Child order is insertion order and is significant: it drives
/// [`Node::reduce`], [`Node::map2`] pairing and display order.
pub struct Node<I, T> {
    pub(crate) id: I,
    pub(crate) value: T,
    children: Children<I, T>,
}

/// Owned child list; dropping it dismantles the subtree level by level.
struct Children<I, T>(Vec<Node<I, T>>);

impl<I, T> Drop for Children<I, T> {
    fn drop(&mut self) {
        let mut stack = mem::take(&mut self.0);
        while let Some(mut node) = stack.pop() {
            // node is dropped with an empty child list
            stack.append(&mut node.children.0);
        }
    }
}

impl<I, T> Node<I, T> {
    /// Leaf node without children.
    pub fn singleton(id: I, value: T) -> Self {
        Self::node(id, value, Vec::new())
    }

    /// Node with pre-built children, taken as-is.
    ///
    /// Duplicate ids among the children are neither checked nor reordered.
    pub fn node(id: I, value: T, children: Vec<Node<I, T>>) -> Self {
        Self {
            id,
            value,
            children: Children(children),
        }
    }

    /// Prepends a new leaf `singleton(child_id, child_value)`.
    ///
    /// The most recently added child is always at index 0.
    pub fn add_child(mut self, child_id: I, child_value: T) -> Self {
        self.children
            .0
            .insert(0, Node::singleton(child_id, child_value));
        self
    }

    pub fn id(&self) -> &I {
        &self.id
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Alias of [`Node::value`]: the value held at the root of this tree.
    pub fn root(&self) -> &T {
        &self.value
    }

    pub fn children(&self) -> &[Node<I, T>] {
        &self.children.0
    }

    pub fn has_children(&self) -> bool {
        !self.children.0.is_empty()
    }

    /// Borrows id, value and children at once.
    pub fn decompose(&self) -> (&I, &T, &[Node<I, T>]) {
        (&self.id, &self.value, &self.children.0)
    }

    /// Consumes the node into its id, value and children.
    pub fn into_parts(mut self) -> (I, T, Vec<Node<I, T>>) {
        let children = mem::take(&mut self.children.0);
        (self.id, self.value, children)
    }
}

impl<I, T> From<(I, T)> for Node<I, T> {
    fn from((id, value): (I, T)) -> Self {
        Node::singleton(id, value)
    }
}

impl<I: Clone, T: Clone> Clone for Node<I, T> {
    fn clone(&self) -> Self {
        unfold(self, |node| Step::Branch {
            id: node.id.clone(),
            value: node.value.clone(),
            children: node.children().iter(),
        })
    }
}

impl<I: PartialEq, T: PartialEq> PartialEq for Node<I, T> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];

        while let Some((left, right)) = stack.pop() {
            if left.id != right.id
                || left.value != right.value
                || left.children.0.len() != right.children.0.len()
            {
                return false;
            }
            stack.extend(left.children().iter().zip(right.children()));
        }

        true
    }
}

impl<I: Eq, T: Eq> Eq for Node<I, T> {}

impl<I: Hash, T: Hash> Hash for Node<I, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // child counts in pre-order pin down the shape
        for node in self.iter() {
            node.id.hash(state);
            node.value.hash(state);
            node.children.0.len().hash(state);
        }
    }
}

enum DebugEvent<'a, I, T> {
    Open { node: &'a Node<I, T>, first: bool },
    Close,
}

/// Same text as a derived `Debug` in its compact form; `{:#?}` is not
/// pretty-printed.
impl<I: fmt::Debug, T: fmt::Debug> fmt::Debug for Node<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![DebugEvent::Open {
            node: self,
            first: true,
        }];

        while let Some(event) = stack.pop() {
            match event {
                DebugEvent::Open { node, first } => {
                    if !first {
                        f.write_str(", ")?;
                    }
                    write!(
                        f,
                        "Node {{ id: {:?}, value: {:?}, children: [",
                        node.id, node.value
                    )?;
                    stack.push(DebugEvent::Close);
                    for (index, child) in node.children().iter().enumerate().rev() {
                        stack.push(DebugEvent::Open {
                            node: child,
                            first: index == 0,
                        });
                    }
                }
                DebugEvent::Close => f.write_str("] }")?,
            }
        }

        Ok(())
    }
}

impl<I, T> fmt::Display for Node<I, T>
where
    I: fmt::Display,
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::render::TreeRender;
        write!(f, "{}", self.to_tree_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node<&'static str, i32> {
        Node::node(
            "1",
            1,
            vec![
                Node::node("2", 2, vec![]),
                Node::node("3", 3, vec![Node::node("4", 4, vec![])]),
            ],
        )
    }

    #[test]
    fn given_singleton_when_queried_then_has_value_and_no_children() {
        let leaf = Node::singleton("a", 42);
        assert_eq!(leaf.id(), &"a");
        assert_eq!(leaf.value(), &42);
        assert_eq!(leaf.root(), &42);
        assert!(leaf.children().is_empty());
        assert!(!leaf.has_children());
    }

    #[test]
    fn given_node_when_built_then_children_are_kept_in_order() {
        let tree = sample();
        let ids: Vec<_> = tree.children().iter().map(|c| *c.id()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert!(tree.has_children());
    }

    #[test]
    fn given_parent_when_add_child_then_new_child_is_first() {
        let tree = sample().add_child("5", 5);
        assert_eq!(tree.children().len(), 3);
        assert_eq!(tree.children()[0], Node::singleton("5", 5));
        assert_eq!(tree.children()[1].id(), &"2");
    }

    #[test]
    fn given_repeated_add_child_then_latest_comes_first() {
        let tree = Node::singleton("root", 0).add_child("a", 1).add_child("b", 2);
        let ids: Vec<_> = tree.children().iter().map(|c| *c.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn given_node_when_decomposed_then_all_fields_are_exposed() {
        let tree = sample();
        let (id, value, children) = tree.decompose();
        assert_eq!((*id, *value, children.len()), ("1", 1, 2));

        let (id, value, children) = tree.into_parts();
        assert_eq!((id, value, children.len()), ("1", 1, 2));
    }

    #[test]
    fn given_tuple_when_converted_then_builds_singleton() {
        let leaf: Node<u32, &str> = (7, "seven").into();
        assert_eq!(leaf, Node::singleton(7, "seven"));
    }
}
