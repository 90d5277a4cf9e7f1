//! Structural transforms: map, map2/zip, flatten and flat_map.
//!
//! All of them are driven by [`unfold`], so they run in constant call-stack
//! depth regardless of the shape of the input.

use tracing::{debug, instrument};

use crate::domain::node::Node;
use crate::domain::unfold::{unfold, Step};

impl<I, T> Node<I, T> {
    /// Same-shaped tree with every value transformed and every id re-derived.
    ///
    /// Both the new id and the new value are computed from the original
    /// value: `derive_id(&value)` and `transform(&value)`. Closures are called
    /// once per node in pre-order.
    #[instrument(level = "trace", skip_all)]
    pub fn map<J, U, D, F>(&self, mut derive_id: D, mut transform: F) -> Node<J, U>
    where
        D: FnMut(&T) -> J,
        F: FnMut(&T) -> U,
    {
        unfold(self, |node| Step::Branch {
            id: derive_id(&node.value),
            value: transform(&node.value),
            children: node.children().iter(),
        })
    }

    /// Same-shaped tree with every value transformed and ids kept.
    #[instrument(level = "trace", skip_all)]
    pub fn map_values<U, F>(&self, mut transform: F) -> Node<I, U>
    where
        I: Clone,
        F: FnMut(&T) -> U,
    {
        unfold(self, |node| Step::Branch {
            id: node.id.clone(),
            value: transform(&node.value),
            children: node.children().iter(),
        })
    }

    /// Combines two trees position by position.
    ///
    /// Children are paired by index, not by id. When the two trees have a
    /// different number of children at some node, the result keeps only the
    /// pairs that exist: trailing children of the longer side are dropped.
    #[instrument(level = "trace", skip_all)]
    pub fn map2<J, B, K, C, D, F>(
        &self,
        other: &Node<J, B>,
        mut derive_id: D,
        mut combine: F,
    ) -> Node<K, C>
    where
        D: FnMut(&T, &B) -> K,
        F: FnMut(&T, &B) -> C,
    {
        let mut truncated = 0usize;
        let zipped = unfold((self, other), |(left, right)| {
            truncated += left.children().len().abs_diff(right.children().len());
            Step::Branch {
                id: derive_id(&left.value, &right.value),
                value: combine(&left.value, &right.value),
                children: left.children().iter().zip(right.children().iter()),
            }
        });
        if truncated > 0 {
            debug!(truncated, "map2 dropped unmatched children");
        }
        zipped
    }

    /// [`Node::map2`] pairing up the values themselves.
    pub fn zip<J, B, K, D>(&self, other: &Node<J, B>, derive_id: D) -> Node<K, (T, B)>
    where
        T: Clone,
        B: Clone,
        D: FnMut(&T, &B) -> K,
    {
        self.map2(other, derive_id, |a, b| (a.clone(), b.clone()))
    }

    /// Maps every value to a subtree and splices the subtrees in.
    ///
    /// Each node keeps the id `derive_id(&value)`; its value becomes the root
    /// value of `produce(&value)`, and the produced root's children are placed
    /// before the node's own (transformed) children.
    #[instrument(level = "trace", skip_all)]
    pub fn flat_map<B, D, F>(&self, derive_id: D, produce: F) -> Node<I, B>
    where
        D: FnMut(&T) -> I,
        F: FnMut(&T) -> Node<I, B>,
    {
        self.map(derive_id, produce).flatten(keep_outer)
    }
}

fn keep_outer<I>(outer: I, _inner: I) -> I {
    outer
}

enum Nested<I, A> {
    Outer(Node<I, Node<I, A>>),
    Inner(Node<I, A>),
}

impl<I, A> Node<I, Node<I, A>> {
    /// Collapses a tree of trees.
    ///
    /// For every outer node the result has id `combine_ids(outer_id,
    /// inner_id)`, the inner root's value, and as children the inner root's
    /// own children followed by the flattened outer children.
    #[instrument(level = "trace", skip_all)]
    pub fn flatten<F>(self, mut combine_ids: F) -> Node<I, A>
    where
        F: FnMut(I, I) -> I,
    {
        unfold(Nested::Outer(self), |seed| match seed {
            Nested::Inner(node) => Step::Done(node),
            Nested::Outer(outer) => {
                let (outer_id, inner, outer_children) = outer.into_parts();
                let (inner_id, value, inner_children) = inner.into_parts();
                Step::Branch {
                    id: combine_ids(outer_id, inner_id),
                    value,
                    children: inner_children
                        .into_iter()
                        .map(Nested::Inner)
                        .chain(outer_children.into_iter().map(Nested::Outer)),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node<String, i32> {
        Node::node(
            "1".to_string(),
            1,
            vec![
                Node::singleton("2".to_string(), 2),
                Node::node("3".to_string(), 3, vec![Node::singleton("4".to_string(), 4)]),
            ],
        )
    }

    fn shape<I, T>(node: &Node<I, T>) -> Vec<usize> {
        node.iter().map(|n| n.children().len()).collect()
    }

    #[test]
    fn given_tree_when_mapped_then_shape_is_kept_and_ids_come_from_old_values() {
        let tree = sample();
        let mapped = tree.map(|v| format!("id-{}", v), |v| v * 10);
        assert_eq!(shape(&mapped), shape(&tree));
        assert_eq!(mapped.id(), "id-1");
        assert_eq!(mapped.value(), &10);
        // id derived from 4, not from 40
        assert_eq!(mapped.children()[1].children()[0].id(), "id-4");
    }

    #[test]
    fn given_id_preserving_derive_and_identity_then_map_is_value_equal() {
        let tree = sample();
        let same = tree.map(|v| v.to_string(), |v| *v);
        assert_eq!(same, tree);
    }

    #[test]
    fn given_map_values_then_ids_are_kept() {
        let tree = sample();
        let labels = tree.map_values(|v| format!("item {}", v));
        let ids: Vec<_> = labels.iter().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(labels.children()[0].value(), "item 2");
    }

    #[test]
    fn given_uneven_children_when_map2_then_truncates_to_shorter() {
        let left = Node::node("a", 1, vec![Node::singleton("a1", 10), Node::singleton("a2", 20)]);
        let right = Node::node("b", 2, vec![Node::singleton("b1", 100)]);
        let combined = left.map2(&right, |a, b| a + b, |a, b| a * b);
        assert_eq!(combined.id(), &3);
        assert_eq!(combined.value(), &2);
        assert_eq!(combined.children().len(), 1);
        assert_eq!(combined.children()[0].value(), &1000);
    }

    #[test]
    fn given_two_trees_when_zipped_then_values_are_paired() {
        let left = sample();
        let right = sample().map_values(|v| v.to_string());
        let zipped = left.zip(&right, |a, _| *a);
        assert_eq!(zipped.value(), &(1, "1".to_string()));
        assert_eq!(zipped.children()[1].children()[0].value(), &(4, "4".to_string()));
        assert_eq!(zipped.size(), 4);
    }

    #[test]
    fn given_nested_tree_when_flattened_then_inner_children_come_first() {
        let inner_root = Node::node("in", "inner", vec![Node::singleton("ic", "inner-child")]);
        let outer_child = Node::singleton("oc", Node::singleton("oci", "outer-child"));
        let nested = Node::node("out", inner_root, vec![outer_child]);

        let flat = nested.flatten(|outer, inner| if inner == "oci" { inner } else { outer });
        assert_eq!(flat.id(), &"out");
        assert_eq!(flat.value(), &"inner");
        let children: Vec<_> = flat.children().iter().map(|c| (*c.id(), *c.value())).collect();
        assert_eq!(children, vec![("ic", "inner-child"), ("oci", "outer-child")]);
    }

    #[test]
    fn given_flat_map_then_outer_ids_survive_and_produced_children_are_spliced_first() {
        let tree = Node::node(1u32, 1, vec![Node::singleton(2u32, 2)]);
        let expanded = tree.flat_map(
            |v| *v as u32,
            |v| Node::node(999u32, v * 10, vec![Node::singleton(500 + *v as u32, -v)]),
        );

        assert_eq!(expanded.id(), &1);
        assert_eq!(expanded.value(), &10);
        let ids: Vec<_> = expanded.children().iter().map(|c| *c.id()).collect();
        assert_eq!(ids, vec![501, 2]);
        assert_eq!(expanded.children()[1].value(), &20);
        assert_eq!(expanded.children()[1].children()[0].id(), &502);
    }
}
