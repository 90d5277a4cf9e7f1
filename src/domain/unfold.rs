//! Stack-based tree construction shared by the structural transforms.
//!
//! Every transform in this crate is an unfold: a seed expands into a node
//! header (id and value) plus the seeds of its children. Driving that with
//! an explicit stack instead of recursion keeps tree depth bounded by heap
//! memory rather than by the call stack.

use crate::domain::node::Node;

/// Result of expanding one seed.
pub(crate) enum Step<J, U, C> {
    /// The seed already is a finished subtree; it is attached unchanged.
    Done(Node<J, U>),
    /// A new node whose children are produced by expanding `children` in order.
    Branch { id: J, value: U, children: C },
}

struct Frame<J, U, C> {
    id: J,
    value: U,
    pending: C,
    built: Vec<Node<J, U>>,
}

impl<J, U, C> Frame<J, U, C>
where
    C: Iterator,
{
    fn new(id: J, value: U, pending: C) -> Self {
        let built = Vec::with_capacity(pending.size_hint().0);
        Self {
            id,
            value,
            pending,
            built,
        }
    }

    fn finish(self) -> Node<J, U> {
        Node::node(self.id, self.value, self.built)
    }
}

/// Builds a tree from `seed`, expanding seeds depth-first, left to right.
///
/// `expand` is called exactly once per seed, in pre-order: a parent before
/// any of its children, each child subtree completely before its next
/// sibling.
pub(crate) fn unfold<S, J, U, C, F>(seed: S, mut expand: F) -> Node<J, U>
where
    C: Iterator<Item = S>,
    F: FnMut(S) -> Step<J, U, C>,
{
    let mut stack: Vec<Frame<J, U, C>> = Vec::new();
    let mut next = Some(seed);

    loop {
        let completed = if let Some(seed) = next.take() {
            match expand(seed) {
                Step::Done(node) => node,
                Step::Branch {
                    id,
                    value,
                    children,
                } => {
                    stack.push(Frame::new(id, value, children));
                    continue;
                }
            }
        } else if let Some(mut top) = stack.pop() {
            if let Some(child) = top.pending.next() {
                stack.push(top);
                next = Some(child);
                continue;
            }
            top.finish()
        } else {
            unreachable!("unfold stack drained before the root was completed");
        };

        match stack.last_mut() {
            Some(parent) => parent.built.push(completed),
            None => return completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_counter_seed_when_unfolded_then_builds_chain() {
        let chain = unfold(3u32, |n| Step::Branch {
            id: n,
            value: n * 10,
            children: (n > 0).then(|| n - 1).into_iter(),
        });
        assert_eq!(chain.depth(), 4);
        assert_eq!(chain.id(), &3);
        assert_eq!(chain.children()[0].value(), &20);
    }

    #[test]
    fn given_done_seed_then_subtree_is_attached_unchanged() {
        let ready = Node::node("x", 1, vec![Node::singleton("y", 2)]);
        let tree = unfold(None, |seed: Option<Node<&'static str, i32>>| match seed {
            Some(node) => Step::Done(node),
            None => Step::Branch {
                id: "root",
                value: 0,
                children: vec![Some(ready.clone())].into_iter(),
            },
        });
        assert_eq!(tree.children(), &[ready]);
    }

    #[test]
    fn given_expansion_then_seeds_are_visited_in_preorder() {
        let mut visited = Vec::new();
        unfold(1u32, |n| {
            visited.push(n);
            Step::Branch {
                id: n,
                value: (),
                children: match n {
                    1 => vec![2, 4],
                    2 => vec![3],
                    _ => vec![],
                }
                .into_iter(),
            }
        });
        assert_eq!(visited, vec![1, 2, 3, 4]);
    }

    #[test]
    fn given_very_deep_chain_then_unfold_does_not_overflow() {
        let deep = unfold(200_000u32, |n| Step::Branch {
            id: n,
            value: (),
            children: (n > 0).then(|| n - 1).into_iter(),
        });
        assert_eq!(deep.depth(), 200_001);
        assert_eq!(deep.size(), 200_001);
    }
}
