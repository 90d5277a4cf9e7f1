/*
Rendering of rose trees as text via termtree, e.g. for logging a menu:

home: Home
├── docs: Docs
│   └── api: API
└── about: About
 */
use std::fmt::Display;

use termtree::Tree;
use tracing::{debug, instrument};

use crate::config::RenderSettings;
use crate::domain::Node;

pub trait TreeRender {
    /// Renders with the default [`RenderSettings`].
    fn to_tree_string(&self) -> Tree<String> {
        self.render_with(&RenderSettings::default())
    }

    fn render_with(&self, settings: &RenderSettings) -> Tree<String>;
}

/// Marker leaf standing in for the children below the render depth.
pub const ELIDED: &str = "...";

struct Frame<'a, I, T> {
    label: String,
    pending: std::slice::Iter<'a, Node<I, T>>,
    built: Vec<Tree<String>>,
}

impl<'a, I: Display, T: Display> Frame<'a, I, T> {
    /// Frame for `node` at `level` (root = 1); on the last rendered level
    /// its children collapse into one [`ELIDED`] leaf.
    fn open(
        node: &'a Node<I, T>,
        level: usize,
        max_depth: usize,
        settings: &RenderSettings,
        elided: &mut usize,
    ) -> Self {
        let children = node.children();
        let (pending, built) = if level < max_depth || children.is_empty() {
            (children.iter(), Vec::new())
        } else {
            *elided += 1;
            (children[..0].iter(), vec![Tree::new(ELIDED.to_string())])
        };
        Self {
            label: label(node, settings),
            pending,
            built,
        }
    }
}

impl<I, T> TreeRender for Node<I, T>
where
    I: Display,
    T: Display,
{
    /// Builds the termtree with an explicit stack.
    ///
    /// At most `settings.max_depth` levels are rendered (the root always is);
    /// a node on the last rendered level that still has children gets a
    /// single [`ELIDED`] leaf instead.
    #[instrument(level = "trace", skip_all)]
    fn render_with(&self, settings: &RenderSettings) -> Tree<String> {
        let max_depth = settings.max_depth.max(1);
        let mut elided = 0usize;
        let mut stack = vec![Frame::open(self, 1, max_depth, settings, &mut elided)];

        while let Some(mut top) = stack.pop() {
            if let Some(child) = top.pending.next() {
                let level = stack.len() + 2;
                stack.push(top);
                stack.push(Frame::open(child, level, max_depth, settings, &mut elided));
                continue;
            }

            let tree = Tree::new(top.label).with_leaves(top.built);
            match stack.last_mut() {
                Some(parent) => parent.built.push(tree),
                None => {
                    if elided > 0 {
                        debug!(elided, max_depth, "render cut subtrees below max depth");
                    }
                    return tree;
                }
            }
        }

        unreachable!("render stack drained before the root was completed")
    }
}

fn label<I: Display, T: Display>(node: &Node<I, T>, settings: &RenderSettings) -> String {
    if settings.show_ids {
        format!("{}{}{}", node.id(), settings.id_separator, node.value())
    } else {
        node.value().to_string()
    }
}
