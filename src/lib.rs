//! Identity-aware rose trees.
//!
//! A [`Node`] holds an identifier, a value and an ordered list of child
//! nodes. Identifiers are independent of values, so nodes can be addressed
//! and spliced by id across transformations, e.g. in multi-level menus:
//!
//! ```
//! use rosetree::Node;
//!
//! let menu = Node::node("home", "Home", vec![Node::singleton("docs", "Docs")])
//!     .push_deep(&"docs", "api", "API");
//!
//! assert_eq!(menu.find(&"docs").map(|n| n.children().len()), Some(1));
//! assert_eq!(menu.reduce(0, |label, n| n + label.len()), 11);
//! ```
//!
//! Every operation returns a new tree; nothing is mutated in place. The
//! algebra is total: the only error in this crate is the depth guard in
//! [`config::Settings::guard`] and settings loading.

pub mod config;
pub mod domain;
pub mod render;
pub mod util;

pub use config::{RenderSettings, Settings};
pub use domain::{Node, TreeError, TreeResult};
pub use render::TreeRender;
