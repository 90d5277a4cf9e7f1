//! Domain layer: the rose tree and its algebra
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod error;
mod insert;
pub mod node;
mod transform;
pub mod traverse;
mod unfold;

pub use error::{TreeError, TreeResult};
pub use node::Node;
pub use traverse::{IntoValues, PostOrderIter, PreOrderIter};
