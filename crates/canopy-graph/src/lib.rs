#![forbid(unsafe_code)]

//! Graph snapshot model used by `canopy`.
//!
//! The editor owns the authoritative node/edge collections. Layout receives a [`Graph`] value,
//! builds a read-only [`GraphIndex`] over it for the duration of a single call and keeps nothing
//! once the call returns.

mod index;
mod model;
mod tree;

pub use index::GraphIndex;
pub use model::{Edge, Graph, Node, Point, Side};
pub use tree::Tree;
