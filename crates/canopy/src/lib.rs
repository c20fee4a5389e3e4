#![forbid(unsafe_code)]

//! Headless layout engine for mind-map style node-link diagrams.
//!
//! `canopy` computes node positions and edge attachment sides for a caller-owned graph snapshot.
//! It keeps no state between calls: the editor passes a [`Graph`], a [`LayoutConfig`] and a
//! [`Viewport`], and applies the returned [`LayoutResult`] to its own render state.
//!
//! - full relayouts go through [`Engine::layout`] (or [`LayoutSession`] when requests can pile up)
//! - streaming generation appends children with [`Engine::place_child`] /
//!   [`incremental::place_child`] without disturbing settled nodes
//! - animated force layouts drive [`ForceSimulation`] tick by tick

pub mod algo;
pub mod attach;
pub mod config;
mod engine;
pub mod error;
pub mod incremental;
mod result;
pub mod session;

pub use canopy_graph as graph;
pub use canopy_graph::{Edge, Graph, Node, Point, Side};

pub use algo::force::{ForceFrame, ForceOptions, ForceSimulation, TickReport};
pub use algo::radial::AngularSpan;
pub use attach::{Attachment, Bias};
pub use config::{Anchor, Direction, LayoutConfig, LayoutKind, NodeSize, Spacing, Viewport};
pub use engine::Engine;
pub use error::{Error, Result};
pub use result::{Bounds, LayoutResult};
pub use session::LayoutSession;

/// Lays out `graph` with the default [`Engine`].
pub async fn layout(
    graph: &Graph,
    config: &LayoutConfig,
    viewport: Viewport,
) -> Result<LayoutResult> {
    Engine::default().layout(graph, config, viewport).await
}

/// Synchronous variant of [`layout`].
pub fn layout_sync(
    graph: &Graph,
    config: &LayoutConfig,
    viewport: Viewport,
) -> Result<LayoutResult> {
    Engine::default().layout_sync(graph, config, viewport)
}
