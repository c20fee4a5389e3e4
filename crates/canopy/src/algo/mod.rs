//! Layout algorithms.
//!
//! Every algorithm shares one signature: it reads a [`LayoutContext`] and returns one position
//! per indexed node. Nodes an algorithm does not place keep the position they came in with.

pub mod circular;
pub mod force;
pub mod layered;
pub mod radial;

use crate::config::{LayoutConfig, NodeSize, Spacing, Viewport};
use canopy_graph::{GraphIndex, Point};

/// Read-only inputs of one layout call.
#[derive(Debug)]
pub struct LayoutContext<'a> {
    pub index: &'a GraphIndex<'a>,
    pub config: &'a LayoutConfig,
    pub viewport: Viewport,
    pub spacing: Spacing,
    sizes: Vec<NodeSize>,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        index: &'a GraphIndex<'a>,
        config: &'a LayoutConfig,
        viewport: Viewport,
        default_size: NodeSize,
    ) -> Self {
        let sizes = index
            .nodes()
            .map(|n| NodeSize::of(n, default_size))
            .collect();
        Self {
            index,
            config,
            viewport,
            spacing: config.spacing(),
            sizes,
        }
    }

    pub fn size(&self, idx: usize) -> NodeSize {
        self.sizes[idx]
    }

    pub fn sizes(&self) -> &[NodeSize] {
        &self.sizes
    }

    /// Positions as they were before this call.
    pub fn prior_positions(&self) -> Vec<Point> {
        self.index.nodes().map(|n| n.position).collect()
    }

    pub fn center_of(&self, idx: usize, position: Point) -> Point {
        let s = self.sizes[idx];
        position.offset(s.width / 2.0, s.height / 2.0)
    }

    pub fn position_for_center(&self, idx: usize, center: Point) -> Point {
        let s = self.sizes[idx];
        center.offset(-s.width / 2.0, -s.height / 2.0)
    }
}
