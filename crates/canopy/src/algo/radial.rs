//! Radial tree layout: rank becomes radius, pre-order position becomes angle.
//!
//! Every node owns an angular span. The root owns the whole circle and each parent splits its
//! span between its children in proportion to their leaf counts, so wide subtrees get wide
//! wedges. A node is drawn in the middle of its own span.

use super::LayoutContext;
use crate::config::Anchor;
use canopy_graph::{Point, Tree};
use std::f64::consts::TAU;

/// Angular interval in radians, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularSpan {
    pub start: f64,
    pub end: f64,
}

impl AngularSpan {
    pub const FULL: AngularSpan = AngularSpan {
        start: 0.0,
        end: TAU,
    };

    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(self) -> f64 {
        self.end - self.start
    }

    pub fn mid(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn is_full(self) -> bool {
        self.width() >= TAU - 1e-9
    }
}

/// Point at `radius` from `center` in direction `angle` (screen coordinates, y down).
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    center.offset(radius * angle.cos(), radius * angle.sin())
}

pub fn layout(ctx: &LayoutContext<'_>) -> Vec<Point> {
    let mut positions = ctx.prior_positions();
    let Some(root) = ctx.index.find_root_index() else {
        tracing::debug!("radial: no root candidate, keeping prior positions");
        return positions;
    };
    let tree = Tree::build(ctx.index, root);
    let spans = angular_spans(&tree, ctx.index.len());
    let center = ctx
        .config
        .anchor
        .unwrap_or(Anchor::ViewportCenter)
        .resolve(ctx.viewport);
    let ring = ctx.spacing.rank;

    for &v in tree.pre_order() {
        let radius = tree.rank(v).unwrap_or(0) as f64 * ring;
        let c = if radius == 0.0 {
            center
        } else {
            polar(center, radius, spans[v].mid())
        };
        positions[v] = ctx.position_for_center(v, c);
    }

    tracing::debug!(
        placed = tree.len(),
        rings = tree.max_rank(),
        orphans = ctx.index.len() - tree.len(),
        "radial layout"
    );
    positions
}

/// Span of every tree node; nodes outside the tree get an empty span at angle 0.
pub(crate) fn angular_spans(tree: &Tree, node_count: usize) -> Vec<AngularSpan> {
    let mut spans = vec![AngularSpan::new(0.0, 0.0); node_count];
    if tree.is_empty() {
        return spans;
    }
    spans[tree.root()] = AngularSpan::FULL;
    for &v in tree.pre_order() {
        let kids = tree.children(v);
        if kids.is_empty() {
            continue;
        }
        let parent = spans[v];
        let total = tree.leaf_count(v).max(1) as f64;
        let mut cursor = parent.start;
        for &c in kids {
            let w = parent.width() * tree.leaf_count(c) as f64 / total;
            spans[c] = AngularSpan::new(cursor, cursor + w);
            cursor += w;
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::{angular_spans, layout};
    use crate::algo::LayoutContext;
    use crate::config::{LayoutConfig, LayoutKind, NodeSize, Viewport};
    use canopy_graph::{Graph, GraphIndex, Node, Tree};

    fn lopsided() -> Graph {
        // `wide` has two leaves, `narrow` has one.
        Graph::new()
            .with_node(Node::new("root"))
            .with_node(Node::new("wide"))
            .with_node(Node::new("narrow"))
            .with_node(Node::new("w1"))
            .with_node(Node::new("w2"))
            .with_edge("root", "wide")
            .with_edge("root", "narrow")
            .with_edge("wide", "w1")
            .with_edge("wide", "w2")
    }

    #[test]
    fn spans_are_proportional_to_leaf_counts() {
        let g = lopsided();
        let idx = GraphIndex::new(&g);
        let tree = Tree::build(&idx, 0);
        let spans = angular_spans(&tree, idx.len());
        let wide = spans[idx.index_of("wide").unwrap()].width();
        let narrow = spans[idx.index_of("narrow").unwrap()].width();
        assert!((wide / narrow - 2.0).abs() < 1e-9, "ratio {}", wide / narrow);
        assert!((wide + narrow - std::f64::consts::TAU).abs() < 1e-9);

        let w1 = spans[idx.index_of("w1").unwrap()];
        let w2 = spans[idx.index_of("w2").unwrap()];
        assert!((w1.width() - w2.width()).abs() < 1e-9);
        assert!((w2.start - w1.end).abs() < 1e-9);
    }

    #[test]
    fn rank_maps_to_radius_around_the_viewport_center() {
        let g = lopsided();
        let idx = GraphIndex::new(&g);
        let cfg = LayoutConfig::new(LayoutKind::Radial).with_rank_spacing(150.0);
        let viewport = Viewport::new(1000.0, 800.0);
        let size = NodeSize::new(40.0, 40.0);
        let ctx = LayoutContext::new(&idx, &cfg, viewport, size);
        let pos = layout(&ctx);

        let center = viewport.center();
        let radius = |i: usize| ctx.center_of(i, pos[i]).distance(center);
        assert!(radius(0) < 1e-9);
        assert!((radius(idx.index_of("narrow").unwrap()) - 150.0).abs() < 1e-9);
        assert!((radius(idx.index_of("w2").unwrap()) - 300.0).abs() < 1e-9);
    }
}
