//! Edge attachment sides.
//!
//! None of the layouts reason about which side of a node an edge should leave from. Once
//! positions are final, each edge picks the pair of sides facing along the dominant axis between
//! its endpoints, which keeps edges short and mostly straight.

use crate::config::{Direction, NodeSize};
use canopy_graph::{Edge, Graph, GraphIndex, Point, Side};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Chosen `(sourceHandle, targetHandle)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    pub source: Side,
    pub target: Side,
}

impl Attachment {
    /// Used when either endpoint is missing from the node list.
    pub const FALLBACK: Attachment = Attachment {
        source: Side::Right,
        target: Side::Left,
    };

    pub const fn new(source: Side, target: Side) -> Self {
        Self { source, target }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bias {
    /// Follow the dominant axis between the two endpoints.
    #[default]
    Nearest,
    /// Prefer the sides facing along the layout direction (orthogonal mode).
    Axis(Direction),
}

/// Sides for an edge between two node centers.
pub fn choose(source: Point, target: Point) -> Attachment {
    let dx = target.x - source.x;
    let dy = target.y - source.y;
    if dx.abs() > dy.abs() {
        horizontal(dx)
    } else {
        vertical(dy)
    }
}

pub fn choose_biased(source: Point, target: Point, bias: Bias) -> Attachment {
    let dx = target.x - source.x;
    let dy = target.y - source.y;
    match bias {
        Bias::Nearest => choose(source, target),
        Bias::Axis(Direction::Horizontal) if dx != 0.0 => horizontal(dx),
        Bias::Axis(Direction::Vertical) if dy != 0.0 => vertical(dy),
        // Endpoints aligned across the layout axis: no right angle to prefer.
        Bias::Axis(_) => choose(source, target),
    }
}

fn horizontal(dx: f64) -> Attachment {
    if dx > 0.0 {
        Attachment::new(Side::Right, Side::Left)
    } else {
        Attachment::new(Side::Left, Side::Right)
    }
}

fn vertical(dy: f64) -> Attachment {
    if dy > 0.0 {
        Attachment::new(Side::Bottom, Side::Top)
    } else {
        Attachment::new(Side::Top, Side::Bottom)
    }
}

/// Returns the graph's edges with `sourceHandle`/`targetHandle` filled in from the current node
/// positions. Edges with a missing endpoint get [`Attachment::FALLBACK`].
pub fn optimize(graph: &Graph, default_size: NodeSize) -> Vec<Edge> {
    let index = GraphIndex::new(graph);
    let centers: Vec<Point> = index
        .nodes()
        .map(|n| {
            let s = NodeSize::of(n, default_size);
            n.position.offset(s.width / 2.0, s.height / 2.0)
        })
        .collect();
    graph
        .edges
        .iter()
        .zip(per_edge(&index, &centers, Bias::Nearest))
        .map(|(e, a)| Edge {
            source_handle: Some(a.source),
            target_handle: Some(a.target),
            ..e.clone()
        })
        .collect()
}

/// One attachment per entry of `graph.edges`, computed from node centers indexed like `index`.
fn per_edge(index: &GraphIndex<'_>, centers: &[Point], bias: Bias) -> Vec<Attachment> {
    let mut dangling = 0usize;
    let out: Vec<Attachment> = index
        .graph()
        .edges
        .iter()
        .map(|e| match (
            index.index_of(e.source.as_str()),
            index.index_of(e.target.as_str()),
        ) {
            (Some(s), Some(t)) => choose_biased(centers[s], centers[t], bias),
            _ => {
                dangling += 1;
                Attachment::FALLBACK
            }
        })
        .collect();
    if dangling > 0 {
        tracing::debug!(dangling, "edges with missing endpoints use the fallback attachment");
    }
    out
}

/// Attachment per edge id. When several edges share an id the first one wins.
pub(crate) fn attachments(
    index: &GraphIndex<'_>,
    centers: &[Point],
    bias: Bias,
) -> IndexMap<String, Attachment> {
    let edges = &index.graph().edges;
    let mut out: IndexMap<String, Attachment> = IndexMap::with_capacity(edges.len());
    for (e, a) in edges.iter().zip(per_edge(index, centers, bias)) {
        if out.contains_key(e.id.as_str()) {
            tracing::warn!(edge = %e.id, "duplicate edge id, keeping the first edge's attachment");
            continue;
        }
        out.insert(e.id.clone(), a);
    }
    out
}
