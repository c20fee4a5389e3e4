use crate::attach::Attachment;
use crate::config::NodeSize;
use canopy_graph::{Graph, Point};
use indexmap::IndexMap;
use serde::Serialize;

/// Output of one layout call: node id -> new position, edge id -> chosen sides.
///
/// Both maps follow the input order. A result is applied all at once via [`LayoutResult::apply`]
/// or not at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutResult {
    pub positions: IndexMap<String, Point>,
    pub attachments: IndexMap<String, Attachment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.attachments.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn attachment(&self, edge_id: &str) -> Option<Attachment> {
        self.attachments.get(edge_id).copied()
    }

    /// Writes positions and edge handles into `graph`. Ids the result does not know are left as
    /// they are. Edges sharing an id all receive the first such edge's sides; use
    /// [`crate::attach::optimize`] when ids are not unique.
    pub fn apply(&self, graph: &mut Graph) {
        for n in &mut graph.nodes {
            if let Some(p) = self.positions.get(n.id.as_str()) {
                n.position = *p;
            }
        }
        for e in &mut graph.edges {
            if let Some(a) = self.attachments.get(e.id.as_str()) {
                e.source_handle = Some(a.source);
                e.target_handle = Some(a.target);
            }
        }
    }

    /// Consumes `graph` and returns it with this result applied.
    pub fn applied_to(&self, mut graph: Graph) -> Graph {
        self.apply(&mut graph);
        graph
    }

    /// Box around every placed node footprint, for fit-to-view.
    pub fn bounds(&self, graph: &Graph, default_size: NodeSize) -> Option<Bounds> {
        let mut out: Option<Bounds> = None;
        for n in &graph.nodes {
            let Some(p) = self.positions.get(n.id.as_str()) else {
                continue;
            };
            let s = NodeSize::of(n, default_size);
            let b = out.get_or_insert(Bounds {
                min_x: p.x,
                min_y: p.y,
                max_x: p.x + s.width,
                max_y: p.y + s.height,
            });
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x + s.width);
            b.max_y = b.max_y.max(p.y + s.height);
        }
        out
    }
}
