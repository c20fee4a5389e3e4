use crate::algo::force::ForceOptions;
use crate::algo::layered::{self, ORTHOGONAL_CLEARANCE};
use crate::algo::{LayoutContext, circular, force, radial};
use crate::attach::{self, Bias};
use crate::config::{Anchor, Direction, LayoutConfig, LayoutKind, NodeSize, Viewport};
use crate::error::Result;
use crate::incremental::{self, Mode, Request};
use crate::result::LayoutResult;
use canopy_graph::{Graph, GraphIndex, Point};

/// Layout dispatcher.
///
/// Holds only immutable defaults; every call is a pure function of its arguments, so one engine
/// can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    node_size: NodeSize,
    force: ForceOptions,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Footprint used for nodes that do not carry their own `width`/`height`.
    pub fn with_node_size(mut self, size: NodeSize) -> Self {
        self.node_size = size;
        self
    }

    /// Simulation constants used when a config does not bring its own `force` block.
    pub fn with_force_options(mut self, opts: ForceOptions) -> Self {
        self.force = opts;
        self
    }

    pub fn node_size(&self) -> NodeSize {
        self.node_size
    }

    pub fn force_options(&self) -> &ForceOptions {
        &self.force
    }

    /// Synchronous variant of [`Engine::layout`].
    pub fn layout_sync(
        &self,
        graph: &Graph,
        config: &LayoutConfig,
        viewport: Viewport,
    ) -> Result<LayoutResult> {
        let viewport = viewport.sanitized();
        if graph.nodes.is_empty() {
            // Nothing to place, but edges still get their fallback sides.
            let index = GraphIndex::new(graph);
            return Ok(LayoutResult {
                positions: Default::default(),
                attachments: attach::attachments(&index, &[], Bias::Nearest),
            });
        }

        let span = tracing::debug_span!(
            "layout",
            kind = config.kind.as_str(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len()
        );
        let _enter = span.enter();

        let index = GraphIndex::new(graph);
        let dangling = index.dangling_edges().len();
        if dangling > 0 {
            tracing::warn!(dangling, "edges with missing endpoints are ignored for traversal");
        }
        if matches!(
            config.kind,
            LayoutKind::Layered | LayoutKind::Orthogonal | LayoutKind::Radial
        ) {
            let roots = index.roots();
            if roots.len() > 1 {
                tracing::debug!(
                    candidates = roots.len(),
                    root = roots[0],
                    "several root candidates, laying out the first"
                );
            }
        }

        let ctx = LayoutContext::new(&index, config, viewport, self.node_size);
        let positions = match config.kind {
            LayoutKind::Layered => layered::layout(&ctx, layered::Variant::Layered),
            LayoutKind::Orthogonal => layered::layout(&ctx, layered::Variant::Orthogonal),
            LayoutKind::Radial => radial::layout(&ctx),
            LayoutKind::Circular => circular::layout(&ctx),
            LayoutKind::Force => force::layout(&ctx, &self.force),
        };

        let centers: Vec<Point> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| ctx.center_of(i, *p))
            .collect();
        let bias = match config.kind {
            LayoutKind::Orthogonal => Bias::Axis(config.direction),
            _ => Bias::Nearest,
        };
        let attachments = attach::attachments(&index, &centers, bias);

        let positions = index
            .nodes()
            .zip(positions)
            .map(|(n, p)| (n.id.clone(), p))
            .collect();
        Ok(LayoutResult {
            positions,
            attachments,
        })
    }

    /// Lays out `graph` and picks attachment sides for every edge.
    ///
    /// Every algorithm currently finishes synchronously; the async signature lets callers keep a
    /// single call site regardless (runtime agnostic, no executor required).
    pub async fn layout(
        &self,
        graph: &Graph,
        config: &LayoutConfig,
        viewport: Viewport,
    ) -> Result<LayoutResult> {
        self.layout_sync(graph, config, viewport)
    }

    /// Decodes a `{nodes, edges}` JSON snapshot and returns it laid out, handles included.
    pub fn layout_json(
        &self,
        graph_json: &str,
        config: &LayoutConfig,
        viewport: Viewport,
    ) -> Result<Graph> {
        let graph: Graph = serde_json::from_str(graph_json)?;
        let result = self.layout_sync(&graph, config, viewport)?;
        Ok(result.applied_to(graph))
    }

    /// Position for one more child of `parent_id`, leaving every existing node where it is.
    ///
    /// Layered and orthogonal configs stack along their direction, radial configs take the next
    /// slot of the parent's wedge. Circular and force layouts have no notion of a child slot and
    /// use the direction rule. Returns `None` when the parent is unknown.
    pub fn place_child(
        &self,
        graph: &Graph,
        parent_id: &str,
        config: &LayoutConfig,
        viewport: Viewport,
    ) -> Option<Point> {
        let viewport = viewport.sanitized();
        let index = GraphIndex::new(graph);
        let parent = index.index_of(parent_id)?;
        let center_of = |idx: usize| {
            let n = index.node(idx);
            let s = NodeSize::of(n, self.node_size);
            n.position.offset(s.width / 2.0, s.height / 2.0)
        };
        let siblings: Vec<Point> = index
            .successors(parent)
            .iter()
            .map(|&c| center_of(c))
            .collect();

        let mut spacing = config.spacing();
        if config.kind == LayoutKind::Orthogonal {
            spacing = spacing.scaled(ORTHOGONAL_CLEARANCE);
        }
        let size = self.node_size;
        let (mode, node_spacing) = match (config.kind, config.direction) {
            (LayoutKind::Radial, _) => {
                let center = config
                    .anchor
                    .unwrap_or(Anchor::ViewportCenter)
                    .resolve(viewport);
                (Mode::Radial { center }, spacing.node)
            }
            (_, Direction::Horizontal) => (
                Mode::Horizontal,
                spacing.node.max(size.height + layered::MIN_GAP),
            ),
            (_, Direction::Vertical) => (
                Mode::Vertical,
                spacing.node.max(size.width + layered::MIN_GAP),
            ),
        };

        let center = incremental::place_child(&Request {
            parent: center_of(parent),
            siblings: &siblings,
            mode,
            rank_spacing: spacing.rank,
            node_spacing,
            span: None,
        });
        Some(center.offset(-size.width / 2.0, -size.height / 2.0))
    }
}
