//! Rank/order tree layout, used by the `layered` and `orthogonal` modes.
//!
//! Rank is the pre-order depth from the root and drives the main axis (x for horizontal, y for
//! vertical). Along the cross axis, leaves are packed in pre-order and every parent sits at the
//! mean of its direct children. The whole tree is finally translated so the root's position is
//! the resolved anchor, which makes the root independent of every other node.

use super::LayoutContext;
use crate::config::{Anchor, Direction, Spacing};
use canopy_graph::{Point, Tree};

/// Free space kept between two node boxes when the configured spacing is too tight for them.
pub(crate) const MIN_GAP: f64 = 20.0;

/// Spacing multiplier of the orthogonal variant (room for right-angle edges).
pub const ORTHOGONAL_CLEARANCE: f64 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Layered,
    Orthogonal,
}

pub fn layout(ctx: &LayoutContext<'_>, variant: Variant) -> Vec<Point> {
    let mut positions = ctx.prior_positions();
    let Some(root) = ctx.index.find_root_index() else {
        tracing::debug!("layered: no root candidate, keeping prior positions");
        return positions;
    };
    let tree = Tree::build(ctx.index, root);

    let spacing = match variant {
        Variant::Layered => ctx.spacing,
        Variant::Orthogonal => ctx.spacing.scaled(ORTHOGONAL_CLEARANCE),
    };
    let centers = tree_centers(ctx, &tree, spacing, ctx.config.direction);

    let anchor = ctx
        .config
        .anchor
        .unwrap_or(Anchor::Origin)
        .resolve(ctx.viewport);
    let root_position = ctx.position_for_center(root, centers[root]);
    let dx = anchor.x - root_position.x;
    let dy = anchor.y - root_position.y;
    for &v in tree.pre_order() {
        positions[v] = ctx.position_for_center(v, centers[v].offset(dx, dy));
    }

    tracing::debug!(
        ?variant,
        root = %ctx.index.node(root).id,
        placed = tree.len(),
        orphans = ctx.index.len() - tree.len(),
        "layered layout"
    );
    positions
}

/// Untranslated node centers. Entries for nodes outside the tree are meaningless.
fn tree_centers(
    ctx: &LayoutContext<'_>,
    tree: &Tree,
    spacing: Spacing,
    direction: Direction,
) -> Vec<Point> {
    // (main-axis extent, cross-axis extent)
    let extent = |idx: usize| -> (f64, f64) {
        let s = ctx.size(idx);
        match direction {
            Direction::Horizontal => (s.width, s.height),
            Direction::Vertical => (s.height, s.width),
        }
    };

    let ranks = tree.max_rank() + 1;
    let mut rank_extent: Vec<f64> = vec![0.0; ranks];
    for &v in tree.pre_order() {
        let r = tree.rank(v).unwrap_or(0);
        rank_extent[r] = rank_extent[r].max(extent(v).0);
    }
    let mut rank_offset: Vec<f64> = vec![0.0; ranks];
    for r in 1..ranks {
        let needed = (rank_extent[r - 1] + rank_extent[r]) / 2.0 + MIN_GAP;
        rank_offset[r] = rank_offset[r - 1] + spacing.rank.max(needed);
    }

    let mut cross: Vec<f64> = vec![0.0; ctx.index.len()];
    let mut prev_leaf: Option<usize> = None;
    for &v in tree.pre_order() {
        if !tree.children(v).is_empty() {
            continue;
        }
        cross[v] = match prev_leaf {
            None => 0.0,
            Some(p) => {
                let needed = (extent(p).1 + extent(v).1) / 2.0 + MIN_GAP;
                cross[p] + spacing.node.max(needed)
            }
        };
        prev_leaf = Some(v);
    }
    for &v in tree.pre_order().iter().rev() {
        let kids = tree.children(v);
        if kids.is_empty() {
            continue;
        }
        cross[v] = kids.iter().map(|&c| cross[c]).sum::<f64>() / kids.len() as f64;
    }

    (0..ctx.index.len())
        .map(|v| {
            let main = tree.rank(v).map(|r| rank_offset[r]).unwrap_or(0.0);
            match direction {
                Direction::Horizontal => Point::new(main, cross[v]),
                Direction::Vertical => Point::new(cross[v], main),
            }
        })
        .collect()
}
