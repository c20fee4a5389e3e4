//! Uniform circular layout. Ignores hierarchy and follows node-list order.

use super::LayoutContext;
use canopy_graph::Point;
use std::f64::consts::TAU;

/// Circle radius as a fraction of the smaller viewport dimension.
pub const RADIUS_FACTOR: f64 = 0.35;

pub fn layout(ctx: &LayoutContext<'_>) -> Vec<Point> {
    let n = ctx.index.len();
    if n == 0 {
        return Vec::new();
    }
    let center = ctx.viewport.center();
    let radius = circle_radius(ctx);
    let step = TAU / n as f64;

    let positions = (0..n)
        .map(|i| {
            let angle = i as f64 * step;
            let c = center.offset(radius * angle.cos(), radius * angle.sin());
            ctx.position_for_center(i, c)
        })
        .collect();
    tracing::debug!(nodes = n, radius, "circular layout");
    positions
}

fn circle_radius(ctx: &LayoutContext<'_>) -> f64 {
    let n = ctx.index.len();
    if n <= 1 {
        return 0.0;
    }
    let viewport_radius = ctx.viewport.width.min(ctx.viewport.height) * RADIUS_FACTOR;
    // Dense graphs grow the circle so neighbouring nodes keep `nodeSpacing` between them.
    let widest = ctx.sizes().iter().map(|s| s.width).fold(0.0, f64::max);
    let crowded_radius = n as f64 * (widest + ctx.spacing.node) / TAU;
    viewport_radius.max(crowded_radius)
}
