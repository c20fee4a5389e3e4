//! Single-child placement for streaming generation.
//!
//! While nodes arrive one at a time, a full relayout would shuffle everything already on screen.
//! [`place_child`] instead looks only at the parent and its current children and returns a slot
//! for one more child. Centering and wedge rebalancing wait for the next full relayout.
//!
//! Every mode guarantees the new point is at least `node_spacing` away from each existing
//! sibling.

use crate::algo::radial::{AngularSpan, polar};
use canopy_graph::Point;
use std::f64::consts::{PI, TAU};

/// Span assumed for a parent whose wedge cannot be recovered from its children.
const DEFAULT_CHILD_SPAN: f64 = PI / 3.0;
/// Parents closer than this to the radial center are treated as the root.
const CENTER_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Children go one rank to the right, stacked downwards.
    Horizontal,
    /// Children go one rank down, stacked to the right.
    Vertical,
    /// Children go one ring further out from `center`.
    Radial { center: Point },
}

#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub parent: Point,
    /// Points of the parent's current children.
    pub siblings: &'a [Point],
    pub mode: Mode,
    pub rank_spacing: f64,
    pub node_spacing: f64,
    /// Wedge the parent owns, when the caller still knows it.
    pub span: Option<AngularSpan>,
}

pub fn place_child(req: &Request<'_>) -> Point {
    match req.mode {
        Mode::Horizontal => {
            let y = req
                .siblings
                .iter()
                .map(|s| s.y)
                .reduce(f64::max)
                .map_or(req.parent.y, |last| last + req.node_spacing);
            Point::new(req.parent.x + req.rank_spacing, y)
        }
        Mode::Vertical => {
            let x = req
                .siblings
                .iter()
                .map(|s| s.x)
                .reduce(f64::max)
                .map_or(req.parent.x, |last| last + req.node_spacing);
            Point::new(x, req.parent.y + req.rank_spacing)
        }
        Mode::Radial { center } => place_radial(req, center),
    }
}

fn place_radial(req: &Request<'_>, center: Point) -> Point {
    let parent_radius = req.parent.distance(center);
    let at_center = parent_radius < CENTER_EPSILON;
    let reference = if at_center {
        0.0
    } else {
        (req.parent.y - center.y).atan2(req.parent.x - center.x)
    };
    // Sibling angles unwrapped into (reference - PI, reference + PI].
    let mut angles: Vec<f64> = req
        .siblings
        .iter()
        .map(|s| unwrap_angle((s.y - center.y).atan2(s.x - center.x), reference))
        .collect();
    angles.sort_by(f64::total_cmp);

    let angle = if at_center && req.span.is_none() {
        widest_gap_angle(&angles)
    } else {
        let span = req
            .span
            .unwrap_or_else(|| infer_span(&angles, reference));
        next_slot(span, angles.len())
    };

    let radius = parent_radius + req.rank_spacing;
    separate(req, center, radius, angle)
}

/// Recovers the parent's wedge from evenly spread children.
fn infer_span(sorted: &[f64], reference: f64) -> AngularSpan {
    match sorted {
        [] => AngularSpan::new(
            reference - DEFAULT_CHILD_SPAN / 2.0,
            reference + DEFAULT_CHILD_SPAN / 2.0,
        ),
        [only] => AngularSpan::new(
            only - DEFAULT_CHILD_SPAN / 2.0,
            only + DEFAULT_CHILD_SPAN / 2.0,
        ),
        [first, .., last] => {
            let n = sorted.len() as f64;
            let slot = (last - first) / (n - 1.0);
            AngularSpan::new(first - slot / 2.0, last + slot / 2.0)
        }
    }
}

/// Middle of the last of `existing + 1` equal slots.
fn next_slot(span: AngularSpan, existing: usize) -> f64 {
    let slots = (existing + 1) as f64;
    let slot = span.width() / slots;
    span.start + (existing as f64 + 0.5) * slot
}

/// Root children: bisect the widest free arc around the circle.
fn widest_gap_angle(sorted: &[f64]) -> f64 {
    match sorted {
        [] => 0.0,
        [only] => only + PI,
        _ => {
            let mut best = (sorted[sorted.len() - 1], sorted[0] + TAU - sorted[sorted.len() - 1]);
            for w in sorted.windows(2) {
                let gap = w[1] - w[0];
                if gap > best.1 {
                    best = (w[0], gap);
                }
            }
            best.0 + best.1 / 2.0
        }
    }
}

/// Walks outward (alternating sides, then further rings) until the candidate clears every
/// sibling by `node_spacing`.
fn separate(req: &Request<'_>, center: Point, mut radius: f64, angle: f64) -> Point {
    let spacing = req.node_spacing;
    let clears = |p: Point| req.siblings.iter().all(|s| p.distance(*s) + 1e-9 >= spacing);

    let candidate = polar(center, radius, angle);
    if clears(candidate) {
        return candidate;
    }

    let farthest = req
        .siblings
        .iter()
        .map(|s| s.distance(center))
        .fold(0.0, f64::max);
    loop {
        // Beyond `farthest + spacing` every direction is clear.
        if radius >= farthest + spacing {
            return polar(center, radius, angle);
        }
        let step = 2.0 * (spacing / (2.0 * radius)).min(1.0).asin();
        if step > 0.0 {
            let attempts = (TAU / step).ceil() as usize;
            for k in 1..=attempts {
                for dir in [1.0, -1.0] {
                    let p = polar(center, radius, angle + dir * k as f64 * step);
                    if clears(p) {
                        return p;
                    }
                }
            }
        }
        radius += spacing;
    }
}

fn unwrap_angle(angle: f64, reference: f64) -> f64 {
    let mut a = angle;
    while a - reference > PI {
        a -= TAU;
    }
    while a - reference <= -PI {
        a += TAU;
    }
    a
}
