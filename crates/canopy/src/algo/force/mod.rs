//! Force-directed layout.
//!
//! A small velocity-Verlet simulation in the style of d3-force with four forces: many-body
//! repulsion, link springs, box collision and a weak pull of the centroid toward the viewport
//! center. It needs no hierarchy, so it accepts cycles and multi-root graphs.
//!
//! The simulation is an explicit state machine: [`ForceSimulation::tick`] advances exactly one
//! step and never schedules anything by itself. Batch callers use [`ForceSimulation::run`];
//! animating callers pull intermediate frames from [`ForceSimulation::frames`].

mod rng;

use super::LayoutContext;
use crate::config::{NodeSize, Viewport};
use canopy_graph::{Graph, GraphIndex, Point};
use nalgebra::Vector2;
use rng::XorShift64Star;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

type Vec2 = Vector2<f64>;

/// Charge used for the sparsest graphs (a handful of edges among many nodes).
const SPARSE_CHARGE: f64 = -1000.0;
/// Charge used for fully connected graphs.
const DENSE_CHARGE: f64 = -300.0;
/// Squared distance below which repulsion stops growing.
const DISTANCE_MIN2: f64 = 1.0;
const INITIAL_RADIUS: f64 = 10.0;
/// Golden angle, so seeded spirals never line up.
const INITIAL_ANGLE: f64 = std::f64::consts::PI * 0.763_932_022_500_210_3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceOptions {
    /// Many-body strength (negative repels). `None` derives it from the graph density.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_strength: Option<f64>,
    pub center_strength: f64,
    /// Minimum collision radius per node; large nodes use their half diagonal instead.
    pub collision_radius: f64,
    pub collision_strength: f64,
    /// Rest length of link springs.
    pub link_distance: f64,
    /// `None` weakens springs on high-degree nodes (`1 / min(degree)`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_strength: Option<f64>,
    pub max_ticks: usize,
    /// Stop once the largest per-tick displacement falls below this many pixels.
    pub epsilon: f64,
    pub velocity_decay: f64,
    pub alpha_min: f64,
    pub seed: u64,
}

impl Default for ForceOptions {
    fn default() -> Self {
        Self {
            charge_strength: None,
            center_strength: 0.1,
            collision_radius: 90.0,
            collision_strength: 0.7,
            link_distance: 180.0,
            link_strength: None,
            max_ticks: 300,
            epsilon: 0.5,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            seed: 1,
        }
    }
}

/// Charge interpolated between [`SPARSE_CHARGE`] and [`DENSE_CHARGE`] by edge density.
pub fn density_charge(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return SPARSE_CHARGE;
    }
    let pairs = (node_count * (node_count - 1) / 2) as f64;
    let density = (edge_count as f64 / pairs).clamp(0.0, 1.0);
    SPARSE_CHARGE + (DENSE_CHARGE - SPARSE_CHARGE) * density
}

#[derive(Debug, Clone, Copy)]
struct Link {
    source: usize,
    target: usize,
    strength: f64,
    bias: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: usize,
    pub alpha: f64,
    pub max_displacement: f64,
}

/// One intermediate state, positions already clamped to the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceFrame {
    pub tick: usize,
    pub alpha: f64,
    pub max_displacement: f64,
    pub positions: Vec<Point>,
}

#[derive(Debug, Clone)]
pub struct ForceSimulation {
    ids: Vec<String>,
    sizes: Vec<NodeSize>,
    radii: Vec<f64>,
    // Node centers; converted back to top-left positions on output.
    pos: Vec<Vec2>,
    vel: Vec<Vec2>,
    links: Vec<Link>,
    center: Vec2,
    viewport: Viewport,
    charge: f64,
    opts: ForceOptions,
    alpha: f64,
    alpha_decay: f64,
    ticks: usize,
    last_displacement: f64,
    rng: XorShift64Star,
}

impl ForceSimulation {
    pub fn new(
        graph: &Graph,
        opts: ForceOptions,
        viewport: Viewport,
        default_size: NodeSize,
    ) -> Self {
        let index = GraphIndex::new(graph);
        let sizes = index
            .nodes()
            .map(|n| NodeSize::of(n, default_size))
            .collect();
        Self::from_parts(&index, sizes, opts, viewport)
    }

    pub(crate) fn from_context(ctx: &LayoutContext<'_>, opts: ForceOptions) -> Self {
        Self::from_parts(ctx.index, ctx.sizes().to_vec(), opts, ctx.viewport)
    }

    fn from_parts(
        index: &GraphIndex<'_>,
        sizes: Vec<NodeSize>,
        opts: ForceOptions,
        viewport: Viewport,
    ) -> Self {
        let n = index.len();
        let center = Vec2::new(viewport.width / 2.0, viewport.height / 2.0);

        let mut pos: Vec<Vec2> = index
            .nodes()
            .zip(&sizes)
            .map(|(node, s)| {
                let p = node.position;
                if p.x.is_finite() && p.y.is_finite() {
                    Vec2::new(p.x + s.width / 2.0, p.y + s.height / 2.0)
                } else {
                    center
                }
            })
            .collect();
        spread_coincident(&mut pos);

        let radii = sizes
            .iter()
            .map(|s| opts.collision_radius.max(s.half_diagonal()))
            .collect();

        let mut degree: Vec<usize> = vec![0; n];
        let mut pairs: Vec<(usize, usize)> = Vec::new();
        for v in 0..n {
            for &w in index.successors(v) {
                degree[v] += 1;
                degree[w] += 1;
                pairs.push((v, w));
            }
        }
        let fixed_strength = opts.link_strength.filter(|s| s.is_finite() && *s > 0.0);
        let links: Vec<Link> = pairs
            .into_iter()
            .map(|(source, target)| {
                let (ds, dt) = (degree[source], degree[target]);
                Link {
                    source,
                    target,
                    strength: fixed_strength.unwrap_or(1.0 / ds.min(dt).max(1) as f64),
                    bias: ds as f64 / (ds + dt) as f64,
                }
            })
            .collect();

        let charge = opts
            .charge_strength
            .filter(|c| c.is_finite())
            .unwrap_or_else(|| density_charge(n, links.len()));
        let max_ticks = opts.max_ticks.max(1);
        let alpha_decay = 1.0 - opts.alpha_min.clamp(1e-6, 0.999).powf(1.0 / max_ticks as f64);

        Self {
            ids: index.nodes().map(|n| n.id.clone()).collect(),
            sizes,
            radii,
            vel: vec![Vec2::zeros(); n],
            pos,
            links,
            center,
            viewport,
            charge,
            opts,
            alpha: 1.0,
            alpha_decay,
            ticks: 0,
            last_displacement: f64::INFINITY,
            rng: XorShift64Star::new(opts.seed),
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn last_displacement(&self) -> f64 {
        self.last_displacement
    }

    /// True once the tick cap is hit, alpha has cooled down or the last tick barely moved.
    pub fn is_settled(&self) -> bool {
        self.ticks >= self.opts.max_ticks.max(1)
            || self.alpha < self.opts.alpha_min
            || self.last_displacement < self.opts.epsilon
    }

    pub fn tick(&mut self) -> TickReport {
        self.alpha *= 1.0 - self.alpha_decay;

        self.apply_links();
        self.apply_charge();
        self.apply_collision();

        let keep = 1.0 - self.opts.velocity_decay.clamp(0.0, 1.0);
        let mut max_displacement: f64 = 0.0;
        for (p, v) in self.pos.iter_mut().zip(self.vel.iter_mut()) {
            *v *= keep;
            *p += *v;
            max_displacement = max_displacement.max(v.norm());
        }
        self.apply_center();

        self.ticks += 1;
        self.last_displacement = max_displacement;
        tracing::trace!(
            tick = self.ticks,
            alpha = self.alpha,
            max_displacement,
            "force tick"
        );
        TickReport {
            tick: self.ticks,
            alpha: self.alpha,
            max_displacement,
        }
    }

    /// Ticks until settled and returns how many ticks this call ran.
    pub fn run(&mut self) -> usize {
        let start = self.ticks;
        while !self.is_settled() {
            self.tick();
        }
        let ran = self.ticks - start;
        tracing::debug!(
            ticks = ran,
            max_displacement = self.last_displacement,
            converged = self.last_displacement < self.opts.epsilon,
            "force simulation settled"
        );
        ran
    }

    /// Restarts the cooling schedule from the current positions.
    pub fn reheat(&mut self) {
        self.alpha = 1.0;
        self.ticks = 0;
        self.last_displacement = f64::INFINITY;
    }

    /// Finite iterator of intermediate frames; each `next` runs one tick.
    pub fn frames(&mut self) -> Frames<'_> {
        Frames { sim: self }
    }

    /// Current top-left positions clamped to `[0, viewport - size]` on both axes.
    pub fn positions(&self) -> Vec<Point> {
        self.pos
            .iter()
            .zip(&self.sizes)
            .map(|(c, s)| {
                Point::new(
                    clamp_axis(c.x - s.width / 2.0, self.viewport.width - s.width),
                    clamp_axis(c.y - s.height / 2.0, self.viewport.height - s.height),
                )
            })
            .collect()
    }

    fn apply_links(&mut self) {
        for link in &self.links {
            let (s, t) = (link.source, link.target);
            let mut d = (self.pos[t] + self.vel[t]) - (self.pos[s] + self.vel[s]);
            if d.x == 0.0 {
                d.x = self.rng.jiggle();
            }
            if d.y == 0.0 {
                d.y = self.rng.jiggle();
            }
            let l = d.norm();
            let f = d * ((l - self.opts.link_distance) / l * self.alpha * link.strength);
            self.vel[t] -= f * link.bias;
            self.vel[s] += f * (1.0 - link.bias);
        }
    }

    fn apply_charge(&mut self) {
        let n = self.pos.len();
        let strength = self.charge * self.alpha;
        for i in 0..n {
            for j in (i + 1)..n {
                let mut d = self.pos[j] - self.pos[i];
                if d.x == 0.0 && d.y == 0.0 {
                    d = Vec2::new(self.rng.jiggle(), self.rng.jiggle());
                }
                let mut l2 = d.norm_squared();
                if l2 < DISTANCE_MIN2 {
                    l2 = (DISTANCE_MIN2 * l2).sqrt();
                }
                let f = d * (strength / l2);
                self.vel[i] += f;
                self.vel[j] -= f;
            }
        }
    }

    fn apply_collision(&mut self) {
        let n = self.pos.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (ri, rj) = (self.radii[i], self.radii[j]);
                let r = ri + rj;
                let mut d = (self.pos[i] + self.vel[i]) - (self.pos[j] + self.vel[j]);
                if d.norm_squared() >= r * r {
                    continue;
                }
                if d.x == 0.0 {
                    d.x = self.rng.jiggle();
                }
                if d.y == 0.0 {
                    d.y = self.rng.jiggle();
                }
                let l = d.norm();
                let push = d * ((r - l) / l * self.opts.collision_strength);
                let share = (rj * rj) / (ri * ri + rj * rj);
                self.vel[i] += push * share;
                self.vel[j] -= push * (1.0 - share);
            }
        }
    }

    fn apply_center(&mut self) {
        if self.pos.is_empty() {
            return;
        }
        let sum = self.pos.iter().fold(Vec2::zeros(), |acc, p| acc + p);
        let mean = sum / self.pos.len() as f64;
        let shift = (mean - self.center) * self.opts.center_strength;
        for p in &mut self.pos {
            *p -= shift;
        }
    }
}

pub struct Frames<'a> {
    sim: &'a mut ForceSimulation,
}

impl Iterator for Frames<'_> {
    type Item = ForceFrame;

    fn next(&mut self) -> Option<ForceFrame> {
        if self.sim.is_settled() {
            return None;
        }
        let report = self.sim.tick();
        Some(ForceFrame {
            tick: report.tick,
            alpha: report.alpha,
            max_displacement: report.max_displacement,
            positions: self.sim.positions(),
        })
    }
}

pub fn layout(ctx: &LayoutContext<'_>, defaults: &ForceOptions) -> Vec<Point> {
    let opts = ctx.config.force.unwrap_or(*defaults);
    let mut sim = ForceSimulation::from_context(ctx, opts);
    sim.run();
    sim.positions()
}

fn clamp_axis(v: f64, max: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, max.max(0.0))
    } else {
        0.0
    }
}

/// Fans nodes that share a spot out on a small golden-angle spiral around that spot.
fn spread_coincident(pos: &mut [Vec2]) {
    let mut seen: FxHashMap<(u64, u64), usize> = FxHashMap::default();
    for p in pos.iter_mut() {
        let count = seen.entry((p.x.to_bits(), p.y.to_bits())).or_insert(0);
        if *count > 0 {
            let i = *count as f64;
            let radius = INITIAL_RADIUS * (0.5 + i).sqrt();
            let angle = i * INITIAL_ANGLE;
            *p += Vec2::new(radius * angle.cos(), radius * angle.sin());
        }
        *count += 1;
    }
}
