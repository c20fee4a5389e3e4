//! Layout configuration.
//!
//! Configs are plain serde values so the editor can persist them next to the document. Every
//! field is optional on the wire; missing or unusable values fall back to the defaults below.

use crate::algo::force::ForceOptions;
use crate::error::Result;
use canopy_graph::Point;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RANK_SPACING: f64 = 200.0;
pub const DEFAULT_NODE_SPACING: f64 = 100.0;
pub const DEFAULT_NODE_WIDTH: f64 = 150.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 50.0;

/// Which algorithm the dispatcher runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LayoutKind {
    #[default]
    Layered,
    Force,
    Radial,
    Circular,
    Orthogonal,
}

impl LayoutKind {
    /// Parses a layout name, returning `None` for names no algorithm answers to.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "layered" | "tree" | "dagre" | "hierarchical" => Some(Self::Layered),
            "force" | "force-directed" => Some(Self::Force),
            "radial" => Some(Self::Radial),
            "circular" | "circle" => Some(Self::Circular),
            "orthogonal" => Some(Self::Orthogonal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layered => "layered",
            Self::Force => "force",
            Self::Radial => "radial",
            Self::Circular => "circular",
            Self::Orthogonal => "orthogonal",
        }
    }
}

impl From<String> for LayoutKind {
    fn from(name: String) -> Self {
        Self::from_name(&name).unwrap_or_else(|| {
            tracing::warn!(layout = %name, "unknown layout type, falling back to layered");
            Self::Layered
        })
    }
}

/// Flow direction of the hierarchical layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Root on the left, ranks grow along +x.
    #[default]
    #[serde(alias = "LR", alias = "lr")]
    Horizontal,
    /// Root on top, ranks grow along +y.
    #[serde(alias = "TB", alias = "tb")]
    Vertical,
}

/// Where the root (layered) or the center (radial) is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    Origin,
    ViewportCenter,
    Point(Point),
}

impl Anchor {
    pub fn resolve(self, viewport: Viewport) -> Point {
        match self {
            Self::Origin => Point::ORIGIN,
            Self::ViewportCenter => viewport.center(),
            Self::Point(p) => p,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// The viewport with every non-finite or negative dimension replaced by zero.
    pub fn sanitized(self) -> Self {
        let usable = |v: f64| v.is_finite() && v >= 0.0;
        if usable(self.width) && usable(self.height) {
            return self;
        }
        tracing::warn!(
            width = self.width,
            height = self.height,
            "unusable viewport, clamping to zero"
        );
        let clamp = |v: f64| if usable(v) { v } else { 0.0 };
        Self {
            width: clamp(self.width),
            height: clamp(self.height),
        }
    }
}

/// Logical footprint of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
}

impl Default for NodeSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        }
    }
}

impl NodeSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The node's own footprint, falling back to `default` per missing or unusable dimension.
    pub fn of(node: &canopy_graph::Node, default: NodeSize) -> Self {
        let usable = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
        Self {
            width: usable(node.width).unwrap_or(default.width),
            height: usable(node.height).unwrap_or(default.height),
        }
    }

    pub fn half_diagonal(self) -> f64 {
        self.width.hypot(self.height) / 2.0
    }
}

/// Resolved spacing pair, always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Distance between hierarchy levels (ring spacing for radial).
    pub rank: f64,
    /// Distance between nodes on the same level.
    pub node: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            rank: DEFAULT_RANK_SPACING,
            node: DEFAULT_NODE_SPACING,
        }
    }
}

impl Spacing {
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            rank: self.rank * factor,
            node: self.node * factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    pub direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<ForceOptions>,
}

impl LayoutConfig {
    pub fn new(kind: LayoutKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_rank_spacing(mut self, spacing: f64) -> Self {
        self.rank_spacing = Some(spacing);
        self
    }

    pub fn with_node_spacing(mut self, spacing: f64) -> Self {
        self.node_spacing = Some(spacing);
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_force(mut self, force: ForceOptions) -> Self {
        self.force = Some(force);
        self
    }

    pub fn spacing(&self) -> Spacing {
        Spacing {
            rank: positive_or("rankSpacing", self.rank_spacing, DEFAULT_RANK_SPACING),
            node: positive_or("nodeSpacing", self.node_spacing, DEFAULT_NODE_SPACING),
        }
    }
}

fn positive_or(field: &'static str, value: Option<f64>, default: f64) -> f64 {
    match value {
        None => default,
        Some(v) if v.is_finite() && v > 0.0 => v,
        Some(v) => {
            tracing::warn!(field, value = v, default, "ignoring non-positive spacing");
            default
        }
    }
}
