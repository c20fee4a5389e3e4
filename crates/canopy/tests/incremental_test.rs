use canopy::algo::radial::polar;
use canopy::incremental::{Mode, Request, place_child};
use canopy::{Anchor, Direction, Engine, Graph, LayoutConfig, LayoutKind, Node, Point, Viewport};

const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

fn center(p: Point) -> Point {
    p.offset(75.0, 25.0)
}

fn top_left(c: Point) -> Point {
    c.offset(-75.0, -25.0)
}

fn fan(children: usize) -> Graph {
    let mut g = Graph::new().with_node(Node::new("root"));
    for i in 0..children {
        let id = format!("c{i}");
        g = g.with_node(Node::new(id.clone())).with_edge("root", id);
    }
    g
}

/// Lays out `g`, then asks for one more child of `root`. Returns the settled graph and the new
/// child's center.
fn settle_and_place(g: Graph, cfg: &LayoutConfig) -> (Graph, Point) {
    let engine = Engine::new();
    let settled = engine
        .layout_sync(&g, cfg, VIEWPORT)
        .unwrap()
        .applied_to(g);
    let p = engine
        .place_child(&settled, "root", cfg, VIEWPORT)
        .unwrap();
    (settled, center(p))
}

fn sibling_centers(g: &Graph) -> Vec<Point> {
    g.nodes
        .iter()
        .filter(|n| n.id != "root")
        .map(|n| center(n.position))
        .collect()
}

#[test]
fn radial_child_takes_the_next_slot_of_the_parent_wedge() {
    // Parent on the 1000px ring at 0°, children one ring out at -30° and +30°.
    let origin = Point::ORIGIN;
    let g = Graph::new()
        .with_node(Node::new("root"))
        .with_node(Node::new("parent"))
        .with_node(Node::new("a"))
        .with_node(Node::new("b"))
        .with_edge("root", "parent")
        .with_edge("parent", "a")
        .with_edge("parent", "b");
    let mut g = g;
    g.nodes[1].position = top_left(polar(origin, 1000.0, 0.0));
    g.nodes[2].position = top_left(polar(origin, 1200.0, (-30f64).to_radians()));
    g.nodes[3].position = top_left(polar(origin, 1200.0, 30f64.to_radians()));

    let cfg = LayoutConfig::new(LayoutKind::Radial)
        .with_anchor(Anchor::Point(origin))
        .with_rank_spacing(200.0)
        .with_node_spacing(100.0);
    let p = center(
        Engine::new()
            .place_child(&g, "parent", &cfg, VIEWPORT)
            .unwrap(),
    );

    // The wedge [-60°, 60°] re-split into three slots: the new child takes the last, at 40°.
    let angle = p.y.atan2(p.x).to_degrees();
    assert!((angle - 40.0).abs() < 1e-9, "{angle}");
    assert!((p.distance(origin) - 1200.0).abs() < 1e-9);
}

#[test]
fn horizontal_child_stacks_below_its_siblings() {
    let cfg = LayoutConfig::new(LayoutKind::Layered);
    let (settled, p) = settle_and_place(fan(2), &cfg);
    let siblings = sibling_centers(&settled);

    let root = center(settled.nodes[0].position);
    assert_eq!(p.x, root.x + 200.0);
    assert_eq!(p.y, siblings[1].y + 100.0);
    for s in &siblings {
        assert!(p.distance(*s) >= 100.0);
    }
}

#[test]
fn vertical_child_stacks_right_of_its_siblings() {
    let cfg = LayoutConfig::new(LayoutKind::Layered).with_direction(Direction::Vertical);
    let (settled, p) = settle_and_place(fan(3), &cfg);
    let siblings = sibling_centers(&settled);

    let root = center(settled.nodes[0].position);
    assert_eq!(p.y, root.y + 200.0);
    // Default 150px wide nodes need 170px between centers.
    assert_eq!(p.x, siblings[2].x + 170.0);
    for s in &siblings {
        assert!(p.distance(*s) >= 170.0);
    }
}

#[test]
fn radial_root_child_fills_the_widest_gap() {
    let cfg = LayoutConfig::new(LayoutKind::Radial);
    let (settled, p) = settle_and_place(fan(2), &cfg);
    let mid = VIEWPORT.center();

    assert!((p.distance(mid) - 200.0).abs() < 1e-9);
    for s in sibling_centers(&settled) {
        assert!(p.distance(s) >= 100.0);
    }
}

#[test]
fn settled_nodes_are_never_moved() {
    let engine = Engine::new();
    let cfg = LayoutConfig::new(LayoutKind::Layered);
    let mut g = engine
        .layout_sync(&fan(2), &cfg, VIEWPORT)
        .unwrap()
        .applied_to(fan(2));
    let before = g.clone();

    for i in 0..3 {
        let p = engine.place_child(&g, "root", &cfg, VIEWPORT).unwrap();
        let id = format!("stream{i}");
        g = g
            .with_node(Node::new(id.clone()).at(p.x, p.y))
            .with_edge("root", id);
    }
    assert_eq!(&g.nodes[..before.nodes.len()], &before.nodes[..]);

    let centers: Vec<Point> = g.nodes[1..].iter().map(|n| center(n.position)).collect();
    for (i, a) in centers.iter().enumerate() {
        for b in &centers[i + 1..] {
            assert!(a.distance(*b) >= 100.0, "{a:?} {b:?}");
        }
    }
}

#[test]
fn unknown_parent_has_no_slot() {
    let cfg = LayoutConfig::default();
    assert!(
        Engine::new()
            .place_child(&fan(1), "missing", &cfg, VIEWPORT)
            .is_none()
    );
}

#[test]
fn first_child_is_level_with_its_parent() {
    let parent = Point::new(10.0, 20.0);
    let req = Request {
        parent,
        siblings: &[],
        mode: Mode::Horizontal,
        rank_spacing: 200.0,
        node_spacing: 100.0,
        span: None,
    };
    assert_eq!(place_child(&req), Point::new(210.0, 20.0));

    let req = Request {
        mode: Mode::Vertical,
        ..req
    };
    assert_eq!(place_child(&req), Point::new(10.0, 220.0));
}
