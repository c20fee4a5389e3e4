use canopy_graph::{Edge, Graph, GraphIndex, Node, Tree};

fn chain(ids: &[&str]) -> Graph {
    let mut g = Graph::new();
    for id in ids {
        g = g.with_node(Node::new(*id));
    }
    for pair in ids.windows(2) {
        g = g.with_edge(pair[0], pair[1]);
    }
    g
}

fn mind_map() -> Graph {
    // root
    // ├── a
    // │   ├── a1
    // │   └── a2
    // └── b
    Graph::new()
        .with_node(Node::new("root"))
        .with_node(Node::new("a"))
        .with_node(Node::new("b"))
        .with_node(Node::new("a1"))
        .with_node(Node::new("a2"))
        .with_edge("root", "a")
        .with_edge("root", "b")
        .with_edge("a", "a1")
        .with_edge("a", "a2")
}

#[test]
fn find_root_returns_none_for_an_empty_graph() {
    let g = Graph::new();
    assert_eq!(GraphIndex::new(&g).find_root(), None);
}

#[test]
fn find_root_picks_the_node_without_incoming_edges() {
    let g = Graph::new()
        .with_node(Node::new("child"))
        .with_node(Node::new("root"))
        .with_edge("root", "child");
    assert_eq!(GraphIndex::new(&g).find_root(), Some("root"));
}

#[test]
fn find_root_picks_the_first_candidate_in_list_order() {
    let g = Graph::new()
        .with_node(Node::new("x"))
        .with_node(Node::new("y"))
        .with_node(Node::new("z"))
        .with_edge("y", "z");
    let idx = GraphIndex::new(&g);
    assert_eq!(idx.find_root(), Some("x"));
    assert_eq!(idx.roots(), vec!["x", "y"]);
}

#[test]
fn find_root_is_none_for_a_pure_cycle() {
    let g = chain(&["a", "b", "c"]).with_edge("c", "a");
    assert_eq!(GraphIndex::new(&g).find_root(), None);
}

#[test]
fn children_follow_edge_insertion_order() {
    let g = Graph::new()
        .with_node(Node::new("p"))
        .with_node(Node::new("c1"))
        .with_node(Node::new("c2"))
        .with_node(Node::new("c3"))
        .with_edge("p", "c3")
        .with_edge("p", "c1")
        .with_edge("p", "c2");
    assert_eq!(GraphIndex::new(&g).children("p"), vec!["c3", "c1", "c2"]);
}

#[test]
fn children_skip_dangling_edges() {
    let mut g = chain(&["a", "b"]);
    g.edges.push(Edge::new("ghost", "a", "missing"));
    let idx = GraphIndex::new(&g);
    assert_eq!(idx.children("a"), vec!["b"]);
    assert_eq!(idx.dangling_edges(), &[1]);
    assert!(idx.children("missing").is_empty());
}

#[test]
fn depth_counts_edges_back_to_the_root() {
    let g = mind_map();
    let idx = GraphIndex::new(&g);
    assert_eq!(idx.depth("root"), Some(0));
    assert_eq!(idx.depth("b"), Some(1));
    assert_eq!(idx.depth("a2"), Some(2));
    assert_eq!(idx.depth("nope"), None);
}

#[test]
fn depth_follows_every_parent_not_just_the_first() {
    // `a`'s first incoming edge comes from the `a <-> b` loop, the second from the root.
    let g = Graph::new()
        .with_node(Node::new("root"))
        .with_node(Node::new("a"))
        .with_node(Node::new("b"))
        .with_edge("b", "a")
        .with_edge("root", "a")
        .with_edge("a", "b");
    let idx = GraphIndex::new(&g);
    assert_eq!(idx.depth("root"), Some(0));
    assert_eq!(idx.depth("a"), Some(1));
    assert_eq!(idx.depth("b"), Some(2));

    let tree = Tree::build(&idx, 0);
    for id in ["root", "a", "b"] {
        let v = idx.index_of(id).unwrap();
        assert_eq!(tree.rank(v), idx.depth(id), "{id}");
    }
}

#[test]
fn depth_picks_the_shortest_way_to_a_root() {
    // `d` hangs two levels below `top` through `l`, but also directly below `side`.
    let g = chain(&["top", "l", "d"])
        .with_node(Node::new("side"))
        .with_edge("side", "d");
    assert_eq!(GraphIndex::new(&g).depth("d"), Some(1));
}

#[test]
fn depth_terminates_on_cycles() {
    let g = chain(&["a", "b", "c"]).with_edge("c", "b");
    let idx = GraphIndex::new(&g);
    // `b` has two parents; the one from `a` leads back to the root.
    assert_eq!(idx.depth("c"), Some(2));

    let looped = chain(&["x", "y"]).with_edge("y", "x");
    assert_eq!(GraphIndex::new(&looped).depth("x"), None);
}

#[test]
fn descendants_are_listed_in_pre_order() {
    let g = mind_map();
    let idx = GraphIndex::new(&g);
    assert_eq!(idx.descendants("root"), vec!["a", "a1", "a2", "b"]);
    assert_eq!(idx.descendants("a"), vec!["a1", "a2"]);
    assert!(idx.descendants("b").is_empty());
}

#[test]
fn descendants_survive_cycles() {
    let g = chain(&["a", "b", "c"]).with_edge("c", "a");
    assert_eq!(GraphIndex::new(&g).descendants("a"), vec!["b", "c"]);
}

#[test]
fn tree_assigns_rank_order_and_leaf_counts() {
    let g = mind_map();
    let idx = GraphIndex::new(&g);
    let root = idx.find_root_index().unwrap();
    let tree = Tree::build(&idx, root);

    let id = |name: &str| idx.index_of(name).unwrap();
    assert_eq!(tree.len(), 5);
    assert_eq!(
        tree.pre_order()
            .iter()
            .map(|&i| idx.node(i).id.as_str())
            .collect::<Vec<_>>(),
        vec!["root", "a", "a1", "a2", "b"]
    );
    assert_eq!(tree.rank(id("a1")), Some(2));
    assert_eq!(tree.order(id("a")), Some(0));
    assert_eq!(tree.order(id("b")), Some(1));
    assert_eq!(tree.order(id("a2")), Some(1));
    assert_eq!(tree.leaf_count(id("root")), 3);
    assert_eq!(tree.leaf_count(id("a")), 2);
    assert_eq!(tree.leaf_count(id("b")), 1);
    assert_eq!(tree.parent(id("a2")), Some(id("a")));
    assert_eq!(tree.max_rank(), 2);
}

#[test]
fn tree_attaches_multi_parent_nodes_once() {
    // Diamond: both `l` and `r` point at `d`.
    let g = Graph::new()
        .with_node(Node::new("top"))
        .with_node(Node::new("l"))
        .with_node(Node::new("r"))
        .with_node(Node::new("d"))
        .with_edge("top", "l")
        .with_edge("top", "r")
        .with_edge("l", "d")
        .with_edge("r", "d");
    let idx = GraphIndex::new(&g);
    let tree = Tree::build(&idx, 0);
    let d = idx.index_of("d").unwrap();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.parent(d), idx.index_of("l"));
    assert!(tree.children(idx.index_of("r").unwrap()).is_empty());
}

#[test]
fn tree_excludes_nodes_the_root_cannot_reach() {
    let g = chain(&["a", "b"]).with_node(Node::new("orphan"));
    let idx = GraphIndex::new(&g);
    let tree = Tree::build(&idx, 0);
    assert!(!tree.contains(idx.index_of("orphan").unwrap()));
    assert_eq!(tree.leaf_count(idx.index_of("orphan").unwrap()), 0);
}

#[test]
fn graph_round_trips_through_json() {
    let json = r#"{
        "nodes": [{"id": "1", "x": 10, "y": 20}, {"id": "2"}],
        "edges": [{"id": "e1", "source": "1", "target": "2"}]
    }"#;
    let g: Graph = serde_json::from_str(json).unwrap();
    assert_eq!(g.nodes.len(), 2);
    assert_eq!(g.node("1").unwrap().position.y, 20.0);
    assert_eq!(GraphIndex::new(&g).children("1"), vec!["2"]);
}
