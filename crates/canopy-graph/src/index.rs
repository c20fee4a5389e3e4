//! Read-only adjacency view over a [`Graph`] snapshot.

use crate::model::{Graph, Node};
use rustc_hash::FxBuildHasher;
use std::collections::VecDeque;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Index built once per layout call.
///
/// Node indices follow the snapshot's node order. When the snapshot contains duplicate ids only
/// the first occurrence is indexed. Edges whose endpoints are missing ("dangling") and self-loops
/// never show up in the adjacency lists, but they stay in the snapshot untouched.
#[derive(Debug, Clone)]
pub struct GraphIndex<'a> {
    graph: &'a Graph,
    nodes: Vec<&'a Node>,
    node_index: HashMap<&'a str, usize>,
    out: Vec<Vec<usize>>,
    in_: Vec<Vec<usize>>,
    dangling: Vec<usize>,
}

impl<'a> GraphIndex<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let mut nodes: Vec<&'a Node> = Vec::with_capacity(graph.nodes.len());
        let mut node_index: HashMap<&'a str, usize> = HashMap::default();
        node_index.reserve(graph.nodes.len());
        for n in &graph.nodes {
            if node_index.contains_key(n.id.as_str()) {
                continue;
            }
            node_index.insert(n.id.as_str(), nodes.len());
            nodes.push(n);
        }

        let mut out: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut in_: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut dangling: Vec<usize> = Vec::new();
        let mut seen_pairs: HashSet<(usize, usize)> = HashSet::default();
        for (edge_idx, e) in graph.edges.iter().enumerate() {
            let (Some(&v), Some(&w)) = (
                node_index.get(e.source.as_str()),
                node_index.get(e.target.as_str()),
            ) else {
                dangling.push(edge_idx);
                continue;
            };
            if v == w {
                continue;
            }
            // Parallel edges collapse into a single adjacency entry; the first one fixes the
            // sibling order.
            if !seen_pairs.insert((v, w)) {
                continue;
            }
            out[v].push(w);
            in_[w].push(v);
        }

        Self {
            graph,
            nodes,
            node_index,
            out,
            in_,
            dangling,
        }
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node(&self, idx: usize) -> &'a Node {
        self.nodes[idx]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.iter().copied()
    }

    /// Indices (into `graph.edges`) of edges that reference a missing node.
    pub fn dangling_edges(&self) -> &[usize] {
        &self.dangling
    }

    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out[idx]
    }

    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.in_[idx]
    }

    /// Every node with no incoming edge, in node-list order.
    pub fn roots(&self) -> Vec<&'a str> {
        (0..self.nodes.len())
            .filter(|&i| self.in_[i].is_empty())
            .map(|i| self.nodes[i].id.as_str())
            .collect()
    }

    pub fn find_root_index(&self) -> Option<usize> {
        (0..self.nodes.len()).find(|&i| self.in_[i].is_empty())
    }

    /// The first node (in list order) without an incoming edge.
    ///
    /// Returns `None` for an empty graph or when every node has a parent (a pure cycle).
    pub fn find_root(&self) -> Option<&'a str> {
        self.find_root_index().map(|i| self.nodes[i].id.as_str())
    }

    /// Direct children in edge-insertion order. Unknown ids have no children.
    pub fn children(&self, id: &str) -> Vec<&'a str> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        self.out[idx]
            .iter()
            .map(|&c| self.nodes[c].id.as_str())
            .collect()
    }

    /// Number of edges on the shortest backward path from `id` to a node without parents.
    ///
    /// Every incoming edge is followed, so a parent that sits on a cycle does not hide another
    /// parent that leads to a root. Returns `None` for unknown ids and for nodes whose ancestry
    /// never reaches a node without parents.
    pub fn depth(&self, id: &str) -> Option<usize> {
        let start = self.index_of(id)?;
        let mut visited: Vec<bool> = vec![false; self.nodes.len()];
        visited[start] = true;
        let mut queue: VecDeque<(usize, usize)> = VecDeque::from([(start, 0)]);
        while let Some((v, depth)) = queue.pop_front() {
            if self.in_[v].is_empty() {
                return Some(depth);
            }
            for &p in &self.in_[v] {
                if !visited[p] {
                    visited[p] = true;
                    queue.push_back((p, depth + 1));
                }
            }
        }
        None
    }

    /// All nodes reachable from `id` through outgoing edges, in pre-order, excluding `id` itself.
    pub fn descendants(&self, id: &str) -> Vec<&'a str> {
        let Some(start) = self.index_of(id) else {
            return Vec::new();
        };
        let mut visited: Vec<bool> = vec![false; self.nodes.len()];
        visited[start] = true;
        let mut out: Vec<&'a str> = Vec::new();
        let mut stack: Vec<usize> = self.out[start].iter().rev().copied().collect();
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            out.push(self.nodes[v].id.as_str());
            stack.extend(self.out[v].iter().rev().copied());
        }
        out
    }
}
