//! Spanning tree used by the hierarchical layouts.

use crate::index::GraphIndex;

/// Pre-order spanning tree rooted at one node of a [`GraphIndex`].
///
/// Children keep edge-insertion order. A node reachable through several parents (or through a
/// cycle) is attached to whichever parent reaches it first in pre-order; every later path to it
/// is ignored. Nodes the root cannot reach are simply not part of the tree.
#[derive(Debug, Clone)]
pub struct Tree {
    root: usize,
    pre_order: Vec<usize>,
    parent: Vec<Option<usize>>,
    rank: Vec<Option<usize>>,
    order: Vec<usize>,
    children: Vec<Vec<usize>>,
    leaves: Vec<usize>,
}

impl Tree {
    pub fn build(index: &GraphIndex<'_>, root: usize) -> Self {
        let n = index.len();
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut rank: Vec<Option<usize>> = vec![None; n];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut pre_order: Vec<usize> = Vec::new();

        let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 0)];
        while let Some((v, p, depth)) = stack.pop() {
            if rank[v].is_some() {
                continue;
            }
            rank[v] = Some(depth);
            parent[v] = p;
            if let Some(p) = p {
                children[p].push(v);
            }
            pre_order.push(v);
            for &w in index.successors(v).iter().rev() {
                if rank[w].is_none() {
                    stack.push((w, Some(v), depth + 1));
                }
            }
        }

        let mut leaves: Vec<usize> = vec![0; n];
        for &v in pre_order.iter().rev() {
            leaves[v] = if children[v].is_empty() {
                1
            } else {
                children[v].iter().map(|&c| leaves[c]).sum()
            };
        }

        let mut order: Vec<usize> = vec![0; n];
        let mut next_in_rank: Vec<usize> = Vec::new();
        for &v in &pre_order {
            let r = rank[v].unwrap_or(0);
            if next_in_rank.len() <= r {
                next_in_rank.resize(r + 1, 0);
            }
            order[v] = next_in_rank[r];
            next_in_rank[r] += 1;
        }

        Self {
            root,
            pre_order,
            parent,
            rank,
            order,
            children,
            leaves,
        }
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn len(&self) -> usize {
        self.pre_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pre_order.is_empty()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.rank.get(idx).is_some_and(Option::is_some)
    }

    /// Tree nodes in pre-order, root first.
    pub fn pre_order(&self) -> &[usize] {
        &self.pre_order
    }

    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.parent.get(idx).copied().flatten()
    }

    pub fn rank(&self, idx: usize) -> Option<usize> {
        self.rank.get(idx).copied().flatten()
    }

    /// Position among the nodes of the same rank, counted in pre-order.
    pub fn order(&self, idx: usize) -> Option<usize> {
        self.contains(idx).then(|| self.order[idx])
    }

    pub fn children(&self, idx: usize) -> &[usize] {
        self.children.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of leaves in the subtree rooted at `idx` (1 for a leaf, 0 outside the tree).
    pub fn leaf_count(&self, idx: usize) -> usize {
        self.leaves.get(idx).copied().unwrap_or(0)
    }

    pub fn max_rank(&self) -> usize {
        self.pre_order
            .iter()
            .filter_map(|&v| self.rank[v])
            .max()
            .unwrap_or(0)
    }
}
