//! Breadth-first leveling

use super::common::GraphView;
use std::collections::VecDeque;

/// Which edges a traversal may follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Traversal {
    /// Follow edges from source to target only
    Outgoing,
    /// Follow edges in both directions
    Undirected,
}

/// Depth of every node reached from a root, plus discovery order
#[derive(Debug, Clone, PartialEq)]
pub struct BfsLevels {
    /// Depth per dense index, `None` if not reached
    pub depth: Vec<Option<usize>>,
    /// Dense indices in the order they were discovered (root first)
    pub order: Vec<usize>,
}

impl BfsLevels {
    pub fn max_depth(&self) -> Option<usize> {
        self.depth.iter().flatten().copied().max()
    }

    /// Indices never reached from the root, in index order
    pub fn unreached(&self) -> impl Iterator<Item = usize> + '_ {
        self.depth
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_none())
            .map(|(idx, _)| idx)
    }
}

/// Breadth-first traversal from `root` assigning `depth(child) = depth(parent) + 1`.
///
/// Neighbors are visited successors first, then (for [`Traversal::Undirected`])
/// predecessors, each in view order. The visited set breaks cycles.
pub fn bfs_levels(view: &GraphView, root: usize, traversal: Traversal) -> BfsLevels {
    let mut depth = vec![None; view.node_count];
    let mut order = Vec::with_capacity(view.node_count);
    let mut queue = VecDeque::new();

    depth[root] = Some(0);
    order.push(root);
    queue.push_back((root, 0usize));

    while let Some((current_idx, d)) = queue.pop_front() {
        let incoming: &[usize] = match traversal {
            Traversal::Outgoing => &[],
            Traversal::Undirected => view.predecessors(current_idx),
        };

        for &next_idx in view.successors(current_idx).iter().chain(incoming) {
            if depth[next_idx].is_none() {
                depth[next_idx] = Some(d + 1);
                order.push(next_idx);
                queue.push_back((next_idx, d + 1));
            }
        }
    }

    BfsLevels { depth, order }
}
