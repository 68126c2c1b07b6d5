//! Pathfinding algorithms
//!
//! Single-source shortest paths with Dijkstra's algorithm over a binary heap.
//! Superseded heap entries are not removed; they are skipped when popped.

use super::common::{GraphView, NodeId};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Result of a pathfinding algorithm
///
/// An unreachable target is a normal result: `cost` is `f64::INFINITY` and
/// `path` is empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: f64,
}

impl PathResult {
    /// The "no path" result for a source/target pair
    pub fn unreachable(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            path: Vec::new(),
            cost: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite() && !self.path.is_empty()
    }

    /// Number of edges along the path
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Distances and predecessors from one source to every node of a view
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    /// Dense index of the source
    pub source: usize,
    /// Best known distance per dense index (`INFINITY` if unreached)
    pub dist: Vec<f64>,
    /// Predecessor on the best path per dense index
    pub parent: Vec<Option<usize>>,
}

impl ShortestPathTree {
    pub fn distance(&self, idx: usize) -> f64 {
        self.dist[idx]
    }

    pub fn is_reached(&self, idx: usize) -> bool {
        self.dist[idx].is_finite()
    }

    /// Walk predecessors back from `target` and return the source→target
    /// index sequence. Returns `None` when the chain does not end at the source.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut curr = Some(target);
        while let Some(idx) = curr {
            path.push(idx);
            if path.len() > self.parent.len() {
                // Predecessor chains are acyclic; bail out rather than spin.
                return None;
            }
            curr = self.parent[idx];
        }

        if path.last() != Some(&self.source) {
            return None;
        }

        path.reverse();
        Some(path)
    }
}

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    rank: usize,
    node_idx: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare costs reversed for min-heap, then the lower rank first
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the full shortest-path tree from `source` (a dense index).
///
/// Runs until the queue is exhausted. Uses edge weights from GraphView if
/// available, otherwise assumes 1.0.
///
/// A node settled once may be reopened when a negative edge later lowers its
/// distance. Each node accepts at most `in_degree * node_count` improvements,
/// which bounds the work on negative cycles; with non-negative weights a node
/// improves at most once per incoming edge, so the bound is never reached.
/// Results on graphs with negative weights are best effort: a predecessor
/// chain that loops is reported as unreachable by [`ShortestPathTree::path_to`].
///
/// A distance that overflows `f64` is not finite and counts as unreached.
pub fn shortest_path_tree(view: &GraphView, source: usize) -> ShortestPathTree {
    let n = view.node_count;
    let mut dist = vec![f64::INFINITY; n];
    let mut parent = vec![None; n];
    let mut improvements = vec![0usize; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(State {
        cost: 0.0,
        rank: view.tie_rank[source],
        node_idx: source,
    });

    while let Some(State { cost, node_idx, .. }) = heap.pop() {
        if cost > dist[node_idx] {
            continue;
        }

        for (i, &next_idx) in view.successors(node_idx).iter().enumerate() {
            let next_cost = cost + view.edge_weight(node_idx, i);

            if !next_cost.is_finite() || next_cost >= dist[next_idx] {
                continue;
            }
            if improvements[next_idx] >= view.in_degree(next_idx) * n {
                continue;
            }

            improvements[next_idx] += 1;
            dist[next_idx] = next_cost;
            parent[next_idx] = Some(node_idx);
            heap.push(State {
                cost: next_cost,
                rank: view.tie_rank[next_idx],
                node_idx: next_idx,
            });
        }
    }

    ShortestPathTree {
        source,
        dist,
        parent,
    }
}

/// Dijkstra's Algorithm (Weighted Shortest Path)
///
/// Returns `None` if either node is absent from the view. An unreachable
/// target yields [`PathResult::unreachable`].
pub fn dijkstra(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = view.index_of(source)?;
    let target_idx = view.index_of(target)?;

    if source_idx == target_idx {
        return Some(PathResult {
            source,
            target,
            path: vec![source],
            cost: 0.0,
        });
    }

    let tree = shortest_path_tree(view, source_idx);

    if !tree.is_reached(target_idx) {
        return Some(PathResult::unreachable(source, target));
    }

    let result = match tree.path_to(target_idx) {
        Some(indices) => PathResult {
            source,
            target,
            path: indices.into_iter().map(|idx| view.index_to_node[idx]).collect(),
            cost: tree.distance(target_idx),
        },
        None => PathResult::unreachable(source, target),
    };

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dijkstra() {
        // 0->1 (10.0), 1->2 (5.0), 0->2 (50.0)
        let view = GraphView::from_weighted_edges(3, &[(0, 1, 10.0), (0, 2, 50.0), (1, 2, 5.0)]);

        let result = dijkstra(&view, 0, 2).unwrap();
        assert_eq!(result.path, vec![0, 1, 2]);
        assert_eq!(result.cost, 15.0);
        assert_eq!(result.hops(), 2);
    }

    #[test]
    fn test_dijkstra_unreachable() {
        // 0->1, 2 isolated
        let view = GraphView::from_weighted_edges(3, &[(0, 1, 1.0)]);

        let result = dijkstra(&view, 1, 0).unwrap();
        assert!(!result.is_reachable());
        assert!(result.path.is_empty());
        assert_eq!(result.cost, f64::INFINITY);

        let result = dijkstra(&view, 0, 2).unwrap();
        assert!(!result.is_reachable());
    }

    #[test]
    fn test_dijkstra_same_node() {
        let view = GraphView::from_weighted_edges(2, &[(0, 1, 3.0)]);
        let result = dijkstra(&view, 1, 1).unwrap();
        assert_eq!(result.path, vec![1]);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_dijkstra_missing_node() {
        let view = GraphView::from_weighted_edges(2, &[(0, 1, 3.0)]);
        assert!(dijkstra(&view, 0, 7).is_none());
        assert!(dijkstra(&view, 7, 0).is_none());
    }

    #[test]
    fn test_stale_entries_are_skipped() {
        // 0->2 is pushed at 10 first, then improved to 2 via 1.
        let view = GraphView::from_weighted_edges(
            4,
            &[(0, 2, 10.0), (0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)],
        );

        let tree = shortest_path_tree(&view, 0);
        assert_eq!(tree.dist, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(tree.parent, vec![None, Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_tie_rank_breaks_equal_distances() {
        // Two equal-cost routes to 3: via 1 and via 2.
        let edges = [(0, 1, 1.0), (0, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)];

        let view = GraphView::from_weighted_edges(4, &edges);
        assert_eq!(dijkstra(&view, 0, 3).unwrap().path, vec![0, 1, 3]);

        // Rank node 2 ahead of node 1: it is settled first and claims 3.
        let view = GraphView::from_weighted_edges(4, &edges).with_tie_rank(vec![0, 2, 1, 3]);
        assert_eq!(dijkstra(&view, 0, 3).unwrap().path, vec![0, 2, 3]);
    }

    #[test]
    fn test_negative_edge_reopens_settled_node() {
        // 1 is settled at 2 before 0->2->1 lowers it to 1.
        let view = GraphView::from_weighted_edges(3, &[(0, 1, 2.0), (0, 2, 5.0), (2, 1, -4.0)]);

        let result = dijkstra(&view, 0, 1).unwrap();
        assert_eq!(result.path, vec![0, 2, 1]);
        assert_eq!(result.cost, 1.0);

        let view = GraphView::from_weighted_edges(2, &[(0, 1, -1.0)]);
        let result = dijkstra(&view, 0, 1).unwrap();
        assert_eq!(result.path, vec![0, 1]);
        assert_eq!(result.cost, -1.0);
    }

    #[test]
    fn test_negative_cycle_terminates() {
        // Symmetric negative edge between 1 and 2 is a negative 2-cycle.
        let view = GraphView::from_weighted_edges(
            3,
            &[(0, 1, 2.0), (1, 0, 2.0), (1, 2, -1.0), (2, 1, -1.0)],
        );

        let tree = shortest_path_tree(&view, 0);
        assert_eq!(tree.path_to(2), None);

        assert!(!dijkstra(&view, 0, 2).unwrap().is_reachable());
        assert!(!dijkstra(&view, 0, 1).unwrap().is_reachable());
    }

    #[test]
    fn test_overflowing_distance_is_unreached() {
        let view = GraphView::from_weighted_edges(3, &[(0, 1, 1e308), (1, 2, 1e308)]);

        let tree = shortest_path_tree(&view, 0);
        assert_eq!(tree.distance(1), 1e308);
        assert!(!tree.is_reached(2));
        assert_eq!(tree.parent[2], None);

        let result = dijkstra(&view, 0, 2).unwrap();
        assert!(!result.is_reachable());
        assert!(result.path.is_empty());
    }

    #[test]
    fn test_path_to_rejects_foreign_root() {
        let tree = ShortestPathTree {
            source: 0,
            dist: vec![0.0, f64::INFINITY, f64::INFINITY],
            parent: vec![None, None, Some(1)],
        };
        assert_eq!(tree.path_to(2), None);
        assert_eq!(tree.path_to(0), Some(vec![0]));
    }

    /// Exhaustive minimum over simple paths, for cross-checking.
    fn brute_force(n: usize, edges: &[(usize, usize, f64)], s: usize, t: usize) -> f64 {
        fn walk(
            at: usize,
            t: usize,
            cost: f64,
            visited: &mut Vec<bool>,
            adj: &[Vec<(usize, f64)>],
            best: &mut f64,
        ) {
            if at == t {
                *best = best.min(cost);
                return;
            }
            for &(next, w) in &adj[at] {
                if !visited[next] {
                    visited[next] = true;
                    walk(next, t, cost + w, visited, adj, best);
                    visited[next] = false;
                }
            }
        }

        let mut adj = vec![Vec::new(); n];
        for &(u, v, w) in edges {
            adj[u].push((v, w));
        }
        let mut visited = vec![false; n];
        visited[s] = true;
        let mut best = f64::INFINITY;
        walk(s, t, 0.0, &mut visited, &adj, &mut best);
        best
    }

    fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, f64)>)> {
        (1usize..7).prop_flat_map(|n| {
            let edge = (0..n, 0..n, 0u32..20).prop_map(|(u, v, w)| (u, v, w as f64));
            (Just(n), prop::collection::vec(edge, 0..18))
        })
    }

    proptest! {
        #[test]
        fn dijkstra_matches_brute_force((n, edges) in arb_graph(), s in 0usize..7, t in 0usize..7) {
            let s = s % n;
            let t = t % n;
            let view = GraphView::from_weighted_edges(n, &edges);
            let result = dijkstra(&view, s as NodeId, t as NodeId).unwrap();
            let expected = brute_force(n, &edges, s, t);

            prop_assert_eq!(result.cost, expected);

            if result.is_reachable() {
                prop_assert_eq!(result.path.first().copied(), Some(s as NodeId));
                prop_assert_eq!(result.path.last().copied(), Some(t as NodeId));

                // The reported cost is the sum of the cheapest edge per hop.
                let mut sum = 0.0;
                for pair in result.path.windows(2) {
                    let (u, v) = (pair[0] as usize, pair[1] as usize);
                    let w = edges
                        .iter()
                        .filter(|&&(a, b, _)| a == u && b == v)
                        .map(|&(_, _, w)| w)
                        .fold(f64::INFINITY, f64::min);
                    sum += w;
                }
                prop_assert_eq!(sum, result.cost);
            } else {
                prop_assert!(result.path.is_empty());
            }
        }
    }
}
