//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Dense indices follow the order in which the caller supplied the nodes, so
/// any traversal that walks indices in order is reproducible for identical input.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Option<Vec<f64>>,

    /// Tie-break rank per dense index. Lower rank wins when two queue entries
    /// carry the same distance. Identity unless the caller supplies one.
    pub tie_rank: Vec<usize>,
}

impl GraphView {
    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Get weights for outgoing edges of a node
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| {
            let start = self.out_offsets[idx];
            let end = self.out_offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Weight of the `i`-th outgoing edge of `idx`, 1.0 for unweighted views
    pub fn edge_weight(&self, idx: usize, i: usize) -> f64 {
        self.weights(idx).map(|w| w[i]).unwrap_or(1.0)
    }

    /// Dense index of a NodeId, if present in the view
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.node_to_index.get(&node).copied()
    }

    /// Replace the tie-break ranks. `rank` must have one entry per node.
    pub fn with_tie_rank(mut self, rank: Vec<usize>) -> Self {
        debug_assert_eq!(rank.len(), self.node_count);
        self.tie_rank = rank;
        self
    }

    /// Helper to create GraphView from adjacency lists
    pub fn from_adjacency_list(
        node_count: usize,
        index_to_node: Vec<NodeId>,
        node_to_index: HashMap<NodeId, usize>,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
        weights: Option<Vec<Vec<f64>>>,
    ) -> Self {
        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();
        let mut flat_weights = if weights.is_some() { Some(Vec::new()) } else { None };

        out_offsets.push(0);
        for (i, neighbors) in outgoing.into_iter().enumerate() {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());

            if let Some(ref mut w_flat) = flat_weights {
                if let Some(w_row) = weights.as_ref().map(|w| &w[i]) {
                    w_flat.extend(w_row.iter());
                }
            }
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            weights: flat_weights,
            tie_rank: (0..node_count).collect(),
        }
    }

    /// Build a weighted view over nodes `0..node_count` (NodeId == index)
    /// from `(source, target, weight)` triples, kept in the given order.
    pub fn from_weighted_edges(node_count: usize, edges: &[(usize, usize, f64)]) -> Self {
        let index_to_node: Vec<NodeId> = (0..node_count as NodeId).collect();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut outgoing = vec![Vec::new(); node_count];
        let mut incoming = vec![Vec::new(); node_count];
        let mut weights = vec![Vec::new(); node_count];

        for &(u, v, w) in edges {
            outgoing[u].push(v);
            incoming[v].push(u);
            weights[u].push(w);
        }

        Self::from_adjacency_list(
            node_count,
            index_to_node,
            node_to_index,
            outgoing,
            incoming,
            Some(weights),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csr_projection() {
        // 0 -> 1 (2.0), 0 -> 2 (3.0), 1 -> 2 (4.0)
        let view = GraphView::from_weighted_edges(3, &[(0, 1, 2.0), (0, 2, 3.0), (1, 2, 4.0)]);

        assert_eq!(view.node_count, 3);
        assert_eq!(view.successors(0), &[1, 2]);
        assert_eq!(view.predecessors(2), &[0, 1]);
        assert_eq!(view.weights(0), Some(&[2.0, 3.0][..]));
        assert_eq!(view.edge_weight(1, 0), 4.0);
        assert_eq!(view.in_degree(0), 0);
        assert_eq!(view.in_degree(2), 2);
        assert_eq!(view.tie_rank, vec![0, 1, 2]);
    }

    #[test]
    fn test_unweighted_defaults_to_one() {
        let mut node_to_index = HashMap::new();
        node_to_index.insert(10, 0);
        node_to_index.insert(20, 1);
        let view = GraphView::from_adjacency_list(
            2,
            vec![10, 20],
            node_to_index,
            vec![vec![1], vec![]],
            vec![vec![], vec![0]],
            None,
        );

        assert_eq!(view.edge_weight(0, 0), 1.0);
        assert_eq!(view.index_of(20), Some(1));
        assert_eq!(view.index_of(30), None);
    }
}
