//! Graph algorithms module
//!
//! Algorithms are implemented in the `shortest-route-algorithms` crate.
//! This module provides the integration/adapter layer: it projects a
//! [`GraphStore`] into a dense [`GraphView`] and maps results back to names.
//!
//! Both entry points read one consistent snapshot of the store. Mutating the
//! store while a result is being computed is not supported.

use crate::graph::{GraphError, GraphResult, GraphStore, NodeName};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shortest_route_algorithms::{GraphView, NodeId as AlgoNodeId};
use std::collections::HashMap;
use tracing::debug;

// Re-export algorithms
pub use shortest_route_algorithms::{
    bfs_levels, dijkstra, hierarchical_layout, shortest_path_tree, BfsLevels, LayoutConfig,
    LayoutResult, PathResult, Position, ShortestPathTree, Traversal,
};

/// Build a GraphView from the store for algorithm execution
///
/// Dense indices (and NodeIds) follow the store's insertion order. Tie-break
/// ranks follow label order, so equal-distance candidates settle alphabetically.
pub fn build_view(store: &GraphStore) -> GraphView {
    let node_count = store.node_count();

    let index_to_node: Vec<AlgoNodeId> = (0..node_count as AlgoNodeId).collect();
    let node_to_index: HashMap<AlgoNodeId, usize> = index_to_node
        .iter()
        .enumerate()
        .map(|(idx, &id)| (id, idx))
        .collect();

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut weights: Vec<Vec<f64>> = vec![Vec::new(); node_count];

    for (u_idx, name) in store.nodes().enumerate() {
        let Ok(neighbors) = store.neighbors(name.as_str()) else {
            continue;
        };
        for (neighbor, &w) in neighbors {
            if let Some(v_idx) = store.node_index(neighbor.as_str()) {
                outgoing[u_idx].push(v_idx);
                incoming[v_idx].push(u_idx);
                weights[u_idx].push(w);
            }
        }
    }

    let mut by_label: Vec<(&NodeName, usize)> = store.nodes().zip(0..).collect();
    by_label.sort();
    let mut tie_rank = vec![0; node_count];
    for (rank, (_, idx)) in by_label.into_iter().enumerate() {
        tie_rank[idx] = rank;
    }

    GraphView::from_adjacency_list(
        node_count,
        index_to_node,
        node_to_index,
        outgoing,
        incoming,
        Some(weights),
    )
    .with_tie_rank(tie_rank)
}

/// A shortest route between two named nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Total weight, `f64::INFINITY` when unreachable
    pub distance: f64,
    /// Nodes from origin to destination, empty when unreachable
    pub path: Vec<NodeName>,
}

impl Route {
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite() && !self.path.is_empty()
    }

    /// Consecutive (from, to) pairs along the path, for highlighting
    pub fn segments(&self) -> Vec<(NodeName, NodeName)> {
        self.path
            .windows(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect()
    }
}

/// Node coordinates for rendering
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphLayout {
    pub root: Option<NodeName>,
    /// Node names per level, top to bottom
    pub levels: Vec<Vec<NodeName>>,
    /// Index into `levels` of the band holding unreached nodes
    pub orphan_level: Option<usize>,
    pub positions: IndexMap<NodeName, Position>,
    pub canvas_width: f64,
}

/// Shortest path between two named nodes
pub fn shortest_path(store: &GraphStore, source: &str, target: &str) -> GraphResult<Route> {
    let source_idx = lookup(store, source)?;
    let target_idx = lookup(store, target)?;

    let view = build_view(store);
    let result = dijkstra(&view, source_idx as AlgoNodeId, target_idx as AlgoNodeId)
        .ok_or_else(|| GraphError::NodeNotFound(source.to_string()))?;

    let path = result
        .path
        .iter()
        .map(|&id| name_of(store, id))
        .collect::<GraphResult<Vec<_>>>()?;

    debug!(
        "Shortest path {} -> {}: cost {}, {} hops",
        source,
        target,
        result.cost,
        result.hops()
    );

    Ok(Route {
        distance: result.cost,
        path,
    })
}

/// Hierarchical layout of every node in the store
pub fn layout(
    store: &GraphStore,
    preferred_root: Option<&str>,
    canvas_width: f64,
    config: &LayoutConfig,
) -> GraphResult<GraphLayout> {
    let view = build_view(store);
    let root = preferred_root
        .and_then(|name| store.node_index(name))
        .map(|idx| idx as AlgoNodeId);
    let traversal = if store.directed() {
        Traversal::Outgoing
    } else {
        Traversal::Undirected
    };

    let result = hierarchical_layout(&view, root, traversal, canvas_width, config);

    let levels = result
        .levels
        .iter()
        .map(|level| level.iter().map(|&id| name_of(store, id)).collect())
        .collect::<GraphResult<Vec<Vec<_>>>>()?;

    let mut positions = IndexMap::with_capacity(result.positions.len());
    for &(id, position) in &result.positions {
        positions.insert(name_of(store, id)?, position);
    }

    Ok(GraphLayout {
        root: result.root.map(|id| name_of(store, id)).transpose()?,
        levels,
        orphan_level: result.orphan_level,
        positions,
        canvas_width: result.canvas_width,
    })
}

fn lookup(store: &GraphStore, name: &str) -> GraphResult<usize> {
    store
        .node_index(name.trim())
        .ok_or_else(|| GraphError::NodeNotFound(name.to_string()))
}

fn name_of(store: &GraphStore, id: AlgoNodeId) -> GraphResult<NodeName> {
    store
        .node_at(id as usize)
        .cloned()
        .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
}
