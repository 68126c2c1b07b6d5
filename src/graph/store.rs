//! In-memory adjacency storage
//!
//! Nodes map to their neighbor maps, both kept in insertion order so every
//! enumeration (and everything computed from one) is reproducible.
//!
//! Undirected graphs store each edge in both directions; only the methods on
//! [`GraphStore`] mutate the maps, which keeps the two entries equal.

use super::types::{EdgeWeight, NodeName};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(String),

    #[error("Invalid node name {0:?}: must not be empty")]
    InvalidNodeName(String),

    #[error("Invalid weight {input:?}: {reason}")]
    InvalidWeight { input: String, reason: &'static str },
}

impl GraphError {
    /// True for malformed input the caller should prompt for again
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GraphError::InvalidNodeName(_) | GraphError::InvalidWeight { .. }
        )
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// One logical edge, as enumerated by [`GraphStore::edges`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub origin: NodeName,
    pub destination: NodeName,
    pub weight: f64,
}

/// Weighted graph, directed or undirected
///
/// Every method taking a node name trims it first, the same way
/// [`NodeName::new`] does on insertion.
#[derive(Debug, Clone)]
pub struct GraphStore {
    /// Fixed at construction
    directed: bool,

    /// Node -> (neighbor -> weight)
    adjacency: IndexMap<NodeName, IndexMap<NodeName, f64>>,
}

impl GraphStore {
    /// Create a new empty graph
    pub fn new(directed: bool) -> Self {
        GraphStore {
            directed,
            adjacency: IndexMap::new(),
        }
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    /// Insert `name` with no neighbors. Returns false if it already existed.
    pub fn add_node(&mut self, name: &str) -> GraphResult<bool> {
        let name = NodeName::new(name)?;
        Ok(self.insert_node(name))
    }

    fn insert_node(&mut self, name: NodeName) -> bool {
        if self.adjacency.contains_key(&name) {
            return false;
        }
        debug!("Added node {}", name);
        self.adjacency.insert(name, IndexMap::new());
        true
    }

    /// Set the weight of `origin -> destination`, creating missing endpoints.
    ///
    /// Re-adding an existing edge overwrites its weight. Undirected graphs
    /// also set `destination -> origin`.
    pub fn add_edge(
        &mut self,
        origin: &str,
        destination: &str,
        weight: EdgeWeight,
    ) -> GraphResult<()> {
        // Validate both names before touching the maps
        let origin = NodeName::new(origin)?;
        let destination = NodeName::new(destination)?;

        if weight.is_negative() {
            warn!(
                "Edge {} -> {} has negative weight {}; shortest paths may be inaccurate",
                origin, destination, weight
            );
        }

        self.insert_node(origin.clone());
        self.insert_node(destination.clone());

        let w = weight.value();
        if let Some(neighbors) = self.adjacency.get_mut(&origin) {
            neighbors.insert(destination.clone(), w);
        }
        if !self.directed {
            if let Some(neighbors) = self.adjacency.get_mut(&destination) {
                neighbors.insert(origin.clone(), w);
            }
        }

        debug!("Set edge {} -> {} = {}", origin, destination, w);
        Ok(())
    }

    /// Outgoing neighbors (incident neighbors when undirected) with weights
    pub fn neighbors(&self, node: &str) -> GraphResult<&IndexMap<NodeName, f64>> {
        self.adjacency
            .get(node.trim())
            .ok_or_else(|| GraphError::NodeNotFound(node.to_string()))
    }

    /// Weight of `origin -> destination`, if that edge exists
    pub fn weight(&self, origin: &str, destination: &str) -> Option<f64> {
        self.adjacency
            .get(origin.trim())?
            .get(destination.trim())
            .copied()
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.adjacency.contains_key(node.trim())
    }

    /// Position of a node in insertion order
    pub fn node_index(&self, node: &str) -> Option<usize> {
        self.adjacency.get_index_of(node.trim())
    }

    /// Node at an insertion-order position
    pub fn node_at(&self, index: usize) -> Option<&NodeName> {
        self.adjacency.get_index(index).map(|(name, _)| name)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeName> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of logical edges; an undirected pair counts once
    pub fn edge_count(&self) -> usize {
        if self.directed {
            self.adjacency.values().map(IndexMap::len).sum()
        } else {
            self.logical_edges().count()
        }
    }

    /// All logical edges in insertion order of their origin.
    ///
    /// An undirected pair is reported once, with the earlier-inserted
    /// endpoint as origin.
    pub fn edges(&self) -> Vec<EdgeRecord> {
        self.logical_edges()
            .map(|(origin, destination, weight)| EdgeRecord {
                origin: origin.clone(),
                destination: destination.clone(),
                weight,
            })
            .collect()
    }

    fn logical_edges(&self) -> impl Iterator<Item = (&NodeName, &NodeName, f64)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(move |(u_idx, (origin, neighbors))| {
                neighbors
                    .iter()
                    .filter(move |(destination, _)| {
                        self.directed
                            || self
                                .adjacency
                                .get_index_of(destination.as_str())
                                .map_or(false, |v_idx| u_idx <= v_idx)
                    })
                    .map(move |(destination, &weight)| (origin, destination, weight))
            })
    }

    /// Remove the edge `origin -> destination` (both directions when
    /// undirected). Returns whether an edge was removed.
    pub fn remove_edge(&mut self, origin: &str, destination: &str) -> GraphResult<bool> {
        for node in [origin, destination] {
            if !self.contains_node(node) {
                return Err(GraphError::NodeNotFound(node.to_string()));
            }
        }

        let (origin, destination) = (origin.trim(), destination.trim());
        let mut removed = self
            .adjacency
            .get_mut(origin)
            .and_then(|neighbors| neighbors.shift_remove(destination))
            .is_some();
        if !self.directed {
            removed |= self
                .adjacency
                .get_mut(destination)
                .and_then(|neighbors| neighbors.shift_remove(origin))
                .is_some();
        }

        if removed {
            debug!("Removed edge {} -> {}", origin, destination);
        }
        Ok(removed)
    }

    /// Remove a node and every edge touching it, incoming edges included
    pub fn remove_node(&mut self, node: &str) -> GraphResult<()> {
        let name = node.trim();
        if self.adjacency.shift_remove(name).is_none() {
            return Err(GraphError::NodeNotFound(node.to_string()));
        }

        for neighbors in self.adjacency.values_mut() {
            neighbors.shift_remove(name);
        }

        debug!("Removed node {}", name);
        Ok(())
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Display for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, neighbors) in &self.adjacency {
            write!(f, "{} -> {{", node)?;
            for (i, (neighbor, weight)) in neighbors.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", neighbor, weight)?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}
