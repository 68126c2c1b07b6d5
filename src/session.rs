//! Route planning session
//!
//! A [`RouteSession`] is the context object a front end owns for its whole
//! lifetime. It holds the one graph being edited and forwards every user
//! action to the store and the algorithms. Calls are synchronous and must not
//! interleave: a caller sharing a session between threads wraps it in a lock,
//! since each mutation is a critical section.

use crate::algo::{self, GraphLayout, LayoutConfig, Route};
use crate::graph::{EdgeRecord, EdgeWeight, GraphError, GraphResult, GraphStore, NodeName};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Whether edges are one-way. Fixed for the life of the session.
    pub directed: bool,
    /// Spacing used by [`RouteSession::layout`]
    pub layout: LayoutConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            directed: true,
            layout: LayoutConfig::default(),
        }
    }
}

/// One editable graph plus the settings to query it with
#[derive(Debug, Clone)]
pub struct RouteSession {
    store: GraphStore,
    config: SessionConfig,
    /// Root used by [`RouteSession::layout`] when the call names none
    preferred_root: Option<NodeName>,
}

impl Default for RouteSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl RouteSession {
    pub fn new(config: SessionConfig) -> Self {
        info!(
            "Starting {} route session",
            if config.directed { "directed" } else { "undirected" }
        );
        Self {
            store: GraphStore::new(config.directed),
            config,
            preferred_root: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only access to the underlying graph
    pub fn graph(&self) -> &GraphStore {
        &self.store
    }

    /// Add a node; adding an existing name is a no-op
    pub fn add_node(&mut self, name: &str) -> GraphResult<()> {
        if self.store.add_node(name)? {
            info!("Added node {}", name.trim());
        }
        Ok(())
    }

    /// Add or overwrite an edge with a numeric weight
    pub fn add_edge(&mut self, origin: &str, destination: &str, weight: f64) -> GraphResult<()> {
        let weight = EdgeWeight::try_from(weight)?;
        self.store.add_edge(origin, destination, weight)?;
        info!("Added edge {} -> {} ({})", origin.trim(), destination.trim(), weight);
        Ok(())
    }

    /// Add or overwrite an edge whose weight is still user-typed text.
    ///
    /// Nothing is stored unless the text parses to a finite number.
    pub fn add_edge_text(
        &mut self,
        origin: &str,
        destination: &str,
        weight: &str,
    ) -> GraphResult<()> {
        let weight: EdgeWeight = weight.parse()?;
        self.store.add_edge(origin, destination, weight)?;
        info!("Added edge {} -> {} ({})", origin.trim(), destination.trim(), weight);
        Ok(())
    }

    /// Remove an edge. Returns whether one existed.
    pub fn remove_edge(&mut self, origin: &str, destination: &str) -> GraphResult<bool> {
        self.store.remove_edge(origin, destination)
    }

    /// Remove a node together with its edges
    pub fn remove_node(&mut self, name: &str) -> GraphResult<()> {
        self.store.remove_node(name)?;
        if self.layout_root().map(NodeName::as_str) == Some(name.trim()) {
            self.preferred_root = None;
        }
        info!("Removed node {}", name.trim());
        Ok(())
    }

    /// Remember the node later layouts start from; `None` forgets it.
    ///
    /// The node must exist. Removing it clears the setting.
    pub fn set_layout_root(&mut self, name: Option<&str>) -> GraphResult<()> {
        self.preferred_root = match name {
            Some(name) => {
                let idx = self
                    .store
                    .node_index(name)
                    .ok_or_else(|| GraphError::NodeNotFound(name.to_string()))?;
                self.store.node_at(idx).cloned()
            }
            None => None,
        };
        info!(
            "Layout root set to {}",
            self.preferred_root.as_ref().map_or("(first node)", NodeName::as_str)
        );
        Ok(())
    }

    pub fn layout_root(&self) -> Option<&NodeName> {
        self.preferred_root.as_ref()
    }

    /// Shortest route between two existing nodes
    pub fn shortest_path(&self, origin: &str, destination: &str) -> GraphResult<Route> {
        let route = algo::shortest_path(&self.store, origin, destination)?;
        if route.is_reachable() {
            info!(
                "Route {} -> {}: distance {}",
                origin, destination, route.distance
            );
        } else {
            info!("No route from {} to {}", origin, destination);
        }
        Ok(route)
    }

    /// Positions for every node, recomputed from scratch on each call.
    ///
    /// `preferred_root` overrides the remembered layout root for this call.
    pub fn layout(
        &self,
        preferred_root: Option<&str>,
        canvas_width: f64,
    ) -> GraphResult<GraphLayout> {
        let root = preferred_root.or_else(|| self.layout_root().map(NodeName::as_str));
        algo::layout(&self.store, root, canvas_width, &self.config.layout)
    }

    /// Node names in insertion order, for selection lists
    pub fn nodes(&self) -> Vec<NodeName> {
        self.store.nodes().cloned().collect()
    }

    /// Logical edges in insertion order, for drawing
    pub fn edges(&self) -> Vec<EdgeRecord> {
        self.store.edges()
    }
}
