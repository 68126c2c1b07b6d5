//! Shortest Route
//!
//! Core of an interactive shortest-route planner: a hand-built weighted graph,
//! Dijkstra shortest paths between two chosen nodes, and a deterministic
//! breadth-first layout for drawing the graph.
//!
//! # Architecture
//!
//! - [`graph`]: the [`GraphStore`] adjacency model and its validated value types
//! - [`algo`]: adapters projecting the store into the `shortest-route-algorithms` view
//! - [`session`]: the [`RouteSession`] context object a front end drives
//!
//! The algorithms only read the store. Layouts are recomputed on request,
//! never updated in place.
//!
//! ## Example Usage
//!
//! ```rust
//! use shortest_route::{RouteSession, SessionConfig};
//!
//! let mut session = RouteSession::new(SessionConfig::default());
//! session.add_edge("A", "B", 1.0).unwrap();
//! session.add_edge("B", "C", 2.0).unwrap();
//! session.add_edge("A", "C", 5.0).unwrap();
//! session.add_edge_text("C", "D", "1").unwrap();
//!
//! let route = session.shortest_path("A", "D").unwrap();
//! assert_eq!(route.distance, 4.0);
//! assert_eq!(route.path.len(), 4);
//!
//! let layout = session.layout(Some("A"), 800.0).unwrap();
//! assert_eq!(layout.positions.len(), 4);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod session;

// Re-export main types for convenience
pub use graph::{EdgeRecord, EdgeWeight, GraphError, GraphResult, GraphStore, NodeName};

pub use algo::{GraphLayout, LayoutConfig, Position, Route};

pub use session::{RouteSession, SessionConfig};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
