//! Graph algorithms for interactive route planning
//!
//! Every algorithm reads a [`GraphView`] snapshot and never mutates it.

pub mod common;
pub mod pathfinding;
pub mod traversal;
pub mod layout;

pub use common::{GraphView, NodeId};
pub use pathfinding::{dijkstra, shortest_path_tree, PathResult, ShortestPathTree};
pub use traversal::{bfs_levels, BfsLevels, Traversal};
pub use layout::{hierarchical_layout, LayoutConfig, LayoutResult, Position};
