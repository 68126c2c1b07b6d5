//! Weighted graph model
//!
//! This module implements the editable graph the planner works on:
//! - Unique, validated node labels
//! - Weighted edges, one per ordered pair, overwritten on re-insertion
//! - Directed or undirected storage, chosen at construction

pub mod store;
pub mod types;

// Re-export main types
pub use store::{EdgeRecord, GraphError, GraphResult, GraphStore};
pub use types::{EdgeWeight, NodeName};
