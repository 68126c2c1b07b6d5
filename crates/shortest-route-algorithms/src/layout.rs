//! Hierarchical layout by breadth-first leveling
//!
//! Places the chosen root on the top band, each following band one BFS level
//! deeper. Nodes the traversal never reaches share one extra band beneath the
//! deepest level. This keeps every node on screen; it does not imply that the
//! grouped nodes are related.
//!
//! Within a band nodes keep discovery order and are centered horizontally.

use super::common::{GraphView, NodeId};
use super::traversal::{bfs_levels, Traversal};

/// A 2-D coordinate on the rendering surface
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Distance between neighbors on the same level
    pub horizontal_gap: f64,
    /// Distance between consecutive levels
    pub vertical_gap: f64,
    /// y coordinate of the root level
    pub top_margin: f64,
    /// Free space kept left and right of the widest level
    pub side_margin: f64,
    /// Narrowest canvas the layout will center on
    pub min_canvas_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_gap: 100.0,
            vertical_gap: 100.0,
            top_margin: 50.0,
            side_margin: 50.0,
            min_canvas_width: 400.0,
        }
    }
}

/// Result of a layout pass
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutResult {
    /// Root the traversal started from, `None` for an empty view
    pub root: Option<NodeId>,
    /// Nodes per level, top to bottom, each in discovery order
    pub levels: Vec<Vec<NodeId>>,
    /// Level index holding unreached nodes, if any
    pub orphan_level: Option<usize>,
    /// Every node exactly once, in level order
    pub positions: Vec<(NodeId, Position)>,
    /// Width actually used for centering
    pub canvas_width: f64,
}

impl LayoutResult {
    pub fn position(&self, node: NodeId) -> Option<Position> {
        self.positions
            .iter()
            .find(|(id, _)| *id == node)
            .map(|(_, pos)| *pos)
    }

    /// Level index a node was placed on
    pub fn level_of(&self, node: NodeId) -> Option<usize> {
        self.levels.iter().position(|level| level.contains(&node))
    }
}

/// Assign positions to every node of the view.
///
/// `preferred_root` is used when present in the view; otherwise the first
/// node (dense index 0) is the root. `canvas_width` is raised to
/// `config.min_canvas_width` and to the widest level plus side margins.
pub fn hierarchical_layout(
    view: &GraphView,
    preferred_root: Option<NodeId>,
    traversal: Traversal,
    canvas_width: f64,
    config: &LayoutConfig,
) -> LayoutResult {
    if view.node_count == 0 {
        return LayoutResult {
            canvas_width: canvas_width.max(config.min_canvas_width),
            ..LayoutResult::default()
        };
    }

    let root_idx = preferred_root
        .and_then(|id| view.index_of(id))
        .unwrap_or(0);

    let bfs = bfs_levels(view, root_idx, traversal);
    let max_depth = bfs.max_depth().unwrap_or(0);

    let mut level_indices: Vec<Vec<usize>> = vec![Vec::new(); max_depth + 1];
    for &idx in &bfs.order {
        if let Some(d) = bfs.depth[idx] {
            level_indices[d].push(idx);
        }
    }

    let orphans: Vec<usize> = bfs.unreached().collect();
    let orphan_level = if orphans.is_empty() {
        None
    } else {
        level_indices.push(orphans);
        Some(max_depth + 1)
    };

    let widest = level_indices.iter().map(Vec::len).max().unwrap_or(0);
    let content_width = span(widest, config.horizontal_gap) + 2.0 * config.side_margin;
    let width = canvas_width.max(config.min_canvas_width).max(content_width);

    let mut positions = Vec::with_capacity(view.node_count);
    for (level, members) in level_indices.iter().enumerate() {
        let total_width = span(members.len(), config.horizontal_gap);
        let start_x = (width - total_width) / 2.0;
        let y = config.top_margin + level as f64 * config.vertical_gap;

        for (i, &idx) in members.iter().enumerate() {
            let x = start_x + i as f64 * config.horizontal_gap;
            positions.push((view.index_to_node[idx], Position { x, y }));
        }
    }

    let levels = level_indices
        .into_iter()
        .map(|members| members.into_iter().map(|idx| view.index_to_node[idx]).collect())
        .collect();

    LayoutResult {
        root: Some(view.index_to_node[root_idx]),
        levels,
        orphan_level,
        positions,
        canvas_width: width,
    }
}

fn span(count: usize, gap: f64) -> f64 {
    count.saturating_sub(1) as f64 * gap
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chain_with_orphan() -> GraphView {
        // 0->1, 0->2, 2->3, 4 isolated
        GraphView::from_weighted_edges(5, &[(0, 1, 1.0), (0, 2, 1.0), (2, 3, 1.0)])
    }

    #[test]
    fn test_levels_and_orphans() {
        let view = chain_with_orphan();
        let config = LayoutConfig::default();
        let layout = hierarchical_layout(&view, None, Traversal::Outgoing, 800.0, &config);

        assert_eq!(layout.root, Some(0));
        assert_eq!(layout.levels, vec![vec![0], vec![1, 2], vec![3], vec![4]]);
        assert_eq!(layout.orphan_level, Some(3));
        assert_eq!(layout.positions.len(), 5);
        assert_eq!(layout.level_of(4), Some(3));
    }

    #[test]
    fn test_centering() {
        let view = chain_with_orphan();
        let config = LayoutConfig::default();
        let layout = hierarchical_layout(&view, None, Traversal::Outgoing, 800.0, &config);

        assert_eq!(layout.canvas_width, 800.0);
        assert_eq!(layout.position(0), Some(Position { x: 400.0, y: 50.0 }));
        assert_eq!(layout.position(1), Some(Position { x: 350.0, y: 150.0 }));
        assert_eq!(layout.position(2), Some(Position { x: 450.0, y: 150.0 }));
        assert_eq!(layout.position(4), Some(Position { x: 400.0, y: 350.0 }));
    }

    #[test]
    fn test_preferred_root() {
        let view = chain_with_orphan();
        let config = LayoutConfig::default();
        let layout = hierarchical_layout(&view, Some(2), Traversal::Outgoing, 800.0, &config);

        assert_eq!(layout.root, Some(2));
        assert_eq!(layout.levels, vec![vec![2], vec![3], vec![0, 1, 4]]);

        // Unknown root falls back to the first node
        let layout = hierarchical_layout(&view, Some(99), Traversal::Outgoing, 800.0, &config);
        assert_eq!(layout.root, Some(0));
    }

    #[test]
    fn test_canvas_floor() {
        let edges: Vec<_> = (1..10).map(|v| (0, v, 1.0)).collect();
        let view = GraphView::from_weighted_edges(10, &edges);
        let config = LayoutConfig::default();

        // 9 children span 800, plus 2 * 50 margin
        let layout = hierarchical_layout(&view, None, Traversal::Outgoing, 200.0, &config);
        assert_eq!(layout.canvas_width, 900.0);
        assert_eq!(layout.position(1).map(|p| p.x), Some(50.0));

        let single = GraphView::from_weighted_edges(1, &[]);
        let layout = hierarchical_layout(&single, None, Traversal::Outgoing, 10.0, &config);
        assert_eq!(layout.canvas_width, 400.0);
        assert_eq!(layout.position(0), Some(Position { x: 200.0, y: 50.0 }));
        assert_eq!(layout.orphan_level, None);
    }

    #[test]
    fn test_empty_view() {
        let view = GraphView::from_weighted_edges(0, &[]);
        let config = LayoutConfig::default();
        let layout = hierarchical_layout(&view, None, Traversal::Undirected, 600.0, &config);
        assert!(layout.positions.is_empty());
        assert_eq!(layout.root, None);
    }

    proptest! {
        #[test]
        fn every_node_placed_once(
            n in 1usize..12,
            raw in prop::collection::vec((0usize..12, 0usize..12), 0..20),
            undirected in any::<bool>(),
        ) {
            let edges: Vec<_> = raw.into_iter().map(|(u, v)| (u % n, v % n, 1.0)).collect();
            let view = GraphView::from_weighted_edges(n, &edges);
            let traversal = if undirected { Traversal::Undirected } else { Traversal::Outgoing };
            let config = LayoutConfig::default();

            let first = hierarchical_layout(&view, None, traversal, 640.0, &config);
            let second = hierarchical_layout(&view, None, traversal, 640.0, &config);
            prop_assert_eq!(&first, &second);

            let mut seen: Vec<NodeId> = first.positions.iter().map(|(id, _)| *id).collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..n as NodeId).collect::<Vec<_>>());
        }
    }
}
