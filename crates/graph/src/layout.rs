use crate::config::LayoutConfig;
use crate::graph::Adjacency;
use crate::types::{Node, Position};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Bounding box of a finished layout, padding included
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Layered layout: one row per depth, rows centered on a shared axis
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compute a position for every node
    ///
    /// Nodes missing from `depths` go to the level after the deepest one.
    pub fn layout(
        &self,
        nodes: &[Node],
        depths: &HashMap<String, usize>,
        adjacency: &Adjacency,
    ) -> HashMap<String, Position> {
        let spill = depths.values().copied().max().map_or(0, |max| max + 1);

        let mut levels: BTreeMap<usize, Vec<&Node>> = BTreeMap::new();
        for node in nodes {
            let depth = depths.get(&node.id).copied().unwrap_or(spill);
            levels.entry(depth).or_default().push(node);
        }

        // Most connected first; stable sort keeps input order on ties
        for row in levels.values_mut() {
            row.sort_by(|a, b| {
                adjacency
                    .total_degree(&b.id)
                    .cmp(&adjacency.total_degree(&a.id))
            });
        }

        let max_width = levels
            .values()
            .map(|row| self.row_width(row.len()))
            .fold(0.0, f64::max);

        let mut positions = HashMap::with_capacity(nodes.len());
        for (&depth, row) in &levels {
            let offset = self.config.padding + (max_width - self.row_width(row.len())) / 2.0;
            let y = self.config.padding + depth as f64 * self.config.row_step();
            for (i, node) in row.iter().enumerate() {
                let x = offset + i as f64 * self.config.column_step();
                positions.insert(node.id.clone(), Position { x, y });
            }
        }

        log::debug!(
            "Laid out {} nodes on {} levels, widest row {:.0}px",
            positions.len(),
            levels.len(),
            max_width
        );

        positions
    }

    /// Total width of a row holding `count` nodes
    pub fn row_width(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        count as f64 * self.config.node_width + (count - 1) as f64 * self.config.horizontal_gap
    }

    /// Canvas needed to draw the given positions with padding on every side
    pub fn canvas_size<'a>(&self, positions: impl IntoIterator<Item = &'a Position>) -> CanvasSize {
        let mut right: f64 = 0.0;
        let mut bottom: f64 = 0.0;
        let mut any = false;
        for pos in positions {
            any = true;
            right = right.max(pos.x + self.config.node_width);
            bottom = bottom.max(pos.y + self.config.node_height);
        }

        if !any {
            return CanvasSize::default();
        }

        CanvasSize {
            width: right + self.config.padding,
            height: bottom + self.config.padding,
        }
    }
}
