use crate::assembler::SitemapLayout;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Shape and data-quality summary of a laid-out sitemap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,

    /// Raw navigation actions behind all edges
    pub total_actions: usize,
    pub self_edge_count: usize,

    /// Edges with an endpoint that is not a known page
    pub dangling_edge_count: usize,

    /// Pages without any incident edge
    pub isolated_node_count: usize,
    pub hub_count: usize,
    pub max_depth: Option<usize>,

    /// Pages placed in the overflow tier
    pub overflow_node_count: usize,

    /// Depth -> number of pages
    pub depth_histogram: BTreeMap<usize, usize>,
}

impl GraphStats {
    pub fn collect(layout: &SitemapLayout) -> Self {
        let known: HashSet<&str> = layout.nodes.iter().map(|n| n.id.as_str()).collect();
        let touched: HashSet<&str> = layout
            .edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();

        let mut depth_histogram = BTreeMap::new();
        for depth in layout.nodes.iter().filter_map(|n| n.depth) {
            *depth_histogram.entry(depth).or_insert(0) += 1;
        }

        let overflow_node_count = layout
            .overflow_depth
            .and_then(|overflow| depth_histogram.get(&overflow).copied())
            .unwrap_or(0);

        Self {
            node_count: layout.nodes.len(),
            edge_count: layout.edges.len(),
            total_actions: layout.edges.iter().map(|e| e.action_count).sum(),
            self_edge_count: layout.edges.iter().filter(|e| e.is_self_edge()).count(),
            dangling_edge_count: layout
                .edges
                .iter()
                .filter(|e| {
                    !known.contains(e.source.as_str()) || !known.contains(e.target.as_str())
                })
                .count(),
            isolated_node_count: known.iter().filter(|id| !touched.contains(*id)).count(),
            hub_count: layout.hubs.len(),
            max_depth: depth_histogram.keys().next_back().copied(),
            overflow_node_count,
            depth_histogram,
        }
    }
}
