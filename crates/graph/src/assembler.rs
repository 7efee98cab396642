use crate::builder::GraphBuilder;
use crate::config::SitemapConfig;
use crate::error::Result;
use crate::graph::Adjacency;
use crate::hierarchy::HierarchyAssigner;
use crate::layout::{CanvasSize, LayoutEngine};
use crate::stats::GraphStats;
use crate::types::{Edge, NavigationActionRecord, Node, PageRecord, SitemapSnapshot};
use crate::view::SitemapView;
use serde::{Deserialize, Serialize};

/// Full recompute pipeline for one data snapshot
///
/// Builds the graph, assigns depths and lays it out. Filtering happens
/// afterwards on the result and never triggers a relayout.
pub struct SitemapAssembler {
    builder: GraphBuilder,
    hierarchy: HierarchyAssigner,
    layout: LayoutEngine,
}

/// Positioned sitemap, ready for filtering and rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitemapLayout {
    /// Nodes in input order, each with depth and position set
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub hubs: Vec<String>,
    pub overflow_depth: Option<usize>,
    pub canvas: CanvasSize,
}

impl SitemapLayout {
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats::collect(self)
    }

    /// Start an interactive session over this layout
    pub fn into_view(self) -> SitemapView {
        SitemapView::new(self)
    }
}

impl SitemapAssembler {
    pub fn new(config: SitemapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            builder: GraphBuilder::new(),
            hierarchy: HierarchyAssigner::new(config.hierarchy),
            layout: LayoutEngine::new(config.layout),
        })
    }

    pub fn assemble(
        &self,
        pages: &[PageRecord],
        actions: &[NavigationActionRecord],
    ) -> SitemapLayout {
        let graph = self.builder.build(pages, actions);
        let adjacency = Adjacency::new(&graph.nodes, &graph.edges);
        let hierarchy = self.hierarchy.assign(&graph.nodes, &adjacency);
        let positions = self
            .layout
            .layout(&graph.nodes, &hierarchy.depths, &adjacency);
        let canvas = self.layout.canvas_size(positions.values());

        let mut nodes = graph.nodes;
        for node in &mut nodes {
            node.depth = hierarchy.depth(&node.id);
            node.position = positions.get(&node.id).copied();
        }

        log::info!(
            "Assembled sitemap: {} nodes, {} edges, {} hub(s), canvas {:.0}x{:.0}",
            nodes.len(),
            graph.edges.len(),
            hierarchy.hubs.len(),
            canvas.width,
            canvas.height
        );

        SitemapLayout {
            nodes,
            edges: graph.edges,
            hubs: hierarchy.hubs,
            overflow_depth: hierarchy.overflow_depth,
            canvas,
        }
    }

    pub fn assemble_snapshot(&self, snapshot: &SitemapSnapshot) -> SitemapLayout {
        self.assemble(&snapshot.pages, &snapshot.actions)
    }
}

impl Default for SitemapAssembler {
    fn default() -> Self {
        Self {
            builder: GraphBuilder::new(),
            hierarchy: HierarchyAssigner::default(),
            layout: LayoutEngine::default(),
        }
    }
}
