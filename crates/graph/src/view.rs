use crate::assembler::SitemapLayout;
use crate::error::{GraphError, Result};
use crate::filter::{Annotations, Emphasis, FilterEngine, FilterState};
use crate::layout::CanvasSize;
use crate::types::{Edge, Node};
use serde::{Deserialize, Serialize};

/// Interactive session over one laid-out snapshot
///
/// Owns the filter state machine:
///
/// ```text
/// Unfiltered ──select(id)──> NodeFiltered(id) ──select(id)──> Unfiltered
///      │                          │
///      └──query(text)──> QueryFiltered(text) <──query(text)──┘
/// ```
///
/// A blank query and `clear()` go back to `Unfiltered` from any state.
/// Every transition recomputes annotations from scratch; the layout is
/// never touched.
#[derive(Debug, Clone)]
pub struct SitemapView {
    layout: SitemapLayout,
    state: FilterState,
    engine: FilterEngine,
}

/// Node as handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    #[serde(flatten)]
    pub node: Node,
    pub emphasis: Emphasis,
}

/// Edge as handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub id: String,
    #[serde(flatten)]
    pub edge: Edge,
    pub emphasis: Emphasis,
    pub show_label: bool,
}

/// Render-ready snapshot of the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    pub filter: FilterState,
    pub canvas: CanvasSize,
    pub hubs: Vec<String>,
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl SitemapView {
    pub fn new(layout: SitemapLayout) -> Self {
        Self {
            layout,
            state: FilterState::Unfiltered,
            engine: FilterEngine::new(),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn layout(&self) -> &SitemapLayout {
        &self.layout
    }

    /// Select a node; selecting the active node again clears the filter
    pub fn select_node(&mut self, id: &str) -> Result<&FilterState> {
        if self.layout.find_node(id).is_none() {
            return Err(GraphError::NodeNotFound(id.to_string()));
        }

        self.state = match &self.state {
            FilterState::NodeFiltered(current) if current == id => FilterState::Unfiltered,
            _ => FilterState::NodeFiltered(id.to_string()),
        };
        log::debug!("Filter state: {:?}", self.state);
        Ok(&self.state)
    }

    /// Update the search box; a blank query clears the filter
    pub fn set_query(&mut self, text: &str) -> &FilterState {
        self.state = if text.trim().is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::QueryFiltered(text.to_string())
        };
        log::debug!("Filter state: {:?}", self.state);
        &self.state
    }

    pub fn clear(&mut self) -> &FilterState {
        self.state = FilterState::Unfiltered;
        &self.state
    }

    pub fn annotations(&self) -> Annotations {
        self.engine
            .annotate(&self.state, &self.layout.nodes, &self.layout.edges)
    }

    /// Positioned nodes and edges merged with the current annotations
    pub fn render(&self) -> RenderModel {
        let annotations = self.annotations();

        let nodes = self
            .layout
            .nodes
            .iter()
            .zip(annotations.nodes)
            .map(|(node, ann)| RenderNode {
                node: node.clone(),
                emphasis: ann.emphasis,
            })
            .collect();

        let edges = self
            .layout
            .edges
            .iter()
            .zip(annotations.edges)
            .map(|(edge, ann)| RenderEdge {
                id: ann.id.to_string(),
                edge: edge.clone(),
                emphasis: ann.emphasis,
                show_label: ann.show_label,
            })
            .collect();

        RenderModel {
            filter: self.state.clone(),
            canvas: self.layout.canvas,
            hubs: self.layout.hubs.clone(),
            nodes,
            edges,
        }
    }
}
