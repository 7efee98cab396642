use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;

/// Page discovered by the crawler (external input)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Unique page id, the join key for actions
    pub id: String,

    pub title: Option<String>,

    /// URL pattern (e.g., "/jobs/{id}/overview")
    pub url_pattern: String,

    /// Product area label, absent for unclassified pages
    pub product_area: Option<String>,

    /// Number of actions discovered on the page
    #[serde(default)]
    pub action_count: u64,

    /// Number of UI components discovered on the page
    #[serde(default)]
    pub component_count: u64,
}

impl PageRecord {
    pub fn new(id: impl Into<String>, url_pattern: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            url_pattern: url_pattern.into(),
            product_area: None,
            action_count: 0,
            component_count: 0,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn product_area(mut self, area: impl Into<String>) -> Self {
        self.product_area = Some(area.into());
        self
    }

    pub fn counts(mut self, action_count: u64, component_count: u64) -> Self {
        self.action_count = action_count;
        self.component_count = component_count;
        self
    }
}

/// Cross-page navigation action (external input)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationActionRecord {
    pub source_page_id: String,
    pub target_page_id: String,

    /// Human-readable label, usually the button or link text
    pub label: String,
}

impl NavigationActionRecord {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source_page_id: source.into(),
            target_page_id: target.into(),
            label: label.into(),
        }
    }
}

/// 2D coordinate of a node's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Page node in the sitemap graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub title: Option<String>,
    pub url_pattern: String,
    pub product_area: Option<String>,
    pub action_count: u64,
    pub component_count: u64,

    /// Hierarchy level, set by the hierarchy pass
    pub depth: Option<usize>,

    /// Layout coordinate, set by the layout pass
    pub position: Option<Position>,
}

impl From<&PageRecord> for Node {
    fn from(page: &PageRecord) -> Self {
        Self {
            id: page.id.clone(),
            title: page.title.clone(),
            url_pattern: page.url_pattern.clone(),
            product_area: page.product_area.clone(),
            action_count: page.action_count,
            component_count: page.component_count,
            depth: None,
            position: None,
        }
    }
}

/// Identity of an aggregated edge: the ordered (source, target) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    pub source: String,
    pub target: String,
}

impl EdgeId {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// Navigation edge bundling every action between one ordered page pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,

    /// Number of actions collapsed into this edge
    pub action_count: usize,

    /// Action labels in first-seen order, duplicates kept
    pub actions: Vec<String>,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        EdgeId::new(self.source.clone(), self.target.clone())
    }

    pub fn is_self_edge(&self) -> bool {
        self.source == self.target
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// One fetched (pages, actions) snapshot, as handed over by the data layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapSnapshot {
    #[serde(default)]
    pub pages: Vec<PageRecord>,

    #[serde(default)]
    pub actions: Vec<NavigationActionRecord>,
}

impl SitemapSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Deduplicated node/edge model of one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitemapGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl SitemapGraph {
    /// Find node by page id
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Find edge by its ordered endpoint pair
    pub fn find_edge(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|edge| edge.source == source && edge.target == target)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
