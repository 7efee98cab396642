use crate::types::{Edge, EdgeId, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active filter of a visualization session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum FilterState {
    #[default]
    Unfiltered,

    /// Neighborhood of one selected page
    NodeFiltered(String),

    /// Pages matching a text query
    QueryFiltered(String),
}

/// Result of filtering by a selected node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeFilter {
    /// Always contains the selected node itself
    pub connected_nodes: BTreeSet<String>,
    pub connected_edges: BTreeSet<EdgeId>,
}

/// Result of filtering by a text query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub matching_nodes: BTreeSet<String>,

    /// Edges with at least one matching endpoint
    pub relevant_edges: BTreeSet<EdgeId>,
}

/// Visual weight of a node or edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Normal,
    Selected,
    Highlighted,

    /// Non-matching page linked to a query match
    Related,
    Dimmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAnnotation {
    pub id: String,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeAnnotation {
    pub id: EdgeId,
    pub emphasis: Emphasis,

    /// Show the action count badge
    pub show_label: bool,
}

/// Per-element emphasis for one filter state, in graph order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    pub nodes: Vec<NodeAnnotation>,
    pub edges: Vec<EdgeAnnotation>,
}

impl Annotations {
    pub fn node(&self, id: &str) -> Option<Emphasis> {
        self.nodes.iter().find(|n| n.id == id).map(|n| n.emphasis)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&EdgeAnnotation> {
        self.edges
            .iter()
            .find(|e| e.id.source == source && e.id.target == target)
    }
}

/// Stateless neighborhood and query filtering
///
/// Filtering never removes elements; it only changes their emphasis.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Direct neighborhood of a node, both directions, self-edges included
    pub fn filter_by_node(&self, node_id: &str, edges: &[Edge]) -> NodeFilter {
        let mut result = NodeFilter::default();
        result.connected_nodes.insert(node_id.to_string());

        for edge in edges.iter().filter(|e| e.touches(node_id)) {
            result.connected_nodes.insert(edge.source.clone());
            result.connected_nodes.insert(edge.target.clone());
            result.connected_edges.insert(edge.id());
        }

        result
    }

    /// Case-insensitive substring match on title, URL pattern and product area
    ///
    /// A blank query matches nothing.
    pub fn filter_by_query(&self, query: &str, nodes: &[Node], edges: &[Edge]) -> QueryFilter {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return QueryFilter::default();
        }

        let matching_nodes: BTreeSet<String> = nodes
            .iter()
            .filter(|node| matches_query(node, &needle))
            .map(|node| node.id.clone())
            .collect();

        let relevant_edges = edges
            .iter()
            .filter(|e| matching_nodes.contains(&e.source) || matching_nodes.contains(&e.target))
            .map(Edge::id)
            .collect();

        QueryFilter {
            matching_nodes,
            relevant_edges,
        }
    }

    /// Full visibility: everything normal, no edge labels
    pub fn clear(&self, nodes: &[Node], edges: &[Edge]) -> Annotations {
        Annotations {
            nodes: nodes
                .iter()
                .map(|n| NodeAnnotation {
                    id: n.id.clone(),
                    emphasis: Emphasis::Normal,
                })
                .collect(),
            edges: edges
                .iter()
                .map(|e| EdgeAnnotation {
                    id: e.id(),
                    emphasis: Emphasis::Normal,
                    show_label: false,
                })
                .collect(),
        }
    }

    /// Turn a filter state into per-element annotations
    pub fn annotate(&self, state: &FilterState, nodes: &[Node], edges: &[Edge]) -> Annotations {
        match state {
            FilterState::Unfiltered => self.clear(nodes, edges),
            FilterState::NodeFiltered(selected) => {
                let filter = self.filter_by_node(selected, edges);
                Annotations {
                    nodes: nodes
                        .iter()
                        .map(|n| {
                            let emphasis = if n.id == *selected {
                                Emphasis::Selected
                            } else if filter.connected_nodes.contains(&n.id) {
                                Emphasis::Highlighted
                            } else {
                                Emphasis::Dimmed
                            };
                            NodeAnnotation {
                                id: n.id.clone(),
                                emphasis,
                            }
                        })
                        .collect(),
                    edges: edges
                        .iter()
                        .map(|e| {
                            let id = e.id();
                            let connected = filter.connected_edges.contains(&id);
                            EdgeAnnotation {
                                id,
                                emphasis: if connected {
                                    Emphasis::Highlighted
                                } else {
                                    Emphasis::Dimmed
                                },
                                show_label: connected,
                            }
                        })
                        .collect(),
                }
            }
            FilterState::QueryFiltered(query) => {
                let filter = self.filter_by_query(query, nodes, edges);
                let endpoints: BTreeSet<&str> = edges
                    .iter()
                    .filter(|e| filter.relevant_edges.contains(&e.id()))
                    .flat_map(|e| [e.source.as_str(), e.target.as_str()])
                    .collect();
                Annotations {
                    nodes: nodes
                        .iter()
                        .map(|n| {
                            let emphasis = if filter.matching_nodes.contains(&n.id) {
                                Emphasis::Highlighted
                            } else if endpoints.contains(n.id.as_str()) {
                                Emphasis::Related
                            } else {
                                Emphasis::Dimmed
                            };
                            NodeAnnotation {
                                id: n.id.clone(),
                                emphasis,
                            }
                        })
                        .collect(),
                    edges: edges
                        .iter()
                        .map(|e| {
                            let id = e.id();
                            let emphasis = if filter.relevant_edges.contains(&id) {
                                Emphasis::Normal
                            } else {
                                Emphasis::Dimmed
                            };
                            EdgeAnnotation {
                                id,
                                emphasis,
                                show_label: false,
                            }
                        })
                        .collect(),
                }
            }
        }
    }
}

fn matches_query(node: &Node, needle: &str) -> bool {
    let fields = [
        node.title.as_deref(),
        Some(node.url_pattern.as_str()),
        node.product_area.as_deref(),
    ];
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}
