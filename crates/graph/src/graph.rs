use crate::types::{Edge, Node};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// Navigation adjacency used for hierarchy and layout
///
/// Self-edges are never inserted: a page is not its own successor. Ids that
/// only appear on dangling edges get placeholder vertices after all known
/// pages, so traversal can still pass through them.
pub struct Adjacency {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
    known: usize,
}

impl Adjacency {
    pub fn new(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut adjacency = Self {
            graph: DiGraph::with_capacity(nodes.len(), edges.len()),
            index: HashMap::with_capacity(nodes.len()),
            known: 0,
        };

        for node in nodes {
            adjacency.vertex(&node.id);
        }
        adjacency.known = adjacency.graph.node_count();

        for edge in edges.iter().filter(|e| !e.is_self_edge()) {
            let from = adjacency.vertex(&edge.source);
            let to = adjacency.vertex(&edge.target);
            adjacency.graph.update_edge(from, to, ());
        }

        adjacency
    }

    fn vertex(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.index.insert(id.to_string(), idx);
        idx
    }

    /// Interned id owned by the adjacency, if the vertex exists
    pub fn vertex_id(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&idx| self.graph[idx].as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Whether the id belongs to a page of the snapshot (not a placeholder)
    pub fn is_known(&self, id: &str) -> bool {
        self.index
            .get(id)
            .is_some_and(|idx| idx.index() < self.known)
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Outgoing)
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Incoming)
    }

    pub fn total_degree(&self, id: &str) -> usize {
        self.out_degree(id) + self.in_degree(id)
    }

    fn degree(&self, id: &str, direction: Direction) -> usize {
        self.index
            .get(id)
            .map(|&idx| self.graph.neighbors_directed(idx, direction).count())
            .unwrap_or(0)
    }

    /// Direct successors of a page, excluding itself
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.index
            .get(id)
            .map(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .map(|n| self.graph[n].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of vertices, placeholders included
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct non-self links
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::types::{NavigationActionRecord, PageRecord};

    fn adjacency(pages: &[&str], links: &[(&str, &str)]) -> Adjacency {
        let pages: Vec<PageRecord> = pages.iter().map(|id| PageRecord::new(*id, "/")).collect();
        let actions: Vec<NavigationActionRecord> = links
            .iter()
            .map(|(s, t)| NavigationActionRecord::new(*s, *t, "go"))
            .collect();
        let graph = GraphBuilder::new().build(&pages, &actions);
        Adjacency::new(&graph.nodes, &graph.edges)
    }

    #[test]
    fn test_degrees_exclude_self_edges() {
        let adj = adjacency(&["A", "B"], &[("A", "B"), ("A", "A"), ("B", "A")]);

        assert_eq!(adj.out_degree("A"), 1);
        assert_eq!(adj.in_degree("A"), 1);
        assert_eq!(adj.total_degree("B"), 2);
        assert_eq!(adj.successors("A"), vec!["B"]);
        assert_eq!(adj.link_count(), 2);
    }

    #[test]
    fn test_dangling_ids_become_placeholders() {
        let adj = adjacency(&["A"], &[("A", "ghost")]);

        assert!(adj.contains("ghost"));
        assert!(!adj.is_known("ghost"));
        assert!(adj.is_known("A"));
        assert_eq!(adj.out_degree("A"), 1);
        assert_eq!(adj.vertex_count(), 2);
    }

    #[test]
    fn test_unknown_id_has_no_degree() {
        let adj = adjacency(&["A"], &[]);
        assert_eq!(adj.total_degree("missing"), 0);
        assert!(adj.successors("missing").is_empty());
    }
}
