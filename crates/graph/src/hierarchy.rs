use crate::config::HierarchyConfig;
use crate::graph::Adjacency;
use crate::types::{Edge, Node};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Hub candidacy score of one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubScore {
    pub id: String,
    pub score: u64,
    pub outgoing: usize,
    pub incoming: usize,
}

/// Depth assignment for one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    /// Page id -> level (0 for hubs)
    pub depths: HashMap<String, usize>,

    /// Selected BFS roots, highest score first
    pub hubs: Vec<String>,

    /// Every node's score, highest first (ties keep input order)
    pub scores: Vec<HubScore>,

    /// Level shared by all nodes unreachable from the hubs, if any
    pub overflow_depth: Option<usize>,
}

impl Hierarchy {
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.depths.get(id).copied()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.depths.values().copied().max()
    }
}

/// Assigns hierarchical levels via multi-source BFS from hub pages
#[derive(Debug, Clone, Default)]
pub struct HierarchyAssigner {
    config: HierarchyConfig,
}

impl HierarchyAssigner {
    pub fn new(config: HierarchyConfig) -> Self {
        Self { config }
    }

    /// Assign depths from raw nodes and edges
    pub fn assign_depths(&self, nodes: &[Node], edges: &[Edge]) -> Hierarchy {
        let adjacency = Adjacency::new(nodes, edges);
        self.assign(nodes, &adjacency)
    }

    /// Assign depths over a prebuilt adjacency
    pub fn assign(&self, nodes: &[Node], adjacency: &Adjacency) -> Hierarchy {
        if nodes.is_empty() {
            return Hierarchy::default();
        }

        let scores = self.score(nodes, adjacency);
        let hubs = self.select_hubs(nodes, &scores, adjacency);
        log::debug!("Selected hubs: {hubs:?}");

        // Multi-source BFS, first depth assigned is final
        let mut visited: HashMap<&str, usize> = HashMap::new();
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        for hub in &hubs {
            if !visited.contains_key(hub.as_str()) {
                visited.insert(hub.as_str(), 0);
                queue.push_back((hub.as_str(), 0));
            }
        }

        while let Some((current, depth)) = queue.pop_front() {
            for next in adjacency.successors(current) {
                if !visited.contains_key(next) {
                    visited.insert(next, depth + 1);
                    queue.push_back((next, depth + 1));
                }
            }
        }

        // Placeholders may be traversed but are not reported
        let mut depths: HashMap<String, usize> = nodes
            .iter()
            .filter_map(|node| {
                visited
                    .get(node.id.as_str())
                    .map(|&depth| (node.id.clone(), depth))
            })
            .collect();

        let distinct: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
        let mut overflow_depth = None;
        if depths.len() < distinct.len() {
            let overflow = depths.values().copied().max().map_or(0, |max| max + 1);
            for node in nodes {
                depths.entry(node.id.clone()).or_insert(overflow);
            }
            overflow_depth = Some(overflow);
        }

        Hierarchy {
            depths,
            hubs,
            scores,
            overflow_depth,
        }
    }

    /// Score every node, highest first; the sort is stable so ties keep input order
    fn score(&self, nodes: &[Node], adjacency: &Adjacency) -> Vec<HubScore> {
        let mut scores: Vec<HubScore> = nodes
            .iter()
            .map(|node| {
                let outgoing = adjacency.out_degree(&node.id);
                HubScore {
                    id: node.id.clone(),
                    score: (outgoing as u64)
                        .saturating_mul(self.config.out_degree_weight)
                        .saturating_add(node.action_count),
                    outgoing,
                    incoming: adjacency.in_degree(&node.id),
                }
            })
            .collect();

        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores
    }

    /// Pick up to `max_hubs` roots among nodes with outgoing links
    ///
    /// A candidate already reachable from a higher-ranked hub is skipped: it
    /// sits below that hub rather than beside it.
    fn select_hubs(
        &self,
        nodes: &[Node],
        scores: &[HubScore],
        adjacency: &Adjacency,
    ) -> Vec<String> {
        let mut hubs: Vec<String> = Vec::new();
        let mut reached: HashSet<&str> = HashSet::new();

        for candidate in scores.iter().filter(|s| s.outgoing > 0) {
            if hubs.len() == self.config.max_hubs {
                break;
            }
            if reached.contains(candidate.id.as_str()) {
                continue;
            }

            let mut stack = vec![candidate.id.as_str()];
            while let Some(current) = stack.pop() {
                if let Some(id) = adjacency.vertex_id(current) {
                    if reached.insert(id) {
                        stack.extend(adjacency.successors(id));
                    }
                }
            }
            hubs.push(candidate.id.clone());
        }

        // Edge-less graph: fall back to the first page in input order
        if hubs.is_empty() {
            if let Some(first) = nodes.first() {
                hubs.push(first.id.clone());
            }
        }

        hubs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::types::{NavigationActionRecord, PageRecord};

    fn assign(pages: Vec<PageRecord>, links: &[(&str, &str)]) -> Hierarchy {
        let actions: Vec<NavigationActionRecord> = links
            .iter()
            .map(|(s, t)| NavigationActionRecord::new(*s, *t, "go"))
            .collect();
        let graph = GraphBuilder::new().build(&pages, &actions);
        HierarchyAssigner::default().assign_depths(&graph.nodes, &graph.edges)
    }

    fn pages(ids: &[&str]) -> Vec<PageRecord> {
        ids.iter().map(|id| PageRecord::new(*id, format!("/{id}"))).collect()
    }

    #[test]
    fn test_chain_depths() {
        let h = assign(pages(&["A", "B", "C"]), &[("A", "B"), ("A", "B"), ("B", "C")]);

        assert_eq!(h.hubs[0], "A");
        assert_eq!(h.depth("A"), Some(0));
        assert_eq!(h.depth("B"), Some(1));
        assert_eq!(h.depth("C"), Some(2));
        assert_eq!(h.overflow_depth, None);
    }

    #[test]
    fn test_edgeless_graph_falls_back_to_first_node() {
        let h = assign(pages(&["X", "Y", "Z"]), &[]);

        assert_eq!(h.hubs, vec!["X"]);
        assert_eq!(h.depth("X"), Some(0));
        assert_eq!(h.depth("Y"), Some(1));
        assert_eq!(h.depth("Z"), Some(1));
        assert_eq!(h.overflow_depth, Some(1));
    }

    #[test]
    fn test_empty_graph() {
        let h = assign(Vec::new(), &[]);
        assert!(h.depths.is_empty());
        assert!(h.hubs.is_empty());
    }

    #[test]
    fn test_action_count_breaks_score_ties() {
        let mut p = pages(&["A", "B", "C", "D"]);
        p[1].action_count = 5;
        let h = assign(p, &[("A", "C"), ("B", "D")]);

        assert_eq!(h.scores[0].id, "B");
        assert_eq!(h.scores[0].score, 15);
        assert_eq!(h.hubs, vec!["B", "A"]);
        assert_eq!(h.depth("A"), Some(0));
        assert_eq!(h.depth("B"), Some(0));
        assert_eq!(h.depth("C"), Some(1));
        assert_eq!(h.depth("D"), Some(1));
    }

    #[test]
    fn test_at_most_three_hubs() {
        let h = assign(
            pages(&["A", "B", "C", "D", "T"]),
            &[("A", "T"), ("B", "T"), ("C", "T"), ("D", "T")],
        );

        assert_eq!(h.hubs, vec!["A", "B", "C"]);
        // D is not a hub and nothing links to it
        assert_eq!(h.depth("D"), Some(2));
        assert_eq!(h.depth("T"), Some(1));
        assert_eq!(h.overflow_depth, Some(2));
    }

    #[test]
    fn test_nearest_hub_wins() {
        // A -> B -> C -> D and E -> D: D is one hop from hub E
        let mut p = pages(&["A", "B", "C", "D", "E"]);
        p[0].action_count = 100;
        p[4].action_count = 50;
        let h = assign(p, &[("A", "B"), ("B", "C"), ("C", "D"), ("E", "D")]);

        assert_eq!(h.hubs, vec!["A", "E"]);
        assert_eq!(h.depth("D"), Some(1));
    }

    #[test]
    fn test_cycles_and_self_edges() {
        let h = assign(pages(&["A", "B"]), &[("A", "B"), ("B", "A"), ("A", "A")]);

        assert_eq!(h.scores.iter().find(|s| s.id == "A").unwrap().outgoing, 1);
        // B ties with A but is reachable from it, so it is not a second root
        assert_eq!(h.hubs, vec!["A"]);
        assert_eq!(h.depth("A"), Some(0));
        assert_eq!(h.depth("B"), Some(1));
    }

    #[test]
    fn test_traverses_through_dangling_ids() {
        let h = assign(pages(&["A", "B"]), &[("A", "ghost"), ("ghost", "B")]);

        assert_eq!(h.depth("B"), Some(2));
        assert!(!h.depths.contains_key("ghost"));
    }

    #[test]
    fn test_huge_counts_saturate_instead_of_overflowing() {
        let p = vec![
            PageRecord::new("A", "/a").counts(u64::MAX, 0),
            PageRecord::new("B", "/b").counts(7, 0),
        ];
        let h = assign(p, &[("A", "B"), ("B", "A")]);

        assert_eq!(h.scores[0].id, "A");
        assert_eq!(h.scores[0].score, u64::MAX);
        assert_eq!(h.scores[1].score, 17);
        assert_eq!(h.hubs, vec!["A"]);
        assert_eq!(h.depth("B"), Some(1));
    }

    #[test]
    fn test_huge_out_degree_weight_saturates() {
        let graph = GraphBuilder::new().build(
            &pages(&["A", "B"]),
            &[NavigationActionRecord::new("A", "B", "go")],
        );
        let config = HierarchyConfig {
            out_degree_weight: u64::MAX,
            ..HierarchyConfig::default()
        };
        let h = HierarchyAssigner::new(config).assign_depths(&graph.nodes, &graph.edges);

        assert_eq!(h.scores[0].score, u64::MAX);
        assert_eq!(h.hubs, vec!["A"]);
    }

    #[test]
    fn test_duplicate_ids_do_not_force_overflow() {
        let graph = GraphBuilder::new().build(
            &pages(&["A", "B"]),
            &[NavigationActionRecord::new("A", "B", "go")],
        );
        let mut nodes = graph.nodes.clone();
        nodes.push(graph.nodes[1].clone());

        let h = HierarchyAssigner::default().assign_depths(&nodes, &graph.edges);
        assert_eq!(h.depth("B"), Some(1));
        assert_eq!(h.overflow_depth, None);
    }

    #[test]
    fn test_disconnected_component_shares_overflow() {
        let h = assign(
            pages(&["A", "B", "C", "D", "E"]),
            &[("A", "B"), ("A", "C"), ("D", "E")],
        );

        // D is a hub too (outgoing > 0), so only truly isolated pages overflow
        assert_eq!(h.depth("D"), Some(0));
        assert_eq!(h.depth("E"), Some(1));
        assert_eq!(h.overflow_depth, None);
    }
}
