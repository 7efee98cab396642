use crate::types::*;
use std::collections::{HashMap, HashSet};

/// Build the sitemap graph from crawler records
///
/// Actions sharing an ordered (source, target) pair are bundled into one
/// edge. References to unknown pages are kept as-is: the crawler output may
/// be incomplete and referential integrity is the caller's concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build graph from page and action records
    pub fn build(&self, pages: &[PageRecord], actions: &[NavigationActionRecord]) -> SitemapGraph {
        // Phase 1: one node per distinct page id, first record wins
        let mut nodes = Vec::with_capacity(pages.len());
        let mut seen = HashSet::with_capacity(pages.len());
        for page in pages {
            if seen.insert(page.id.as_str()) {
                nodes.push(Node::from(page));
            } else {
                log::debug!("Duplicate page record ignored: {}", page.id);
            }
        }

        // Phase 2: bundle actions into edges in first-seen order
        let mut edges: Vec<Edge> = Vec::new();
        let mut edge_index: HashMap<(&str, &str), usize> = HashMap::new();
        for action in actions {
            let key = (action.source_page_id.as_str(), action.target_page_id.as_str());
            let idx = *edge_index.entry(key).or_insert_with(|| {
                edges.push(Edge {
                    source: action.source_page_id.clone(),
                    target: action.target_page_id.clone(),
                    action_count: 0,
                    actions: Vec::new(),
                });
                edges.len() - 1
            });

            let edge = &mut edges[idx];
            edge.action_count += 1;
            edge.actions.push(action.label.clone());
        }

        let dangling = edges
            .iter()
            .filter(|e| !seen.contains(e.source.as_str()) || !seen.contains(e.target.as_str()))
            .count();
        if dangling > 0 {
            log::warn!("{dangling} edge(s) reference pages missing from the snapshot");
        }

        log::info!(
            "Built sitemap graph: {} nodes, {} edges from {} actions",
            nodes.len(),
            edges.len(),
            actions.len()
        );

        SitemapGraph { nodes, edges }
    }
}
