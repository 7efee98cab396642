use pretty_assertions::assert_eq;
use sitemap_graph::{
    EdgeId, FilterEngine, FilterState, GraphBuilder, HierarchyAssigner, NavigationActionRecord,
    PageRecord, SitemapAssembler, SitemapSnapshot,
};
use std::collections::BTreeSet;

fn abc() -> (Vec<PageRecord>, Vec<NavigationActionRecord>) {
    let pages = vec![
        PageRecord::new("A", "/a"),
        PageRecord::new("B", "/b"),
        PageRecord::new("C", "/c"),
    ];
    let actions = vec![
        NavigationActionRecord::new("A", "B", "View"),
        NavigationActionRecord::new("A", "B", "Open"),
        NavigationActionRecord::new("B", "C", "Next"),
    ];
    (pages, actions)
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn chain_bundles_edges_and_assigns_depths() {
    let (pages, actions) = abc();
    let graph = GraphBuilder::new().build(&pages, &actions);

    assert_eq!(graph.edge_count(), 2);
    let ab = graph.find_edge("A", "B").expect("A->B");
    assert_eq!(ab.action_count, 2);
    assert_eq!(ab.actions, vec!["View".to_string(), "Open".to_string()]);
    let bc = graph.find_edge("B", "C").expect("B->C");
    assert_eq!(bc.action_count, 1);
    assert_eq!(bc.actions, vec!["Next".to_string()]);

    let hierarchy = HierarchyAssigner::default().assign_depths(&graph.nodes, &graph.edges);
    assert_eq!(hierarchy.hubs, vec!["A".to_string()]);
    assert_eq!(hierarchy.depth("A"), Some(0));
    assert_eq!(hierarchy.depth("B"), Some(1));
    assert_eq!(hierarchy.depth("C"), Some(2));
}

#[test]
fn edgeless_pair_uses_fallback_hub_and_overflow_tier() {
    let pages = vec![PageRecord::new("X", "/x"), PageRecord::new("Y", "/y")];
    let graph = GraphBuilder::new().build(&pages, &[]);
    assert!(graph.edges.is_empty());

    let hierarchy = HierarchyAssigner::default().assign_depths(&graph.nodes, &graph.edges);
    assert_eq!(hierarchy.hubs, vec!["X".to_string()]);
    assert_eq!(hierarchy.depth("X"), Some(0));
    assert_eq!(hierarchy.depth("Y"), Some(1));
    assert_eq!(hierarchy.overflow_depth, Some(1));
}

#[test]
fn selecting_middle_node_connects_both_directions() {
    let (pages, actions) = abc();
    let graph = GraphBuilder::new().build(&pages, &actions);

    let filter = FilterEngine::new().filter_by_node("B", &graph.edges);
    assert_eq!(filter.connected_nodes, set(&["A", "B", "C"]));
    assert_eq!(
        filter.connected_edges,
        BTreeSet::from([EdgeId::new("A", "B"), EdgeId::new("B", "C")])
    );
}

#[test]
fn empty_input_produces_empty_outputs() {
    let layout = SitemapAssembler::default().assemble(&[], &[]);
    assert!(layout.nodes.is_empty());
    assert!(layout.edges.is_empty());
    assert!(layout.hubs.is_empty());

    let hierarchy = HierarchyAssigner::default().assign_depths(&[], &[]);
    assert!(hierarchy.depths.is_empty());
}

#[test]
fn dangling_edges_are_surfaced_not_masked() {
    let pages = vec![PageRecord::new("A", "/a")];
    let actions = vec![NavigationActionRecord::new("A", "missing", "Broken link")];

    let layout = SitemapAssembler::default().assemble(&pages, &actions);
    assert_eq!(layout.nodes.len(), 1);
    assert_eq!(layout.edges.len(), 1);
    assert_eq!(layout.edges[0].target, "missing");
    assert_eq!(layout.stats().dangling_edge_count, 1);
}

#[test]
fn session_round_trip_from_json_snapshot() {
    let snapshot = SitemapSnapshot::from_json_str(
        r#"{
            "pages": [
                {"id": "dash", "title": "Dashboard", "url_pattern": "/dashboard", "action_count": 12},
                {"id": "jobs", "title": "Jobs", "url_pattern": "/jobs", "product_area": "Production"},
                {"id": "job", "title": "Job Overview", "url_pattern": "/jobs/{id}/overview"},
                {"id": "permits", "title": "Permits", "url_pattern": "/track/permits", "product_area": "Track"}
            ],
            "actions": [
                {"source_page_id": "dash", "target_page_id": "jobs", "label": "Jobs"},
                {"source_page_id": "jobs", "target_page_id": "job", "label": "Open job"},
                {"source_page_id": "job", "target_page_id": "jobs", "label": "Back"}
            ]
        }"#,
    )
    .expect("snapshot");

    let layout = SitemapAssembler::default().assemble_snapshot(&snapshot);
    assert_eq!(layout.hubs, vec!["dash".to_string()]);
    assert_eq!(layout.find_node("permits").and_then(|n| n.depth), Some(3));

    let mut view = layout.into_view();
    let initial = view.annotations();

    view.set_query("TRACK");
    let model = view.render();
    let highlighted: Vec<&str> = model
        .nodes
        .iter()
        .filter(|n| n.emphasis == sitemap_graph::Emphasis::Highlighted)
        .map(|n| n.node.id.as_str())
        .collect();
    assert_eq!(highlighted, vec!["permits"]);

    view.select_node("jobs").expect("known node");
    assert_eq!(view.state(), &FilterState::NodeFiltered("jobs".to_string()));
    let labelled: Vec<String> = view
        .render()
        .edges
        .into_iter()
        .filter(|e| e.show_label)
        .map(|e| e.id)
        .collect();
    assert_eq!(labelled, vec!["dash->jobs", "jobs->job", "job->jobs"]);

    view.select_node("jobs").expect("known node");
    assert_eq!(view.state(), &FilterState::Unfiltered);
    assert_eq!(view.annotations(), initial);
}
