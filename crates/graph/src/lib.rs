//! # Sitemap Graph
//!
//! Layout and filtering engine for crawled application sitemaps.
//!
//! ## Features
//!
//! - **Edge bundling** - collapse repeated navigation actions per page pair
//! - **Hub detection** - pick BFS roots by fan-out and action volume
//! - **Layered layout** - one centered row per depth, no overlaps
//! - **Filtering** - neighborhood and text-query emphasis, never removal
//!
//! ## Architecture
//!
//! ```text
//! PageRecord[] + NavigationActionRecord[]
//!     │
//!     ├──> Graph Builder
//!     │      ├─ One node per page id
//!     │      └─ One edge per (source, target), labels kept in order
//!     │
//!     ├──> Hierarchy Assigner (petgraph adjacency, self-edges dropped)
//!     │      ├─ Score = out_degree * 10 + action_count
//!     │      ├─ Up to 3 hubs, multi-source BFS
//!     │      └─ Unreached pages share one overflow tier
//!     │
//!     ├──> Layout Engine
//!     │      └─ Rows by depth, siblings by degree, centered
//!     │
//!     └──> Sitemap View (per interaction)
//!            ├─ Unfiltered | NodeFiltered(id) | QueryFiltered(text)
//!            └─ Filter Engine -> per node/edge emphasis
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sitemap_graph::{NavigationActionRecord, PageRecord, SitemapAssembler};
//!
//! let pages = vec![PageRecord::new("home", "/"), PageRecord::new("jobs", "/jobs")];
//! let actions = vec![NavigationActionRecord::new("home", "jobs", "Jobs")];
//!
//! let mut view = SitemapAssembler::default().assemble(&pages, &actions).into_view();
//! view.select_node("jobs").unwrap();
//! let model = view.render();
//! assert_eq!(model.nodes.len(), 2);
//! ```

mod assembler;
mod builder;
mod config;
mod error;
mod filter;
mod graph;
mod hierarchy;
mod layout;
mod stats;
mod types;
mod view;

pub use assembler::{SitemapAssembler, SitemapLayout};
pub use builder::GraphBuilder;
pub use config::{HierarchyConfig, LayoutConfig, SitemapConfig};
pub use error::{GraphError, Result};
pub use filter::{
    Annotations, EdgeAnnotation, Emphasis, FilterEngine, FilterState, NodeAnnotation, NodeFilter,
    QueryFilter,
};
pub use graph::Adjacency;
pub use hierarchy::{Hierarchy, HierarchyAssigner, HubScore};
pub use layout::{CanvasSize, LayoutEngine};
pub use stats::GraphStats;
pub use types::{
    Edge, EdgeId, NavigationActionRecord, Node, PageRecord, Position, SitemapGraph,
    SitemapSnapshot,
};
pub use view::{RenderEdge, RenderModel, RenderNode, SitemapView};
