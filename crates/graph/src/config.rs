use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the whole sitemap pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub hierarchy: HierarchyConfig,
    pub layout: LayoutConfig,
}

impl SitemapConfig {
    /// Parse from TOML, filling unspecified keys with defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.hierarchy.validate()?;
        self.layout.validate()
    }
}

/// Hub selection parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Maximum number of BFS roots
    pub max_hubs: usize,

    /// Score multiplier for each outgoing link
    pub out_degree_weight: u64,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            max_hubs: 3,
            out_degree_weight: 10,
        }
    }
}

impl HierarchyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_hubs == 0 {
            return Err(GraphError::invalid_config("max_hubs must be > 0"));
        }
        Ok(())
    }
}

/// Fixed node box and spacing used by the layered layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub horizontal_gap: f64,
    pub vertical_gap: f64,

    /// Margin around the whole drawing
    pub padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 60.0,
            horizontal_gap: 40.0,
            vertical_gap: 100.0,
            padding: 50.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        let sizes = [("node_width", self.node_width), ("node_height", self.node_height)];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(GraphError::invalid_config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let spacing = [
            ("horizontal_gap", self.horizontal_gap),
            ("vertical_gap", self.vertical_gap),
            ("padding", self.padding),
        ];
        for (name, value) in spacing {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::invalid_config(format!(
                    "{name} must be >= 0, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Horizontal distance between the left edges of row neighbours
    pub fn column_step(&self) -> f64 {
        self.node_width + self.horizontal_gap
    }

    /// Vertical distance between consecutive levels
    pub fn row_step(&self) -> f64 {
        self.node_height + self.vertical_gap
    }
}
