//! Analysis settings loaded from TOML.
//!
//! Every field has a default, and a missing file means "all defaults":
//!
//! ```toml
//! [build]
//! combine = "sum"
//!
//! [linearize]
//! mode = "all"
//! shortest_cycles = true
//!
//! [edges]
//! order = "ascending"
//! limit = 10
//! ```

use std::cmp::Ordering;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ops::linearize::LinearizationMode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub linearize: LinearizeConfig,
    #[serde(default)]
    pub edges: EdgeListConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// How repeated `(from, to)` edges are folded.
    #[serde(default)]
    pub combine: WeightCombine,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearizeConfig {
    #[serde(default)]
    pub mode: LinearizationMode,
    /// Attach a shortest witness cycle to every irreducible cycle.
    #[serde(default = "default_true")]
    pub shortest_cycles: bool,
}

impl Default for LinearizeConfig {
    fn default() -> Self {
        Self {
            mode: LinearizationMode::default(),
            shortest_cycles: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeListConfig {
    #[serde(default)]
    pub order: SortOrder,
    /// Keep only edges with weight strictly below this value.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Combinator for repeated edge weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightCombine {
    #[default]
    Sum,
    Max,
    Min,
    /// Keep the latest weight.
    Replace,
}

impl WeightCombine {
    #[must_use]
    pub const fn apply(self, existing: i64, latest: i64) -> i64 {
        match self {
            Self::Sum => existing.saturating_add(latest),
            Self::Max => if existing >= latest { existing } else { latest },
            Self::Min => if existing <= latest { existing } else { latest },
            Self::Replace => latest,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub fn compare(self, a: &i64, b: &i64) -> Ordering {
        match self {
            Self::Ascending => a.cmp(b),
            Self::Descending => b.cmp(a),
        }
    }
}

/// Load an [`AnalysisConfig`] from `path`; a missing file yields defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    if !path.exists() {
        return Ok(AnalysisConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_true() -> bool {
    true
}
