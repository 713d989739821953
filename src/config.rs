use anyhow::{Context, Result};
use serde::Deserialize;

/// Column naming conventions for a grading run.
///
/// Stored as a JSON object on disk; every key is optional:
/// ```json
/// {
///   "score_marker": "Score",
///   "reliability_marker": "Reliability",
///   "results_column": "Results",
///   "grade_column": "Grade"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    pub score_marker: String,
    pub reliability_marker: String,
    pub results_column: String,
    pub grade_column: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            score_marker: "Score".to_string(),
            reliability_marker: "Reliability".to_string(),
            results_column: "Results".to_string(),
            grade_column: "Grade".to_string(),
        }
    }
}

impl ColumnConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read column config '{path}'"))?;
        let config: ColumnConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid column config '{path}'"))?;
        anyhow::ensure!(
            !config.score_marker.is_empty() && !config.reliability_marker.is_empty(),
            "column markers in '{path}' must not be empty"
        );
        Ok(config)
    }

    /// Loads from `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// True for the columns this tool writes itself.
    pub fn is_derived(&self, name: &str) -> bool {
        name == self.results_column || name == self.grade_column
    }
}
