//! CLI configuration: log settings and the optional `laroute.yaml` file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use laroute_template::{ConstraintMap, QueryOptions};
use serde::Deserialize;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Structured JSON lines.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Contents of a `laroute.yaml` file.
///
/// ```yaml
/// constraints:
///   id: '^\d+$'
/// query:
///   array_format: brackets
///   sort: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Parameter name → regex source.
    pub constraints: BTreeMap<String, String>,

    /// Query serialization used by `expand`.
    pub query: QueryOptions,
}

impl FileConfig {
    /// Load and parse a YAML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// File constraints with `overrides` (from `-w` flags) applied on top.
    pub fn constraints_with(&self, overrides: &[(String, String)]) -> anyhow::Result<ConstraintMap> {
        let mut constraints = ConstraintMap::from_regexes(&self.constraints)?;
        let overrides = ConstraintMap::from_regexes(overrides.iter().map(|(k, v)| (k.as_str(), v)))?;
        constraints.merge(&overrides);
        Ok(constraints)
    }
}

/// Parse a `name=value` command-line pair.
pub fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, _)) if name.is_empty() => Err(format!("missing name in '{raw}'")),
        Some((name, value)) => Ok((name.to_string(), value.to_string())),
        None => Err(format!("expected name=value, got '{raw}'")),
    }
}
