//! Audit input: graph sources and per-artifact priority buckets.
//!
//! The input is a JSON document produced by the repository builder:
//!
//! ```json
//! {
//!   "sources": [
//!     {"type": "dependency-graph", "top-level-gavs": ["g:a:1"], "injected-boms": []}
//!   ],
//!   "artifacts": {
//!     "g:b": {"1": {"2.0.redhat-1": {"paths": [[
//!       {"declaring": "g:a:1", "type": "DEPENDENCY", "extra": "compile", "target": "g:b:2.0.redhat-1"}
//!     ]]}}}
//!   }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::gav::{ArtifactKey, Gav};
use crate::relation::Provenance;

/// Versions observed for one artifact at one priority level.
pub type VersionMap = BTreeMap<String, Provenance>;

/// Kind tag of a graph source. Only dependency graphs contribute roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceKind {
    DependencyGraph,
    Other(String),
}

impl SourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::DependencyGraph => "dependency-graph",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for SourceKind {
    fn from(name: String) -> Self {
        if name == "dependency-graph" {
            Self::DependencyGraph
        } else {
            Self::Other(name)
        }
    }
}

impl From<SourceKind> for String {
    fn from(kind: SourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input graph observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// Entry points declared by the graph.
    #[serde(rename = "top-level-gavs", default)]
    pub top_level: BTreeSet<Gav>,
    /// BOMs injected to pin transitive versions.
    #[serde(rename = "injected-boms", default)]
    pub injected_boms: BTreeSet<Gav>,
}

impl Source {
    /// A dependency-graph source with the given roots and BOMs.
    pub fn dependency_graph(
        top_level: impl IntoIterator<Item = Gav>,
        injected_boms: impl IntoIterator<Item = Gav>,
    ) -> Self {
        Self {
            kind: SourceKind::DependencyGraph,
            top_level: top_level.into_iter().collect(),
            injected_boms: injected_boms.into_iter().collect(),
        }
    }

    pub fn contributes(&self) -> bool {
        self.kind == SourceKind::DependencyGraph
    }
}

/// Priority-ordered version observations for one artifact.
///
/// Levels iterate in ascending priority number; when two levels report the
/// same version, the later level's provenance replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityBucket {
    levels: BTreeMap<u32, VersionMap>,
}

impl PriorityBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the observations at one priority level.
    pub fn with_level(mut self, priority: u32, versions: VersionMap) -> Self {
        self.levels.insert(priority, versions);
        self
    }

    /// Levels in iteration order.
    pub fn levels(&self) -> impl Iterator<Item = (u32, &VersionMap)> {
        self.levels.iter().map(|(p, v)| (*p, v))
    }

    pub fn is_empty(&self) -> bool {
        self.levels.values().all(BTreeMap::is_empty)
    }
}

/// Everything one audit run consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInput {
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub artifacts: BTreeMap<ArtifactKey, PriorityBucket>,
}

impl ReportInput {
    /// Parse and validate an input document.
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, InputError> {
        let input: Self = serde_json::from_str(json).map_err(|e| InputError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        input.validate()?;
        Ok(input)
    }

    /// Read, parse and validate an input file.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let json = std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let input = Self::from_json_str(&json, &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            sources = input.sources.len(),
            artifacts = input.artifacts.len(),
            "loaded audit input"
        );
        Ok(input)
    }

    /// Check that every version key forms a valid coordinate with its artifact.
    pub fn validate(&self) -> Result<(), InputError> {
        for (key, bucket) in &self.artifacts {
            for (_, versions) in bucket.levels() {
                for version in versions.keys() {
                    key.with_version(version)
                        .map_err(|source| InputError::InvalidVersion {
                            artifact: key.to_string(),
                            version: version.clone(),
                            source,
                        })?;
                }
            }
        }
        Ok(())
    }
}
