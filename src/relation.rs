//! Typed relation edges and the provenance paths built from them.
//!
//! A [`ProvenancePath`] explains how a root reaches an artifact: each [`Edge`]
//! names the declaring artifact and the kind of relation it declares.

use serde::{Deserialize, Serialize};

use crate::gav::Gav;

/// Qualifier marking a dependency that is embedded rather than referenced.
pub const EMBEDDED: &str = "embedded";

/// How a declaring artifact relates to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationKind {
    /// Plain dependency; the qualifier carries the scope or [`EMBEDDED`].
    Dependency,
    /// Parent POM.
    Parent,
    /// Build plugin.
    Plugin,
    /// Dependency injected into a plugin; the qualifier names the plugin.
    PluginDependency,
    /// Bill-of-materials import.
    BomImport,
    /// Relation could not be determined.
    Unknown,
}

impl RelationKind {
    /// Wire name used by graph sources, if the kind has one.
    pub fn wire_name(&self) -> Option<&'static str> {
        match self {
            Self::Dependency => Some("DEPENDENCY"),
            Self::Parent => Some("PARENT"),
            Self::Plugin => Some("PLUGIN"),
            Self::PluginDependency => Some("PLUGIN_DEP"),
            Self::BomImport => Some("BOM"),
            Self::Unknown => None,
        }
    }

    fn from_wire(name: &str) -> Option<Self> {
        match name {
            "DEPENDENCY" => Some(Self::Dependency),
            "PARENT" => Some(Self::Parent),
            "PLUGIN" => Some(Self::Plugin),
            "PLUGIN_DEP" => Some(Self::PluginDependency),
            "BOM" => Some(Self::BomImport),
            _ => None,
        }
    }
}

/// A directed, typed relation from a declaring artifact to a target.
///
/// Field order matters: the derived `Ord` compares declaring artifact first,
/// which is what makes path sorting stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "WireEdge", into = "WireEdge")]
pub struct Edge {
    /// Declaring artifact; `None` when the origin could not be determined.
    pub declaring: Option<Gav>,
    pub kind: RelationKind,
    /// Scope, [`EMBEDDED`] or owning plugin name, as declared.
    pub qualifier: Option<String>,
    pub target: Gav,
    /// Type name from the source when it matched no known kind.
    raw_type: Option<String>,
}

impl Edge {
    pub fn new(declaring: Gav, kind: RelationKind, target: Gav) -> Self {
        Self {
            declaring: Some(declaring),
            kind,
            qualifier: None,
            target,
            raw_type: None,
        }
    }

    /// An edge whose declaring artifact is unknown.
    pub fn unknown(target: Gav) -> Self {
        Self {
            declaring: None,
            kind: RelationKind::Unknown,
            qualifier: None,
            target,
            raw_type: None,
        }
    }

    /// Unrecognised type name as written by the source, if any.
    pub fn raw_type(&self) -> Option<&str> {
        self.raw_type.as_deref()
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Human-readable phrase placed between declaring artifact and target.
    pub fn phrase(&self) -> String {
        if self.declaring.is_none() {
            return "unknown relation".to_string();
        }
        let qualifier = self.qualifier.as_deref().unwrap_or("");
        match self.kind {
            RelationKind::Dependency if qualifier == EMBEDDED => "embeds".to_string(),
            RelationKind::Dependency => format!("depends on (scope {qualifier})"),
            RelationKind::Parent => "has parent".to_string(),
            RelationKind::Plugin => "uses plugin".to_string(),
            RelationKind::PluginDependency => {
                format!("uses plugin {qualifier} with added dependency")
            }
            RelationKind::BomImport => "imports BOM".to_string(),
            RelationKind::Unknown => match &self.raw_type {
                Some(raw) => format!("unknown relation ({raw})"),
                None => "unknown relation".to_string(),
            },
        }
    }
}

/// Edge as written by graph sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireEdge {
    #[serde(default)]
    declaring: Option<Gav>,
    #[serde(rename = "type", default)]
    rel_type: Option<String>,
    #[serde(default)]
    extra: Option<String>,
    target: Gav,
}

impl From<WireEdge> for Edge {
    fn from(wire: WireEdge) -> Self {
        // Unrecognised types keep their raw name so the report can show it.
        let (kind, raw_type) = match wire.rel_type {
            None => (RelationKind::Unknown, None),
            Some(name) => match RelationKind::from_wire(&name) {
                Some(kind) => (kind, None),
                None => (RelationKind::Unknown, Some(name)),
            },
        };
        Self {
            declaring: wire.declaring,
            kind,
            qualifier: wire.extra,
            target: wire.target,
            raw_type,
        }
    }
}

impl From<Edge> for WireEdge {
    fn from(edge: Edge) -> Self {
        let rel_type = match edge.kind.wire_name() {
            Some(name) => Some(name.to_string()),
            None => edge.raw_type,
        };
        Self {
            declaring: edge.declaring,
            rel_type,
            extra: edge.qualifier,
            target: edge.target,
        }
    }
}

/// A non-empty chain of edges from a root to the artifact it explains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<Edge>", into = "Vec<Edge>")]
pub struct ProvenancePath(Vec<Edge>);

impl ProvenancePath {
    /// Build a path; `None` for an empty edge list.
    pub fn new(edges: Vec<Edge>) -> Option<Self> {
        if edges.is_empty() {
            None
        } else {
            Some(Self(edges))
        }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.0
    }

    /// Declaring artifact of the first edge: where the path starts.
    pub fn origin(&self) -> Option<&Gav> {
        self.0.first().and_then(|e| e.declaring.as_ref())
    }

    /// Target of the last edge: the artifact this path explains.
    pub fn leaf(&self) -> &Gav {
        // Non-empty by construction.
        &self.0[self.0.len() - 1].target
    }

    /// Whether the path starts at an example artifact.
    pub fn starts_at_example(&self) -> bool {
        self.origin().is_some_and(Gav::is_example)
    }
}

impl TryFrom<Vec<Edge>> for ProvenancePath {
    type Error = &'static str;

    fn try_from(edges: Vec<Edge>) -> Result<Self, Self::Error> {
        Self::new(edges).ok_or("provenance path must contain at least one edge")
    }
}

impl From<ProvenancePath> for Vec<Edge> {
    fn from(path: ProvenancePath) -> Self {
        path.0
    }
}

/// How one artifact version was reached: every path that leads to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(default)]
    pub paths: Vec<ProvenancePath>,
}

impl Provenance {
    pub fn new(paths: Vec<ProvenancePath>) -> Self {
        Self { paths }
    }

    /// Paths in their deterministic render order.
    pub fn sorted_paths(&self) -> Vec<&ProvenancePath> {
        let mut paths: Vec<&ProvenancePath> = self.paths.iter().collect();
        paths.sort();
        paths
    }
}
