//! Export types for machine-readable audit results.
//!
//! These mirror what the HTML summary shows, in a form suitable for JSON
//! export and CI gating.

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregation;
use crate::gav::Gav;

/// An artifact present in more than one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiVersionExport {
    pub group: String,
    pub artifact: String,
    /// All versions, sorted.
    pub versions: Vec<String>,
}

/// Violations and root/BOM resolution for one aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationExport {
    /// Roots present in the index.
    pub roots: Vec<String>,
    /// Non-example roots absent from the index.
    pub missing_roots: Vec<String>,
    /// Example roots absent from the index; demoted, not violations.
    pub missing_example_roots: Vec<String>,
    /// BOMs present in the index.
    pub boms: Vec<String>,
    /// BOMs absent from the index.
    pub missing_boms: Vec<String>,
    pub multi_versioned: Vec<MultiVersionExport>,
    /// Coordinates whose version fails the release-tag pattern.
    pub malformed: Vec<String>,
}

impl ViolationExport {
    pub fn from_aggregation(aggregation: &Aggregation) -> Self {
        let index = &aggregation.index;
        let (roots, absent_roots): (Vec<&Gav>, Vec<&Gav>) =
            aggregation.roots.iter().partition(|root| index.contains(root));
        let (missing_example_roots, missing_roots): (Vec<&Gav>, Vec<&Gav>) =
            absent_roots.into_iter().partition(|root| root.is_example());
        let (boms, missing_boms): (Vec<&Gav>, Vec<&Gav>) =
            aggregation.boms.iter().partition(|bom| index.contains(bom));

        let multi_versioned = index
            .multi_versioned()
            .iter()
            .flat_map(|(group, artifacts)| {
                artifacts.iter().map(move |(artifact, versions)| MultiVersionExport {
                    group: group.clone(),
                    artifact: artifact.clone(),
                    versions: versions.keys().cloned().collect(),
                })
            })
            .collect();

        let malformed = index
            .malformed()
            .iter()
            .flat_map(|(group, artifacts)| {
                artifacts.iter().flat_map(move |(artifact, versions)| {
                    versions
                        .keys()
                        .map(move |version| format!("{group}:{artifact}:{version}"))
                })
            })
            .collect();

        Self {
            roots: strings(roots),
            missing_roots: strings(missing_roots),
            missing_example_roots: strings(missing_example_roots),
            boms: strings(boms),
            missing_boms: strings(missing_boms),
            multi_versioned,
            malformed,
        }
    }

    /// Whether any hygiene rule was violated.
    pub fn has_violations(&self) -> bool {
        !self.missing_roots.is_empty()
            || !self.missing_boms.is_empty()
            || !self.multi_versioned.is_empty()
            || !self.malformed.is_empty()
    }
}

fn strings(gavs: Vec<&Gav>) -> Vec<String> {
    gavs.into_iter().map(Gav::to_string).collect()
}
