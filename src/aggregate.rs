//! Merging graph observations into one artifact index.
//!
//! [`Aggregator::aggregate`] folds every artifact's priority bucket into a
//! single `version -> provenance` map and classifies violations in the same
//! pass. The resulting [`Index`] is immutable; rendering only reads it.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

use crate::error::ConfigError;
use crate::gav::{ArtifactKey, Gav};
use crate::input::{PriorityBucket, Source, VersionMap};
use crate::relation::Provenance;

/// Release-tag convention: `.redhat-<token>` or `-redhat-<token>` at the end,
/// with no dot inside the token.
pub const DEFAULT_VERSION_PATTERN: &str = r"^.*[.-]redhat-[^.]+$";

/// group -> artifact -> version -> provenance, sorted at every level.
pub type ArtifactTree = BTreeMap<String, BTreeMap<String, VersionMap>>;

/// Compiled release-tag pattern that well-formed versions must match.
#[derive(Debug, Clone)]
pub struct VersionPattern(Regex);

impl VersionPattern {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    pub fn matches(&self, version: &str) -> bool {
        self.0.is_match(version)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for VersionPattern {
    fn default() -> Self {
        Self(Regex::new(DEFAULT_VERSION_PATTERN).expect("default version pattern is valid"))
    }
}

/// The merged artifact index plus the violations found while building it.
#[derive(Debug, Clone, Default)]
pub struct Index {
    artifacts: ArtifactTree,
    multi_versioned: ArtifactTree,
    malformed: ArtifactTree,
}

impl Index {
    /// Every merged artifact version.
    pub fn artifacts(&self) -> &ArtifactTree {
        &self.artifacts
    }

    /// Artifacts present in more than one version, with all their versions.
    pub fn multi_versioned(&self) -> &ArtifactTree {
        &self.multi_versioned
    }

    /// Versions that fail the release-tag pattern.
    pub fn malformed(&self) -> &ArtifactTree {
        &self.malformed
    }

    pub fn provenance(&self, gav: &Gav) -> Option<&Provenance> {
        self.artifacts
            .get(gav.group())
            .and_then(|artifacts| artifacts.get(gav.artifact()))
            .and_then(|versions| versions.get(gav.version()))
    }

    /// Whether the coordinate survived into the final index.
    pub fn contains(&self, gav: &Gav) -> bool {
        self.provenance(gav).is_some()
    }

    pub fn group_count(&self) -> usize {
        self.artifacts.len()
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.values().map(BTreeMap::len).sum()
    }

    pub fn version_count(&self) -> usize {
        self.artifacts
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }
}

/// Output of one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub index: Index,
    /// Union of all dependency-graph roots, sorted.
    pub roots: BTreeSet<Gav>,
    /// Union of all injected BOMs, sorted.
    pub boms: BTreeSet<Gav>,
}

/// Folds sources and priority buckets into an [`Aggregation`].
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    pattern: VersionPattern,
}

impl Aggregator {
    pub fn new(pattern: VersionPattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &VersionPattern {
        &self.pattern
    }

    /// Merge all observations. Never fails: violations are data.
    pub fn aggregate(
        &self,
        sources: &[Source],
        buckets: &BTreeMap<ArtifactKey, PriorityBucket>,
    ) -> Aggregation {
        let mut roots = BTreeSet::new();
        let mut boms = BTreeSet::new();
        for source in sources.iter().filter(|s| s.contributes()) {
            roots.extend(source.top_level.iter().cloned());
            boms.extend(source.injected_boms.iter().cloned());
        }

        let mut index = Index::default();
        for (key, bucket) in buckets {
            let merged = merge_levels(bucket);
            if merged.is_empty() {
                continue;
            }

            let malformed: VersionMap = merged
                .iter()
                .filter(|(version, _)| !self.pattern.matches(version))
                .map(|(version, provenance)| (version.clone(), provenance.clone()))
                .collect();
            if !malformed.is_empty() {
                insert(&mut index.malformed, key, malformed);
            }
            if merged.len() > 1 {
                insert(&mut index.multi_versioned, key, merged.clone());
            }

            tracing::debug!(artifact = %key, versions = merged.len(), "merged artifact");
            insert(&mut index.artifacts, key, merged);
        }

        tracing::info!(
            groups = index.group_count(),
            artifacts = index.artifact_count(),
            versions = index.version_count(),
            roots = roots.len(),
            boms = boms.len(),
            multi_versioned = index.multi_versioned.values().map(BTreeMap::len).sum::<usize>(),
            "aggregated repository index"
        );

        Aggregation { index, roots, boms }
    }
}

/// Fold priority levels in iteration order. A version reported by several
/// levels keeps the provenance of the last one.
fn merge_levels(bucket: &PriorityBucket) -> VersionMap {
    let mut merged = VersionMap::new();
    for (_, versions) in bucket.levels().filter(|(_, v)| !v.is_empty()) {
        for (version, provenance) in versions {
            merged.insert(version.clone(), provenance.clone());
        }
    }
    merged
}

fn insert(tree: &mut ArtifactTree, key: &ArtifactKey, versions: VersionMap) {
    tree.entry(key.group().to_string())
        .or_default()
        .insert(key.artifact().to_string(), versions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::{Edge, ProvenancePath, RelationKind};

    fn gav(s: &str) -> Gav {
        s.parse().unwrap()
    }

    fn key(s: &str) -> ArtifactKey {
        s.parse().unwrap()
    }

    fn provenance_from(declaring: &str, target: &str) -> Provenance {
        Provenance::new(vec![
            ProvenancePath::new(vec![
                Edge::new(gav(declaring), RelationKind::Dependency, gav(target))
                    .with_qualifier("compile"),
            ])
            .unwrap(),
        ])
    }

    fn versions(entries: &[(&str, Provenance)]) -> VersionMap {
        entries
            .iter()
            .map(|(v, p)| (v.to_string(), p.clone()))
            .collect()
    }

    #[test]
    fn release_tag_pattern() {
        let pattern = VersionPattern::default();
        assert!(pattern.matches("1.0.0.redhat-1"));
        assert!(pattern.matches("2.3-redhat-00004"));
        assert!(!pattern.matches("1.0.0-SNAPSHOT"));
        assert!(!pattern.matches("1.0.0.redhat-1.extra"));
        assert!(!pattern.matches("1.0.0redhat-1"));
    }

    #[test]
    fn invalid_pattern_is_config_error() {
        assert!(matches!(
            VersionPattern::new("(unclosed"),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn later_level_overwrites_same_version() {
        let first = provenance_from("g:x:1", "g:lib:1.0.redhat-1");
        let second = provenance_from("g:y:1", "g:lib:1.0.redhat-1");
        let bucket = PriorityBucket::new()
            .with_level(1, versions(&[("1.0.redhat-1", first.clone())]))
            .with_level(2, versions(&[("1.0.redhat-1", second.clone())]));
        let mut buckets = BTreeMap::new();
        buckets.insert(key("g:lib"), bucket);

        let agg = Aggregator::default().aggregate(&[], &buckets);
        let merged = agg.index.provenance(&gav("g:lib:1.0.redhat-1")).unwrap();
        assert_eq!(merged, &second);
        assert_ne!(merged, &first);
        assert_eq!(merged.paths.len(), 1);
    }

    #[test]
    fn multi_version_detection() {
        let mut buckets = BTreeMap::new();
        buckets.insert(
            key("com.example:lib"),
            PriorityBucket::new()
                .with_level(1, versions(&[("1.0.0.redhat-1", Provenance::default())]))
                .with_level(2, versions(&[("1.1.0.redhat-1", Provenance::default())])),
        );
        buckets.insert(
            key("com.acme:single"),
            PriorityBucket::new().with_level(1, versions(&[("3.redhat-2", Provenance::default())])),
        );

        let agg = Aggregator::default().aggregate(&[], &buckets);
        let multi = agg.index.multi_versioned();
        let lib = &multi["com.example"]["lib"];
        assert_eq!(
            lib.keys().collect::<Vec<_>>(),
            vec!["1.0.0.redhat-1", "1.1.0.redhat-1"]
        );
        assert!(!multi.contains_key("com.acme"));
        assert!(agg.index.malformed().is_empty());
    }

    #[test]
    fn malformed_versions_are_flagged_with_provenance() {
        let prov = provenance_from("g:x:1", "g:lib:1.0.0-SNAPSHOT");
        let mut buckets = BTreeMap::new();
        buckets.insert(
            key("g:lib"),
            PriorityBucket::new().with_level(
                1,
                versions(&[
                    ("1.0.0-SNAPSHOT", prov.clone()),
                    ("1.0.0.redhat-1", Provenance::default()),
                    ("1.0.0.redhat-1.extra", Provenance::default()),
                ]),
            ),
        );

        let agg = Aggregator::default().aggregate(&[], &buckets);
        let flagged = &agg.index.malformed()["g"]["lib"];
        assert_eq!(
            flagged.keys().collect::<Vec<_>>(),
            vec!["1.0.0-SNAPSHOT", "1.0.0.redhat-1.extra"]
        );
        assert_eq!(flagged["1.0.0-SNAPSHOT"], prov);
    }

    #[test]
    fn empty_levels_leave_no_trace() {
        let mut buckets = BTreeMap::new();
        buckets.insert(
            key("g:ghost"),
            PriorityBucket::new().with_level(1, VersionMap::new()),
        );
        let agg = Aggregator::default().aggregate(&[], &buckets);
        assert!(agg.index.artifacts().is_empty());
        assert_eq!(agg.index.group_count(), 0);
    }

    #[test]
    fn roots_and_boms_only_from_dependency_graphs() {
        let graph_a = Source::dependency_graph([gav("g:b:1"), gav("g:a:1")], [gav("g:bom:1")]);
        let graph_b = Source::dependency_graph([gav("g:a:1")], [gav("g:bom:2")]);
        let mut other = Source::dependency_graph([gav("x:y:1")], Vec::<Gav>::new());
        other.kind = crate::input::SourceKind::Other("repository".into());

        let agg = Aggregator::default().aggregate(&[graph_a, graph_b, other], &BTreeMap::new());
        assert_eq!(
            agg.roots.iter().map(Gav::to_string).collect::<Vec<_>>(),
            vec!["g:a:1", "g:b:1"]
        );
        assert_eq!(agg.boms.len(), 2);
    }

    #[test]
    fn index_counts_and_lookup() {
        let mut buckets = BTreeMap::new();
        buckets.insert(
            key("g:a"),
            PriorityBucket::new().with_level(
                1,
                versions(&[("1.redhat-1", Provenance::default()), ("2.redhat-1", Provenance::default())]),
            ),
        );
        buckets.insert(
            key("h:b"),
            PriorityBucket::new().with_level(1, versions(&[("1.redhat-1", Provenance::default())])),
        );
        let agg = Aggregator::default().aggregate(&[], &buckets);
        assert_eq!(agg.index.group_count(), 2);
        assert_eq!(agg.index.artifact_count(), 2);
        assert_eq!(agg.index.version_count(), 3);
        assert!(agg.index.contains(&gav("g:a:2.redhat-1")));
        assert!(!agg.index.contains(&gav("g:a:3.redhat-1")));
    }
}
