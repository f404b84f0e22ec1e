//! HTML report rendering.
//!
//! Pages are pure functions of the aggregated [`Index`](crate::aggregate::Index)
//! and the root/BOM sets. The report is laid out as:
//!
//! - `index.html`: summary (roots, BOMs, violations, all artifacts)
//! - `pages/groupid_<group>.html`
//! - `pages/artifactid_<group>$<artifact>.html`
//! - `pages/artifact_version_<group>$<artifact>$<version>.html`
//! - `pages/style.css`
//!
//! All cross-links are derived through [`slug`].

pub mod artifact;
pub mod listing;
pub mod markup;
pub mod slug;
pub mod style;
pub mod summary;

use std::path::PathBuf;

use crate::aggregate::Aggregation;

use markup::{COMPONENT_SEPARATOR, Markup};

/// A rendered page and its path relative to the report root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub path: PathBuf,
    pub html: String,
}

impl Page {
    fn in_pages_dir(name: String, html: String) -> Self {
        Self {
            path: PathBuf::from(slug::PAGES_DIR).join(name),
            html,
        }
    }
}

/// Render every page of the report in a deterministic order: per group, each
/// artifact's version pages then its artifact page, then the group page; the
/// summary comes last.
pub fn render_report(aggregation: &Aggregation, title: &str) -> Vec<Page> {
    let index = &aggregation.index;
    let mut pages = Vec::with_capacity(
        index.version_count() + index.artifact_count() + index.group_count() + 1,
    );

    for (group, artifacts) in index.artifacts() {
        for (artifact, versions) in artifacts {
            for (version, provenance) in versions {
                let html = artifact::render_artifact_version(
                    group,
                    artifact,
                    version,
                    &aggregation.roots,
                    provenance,
                    index,
                );
                pages.push(Page::in_pages_dir(
                    slug::version_page(group, artifact, version),
                    html,
                ));
            }
            pages.push(Page::in_pages_dir(
                slug::artifact_page(group, artifact),
                listing::render_artifact_id(group, artifact, versions),
            ));
        }
        pages.push(Page::in_pages_dir(
            slug::group_page(group),
            listing::render_group_id(group, artifacts),
        ));
    }

    pages.push(Page {
        path: PathBuf::from(slug::INDEX_PAGE),
        html: summary::render_summary(aggregation, title),
    });

    tracing::debug!(pages = pages.len(), "rendered report pages");
    pages
}

/// `group : artifact : version` trail; artifact and version are optional.
fn breadcrumbs(m: &mut Markup, group: &str, artifact: Option<&str>, version: Option<&str>) {
    let group_title = format!("GroupId {group}");
    m.open("p", &[("class", "breadcrumbs")])
        .link(&slug::href(&slug::group_page(group)), Some(group_title.as_str()), group);
    if let Some(artifact) = artifact {
        let artifact_title = format!("ArtifactId {artifact}");
        m.raw(COMPONENT_SEPARATOR).link(
            &slug::href(&slug::artifact_page(group, artifact)),
            Some(artifact_title.as_str()),
            artifact,
        );
    }
    if let Some(version) = version {
        m.raw(COMPONENT_SEPARATOR).text(version);
    }
    m.close("p");
}
