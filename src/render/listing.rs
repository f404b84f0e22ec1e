//! Group-id and artifact-id index pages.

use std::collections::BTreeMap;

use crate::input::VersionMap;

use super::markup::{self, Markup};
use super::{breadcrumbs, slug};

fn back_link() -> String {
    format!("../{}", slug::INDEX_PAGE)
}

/// Versions of one artifact, each linking to its artifact-version page.
pub fn render_artifact_id(group: &str, artifact: &str, versions: &VersionMap) -> String {
    let heading = format!("{group}:{artifact}");
    markup::page(
        &format!("ArtifactId {heading}"),
        slug::STYLESHEET,
        Some(back_link().as_str()),
        |m| {
            m.element("h1", &[], &heading);
            breadcrumbs(m, group, Some(artifact), None);
            m.element("h2", &[], "Versions").open("ul", &[]);
            version_items(m, group, artifact, versions);
            m.close("ul");
        },
    )
}

/// Artifacts of one group, each with its versions nested below.
pub fn render_group_id(group: &str, artifacts: &BTreeMap<String, VersionMap>) -> String {
    markup::page(
        &format!("GroupId {group}"),
        slug::STYLESHEET,
        Some(back_link().as_str()),
        |m| {
            m.element("h1", &[], group);
            breadcrumbs(m, group, None, None);
            m.element("h2", &[], "Artifacts").open("ul", &[]);
            for (artifact, versions) in artifacts {
                let title = format!("ArtifactId {artifact}");
                m.open("li", &[])
                    .link(
                        &slug::href(&slug::artifact_page(group, artifact)),
                        Some(title.as_str()),
                        artifact,
                    )
                    .open("ul", &[]);
                version_items(m, group, artifact, versions);
                m.close("ul").close("li");
            }
            m.close("ul");
        },
    )
}

fn version_items(m: &mut Markup, group: &str, artifact: &str, versions: &VersionMap) {
    for version in versions.keys() {
        m.open("li", &[])
            .link(
                &slug::href(&slug::version_page(group, artifact, version)),
                None,
                version,
            )
            .close("li");
    }
}
