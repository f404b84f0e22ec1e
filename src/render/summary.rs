//! Summary page (`index.html`): roots, BOMs, violations and the full index.

use crate::aggregate::{Aggregation, ArtifactTree, Index};
use crate::gav::Gav;

use super::markup::{self, Markup};
use super::slug;

/// What the innermost entries of an artifact tree show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leaf {
    /// Full `group:artifact:version`.
    Coordinate,
    /// Version only.
    Version,
}

pub fn render_summary(aggregation: &Aggregation, title: &str) -> String {
    let index = &aggregation.index;
    markup::page(
        &format!("Repository {title}"),
        &slug::from_root(slug::STYLESHEET),
        None,
        |m| {
            m.element("h1", &[], title);

            m.element("h2", &[], "Repo roots").open("ul", &[]);
            roots(m, aggregation.roots.iter(), index);
            m.close("ul");

            m.element("h2", &[], "BOMs").open("ul", &[]);
            boms(m, aggregation.boms.iter(), index);
            m.close("ul");

            m.element("h2", &[], "Multi-versioned artifacts");
            tree(m, index.multi_versioned(), Leaf::Coordinate);

            m.element("h2", &[], "Malformed versions");
            tree(m, index.malformed(), Leaf::Coordinate);

            m.element("h2", &[], "All artifacts");
            tree(m, index.artifacts(), Leaf::Version);
        },
    )
}

/// Roots missing from the index are errors unless they are examples;
/// example roots are listed last either way.
fn roots<'a>(m: &mut Markup, roots: impl Iterator<Item = &'a Gav>, index: &Index) {
    let mut examples = Markup::new();
    for root in roots {
        let present = index.contains(root);
        let (target, class) = if root.is_example() {
            (&mut examples, Some("example"))
        } else if present {
            (&mut *m, None)
        } else {
            (&mut *m, Some("error"))
        };
        match class {
            Some(class) => target.open("li", &[("class", class)]),
            None => target.open("li", &[]),
        };
        coordinate_entry(target, root, present);
        target.close("li");
    }
    m.append(examples);
}

/// BOMs have no example demotion: a missing BOM is always an error.
fn boms<'a>(m: &mut Markup, boms: impl Iterator<Item = &'a Gav>, index: &Index) {
    for bom in boms {
        m.open("li", &[]);
        if index.contains(bom) {
            coordinate_entry(m, bom, true);
        } else {
            m.open("span", &[("class", "error")]);
            coordinate_entry(m, bom, false);
            m.close("span");
        }
        m.close("li");
    }
}

fn coordinate_entry(m: &mut Markup, gav: &Gav, linked: bool) {
    let parts = [gav.group(), gav.artifact(), gav.version()];
    if linked {
        let href = slug::from_root(&slug::gav_page(gav));
        m.open("a", &[("href", href.as_str())])
            .coordinate(&parts)
            .close("a");
    } else {
        m.coordinate(&parts);
    }
}

/// Nested group -> artifact -> version list, sorted at every level.
fn tree(m: &mut Markup, tree: &ArtifactTree, leaf: Leaf) {
    m.open("ul", &[]);
    for (group, artifacts) in tree {
        let group_title = format!("GroupId {group}");
        m.open("li", &[])
            .link(
                &slug::from_root(&slug::group_page(group)),
                Some(group_title.as_str()),
                group,
            )
            .open("ul", &[]);
        for (artifact, versions) in artifacts {
            let artifact_title = format!("ArtifactId {artifact}");
            m.open("li", &[])
                .link(
                    &slug::from_root(&slug::artifact_page(group, artifact)),
                    Some(artifact_title.as_str()),
                    artifact,
                )
                .open("ul", &[]);
            for version in versions.keys() {
                let label = match leaf {
                    Leaf::Coordinate => format!("{group}:{artifact}:{version}"),
                    Leaf::Version => version.clone(),
                };
                m.open("li", &[])
                    .link(
                        &slug::from_root(&slug::version_page(group, artifact, version)),
                        None,
                        &label,
                    )
                    .close("li");
            }
            m.close("ul").close("li");
        }
        m.close("ul").close("li");
    }
    m.close("ul");
}
