//! Artifact-version page: every path that explains how a version is reached.

use std::collections::BTreeSet;

use crate::aggregate::Index;
use crate::gav::Gav;
use crate::relation::{Edge, Provenance, ProvenancePath};

use super::markup::{self, Markup};
use super::{breadcrumbs, slug};

/// Render the page for `group:artifact:version`.
///
/// Entries starting at an example artifact are listed after all other
/// entries and marked with the `example` class.
pub fn render_artifact_version(
    group: &str,
    artifact: &str,
    version: &str,
    roots: &BTreeSet<Gav>,
    provenance: &Provenance,
    index: &Index,
) -> String {
    let spaced = format!("{group} : {artifact} : {version}");
    let mut regular = Markup::new();
    let mut examples = Markup::new();

    // Index versions that do not form a valid coordinate can never be roots.
    let coordinate = Gav::new(group, artifact, version).ok();
    if let Some(root) = coordinate.as_ref().and_then(|c| roots.get(c)) {
        let m = if root.is_example() { &mut examples } else { &mut regular };
        open_entry(m, root.is_example());
        m.link(&slug::href(&slug::gav_page(root)), Some(spaced.as_str()), artifact)
            .raw(" ")
            .element("span", &[("class", "relation")], "is root")
            .close("li");
    }

    for path in provenance.sorted_paths() {
        let example = path.starts_at_example();
        let m = if example { &mut examples } else { &mut regular };
        open_entry(m, example);
        render_path(m, path, index);
        m.close("li");
    }

    markup::page(
        &format!("Artifact {spaced}"),
        slug::STYLESHEET,
        Some(format!("../{}", slug::INDEX_PAGE).as_str()),
        |m| {
            m.element("h1", &[], &spaced);
            breadcrumbs(m, group, Some(artifact), Some(version));
            m.element("h2", &[], "Paths").open("ul", &[("id", "paths")]);
            m.append(regular).append(examples);
            m.close("ul");
        },
    )
}

fn open_entry(m: &mut Markup, example: bool) {
    if example {
        m.open("li", &[("class", "example")]);
    } else {
        m.open("li", &[]);
    }
}

fn render_path(m: &mut Markup, path: &ProvenancePath, index: &Index) {
    for edge in path.edges() {
        render_edge(m, edge, index);
    }
    reference(m, path.leaf(), index);
}

fn render_edge(m: &mut Markup, edge: &Edge, index: &Index) {
    match &edge.declaring {
        Some(declaring) => {
            reference(m, declaring, index);
            m.raw(" ");
        }
        None => {
            m.raw("... ");
        }
    }
    m.element("span", &[("class", "relation")], &edge.phrase())
        .raw(" ");
}

/// Live link when the coordinate is in the index, struck-through label otherwise.
fn reference(m: &mut Markup, gav: &Gav, index: &Index) {
    if index.contains(gav) {
        m.link(
            &slug::href(&slug::gav_page(gav)),
            Some(gav.display_spaced().as_str()),
            gav.artifact(),
        );
    } else {
        let title = format!("{} (excluded)", gav.display_spaced());
        m.element(
            "span",
            &[("class", "excluded"), ("title", title.as_str())],
            gav.artifact(),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::aggregate::Aggregator;
    use crate::gav::ArtifactKey;
    use crate::input::{PriorityBucket, VersionMap};
    use crate::relation::RelationKind;

    fn gav(s: &str) -> Gav {
        s.parse().unwrap()
    }

    fn index_of(coords: &[&str]) -> Index {
        let mut grouped: BTreeMap<ArtifactKey, VersionMap> = BTreeMap::new();
        for c in coords {
            let g = gav(c);
            grouped
                .entry(g.key())
                .or_default()
                .insert(g.version().to_string(), Provenance::default());
        }
        let buckets: BTreeMap<ArtifactKey, PriorityBucket> = grouped
            .into_iter()
            .map(|(key, versions)| (key, PriorityBucket::new().with_level(1, versions)))
            .collect();
        Aggregator::default().aggregate(&[], &buckets).index
    }

    fn path(edges: Vec<Edge>) -> ProvenancePath {
        ProvenancePath::new(edges).unwrap()
    }

    fn render(target: &str, roots: &[&str], provenance: &Provenance, index: &Index) -> String {
        let g = gav(target);
        let roots: BTreeSet<Gav> = roots.iter().map(|r| gav(r)).collect();
        render_artifact_version(g.group(), g.artifact(), g.version(), &roots, provenance, index)
    }

    #[test]
    fn dependency_path_renders_links_and_phrase() {
        let index = index_of(&["g:a:1.0.0.redhat-1", "g:b:2.0.redhat-1"]);
        let prov = Provenance::new(vec![path(vec![
            Edge::new(gav("g:a:1.0.0.redhat-1"), RelationKind::Dependency, gav("g:b:2.0.redhat-1"))
                .with_qualifier("compile"),
        ])]);
        let html = render("g:b:2.0.redhat-1", &[], &prov, &index);
        assert!(html.contains(
            "<li><a href=\"artifact_version_g$a$1.0.0.redhat-1.html\" title=\"g : a : 1.0.0.redhat-1\">a</a> \
             <span class=\"relation\">depends on (scope compile)</span> \
             <a href=\"artifact_version_g$b$2.0.redhat-1.html\" title=\"g : b : 2.0.redhat-1\">b</a></li>"
        ));
        assert!(!html.contains("is root"));
        assert!(html.contains("<a href=\"groupid_g.html\" title=\"GroupId g\">g</a>"));
        assert!(html.contains("<a href=\"artifactid_g$b.html\" title=\"ArtifactId b\">b</a>"));
    }

    #[test]
    fn root_gets_leading_entry() {
        let index = index_of(&["g:a:1.redhat-1"]);
        let html = render("g:a:1.redhat-1", &["g:a:1.redhat-1"], &Provenance::default(), &index);
        assert!(html.contains(
            "<ul id=\"paths\"><li><a href=\"artifact_version_g$a$1.redhat-1.html\" title=\"g : a : 1.redhat-1\">a</a> \
             <span class=\"relation\">is root</span></li></ul>"
        ));
    }

    #[test]
    fn root_entry_only_for_the_exact_coordinate() {
        let index = index_of(&["g:a:1.redhat-1", "g:a:1.redhat-10", "g:ab:1.redhat-1"]);
        let roots = ["g:a:1.redhat-10", "g:ab:1.redhat-1", "g:a:1.redhat-1"];
        let html = render("g:a:1.redhat-1", &roots, &Provenance::default(), &index);
        assert_eq!(html.matches("is root").count(), 1);
        assert!(html.contains("href=\"artifact_version_g$a$1.redhat-1.html\""));

        let html = render("g:a:1.redhat-10", &["g:a:1.redhat-1"], &Provenance::default(), &index);
        assert!(!html.contains("is root"));
    }

    #[test]
    fn links_percent_encode_url_delimiters() {
        let index = index_of(&["g:a:1.0#1", "g:b:2.redhat-1"]);
        let prov = Provenance::new(vec![path(vec![
            Edge::new(gav("g:a:1.0#1"), RelationKind::Dependency, gav("g:b:2.redhat-1"))
                .with_qualifier("compile"),
        ])]);
        let html = render("g:b:2.redhat-1", &[], &prov, &index);
        assert!(html.contains("<a href=\"artifact_version_g$a$1.0%231.html\" title=\"g : a : 1.0#1\">a</a>"));
        assert!(!html.contains("href=\"artifact_version_g$a$1.0#1.html\""));
    }

    #[test]
    fn excluded_declaring_artifact_is_inert() {
        let index = index_of(&["g:b:2.redhat-1"]);
        let prov = Provenance::new(vec![path(vec![
            Edge::new(gav("g:gone:1"), RelationKind::Parent, gav("g:b:2.redhat-1")),
        ])]);
        let html = render("g:b:2.redhat-1", &[], &prov, &index);
        assert!(html.contains(
            "<span class=\"excluded\" title=\"g : gone : 1 (excluded)\">gone</span> \
             <span class=\"relation\">has parent</span>"
        ));
        assert!(!html.contains("artifact_version_g$gone$1.html"));
    }

    #[test]
    fn unknown_origin_fades_out() {
        let index = index_of(&["g:b:2.redhat-1"]);
        let prov = Provenance::new(vec![path(vec![Edge::unknown(gav("g:b:2.redhat-1"))])]);
        let html = render("g:b:2.redhat-1", &[], &prov, &index);
        assert!(html.contains("<li>... <span class=\"relation\">unknown relation</span> <a "));
    }

    #[test]
    fn example_paths_are_demoted_not_hidden() {
        let index = index_of(&["com.example:demo:1", "g:x:1", "g:b:2.redhat-1"]);
        let from_example = path(vec![
            Edge::new(gav("com.example:demo:1"), RelationKind::Dependency, gav("g:b:2.redhat-1"))
                .with_qualifier("runtime"),
        ]);
        let from_product = path(vec![
            Edge::new(gav("g:x:1"), RelationKind::BomImport, gav("g:b:2.redhat-1")),
        ]);
        // Sorted order alone would list the example path first.
        let prov = Provenance::new(vec![from_example, from_product]);
        let html = render("g:b:2.redhat-1", &[], &prov, &index);

        let product = html.find("imports BOM").unwrap();
        let example = html.find("<li class=\"example\">").unwrap();
        assert!(product < example);
        assert!(html.contains("depends on (scope runtime)"));
    }

    #[test]
    fn paths_render_in_sorted_order() {
        let index = index_of(&["g:a:1", "g:z:1", "g:t:1.redhat-1"]);
        let via_z = path(vec![Edge::new(gav("g:z:1"), RelationKind::Plugin, gav("g:t:1.redhat-1"))]);
        let via_a = path(vec![Edge::new(gav("g:a:1"), RelationKind::Plugin, gav("g:t:1.redhat-1"))]);
        let forward = render("g:t:1.redhat-1", &[], &Provenance::new(vec![via_z.clone(), via_a.clone()]), &index);
        let reverse = render("g:t:1.redhat-1", &[], &Provenance::new(vec![via_a, via_z]), &index);
        assert_eq!(forward, reverse);
        assert!(forward.find("title=\"g : a : 1\"").unwrap() < forward.find("title=\"g : z : 1\"").unwrap());
    }

    #[test]
    fn text_is_escaped() {
        let index = index_of(&["g:a<b>:1.redhat-1"]);
        let html = render("g:a<b>:1.redhat-1", &[], &Provenance::default(), &index);
        assert!(html.contains("<h1>g : a&lt;b&gt; : 1.redhat-1</h1>"));
        assert!(!html.contains("<b>"));
    }
}
