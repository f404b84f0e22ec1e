//! Report file naming.
//!
//! Every page that links to another page derives the target name here, so a
//! coordinate always resolves to the same file no matter which page links it.
//!
//! Page names are file names. Links to them go through [`href`] or
//! [`from_root`], which percent-encode the name so a browser requests exactly
//! that file (`#`, `?` and `%` are legal in versions).

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::gav::Gav;

/// Directory holding every page except the summary.
pub const PAGES_DIR: &str = "pages";
/// Summary page at the report root.
pub const INDEX_PAGE: &str = "index.html";
/// Stylesheet inside [`PAGES_DIR`].
pub const STYLESHEET: &str = "style.css";
/// Replaces the coordinate separator in file names.
pub const SLUG_SEPARATOR: char = '$';

/// `group$artifact$version`.
pub fn slug(group: &str, artifact: &str, version: &str) -> String {
    format!("{group}{SLUG_SEPARATOR}{artifact}{SLUG_SEPARATOR}{version}")
}

pub fn gav_slug(gav: &Gav) -> String {
    slug(gav.group(), gav.artifact(), gav.version())
}

pub fn group_page(group: &str) -> String {
    format!("groupid_{group}.html")
}

pub fn artifact_page(group: &str, artifact: &str) -> String {
    format!("artifactid_{group}{SLUG_SEPARATOR}{artifact}.html")
}

pub fn version_page(group: &str, artifact: &str, version: &str) -> String {
    format!("artifact_version_{}.html", slug(group, artifact, version))
}

pub fn gav_page(gav: &Gav) -> String {
    version_page(gav.group(), gav.artifact(), gav.version())
}

/// Bytes that may not appear literally in a relative URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Relative link to a sibling page.
pub fn href(page: &str) -> String {
    utf8_percent_encode(page, PATH_SEGMENT).to_string()
}

/// Link from the report root into [`PAGES_DIR`].
pub fn from_root(page: &str) -> String {
    format!("{PAGES_DIR}/{}", href(page))
}
