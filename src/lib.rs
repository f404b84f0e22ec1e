// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # repo-audit
//!
//! Audits a built artifact repository and renders a cross-linked HTML report:
//! which artifacts exist, which versions coexist, how each version is reached
//! from the declared roots, and which artifacts break the hygiene rules
//! (several versions of one artifact, versions without a release tag).
//!
//! ## Architecture
//!
//! - **Coordinates** (`gav`): validated `group:artifact:version` identities
//! - **Relations** (`relation`): typed edges and provenance paths
//! - **Input** (`input`): graph sources and priority-ordered version buckets
//! - **Aggregation** (`aggregate`): one fold into an immutable index plus violations
//! - **Rendering** (`render`): pure page functions sharing one naming contract
//! - **Writing** (`writer`): wipe, then write pages in parallel
//!
//! ## Library usage
//!
//! ```no_run
//! use repo_audit::config::ReportConfig;
//! use repo_audit::input::ReportInput;
//!
//! let input = ReportInput::load(std::path::Path::new("graph.json")).unwrap();
//! let outcome = repo_audit::report::generate_report(&input, &ReportConfig::default()).unwrap();
//! println!("{} pages", outcome.written.pages);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod gav;
pub mod input;
pub mod relation;
pub mod render;
pub mod report;
pub mod writer;
