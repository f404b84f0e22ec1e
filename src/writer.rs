//! Persisting a rendered report.
//!
//! The destination is wiped and recreated once before any page is written, so
//! a previous run can never leak into this one. Page paths are disjoint, which
//! lets pages be written in parallel.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::WriteError;
use crate::render::Page;
use crate::render::slug::{PAGES_DIR, STYLESHEET};
use crate::render::style::STYLESHEET_CSS;

/// Outcome of a completed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    /// Pages written, excluding the stylesheet.
    pub pages: usize,
}

/// Writes report pages under a root directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    root: PathBuf,
    parallel: bool,
}

impl ReportWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            parallel: true,
        }
    }

    /// Write pages concurrently (default) or one after another.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remove any previous report and create `root/pages`.
    pub fn prepare(&self) -> Result<(), WriteError> {
        if self.root.exists() {
            tracing::warn!(path = %self.root.display(), "target report path exists, deleting");
            std::fs::remove_dir_all(&self.root).map_err(|source| WriteError::Clear {
                path: self.root.display().to_string(),
                source,
            })?;
        }
        let pages_dir = self.root.join(PAGES_DIR);
        std::fs::create_dir_all(&pages_dir).map_err(|source| WriteError::CreateDir {
            path: pages_dir.display().to_string(),
            source,
        })
    }

    pub fn write_pages(&self, pages: &[Page]) -> Result<(), WriteError> {
        if self.parallel {
            pages.par_iter().try_for_each(|page| self.write_page(page))
        } else {
            pages.iter().try_for_each(|page| self.write_page(page))
        }
    }

    pub fn write_stylesheet(&self) -> Result<(), WriteError> {
        self.write_file(&self.root.join(PAGES_DIR).join(STYLESHEET), STYLESHEET_CSS)
    }

    /// Prepare the destination, then write every page and the stylesheet.
    pub fn write_report(&self, pages: &[Page]) -> Result<WriteSummary, WriteError> {
        self.prepare()?;
        self.write_pages(pages)?;
        self.write_stylesheet()?;
        tracing::info!(
            path = %self.root.display(),
            pages = pages.len(),
            "report written"
        );
        Ok(WriteSummary { pages: pages.len() })
    }

    fn write_page(&self, page: &Page) -> Result<(), WriteError> {
        tracing::debug!(page = %page.path.display(), "writing page");
        self.write_file(&self.root.join(&page.path), &page.html)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<(), WriteError> {
        std::fs::write(path, contents).map_err(|source| WriteError::File {
            path: path.display().to_string(),
            source,
        })
    }
}
