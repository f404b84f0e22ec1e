//! Report facade: aggregate, render and write in one call.

use crate::aggregate::{Aggregation, Aggregator};
use crate::config::ReportConfig;
use crate::error::AuditResult;
use crate::input::ReportInput;
use crate::render::{self, Page};
use crate::writer::{ReportWriter, WriteSummary};

/// Result of a full report run.
#[derive(Debug)]
pub struct ReportOutcome {
    pub aggregation: Aggregation,
    pub written: WriteSummary,
}

/// Aggregate the input with the configured version pattern.
pub fn aggregate(input: &ReportInput, config: &ReportConfig) -> AuditResult<Aggregation> {
    let aggregator = Aggregator::new(config.compile_pattern()?);
    Ok(aggregator.aggregate(&input.sources, &input.artifacts))
}

/// Render all pages without touching the filesystem.
pub fn render(aggregation: &Aggregation, config: &ReportConfig) -> Vec<Page> {
    render::render_report(aggregation, &config.title)
}

/// Aggregate, render and write the report to `config.output`.
pub fn generate_report(input: &ReportInput, config: &ReportConfig) -> AuditResult<ReportOutcome> {
    let aggregation = aggregate(input, config)?;
    let pages = render(&aggregation, config);
    let written = ReportWriter::new(&config.output)
        .parallel(config.parallel_writes)
        .write_report(&pages)?;
    Ok(ReportOutcome {
        aggregation,
        written,
    })
}
