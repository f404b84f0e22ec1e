//! Rich diagnostic error types for repository audits.
//!
//! Each stage defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains. Data-quality findings
//! (multiple versions, malformed versions, excluded references) are report
//! content and never appear here.

use miette::Diagnostic;
use thiserror::Error;

use crate::gav::CoordinateError;

/// Top-level error type for an audit run.
#[derive(Debug, Error, Diagnostic)]
pub enum AuditError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Write(#[from] WriteError),
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum InputError {
    #[error("failed to read audit input: {path}")]
    #[diagnostic(
        code(audit::input::read),
        help("Check that the input file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse audit input {path}: {message}")]
    #[diagnostic(
        code(audit::input::parse),
        help(
            "The input must be a JSON object with `sources` (list of graph sources) and \
             `artifacts` (map of \"group:artifact\" to priority-ordered version maps)."
        )
    )]
    Parse { path: String, message: String },

    #[error("invalid version \"{version}\" for artifact {artifact}")]
    #[diagnostic(
        code(audit::input::invalid_version),
        help("Version keys must be non-empty and free of ':', '$', '/', '\\' and whitespace.")
    )]
    InvalidVersion {
        artifact: String,
        version: String,
        #[source]
        source: CoordinateError,
    },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(audit::config::read),
        help("Ensure the config file exists, or omit --config to use defaults.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(audit::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("invalid version pattern \"{pattern}\": {message}")]
    #[diagnostic(
        code(audit::config::pattern),
        help("`version_pattern` must be a valid regular expression (Rust `regex` syntax).")
    )]
    InvalidPattern { pattern: String, message: String },
}

// ---------------------------------------------------------------------------
// Write errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum WriteError {
    #[error("failed to remove previous report at {path}")]
    #[diagnostic(
        code(audit::write::clear),
        help("Ensure no other process holds files in the report directory and you have write permissions.")
    )]
    Clear {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(audit::write::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    #[diagnostic(
        code(audit::write::file),
        help("Check free disk space and permissions. The next run wipes partial output.")
    )]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type AuditResult<T> = std::result::Result<T, AuditError>;
