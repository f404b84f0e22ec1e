//! Artifact coordinates: the `group:artifact:version` identity triple.
//!
//! [`Gav`] identifies one versioned artifact and [`ArtifactKey`] the
//! version-less `group:artifact` pair. Both are validated on construction so
//! that every coordinate maps to exactly one report file name.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between coordinate components in string form.
pub const COORDINATE_SEPARATOR: char = ':';

/// Characters that may never appear inside a coordinate component.
const FORBIDDEN: [char; 4] = [COORDINATE_SEPARATOR, '$', '/', '\\'];

/// Substrings that mark an artifact as an illustrative example.
const EXAMPLE_MARKERS: [&str; 2] = ["example", "quickstart"];

/// Errors from coordinate parsing and validation.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("malformed coordinate \"{value}\": expected {expected} parts separated by ':'")]
    #[diagnostic(
        code(audit::gav::arity),
        help("Coordinates are written as `group:artifact:version` (or `group:artifact` for artifact keys).")
    )]
    Arity { value: String, expected: usize },

    #[error("empty {component} in coordinate \"{value}\"")]
    #[diagnostic(
        code(audit::gav::empty_component),
        help("Every component of a coordinate must be non-empty.")
    )]
    EmptyComponent {
        value: String,
        component: &'static str,
    },

    #[error("invalid character {found:?} in {component} of coordinate \"{value}\"")]
    #[diagnostic(
        code(audit::gav::invalid_char),
        help(
            "Coordinate components may not contain ':', '$', '/', '\\' or whitespace; \
             these characters are reserved for report file names."
        )
    )]
    InvalidChar {
        value: String,
        component: &'static str,
        found: char,
    },
}

pub type CoordinateResult<T> = std::result::Result<T, CoordinateError>;

fn validate(value: &str, component: &'static str, part: &str) -> CoordinateResult<()> {
    if part.is_empty() {
        return Err(CoordinateError::EmptyComponent {
            value: value.to_string(),
            component,
        });
    }
    if let Some(found) = part
        .chars()
        .find(|c| FORBIDDEN.contains(c) || c.is_whitespace())
    {
        return Err(CoordinateError::InvalidChar {
            value: value.to_string(),
            component,
            found,
        });
    }
    Ok(())
}

/// A `group:artifact:version` coordinate.
///
/// Ordering follows the string form, so `org.a.b:x:1` sorts before `org.a:y:1`
/// exactly as the rendered coordinate strings would.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gav {
    group: String,
    artifact: String,
    version: String,
}

impl Gav {
    /// Build a coordinate from its components, validating each.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> CoordinateResult<Self> {
        let (group, artifact, version) = (group.into(), artifact.into(), version.into());
        let value = format!("{group}:{artifact}:{version}");
        validate(&value, "group id", &group)?;
        validate(&value, "artifact id", &artifact)?;
        validate(&value, "version", &version)?;
        Ok(Self {
            group,
            artifact,
            version,
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The version-less coordinate pair.
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
        }
    }

    /// Whether this artifact is an illustrative example rather than a
    /// deliverable. Examples are demoted in reports, never hidden.
    pub fn is_example(&self) -> bool {
        let group = self.group.to_lowercase();
        let artifact = self.artifact.to_lowercase();
        EXAMPLE_MARKERS
            .iter()
            .any(|m| group.contains(m) || artifact.contains(m))
    }

    /// `group : artifact : version`, used for hover titles.
    pub fn display_spaced(&self) -> String {
        format!("{} : {} : {}", self.group, self.artifact, self.version)
    }

    fn string_form(&self) -> impl Iterator<Item = u8> + '_ {
        self.group
            .bytes()
            .chain(std::iter::once(b':'))
            .chain(self.artifact.bytes())
            .chain(std::iter::once(b':'))
            .chain(self.version.bytes())
    }
}

impl Ord for Gav {
    fn cmp(&self, other: &Self) -> Ordering {
        self.string_form().cmp(other.string_form())
    }
}

impl PartialOrd for Gav {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Gav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for Gav {
    type Err = CoordinateError;

    fn from_str(s: &str) -> CoordinateResult<Self> {
        let parts: Vec<&str> = s.split(COORDINATE_SEPARATOR).collect();
        match parts.as_slice() {
            [group, artifact, version] => Gav::new(*group, *artifact, *version),
            _ => Err(CoordinateError::Arity {
                value: s.to_string(),
                expected: 3,
            }),
        }
    }
}

impl TryFrom<String> for Gav {
    type Error = CoordinateError;

    fn try_from(value: String) -> CoordinateResult<Self> {
        value.parse()
    }
}

impl From<Gav> for String {
    fn from(gav: Gav) -> Self {
        gav.to_string()
    }
}

/// A `group:artifact` pair, the unit over which versions are merged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactKey {
    group: String,
    artifact: String,
}

impl ArtifactKey {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> CoordinateResult<Self> {
        let (group, artifact) = (group.into(), artifact.into());
        let value = format!("{group}:{artifact}");
        validate(&value, "group id", &group)?;
        validate(&value, "artifact id", &artifact)?;
        Ok(Self { group, artifact })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Attach a version, validating it.
    pub fn with_version(&self, version: &str) -> CoordinateResult<Gav> {
        Gav::new(self.group.as_str(), self.artifact.as_str(), version)
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

impl FromStr for ArtifactKey {
    type Err = CoordinateError;

    fn from_str(s: &str) -> CoordinateResult<Self> {
        match s.split(COORDINATE_SEPARATOR).collect::<Vec<_>>().as_slice() {
            [group, artifact] => ArtifactKey::new(*group, *artifact),
            _ => Err(CoordinateError::Arity {
                value: s.to_string(),
                expected: 2,
            }),
        }
    }
}

impl TryFrom<String> for ArtifactKey {
    type Error = CoordinateError;

    fn try_from(value: String) -> CoordinateResult<Self> {
        value.parse()
    }
}

impl From<ArtifactKey> for String {
    fn from(key: ArtifactKey) -> Self {
        key.to_string()
    }
}
