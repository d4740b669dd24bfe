//! Immutable artefact coordinate types.
//!
//! This module provides the [`ArtifactId`] and [`ArtifactCoordinate`] value
//! types used throughout the bridge. Coordinates are constructed once and
//! never mutated; probing a hundred candidate versions builds a hundred
//! distinct coordinates rather than rewriting one shared value.

use camino::Utf8PathBuf;
use std::fmt;

/// Identifies an artefact within a repository by group and artifact id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactId {
    group: String,
    artifact: String,
}

impl ArtifactId {
    /// Create a new artefact id.
    #[must_use]
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Group id, e.g. `org.slf4j`.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Artifact id, e.g. `slf4j-api`.
    #[must_use]
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Pin this id to a version, producing a fresh coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemify::coordinate::ArtifactId;
    ///
    /// let id = ArtifactId::new("org.slf4j", "slf4j-api");
    /// let coordinate = id.at_version("1.7.36");
    /// assert_eq!(coordinate.version(), "1.7.36");
    /// assert_eq!(coordinate.id(), &id);
    /// ```
    #[must_use]
    pub fn at_version(&self, version: impl Into<String>) -> ArtifactCoordinate {
        ArtifactCoordinate {
            id: self.clone(),
            version: version.into(),
        }
    }

    /// The group id rendered as a repository path prefix (`org/slf4j`).
    #[must_use]
    pub fn group_path(&self) -> String {
        self.group.replace('.', "/")
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// An [`ArtifactId`] pinned to a concrete version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    id: ArtifactId,
    version: String,
}

impl ArtifactCoordinate {
    /// Create a coordinate from an id and version.
    #[must_use]
    pub fn new(id: ArtifactId, version: impl Into<String>) -> Self {
        Self {
            id,
            version: version.into(),
        }
    }

    /// The artefact id portion.
    #[must_use]
    pub fn id(&self) -> &ArtifactId {
        &self.id
    }

    /// The pinned version string, untranslated.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.version)
    }
}

/// Packaging declared for a resolved artefact.
///
/// Only [`Packaging::Gem`] artefacts are handled by the install
/// orchestrator; everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packaging {
    /// A RubyGems package.
    Gem,
    /// A Java archive.
    Jar,
    /// A bare project model with no attached file.
    Pom,
    /// Any packaging this tool does not interpret.
    Other(String),
}

impl Packaging {
    /// Parse a packaging label as found in descriptors and project models.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "gem" => Self::Gem,
            "jar" => Self::Jar,
            "pom" => Self::Pom,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The label this packaging serialises back to.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Gem => "gem",
            Self::Jar => "jar",
            Self::Pom => "pom",
            Self::Other(label) => label,
        }
    }

    /// True when the artefact denotes a gem.
    #[must_use]
    pub const fn is_gem(&self) -> bool {
        matches!(self, Self::Gem)
    }
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One element of an already-resolved dependency set.
///
/// The bridge never resolves dependencies itself; it consumes the flat list
/// a resolver produced, carrying whatever file the resolver already fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    /// Full coordinate of the resolved artefact.
    pub coordinate: ArtifactCoordinate,
    /// Declared packaging; gems are selected by [`Packaging::is_gem`].
    pub packaging: Packaging,
    /// Local file the resolver fetched, when one exists.
    pub file: Option<Utf8PathBuf>,
}
