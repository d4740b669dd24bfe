//! Gem name translation for gemified artefacts.
//!
//! A gemified artefact is addressed by a gem name of the form
//! `mvn:<groupId>.<artifactId>`. This module owns the mapping between that
//! name and an [`ArtifactId`], including the reserved `rubygems` group used
//! for registry-native gems that need no translation at all.

use crate::coordinate::ArtifactId;
use std::fmt;
use thiserror::Error;

/// Scheme prefix marking a gem name as a gemified artefact.
pub const MAVEN_SCHEME: &str = "mvn:";

/// Separator between the group id and the artifact id in a gem name.
pub const GROUP_ARTIFACT_SEPARATOR: char = '.';

/// Reserved group id for gems that live natively in the gem registry.
///
/// Artefacts resolved under this group keep their bare registry name; they
/// are real gems proxied through the artefact repository, not conversions.
pub const RUBYGEMS_GROUP_ID: &str = "rubygems";

/// Errors arising from gem name translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GemNameError {
    /// The name has no group/artifact separator.
    #[error(
        "{name} is not a valid name for a gemified artefact; \
         it needs at least one '{GROUP_ARTIFACT_SEPARATOR}' as in <groupId>{GROUP_ARTIFACT_SEPARATOR}<artifactId>"
    )]
    MissingSeparator {
        /// The offending gem name.
        name: String,
    },

    /// The group or artifact segment around the final separator is empty.
    #[error("{name} has an empty segment around the final '{GROUP_ARTIFACT_SEPARATOR}'")]
    EmptySegment {
        /// The offending gem name.
        name: String,
    },
}

/// A gem name as seen by the gem registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GemName(String);

impl GemName {
    /// Create a gem name from a raw string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the gem name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Translate this gem name into an artefact id.
    ///
    /// A leading `mvn:` scheme is accepted and stripped. The remainder must
    /// contain at least one `.`; the split happens at the last one, so
    /// `org.example.foo` names the artefact `foo` in group `org.example`.
    ///
    /// # Errors
    ///
    /// Returns [`GemNameError::MissingSeparator`] when no `.` is present and
    /// [`GemNameError::EmptySegment`] when either side of the final `.` is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemify::naming::GemName;
    ///
    /// let id = GemName::from("mvn:org.example.foo").to_artifact_id()?;
    /// assert_eq!(id.group(), "org.example");
    /// assert_eq!(id.artifact(), "foo");
    /// # Ok::<(), gemify::naming::GemNameError>(())
    /// ```
    pub fn to_artifact_id(&self) -> Result<ArtifactId, GemNameError> {
        let bare = self.0.strip_prefix(MAVEN_SCHEME).unwrap_or(&self.0);
        let Some((group, artifact)) = bare.rsplit_once(GROUP_ARTIFACT_SEPARATOR) else {
            return Err(GemNameError::MissingSeparator {
                name: self.0.clone(),
            });
        };
        if group.is_empty() || artifact.is_empty() {
            return Err(GemNameError::EmptySegment {
                name: self.0.clone(),
            });
        }
        Ok(ArtifactId::new(group, artifact))
    }

    /// The canonical gem name for an artefact id.
    ///
    /// Always emits the `mvn:` scheme. The mapping is lossy for artifact ids
    /// that themselves contain a `.`: translating the result back splits at
    /// the last separator, not the original boundary.
    #[must_use]
    pub fn for_artifact(id: &ArtifactId) -> Self {
        Self(format!(
            "{MAVEN_SCHEME}{}{GROUP_ARTIFACT_SEPARATOR}{}",
            id.group(),
            id.artifact()
        ))
    }

    /// The gem name a resolved artefact installs under.
    ///
    /// Artefacts in the reserved [`RUBYGEMS_GROUP_ID`] group keep their bare
    /// artifact id; everything else gets the canonical `mvn:` form.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemify::coordinate::ArtifactId;
    /// use gemify::naming::GemName;
    ///
    /// let native = ArtifactId::new("rubygems", "rake");
    /// assert_eq!(GemName::for_resolved(&native).as_str(), "rake");
    ///
    /// let bridged = ArtifactId::new("org.example", "foo");
    /// assert_eq!(GemName::for_resolved(&bridged).as_str(), "mvn:org.example.foo");
    /// ```
    #[must_use]
    pub fn for_resolved(id: &ArtifactId) -> Self {
        if id.group() == RUBYGEMS_GROUP_ID {
            Self(id.artifact().to_owned())
        } else {
            Self::for_artifact(id)
        }
    }
}

impl AsRef<str> for GemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GemName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for GemName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for GemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
