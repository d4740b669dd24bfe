//! Project descriptor for bridged gem projects.
//!
//! A bridged project is described by a `gemify.toml` file naming the
//! project, the artefact repositories to consult, and the artefacts to
//! install. The `new` command writes one; `install` reads it back.

use crate::coordinate::{ArtifactId, Packaging, ResolvedArtifact};
use crate::repository::endpoint::RepositoryEndpoint;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default descriptor file name.
pub const DESCRIPTOR_FILE: &str = "gemify.toml";

/// Errors arising from descriptor handling.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// No descriptor exists at the given path.
    #[error("no project descriptor at {path}")]
    NotFound {
        /// The path that was looked up.
        path: Utf8PathBuf,
    },

    /// The descriptor exists but could not be read.
    #[error("failed to read {path}: {reason}")]
    Read {
        /// The descriptor path.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },

    /// The descriptor does not parse as TOML of the expected shape.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// The descriptor path.
        path: Utf8PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// The descriptor could not be rendered back to TOML.
    #[error("failed to render project descriptor: {reason}")]
    Render {
        /// Description of the serialisation failure.
        reason: String,
    },

    /// The descriptor could not be written out.
    #[error("failed to write {path}: {reason}")]
    Write {
        /// The descriptor path.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },
}

/// The `[package]` section of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSection {
    /// Project name.
    pub name: String,
    /// Artefact group the project publishes under.
    pub group: String,
    /// Project version.
    pub version: String,
}

/// One `[[repositories]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// Repository identifier; gem mirrors carry a `rubygems` prefix.
    pub id: String,
    /// Base URL of the repository.
    pub url: String,
}

/// One `[[artifacts]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// Artefact group identifier.
    pub group: String,
    /// Artefact name within the group.
    pub name: String,
    /// Version to install.
    pub version: String,
    /// Packaging label; anything but `gem` is ignored by installs.
    #[serde(default = "default_packaging")]
    pub packaging: String,
    /// Staged gem file for local installs, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Utf8PathBuf>,
}

fn default_packaging() -> String {
    "gem".to_owned()
}

/// A bridged project descriptor.
///
/// # Examples
///
/// ```
/// use gemify::project::ProjectDescriptor;
///
/// let descriptor: ProjectDescriptor = toml::from_str(
///     r#"
///     [package]
///     name = "storefront"
///     group = "com.example"
///     version = "1.0-SNAPSHOT"
///
///     [[repositories]]
///     id = "rubygems-releases"
///     url = "http://gems.example.test/releases"
///
///     [[artifacts]]
///     group = "rubygems"
///     name = "rails"
///     version = "3.0.0"
///     "#,
/// )
/// .expect("descriptor parses");
/// assert_eq!(descriptor.package.name, "storefront");
/// assert!(descriptor.endpoints().first().is_some_and(|endpoint| endpoint.is_gem_mirror()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// The project's own identity.
    pub package: PackageSection,
    /// Repositories consulted for versions, models, and gem metadata.
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
    /// Artefacts the project installs.
    #[serde(default)]
    pub artifacts: Vec<ArtifactEntry>,
}

impl ProjectDescriptor {
    /// Load a descriptor from `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProjectError`] when the file is missing, unreadable,
    /// or not a valid descriptor.
    pub fn load(path: &Utf8Path) -> Result<Self, ProjectError> {
        if !path.exists() {
            return Err(ProjectError::NotFound {
                path: path.to_owned(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|error| ProjectError::Read {
            path: path.to_owned(),
            reason: error.to_string(),
        })?;
        toml::from_str(&text).map_err(|error| ProjectError::Parse {
            path: path.to_owned(),
            reason: error.to_string(),
        })
    }

    /// Write the descriptor to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns a [`ProjectError`] when rendering or writing fails.
    pub fn store(&self, path: &Utf8Path) -> Result<(), ProjectError> {
        let text = toml::to_string_pretty(self).map_err(|error| ProjectError::Render {
            reason: error.to_string(),
        })?;
        std::fs::write(path, text).map_err(|error| ProjectError::Write {
            path: path.to_owned(),
            reason: error.to_string(),
        })
    }

    /// The configured repository endpoints, in file order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<RepositoryEndpoint> {
        self.repositories
            .iter()
            .map(|entry| RepositoryEndpoint::new(entry.id.as_str(), entry.url.as_str()))
            .collect()
    }

    /// The artefacts to install, in file order.
    #[must_use]
    pub fn resolved_artifacts(&self) -> Vec<ResolvedArtifact> {
        self.artifacts
            .iter()
            .map(|entry| ResolvedArtifact {
                coordinate: ArtifactId::new(entry.group.as_str(), entry.name.as_str())
                    .at_version(entry.version.as_str()),
                packaging: Packaging::from_label(&entry.packaging),
                file: entry.file.clone(),
            })
            .collect()
    }
}
