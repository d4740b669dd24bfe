//! Artefact repository access trait and production implementation.
//!
//! Provides a trait-based abstraction over version listing and project
//! model materialisation, enabling dependency injection for testing. The
//! production implementation merges a local repository cache with remote
//! `maven-metadata.xml` listings fetched over HTTP.

use crate::coordinate::{ArtifactCoordinate, ArtifactId};
use crate::gem_version::GemVersion;
use crate::repository::endpoint::RepositoryEndpoint;
use crate::repository::metadata::parse_version_listing;
use crate::repository::pom::ProjectModel;
use camino::Utf8PathBuf;
use std::collections::HashSet;
use std::sync::OnceLock;
use std::time::Duration;

/// Network timeout for metadata and model fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors arising while listing available versions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A remote request failed with something other than absence.
    #[error("repository request failed for {url}: {reason}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// A remote returned version metadata this tool cannot read.
    #[error("unreadable version metadata at {url}: {reason}")]
    InvalidMetadata {
        /// The URL the metadata came from.
        url: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// The local repository cache could not be scanned.
    #[error("failed to scan local repository at {path}: {reason}")]
    LocalScan {
        /// Directory that failed to scan.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },
}

/// Errors arising while materialising one candidate's project model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// No repository holds a model for the coordinate.
    #[error("no project model found for {coordinate}")]
    NotFound {
        /// The coordinate that was looked up.
        coordinate: String,
    },

    /// The model exists but could not be retrieved.
    #[error("project model for {coordinate} could not be read: {reason}")]
    Unreadable {
        /// The coordinate that was looked up.
        coordinate: String,
        /// Description of the retrieval failure.
        reason: String,
    },

    /// The model was retrieved but does not parse.
    #[error("project model for {coordinate} does not parse: {reason}")]
    Malformed {
        /// The coordinate that was looked up.
        coordinate: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// The model names a parent that no repository holds.
    #[error("project model for {coordinate} names missing parent {parent}")]
    MissingParent {
        /// The coordinate whose chain was walked.
        coordinate: String,
        /// The absent parent coordinate.
        parent: String,
    },

    /// The parent chain loops back on itself.
    #[error("project model parent chain for {coordinate} is cyclic")]
    ParentCycle {
        /// The coordinate whose chain was walked.
        coordinate: String,
    },
}

/// Trait for artefact repository access.
///
/// Abstraction allows tests to probe versions without network or
/// filesystem access.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactRepository {
    /// List every version the repository set knows for an artefact id.
    ///
    /// Order is the repository's own; duplicates across sources are
    /// collapsed but no reordering happens.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] when a source cannot be enumerated.
    fn available_versions(&self, id: &ArtifactId) -> Result<Vec<String>, RepositoryError>;

    /// Materialise the project model behind one candidate coordinate,
    /// resolving its parent chain.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] when the model or any ancestor cannot be
    /// located or parsed.
    fn materialise_model(&self, coordinate: &ArtifactCoordinate)
    -> Result<ProjectModel, ModelError>;
}

/// The conventional local repository under the user's home directory.
///
/// Returns `None` when no home directory can be determined or its path
/// is not valid UTF-8.
#[must_use]
pub fn default_local_repository() -> Option<Utf8PathBuf> {
    let dirs = directories_next::BaseDirs::new()?;
    let home = Utf8PathBuf::from_path_buf(dirs.home_dir().to_path_buf()).ok()?;
    Some(home.join(".m2").join("repository"))
}

/// Production repository client over a local cache and remote endpoints.
#[derive(Debug, Clone)]
pub struct MavenRepositoryClient {
    local_repository: Utf8PathBuf,
    remotes: Vec<RepositoryEndpoint>,
    offline: bool,
}

impl MavenRepositoryClient {
    /// Create a client for the given local cache and remote endpoints.
    ///
    /// In offline mode the remote set is treated as empty and only the
    /// local cache is consulted.
    #[must_use]
    pub const fn new(
        local_repository: Utf8PathBuf,
        remotes: Vec<RepositoryEndpoint>,
        offline: bool,
    ) -> Self {
        Self {
            local_repository,
            remotes,
            offline,
        }
    }

    /// The remote endpoints this client consults when online.
    #[must_use]
    pub fn remotes(&self) -> &[RepositoryEndpoint] {
        &self.remotes
    }

    fn local_versions(&self, id: &ArtifactId) -> Result<Vec<String>, RepositoryError> {
        let dir = self
            .local_repository
            .join(id.group_path())
            .join(id.artifact());
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries =
            std::fs::read_dir(dir.as_std_path()).map_err(|error| RepositoryError::LocalScan {
                path: dir.clone(),
                reason: error.to_string(),
            })?;

        let mut versions = Vec::new();
        for entry_result in entries {
            let entry = entry_result.map_err(|error| RepositoryError::LocalScan {
                path: dir.clone(),
                reason: error.to_string(),
            })?;
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if !name.starts_with('.') => versions.push(name),
                Ok(_) => {}
                Err(_) => log::debug!("ignoring non-UTF-8 entry under {dir}"),
            }
        }
        // Directory iteration order is arbitrary; order the cache the way
        // the bridge orders versions.
        versions.sort_by_cached_key(|version| GemVersion::from_artifact_version(version));
        Ok(versions)
    }

    fn remote_versions(&self, id: &ArtifactId) -> Result<Vec<String>, RepositoryError> {
        let mut versions = Vec::new();
        for endpoint in &self.remotes {
            let url = format!(
                "{}/{}/{}/maven-metadata.xml",
                endpoint.url(),
                id.group_path(),
                id.artifact()
            );
            match fetch_remote_text(&url) {
                Ok(Some(body)) => {
                    let listing = parse_version_listing(&body).map_err(|error| {
                        RepositoryError::InvalidMetadata {
                            url: url.clone(),
                            reason: error.to_string(),
                        }
                    })?;
                    versions.extend(listing);
                }
                Ok(None) => log::debug!("no version metadata at {url}"),
                Err(failure) => {
                    return Err(RepositoryError::Transport {
                        url,
                        reason: failure.reason,
                    });
                }
            }
        }
        Ok(versions)
    }

    /// Locate and read the POM text for a coordinate, local cache first.
    fn load_pom_text(&self, coordinate: &ArtifactCoordinate) -> Result<String, ModelError> {
        let id = coordinate.id();
        let pom_name = format!("{}-{}.pom", id.artifact(), coordinate.version());
        let local_path = self
            .local_repository
            .join(id.group_path())
            .join(id.artifact())
            .join(coordinate.version())
            .join(&pom_name);
        if local_path.is_file() {
            return std::fs::read_to_string(local_path.as_std_path()).map_err(|error| {
                ModelError::Unreadable {
                    coordinate: coordinate.to_string(),
                    reason: error.to_string(),
                }
            });
        }

        if !self.offline {
            for endpoint in &self.remotes {
                let url = format!(
                    "{}/{}/{}/{}/{pom_name}",
                    endpoint.url(),
                    id.group_path(),
                    id.artifact(),
                    coordinate.version()
                );
                match fetch_remote_text(&url) {
                    Ok(Some(body)) => return Ok(body),
                    Ok(None) => log::trace!("no project model at {url}"),
                    Err(failure) => {
                        return Err(ModelError::Unreadable {
                            coordinate: coordinate.to_string(),
                            reason: failure.reason,
                        });
                    }
                }
            }
        }

        Err(ModelError::NotFound {
            coordinate: coordinate.to_string(),
        })
    }

    /// Walk the parent chain of an already-parsed model.
    fn resolve_parent_chain(
        &self,
        origin: &ArtifactCoordinate,
        model: &ProjectModel,
    ) -> Result<(), ModelError> {
        let mut seen: HashSet<ArtifactCoordinate> = HashSet::new();
        seen.insert(origin.clone());

        let mut next = model.parent().map(|parent| parent.coordinate());
        while let Some(parent_coordinate) = next {
            if !seen.insert(parent_coordinate.clone()) {
                return Err(ModelError::ParentCycle {
                    coordinate: origin.to_string(),
                });
            }
            let parent_text = match self.load_pom_text(&parent_coordinate) {
                Ok(text) => text,
                Err(ModelError::NotFound { .. }) => {
                    return Err(ModelError::MissingParent {
                        coordinate: origin.to_string(),
                        parent: parent_coordinate.to_string(),
                    });
                }
                Err(other) => return Err(other),
            };
            let parent_model = parse_model(&parent_coordinate, &parent_text)?;
            next = parent_model.parent().map(|parent| parent.coordinate());
        }
        Ok(())
    }
}

fn parse_model(coordinate: &ArtifactCoordinate, text: &str) -> Result<ProjectModel, ModelError> {
    ProjectModel::parse(text).map_err(|error| ModelError::Malformed {
        coordinate: coordinate.to_string(),
        reason: error.to_string(),
    })
}

impl ArtifactRepository for MavenRepositoryClient {
    fn available_versions(&self, id: &ArtifactId) -> Result<Vec<String>, RepositoryError> {
        let mut merged = self.local_versions(id)?;
        if !self.offline {
            merged.extend(self.remote_versions(id)?);
        }

        let mut seen: HashSet<String> = HashSet::new();
        merged.retain(|version| seen.insert(version.clone()));
        log::debug!("{id}: {} version(s) available", merged.len());
        Ok(merged)
    }

    fn materialise_model(
        &self,
        coordinate: &ArtifactCoordinate,
    ) -> Result<ProjectModel, ModelError> {
        let text = self.load_pom_text(coordinate)?;
        let model = parse_model(coordinate, &text)?;
        self.resolve_parent_chain(coordinate, &model)?;
        Ok(model)
    }
}

struct FetchFailure {
    reason: String,
}

/// Fetch a URL, mapping HTTP 404 to absence rather than failure.
fn fetch_remote_text(url: &str) -> Result<Option<String>, FetchFailure> {
    match http_agent().get(url).call() {
        Ok(response) => response
            .into_body()
            .read_to_string()
            .map(Some)
            .map_err(|error| FetchFailure {
                reason: error.to_string(),
            }),
        Err(ureq::Error::StatusCode(404)) => Ok(None),
        Err(other) => Err(FetchFailure {
            reason: other.to_string(),
        }),
    }
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
