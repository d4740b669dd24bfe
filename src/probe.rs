//! Version probing across artefact repositories.
//!
//! A probe lists every version the repositories advertise for a gem's
//! artefact, then validates each candidate by materialising its project
//! model. Candidates whose model cannot be built are excluded and recorded
//! rather than failing the probe; listing failures are fatal.

use crate::gem_version::GemVersion;
use crate::naming::{GemName, GemNameError};
use crate::repository::client::{ArtifactRepository, RepositoryError};
use thiserror::Error;

/// A version candidate excluded from a probe result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedVersion {
    /// The artefact repository version that was excluded.
    pub version: String,
    /// Why the candidate's project model could not be built.
    pub reason: String,
}

/// The result of probing one gem's artefact versions.
#[derive(Debug, Default)]
pub struct ProbeOutcome {
    /// Installable versions in repository listing order, in gem form.
    pub versions: Vec<GemVersion>,
    /// Candidates excluded because their model failed to build.
    pub skipped: Vec<SkippedVersion>,
}

/// Errors that abort a probe outright.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The gem name does not map to artefact coordinates.
    #[error("cannot probe versions: {0}")]
    Name(#[from] GemNameError),

    /// The repository listing could not be read.
    #[error("version listing failed: {0}")]
    Listing(#[from] RepositoryError),
}

/// Probe the repositories for installable versions of `gem`.
///
/// Each listed version is accepted only once its project model
/// materialises; failures there land in [`ProbeOutcome::skipped`] with the
/// cause, logged at debug level. Listing order is preserved and duplicates
/// are kept as the repositories report them.
///
/// # Errors
///
/// Returns [`ProbeError::Name`] when the gem name carries no group
/// separator, and [`ProbeError::Listing`] when a repository cannot be
/// consulted at all.
pub fn probe_versions(
    gem: &GemName,
    repository: &dyn ArtifactRepository,
) -> Result<ProbeOutcome, ProbeError> {
    let id = gem.to_artifact_id()?;
    let listed = repository.available_versions(&id)?;

    let mut outcome = ProbeOutcome::default();
    for version in listed {
        let coordinate = id.at_version(version.as_str());
        match repository.materialise_model(&coordinate) {
            Ok(_) => outcome
                .versions
                .push(GemVersion::from_artifact_version(&version)),
            Err(error) => {
                log::debug!("skipping {coordinate}: {error}");
                outcome.skipped.push(SkippedVersion {
                    version,
                    reason: error.to_string(),
                });
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
