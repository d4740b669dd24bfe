//! Versions command implementation.
//!
//! This module provides the `run_versions` command handler and supporting
//! functions for probing the installable versions of one gem coordinate
//! and displaying the result.

use std::io::Write;

use crate::cli::VersionsArgs;
use crate::error::{GemifyError, Result};
use crate::naming::GemName;
use crate::probe::{ProbeError, probe_versions};
use crate::project::ProjectDescriptor;
use crate::repository::client::{
    ArtifactRepository, MavenRepositoryClient, default_local_repository,
};
use crate::repository::endpoint::RepositoryEndpoint;
use crate::version_output::{format_human, format_json};

/// Probes the installable versions of a gem coordinate and lists them.
///
/// The local repository defaults to the conventional one under the home
/// directory; remotes come from repeated `--remote` URLs plus, when a
/// descriptor is named, the repositories of the project. Offline mode
/// ignores remotes entirely.
///
/// Output is written to stdout (human-readable by default, JSON with
/// `--json`). Candidates excluded by a failed model build appear in the
/// human listing only at raised verbosity; the JSON form always carries
/// them.
///
/// # Errors
///
/// Returns an error if:
/// - No local repository is given and none can be derived
/// - The gem name does not translate to an artefact id
/// - A repository source cannot be enumerated
/// - Writing to stdout fails
pub fn run_versions(args: &VersionsArgs, stdout: &mut dyn Write) -> Result<()> {
    let client = repository_client(args)?;
    run_versions_with(args, stdout, &client)
}

/// Internal implementation with an injectable repository for testability.
fn run_versions_with(
    args: &VersionsArgs,
    stdout: &mut dyn Write,
    repository: &dyn ArtifactRepository,
) -> Result<()> {
    let gem = GemName::new(&args.gemname);
    let outcome = probe_versions(&gem, repository)?;

    // Probing has already translated the name, so this cannot fail now.
    let id = gem.to_artifact_id().map_err(ProbeError::from)?;
    let canonical = GemName::for_artifact(&id);

    let output = if args.json {
        format_json(&canonical, &outcome)
    } else {
        format_human(&canonical, &outcome, args.verbosity > 0)
    };

    writeln!(stdout, "{output}").map_err(|source| GemifyError::WriteFailed { source })?;

    Ok(())
}

/// Builds the repository client the command arguments describe.
fn repository_client(args: &VersionsArgs) -> Result<MavenRepositoryClient> {
    let local = args
        .local_repository
        .clone()
        .or_else(default_local_repository)
        .ok_or(GemifyError::NoLocalRepository)?;

    let mut remotes = Vec::new();
    if let Some(path) = &args.project {
        let descriptor = ProjectDescriptor::load(path)?;
        remotes.extend(descriptor.endpoints());
    }
    for (index, url) in args.remote.iter().enumerate() {
        remotes.push(RepositoryEndpoint::new(format!("remote{}", index + 1), url));
    }

    Ok(MavenRepositoryClient::new(local, remotes, args.offline))
}
