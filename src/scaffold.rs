//! Application scaffolding via the framework generator.
//!
//! `gemify new` drives the framework's own `new` generator, pinned to the
//! requested release, then drops a project descriptor into the generated
//! application so that `gemify install` can materialise its gems. The
//! database engine and application path may be given explicitly or
//! recovered from the raw arguments forwarded to the generator.

use crate::exec::{CommandExecutor, Invocation};
use crate::gem_version::GemVersion;
use crate::naming::RUBYGEMS_GROUP_ID;
use crate::project::{
    ArtifactEntry, DESCRIPTOR_FILE, PackageSection, ProjectDescriptor, ProjectError,
    RepositoryEntry,
};
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Framework gem the generated application is pinned to.
const FRAMEWORK_GEM: &str = "rails";
/// Framework release line the generator supports.
const SUPPORTED_MAJOR: u64 = 3;
/// Oldest framework version known to scaffold cleanly.
const SMALLEST_WORKING_VERSION: &str = "3.0.0.rc";
/// Database engine used when none is requested.
const DEFAULT_DATABASE: &str = "sqlite3";

/// Identifier of the gem mirror written into generated descriptors.
pub const DEFAULT_GEM_MIRROR_ID: &str = "rubygems-releases";
/// URL of the gem mirror written into generated descriptors.
pub const DEFAULT_GEM_MIRROR_URL: &str = "http://rubygems-proxy.torquebox.org/releases";

/// Errors that abort scaffolding.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The requested framework version is outside the supported line.
    #[error("framework version {version} is not a 3.x release")]
    UnsupportedFrameworkVersion {
        /// The version that was requested.
        version: String,
    },

    /// No application path was given or recoverable.
    #[error("no application path given and none found among the generator arguments")]
    MissingAppPath,

    /// The generator could not be run at all.
    #[error("could not run the framework generator: {0}")]
    Io(#[from] std::io::Error),

    /// The generator ran and reported failure.
    #[error("framework generator failed: {reason}")]
    GeneratorFailed {
        /// The generator's stderr, or its exit status when stderr is empty.
        reason: String,
    },

    /// The application was generated but its descriptor was not written.
    #[error("generated the application but failed to write its descriptor: {0}")]
    Descriptor(#[from] ProjectError),
}

/// A scaffold order.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    /// Application path; recovered from `passthrough` when absent.
    pub app_path: Option<Utf8PathBuf>,
    /// Database engine; recovered from `passthrough`, then defaulted.
    pub database: Option<String>,
    /// Framework version to generate with and pin in the descriptor.
    pub framework_version: String,
    /// Artefact group of the generated project.
    pub group_id: String,
    /// Version of the generated project.
    pub project_version: String,
    /// Raw arguments forwarded to the generator.
    pub passthrough: Vec<String>,
}

/// What scaffolding produced.
#[derive(Debug)]
pub struct ScaffoldOutcome {
    /// Application directory that was generated.
    pub app_path: Utf8PathBuf,
    /// Database engine the application was generated with.
    pub database: String,
    /// Descriptor written into the application directory.
    pub descriptor_path: Utf8PathBuf,
    /// Warnings for the caller to surface.
    pub warnings: Vec<String>,
}

/// Generate a fresh application and write its project descriptor.
///
/// The framework version must belong to the supported release line.
/// Versions older than the oldest known-working release produce a warning
/// in the outcome rather than an error. A database flag inside the
/// passthrough arguments is honoured unless the request names an engine
/// explicitly, and the flag is stripped before forwarding so the
/// generator sees it exactly once.
///
/// # Errors
///
/// Returns a [`ScaffoldError`] when the version is unsupported, no
/// application path can be determined, the generator fails, or the
/// descriptor cannot be written.
pub fn scaffold_app(
    request: &ScaffoldRequest,
    executor: &dyn CommandExecutor,
) -> Result<ScaffoldOutcome, ScaffoldError> {
    let mut warnings = Vec::new();
    check_framework_version(&request.framework_version, &mut warnings)?;

    let mut forwarded = request.passthrough.clone();
    let recovered_database = extract_database(&mut forwarded);
    let database = request
        .database
        .clone()
        .or(recovered_database)
        .unwrap_or_else(|| DEFAULT_DATABASE.to_owned());
    let app_path = match &request.app_path {
        Some(path) => path.clone(),
        None => recover_app_path(&mut forwarded)?,
    };

    run_generator(
        executor,
        &app_path,
        &database,
        &request.framework_version,
        &forwarded,
    )?;

    let descriptor = descriptor_for(request, &app_path);
    let descriptor_path = app_path.join(DESCRIPTOR_FILE);
    descriptor.store(&descriptor_path)?;

    Ok(ScaffoldOutcome {
        app_path,
        database,
        descriptor_path,
        warnings,
    })
}

fn check_framework_version(
    version: &str,
    warnings: &mut Vec<String>,
) -> Result<(), ScaffoldError> {
    let requested = GemVersion::new(version);
    if requested.major() != Some(SUPPORTED_MAJOR) {
        return Err(ScaffoldError::UnsupportedFrameworkVersion {
            version: version.to_owned(),
        });
    }
    if requested < GemVersion::new(SMALLEST_WORKING_VERSION) {
        warnings.push(format!(
            "framework versions before {SMALLEST_WORKING_VERSION} might not scaffold correctly"
        ));
    }
    Ok(())
}

/// Remove a database flag from the forwarded arguments and return its
/// engine.
fn extract_database(forwarded: &mut Vec<String>) -> Option<String> {
    if let Some(index) = forwarded
        .iter()
        .position(|token| token == "-d" || token == "--database")
    {
        forwarded.remove(index);
        if index < forwarded.len() {
            return Some(forwarded.remove(index));
        }
        return None;
    }
    if let Some(index) = forwarded
        .iter()
        .position(|token| token.starts_with("--database="))
    {
        let token = forwarded.remove(index);
        return token.strip_prefix("--database=").map(str::to_owned);
    }
    None
}

/// Take the first token that is neither a flag nor a flag's value as the
/// application path, removing it from the forwarded arguments.
fn recover_app_path(forwarded: &mut Vec<String>) -> Result<Utf8PathBuf, ScaffoldError> {
    let mut skip_value = false;
    let index = forwarded
        .iter()
        .position(|token| {
            if skip_value {
                skip_value = false;
                return false;
            }
            if takes_value(token) {
                skip_value = true;
                return false;
            }
            !token.starts_with('-')
        })
        .ok_or(ScaffoldError::MissingAppPath)?;
    Ok(Utf8PathBuf::from(forwarded.remove(index)))
}

/// Generator flags whose value is the following token.
fn takes_value(token: &str) -> bool {
    matches!(
        token,
        "-d" | "--database" | "-r" | "--ruby" | "-b" | "--builder" | "-m" | "--template"
    )
}

fn run_generator(
    executor: &dyn CommandExecutor,
    app_path: &Utf8Path,
    database: &str,
    framework_version: &str,
    forwarded: &[String],
) -> Result<(), ScaffoldError> {
    // The underscore selector pins the generator to the requested release.
    let invocation = Invocation::new(FRAMEWORK_GEM)
        .arg(format!("_{framework_version}_"))
        .arg("new")
        .arg(app_path.as_str())
        .args(["-d", database])
        .args(forwarded.iter().cloned());
    let output = executor.run(&invocation)?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
    let reason = if stderr.is_empty() {
        output.status.to_string()
    } else {
        stderr
    };
    Err(ScaffoldError::GeneratorFailed { reason })
}

fn descriptor_for(request: &ScaffoldRequest, app_path: &Utf8Path) -> ProjectDescriptor {
    let name = app_path
        .file_name()
        .unwrap_or(app_path.as_str())
        .to_owned();
    ProjectDescriptor {
        package: PackageSection {
            name,
            group: request.group_id.clone(),
            version: request.project_version.clone(),
        },
        repositories: vec![RepositoryEntry {
            id: DEFAULT_GEM_MIRROR_ID.to_owned(),
            url: DEFAULT_GEM_MIRROR_URL.to_owned(),
        }],
        artifacts: vec![ArtifactEntry {
            group: RUBYGEMS_GROUP_ID.to_owned(),
            name: FRAMEWORK_GEM.to_owned(),
            version: request.framework_version.clone(),
            packaging: "gem".to_owned(),
            file: None,
        }],
    }
}

#[cfg(test)]
#[path = "scaffold_tests.rs"]
mod tests;
