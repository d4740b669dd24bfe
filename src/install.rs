//! Gem installation into a dedicated gem home.
//!
//! Resolved artefacts packaged as gems are installed by a pluggable
//! backend; the production backend shells out to the `gem` command with
//! the configured install layout. Gems whose gemspec already exists in the
//! gem home are reported rather than reinstalled, so repeated runs
//! converge without touching installed gems.

use crate::coordinate::ResolvedArtifact;
use crate::exec::{CommandExecutor, Invocation};
use crate::gem_version::GemVersion;
use crate::naming::GemName;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use thiserror::Error;

/// Gem excluded from installation when the host runtime provides OpenSSL.
pub const OPENSSL_GEM: &str = "jruby-openssl";

/// Install root used when no gem home is configured.
pub const DEFAULT_INSTALL_ROOT: &str = "target/rubygems";

/// Layout and switches for the gem installation environment.
#[derive(Debug, Clone)]
pub struct GemsConfig {
    /// Directory gems are installed into.
    pub gem_home: Utf8PathBuf,
    /// Search path for already-installed gems.
    pub gem_path: Utf8PathBuf,
    /// Directory executables are linked into, when set.
    pub bin_dir: Option<Utf8PathBuf>,
    /// Generate rdoc documentation during installs.
    pub add_rdoc: bool,
    /// Generate ri documentation during installs.
    pub add_ri: bool,
    /// Leave the OpenSSL shim gem uninstalled.
    pub skip_openssl_gem: bool,
}

impl GemsConfig {
    /// Configuration rooted at `install_root`, with documentation
    /// generation off and no bin directory.
    #[must_use]
    pub fn rooted_at(install_root: &Utf8Path) -> Self {
        Self {
            gem_home: install_root.join("gems"),
            gem_path: install_root.join("gems"),
            bin_dir: None,
            add_rdoc: false,
            add_ri: false,
            skip_openssl_gem: false,
        }
    }
}

/// One gem install order handed to a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Gem to install.
    pub gem: GemName,
    /// Version to install.
    pub version: GemVersion,
    /// Staged gem file to install from, when one was materialised.
    pub file: Option<Utf8PathBuf>,
}

/// Errors reported by a gem installer backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The gem command could not be run at all.
    #[error("could not run the gem command: {0}")]
    Io(#[from] std::io::Error),

    /// The gem command ran and reported failure.
    #[error("gem install failed: {reason}")]
    Failed {
        /// The command's stderr, or its exit status when stderr is empty.
        reason: String,
    },
}

/// Trait for installing a single gem.
///
/// Abstraction allows tests to drive the orchestration without a Ruby
/// toolchain on the host.
#[cfg_attr(test, mockall::automock)]
pub trait GemInstallerBackend {
    /// Install the requested gem into the configured layout.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the install does not complete.
    fn install(&self, request: &InstallRequest) -> Result<(), BackendError>;
}

/// Backend shelling out to the `gem` command.
pub struct GemCommandBackend<'a> {
    executor: &'a dyn CommandExecutor,
    config: &'a GemsConfig,
}

impl<'a> GemCommandBackend<'a> {
    /// Create a backend running installs through `executor`.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor, config: &'a GemsConfig) -> Self {
        Self { executor, config }
    }

    fn invocation_for(&self, request: &InstallRequest) -> Invocation {
        let mut invocation = Invocation::new("gem")
            .arg("install")
            .arg("--ignore-dependencies")
            .args(["--install-dir", self.config.gem_home.as_str()])
            .env("GEM_HOME", self.config.gem_home.as_str())
            .env("GEM_PATH", self.config.gem_path.as_str());
        if let Some(bin_dir) = &self.config.bin_dir {
            invocation = invocation.args(["--bindir", bin_dir.as_str()]);
        }
        invocation = invocation
            .arg(if self.config.add_rdoc { "--rdoc" } else { "--no-rdoc" })
            .arg(if self.config.add_ri { "--ri" } else { "--no-ri" });
        match &request.file {
            Some(file) => invocation.args(["--local", file.as_str()]),
            None => invocation
                .arg(request.gem.as_str())
                .args(["-v", request.version.as_str()]),
        }
    }
}

impl GemInstallerBackend for GemCommandBackend<'_> {
    fn install(&self, request: &InstallRequest) -> Result<(), BackendError> {
        let invocation = self.invocation_for(request);
        let output = self.executor.run(&invocation)?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        let reason = if stderr.is_empty() {
            output.status.to_string()
        } else {
            stderr
        };
        Err(BackendError::Failed { reason })
    }
}

/// How one gem was handled by an install run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GemAction {
    /// The gem was installed by this run.
    Installed,
    /// A matching gemspec was already present.
    AlreadyPresent,
}

/// One entry of an install report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledGem {
    /// Gem that was considered.
    pub gem: GemName,
    /// Version that was considered.
    pub version: GemVersion,
    /// What happened to it.
    pub action: GemAction,
}

/// Summary of an install run, in artefact order.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Per-gem outcomes.
    pub entries: Vec<InstalledGem>,
}

impl InstallReport {
    /// Number of gems actually installed by the run.
    #[must_use]
    pub fn installed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.action == GemAction::Installed)
            .count()
    }

    /// Number of gems found already present.
    #[must_use]
    pub fn already_present_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.action == GemAction::AlreadyPresent)
            .count()
    }
}

/// Errors that abort an install run.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The gem home could not be created or written.
    #[error("gem home {path} is not writable: {reason}")]
    GemHomeNotWritable {
        /// The directory that failed the writability check.
        path: Utf8PathBuf,
        /// Description of the underlying I/O error.
        reason: String,
    },

    /// A gem's install failed; installs after it were not attempted.
    #[error("failed to install {gem} {version}: {reason}")]
    GemInstallFailed {
        /// The gem whose install failed.
        gem: String,
        /// The version that was being installed.
        version: String,
        /// The backend's description of the failure.
        reason: String,
    },

    /// I/O error preparing the install layout.
    #[error("I/O error preparing gem home: {0}")]
    Io(#[from] std::io::Error),
}

/// Install every gem-packaged artefact in `artifacts`.
///
/// Artefacts with non-gem packaging are ignored. The OpenSSL shim gem is
/// skipped when the configuration says so, and gems whose gemspec already
/// exists under the gem home are recorded as present without touching the
/// backend. The first backend failure aborts the run, naming the gem that
/// failed.
///
/// # Errors
///
/// Returns an [`InstallError`] when the gem home cannot be prepared or a
/// gem fails to install.
pub fn install_gems(
    config: &GemsConfig,
    backend: &dyn GemInstallerBackend,
    artifacts: &[ResolvedArtifact],
) -> Result<InstallReport, InstallError> {
    prepare_gem_home(config)?;

    let mut report = InstallReport::default();
    for artifact in artifacts.iter().filter(|entry| entry.packaging.is_gem()) {
        let gem = GemName::for_resolved(artifact.coordinate.id());
        if config.skip_openssl_gem && gem.as_str() == OPENSSL_GEM {
            log::debug!("leaving {OPENSSL_GEM} to the host runtime");
            continue;
        }

        let version = GemVersion::from_artifact_version(artifact.coordinate.version());
        if gemspec_path(config, &gem, &version).exists() {
            log::debug!("{gem} {version} is already installed");
            report.entries.push(InstalledGem {
                gem,
                version,
                action: GemAction::AlreadyPresent,
            });
            continue;
        }

        let request = InstallRequest {
            gem: gem.clone(),
            version: version.clone(),
            file: artifact.file.clone(),
        };
        backend
            .install(&request)
            .map_err(|error| InstallError::GemInstallFailed {
                gem: gem.to_string(),
                version: version.to_string(),
                reason: error.to_string(),
            })?;
        log::info!("installed {gem} {version}");
        report.entries.push(InstalledGem {
            gem,
            version,
            action: GemAction::Installed,
        });
    }
    Ok(report)
}

/// Path of the gemspec that marks a gem as installed.
fn gemspec_path(config: &GemsConfig, gem: &GemName, version: &GemVersion) -> Utf8PathBuf {
    config
        .gem_home
        .join("specifications")
        .join(format!("{gem}-{version}.gemspec"))
}

/// Ensure the gem home and gem path exist and the gem home is writable.
fn prepare_gem_home(config: &GemsConfig) -> Result<(), InstallError> {
    fs::create_dir_all(&config.gem_home)?;
    fs::create_dir_all(&config.gem_path)?;

    // Verify writability by attempting to create a temp file
    let test_path = config.gem_home.join(".gemify-test");
    match fs::write(&test_path, b"test") {
        Ok(()) => {
            let _ = fs::remove_file(&test_path);
            Ok(())
        }
        Err(error) => Err(InstallError::GemHomeNotWritable {
            path: config.gem_home.clone(),
            reason: error.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
