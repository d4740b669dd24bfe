//! CLI argument definitions for the gemify bridge.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Install Maven artefacts as RubyGems.
#[derive(Parser, Debug)]
#[command(name = "gemify")]
#[command(version, about)]
#[command(long_about = concat!(
    "Install Maven artefacts as RubyGems.\n\n",
    "Gemify bridges the Maven and RubyGems worlds: it lists the versions a ",
    "Maven repository publishes for a gem-name coordinate, asks a proxy ",
    "mirror to refresh its gem index, and installs gem-packaged artefacts ",
    "into a local gem home without touching the host Ruby installation.\n\n",
    "By default, the artefacts listed in the project descriptor ",
    "(gemify.toml) are installed. Use the versions subcommand to probe a ",
    "repository, or new to scaffold a Rails application wired to the ",
    "bridge.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Install the gems a project descriptor declares:\n",
    "    $ gemify\n\n",
    "  Install from an explicit descriptor into a chosen gem home:\n",
    "    $ gemify install -p app/gemify.toml --gem-home vendor/gems\n\n",
    "  List the installable versions of a coordinate:\n",
    "    $ gemify versions org.jruby.jruby-complete\n\n",
    "  Probe a specific mirror, reporting rejected candidates:\n",
    "    $ gemify versions mvn:org.slf4j.slf4j-api --remote ",
    "http://mirror.example/releases -v\n\n",
    "  Scaffold a Rails application pinned through the bridge:\n",
    "    $ gemify new blog --framework-version 3.0.0 -- -d mysql\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Install arguments (used when no subcommand is given).
    #[command(flatten)]
    pub install: InstallArgs,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Install gem artefacts (default when no subcommand given).
    Install(InstallArgs),

    /// List the versions a repository offers for a gem coordinate.
    Versions(VersionsArgs),

    /// Scaffold a Rails application managed through the bridge.
    New(NewArgs),
}

/// Arguments for the install command.
#[derive(Parser, Debug, Clone)]
pub struct InstallArgs {
    /// Project descriptor to install from [default: ./gemify.toml].
    #[arg(short, long, value_name = "FILE")]
    pub project: Option<Utf8PathBuf>,

    /// Directory gems are installed into [default: target/rubygems/gems].
    #[arg(long, value_name = "DIR")]
    pub gem_home: Option<Utf8PathBuf>,

    /// Gem search path exported to the gem command [default: the gem home].
    #[arg(long, value_name = "DIR")]
    pub gem_path: Option<Utf8PathBuf>,

    /// Directory executable gem stubs are written to.
    #[arg(long, value_name = "DIR")]
    pub bindir: Option<Utf8PathBuf>,

    /// Generate RDoc documentation for installed gems.
    #[arg(long)]
    pub rdoc: bool,

    /// Generate ri data for installed gems.
    #[arg(long)]
    pub ri: bool,

    /// Leave jruby-openssl to the host instead of installing it.
    #[arg(long)]
    pub skip_openssl_gem: bool,

    /// Ask each gem mirror to refresh its index before installing.
    #[arg(long, conflicts_with = "offline")]
    pub update: bool,

    /// Resolve from the local repository only; no network requests.
    #[arg(long)]
    pub offline: bool,

    /// Increase output verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        alias = "verbosity",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Arguments for the versions command.
#[derive(Parser, Debug, Clone)]
pub struct VersionsArgs {
    /// Gem-name coordinate to probe (for example org.jruby.jruby-complete).
    #[arg(value_name = "GEMNAME")]
    pub gemname: String,

    /// Project descriptor whose repositories are probed too.
    #[arg(short, long, value_name = "FILE")]
    pub project: Option<Utf8PathBuf>,

    /// Local artefact repository to scan [default: ~/.m2/repository].
    #[arg(long, value_name = "DIR")]
    pub local_repository: Option<Utf8PathBuf>,

    /// Remote repository URL to probe (can be repeated).
    #[arg(long, value_name = "URL")]
    pub remote: Vec<String>,

    /// Scan the local repository only; no network requests.
    #[arg(long)]
    pub offline: bool,

    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        alias = "verbosity",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Arguments for the new command.
#[derive(Parser, Debug, Clone)]
pub struct NewArgs {
    /// Directory the application is generated into.
    #[arg(value_name = "PATH")]
    pub app_path: Option<Utf8PathBuf>,

    /// Database engine the generator configures [default: sqlite3].
    #[arg(short = 'd', long, value_name = "ENGINE")]
    pub database: Option<String>,

    /// Rails release to scaffold with (must be a 3.x version).
    #[arg(long, value_name = "VERSION", default_value = "3.0.0")]
    pub framework_version: String,

    /// Group identifier recorded in the project descriptor.
    #[arg(long, value_name = "GROUP", default_value = "rails")]
    pub group_id: String,

    /// Project version recorded in the project descriptor.
    #[arg(long, value_name = "VERSION", default_value = "1.0-SNAPSHOT")]
    pub project_version: String,

    /// Extra arguments forwarded verbatim to the Rails generator.
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

impl InstallArgs {
    /// Return true when mirror metadata should be refreshed before install.
    ///
    /// A refresh is requested with `--update` and suppressed by `--offline`.
    /// The parser rejects the pair on the command line, but programmatic
    /// construction can still set both, so offline wins here too.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemify::cli::InstallArgs;
    ///
    /// let default_args = InstallArgs::default();
    /// assert!(!default_args.wants_refresh());
    ///
    /// let update_args = InstallArgs {
    ///     update: true,
    ///     ..InstallArgs::default()
    /// };
    /// assert!(update_args.wants_refresh());
    ///
    /// let offline_args = InstallArgs {
    ///     update: true,
    ///     offline: true,
    ///     ..InstallArgs::default()
    /// };
    /// assert!(!offline_args.wants_refresh());
    /// ```
    #[must_use]
    pub const fn wants_refresh(&self) -> bool {
        self.update && !self.offline
    }
}

impl Default for InstallArgs {
    /// Creates an `InstallArgs` instance with all flags disabled and no
    /// descriptor selected.
    ///
    /// This is useful for testing or programmatic construction where only
    /// specific fields need to be set.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemify::cli::InstallArgs;
    ///
    /// let args = InstallArgs::default();
    /// assert!(args.project.is_none());
    /// assert!(!args.update);
    /// assert!(!args.skip_openssl_gem);
    /// ```
    fn default() -> Self {
        Self {
            project: None,
            gem_home: None,
            gem_path: None,
            bindir: None,
            rdoc: false,
            ri: false,
            skip_openssl_gem: false,
            update: false,
            offline: false,
            verbosity: 0,
            quiet: false,
        }
    }
}

impl Default for NewArgs {
    /// Creates a `NewArgs` instance with the stock Rails 3 pin and no
    /// application path.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemify::cli::NewArgs;
    ///
    /// let args = NewArgs::default();
    /// assert!(args.app_path.is_none());
    /// assert_eq!(args.framework_version, "3.0.0");
    /// assert_eq!(args.project_version, "1.0-SNAPSHOT");
    /// ```
    fn default() -> Self {
        Self {
            app_path: None,
            database: None,
            framework_version: "3.0.0".to_owned(),
            group_id: "rails".to_owned(),
            project_version: "1.0-SNAPSHOT".to_owned(),
            args: Vec::new(),
        }
    }
}

impl Cli {
    /// Returns the effective install arguments.
    ///
    /// If an `Install` subcommand was provided, returns those arguments.
    /// Otherwise returns the flattened install arguments for backwards
    /// compatibility.
    ///
    /// # Note
    ///
    /// When another subcommand is active, this returns the default flattened
    /// install arguments. Callers should check `self.command` before calling
    /// this method if those cases need different handling.
    #[must_use]
    pub fn install_args(&self) -> &InstallArgs {
        match &self.command {
            Some(Command::Install(args)) => args,
            Some(Command::Versions(_) | Command::New(_)) | None => &self.install,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
