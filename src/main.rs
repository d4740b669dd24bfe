//! Gemify CLI entrypoint.
//!
//! This binary installs gem-packaged Maven artefacts into a local gem
//! home, probes the versions a repository offers for a coordinate, and
//! scaffolds Rails applications wired to the bridge. Progress and errors
//! go to stderr; listings go to stdout.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use gemify::cli::{Cli, Command, InstallArgs, NewArgs};
use gemify::error::Result;
use gemify::exec::SystemCommandExecutor;
use gemify::install::{
    DEFAULT_INSTALL_ROOT, GemAction, GemCommandBackend, GemsConfig, InstallReport, install_gems,
};
use gemify::project::{DESCRIPTOR_FILE, ProjectDescriptor};
use gemify::refresh::{HttpUpdateTrigger, RefreshedHosts, refresh_mirror_metadata};
use gemify::scaffold::{ScaffoldRequest, scaffold_app};
use gemify::versions::run_versions;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Some(Command::Versions(args)) => {
            let mut stdout = std::io::stdout();
            run_versions(args, &mut stdout)
        }
        Some(Command::New(args)) => run_new(args, stderr),
        Some(Command::Install(_)) | None => run_install(cli.install_args(), stderr),
    }
}

/// Installs the gem artefacts a project descriptor declares.
fn run_install(args: &InstallArgs, stderr: &mut dyn Write) -> Result<()> {
    let descriptor_path = args
        .project
        .clone()
        .unwrap_or_else(|| Utf8PathBuf::from(DESCRIPTOR_FILE));
    let descriptor = ProjectDescriptor::load(&descriptor_path)?;
    let config = gems_config_for(args);

    refresh_mirrors(args, &descriptor, stderr)?;

    if !args.quiet {
        write_stderr_line(
            stderr,
            format!("Installing gems from {descriptor_path} into {}...", config.gem_home),
        );
    }

    let executor = SystemCommandExecutor;
    let backend = GemCommandBackend::new(&executor, &config);
    let report = install_gems(&config, &backend, &descriptor.resolved_artifacts())?;
    report_install(&report, args, stderr);
    Ok(())
}

/// Asks each gem mirror to refresh its index when the flags request it.
///
/// The refreshed-host record lives for one invocation, so a mirror host
/// is asked at most once per run however many endpoints share it.
fn refresh_mirrors(
    args: &InstallArgs,
    descriptor: &ProjectDescriptor,
    stderr: &mut dyn Write,
) -> Result<()> {
    let mut refreshed = RefreshedHosts::new();
    let outcome = refresh_mirror_metadata(
        &descriptor.endpoints(),
        args.wants_refresh(),
        &mut refreshed,
        &HttpUpdateTrigger,
    )?;

    if !args.quiet {
        for url in &outcome.triggered {
            write_stderr_line(stderr, format!("Refreshed gem metadata via {url}"));
        }
    }

    Ok(())
}

/// Scaffolds a Rails application and reports where it landed.
fn run_new(args: &NewArgs, stderr: &mut dyn Write) -> Result<()> {
    let request = scaffold_request_for(args);
    let executor = SystemCommandExecutor;
    let outcome = scaffold_app(&request, &executor)?;

    for warning in &outcome.warnings {
        write_stderr_line(stderr, format!("warning: {warning}"));
    }
    write_stderr_line(
        stderr,
        format!("Created {} ({} database)", outcome.app_path, outcome.database),
    );
    write_stderr_line(
        stderr,
        format!("Project descriptor written to {}", outcome.descriptor_path),
    );

    Ok(())
}

/// Derives the gem layout configuration from the install arguments.
///
/// An explicit gem home pulls the gem path along with it unless the gem
/// path is itself overridden.
fn gems_config_for(args: &InstallArgs) -> GemsConfig {
    let mut config = GemsConfig::rooted_at(Utf8Path::new(DEFAULT_INSTALL_ROOT));
    match (&args.gem_home, &args.gem_path) {
        (Some(gem_home), Some(gem_path)) => {
            config.gem_home = gem_home.clone();
            config.gem_path = gem_path.clone();
        }
        (Some(gem_home), None) => {
            config.gem_home = gem_home.clone();
            config.gem_path = gem_home.clone();
        }
        (None, Some(gem_path)) => {
            config.gem_path = gem_path.clone();
        }
        (None, None) => {}
    }
    config.bin_dir = args.bindir.clone();
    config.add_rdoc = args.rdoc;
    config.add_ri = args.ri;
    config.skip_openssl_gem = args.skip_openssl_gem;
    config
}

fn scaffold_request_for(args: &NewArgs) -> ScaffoldRequest {
    ScaffoldRequest {
        app_path: args.app_path.clone(),
        database: args.database.clone(),
        framework_version: args.framework_version.clone(),
        group_id: args.group_id.clone(),
        project_version: args.project_version.clone(),
        passthrough: args.args.clone(),
    }
}

/// Reports the install outcome unless quiet.
fn report_install(report: &InstallReport, args: &InstallArgs, stderr: &mut dyn Write) {
    if args.quiet {
        return;
    }
    if args.verbosity > 0 {
        for entry in &report.entries {
            let note = match entry.action {
                GemAction::Installed => "installed",
                GemAction::AlreadyPresent => "already present",
            };
            write_stderr_line(stderr, format!("  {} {} ({note})", entry.gem, entry.version));
        }
    }
    write_stderr_line(stderr, success_message(report));
}

fn success_message(report: &InstallReport) -> String {
    format!(
        "Installed {} gem(s); {} already present.",
        report.installed_count(),
        report.already_present_count()
    )
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
