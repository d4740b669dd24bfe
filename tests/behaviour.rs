//! Behaviour-driven tests for the bridge.
//!
//! These scenarios validate gem name translation, version conversion,
//! probe recovery, mirror refresh deduplication, and install idempotence
//! using rstest-bdd.

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::{Cell, RefCell};
use tempfile::TempDir;

use gemify::coordinate::{ArtifactCoordinate, ArtifactId, Packaging, ResolvedArtifact};
use gemify::gem_version::GemVersion;
use gemify::install::{
    BackendError, GemInstallerBackend, GemsConfig, InstallReport, InstallRequest, install_gems,
};
use gemify::naming::GemName;
use gemify::probe::{ProbeOutcome, probe_versions};
use gemify::refresh::{RefreshedHosts, TriggerError, UpdateTrigger, refresh_mirror_metadata};
use gemify::repository::client::{ArtifactRepository, ModelError, RepositoryError};
use gemify::repository::endpoint::RepositoryEndpoint;
use gemify::repository::pom::ProjectModel;

// ---------------------------------------------------------------------------
// Gem name translation world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct NamingWorld {
    name: RefCell<String>,
    id: RefCell<Option<ArtifactId>>,
    failed: Cell<bool>,
}

#[fixture]
fn naming_world() -> NamingWorld {
    NamingWorld::default()
}

#[given("a dotted gem name")]
fn given_dotted_name(naming_world: &NamingWorld) {
    naming_world.name.replace("org.example.widget".to_owned());
}

#[given("a gem name carrying the maven scheme")]
fn given_schemed_name(naming_world: &NamingWorld) {
    naming_world
        .name
        .replace("mvn:org.example.widget".to_owned());
}

#[given("a gem name without a separator")]
fn given_separatorless_name(naming_world: &NamingWorld) {
    naming_world.name.replace("widget".to_owned());
}

#[when("the name is translated")]
fn when_name_translated(naming_world: &NamingWorld) {
    let name = naming_world.name.borrow();
    match GemName::new(name.as_str()).to_artifact_id() {
        Ok(id) => {
            naming_world.id.replace(Some(id));
        }
        Err(_) => naming_world.failed.set(true),
    }
}

#[then("the last segment becomes the artifact id")]
fn then_last_segment_is_artifact(naming_world: &NamingWorld) {
    let Some(id) = naming_world.id.borrow().clone() else {
        panic!("the name should have translated");
    };
    assert_eq!(id.group(), "org.example");
    assert_eq!(id.artifact(), "widget");
}

#[then("the translation fails")]
fn then_translation_fails(naming_world: &NamingWorld) {
    assert!(naming_world.failed.get());
    assert!(naming_world.id.borrow().is_none());
}

// ---------------------------------------------------------------------------
// Version conversion world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ConversionWorld {
    raw: RefCell<String>,
    converted: RefCell<Option<GemVersion>>,
}

#[fixture]
fn conversion_world() -> ConversionWorld {
    ConversionWorld::default()
}

#[given("the artefact version of an alpha release")]
fn given_alpha_version(conversion_world: &ConversionWorld) {
    conversion_world.raw.replace("1.0-alpha-1".to_owned());
}

#[when("the version is converted")]
fn when_version_converted(conversion_world: &ConversionWorld) {
    let raw = conversion_world.raw.borrow();
    conversion_world
        .converted
        .replace(Some(GemVersion::from_artifact_version(&raw)));
}

#[then("the gem version spells out the alpha qualifier")]
fn then_alpha_spelled_out(conversion_world: &ConversionWorld) {
    let Some(converted) = conversion_world.converted.borrow().clone() else {
        panic!("the version should have been converted");
    };
    assert_eq!(converted.as_str(), "1.0.alpha.1");
}

// ---------------------------------------------------------------------------
// Probe recovery world
// ---------------------------------------------------------------------------

/// Repository fake serving a scripted listing, with chosen versions
/// refusing to materialise a model.
#[derive(Default)]
struct ScriptedRepository {
    versions: Vec<String>,
    broken: Vec<String>,
}

impl ArtifactRepository for ScriptedRepository {
    fn available_versions(&self, _id: &ArtifactId) -> Result<Vec<String>, RepositoryError> {
        Ok(self.versions.clone())
    }

    fn materialise_model(
        &self,
        coordinate: &ArtifactCoordinate,
    ) -> Result<ProjectModel, ModelError> {
        if self.broken.iter().any(|entry| entry == coordinate.version()) {
            return Err(ModelError::Malformed {
                coordinate: coordinate.to_string(),
                reason: "truncated".to_owned(),
            });
        }
        ProjectModel::parse(
            "<project><groupId>org.example</groupId><artifactId>widget</artifactId><version>1</version></project>",
        )
        .map_err(|error| ModelError::Malformed {
            coordinate: coordinate.to_string(),
            reason: error.to_string(),
        })
    }
}

#[derive(Default)]
struct ProbeWorld {
    versions: RefCell<Vec<String>>,
    broken: RefCell<Vec<String>>,
    outcome: RefCell<Option<ProbeOutcome>>,
}

#[fixture]
fn probe_world() -> ProbeWorld {
    ProbeWorld::default()
}

#[given("a listing with a broken candidate in the middle")]
fn given_broken_candidate(probe_world: &ProbeWorld) {
    probe_world.versions.replace(vec![
        "1.0.0".to_owned(),
        "2.0.0-broken".to_owned(),
        "3.0.0".to_owned(),
    ]);
    probe_world.broken.replace(vec!["2.0.0-broken".to_owned()]);
}

#[when("the versions are probed")]
fn when_versions_probed(probe_world: &ProbeWorld) {
    let repository = ScriptedRepository {
        versions: probe_world.versions.borrow().clone(),
        broken: probe_world.broken.borrow().clone(),
    };
    let outcome = match probe_versions(&GemName::new("org.example.widget"), &repository) {
        Ok(outcome) => outcome,
        Err(error) => panic!("probing the scripted repository should succeed: {error}"),
    };
    probe_world.outcome.replace(Some(outcome));
}

#[then("the sound versions survive in order")]
fn then_sound_versions_survive(probe_world: &ProbeWorld) {
    let borrow = probe_world.outcome.borrow();
    let Some(outcome) = borrow.as_ref() else {
        panic!("the probe should have recorded an outcome");
    };
    let versions: Vec<&str> = outcome.versions.iter().map(GemVersion::as_str).collect();
    assert_eq!(versions, vec!["1.0.0", "3.0.0"]);
}

#[then("the broken candidate is reported as skipped")]
fn then_broken_candidate_skipped(probe_world: &ProbeWorld) {
    let borrow = probe_world.outcome.borrow();
    let Some(outcome) = borrow.as_ref() else {
        panic!("the probe should have recorded an outcome");
    };
    assert_eq!(outcome.skipped.len(), 1);
    let Some(skipped) = outcome.skipped.first() else {
        panic!("one candidate should have been skipped");
    };
    assert_eq!(skipped.version, "2.0.0-broken");
    assert!(skipped.reason.contains("truncated"));
}

// ---------------------------------------------------------------------------
// Mirror refresh world
// ---------------------------------------------------------------------------

/// Trigger fake recording every update URL it is asked for.
#[derive(Default)]
struct CountingTrigger {
    calls: RefCell<Vec<String>>,
}

impl UpdateTrigger for CountingTrigger {
    fn trigger(&self, url: &str) -> Result<(), TriggerError> {
        self.calls.borrow_mut().push(url.to_owned());
        Ok(())
    }
}

#[derive(Default)]
struct RefreshWorld {
    endpoints: RefCell<Vec<RepositoryEndpoint>>,
    enabled: Cell<bool>,
    trigger: CountingTrigger,
}

#[fixture]
fn refresh_world() -> RefreshWorld {
    RefreshWorld::default()
}

#[given("two gem mirrors sharing a host")]
fn given_mirrors_sharing_host(refresh_world: &RefreshWorld) {
    refresh_world.endpoints.replace(vec![
        RepositoryEndpoint::new("rubygems-releases", "http://gems.example.test/releases"),
        RepositoryEndpoint::new("rubygems-prereleases", "http://gems.example.test/prereleases"),
    ]);
}

#[given("metadata refresh is enabled")]
fn given_refresh_enabled(refresh_world: &RefreshWorld) {
    refresh_world.enabled.set(true);
}

#[given("metadata refresh is disabled")]
fn given_refresh_disabled(refresh_world: &RefreshWorld) {
    refresh_world.enabled.set(false);
}

#[when("the mirrors are refreshed")]
fn when_mirrors_refreshed(refresh_world: &RefreshWorld) {
    let endpoints = refresh_world.endpoints.borrow();
    let mut refreshed = RefreshedHosts::new();
    if let Err(error) = refresh_mirror_metadata(
        &endpoints,
        refresh_world.enabled.get(),
        &mut refreshed,
        &refresh_world.trigger,
    ) {
        panic!("refresh against the counting trigger should succeed: {error}");
    }
}

#[then("exactly one update request is sent")]
fn then_single_request(refresh_world: &RefreshWorld) {
    let calls = refresh_world.trigger.calls.borrow();
    assert_eq!(
        calls.as_slice(),
        ["http://gems.example.test/releases/update"]
    );
}

#[then("no update requests are sent")]
fn then_no_requests(refresh_world: &RefreshWorld) {
    assert!(refresh_world.trigger.calls.borrow().is_empty());
}

// ---------------------------------------------------------------------------
// Install idempotence world
// ---------------------------------------------------------------------------

/// Backend fake that materialises a gemspec the way a real install would,
/// so a second run can observe the gem as present.
struct RecordingBackend<'a> {
    gem_home: Utf8PathBuf,
    calls: &'a RefCell<Vec<String>>,
}

impl GemInstallerBackend for RecordingBackend<'_> {
    fn install(&self, request: &InstallRequest) -> Result<(), BackendError> {
        self.calls
            .borrow_mut()
            .push(request.gem.as_str().to_owned());
        let spec_dir = self.gem_home.join("specifications");
        std::fs::create_dir_all(&spec_dir)?;
        std::fs::write(
            spec_dir.join(format!("{}-{}.gemspec", request.gem, request.version)),
            b"Gem::Specification.new",
        )?;
        Ok(())
    }
}

#[derive(Default)]
struct InstallWorld {
    temp: RefCell<Option<TempDir>>,
    config: RefCell<Option<GemsConfig>>,
    artifacts: RefCell<Vec<ResolvedArtifact>>,
    calls: RefCell<Vec<String>>,
    second_report: RefCell<Option<InstallReport>>,
}

#[fixture]
fn install_world() -> InstallWorld {
    InstallWorld::default()
}

#[given("a project with one gem artefact")]
fn given_gem_artefact(install_world: &InstallWorld) {
    let temp = match TempDir::new() {
        Ok(temp) => temp,
        Err(error) => panic!("temp dir creation should succeed: {error}"),
    };
    let Ok(root) = Utf8PathBuf::from_path_buf(temp.path().join("bridge")) else {
        panic!("temp dir path should be UTF-8");
    };
    install_world
        .config
        .replace(Some(GemsConfig::rooted_at(&root)));
    install_world.temp.replace(Some(temp));
    install_world.artifacts.replace(vec![ResolvedArtifact {
        coordinate: ArtifactId::new("rubygems", "rails").at_version("3.0.0"),
        packaging: Packaging::Gem,
        file: None,
    }]);
}

#[when("the gems are installed twice")]
fn when_installed_twice(install_world: &InstallWorld) {
    let borrow = install_world.config.borrow();
    let Some(config) = borrow.as_ref() else {
        panic!("the gems configuration should have been prepared");
    };
    let artifacts = install_world.artifacts.borrow();
    let backend = RecordingBackend {
        gem_home: config.gem_home.clone(),
        calls: &install_world.calls,
    };

    if let Err(error) = install_gems(config, &backend, &artifacts) {
        panic!("the first run should succeed: {error}");
    }
    let second = match install_gems(config, &backend, &artifacts) {
        Ok(report) => report,
        Err(error) => panic!("the second run should succeed: {error}"),
    };
    install_world.second_report.replace(Some(second));
}

#[then("the backend is invoked only once")]
fn then_backend_once(install_world: &InstallWorld) {
    assert_eq!(install_world.calls.borrow().as_slice(), ["rails"]);
}

#[then("the second run reports the gem as already present")]
fn then_second_run_converges(install_world: &InstallWorld) {
    let borrow = install_world.second_report.borrow();
    let Some(report) = borrow.as_ref() else {
        panic!("the second run should have been recorded");
    };
    assert_eq!(report.installed_count(), 0);
    assert_eq!(report.already_present_count(), 1);
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/bridge.feature", index = 0)]
fn scenario_dotted_name_splits(naming_world: NamingWorld) {
    let _ = naming_world;
}

#[scenario(path = "tests/features/bridge.feature", index = 1)]
fn scenario_scheme_is_stripped(naming_world: NamingWorld) {
    let _ = naming_world;
}

#[scenario(path = "tests/features/bridge.feature", index = 2)]
fn scenario_separatorless_name_rejected(naming_world: NamingWorld) {
    let _ = naming_world;
}

#[scenario(path = "tests/features/bridge.feature", index = 3)]
fn scenario_alpha_gains_gem_spelling(conversion_world: ConversionWorld) {
    let _ = conversion_world;
}

#[scenario(path = "tests/features/bridge.feature", index = 4)]
fn scenario_probe_survives_broken_candidate(probe_world: ProbeWorld) {
    let _ = probe_world;
}

#[scenario(path = "tests/features/bridge.feature", index = 5)]
fn scenario_shared_host_refreshed_once(refresh_world: RefreshWorld) {
    let _ = refresh_world;
}

#[scenario(path = "tests/features/bridge.feature", index = 6)]
fn scenario_disabled_refresh_sends_nothing(refresh_world: RefreshWorld) {
    let _ = refresh_world;
}

#[scenario(path = "tests/features/bridge.feature", index = 7)]
fn scenario_repeated_installs_converge(install_world: InstallWorld) {
    let _ = install_world;
}
