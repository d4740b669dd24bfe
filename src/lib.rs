//! Gemify bridge library.
//!
//! This crate bridges Maven artefact repositories into the RubyGems world:
//! it converts between gem names and artefact coordinates, probes the
//! versions a repository can actually deliver, nudges proxy mirrors to
//! refresh their gem indexes, and installs gem-packaged artefacts into a
//! local gem home. It is used by the `gemify` CLI binary and can be
//! consumed programmatically for testing or custom bridging workflows.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`coordinate`] - Artefact ids, coordinates, and packaging labels
//! - [`error`] - Aggregated error type surfaced by the binary
//! - [`exec`] - External command invocation abstraction
//! - [`gem_version`] - Gem-compatible version conversion and ordering
//! - [`install`] - Gem installation into a managed gem home
//! - [`naming`] - Gem name to artefact id translation
//! - [`probe`] - Installable-version probing with per-candidate recovery
//! - [`project`] - Project descriptor loading and generation
//! - [`refresh`] - Gem mirror metadata refresh with host deduplication
//! - [`repository`] - Artefact repository access, local cache and remote
//! - [`scaffold`] - Rails application scaffolding wired to the bridge
//! - [`version_output`] - Output formatting for version listings
//! - [`versions`] - Versions command implementation

pub mod cli;
pub mod coordinate;
pub mod error;
pub mod exec;
pub mod gem_version;
pub mod install;
pub mod naming;
pub mod probe;
pub mod project;
pub mod refresh;
pub mod repository;
pub mod scaffold;
pub mod version_output;
pub mod versions;
