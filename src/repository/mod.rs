//! Artefact repository access.
//!
//! This module family covers everything the bridge asks of an artefact
//! repository: enumerating the versions an artefact is published under and
//! materialising the project model behind one candidate version.
//!
//! # Sub-modules
//!
//! - [`client`] — The [`client::ArtifactRepository`] trait and the
//!   HTTP-plus-local-cache production implementation.
//! - [`endpoint`] — Remote repository descriptions (`RepositoryEndpoint`).
//! - [`metadata`] — Version listing parsed from `maven-metadata.xml`.
//! - [`pom`] — Minimal project model parsing and parent-chain resolution.

pub mod client;
pub mod endpoint;
pub mod metadata;
pub mod pom;
