//! Error types for the gemify CLI.
//!
//! Each bridge operation reports failures through its own error enum; this
//! module gathers them into the single type the binary surfaces to the
//! user, plus a semantic variant for configuration gaps no operation owns.

use thiserror::Error;

/// Errors that can surface from a bridge command.
#[derive(Debug, Error)]
pub enum GemifyError {
    /// Version probing failed before any candidate could be reported.
    #[error("{0}")]
    Probe(#[from] crate::probe::ProbeError),

    /// The project descriptor could not be loaded or written.
    #[error("{0}")]
    Project(#[from] crate::project::ProjectError),

    /// A gem mirror refused or mangled its metadata refresh.
    #[error("{0}")]
    Refresh(#[from] crate::refresh::RefreshError),

    /// Gem installation failed.
    #[error("{0}")]
    Install(#[from] crate::install::InstallError),

    /// Application scaffolding failed.
    #[error("{0}")]
    Scaffold(#[from] crate::scaffold::ScaffoldError),

    /// No local repository was given and none could be derived.
    #[error("could not determine the local repository; pass --local-repository")]
    NoLocalRepository,

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`GemifyError`].
pub type Result<T> = std::result::Result<T, GemifyError>;
