//! Gem mirror metadata refresh.
//!
//! Gem mirror endpoints regenerate their index when their update URL is
//! requested. A refresh pass walks the configured endpoints, picks out the
//! gem mirrors, and triggers each mirror host at most once per run. The
//! caller owns the [`RefreshedHosts`] record, so the once-per-host
//! guarantee spans every refresh pass that shares it.

use crate::repository::endpoint::RepositoryEndpoint;
use std::collections::HashSet;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// Network timeout for update trigger requests.
const REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosts whose mirror metadata has already been refreshed.
#[derive(Debug, Default)]
pub struct RefreshedHosts {
    hosts: HashSet<String>,
}

impl RefreshedHosts {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `host` has been refreshed through this record.
    #[must_use]
    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    /// Number of hosts refreshed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// True when no host has been refreshed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    fn mark(&mut self, host: String) {
        self.hosts.insert(host);
    }
}

/// Failure reported by an update trigger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct TriggerError {
    /// A human-readable description of the failure.
    pub reason: String,
}

/// Trait for requesting a mirror's update URL.
///
/// Abstraction allows tests to observe refresh behaviour without network
/// access.
#[cfg_attr(test, mockall::automock)]
pub trait UpdateTrigger {
    /// Request `url`, discarding the response body.
    ///
    /// # Errors
    ///
    /// Returns a [`TriggerError`] when the request fails for any reason.
    fn trigger(&self, url: &str) -> Result<(), TriggerError>;
}

/// HTTP-based trigger using `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpUpdateTrigger;

impl UpdateTrigger for HttpUpdateTrigger {
    fn trigger(&self, url: &str) -> Result<(), TriggerError> {
        // The response body is irrelevant; the request alone makes the
        // mirror rebuild its index.
        http_agent()
            .get(url)
            .call()
            .map(|_| ())
            .map_err(|error| TriggerError {
                reason: error.to_string(),
            })
    }
}

/// Errors that abort a metadata refresh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// A gem mirror endpoint URL carries no host to dedupe on.
    #[error("cannot refresh gem metadata: no host in {url}")]
    InvalidUrl {
        /// The endpoint URL that failed to parse.
        url: String,
    },

    /// The update request itself failed.
    #[error("gem metadata refresh failed for {url}: {reason}")]
    Trigger {
        /// The update URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },
}

/// What a refresh pass actually did.
#[derive(Debug, Default)]
pub struct RefreshOutcome {
    /// Update URLs that were triggered, in endpoint order.
    pub triggered: Vec<String>,
}

/// Refresh the metadata of every gem mirror among `endpoints`.
///
/// When `enabled` is false the pass is a no-op and no request is made.
/// Otherwise each endpoint recognised as a gem mirror has its update URL
/// requested, unless its host is already in `refreshed`. Hosts are marked
/// only after their trigger succeeds, and any trigger failure aborts the
/// pass.
///
/// # Errors
///
/// Returns [`RefreshError::InvalidUrl`] for a mirror URL without a host
/// and [`RefreshError::Trigger`] when an update request fails.
pub fn refresh_mirror_metadata(
    endpoints: &[RepositoryEndpoint],
    enabled: bool,
    refreshed: &mut RefreshedHosts,
    trigger: &dyn UpdateTrigger,
) -> Result<RefreshOutcome, RefreshError> {
    let mut outcome = RefreshOutcome::default();
    if !enabled {
        return Ok(outcome);
    }

    for endpoint in endpoints.iter().filter(|entry| entry.is_gem_mirror()) {
        let host = host_of(endpoint.url()).ok_or_else(|| RefreshError::InvalidUrl {
            url: endpoint.url().to_owned(),
        })?;
        if refreshed.contains(&host) {
            log::debug!("gem metadata for {host} already refreshed");
            continue;
        }

        let update_url = format!("{}/update", endpoint.url());
        trigger
            .trigger(&update_url)
            .map_err(|error| RefreshError::Trigger {
                url: update_url.clone(),
                reason: error.reason,
            })?;
        log::info!("refreshed gem metadata via {update_url}");
        refreshed.mark(host);
        outcome.triggered.push(update_url);
    }
    Ok(outcome)
}

/// Extract the host component of an endpoint URL.
fn host_of(url: &str) -> Option<String> {
    url.parse::<ureq::http::Uri>()
        .ok()
        .and_then(|uri| uri.host().map(str::to_owned))
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REFRESH_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

#[cfg(test)]
#[path = "refresh_tests.rs"]
mod tests;
