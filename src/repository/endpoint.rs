//! Remote repository descriptions.

use std::fmt;

/// Repository id prefix marking a remote as a gem registry mirror.
///
/// Mirrors are discriminated purely by this id convention; no content
/// negotiation happens.
pub const GEM_MIRROR_ID_PREFIX: &str = "rubygems";

/// A remote repository the bridge may talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEndpoint {
    id: String,
    url: String,
}

impl RepositoryEndpoint {
    /// Create an endpoint from its id and base URL.
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }

    /// The repository id as configured.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The base URL, without a trailing slash.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// True when this endpoint is a gem registry mirror.
    ///
    /// # Examples
    ///
    /// ```
    /// use gemify::repository::endpoint::RepositoryEndpoint;
    ///
    /// assert!(RepositoryEndpoint::new("rubygems-releases", "https://rubygems.org").is_gem_mirror());
    /// assert!(!RepositoryEndpoint::new("central", "https://repo1.maven.org/maven2").is_gem_mirror());
    /// ```
    #[must_use]
    pub fn is_gem_mirror(&self) -> bool {
        self.id.starts_with(GEM_MIRROR_ID_PREFIX)
    }
}

impl fmt::Display for RepositoryEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::exact("rubygems", true)]
    #[case::prefixed("rubygems-releases", true)]
    #[case::prefixed_snapshots("rubygems-prereleases", true)]
    #[case::central("central", false)]
    #[case::similar("rubygem", false)]
    fn mirror_discrimination_uses_id_prefix(#[case] id: &str, #[case] expected: bool) {
        let endpoint = RepositoryEndpoint::new(id, "https://example.test");
        assert_eq!(endpoint.is_gem_mirror(), expected);
    }

    #[test]
    fn url_strips_trailing_slash() {
        let endpoint = RepositoryEndpoint::new("central", "https://repo1.maven.org/maven2/");
        assert_eq!(endpoint.url(), "https://repo1.maven.org/maven2");
    }

    #[test]
    fn display_shows_id_and_url() {
        let endpoint = RepositoryEndpoint::new("central", "https://repo1.maven.org/maven2");
        assert_eq!(
            endpoint.to_string(),
            "central (https://repo1.maven.org/maven2)"
        );
    }
}
