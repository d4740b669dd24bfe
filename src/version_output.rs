//! Output formatting for version listings.
//!
//! Renders a probe outcome for human-readable or JSON output. The JSON
//! form always carries the excluded candidates; the human form lists them
//! only on request.

use serde::Serialize;

use crate::naming::GemName;
use crate::probe::ProbeOutcome;

/// Format a probe outcome for human-readable output.
///
/// The gem name heads the listing with its versions indented below it, in
/// probe order. With `show_skipped`, excluded candidates follow with their
/// reasons.
///
/// # Examples
///
/// ```
/// use gemify::naming::GemName;
/// use gemify::probe::ProbeOutcome;
/// use gemify::version_output::format_human;
///
/// let outcome = ProbeOutcome::default();
/// let output = format_human(&GemName::from("mvn:org.example.foo"), &outcome, false);
/// assert!(output.contains("No versions found"));
/// ```
#[must_use]
pub fn format_human(gem: &GemName, outcome: &ProbeOutcome, show_skipped: bool) -> String {
    let mut lines = Vec::new();
    if outcome.versions.is_empty() {
        lines.push(format!("No versions found for {gem}."));
    } else {
        lines.push(gem.as_str().to_owned());
        for version in &outcome.versions {
            lines.push(format!("  {version}"));
        }
    }

    if show_skipped && !outcome.skipped.is_empty() {
        lines.push("Skipped candidates:".to_owned());
        for skipped in &outcome.skipped {
            lines.push(format!("  {}: {}", skipped.version, skipped.reason));
        }
    }

    lines.join("\n")
}

/// Format a probe outcome as JSON.
///
/// # Examples
///
/// ```
/// use gemify::naming::GemName;
/// use gemify::probe::ProbeOutcome;
/// use gemify::version_output::format_json;
///
/// let outcome = ProbeOutcome::default();
/// let json = format_json(&GemName::from("mvn:org.example.foo"), &outcome);
/// assert!(json.contains("\"versions\""));
/// ```
#[must_use]
pub fn format_json(gem: &GemName, outcome: &ProbeOutcome) -> String {
    let json_data = VersionListingJson::from_outcome(gem, outcome);
    serde_json::to_string_pretty(&json_data).unwrap_or_else(|_| "{}".to_owned())
}

/// JSON-serialisable representation of a version listing.
#[derive(Debug, Serialize)]
pub struct VersionListingJson {
    /// Canonical gem name the listing is for.
    pub gem: String,
    /// Installable versions in probe order.
    pub versions: Vec<String>,
    /// Candidates excluded because their model failed to build.
    pub skipped: Vec<SkippedEntry>,
}

impl VersionListingJson {
    fn from_outcome(gem: &GemName, outcome: &ProbeOutcome) -> Self {
        Self {
            gem: gem.as_str().to_owned(),
            versions: outcome
                .versions
                .iter()
                .map(|version| version.as_str().to_owned())
                .collect(),
            skipped: outcome
                .skipped
                .iter()
                .map(|entry| SkippedEntry {
                    version: entry.version.clone(),
                    reason: entry.reason.clone(),
                })
                .collect(),
        }
    }
}

/// JSON entry for one excluded candidate.
#[derive(Debug, Serialize)]
pub struct SkippedEntry {
    /// The artefact repository version that was excluded.
    pub version: String,
    /// Why it was excluded.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gem_version::GemVersion;
    use crate::probe::SkippedVersion;

    fn sample_outcome() -> ProbeOutcome {
        ProbeOutcome {
            versions: vec![GemVersion::new("1.0.0"), GemVersion::new("3.0.0")],
            skipped: vec![SkippedVersion {
                version: "2.0.0-broken".to_owned(),
                reason: "project model does not parse".to_owned(),
            }],
        }
    }

    fn widget() -> GemName {
        GemName::from("mvn:org.example.widget")
    }

    #[test]
    fn format_human_lists_versions_under_the_gem_name() {
        let output = format_human(&widget(), &sample_outcome(), false);
        assert!(output.starts_with("mvn:org.example.widget\n"));
        assert!(output.contains("  1.0.0"));
        assert!(output.contains("  3.0.0"));
        assert!(!output.contains("2.0.0-broken"));
    }

    #[test]
    fn format_human_appends_skipped_candidates_on_request() {
        let output = format_human(&widget(), &sample_outcome(), true);
        assert!(output.contains("Skipped candidates:"));
        assert!(output.contains("2.0.0-broken: project model does not parse"));
    }

    #[test]
    fn format_human_empty_says_so() {
        let output = format_human(&widget(), &ProbeOutcome::default(), false);
        assert!(output.contains("No versions found for mvn:org.example.widget"));
    }

    #[test]
    fn format_json_always_carries_skipped_candidates() {
        let json = format_json(&widget(), &sample_outcome());
        assert!(json.contains("\"gem\""));
        assert!(json.contains("\"2.0.0-broken\""));
    }

    #[test]
    fn format_json_is_valid_json() {
        let json = format_json(&widget(), &sample_outcome());
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("should be valid JSON");
        assert!(parsed.get("versions").is_some());
        assert!(
            parsed
                .get("versions")
                .and_then(|versions| versions.as_array())
                .is_some_and(|versions| versions.len() == 2)
        );
    }
}
