//! Tests for gem version ordering and the artefact version mapping.

use super::*;
use rstest::rstest;
use std::collections::HashSet;

#[rstest]
#[case::plain_numeric("1.2.3", "1.2.3")]
#[case::two_part_numeric("1.0", "1.0")]
#[case::snapshot("1.0-SNAPSHOT", "1.0.snapshot")]
#[case::release_candidate("1.0-RC1", "1.0.rc.1")]
#[case::spelled_alpha("1.0-alpha-1", "1.0.alpha.1")]
#[case::short_alpha("1.0-a1", "1.0.alpha.1")]
#[case::unseparated_alpha("1.0a1", "1.0.alpha.1")]
#[case::short_beta("1.0-b2", "1.0.beta.2")]
#[case::short_milestone("1.0-m1", "1.0.milestone.1")]
#[case::candidate_alias("1.0-cr", "1.0.rc")]
#[case::general_availability("1.0-ga", "1.0")]
#[case::final_marker("1.0-final", "1.0")]
#[case::release_marker("1.0.RELEASE", "1.0")]
#[case::build_number("1.0-1", "1.0.0.1")]
#[case::build_after_marker("1.0-ga-1", "1.0.0.1")]
#[case::service_pack("1.0-sp1", "1.0.0.1.sp.1")]
#[case::unknown_qualifier("1.0-custom", "1.0.custom")]
#[case::latest_meta("LATEST", DUMMY_VERSION)]
#[case::release_meta("RELEASE", DUMMY_VERSION)]
#[case::empty(" ", DUMMY_VERSION)]
#[case::alphabetic_garbage("not-a-version", DUMMY_VERSION)]
fn maps_artifact_versions(#[case] artifact_version: &str, #[case] expected: &str) {
    assert_eq!(
        GemVersion::from_artifact_version(artifact_version).as_str(),
        expected
    );
}

/// Artefact repository ordering must survive the mapping.
///
/// The inputs are listed in strictly ascending repository order; the mapped
/// gem versions must preserve that order pairwise.
#[test]
fn mapping_is_monotone_over_the_qualifier_family() {
    let ascending = [
        "1.0-alpha-1",
        "1.0-beta-1",
        "1.0-m1",
        "1.0-RC1",
        "1.0-SNAPSHOT",
        "1.0",
        "1.0-sp1",
        "1.0-1",
        "1.0.1",
    ];
    let mapped: Vec<GemVersion> = ascending
        .iter()
        .map(|version| GemVersion::from_artifact_version(version))
        .collect();
    for pair in mapped.windows(2) {
        let [smaller, larger] = pair else {
            panic!("windows(2) yields pairs");
        };
        assert!(
            smaller < larger,
            "{smaller} should sort before {larger}"
        );
    }
}

#[rstest]
#[case::numeric_by_value("1.9", "1.10")]
#[case::prerelease_before_release("3.0.0.rc", "3.0.0")]
#[case::snapshot_before_release("1.0.snapshot", "1.0")]
#[case::shorter_before_longer("1.0", "1.0.1")]
#[case::text_lexical("1.0.alpha", "1.0.beta")]
fn orders_gem_versions(#[case] smaller: &str, #[case] larger: &str) {
    assert!(GemVersion::new(smaller) < GemVersion::new(larger));
}

#[test]
fn trailing_zero_segments_do_not_distinguish_versions() {
    assert_eq!(GemVersion::new("1.0"), GemVersion::new("1.0.0"));
    let mut set = HashSet::new();
    set.insert(GemVersion::new("1.0"));
    set.insert(GemVersion::new("1.0.0"));
    assert_eq!(set.len(), 1);
}

#[test]
fn display_keeps_the_raw_form() {
    assert_eq!(GemVersion::new("1.0.RC1").to_string(), "1.0.RC1");
}

#[rstest]
#[case::release("1.2.3", false)]
#[case::prerelease("1.0.rc.1", true)]
fn detects_prerelease_segments(#[case] version: &str, #[case] expected: bool) {
    assert_eq!(GemVersion::new(version).is_prerelease(), expected);
}

#[rstest]
#[case::numeric_lead("3.0.0.rc", Some(3))]
#[case::text_lead("rc.1", None)]
fn reads_the_major_segment(#[case] version: &str, #[case] expected: Option<u64>) {
    assert_eq!(GemVersion::new(version).major(), expected);
}

#[test]
fn into_inner_returns_the_raw_string() {
    assert_eq!(GemVersion::new("2.1").into_inner(), "2.1");
}
