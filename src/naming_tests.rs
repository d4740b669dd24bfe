//! Tests for gem name translation.

use super::*;
use rstest::rstest;

#[rstest]
#[case::plain("org.example.foo", "org.example", "foo")]
#[case::with_scheme("mvn:org.example.foo", "org.example", "foo")]
#[case::single_dot("commons-lang.commons-lang", "commons-lang", "commons-lang")]
#[case::deep_group("mvn:org.apache.commons.commons-io", "org.apache.commons", "commons-io")]
fn to_artifact_id_splits_at_last_separator(
    #[case] name: &str,
    #[case] group: &str,
    #[case] artifact: &str,
) {
    let id = GemName::from(name)
        .to_artifact_id()
        .unwrap_or_else(|err| panic!("{name} should translate: {err}"));
    assert_eq!(id.group(), group);
    assert_eq!(id.artifact(), artifact);
}

#[rstest]
#[case::bare("foo")]
#[case::scheme_only("mvn:foo")]
fn to_artifact_id_rejects_names_without_separator(#[case] name: &str) {
    let err = GemName::from(name)
        .to_artifact_id()
        .expect_err("name without separator must be rejected");
    assert!(matches!(err, GemNameError::MissingSeparator { .. }));
}

#[rstest]
#[case::leading(".foo")]
#[case::trailing("org.example.")]
#[case::scheme_leading("mvn:.foo")]
fn to_artifact_id_rejects_empty_segments(#[case] name: &str) {
    let err = GemName::from(name)
        .to_artifact_id()
        .expect_err("empty segment must be rejected");
    assert!(matches!(err, GemNameError::EmptySegment { .. }));
}

#[test]
fn missing_separator_message_gives_guidance() {
    let err = GemName::from("foo")
        .to_artifact_id()
        .expect_err("expected a missing separator error");
    let msg = err.to_string();
    assert!(msg.contains("foo"));
    assert!(msg.contains("'.'"));
    assert!(msg.contains("<groupId>"));
}

#[test]
fn for_artifact_emits_canonical_scheme() {
    let id = ArtifactId::new("org.example", "foo");
    assert_eq!(GemName::for_artifact(&id).as_str(), "mvn:org.example.foo");
}

#[test]
fn canonicalisation_is_stable_for_unprefixed_input() {
    let id = GemName::from("org.example.foo")
        .to_artifact_id()
        .expect("plain name should translate");
    let canonical = GemName::for_artifact(&id);
    assert_eq!(canonical.as_str(), "mvn:org.example.foo");

    let reparsed = canonical
        .to_artifact_id()
        .expect("canonical name should translate");
    assert_eq!(reparsed, id);
}

#[test]
fn for_resolved_keeps_registry_native_names_bare() {
    let native = ArtifactId::new(RUBYGEMS_GROUP_ID, "rake");
    assert_eq!(GemName::for_resolved(&native).as_str(), "rake");
}

#[test]
fn for_resolved_prefixes_bridged_artifacts() {
    let bridged = ArtifactId::new("org.slf4j", "slf4j-api");
    assert_eq!(
        GemName::for_resolved(&bridged).as_str(),
        "mvn:org.slf4j.slf4j-api"
    );
}

#[test]
fn display_echoes_raw_name() {
    let name = GemName::from("mvn:org.example.foo");
    assert_eq!(name.to_string(), "mvn:org.example.foo");
}
