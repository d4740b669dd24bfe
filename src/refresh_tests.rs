//! Tests for gem mirror metadata refresh.

use super::*;

fn mirror(id: &str, url: &str) -> RepositoryEndpoint {
    RepositoryEndpoint::new(id, url)
}

#[test]
fn disabled_refresh_makes_no_requests() {
    let endpoints = vec![mirror("rubygems-releases", "http://gems.example.test/releases")];
    let mut refreshed = RefreshedHosts::new();
    let trigger = MockUpdateTrigger::new();

    let outcome = refresh_mirror_metadata(&endpoints, false, &mut refreshed, &trigger)
        .expect("disabled refresh succeeds");
    assert!(outcome.triggered.is_empty());
    assert!(refreshed.is_empty());
}

#[test]
fn triggers_the_update_url_of_each_mirror() {
    let endpoints = vec![
        mirror("central", "http://repo.example.test/maven2"),
        mirror("rubygems-releases", "http://gems.example.test/releases"),
    ];
    let mut refreshed = RefreshedHosts::new();
    let mut trigger = MockUpdateTrigger::new();
    trigger
        .expect_trigger()
        .withf(|url| url == "http://gems.example.test/releases/update")
        .times(1)
        .returning(|_| Ok(()));

    let outcome = refresh_mirror_metadata(&endpoints, true, &mut refreshed, &trigger)
        .expect("refresh succeeds");
    assert_eq!(
        outcome.triggered,
        vec!["http://gems.example.test/releases/update"]
    );
    assert!(refreshed.contains("gems.example.test"));
    assert_eq!(refreshed.len(), 1);
}

#[test]
fn a_host_is_refreshed_at_most_once() {
    let endpoints = vec![
        mirror("rubygems-releases", "http://gems.example.test/releases"),
        mirror("rubygems-prereleases", "http://gems.example.test/prereleases"),
    ];
    let mut refreshed = RefreshedHosts::new();
    let mut trigger = MockUpdateTrigger::new();
    trigger.expect_trigger().times(1).returning(|_| Ok(()));

    let outcome = refresh_mirror_metadata(&endpoints, true, &mut refreshed, &trigger)
        .expect("refresh succeeds");
    assert_eq!(outcome.triggered.len(), 1);

    // A second pass sharing the record is a no-op for the same host.
    let outcome = refresh_mirror_metadata(&endpoints, true, &mut refreshed, &trigger)
        .expect("second refresh succeeds");
    assert!(outcome.triggered.is_empty());
}

#[test]
fn distinct_hosts_are_each_triggered_in_endpoint_order() {
    let endpoints = vec![
        mirror("rubygems-a", "http://alpha.example.test/gems"),
        mirror("rubygems-b", "http://beta.example.test/gems"),
    ];
    let mut refreshed = RefreshedHosts::new();
    let mut trigger = MockUpdateTrigger::new();
    trigger.expect_trigger().times(2).returning(|_| Ok(()));

    let outcome = refresh_mirror_metadata(&endpoints, true, &mut refreshed, &trigger)
        .expect("refresh succeeds");
    assert_eq!(
        outcome.triggered,
        vec![
            "http://alpha.example.test/gems/update",
            "http://beta.example.test/gems/update",
        ]
    );
    assert_eq!(refreshed.len(), 2);
}

#[test]
fn trigger_failure_aborts_and_leaves_the_host_unmarked() {
    let endpoints = vec![mirror("rubygems-releases", "http://gems.example.test/releases")];
    let mut refreshed = RefreshedHosts::new();
    let mut trigger = MockUpdateTrigger::new();
    trigger.expect_trigger().returning(|_| {
        Err(TriggerError {
            reason: "connection refused".to_owned(),
        })
    });

    let err = refresh_mirror_metadata(&endpoints, true, &mut refreshed, &trigger)
        .expect_err("trigger failure must abort");
    assert!(
        matches!(err, RefreshError::Trigger { ref reason, .. } if reason == "connection refused")
    );
    assert!(!refreshed.contains("gems.example.test"));
}

#[test]
fn mirror_url_without_a_host_is_rejected() {
    let endpoints = vec![mirror("rubygems-releases", "releases-without-a-scheme")];
    let mut refreshed = RefreshedHosts::new();
    let trigger = MockUpdateTrigger::new();

    let err = refresh_mirror_metadata(&endpoints, true, &mut refreshed, &trigger)
        .expect_err("hostless URL must fail");
    assert!(matches!(err, RefreshError::InvalidUrl { .. }));
}
