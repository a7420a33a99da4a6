// src/tests/router_tests/matrix_tests.rs

use crate::config::AppConfig;
use crate::tests::utils::{
    body_string, get, make_app, make_app_with, open_session, two_unit_payload, FailingSource,
    StubSource,
};
use serde_json::Value;

fn units_json(app: &crate::app::App, query: &str, session: &str) -> Value {
    let resp = get(app, &format!("/multi-flat/units.json{query}"), Some(session));
    assert_eq!(resp.status(), 200);
    serde_json::from_str(&body_string(resp)).unwrap()
}

#[test]
fn live_grid_renders_with_success_notice() {
    let app = make_app(StubSource::default().with_grid("P1", two_unit_payload()));
    let session = open_session(&app);

    let resp = get(&app, "/multi-flat?project=P1", Some(&session));
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Live multi-flat data synced."));
    assert!(body.contains("Pilot Towers"));
    assert!(body.contains("/multi-flat/units/u1/buyer"));
    assert!(body.contains("/multi-flat/units/u2/buyer"));
}

#[test]
fn notice_is_consumed_by_first_render() {
    let app = make_app(StubSource::default().with_grid("P1", two_unit_payload()));
    let session = open_session(&app);

    let first = body_string(get(&app, "/multi-flat?project=P1", Some(&session)));
    let second = body_string(get(&app, "/multi-flat", Some(&session)));

    assert!(first.contains("Live multi-flat data synced."));
    assert!(!second.contains("Live multi-flat data synced."));
    // Project stays loaded for the session.
    assert!(second.contains("Pilot Towers"));
}

#[test]
fn summary_counts_match_two_unit_project() {
    let app = make_app(StubSource::default().with_grid("P1", two_unit_payload()));
    let session = open_session(&app);
    get(&app, "/multi-flat?project=P1", Some(&session));

    let json = units_json(&app, "", &session);
    let summary = &json["summary"];
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["sold"], 1);
    assert_eq!(summary["available"], 1);
    assert_eq!(summary["hold"], 0);
    assert_eq!(summary["booked"], 0);
    assert_eq!(summary["missing"], 0);
    assert_eq!(summary["containers"], 1);

    let first = &json["units"][0];
    assert_eq!(first["containerId"], "A");
    assert_eq!(first["floorNumber"], 1);
}

#[test]
fn status_filter_narrows_units_and_is_remembered() {
    let app = make_app(StubSource::default().with_grid("P1", two_unit_payload()));
    let session = open_session(&app);
    get(&app, "/multi-flat?project=P1", Some(&session));

    let resp = get(
        &app,
        "/multi-flat?project=P1&search=&stage=all&status=sold&facing=all&block=all&floor=all",
        Some(&session),
    );
    assert_eq!(resp.status(), 200);

    let json = units_json(&app, "", &session);
    let units = json["units"].as_array().unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0]["id"], "u1");
    assert_eq!(json["summary"]["total"], 1);
}

#[test]
fn search_matches_label_case_insensitively() {
    let app = make_app(StubSource::default().with_grid("P1", two_unit_payload()));
    let session = open_session(&app);
    get(&app, "/multi-flat?project=P1", Some(&session));

    let json = units_json(&app, "?search=%20102%20", &session);
    assert_eq!(json["units"].as_array().unwrap().len(), 1);
    assert_eq!(json["units"][0]["label"], "102");

    let json = units_json(&app, "?search=AURORA", &session);
    assert_eq!(json["units"].as_array().unwrap().len(), 2);
}

#[test]
fn reset_clears_remembered_filters() {
    let app = make_app(StubSource::default().with_grid("P1", two_unit_payload()));
    let session = open_session(&app);
    get(&app, "/multi-flat?project=P1&status=available", Some(&session));
    assert_eq!(units_json(&app, "", &session)["summary"]["total"], 1);

    get(&app, "/multi-flat?project=P1&reset=1", Some(&session));
    assert_eq!(units_json(&app, "", &session)["summary"]["total"], 2);
}

#[test]
fn categorical_filters_are_forwarded_upstream_but_search_is_not() {
    let stub = StubSource::default().with_grid("P1", two_unit_payload());
    let seen = stub.seen_queries.clone();
    let app = make_app(stub);
    let session = open_session(&app);

    get(&app, "/multi-flat?project=P1&status=sold&block=A&search=10", Some(&session));

    let seen = seen.lock().unwrap();
    let last = seen.last().unwrap();
    assert!(last.contains(&("status".to_string(), "sold".to_string())));
    assert!(last.contains(&("block".to_string(), "A".to_string())));
    assert!(!last.iter().any(|(k, _)| k == "search"));
}

#[test]
fn empty_live_payload_shows_bundled_layout() {
    let app = make_app(StubSource::default());
    let session = open_session(&app);

    let body = body_string(get(&app, "/multi-plot?project=ID-105EEE", Some(&session)));
    assert!(body.contains("No live data yet; showing bundled layout for Meadow Plots."));
    assert!(body.contains("North Ridge"));
    assert!(body.contains("notice-info"));
}

#[test]
fn upstream_failure_degrades_to_demo_data() {
    let app = make_app(FailingSource);
    let session = open_session(&app);

    let resp = get(&app, "/multi-flat?project=ID-103CCC", Some(&session));
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Live API offline; showing bundled layout for Skyline Heights."));
    // Picker falls back to the demo project list too.
    assert!(body.contains("Tech Park Residences"));
}

#[test]
fn upstream_failure_without_demo_project_is_a_danger_notice() {
    let app = make_app(FailingSource);
    let session = open_session(&app);

    let body = body_string(get(&app, "/multi-flat?project=P-404", Some(&session)));
    assert!(body.contains("notice-danger"));
    assert!(body.contains("Could not reach the sales API"));
}

#[test]
fn fallback_can_be_disabled() {
    let config = AppConfig {
        fallback: false,
        ..AppConfig::default()
    };
    let app = make_app_with(config, FailingSource);
    let session = open_session(&app);

    let body = body_string(get(&app, "/multi-flat?project=ID-103CCC", Some(&session)));
    assert!(body.contains("notice-danger"));
    assert!(!body.contains("Aurora Block"));
}

#[test]
fn units_json_requires_loaded_project() {
    let app = make_app(StubSource::default());
    let session = open_session(&app);

    let resp = get(&app, "/multi-flat/units.json", Some(&session));
    assert_eq!(resp.status(), 400);
}

#[test]
fn each_variant_keeps_its_own_view() {
    let app = make_app(StubSource::default().with_grid("P1", two_unit_payload()));
    let session = open_session(&app);

    get(&app, "/multi-flat?project=P1", Some(&session));
    let plot = body_string(get(&app, "/multi-plot", Some(&session)));

    assert!(!plot.contains("Pilot Towers"));
    assert!(plot.contains("Select a project"));
}
