// src/tests/router_tests/misc_tests.rs

use crate::config::AppConfig;
use crate::tests::utils::{
    body_string, get, make_app, make_app_with, session_from, two_unit_payload, GatedSource,
    StubSource,
};
use std::sync::mpsc::channel;
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn home_page_links_both_matrices() {
    let app = make_app(StubSource::default());

    let resp = get(&app, "/", None);
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains(r#"href="/multi-flat""#));
    assert!(body.contains(r#"href="/multi-plot""#));
    assert!(body.contains("No sales API configured"));
}

#[test]
fn health_answers_ok() {
    let app = make_app(StubSource::default());
    assert_eq!(body_string(get(&app, "/health", None)), "ok");
}

#[test]
fn unknown_routes_are_not_found() {
    let app = make_app(StubSource::default());

    assert_eq!(get(&app, "/multi-house", None).status(), 404);
    assert_eq!(get(&app, "/multi-flat/units/u1", None).status(), 404);
    assert_eq!(get(&app, "/a/b/c/d/e", None).status(), 404);
}

#[test]
fn session_cookie_is_issued_once() {
    let app = make_app(StubSource::default());

    let first = get(&app, "/", None);
    let session = session_from(&first);
    assert!(first
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .contains("HttpOnly"));

    let second = get(&app, "/", Some(&session));
    assert!(second.headers().get("Set-Cookie").is_none());
}

#[test]
fn cookieless_clients_cannot_grow_the_store_without_bound() {
    let config = AppConfig {
        max_views: 25,
        ..AppConfig::default()
    };
    let app = make_app_with(config, StubSource::default());

    for _ in 0..200 {
        assert_eq!(get(&app, "/multi-flat?project=ID-103CCC", None).status(), 200);
    }
    assert_eq!(app.sessions.len(), 25);
}

#[test]
fn forged_cookie_gets_fresh_session() {
    let app = make_app(StubSource::default());
    let resp = get(&app, "/", Some("bad value"));
    assert!(resp.headers().get("Set-Cookie").is_some());
}

#[test]
fn slower_older_load_does_not_replace_newer_one() {
    let (started_tx, started_rx) = channel();
    let (release_tx, release_rx) = channel();
    let source = GatedSource {
        inner: StubSource::default()
            .with_grid("SLOW", two_unit_payload())
            .with_grid("FAST", serde_json::json!({ "projects": [{ "id": "F", "name": "Fresh Fields",
                "blocks": [{ "block_id": "B", "floors": [{ "floor": 3, "units": [{ "id": "f1" }] }] }] }] })),
        slow_project: "SLOW".to_string(),
        started: Mutex::new(started_tx),
        release: Mutex::new(release_rx),
    };
    let app = Arc::new(make_app(source));
    let session = session_from(&get(&app, "/health", None));

    let slow = {
        let app = Arc::clone(&app);
        let session = session.clone();
        thread::spawn(move || get(&app, "/multi-flat?project=SLOW", Some(&session)).status())
    };

    // Slow load has its ticket and is parked inside the upstream call.
    started_rx.recv().unwrap();

    let fast = body_string(get(&app, "/multi-flat?project=FAST", Some(&session)));
    assert!(fast.contains("Fresh Fields"));

    release_tx.send(()).unwrap();
    assert_eq!(slow.join().unwrap(), 200);

    let body = body_string(get(&app, "/multi-flat", Some(&session)));
    assert!(body.contains("Fresh Fields"));
    assert!(!body.contains("Pilot Towers"));
}
