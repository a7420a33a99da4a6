// src/tests/router_tests/template_tests.rs

use crate::app::App;
use crate::tests::utils::{body_string, get, location, make_app, open_session, post_form, StubSource};

/// Session with the Skyline Heights demo layout loaded (blocks A and B).
fn skyline() -> (App, String) {
    let app = make_app(StubSource::default());
    let session = open_session(&app);
    get(&app, "/multi-flat?project=ID-103CCC", Some(&session));
    (app, session)
}

#[test]
fn default_template_comes_from_block_shape() {
    let (app, session) = skyline();

    let body = body_string(get(&app, "/multi-flat", Some(&session)));
    assert!(body.contains(r#"name="floors" value="4""#));
    assert!(body.contains(r#"name="units_per_floor" value="4""#));
    assert!(body.contains(r#"name="measure" value="1100""#));
}

#[test]
fn applying_preset_updates_draft_and_redirects() {
    let (app, session) = skyline();

    let resp = post_form(
        &app,
        "/multi-flat/templates",
        &[
            ("project", "ID-103CCC"),
            ("container", "A"),
            ("floors", "18"),
            ("preset", "2"),
            ("action", "apply"),
        ],
        Some(&session),
    );
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/multi-flat");

    let body = body_string(get(&app, "/multi-flat", Some(&session)));
    assert!(body.contains("Template updated for Block A."));
    assert!(body.contains(r#"name="floors" value="18""#));
    assert!(body.contains(r#"name="measure" value="1580""#));
}

#[test]
fn saving_acknowledges_without_touching_grid() {
    let (app, session) = skyline();
    let before = body_string(get(&app, "/multi-flat/units.json", Some(&session)));

    let resp = post_form(
        &app,
        "/multi-flat/templates",
        &[
            ("project", "ID-103CCC"),
            ("container", "B"),
            ("units_per_floor", "6"),
            ("action", "save"),
        ],
        Some(&session),
    );
    assert_eq!(resp.status(), 303);

    let body = body_string(get(&app, "/multi-flat", Some(&session)));
    assert!(body.contains("Template saved for Block B."));
    assert!(body.contains("Last saved"));

    let after = body_string(get(&app, "/multi-flat/units.json", Some(&session)));
    assert_eq!(before, after);
}

#[test]
fn missing_fields_are_bad_requests() {
    let (app, session) = skyline();

    let resp = post_form(&app, "/multi-flat/templates", &[("project", "ID-103CCC")], Some(&session));
    assert_eq!(resp.status(), 400);

    let resp = post_form(
        &app,
        "/multi-flat/templates",
        &[("project", "ID-103CCC"), ("container", "A"), ("floors", "-3")],
        Some(&session),
    );
    assert_eq!(resp.status(), 400);
}

#[test]
fn unknown_container_is_not_found() {
    let (app, session) = skyline();

    let resp = post_form(
        &app,
        "/multi-flat/templates",
        &[("project", "ID-103CCC"), ("container", "Z")],
        Some(&session),
    );
    assert_eq!(resp.status(), 404);
}

#[test]
fn plot_zones_use_zone_wording() {
    let app = make_app(StubSource::default());
    let session = open_session(&app);
    get(&app, "/multi-plot?project=ID-106FFF", Some(&session));

    post_form(
        &app,
        "/multi-plot/templates",
        &[("project", "ID-106FFF"), ("container", "E"), ("action", "save")],
        Some(&session),
    );

    let body = body_string(get(&app, "/multi-plot", Some(&session)));
    assert!(body.contains("Template saved for Zone E."));
}
