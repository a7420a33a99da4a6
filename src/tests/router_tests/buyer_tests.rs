// src/tests/router_tests/buyer_tests.rs

use crate::app::App;
use crate::tests::utils::{
    body_string, get, location, make_app, open_session, post_form, two_unit_payload, StubSource,
};
use serde_json::{json, Value};

fn loaded_app() -> (App, String) {
    let app = make_app(StubSource::default().with_grid("P1", two_unit_payload()));
    let session = open_session(&app);
    get(&app, "/multi-flat?project=P1", Some(&session));
    (app, session)
}

fn unit(app: &App, session: &str, id: &str) -> Value {
    let body = body_string(get(app, "/multi-flat/units.json", Some(session)));
    let json: Value = serde_json::from_str(&body).unwrap();
    json["units"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["id"] == id)
        .cloned()
        .unwrap()
}

#[test]
fn editor_opens_seeded_from_unit() {
    let (app, session) = loaded_app();

    let resp = get(&app, "/multi-flat/units/u1/buyer", Some(&session));
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Buyer for Unit 101"));
    assert!(body.contains(r#"name="facing" value="East""#));
    assert!(body.contains("In-house sales"));
    assert!(body.contains("/multi-flat/units/u1/buyer?preset=0"));
}

#[test]
fn preset_changes_form_but_not_unit() {
    let (app, session) = loaded_app();

    let body = body_string(get(&app, "/multi-flat/units/u1/buyer?preset=1", Some(&session)));
    assert!(body.contains(r#"name="facing" value="North""#));
    assert!(body.contains(r#"name="measure" value="1450""#));

    assert_eq!(unit(&app, &session, "u1")["facing"], "East");
}

#[test]
fn save_updates_only_target_unit() {
    let (app, session) = loaded_app();
    let before_u1 = unit(&app, &session, "u1");

    let resp = post_form(
        &app,
        "/multi-flat/units/u2/buyer",
        &[
            ("channel_partner", "Channel Prism"),
            ("customer_name", "Asha Menon"),
            ("contact", "98450 00000"),
            ("notes", "Wants corner unit"),
            ("facing", "North"),
            ("size", "3 BHK"),
            ("measure", "1450"),
        ],
        Some(&session),
    );
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/multi-flat");

    let u2 = unit(&app, &session, "u2");
    assert_eq!(
        u2["buyer"],
        json!({
            "customerName": "Asha Menon",
            "contact": "98450 00000",
            "channelPartner": "Channel Prism",
            "notes": "Wants corner unit"
        })
    );
    assert_eq!(u2["facing"], "North");
    assert_eq!(u2["spec"]["bhk"], "3 BHK");
    assert_eq!(u2["spec"]["area_sqft"], 1450.0);

    assert_eq!(unit(&app, &session, "u1"), before_u1);

    let page = body_string(get(&app, "/multi-flat", Some(&session)));
    assert!(page.contains("Saved buyer info for 102."));
    assert!(page.contains("Asha Menon"));
}

#[test]
fn saving_unknown_unit_is_not_found() {
    let (app, session) = loaded_app();

    let resp = post_form(
        &app,
        "/multi-flat/units/nope/buyer",
        &[("customer_name", "X")],
        Some(&session),
    );
    assert_eq!(resp.status(), 404);
}

#[test]
fn bad_preset_is_rejected() {
    let (app, session) = loaded_app();

    assert_eq!(get(&app, "/multi-flat/units/u1/buyer?preset=9", Some(&session)).status(), 400);
    assert_eq!(get(&app, "/multi-flat/units/u1/buyer?preset=abc", Some(&session)).status(), 400);
}

#[test]
fn collided_unit_ids_are_addressable() {
    let payload = json!({ "projects": [{ "id": "P2", "blocks": [{ "block_id": "A", "floors": [
        { "floor": 1, "units": [{ "id": "dup", "label": "101" }] },
        { "floor": 2, "units": [{ "id": "dup", "label": "201" }] }
    ]}]}]});
    let app = make_app(StubSource::default().with_grid("P2", payload));
    let session = open_session(&app);
    get(&app, "/multi-flat?project=P2", Some(&session));

    let body = body_string(get(&app, "/multi-flat/units/dup%232/buyer", Some(&session)));
    assert!(body.contains("Buyer for Unit 201"));
}

#[test]
fn plot_editor_uses_plot_presets() {
    let app = make_app(StubSource::default());
    let session = open_session(&app);
    get(&app, "/multi-plot?project=ID-105EEE", Some(&session));

    let body = body_string(get(&app, "/multi-plot/units/N-5-1/buyer?preset=1", Some(&session)));
    assert!(body.contains("Buyer for Plot 501"));
    assert!(body.contains(r#"name="measure" value="INR 68 L""#));
    assert!(body.contains(r#"name="size" value="2400 sqft""#));
}
