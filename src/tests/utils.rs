// src/tests/utils.rs
use crate::api::{ApiError, GridSource};
use crate::app::App;
use crate::config::AppConfig;
use crate::inventory::{ProjectChoice, Variant};
use crate::router::handle;
use astra::{Body, Request, Response};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Read;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Canned upstream: grid payloads keyed by project id, empty `results` for
/// anything else.
#[derive(Default)]
pub struct StubSource {
    pub grids: HashMap<String, Value>,
    pub choices: Vec<ProjectChoice>,
    pub seen_queries: Arc<Mutex<Vec<Vec<(String, String)>>>>,
}

impl StubSource {
    pub fn with_grid(mut self, project_id: &str, payload: Value) -> Self {
        self.grids.insert(project_id.to_string(), payload);
        self
    }

    pub fn with_choice(mut self, id: &str, name: &str) -> Self {
        self.choices.push(ProjectChoice {
            id: id.to_string(),
            name: name.to_string(),
            code: String::new(),
        });
        self
    }
}

impl GridSource for StubSource {
    fn project_choices(&self, _variant: Variant) -> Result<Vec<ProjectChoice>, ApiError> {
        Ok(self.choices.clone())
    }

    fn fetch_grid(
        &self,
        _variant: Variant,
        project_id: &str,
        query: &[(String, String)],
    ) -> Result<Value, ApiError> {
        if let Ok(mut seen) = self.seen_queries.lock() {
            seen.push(query.to_vec());
        }
        Ok(self
            .grids
            .get(project_id)
            .cloned()
            .unwrap_or_else(|| json!({ "results": [] })))
    }
}

/// Upstream that is always down.
pub struct FailingSource;

impl GridSource for FailingSource {
    fn project_choices(&self, _variant: Variant) -> Result<Vec<ProjectChoice>, ApiError> {
        Err(ApiError::Network("connection refused".into()))
    }

    fn fetch_grid(
        &self,
        _variant: Variant,
        _project_id: &str,
        _query: &[(String, String)],
    ) -> Result<Value, ApiError> {
        Err(ApiError::Status {
            status: 503,
            body: "maintenance".into(),
        })
    }
}

/// Holds the fetch for `slow_project` until the test releases it, so two
/// loads can be made to finish out of order.
pub struct GatedSource {
    pub inner: StubSource,
    pub slow_project: String,
    pub started: Mutex<Sender<()>>,
    pub release: Mutex<Receiver<()>>,
}

impl GridSource for GatedSource {
    fn project_choices(&self, variant: Variant) -> Result<Vec<ProjectChoice>, ApiError> {
        self.inner.project_choices(variant)
    }

    fn fetch_grid(
        &self,
        variant: Variant,
        project_id: &str,
        query: &[(String, String)],
    ) -> Result<Value, ApiError> {
        if project_id == self.slow_project {
            self.started
                .lock()
                .map_err(|_| ApiError::Offline)?
                .send(())
                .map_err(|_| ApiError::Offline)?;
            self.release
                .lock()
                .map_err(|_| ApiError::Offline)?
                .recv()
                .map_err(|_| ApiError::Offline)?;
        }
        self.inner.fetch_grid(variant, project_id, query)
    }
}

pub fn make_app(source: impl GridSource + 'static) -> App {
    App::new(AppConfig::default(), Box::new(source))
}

pub fn make_app_with(config: AppConfig, source: impl GridSource + 'static) -> App {
    App::new(config, Box::new(source))
}

/// Two-unit project (P1, block A, floor 1) used across router tests.
pub fn two_unit_payload() -> Value {
    json!({ "projects": [{ "id": "P1", "name": "Pilot Towers", "code": "PT",
        "blocks": [{ "block_id": "A", "name": "Aurora", "floors": [{ "floor": 1, "units": [
            { "id": "u1", "label": "101", "status": "sold", "facing": "East" },
            { "id": "u2", "label": "102", "status": "available", "facing": "West" }
        ]}]}]
    }]})
}

pub fn get(app: &App, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = http::Request::builder().method("GET").uri(uri);
    if let Some(c) = cookie {
        builder = builder.header("Cookie", format!("matrix_session={c}"));
    }
    let req: Request = builder.body(Body::empty()).unwrap();
    handle(req, app).unwrap_or_else(crate::responses::error_to_response)
}

pub fn post_form(app: &App, uri: &str, form: &[(&str, &str)], cookie: Option<&str>) -> Response {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();
    let mut builder = http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        builder = builder.header("Cookie", format!("matrix_session={c}"));
    }
    let req: Request = builder.body(Body::from(body.into_bytes())).unwrap();
    handle(req, app).unwrap_or_else(crate::responses::error_to_response)
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

/// Session id from the `Set-Cookie` header of a first response.
pub fn session_from(resp: &Response) -> String {
    let header = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .expect("no session cookie set");
    header
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("matrix_session="))
        .expect("unexpected cookie format")
        .to_string()
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// First request of a test: opens a session and returns its id.
pub fn open_session(app: &App) -> String {
    let resp = get(app, "/health", None);
    session_from(&resp)
}
