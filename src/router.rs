use crate::app::App;
use crate::errors::ServerError;
use crate::handlers;
use crate::inventory::Variant;
use crate::responses::{html_response, text_response, ResultResp};
use crate::session::token::{looks_valid, new_session_id};
use crate::session::SESSION_COOKIE;
use crate::templates;
use astra::{Request, Response};
use http::header::{HeaderValue, COOKIE, SET_COOKIE};
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Form posts are small; anything bigger is refused.
const MAX_FORM_BYTES: u64 = 64 * 1024;

/// Per-request context handed to handlers once the body has been read.
pub struct Ctx<'a> {
    pub app: &'a App,
    pub session: &'a str,
    pub query: HashMap<String, String>,
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = parse_query(&req);

    let (session, fresh) = match session_cookie(&req) {
        Some(id) => (id, false),
        None => (new_session_id(), true),
    };

    debug!(%method, %path, fresh_session = fresh, "request");

    let segments: Vec<String> = path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode_segment)
        .collect::<Result<_, _>>()?;
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

    let form = if method == "POST" {
        read_form(req)?
    } else {
        HashMap::new()
    };

    let ctx = Ctx {
        app,
        session: &session,
        query,
    };

    let resp = match (method.as_str(), segments.as_slice()) {
        ("GET", []) => html_response(templates::pages::home_page(app.config.api.is_some())),
        ("GET", ["health"]) => text_response("ok"),

        ("GET", [slug]) => handlers::matrix::show(&ctx, variant(slug)?),
        ("GET", [slug, "units.json"]) => handlers::matrix::units_json(&ctx, variant(slug)?),

        ("GET", [slug, "units", unit_id, "buyer"]) => {
            handlers::buyer::open(&ctx, variant(slug)?, unit_id)
        }
        ("POST", [slug, "units", unit_id, "buyer"]) => {
            handlers::buyer::save(&ctx, variant(slug)?, unit_id, &form)
        }

        ("POST", [slug, "templates"]) => {
            handlers::template_controls::submit(&ctx, variant(slug)?, &form)
        }

        _ => Err(ServerError::NotFound),
    }?;

    Ok(if fresh { with_session_cookie(resp, &session) } else { resp })
}

fn variant(slug: &str) -> Result<Variant, ServerError> {
    Variant::from_slug(slug).ok_or(ServerError::NotFound)
}

pub fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Reads an `application/x-www-form-urlencoded` body.
pub fn read_form(req: Request) -> Result<HashMap<String, String>, ServerError> {
    let content_type = req
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.is_empty() && !content_type.starts_with(mime::APPLICATION_WWW_FORM_URLENCODED.as_ref()) {
        return Err(ServerError::BadRequest(format!(
            "unsupported content type: {content_type}"
        )));
    }

    let mut raw = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_FORM_BYTES + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("could not read form: {e}")))?;

    if raw.len() as u64 > MAX_FORM_BYTES {
        return Err(ServerError::BadRequest("form too large".into()));
    }

    Ok(url::form_urlencoded::parse(&raw).into_owned().collect())
}

fn decode_segment(raw: &str) -> Result<String, ServerError> {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .map_err(|_| ServerError::BadRequest("path is not valid UTF-8".into()))
}

fn session_cookie(req: &Request) -> Option<String> {
    req.headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| looks_valid(value))
}

fn with_session_cookie(mut resp: Response, session: &str) -> Response {
    let cookie = format!("{SESSION_COOKIE}={session}; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        resp.headers_mut().append(SET_COOKIE, value);
    }
    resp
}
