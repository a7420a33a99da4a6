// src/handlers/matrix.rs

use crate::errors::ServerError;
use crate::inventory::filter::visible_projects;
use crate::inventory::{apply_filters, flatten, summarize, Criteria, ProjectChoice, Variant};
use crate::loader::{ensure_grid, project_choices};
use crate::responses::{html_response, json_response, ResultResp};
use crate::router::Ctx;
use crate::session::ViewSession;
use crate::templates::pages::{matrix_page, MatrixView};
use maud::Markup;
use serde_json::json;

const FILTER_KEYS: [&str; 8] = [
    "search", "stage", "status", "facing", "block", "zone", "container", "floor",
];

pub fn show(ctx: &Ctx, variant: Variant) -> ResultResp {
    let refresh = flag(ctx, "refresh");
    let reset = flag(ctx, "reset");
    let close = flag(ctx, "close");
    let submitted = FILTER_KEYS.iter().any(|k| ctx.query.contains_key(*k));
    let requested = ctx
        .query
        .get("project")
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    let current = ctx.app.sessions.with_view(ctx.session, variant, |view| {
        if reset {
            view.criteria = Criteria::default();
        } else if submitted {
            view.criteria = Criteria::from_query(&ctx.query, variant);
        }
        if close {
            view.close_editor();
        }
        view.project_id.clone()
    })?;

    let choices = project_choices(ctx.app, ctx.session, variant, refresh)?;

    if let Some(project_id) = requested.or(current) {
        ensure_grid(ctx.app, ctx.session, variant, &project_id, refresh)?;
    }

    let markup = ctx
        .app
        .sessions
        .with_view(ctx.session, variant, |view| render(view, &choices))?;
    html_response(markup)
}

/// Renders the matrix screen from the view's current state and consumes its
/// pending notice.
pub fn render(view: &mut ViewSession, choices: &[ProjectChoice]) -> Markup {
    let notice = view.take_notice();
    let units = flatten(&view.projects);
    let filtered = apply_filters(&units, &view.criteria);
    let visible = visible_projects(&view.projects, &units, &view.criteria.search);

    matrix_page(&MatrixView {
        variant: view.variant,
        choices,
        selected: view.project_id.as_deref(),
        origin: view.origin,
        notice,
        criteria: &view.criteria,
        projects: &view.projects,
        visible,
        units: &units,
        filtered: &filtered,
        templates: &view.templates,
        editor: view.editor.as_ref(),
    })
}

/// Filtered units plus the KPI summary for the currently loaded project.
pub fn units_json(ctx: &Ctx, variant: Variant) -> ResultResp {
    let body = ctx.app.sessions.with_view(ctx.session, variant, |view| {
        let criteria = if FILTER_KEYS.iter().any(|k| ctx.query.contains_key(*k)) {
            Criteria::from_query(&ctx.query, variant)
        } else {
            view.criteria.clone()
        };
        let units = apply_filters(&flatten(&view.projects), &criteria);
        json!({
            "variant": variant.slug(),
            "projectId": view.project_id,
            "origin": view.origin,
            "summary": summarize(&units),
            "units": units,
        })
    })?;

    if body["projectId"].is_null() {
        return Err(ServerError::BadRequest("no project loaded".into()));
    }
    json_response(&body)
}

fn flag(ctx: &Ctx, key: &str) -> bool {
    matches!(ctx.query.get(key).map(String::as_str), Some("1" | "true" | "yes"))
}
