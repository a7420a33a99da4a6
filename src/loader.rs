// src/loader.rs

//! Grid loading: upstream fetch, normalization, and the demo-data fallback.

use crate::api::GridSource;
use crate::app::App;
use crate::errors::ServerError;
use crate::inventory::model::total_units;
use crate::inventory::{fallback, normalize, ProjectChoice, Variant};
use crate::session::{Loaded, Notice, Origin};
use tracing::{info, warn};

/// Fetches and installs the grid for `project_id` if the viewer's current
/// tree is for another project, another upstream query, or a refresh was
/// asked for. The session lock is not held during the upstream call.
pub fn ensure_grid(
    app: &App,
    session_id: &str,
    variant: Variant,
    project_id: &str,
    refresh: bool,
) -> Result<(), ServerError> {
    let ticket = app.sessions.with_view(session_id, variant, |view| {
        let query = view.criteria.to_query(variant);
        if view.needs_load(project_id, &query, refresh) {
            Some(view.begin_fetch(project_id, query))
        } else {
            None
        }
    })?;

    let Some(ticket) = ticket else {
        return Ok(());
    };

    let loaded = load_grid(
        app.source.as_ref(),
        variant,
        &ticket.project_id,
        &ticket.query,
        app.config.fallback,
    );

    app.sessions
        .with_view(session_id, variant, |view| view.finish_fetch(ticket, loaded))?;
    Ok(())
}

/// One upstream round-trip, degraded to demo data (when allowed) if the
/// backend is unreachable or has nothing for this project.
pub fn load_grid(
    source: &dyn GridSource,
    variant: Variant,
    project_id: &str,
    query: &[(String, String)],
    allow_fallback: bool,
) -> Loaded {
    let demo = || {
        if allow_fallback {
            fallback::projects(variant, Some(project_id))
        } else {
            Vec::new()
        }
    };

    match source.fetch_grid(variant, project_id, query) {
        Ok(payload) => {
            let projects = normalize(&payload, variant);
            if total_units(&projects) > 0 {
                info!(%variant, project = %project_id, units = total_units(&projects), "live grid loaded");
                return Loaded {
                    projects,
                    origin: Origin::Live,
                    notice: Notice::success(format!("Live {} data synced.", variant.slug())),
                };
            }

            let projects = demo();
            match projects.first() {
                Some(first) => {
                    info!(%variant, project = %project_id, "empty live grid, using bundled layout");
                    let notice = Notice::info(format!(
                        "No live data yet; showing bundled layout for {}.",
                        first.name
                    ));
                    Loaded {
                        projects,
                        origin: Origin::Fallback,
                        notice,
                    }
                }
                None => Loaded {
                    projects,
                    origin: Origin::Empty,
                    notice: Notice::info(format!(
                        "No live {} data yet for this project.",
                        variant.slug()
                    )),
                },
            }
        }
        Err(err) => {
            warn!(%variant, project = %project_id, error = %err, "grid fetch failed");
            let projects = demo();
            match projects.first() {
                Some(first) => {
                    let notice = Notice::info(format!(
                        "Live API offline; showing bundled layout for {}.",
                        first.name
                    ));
                    Loaded {
                        projects,
                        origin: Origin::Fallback,
                        notice,
                    }
                }
                None => Loaded {
                    projects,
                    origin: Origin::Empty,
                    notice: Notice::danger(format!("Could not reach the sales API: {err}")),
                },
            }
        }
    }
}

/// Picker entries, cached per view. Upstream failure falls back to the demo
/// projects when allowed.
pub fn project_choices(
    app: &App,
    session_id: &str,
    variant: Variant,
    refresh: bool,
) -> Result<Vec<ProjectChoice>, ServerError> {
    let cached = app
        .sessions
        .with_view(session_id, variant, |view| view.choices.clone())?;
    if let (Some(choices), false) = (cached, refresh) {
        return Ok(choices);
    }

    let choices = match app.source.project_choices(variant) {
        Ok(choices) if !choices.is_empty() => choices,
        Ok(_) if app.config.fallback => fallback::choices(variant),
        Ok(choices) => choices,
        Err(err) => {
            warn!(%variant, error = %err, "project list unavailable");
            if app.config.fallback {
                fallback::choices(variant)
            } else {
                Vec::new()
            }
        }
    };

    let stored = choices.clone();
    app.sessions
        .with_view(session_id, variant, move |view| view.choices = Some(stored))?;
    Ok(choices)
}
