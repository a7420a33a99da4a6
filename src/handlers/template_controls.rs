// src/handlers/template_controls.rs

use crate::errors::ServerError;
use crate::inventory::template::presets;
use crate::inventory::{InventoryError, TemplatePatch, Variant};
use crate::responses::{see_other, ResultResp};
use crate::router::Ctx;
use crate::session::Notice;
use std::collections::HashMap;

/// Template form post: merges the submitted fields (then the chosen preset,
/// if any) into the container's draft; `action=save` also acknowledges it.
pub fn submit(ctx: &Ctx, variant: Variant, form: &HashMap<String, String>) -> ResultResp {
    let project_id = required(form, "project")?;
    let container_id = required(form, "container")?;
    let patch = patch_from_form(form)?;
    let preset = match form.get("preset").map(|p| p.trim()).filter(|p| !p.is_empty()) {
        Some(raw) => {
            let idx: usize = raw
                .parse()
                .map_err(|_| ServerError::BadRequest(format!("invalid preset: {raw}")))?;
            Some(presets(variant).get(idx).ok_or(InventoryError::UnknownPreset(idx))?)
        }
        None => None,
    };
    let save = form.get("action").map(String::as_str) == Some("save");

    ctx.app.sessions.with_view(ctx.session, variant, |view| {
        let container = view
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .and_then(|p| p.container(container_id))
            .ok_or_else(|| InventoryError::ContainerNotFound(format!("{project_id}-{container_id}")))?;

        view.templates.set(project_id, container, &patch);
        if let Some(preset) = preset {
            view.templates.apply_preset(project_id, container, preset);
        }

        let noun = variant.container_noun();
        let notice = if save {
            let ack = view.templates.save(project_id, container, &TemplatePatch::default());
            Notice::success(format!("Template saved for {noun} {}.", ack.container_id))
        } else {
            Notice::info(format!("Template updated for {noun} {container_id}."))
        };
        view.notify(notice);
        Ok::<_, InventoryError>(())
    })??;

    see_other(&format!("/{}", variant.slug()))
}

fn required<'a>(form: &'a HashMap<String, String>, key: &str) -> Result<&'a str, ServerError> {
    form.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("missing field: {key}")))
}

/// Blank fields are left alone; counts must be positive integers.
pub fn patch_from_form(form: &HashMap<String, String>) -> Result<TemplatePatch, ServerError> {
    let text = |key: &str| {
        form.get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let count = |key: &str| -> Result<Option<u32>, ServerError> {
        match text(key) {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => Ok(Some(n)),
                _ => Err(ServerError::BadRequest(format!("{key} must be a positive number"))),
            },
            None => Ok(None),
        }
    };

    Ok(TemplatePatch {
        floors: count("floors")?,
        units_per_floor: count("units_per_floor")?,
        size: text("size"),
        facing: text("facing"),
        measure: text("measure"),
    })
}
