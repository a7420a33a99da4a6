// src/handlers/buyer.rs

use crate::errors::ServerError;
use crate::handlers::matrix::render;
use crate::inventory::template::presets;
use crate::inventory::{BuyerForm, InventoryError, Variant};
use crate::loader::project_choices;
use crate::responses::{html_response, see_other, ResultResp};
use crate::router::Ctx;
use crate::session::Notice;
use std::collections::HashMap;

/// Opens (or keeps open) the editor for `unit_id`; `preset=n` overwrites the
/// open form's facing / size / measure with preset n.
pub fn open(ctx: &Ctx, variant: Variant, unit_id: &str) -> ResultResp {
    let preset = match ctx.query.get("preset").filter(|p| !p.is_empty()) {
        Some(raw) => {
            let idx: usize = raw
                .parse()
                .map_err(|_| ServerError::BadRequest(format!("invalid preset: {raw}")))?;
            let preset = presets(variant)
                .get(idx)
                .ok_or(InventoryError::UnknownPreset(idx))?;
            Some(preset)
        }
        None => None,
    };

    let choices = project_choices(ctx.app, ctx.session, variant, false)?;

    let markup = ctx.app.sessions.with_view(ctx.session, variant, |view| {
        let editor = view.open_editor(unit_id)?;
        if let Some(preset) = preset {
            editor.apply_preset(preset);
        }
        Ok::<_, InventoryError>(render(view, &choices))
    })??;

    html_response(markup)
}

pub fn save(ctx: &Ctx, variant: Variant, unit_id: &str, form: &HashMap<String, String>) -> ResultResp {
    let form = BuyerForm::from_pairs(form);

    ctx.app.sessions.with_view(ctx.session, variant, |view| {
        let label = view.save_buyer(unit_id, &form)?;
        view.notify(Notice::success(format!("Saved buyer info for {label}.")));
        Ok::<_, InventoryError>(())
    })??;

    see_other(&format!("/{}", variant.slug()))
}
