// templates/pages/buyer.rs

use crate::inventory::template::presets;
use crate::inventory::{BuyerEditor, CHANNEL_PARTNERS};
use crate::templates::components::text_input;
use crate::templates::pages::matrix::buyer_href;
use maud::{html, Markup};

/// Inline editor shown above the grid while a unit is open. Preset links only
/// change this form; nothing reaches the unit until "Save buyer".
pub fn buyer_editor_panel(editor: &BuyerEditor) -> Markup {
    let variant = editor.variant;
    let form = &editor.form;
    let action = buyer_href(variant, &editor.unit_id, None);

    html! {
        section class="card buyer-editor" id="buyer-editor" {
            h2 { "Buyer for " (variant.unit_noun()) " " (editor.unit_label) }

            p class="muted" {
                "Presets: "
                @for (idx, preset) in presets(variant).iter().enumerate() {
                    a href=(buyer_href(variant, &editor.unit_id, Some(idx))) { (preset.label) }
                    " "
                }
            }

            form class="buyer-form" method="post" action=(action) {
                label {
                    "Channel partner"
                    select name="channel_partner" {
                        option value="" selected[form.channel_partner.is_empty()] { "Select partner" }
                        @for partner in CHANNEL_PARTNERS {
                            option value=(partner) selected[form.channel_partner == partner] { (partner) }
                        }
                        @if !form.channel_partner.is_empty() && !CHANNEL_PARTNERS.contains(&form.channel_partner.as_str()) {
                            option value=(form.channel_partner) selected { (form.channel_partner) }
                        }
                    }
                }
                (text_input("customer_name", "Customer name", &form.customer_name))
                (text_input("contact", "Contact", &form.contact))
                (text_input("facing", "Facing", &form.facing))
                (text_input("size", variant.size_label(), &form.size))
                (text_input("measure", variant.measure_label(), &form.measure))
                label {
                    "Notes"
                    textarea name="notes" rows="2" { (form.notes) }
                }
                button type="submit" { "Save buyer" }
                a href={ "/" (variant.slug()) "?close=1" } { "Cancel" }
            }
        }
    }
}
