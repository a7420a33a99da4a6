// templates/pages/home.rs

use crate::inventory::Variant;
use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

pub fn home_page(live: bool) -> Markup {
    desktop_layout(
        "Home",
        None,
        html! {
            main class="container" {
                h1 { "Sales inventory" }
                @if !live {
                    p class="muted" { "No sales API configured; screens run on bundled demo layouts." }
                }

                @for variant in [Variant::Flat, Variant::Plot] {
                    (card(variant.title(), html! {
                        p {
                            "Project → " (variant.container_noun()) " → floor → " (variant.unit_noun().to_lowercase())
                            " grid with filters, KPI tiles, buyer assignment and "
                            (variant.container_noun().to_lowercase()) " templates."
                        }
                        a href={ "/" (variant.slug()) } { "Open " (variant.title()) }
                    }))
                }
            }
        },
    )
}
