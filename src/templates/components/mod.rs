use crate::inventory::filter::humanize;
use crate::inventory::UnitStatus;
use crate::session::Notice;
use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn kpi_tile(label: &str, value: usize) -> Markup {
    html! {
        div class="kpi" {
            span class="muted" { (label) }
            strong { (value) }
        }
    }
}

pub fn status_chip(status: &UnitStatus) -> Markup {
    html! {
        span class={ "chip tone-" (status.tone()) } { (status.label()) }
    }
}

pub fn notice_banner(notice: &Notice) -> Markup {
    html! {
        div class={ "notice notice-" (notice.tone.as_str()) } role="status" {
            (notice.message)
        }
    }
}

/// `<select>` with an "All" entry mapped to the `all` sentinel.
pub fn filter_select(name: &str, label: &str, options: &[String], selected: Option<&str>) -> Markup {
    html! {
        label {
            (label)
            select name=(name) {
                option value="all" selected[selected.is_none()] { "All" }
                @for opt in options {
                    option value=(opt) selected[selected == Some(opt.as_str())] { (humanize(opt)) }
                }
            }
        }
    }
}

pub fn text_input(name: &str, label: &str, value: &str) -> Markup {
    html! {
        label {
            (label)
            input type="text" name=(name) value=(value);
        }
    }
}
