// templates/pages/matrix.rs

use crate::inventory::filter::{
    container_options, facing_options, floor_options, humanize, stage_options,
};
use crate::inventory::model::{Container, Project};
use crate::inventory::summary::summarize_project;
use crate::inventory::template::{presets, TemplateState};
use crate::inventory::{
    summarize, BuyerEditor, Criteria, FlatUnit, ProjectChoice, Summary, TemplateStore, Unit,
    UnitStatus, Variant,
};
use crate::session::{Notice, Origin};
use crate::templates::components::{filter_select, kpi_tile, notice_banner, status_chip, text_input};
use crate::templates::desktop_layout;
use crate::templates::pages::buyer::buyer_editor_panel;
use maud::{html, Markup};
use std::collections::HashSet;
use url::form_urlencoded;

/// Everything the matrix screen needs, borrowed from the viewer's session.
pub struct MatrixView<'a> {
    pub variant: Variant,
    pub choices: &'a [ProjectChoice],
    pub selected: Option<&'a str>,
    pub origin: Origin,
    pub notice: Option<Notice>,
    pub criteria: &'a Criteria,
    pub projects: &'a [Project],
    /// Projects left after the project-level search.
    pub visible: Vec<&'a Project>,
    pub units: &'a [FlatUnit],
    pub filtered: &'a [FlatUnit],
    pub templates: &'a TemplateStore,
    pub editor: Option<&'a BuyerEditor>,
}

pub fn matrix_page(view: &MatrixView) -> Markup {
    let summary = summarize(view.filtered);

    desktop_layout(
        view.variant.title(),
        Some(view.variant),
        html! {
            main class="container" {
                h1 { (view.variant.title()) }

                @if let Some(notice) = &view.notice {
                    (notice_banner(notice))
                }

                (project_picker(view))

                @if view.selected.is_some() {
                    (filter_bar(view))
                    (kpi_row(view.variant, &summary))

                    @if let Some(editor) = view.editor {
                        (buyer_editor_panel(editor))
                    }

                    @if view.visible.is_empty() {
                        section class="card" {
                            p class="muted" {
                                @if view.origin == Origin::Empty {
                                    "Nothing to show for this project yet."
                                } @else {
                                    "No projects match the current search."
                                }
                            }
                        }
                    }

                    @for project in &view.visible {
                        (project_panel(view, project))
                    }
                }
            }
        },
    )
}

fn project_picker(view: &MatrixView) -> Markup {
    html! {
        form class="card filters" method="get" action={ "/" (view.variant.slug()) } {
            label {
                "Project"
                select name="project" {
                    option value="" selected[view.selected.is_none()] { "Select a project" }
                    @for choice in view.choices {
                        option value=(choice.id) selected[view.selected == Some(choice.id.as_str())] {
                            (choice.name)
                            @if !choice.code.is_empty() && choice.code != choice.id {
                                " (" (choice.code) ")"
                            }
                        }
                    }
                }
            }
            button type="submit" { "Load" }
            @if let Some(project) = view.selected {
                a href=(matrix_href(view.variant, project, &[("refresh", "1")])) { "Refresh" }
            }
        }
    }
}

fn filter_bar(view: &MatrixView) -> Markup {
    let variant = view.variant;
    let c = view.criteria;
    let floors: Vec<String> = floor_options(view.units).iter().map(i64::to_string).collect();
    let statuses: Vec<String> = UnitStatus::ALL.iter().map(|s| s.as_str().to_string()).collect();

    html! {
        form class="card filters" method="get" action={ "/" (variant.slug()) } {
            @if let Some(project) = view.selected {
                input type="hidden" name="project" value=(project);
            }
            (text_input("search", "Search", &c.search))
            (filter_select("stage", "Stage", &stage_options(view.units), c.stage.as_deref()))
            (filter_select("status", "Status", &statuses, c.status.as_deref()))
            (filter_select("facing", "Facing", &facing_options(view.units), c.facing.as_deref()))
            (filter_select(variant.container_key(), variant.container_noun(), &container_options(view.projects), c.container.as_deref()))
            (filter_select("floor", "Floor", &floors, c.floor.as_deref()))
            button type="submit" { "Apply" }
            @if let Some(project) = view.selected {
                a href=(matrix_href(variant, project, &[("reset", "1")])) { "Reset filters" }
            }
        }
    }
}

fn kpi_row(variant: Variant, summary: &Summary) -> Markup {
    html! {
        section class="kpis" {
            (kpi_tile(&format!("Total {}s", variant.unit_noun().to_lowercase()), summary.total))
            @for status in UnitStatus::ALL {
                (kpi_tile(status.label(), summary.count(&status)))
            }
            (kpi_tile(&format!("{}s", variant.container_noun()), summary.containers))
        }
    }
}

fn project_panel(view: &MatrixView, project: &Project) -> Markup {
    let stats = summarize_project(view.filtered, &project.id);
    let shown: HashSet<&str> = view
        .filtered
        .iter()
        .filter(|u| u.project_id == project.id)
        .map(|u| u.unit.id.as_str())
        .collect();

    html! {
        section class="card project" id={ "project-" (project.id) } {
            header {
                span class="muted" { (project.badge) }
                h2 { (project.name) " " small class="muted" { (project.code) } }
                p class="muted" {
                    (project.location) " · " (humanize(&project.stage)) " · "
                    (stats.total) " shown, " (stats.available) " available, " (stats.sold) " sold"
                }
                @if !project.description.is_empty() {
                    p { (project.description) }
                }
            }
            @if project.containers.is_empty() {
                p class="muted" { "No " (view.variant.container_noun().to_lowercase()) "s with sellable units." }
            }
            @for container in &project.containers {
                (container_grid(view, project, container, &shown))
            }
        }
    }
}

fn container_grid(
    view: &MatrixView,
    project: &Project,
    container: &Container,
    shown: &HashSet<&str>,
) -> Markup {
    let noun = view.variant.container_noun();
    let floors: Vec<(i64, Vec<&Unit>)> = container
        .floors
        .iter()
        .map(|f| {
            let units: Vec<&Unit> = f.units.iter().filter(|u| shown.contains(u.id.as_str())).collect();
            (f.floor, units)
        })
        .filter(|(_, units)| !units.is_empty())
        .collect();

    html! {
        article class="container-grid" {
            h3 { (noun) " " (container.id) " · " (container.name) " " small class="muted" { (humanize(&container.stage)) } }
            @if floors.is_empty() {
                p class="muted" { "No " (view.variant.unit_noun().to_lowercase()) "s match the current filters." }
            }
            @for (floor, units) in &floors {
                div class="floor" {
                    span class="floor-no" { "F" (*floor) }
                    @for unit in units {
                        (unit_cell(view.variant, unit))
                    }
                }
            }
            (template_controls(view, project, container))
        }
    }
}

fn unit_cell(variant: Variant, unit: &Unit) -> Markup {
    html! {
        a class={ "unit tone-" (unit.status.tone()) } href=(buyer_href(variant, &unit.id, None)) {
            strong { (unit.label) } " " (status_chip(&unit.status))
            br;
            small { (unit.facing) " · " (unit.spec.size()) " · " (unit.spec.measure()) }
            @if !unit.buyer.customer_name.is_empty() {
                br;
                small { (unit.buyer.customer_name) }
            }
        }
    }
}

fn template_controls(view: &MatrixView, project: &Project, container: &Container) -> Markup {
    let variant = view.variant;
    let state: TemplateState = view.templates.get(&project.id, container);
    let saved_at = view.templates.saved_at(&project.id, &container.id);

    html! {
        details class="template" {
            summary { (variant.container_noun()) " template" }
            form class="template-form" method="post" action={ "/" (variant.slug()) "/templates" } {
                input type="hidden" name="project" value=(project.id);
                input type="hidden" name="container" value=(container.id);
                label { "Floors" input type="number" min="1" name="floors" value=(state.floors); }
                label { "Units per floor" input type="number" min="1" name="units_per_floor" value=(state.units_per_floor); }
                (text_input("size", variant.size_label(), &state.size))
                (text_input("facing", "Facing", &state.facing))
                (text_input("measure", variant.measure_label(), &state.measure))
                label {
                    "Preset"
                    select name="preset" {
                        option value="" { "None" }
                        @for (idx, preset) in presets(variant).iter().enumerate() {
                            option value=(idx) { (preset.label) }
                        }
                    }
                }
                button type="submit" name="action" value="apply" { "Apply" }
                button type="submit" name="action" value="save" { "Save template" }
            }
            @if let Some(at) = saved_at {
                p class="muted" { "Last saved " (at.format("%Y-%m-%d %H:%M UTC").to_string()) }
            }
        }
    }
}

pub fn matrix_href(variant: Variant, project_id: &str, extra: &[(&str, &str)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("project", project_id);
    query.extend_pairs(extra);
    format!("/{}?{}", variant.slug(), query.finish())
}

pub fn buyer_href(variant: Variant, unit_id: &str, preset: Option<usize>) -> String {
    let base = format!("/{}/units/{}/buyer", variant.slug(), urlencoding::encode(unit_id));
    match preset {
        Some(idx) => format!("{base}?preset={idx}"),
        None => base,
    }
}
