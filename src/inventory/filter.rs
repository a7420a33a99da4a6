// src/inventory/filter.rs

use crate::inventory::flatten::FlatUnit;
use crate::inventory::model::{Project, Variant};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Sentinel the filter controls send for "no constraint".
pub const ALL: &str = "all";

/// Grid filter selection. `None` on a categorical field means unconstrained;
/// `Some` values are compared by exact, case-sensitive equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub search: String,
    pub stage: Option<String>,
    pub status: Option<String>,
    pub facing: Option<String>,
    pub container: Option<String>,
    /// Compared against the floor number's string form.
    pub floor: Option<String>,
}

impl Criteria {
    /// Reads criteria from decoded query pairs. The container filter is
    /// accepted under the variant's own key (`block` / `zone`) or `container`.
    pub fn from_query(params: &HashMap<String, String>, variant: Variant) -> Self {
        let get = |key: &str| constraint(params.get(key).map(String::as_str));
        Criteria {
            search: params.get("search").cloned().unwrap_or_default(),
            stage: get("stage"),
            status: get("status"),
            facing: get("facing"),
            container: get(variant.container_key()).or_else(|| get("container")),
            floor: get("floor"),
        }
    }

    /// Query params forwarded to the sales API. Search stays local.
    pub fn to_query(&self, variant: Variant) -> Vec<(String, String)> {
        let mut out = Vec::new();
        let mut push = |key: &str, value: &Option<String>| {
            if let Some(v) = value {
                out.push((key.to_string(), v.clone()));
            }
        };
        push("stage", &self.stage);
        push("status", &self.status);
        push("facing", &self.facing);
        push(variant.container_key(), &self.container);
        push("floor", &self.floor);
        out
    }

    /// True when `unit` passes every active criterion. Categorical checks run
    /// first; the first failure short-circuits.
    pub fn matches(&self, unit: &FlatUnit) -> bool {
        fn allows(want: &Option<String>, have: &str) -> bool {
            want.as_deref().map_or(true, |w| w == have)
        }

        allows(&self.stage, &unit.unit.stage)
            && allows(&self.status, unit.unit.status.as_str())
            && allows(&self.facing, &unit.unit.facing)
            && allows(&self.container, &unit.container_id)
            && allows(&self.floor, &unit.floor_number.to_string())
            && matches_search(unit, &self.search)
    }
}

fn constraint(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL)
        .map(str::to_string)
}

/// Case-insensitive substring match on the unit label or its container name.
/// A blank term matches everything.
pub fn matches_search(unit: &FlatUnit, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    unit.unit.label.to_lowercase().contains(&needle)
        || unit.container_name.to_lowercase().contains(&needle)
}

pub fn apply_filters(units: &[FlatUnit], criteria: &Criteria) -> Vec<FlatUnit> {
    let out: Vec<FlatUnit> = units
        .iter()
        .filter(|u| criteria.matches(u))
        .cloned()
        .collect();
    debug!(before = units.len(), after = out.len(), "applied grid filters");
    out
}

/// Project-level search: a project stays visible when its own name or code
/// matches, or any of its units matches by label or container name.
pub fn visible_projects<'a>(
    projects: &'a [Project],
    units: &[FlatUnit],
    search: &str,
) -> Vec<&'a Project> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return projects.iter().collect();
    }
    projects
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.code.to_lowercase().contains(&needle)
                || units
                    .iter()
                    .any(|u| u.project_id == p.id && matches_search(u, &needle))
        })
        .collect()
}

// --- Option lists for the filter controls ---

pub fn stage_options(units: &[FlatUnit]) -> Vec<String> {
    distinct_sorted(units.iter().map(|u| u.unit.stage.as_str()))
}

pub fn facing_options(units: &[FlatUnit]) -> Vec<String> {
    distinct_sorted(units.iter().map(|u| u.unit.facing.as_str()))
}

pub fn floor_options(units: &[FlatUnit]) -> Vec<i64> {
    units
        .iter()
        .map(|u| u.floor_number)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn container_options(projects: &[Project]) -> Vec<String> {
    distinct_sorted(
        projects
            .iter()
            .flat_map(|p| &p.containers)
            .map(|c| c.id.as_str()),
    )
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// `pre-launch` -> `Pre Launch`.
pub fn humanize(value: &str) -> String {
    value
        .split('-')
        .map(|chunk| {
            let mut chars = chunk.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
impl Criteria {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = constraint(Some(&stage.into()));
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = constraint(Some(&status.into()));
        self
    }

    pub fn facing(mut self, facing: impl Into<String>) -> Self {
        self.facing = constraint(Some(&facing.into()));
        self
    }

    pub fn container(mut self, container: impl Into<String>) -> Self {
        self.container = constraint(Some(&container.into()));
        self
    }

    /// Accepts a number or its string form.
    pub fn floor(mut self, floor: impl ToString) -> Self {
        self.floor = constraint(Some(&floor.to_string()));
        self
    }
}
