// src/inventory/normalize.rs

//! Turns whatever the sales backend hands us into the canonical
//! project -> container -> floor -> unit tree.
//!
//! Upstream systems disagree on field names (`floors` vs `levels`, `units` vs
//! `flats`, `project_unit_*` columns from the grid endpoint, ...). Every logical
//! field is therefore read through an ordered list of candidate keys; the first
//! key holding a usable value wins. Nothing here fails: malformed input simply
//! produces fewer (or zero) projects.

use crate::inventory::model::{Buyer, Container, Floor, Project, Unit, UnitSpec, UnitStatus, Variant};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

type Object = Map<String, Value>;

const PAYLOAD_LISTS: &[&str] = &["results", "projects"];

const PROJECT_ID: &[&str] = &["id", "project_id"];
const PROJECT_CODE: &[&str] = &["code", "project_code"];
const PROJECT_NAME: &[&str] = &["name", "project_name"];
const PROJECT_STAGE: &[&str] = &["stage"];
const PROJECT_STATUS: &[&str] = &["status", "project_status"];
const PROJECT_BADGE: &[&str] = &["badge"];
// The grid endpoint reports the sale phase as `project_status`.
const GRID_PROJECT_STAGE: &[&str] = &["project_status", "stage"];
const GRID_PROJECT_BADGE: &[&str] = &["project_status", "badge"];
const PROJECT_LOCATION: &[&str] = &["location", "land_address", "address", "project_land_address"];
const PROJECT_DESCRIPTION: &[&str] = &["description", "summary", "project_description"];

const CONTAINER_NAME: &[&str] = &["name", "project_block_name", "block_label", "zone_label"];
const CONTAINER_STAGE: &[&str] = &["stage"];
const CONTAINER_FLOOR_COUNT: &[&str] = &["floor_count", "floorsCount", "project_block_floor_count"];
const CONTAINER_UNITS_PER_FLOOR: &[&str] = &["units_per_floor", "unitsPerFloor", "project_block_units_per_floor"];

const FLOOR_NUMBER: &[&str] = &["floor", "level"];

const UNIT_ID: &[&str] = &["unit_id", "plot_id", "id"];
const UNIT_LABEL: &[&str] = &["unit_label", "plot_label", "project_unit_label", "label", "name"];
const UNIT_STATUS: &[&str] = &["status", "project_unit_status"];
const UNIT_STAGE: &[&str] = &["stage", "sale_stage"];
const UNIT_FACING: &[&str] = &["facing", "project_unit_facing"];
const UNIT_BHK: &[&str] = &["bhk", "flat_type", "project_unit_bhk_configuration"];
const UNIT_AREA: &[&str] = &["area_sqft", "area", "project_unit_area_sqft"];
const UNIT_SIZE: &[&str] = &["size", "plot_size"];
const UNIT_PRICE: &[&str] = &["price", "amount"];
const UNIT_BUYER: &[&str] = &["buyer"];

const BUYER_NAME: &[&str] = &["customerName", "customer_name", "name"];
const BUYER_CONTACT: &[&str] = &["contact", "phone", "mobile"];
const BUYER_PARTNER: &[&str] = &["channelPartner", "channel_partner"];
const BUYER_NOTES: &[&str] = &["notes"];
// Same fields as flat columns on the unit row (grid endpoint).
const ROW_BUYER_NAME: &[&str] = &["buyer_customer_name", "project_unit_buyer_name"];
const ROW_BUYER_CONTACT: &[&str] = &["buyer_contact"];
const ROW_BUYER_PARTNER: &[&str] = &["buyer_channel_partner_name"];

/// Key lists that differ between the flat and plot screens.
struct VariantFields {
    containers: &'static [&'static str],
    container_id: &'static [&'static str],
    floors: &'static [&'static str],
    units: &'static [&'static str],
    container_prefix: &'static str,
    unit_prefix: &'static str,
    code_prefix: &'static str,
    badge: &'static str,
}

const FLAT_FIELDS: VariantFields = VariantFields {
    containers: &["blocks", "towers"],
    container_id: &["block_id", "zone_id", "code", "id"],
    floors: &["floors", "levels", "floor_count_data"],
    units: &["units", "flats", "plots"],
    container_prefix: "BLK",
    unit_prefix: "U",
    code_prefix: "MF",
    badge: "Sales matrix",
};

const PLOT_FIELDS: VariantFields = VariantFields {
    containers: &["zones", "blocks"],
    container_id: &["zone_id", "block_id", "code", "id"],
    floors: &["floors", "levels"],
    units: &["plots", "units", "flats"],
    container_prefix: "Z",
    unit_prefix: "P",
    code_prefix: "MP",
    badge: "Plot matrix",
};

fn fields(variant: Variant) -> &'static VariantFields {
    match variant {
        Variant::Flat => &FLAT_FIELDS,
        Variant::Plot => &PLOT_FIELDS,
    }
}

/// Which upstream response a project came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `{ projects: [...] }`, `{ results: [...] }` or a bare array.
    Nested,
    /// `{ project, blocks }` from the per-project grid endpoint.
    Grid,
}

/// A project object plus the list its containers were found under. The grid
/// endpoint returns `{ project, blocks }`, so the two are not always nested.
struct RawProject<'a> {
    index: usize,
    shape: Shape,
    fields: &'a Object,
    containers: Option<&'a Vec<Value>>,
}

/// Normalizes a raw payload into the canonical tree.
///
/// Identifiers missing upstream are synthesized from positions
/// (`project-container-unit`), so the same payload always yields the same ids.
/// Floors without units and containers without floors are dropped.
pub fn normalize(payload: &Value, variant: Variant) -> Vec<Project> {
    let raw = resolve_projects(payload, variant);
    let mut ids = IdRegistry::default();

    let projects: Vec<Project> = raw
        .iter()
        .map(|rp| normalize_project(rp, variant, &mut ids))
        .collect();

    debug!(
        variant = %variant,
        projects = projects.len(),
        "normalized sales payload"
    );
    projects
}

fn resolve_projects(payload: &Value, variant: Variant) -> Vec<RawProject<'_>> {
    let spec = fields(variant);
    match payload {
        Value::Array(items) => projects_from_list(items, spec),
        Value::Object(obj) => {
            if let Some(project) = object(obj, &["project"]) {
                return vec![RawProject {
                    index: 0,
                    shape: Shape::Grid,
                    fields: project,
                    containers: list(obj, spec.containers),
                }];
            }
            list(obj, PAYLOAD_LISTS)
                .map(|items| projects_from_list(items, spec))
                .unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

fn projects_from_list<'a>(items: &'a [Value], spec: &VariantFields) -> Vec<RawProject<'a>> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let obj = item.as_object()?;
            Some(RawProject {
                index,
                shape: Shape::Nested,
                fields: obj,
                containers: list(obj, spec.containers),
            })
        })
        .collect()
}

fn normalize_project(raw: &RawProject<'_>, variant: Variant, ids: &mut IdRegistry) -> Project {
    let spec = fields(variant);
    let obj = raw.fields;
    let pi = raw.index;
    let (stage_keys, badge_keys, default_badge) = match raw.shape {
        Shape::Nested => (PROJECT_STAGE, PROJECT_BADGE, spec.badge),
        Shape::Grid => (GRID_PROJECT_STAGE, GRID_PROJECT_BADGE, "Live matrix"),
    };
    let stage = text(obj, stage_keys)
        .unwrap_or_else(|| "launch".to_string())
        .to_lowercase();

    let mut containers = Vec::new();
    for (ci, item) in raw.containers.into_iter().flatten().enumerate() {
        let Some(container) = item.as_object() else {
            continue;
        };
        if let Some(c) = normalize_container(container, pi, ci, &stage, raw.shape, variant, ids) {
            containers.push(c);
        }
    }

    Project {
        id: text(obj, PROJECT_ID).unwrap_or_else(|| format!("project-{pi}")),
        code: text(obj, PROJECT_CODE).unwrap_or_else(|| format!("{}-{pi}", spec.code_prefix)),
        name: text(obj, PROJECT_NAME).unwrap_or_else(|| "Unnamed project".to_string()),
        status: text(obj, PROJECT_STATUS).unwrap_or_else(|| "active".to_string()),
        badge: text(obj, badge_keys).unwrap_or_else(|| default_badge.to_string()),
        location: text(obj, PROJECT_LOCATION).unwrap_or_else(|| "Location pending".to_string()),
        description: text(obj, PROJECT_DESCRIPTION).unwrap_or_default(),
        stage,
        containers,
    }
}

fn normalize_container(
    obj: &Object,
    pi: usize,
    ci: usize,
    project_stage: &str,
    shape: Shape,
    variant: Variant,
    ids: &mut IdRegistry,
) -> Option<Container> {
    let spec = fields(variant);
    // Running index across the whole container keeps synthesized ids unique
    // even though every floor restarts its own numbering.
    let mut running = 0usize;
    let mut floors = Vec::new();

    for item in list(obj, spec.floors).into_iter().flatten() {
        let Some(floor) = item.as_object() else {
            continue;
        };
        let mut units = Vec::new();
        for (ui, raw_unit) in list(floor, spec.units).into_iter().flatten().enumerate() {
            let Some(unit) = raw_unit.as_object() else {
                continue;
            };
            let fallback_id = format!("{pi}-{ci}-{running}");
            running += 1;
            units.push(normalize_unit(unit, ui, fallback_id, project_stage, variant, ids));
        }
        if units.is_empty() {
            continue;
        }
        floors.push(Floor {
            floor: integer(floor, FLOOR_NUMBER).unwrap_or(0),
            units,
        });
    }

    if floors.is_empty() {
        return None;
    }

    let floor_count = integer(obj, CONTAINER_FLOOR_COUNT)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(floors.len() as u32);
    let default_per_floor = match shape {
        Shape::Nested => 4,
        Shape::Grid => floors[0].units.len() as u32,
    };
    let units_per_floor = integer(obj, CONTAINER_UNITS_PER_FLOOR)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(default_per_floor);

    Some(Container {
        id: text(obj, spec.container_id)
            .unwrap_or_else(|| format!("{}-{}", spec.container_prefix, ci + 1)),
        name: text(obj, CONTAINER_NAME)
            .unwrap_or_else(|| format!("{} {}", variant.container_noun(), ci + 1)),
        stage: text(obj, CONTAINER_STAGE).unwrap_or_else(|| project_stage.to_string()),
        floor_count,
        units_per_floor,
        floors,
    })
}

fn normalize_unit(
    obj: &Object,
    index_in_floor: usize,
    fallback_id: String,
    project_stage: &str,
    variant: Variant,
    ids: &mut IdRegistry,
) -> Unit {
    let spec = fields(variant);
    let id = ids.claim(text(obj, UNIT_ID).unwrap_or(fallback_id));

    let unit_spec = match variant {
        Variant::Flat => UnitSpec::Flat {
            bhk: text(obj, UNIT_BHK).unwrap_or_else(|| variant.default_size().to_string()),
            area_sqft: number(obj, UNIT_AREA).unwrap_or(1100.0),
        },
        Variant::Plot => UnitSpec::Plot {
            size: text(obj, UNIT_SIZE).unwrap_or_else(|| variant.default_size().to_string()),
            price: text(obj, UNIT_PRICE).unwrap_or_else(|| variant.default_measure().to_string()),
        },
    };

    Unit {
        id,
        label: text(obj, UNIT_LABEL)
            .unwrap_or_else(|| format!("{}-{}", spec.unit_prefix, index_in_floor + 1)),
        status: text(obj, UNIT_STATUS)
            .map(|s| UnitStatus::parse(&s))
            .unwrap_or(UnitStatus::Available),
        stage: text(obj, UNIT_STAGE)
            .unwrap_or_else(|| project_stage.to_string())
            .to_lowercase(),
        facing: text(obj, UNIT_FACING).unwrap_or_else(|| variant.default_facing().to_string()),
        spec: unit_spec,
        buyer: normalize_buyer(obj),
    }
}

fn normalize_buyer(unit: &Object) -> Buyer {
    let nested = object(unit, UNIT_BUYER);
    let pick = |nested_keys: &[&str], row_keys: &[&str]| {
        nested
            .and_then(|b| text(b, nested_keys))
            .or_else(|| text(unit, row_keys))
            .unwrap_or_default()
    };

    Buyer {
        customer_name: pick(BUYER_NAME, ROW_BUYER_NAME),
        contact: pick(BUYER_CONTACT, ROW_BUYER_CONTACT),
        channel_partner: pick(BUYER_PARTNER, ROW_BUYER_PARTNER),
        notes: pick(BUYER_NOTES, &[]),
    }
}

/// Hands out unit ids, disambiguating repeats with a `#n` suffix.
#[derive(Default)]
struct IdRegistry {
    seen: HashSet<String>,
}

impl IdRegistry {
    fn claim(&mut self, id: String) -> String {
        if self.seen.insert(id.clone()) {
            return id;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{id}#{n}");
            if self.seen.insert(candidate.clone()) {
                warn!(original = %id, assigned = %candidate, "duplicate unit id in payload");
                return candidate;
            }
            n += 1;
        }
    }
}

// --- Accessors ---
//
// Each takes the candidate keys in priority order. Null, empty strings and
// zero numbers count as absent, matching how upstream fills unset columns.

fn text(obj: &Object, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn number(obj: &Object, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| {
        let n = match obj.get(*key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        (n != 0.0 && n.is_finite()).then_some(n)
    })
}

fn integer(obj: &Object, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| {
        let n = match obj.get(*key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }?;
        (n != 0).then_some(n)
    })
}

/// First key holding an array. An empty array still wins over later keys.
fn list<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter().find_map(|key| obj.get(*key)?.as_array())
}

fn object<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Object> {
    keys.iter().find_map(|key| obj.get(*key)?.as_object())
}
