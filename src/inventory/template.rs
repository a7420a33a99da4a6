// src/inventory/template.rs

//! Per-container "bulk unit generation" drafts. These live only in the
//! viewer's session and are never reconciled with the real floors/units.

use crate::inventory::model::{Container, Variant};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use tracing::info;

/// Named bundle of size / facing / measure values, offered both in the
/// template controls and in the buyer editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub label: &'static str,
    pub size: &'static str,
    pub facing: &'static str,
    pub measure: &'static str,
}

pub const FLAT_PRESETS: [Preset; 3] = [
    Preset {
        label: "2BHK East Cozy - 1065",
        size: "2 BHK",
        facing: "East",
        measure: "1065",
    },
    Preset {
        label: "3BHK North Premium - 1450",
        size: "3 BHK",
        facing: "North",
        measure: "1450",
    },
    Preset {
        label: "3BHK West Penthouse - 1580",
        size: "3 BHK",
        facing: "West",
        measure: "1580",
    },
];

pub const PLOT_PRESETS: [Preset; 3] = [
    Preset {
        label: "Plot 30 x 40 - North",
        size: "1200 sqft",
        facing: "North",
        measure: "INR 42 L",
    },
    Preset {
        label: "Plot 40 x 60 - East",
        size: "2400 sqft",
        facing: "East",
        measure: "INR 68 L",
    },
    Preset {
        label: "Plot 30 x 50 - West",
        size: "1500 sqft",
        facing: "West",
        measure: "INR 52 L",
    },
];

pub fn presets(variant: Variant) -> &'static [Preset] {
    match variant {
        Variant::Flat => &FLAT_PRESETS,
        Variant::Plot => &PLOT_PRESETS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateState {
    pub floors: u32,
    pub units_per_floor: u32,
    pub size: String,
    pub facing: String,
    pub measure: String,
}

impl TemplateState {
    /// Starting point for a container nobody has touched yet.
    pub fn for_container(container: &Container, variant: Variant) -> Self {
        let first_floor_units = container
            .floors
            .first()
            .map(|f| f.units.len() as u32)
            .filter(|n| *n > 0);

        TemplateState {
            floors: container.floor_count,
            units_per_floor: first_floor_units.unwrap_or(4),
            size: variant.default_size().to_string(),
            facing: variant.default_facing().to_string(),
            measure: variant.default_measure().to_string(),
        }
    }

    pub fn merge(&mut self, patch: &TemplatePatch) {
        if let Some(floors) = patch.floors {
            self.floors = floors;
        }
        if let Some(units) = patch.units_per_floor {
            self.units_per_floor = units;
        }
        if let Some(size) = &patch.size {
            self.size = size.clone();
        }
        if let Some(facing) = &patch.facing {
            self.facing = facing.clone();
        }
        if let Some(measure) = &patch.measure {
            self.measure = measure.clone();
        }
    }
}

/// Partial update; `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatePatch {
    pub floors: Option<u32>,
    pub units_per_floor: Option<u32>,
    pub size: Option<String>,
    pub facing: Option<String>,
    pub measure: Option<String>,
}

impl From<&Preset> for TemplatePatch {
    fn from(preset: &Preset) -> Self {
        TemplatePatch {
            size: Some(preset.size.to_string()),
            facing: Some(preset.facing.to_string()),
            measure: Some(preset.measure.to_string()),
            ..TemplatePatch::default()
        }
    }
}

/// `${projectId}-${containerId}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateKey(String);

impl TemplateKey {
    pub fn new(project_id: &str, container_id: &str) -> Self {
        TemplateKey(format!("{project_id}-{container_id}"))
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returned by `save`; nothing outside the store is changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAck {
    pub key: TemplateKey,
    pub container_id: String,
    pub state: TemplateState,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TemplateStore {
    variant: Variant,
    entries: HashMap<TemplateKey, TemplateState>,
    saved: HashMap<TemplateKey, DateTime<Utc>>,
}

impl TemplateStore {
    pub fn new(variant: Variant) -> Self {
        TemplateStore {
            variant,
            entries: HashMap::new(),
            saved: HashMap::new(),
        }
    }

    /// Current draft for a container, or the derived default.
    pub fn get(&self, project_id: &str, container: &Container) -> TemplateState {
        self.entries
            .get(&TemplateKey::new(project_id, &container.id))
            .cloned()
            .unwrap_or_else(|| TemplateState::for_container(container, self.variant))
    }

    pub fn set(&mut self, project_id: &str, container: &Container, patch: &TemplatePatch) -> &TemplateState {
        let variant = self.variant;
        let state = self
            .entries
            .entry(TemplateKey::new(project_id, &container.id))
            .or_insert_with(|| TemplateState::for_container(container, variant));
        state.merge(patch);
        state
    }

    pub fn apply_preset(&mut self, project_id: &str, container: &Container, preset: &Preset) -> &TemplateState {
        self.set(project_id, container, &TemplatePatch::from(preset))
    }

    /// Merges `patch` and records the save time. The container's real floor
    /// and unit structure is not regenerated.
    pub fn save(&mut self, project_id: &str, container: &Container, patch: &TemplatePatch) -> TemplateAck {
        let state = self.set(project_id, container, patch).clone();
        let key = TemplateKey::new(project_id, &container.id);
        let saved_at = Utc::now();
        self.saved.insert(key.clone(), saved_at);

        info!(key = %key, floors = state.floors, units_per_floor = state.units_per_floor, "template saved");

        TemplateAck {
            key,
            container_id: container.id.clone(),
            state,
            saved_at,
        }
    }

    pub fn saved_at(&self, project_id: &str, container_id: &str) -> Option<DateTime<Utc>> {
        self.saved
            .get(&TemplateKey::new(project_id, container_id))
            .copied()
    }
}
