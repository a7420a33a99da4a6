// src/inventory/model.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which sales screen a tree belongs to. Flat projects are split into blocks,
/// plot projects into zones; everything else about the hierarchy is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Flat,
    Plot,
}

impl Variant {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "multi-flat" => Some(Variant::Flat),
            "multi-plot" => Some(Variant::Plot),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Variant::Flat => "multi-flat",
            Variant::Plot => "multi-plot",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Variant::Flat => "Multi-flat Sales",
            Variant::Plot => "Multi-plot Sales",
        }
    }

    /// Value of `project_flat_configuration` upstream uses for this screen.
    pub fn configuration(self) -> &'static str {
        match self {
            Variant::Flat => "multi_flat",
            Variant::Plot => "multi_plot",
        }
    }

    pub fn container_noun(self) -> &'static str {
        match self {
            Variant::Flat => "Block",
            Variant::Plot => "Zone",
        }
    }

    /// Query/form key carrying the container filter.
    pub fn container_key(self) -> &'static str {
        match self {
            Variant::Flat => "block",
            Variant::Plot => "zone",
        }
    }

    pub fn unit_noun(self) -> &'static str {
        match self {
            Variant::Flat => "Unit",
            Variant::Plot => "Plot",
        }
    }

    pub fn default_facing(self) -> &'static str {
        match self {
            Variant::Flat => "East",
            Variant::Plot => "North",
        }
    }

    pub fn default_size(self) -> &'static str {
        match self {
            Variant::Flat => "2 BHK",
            Variant::Plot => "1200 sqft",
        }
    }

    pub fn default_measure(self) -> &'static str {
        match self {
            Variant::Flat => "1100",
            Variant::Plot => "INR 45 L",
        }
    }

    pub fn size_label(self) -> &'static str {
        match self {
            Variant::Flat => "BHK",
            Variant::Plot => "Size",
        }
    }

    pub fn measure_label(self) -> &'static str {
        match self {
            Variant::Flat => "Area (sq ft)",
            Variant::Plot => "Price",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Sale state of a unit. Anything upstream sends outside the five known
/// states is kept, lower-cased, as `Unknown`; no summary bucket counts it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnitStatus {
    Available,
    Hold,
    Booked,
    Sold,
    Missing,
    Unknown(String),
}

impl UnitStatus {
    /// The five bucketed states, in display order.
    pub const ALL: [UnitStatus; 5] = [
        UnitStatus::Available,
        UnitStatus::Hold,
        UnitStatus::Booked,
        UnitStatus::Sold,
        UnitStatus::Missing,
    ];

    /// Exact lookup on the canonical lower-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        UnitStatus::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Lenient parse used on upstream payloads: trims and lower-cases first.
    pub fn parse(raw: &str) -> Self {
        let name = raw.trim().to_lowercase();
        Self::from_name(&name).unwrap_or(UnitStatus::Unknown(name))
    }

    pub fn as_str(&self) -> &str {
        match self {
            UnitStatus::Available => "available",
            UnitStatus::Hold => "hold",
            UnitStatus::Booked => "booked",
            UnitStatus::Sold => "sold",
            UnitStatus::Missing => "missing",
            UnitStatus::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UnitStatus::Available => "Available",
            UnitStatus::Hold => "Hold",
            UnitStatus::Booked => "Booked",
            UnitStatus::Sold => "Sold",
            UnitStatus::Missing => "Missing",
            UnitStatus::Unknown(_) => "Unknown",
        }
    }

    /// Colour family used by the grid chips.
    pub fn tone(&self) -> &'static str {
        match self {
            UnitStatus::Available => "success",
            UnitStatus::Hold => "warning",
            UnitStatus::Booked => "info",
            UnitStatus::Sold => "neutral",
            UnitStatus::Missing => "danger",
            UnitStatus::Unknown(_) => "neutral",
        }
    }
}

impl From<String> for UnitStatus {
    fn from(raw: String) -> Self {
        UnitStatus::parse(&raw)
    }
}

impl From<UnitStatus> for String {
    fn from(status: UnitStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific sizing of a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UnitSpec {
    Flat { bhk: String, area_sqft: f64 },
    Plot { size: String, price: String },
}

impl UnitSpec {
    /// BHK configuration for flats, size label for plots.
    pub fn size(&self) -> &str {
        match self {
            UnitSpec::Flat { bhk, .. } => bhk,
            UnitSpec::Plot { size, .. } => size,
        }
    }

    /// Area in sqft for flats, price label for plots.
    pub fn measure(&self) -> String {
        match self {
            UnitSpec::Flat { area_sqft, .. } => format_area(*area_sqft),
            UnitSpec::Plot { price, .. } => price.clone(),
        }
    }
}

pub fn format_area(area: f64) -> String {
    if area.fract() == 0.0 {
        format!("{}", area as i64)
    } else {
        format!("{area}")
    }
}

/// Buyer and channel-partner details attached to a unit.
/// An unassigned unit carries an all-empty record rather than no record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub customer_name: String,
    pub contact: String,
    pub channel_partner: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub label: String,
    pub status: UnitStatus,
    pub stage: String,
    pub facing: String,
    pub spec: UnitSpec,
    pub buyer: Buyer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub floor: i64,
    pub units: Vec<Unit>,
}

/// A block (flat projects) or zone (plot projects).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: String,
    pub name: String,
    pub stage: String,
    pub floor_count: u32,
    /// Advisory only; floors may hold more or fewer units.
    pub units_per_floor: u32,
    pub floors: Vec<Floor>,
}

impl Container {
    pub fn unit_count(&self) -> usize {
        self.floors.iter().map(|f| f.units.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub code: String,
    pub name: String,
    pub stage: String,
    pub status: String,
    pub badge: String,
    pub location: String,
    pub description: String,
    pub containers: Vec<Container>,
}

impl Project {
    pub fn container(&self, container_id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == container_id)
    }

    pub fn unit_count(&self) -> usize {
        self.containers.iter().map(Container::unit_count).sum()
    }
}

/// Entry in the project picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectChoice {
    pub id: String,
    pub name: String,
    pub code: String,
}

pub fn total_units(projects: &[Project]) -> usize {
    projects.iter().map(Project::unit_count).sum()
}
