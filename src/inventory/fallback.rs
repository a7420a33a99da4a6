// src/inventory/fallback.rs

//! Bundled demo layouts shown while the live sales API has nothing for a
//! project. Content is fixed so the screens look the same on every machine.

use crate::inventory::model::{
    Buyer, Container, Floor, Project, ProjectChoice, Unit, UnitSpec, UnitStatus, Variant,
};

const A: &str = "available";
const H: &str = "hold";
const B: &str = "booked";
const S: &str = "sold";
const M: &str = "missing";

struct FloorProfile {
    floor: i64,
    stage: &'static str,
    statuses: [&'static str; 4],
}

struct ContainerDef {
    id: &'static str,
    name: &'static str,
    stage: &'static str,
    floors: &'static [FloorProfile],
}

struct ProjectDef {
    id: &'static str,
    name: &'static str,
    stage: &'static str,
    badge: &'static str,
    location: &'static str,
    description: &'static str,
    containers: &'static [ContainerDef],
}

const fn fp(floor: i64, stage: &'static str, statuses: [&'static str; 4]) -> FloorProfile {
    FloorProfile {
        floor,
        stage,
        statuses,
    }
}

const FLOORS_A: &[FloorProfile] = &[
    fp(16, "launch", [A, H, B, S]),
    fp(15, "launch", [S, B, H, M]),
    fp(14, "pre-launch", [A, H, A, B]),
    fp(13, "handover", [S, S, B, A]),
];

const FLOORS_B: &[FloorProfile] = &[
    fp(12, "pre-launch", [A, A, H, B]),
    fp(11, "launch", [H, B, S, M]),
    fp(10, "handover", [S, S, B, A]),
    fp(9, "launch", [A, H, B, A]),
];

const FLOORS_C: &[FloorProfile] = &[
    fp(18, "launch", [A, H, B, S]),
    fp(17, "launch", [B, S, H, M]),
    fp(16, "pre-launch", [A, H, A, B]),
    fp(15, "handover", [S, S, B, A]),
];

const FLOORS_D: &[FloorProfile] = &[
    fp(14, "launch", [H, B, M, S]),
    fp(13, "launch", [A, H, B, A]),
    fp(12, "pre-launch", [A, A, H, B]),
    fp(11, "handover", [S, S, B, A]),
];

const FLOORS_NORTH: &[FloorProfile] = &[
    fp(5, "launch", [A, H, B, S]),
    fp(4, "launch", [H, A, B, S]),
    fp(3, "pre-launch", [A, A, H, B]),
    fp(2, "handover", [S, S, S, S]),
];

const FLOORS_SOUTH: &[FloorProfile] = &[
    fp(5, "launch", [A, H, M, S]),
    fp(4, "launch", [B, B, H, A]),
    fp(3, "pre-launch", [A, A, H, B]),
    fp(2, "handover", [S, S, B, A]),
];

const FLAT_PROJECTS: &[ProjectDef] = &[
    ProjectDef {
        id: "ID-103CCC",
        name: "Skyline Heights",
        stage: "launch",
        badge: "Skyline Heights Matrix",
        location: "Sarjapur Road, Bangalore",
        description: "Tower A and B units for Skyline Heights are prepped with CRM-ready data.",
        containers: &[
            ContainerDef { id: "A", name: "Aurora Block", stage: "launch", floors: FLOORS_A },
            ContainerDef { id: "B", name: "Horizon Block", stage: "pre-launch", floors: FLOORS_B },
        ],
    },
    ProjectDef {
        id: "ID-104DDD",
        name: "Tech Park Residences",
        stage: "pre-launch",
        badge: "Tech Park Residences",
        location: "Kalyani Nagar, Pune",
        description: "Modern twin towers with walk-up controls for flats & amenities.",
        containers: &[
            ContainerDef { id: "Alpha", name: "Alpha Tower", stage: "launch", floors: FLOORS_C },
            ContainerDef { id: "Beta", name: "Beta Tower", stage: "handover", floors: FLOORS_D },
        ],
    },
];

const PLOT_PROJECTS: &[ProjectDef] = &[
    ProjectDef {
        id: "ID-105EEE",
        name: "Meadow Plots",
        stage: "launch",
        badge: "Meadow Plots Launch",
        location: "Whitefield, Bangalore",
        description: "Phase 1 pockets with smart road and landscape planning.",
        containers: &[
            ContainerDef { id: "N", name: "North Ridge", stage: "launch", floors: FLOORS_NORTH },
            ContainerDef { id: "S", name: "South Vale", stage: "pre-launch", floors: FLOORS_SOUTH },
        ],
    },
    ProjectDef {
        id: "ID-106FFF",
        name: "Lakeside Acres",
        stage: "pre-launch",
        badge: "Lakeside Acres",
        location: "Udaipur, Rajasthan",
        description: "Premium lakeside plots with gated community amenities.",
        containers: &[
            ContainerDef { id: "E", name: "East Bay", stage: "launch", floors: FLOORS_NORTH },
            ContainerDef { id: "W", name: "West Shores", stage: "handover", floors: FLOORS_SOUTH },
        ],
    },
];

const FLAT_FACINGS: [&str; 4] = ["East", "West", "North", "South"];
const PLOT_FACINGS: [&str; 4] = ["North", "East", "South", "West"];
const PLOT_SIZES: [&str; 4] = ["1200 sqft", "1500 sqft", "1800 sqft", "2400 sqft"];

fn definitions(variant: Variant) -> &'static [ProjectDef] {
    match variant {
        Variant::Flat => FLAT_PROJECTS,
        Variant::Plot => PLOT_PROJECTS,
    }
}

/// Demo projects for `variant`. With a project id only that project is
/// returned (or nothing, when the id is not one of ours).
pub fn projects(variant: Variant, project_id: Option<&str>) -> Vec<Project> {
    definitions(variant)
        .iter()
        .filter(|def| project_id.map_or(true, |id| def.id == id))
        .map(|def| build_project(def, variant))
        .collect()
}

pub fn choices(variant: Variant) -> Vec<ProjectChoice> {
    definitions(variant)
        .iter()
        .map(|def| ProjectChoice {
            id: def.id.to_string(),
            name: def.name.to_string(),
            code: def.id.to_string(),
        })
        .collect()
}

fn build_project(def: &ProjectDef, variant: Variant) -> Project {
    Project {
        id: def.id.to_string(),
        code: def.id.to_string(),
        name: def.name.to_string(),
        stage: def.stage.to_string(),
        status: "active".to_string(),
        badge: def.badge.to_string(),
        location: def.location.to_string(),
        description: def.description.to_string(),
        containers: def
            .containers
            .iter()
            .map(|c| build_container(c, variant))
            .collect(),
    }
}

fn build_container(def: &ContainerDef, variant: Variant) -> Container {
    Container {
        id: def.id.to_string(),
        name: def.name.to_string(),
        stage: def.stage.to_string(),
        floor_count: def.floors.len() as u32,
        units_per_floor: 4,
        floors: def
            .floors
            .iter()
            .map(|profile| build_floor(def.id, profile, variant))
            .collect(),
    }
}

fn build_floor(container_id: &str, profile: &FloorProfile, variant: Variant) -> Floor {
    let units = profile
        .statuses
        .iter()
        .enumerate()
        .map(|(idx, status)| {
            let (facing, spec) = match variant {
                Variant::Flat => (
                    FLAT_FACINGS[idx % 4],
                    UnitSpec::Flat {
                        bhk: if idx % 2 == 0 { "2 BHK" } else { "3 BHK" }.to_string(),
                        area_sqft: if idx % 2 == 0 {
                            1075.0 + idx as f64 * 20.0
                        } else {
                            1330.0 + idx as f64 * 25.0
                        },
                    },
                ),
                Variant::Plot => (
                    PLOT_FACINGS[idx % 4],
                    UnitSpec::Plot {
                        size: PLOT_SIZES[idx % 4].to_string(),
                        price: format!("{}L", 40 + idx * 6),
                    },
                ),
            };
            Unit {
                id: format!("{container_id}-{}-{}", profile.floor, idx + 1),
                label: format!("{}{:02}", profile.floor, idx + 1),
                status: UnitStatus::parse(status),
                stage: profile.stage.to_string(),
                facing: facing.to_string(),
                spec,
                buyer: Buyer::default(),
            }
        })
        .collect();

    Floor {
        floor: profile.floor,
        units,
    }
}
