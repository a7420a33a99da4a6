// src/inventory/flatten.rs

use crate::inventory::model::{Project, Unit};
use serde::Serialize;

/// A unit with its parents' identity copied onto it, so filters, summaries
/// and the buyer editor never have to walk back up the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatUnit {
    #[serde(flatten)]
    pub unit: Unit,
    pub project_id: String,
    pub project_name: String,
    pub project_code: String,
    pub container_id: String,
    pub container_name: String,
    pub floor_number: i64,
    pub container_stage: String,
    pub project_stage: String,
}

/// Depth-first walk emitting units in tree order.
pub fn flatten(projects: &[Project]) -> Vec<FlatUnit> {
    let mut out = Vec::new();
    for project in projects {
        for container in &project.containers {
            for floor in &container.floors {
                for unit in &floor.units {
                    out.push(FlatUnit {
                        unit: unit.clone(),
                        project_id: project.id.clone(),
                        project_name: project.name.clone(),
                        project_code: project.code.clone(),
                        container_id: container.id.clone(),
                        container_name: container.name.clone(),
                        floor_number: floor.floor,
                        container_stage: container.stage.clone(),
                        project_stage: project.stage.clone(),
                    });
                }
            }
        }
    }
    out
}
