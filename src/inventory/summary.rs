// src/inventory/summary.rs

use crate::inventory::flatten::FlatUnit;
use crate::inventory::model::UnitStatus;
use serde::Serialize;
use std::collections::HashSet;

/// KPI counts over a (usually filtered) unit list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub available: usize,
    pub hold: usize,
    pub booked: usize,
    pub sold: usize,
    pub missing: usize,
    /// Distinct (project, container) pairs present in the input.
    pub containers: usize,
}

impl Summary {
    pub fn count(&self, status: &UnitStatus) -> usize {
        match status {
            UnitStatus::Available => self.available,
            UnitStatus::Hold => self.hold,
            UnitStatus::Booked => self.booked,
            UnitStatus::Sold => self.sold,
            UnitStatus::Missing => self.missing,
            UnitStatus::Unknown(_) => 0,
        }
    }
}

pub fn summarize(units: &[FlatUnit]) -> Summary {
    let mut summary = Summary {
        total: units.len(),
        ..Summary::default()
    };
    let mut containers = HashSet::new();

    for unit in units {
        let bucket = match &unit.unit.status {
            UnitStatus::Available => Some(&mut summary.available),
            UnitStatus::Hold => Some(&mut summary.hold),
            UnitStatus::Booked => Some(&mut summary.booked),
            UnitStatus::Sold => Some(&mut summary.sold),
            UnitStatus::Missing => Some(&mut summary.missing),
            // counted in `total` only
            UnitStatus::Unknown(_) => None,
        };
        if let Some(bucket) = bucket {
            *bucket += 1;
        }
        containers.insert((unit.project_id.as_str(), unit.container_id.as_str()));
    }

    summary.containers = containers.len();
    summary
}

/// Summary restricted to one project's units (project panel stats).
pub fn summarize_project(units: &[FlatUnit], project_id: &str) -> Summary {
    let scoped: Vec<FlatUnit> = units
        .iter()
        .filter(|u| u.project_id == project_id)
        .cloned()
        .collect();
    summarize(&scoped)
}
