// src/inventory/inventory_error.rs

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Unit not found: {0}")]
    UnitNotFound(String),
    #[error("Container not found: {0}")]
    ContainerNotFound(String),
    #[error("Unknown preset: {0}")]
    UnknownPreset(usize),
}
