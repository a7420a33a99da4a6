// src/inventory/buyer.rs

use crate::inventory::inventory_error::InventoryError;
use crate::inventory::model::{Buyer, Project, Unit, UnitSpec, Variant};
use crate::inventory::template::Preset;
use std::collections::HashMap;
use tracing::{info, warn};

pub const CHANNEL_PARTNERS: [&str; 3] = ["In-house sales", "Channel Prism", "Partner Orbit"];

/// Editable copy of a unit's buyer record plus the unit attributes the
/// editor also lets sales correct (facing, size, area/price).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuyerForm {
    pub channel_partner: String,
    pub customer_name: String,
    pub contact: String,
    pub notes: String,
    pub facing: String,
    pub size: String,
    pub measure: String,
}

impl BuyerForm {
    pub fn from_unit(unit: &Unit) -> Self {
        BuyerForm {
            channel_partner: unit.buyer.channel_partner.clone(),
            customer_name: unit.buyer.customer_name.clone(),
            contact: unit.buyer.contact.clone(),
            notes: unit.buyer.notes.clone(),
            facing: unit.facing.clone(),
            size: unit.spec.size().to_string(),
            measure: unit.spec.measure(),
        }
    }

    /// Reads a submitted form. Missing fields come back empty.
    pub fn from_pairs(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).map(|v| v.trim().to_string()).unwrap_or_default();
        BuyerForm {
            channel_partner: get("channel_partner"),
            customer_name: get("customer_name"),
            contact: get("contact"),
            notes: get("notes"),
            facing: get("facing"),
            size: get("size"),
            measure: get("measure"),
        }
    }

    /// Overwrites facing / size / measure; buyer identity is untouched.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.facing = preset.facing.to_string();
        self.size = preset.size.to_string();
        self.measure = preset.measure.to_string();
    }

    fn buyer(&self) -> Buyer {
        Buyer {
            customer_name: self.customer_name.clone(),
            contact: self.contact.clone(),
            channel_partner: self.channel_partner.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Open editor state for one unit. Presets change only `form` until saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerEditor {
    pub unit_id: String,
    pub unit_label: String,
    pub variant: Variant,
    pub form: BuyerForm,
}

impl BuyerEditor {
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.form.apply_preset(preset);
    }
}

pub fn open_buyer_editor(unit: &Unit, variant: Variant) -> BuyerEditor {
    BuyerEditor {
        unit_id: unit.id.clone(),
        unit_label: unit.label.clone(),
        variant,
        form: BuyerForm::from_unit(unit),
    }
}

pub fn find_unit<'a>(projects: &'a [Project], unit_id: &str) -> Option<&'a Unit> {
    projects
        .iter()
        .flat_map(|p| &p.containers)
        .flat_map(|c| &c.floors)
        .flat_map(|f| &f.units)
        .find(|u| u.id == unit_id)
}

pub fn find_unit_mut<'a>(projects: &'a mut [Project], unit_id: &str) -> Option<&'a mut Unit> {
    projects
        .iter_mut()
        .flat_map(|p| &mut p.containers)
        .flat_map(|c| &mut c.floors)
        .flat_map(|f| &mut f.units)
        .find(|u| u.id == unit_id)
}

/// Writes `form` onto the unit with `unit_id`. The buyer record is replaced
/// wholesale; facing / size / measure only change when non-empty. No version
/// check: the last save for a unit wins.
pub fn save_buyer<'a>(
    projects: &'a mut [Project],
    unit_id: &str,
    form: &BuyerForm,
) -> Result<&'a Unit, InventoryError> {
    let unit = find_unit_mut(projects, unit_id)
        .ok_or_else(|| InventoryError::UnitNotFound(unit_id.to_string()))?;

    unit.buyer = form.buyer();
    if !form.facing.is_empty() {
        unit.facing = form.facing.clone();
    }

    match &mut unit.spec {
        UnitSpec::Flat { bhk, area_sqft } => {
            if !form.size.is_empty() {
                *bhk = form.size.clone();
            }
            if !form.measure.is_empty() {
                match form.measure.parse::<f64>() {
                    Ok(area) if area.is_finite() && area > 0.0 => *area_sqft = area,
                    _ => warn!(unit = %unit_id, measure = %form.measure, "ignoring non-numeric area"),
                }
            }
        }
        UnitSpec::Plot { size, price } => {
            if !form.size.is_empty() {
                *size = form.size.clone();
            }
            if !form.measure.is_empty() {
                *price = form.measure.clone();
            }
        }
    }

    info!(unit = %unit_id, label = %unit.label, "buyer details saved");
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::fallback;
    use crate::inventory::flatten::flatten;
    use crate::inventory::template::{FLAT_PRESETS, PLOT_PRESETS};

    #[test]
    fn editor_seeds_from_unit() {
        let projects = fallback::projects(Variant::Flat, Some("ID-103CCC"));
        let unit = find_unit(&projects, "A-16-2").unwrap();

        let editor = open_buyer_editor(unit, Variant::Flat);
        assert_eq!(editor.unit_label, "1602");
        assert_eq!(editor.form.facing, "West");
        assert_eq!(editor.form.size, "3 BHK");
        assert_eq!(editor.form.measure, "1355");
        assert_eq!(editor.form.customer_name, "");
    }

    #[test]
    fn preset_changes_form_not_unit() {
        let projects = fallback::projects(Variant::Plot, Some("ID-105EEE"));
        let unit = find_unit(&projects, "N-5-1").unwrap().clone();

        let mut editor = open_buyer_editor(&unit, Variant::Plot);
        editor.form.customer_name = "Meera".into();
        editor.apply_preset(&PLOT_PRESETS[1]);

        assert_eq!(editor.form.size, "2400 sqft");
        assert_eq!(editor.form.facing, "East");
        assert_eq!(editor.form.measure, "INR 68 L");
        assert_eq!(editor.form.customer_name, "Meera");
        assert_eq!(find_unit(&projects, "N-5-1"), Some(&unit));
    }

    #[test]
    fn save_touches_only_the_target_unit() {
        let mut projects = fallback::projects(Variant::Flat, None);
        let before = flatten(&projects);

        let mut form = BuyerForm::from_unit(find_unit(&projects, "B-10-3").unwrap());
        form.customer_name = "Arjun Rao".into();
        form.channel_partner = CHANNEL_PARTNERS[1].into();
        form.apply_preset(&FLAT_PRESETS[1]);

        let saved = save_buyer(&mut projects, "B-10-3", &form).unwrap();
        assert_eq!(saved.buyer.customer_name, "Arjun Rao");
        assert_eq!(saved.facing, "North");

        let after = flatten(&projects);
        assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(&after) {
            if old.unit.id == "B-10-3" {
                assert_eq!(new.unit.buyer.channel_partner, "Channel Prism");
                assert_eq!(
                    new.unit.spec,
                    UnitSpec::Flat {
                        bhk: "3 BHK".into(),
                        area_sqft: 1450.0
                    }
                );
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn bad_area_keeps_previous_value() {
        let mut projects = fallback::projects(Variant::Flat, Some("ID-103CCC"));
        let mut form = BuyerForm::from_unit(find_unit(&projects, "A-16-1").unwrap());
        form.measure = "about 1200".into();

        let saved = save_buyer(&mut projects, "A-16-1", &form).unwrap();
        assert_eq!(saved.spec.measure(), "1075");
    }

    #[test]
    fn last_save_wins() {
        let mut projects = fallback::projects(Variant::Plot, Some("ID-106FFF"));
        let mut first = BuyerForm::from_unit(find_unit(&projects, "E-3-2").unwrap());
        first.customer_name = "First".into();
        let mut second = first.clone();
        second.customer_name = "Second".into();

        save_buyer(&mut projects, "E-3-2", &first).unwrap();
        save_buyer(&mut projects, "E-3-2", &second).unwrap();

        assert_eq!(find_unit(&projects, "E-3-2").unwrap().buyer.customer_name, "Second");
    }

    #[test]
    fn unknown_unit_is_an_error() {
        let mut projects = fallback::projects(Variant::Flat, None);
        let err = save_buyer(&mut projects, "Z-1-1", &BuyerForm::default()).unwrap_err();
        assert_eq!(err, InventoryError::UnitNotFound("Z-1-1".into()));
    }

    #[test]
    fn submitted_pairs_are_trimmed() {
        let params: HashMap<String, String> = [("customer_name", "  Kiran "), ("facing", "South")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let form = BuyerForm::from_pairs(&params);
        assert_eq!(form.customer_name, "Kiran");
        assert_eq!(form.facing, "South");
        assert_eq!(form.contact, "");
    }
}
