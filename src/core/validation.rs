// FuelWiseLog - core/validation.rs
//
// Turns raw form text into validated drafts.
// Every rejected field is reported, not just the first, so the form can
// mark all of them at once.

use crate::core::model::{RecordDraft, VehicleDraft};
use crate::util::constants;
use crate::util::error::{Field, FieldIssue, ValidationError};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Raw text of the add-record form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordInput {
    pub vehicle_id: Option<i64>,
    pub date: String,
    pub litres: String,
    pub cost: String,
    pub mileage: String,
}

/// Raw text of the vehicle form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleInput {
    pub name: String,
    pub vehicle_type: String,
    pub colour_hex: String,
    pub plate: String,
}

/// Collects issues while a form is checked.
#[derive(Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldIssue {
            field,
            message: message.into(),
        });
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(ValidationError { issues: self.0 })
        }
    }
}

/// Parse a strictly positive, finite decimal.
fn positive_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Validate a fill-up.
///
/// `last_mileage` is the highest odometer reading already stored for the
/// vehicle; the new reading must exceed it. `today` bounds the date.
pub fn validate_record(
    input: &RecordInput,
    last_mileage: Option<f64>,
    today: NaiveDate,
) -> Result<RecordDraft, ValidationError> {
    let mut issues = Issues::default();

    let vehicle_id = input.vehicle_id.filter(|id| *id > 0);
    if vehicle_id.is_none() {
        issues.push(Field::Vehicle, "Select a vehicle");
    }

    let date_text = input.date.trim();
    let date = if date_text.is_empty() {
        issues.push(Field::Date, "Pick a date");
        None
    } else {
        match NaiveDate::parse_from_str(date_text, constants::DATE_FORMAT) {
            Ok(d) if d > today => {
                issues.push(Field::Date, "Date cannot be in the future");
                None
            }
            Ok(d) => Some(d),
            Err(_) => {
                issues.push(Field::Date, "Date must be YYYY-MM-DD");
                None
            }
        }
    };

    let litres = positive_amount(&input.litres);
    if litres.is_none() {
        issues.push(Field::Litres, "Invalid liters");
    }

    let cost = positive_amount(&input.cost);
    if cost.is_none() {
        issues.push(Field::Cost, "Invalid cost");
    }

    let mileage = input.mileage.trim().parse::<i64>().ok().filter(|m| *m > 0);
    match (mileage, last_mileage) {
        (None, _) => issues.push(Field::Mileage, "Invalid mileage"),
        (Some(m), Some(last)) if last > 0.0 && m as f64 <= last => issues.push(
            Field::Mileage,
            format!("Mileage must be greater than {}", last as i64),
        ),
        _ => {}
    }

    issues.finish(|| RecordDraft {
        vehicle_id: vehicle_id.unwrap_or_default(),
        date: date.unwrap_or(today),
        volume_litres: litres.unwrap_or_default(),
        cost: cost.unwrap_or_default(),
        mileage_km: mileage.unwrap_or_default() as f64,
    })
}

fn hex_colour_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static colour pattern is valid"))
}

/// True when `value` is a `#RRGGBB` colour.
pub fn is_hex_colour(value: &str) -> bool {
    hex_colour_regex().is_match(value)
}

/// Validate the vehicle form.
///
/// Blank type falls back to the first suggested type and an unusable colour
/// to the first palette colour; only name and plate can be rejected.
pub fn validate_vehicle(input: &VehicleInput) -> Result<VehicleDraft, ValidationError> {
    let mut issues = Issues::default();

    let name = input.name.trim().to_string();
    if name.is_empty() {
        issues.push(Field::Name, "Name required");
    } else if name.chars().count() > constants::MAX_VEHICLE_NAME_LENGTH {
        issues.push(Field::Name, "Name is too long");
    }

    let plate = input.plate.trim().to_uppercase();
    if plate.chars().count() > constants::MAX_PLATE_LENGTH {
        issues.push(Field::Plate, "Plate number is too long");
    }

    let vehicle_type = match input.vehicle_type.trim() {
        "" => constants::VEHICLE_TYPES[0].to_string(),
        t => t.to_string(),
    };

    let colour = input.colour_hex.trim();
    let colour_hex = if is_hex_colour(colour) {
        colour.to_uppercase()
    } else {
        constants::VEHICLE_COLOURS[0].to_string()
    };

    issues.finish(|| VehicleDraft {
        name,
        vehicle_type,
        colour_hex,
        plate_number: (!plate.is_empty()).then_some(plate),
    })
}
