// FuelWiseLog - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Vehicles
// =============================================================================

/// A car, motorcycle, lorry, or other vehicle that fill-ups are logged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Store-assigned row id.
    pub id: i64,

    /// Display name shown throughout the UI (e.g. "My Honda").
    pub name: String,

    /// Free-text type label ("Car", "Motorcycle", ...). Drives the badge symbol.
    pub vehicle_type: String,

    /// Tag colour as `#RRGGBB`.
    pub colour_hex: String,

    /// Optional licence plate, upper-cased.
    pub plate_number: Option<String>,
}

impl Vehicle {
    /// Dropdown label, e.g. "My Honda (Car)".
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.vehicle_type)
    }

    /// Badge symbol for this vehicle's type.
    pub fn symbol(&self) -> &'static str {
        vehicle_symbol(Some(&self.vehicle_type))
    }
}

/// Validated vehicle fields without an id, used for inserts and updates.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub name: String,
    pub vehicle_type: String,
    pub colour_hex: String,
    pub plate_number: Option<String>,
}

impl VehicleDraft {
    /// Attach a store id, producing the persisted shape.
    pub fn into_vehicle(self, id: i64) -> Vehicle {
        Vehicle {
            id,
            name: self.name,
            vehicle_type: self.vehicle_type,
            colour_hex: self.colour_hex,
            plate_number: self.plate_number,
        }
    }
}

/// Badge symbol for a free-text vehicle type.
///
/// Matching is a case-insensitive substring test, checked in a fixed order
/// so that "Motorcar" resolves to the motorcycle symbol.
pub fn vehicle_symbol(vehicle_type: Option<&str>) -> &'static str {
    const FALLBACK: &str = "\u{1f6de}"; // wheel

    let Some(raw) = vehicle_type else {
        return FALLBACK;
    };
    let t = raw.trim().to_lowercase();
    if t.contains("motor") {
        "\u{1f3cd}\u{fe0f}"
    } else if t.contains("lorry") || t.contains("truck") {
        "\u{1f69b}"
    } else if t.contains("van") {
        "\u{1f690}"
    } else if t.contains("car") {
        "\u{1f697}"
    } else {
        FALLBACK
    }
}

// =============================================================================
// Fuel records
// =============================================================================

/// One fill-up at the pump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRecord {
    /// Store-assigned row id.
    pub id: i64,

    /// Vehicle this fill-up belongs to.
    pub vehicle_id: i64,

    /// Day of the fill-up.
    pub date: NaiveDate,

    /// Fuel volume in litres.
    pub volume_litres: f64,

    /// Amount paid, in the configured currency.
    pub cost: f64,

    /// Odometer reading in kilometres at the time of the fill-up.
    pub mileage_km: f64,
}

/// Validated fill-up fields without an id.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub vehicle_id: i64,
    pub date: NaiveDate,
    pub volume_litres: f64,
    pub cost: f64,
    pub mileage_km: f64,
}

impl RecordDraft {
    /// Attach a store id, producing the persisted shape.
    pub fn into_record(self, id: i64) -> FuelRecord {
        FuelRecord {
            id,
            vehicle_id: self.vehicle_id,
            date: self.date,
            volume_litres: self.volume_litres,
            cost: self.cost,
            mileage_km: self.mileage_km,
        }
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// All variants in dropdown order.
    pub fn all() -> &'static [ThemeMode] {
        &[ThemeMode::Light, ThemeMode::Dark, ThemeMode::System]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::System => "System default",
        }
    }

    /// Parse a config/CLI value (`light`, `dark`, `system`), case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_symbol_matches_by_substring() {
        assert_eq!(vehicle_symbol(Some("Car")), "\u{1f697}");
        assert_eq!(vehicle_symbol(Some("  honda CIVIC car ")), "\u{1f697}");
        assert_eq!(vehicle_symbol(Some("Motorcycle")), "\u{1f3cd}\u{fe0f}");
        assert_eq!(vehicle_symbol(Some("Lorry")), "\u{1f69b}");
        assert_eq!(vehicle_symbol(Some("pickup truck")), "\u{1f69b}");
        assert_eq!(vehicle_symbol(Some("Van")), "\u{1f690}");
        assert_eq!(vehicle_symbol(Some("Others")), "\u{1f6de}");
        assert_eq!(vehicle_symbol(Some("Boat")), "\u{1f6de}");
        assert_eq!(vehicle_symbol(None), "\u{1f6de}");
    }

    /// "motor" is checked before "car", so a motorcar gets the motorcycle badge.
    #[test]
    fn test_vehicle_symbol_order_prefers_motor() {
        assert_eq!(vehicle_symbol(Some("Motorcar")), "\u{1f3cd}\u{fe0f}");
        // "caravan" contains both "van" and "car"; van wins.
        assert_eq!(vehicle_symbol(Some("Caravan")), "\u{1f690}");
    }

    #[test]
    fn test_vehicle_label() {
        let v = VehicleDraft {
            name: "My Honda".to_string(),
            vehicle_type: "Car".to_string(),
            colour_hex: "#B4A7D6".to_string(),
            plate_number: None,
        }
        .into_vehicle(3);
        assert_eq!(v.id, 3);
        assert_eq!(v.label(), "My Honda (Car)");
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!(ThemeMode::parse("Dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse(" light "), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("system"), Some(ThemeMode::System));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::default(), ThemeMode::System);
    }
}
