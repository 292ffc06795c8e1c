// FuelWiseLog - core/fuel_log.rs
//
// Builds the rows of the fuel log: records merged with their vehicle's
// display details and per-interval efficiency, newest date first.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::efficiency::{interval_metrics, IntervalMetrics};
use crate::core::model::{FuelRecord, Vehicle};
use crate::util::constants;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// One fuel-log row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogItem {
    pub record_id: i64,
    pub vehicle_id: i64,
    pub vehicle_name: String,
    pub vehicle_type: String,
    pub colour_hex: String,
    pub date: NaiveDate,
    pub volume_litres: f64,
    pub cost: f64,
    pub mileage_km: f64,
    /// Present only when the previous fill-up of the same vehicle exists
    /// and the odometer advanced since.
    pub efficiency: Option<IntervalMetrics>,
}

/// Build fuel-log rows.
///
/// `records` must be ordered by vehicle, then mileage ascending (the order
/// `FuelStore::all_records` returns). `filter` keeps a single vehicle.
pub fn build_log(records: &[FuelRecord], vehicles: &[Vehicle], filter: Option<i64>) -> Vec<LogItem> {
    let by_id: HashMap<i64, &Vehicle> = vehicles.iter().map(|v| (v.id, v)).collect();

    let mut items: Vec<LogItem> = Vec::with_capacity(records.len());
    let mut prev: Option<&FuelRecord> = None;

    for r in records {
        let (vehicle_name, vehicle_type, colour_hex) = match by_id.get(&r.vehicle_id) {
            Some(v) => (v.name.clone(), v.vehicle_type.clone(), v.colour_hex.clone()),
            None => (
                constants::UNKNOWN_VEHICLE_NAME.to_string(),
                constants::UNKNOWN_VEHICLE_TYPE.to_string(),
                constants::VEHICLE_COLOURS[0].to_string(),
            ),
        };

        let efficiency = prev
            .filter(|p| p.vehicle_id == r.vehicle_id)
            .and_then(|p| interval_metrics(p, r));

        items.push(LogItem {
            record_id: r.id,
            vehicle_id: r.vehicle_id,
            vehicle_name,
            vehicle_type,
            colour_hex,
            date: r.date,
            volume_litres: r.volume_litres,
            cost: r.cost,
            mileage_km: r.mileage_km,
            efficiency,
        });
        prev = Some(r);
    }

    // Stable sort keeps mileage order among fill-ups on the same day.
    items.sort_by(|a, b| b.date.cmp(&a.date));

    if let Some(id) = filter {
        items.retain(|i| i.vehicle_id == id);
    }
    items
}

/// "1 record" / "N records".
pub fn count_label(n: usize) -> String {
    format!("{n} record{}", if n == 1 { "" } else { "s" })
}

/// "1 vehicle" / "N vehicles".
pub fn vehicle_count_label(n: usize) -> String {
    format!("{n} vehicle{}", if n == 1 { "" } else { "s" })
}

/// Vehicle whose averages the log's summary card shows: the filtered
/// vehicle, or the selected one while the log shows every vehicle.
pub fn average_target(filter: Option<i64>, selected: Option<i64>) -> Option<i64> {
    filter.or(selected)
}

/// Keep `stored` if that vehicle still exists, otherwise fall back to the
/// first vehicle. `None` when there are no vehicles.
pub fn resolve_selection(vehicles: &[Vehicle], stored: Option<i64>) -> Option<i64> {
    match stored {
        Some(id) if vehicles.iter().any(|v| v.id == id) => Some(id),
        _ => vehicles.first().map(|v| v.id),
    }
}
