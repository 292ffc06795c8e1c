// FuelWiseLog - core/export.rs
//
// CSV and JSON export of fuel-log rows.
// Core layer: writes to any Write trait object.

use crate::core::fuel_log::LogItem;
use crate::util::constants::{DATE_FORMAT, MAX_EXPORT_ROWS};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Reject exports larger than `MAX_EXPORT_ROWS`.
///
/// Callers writing to a file check this before creating it.
pub fn check_row_limit(items: &[LogItem]) -> Result<(), ExportError> {
    if items.len() > MAX_EXPORT_ROWS {
        return Err(ExportError::TooManyRows {
            count: items.len(),
            max: MAX_EXPORT_ROWS,
        });
    }
    Ok(())
}

/// Optional number rendered as an empty cell when absent.
fn cell(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{v:.decimals$}"))
        .unwrap_or_default()
}

/// Export fuel-log rows to CSV.
///
/// Writes: date, vehicle, vehicle_type, litres, cost, mileage_km,
/// distance_km, cost_per_km, litres_per_100km. Efficiency cells are empty
/// for rows without a preceding fill-up.
pub fn export_csv<W: Write>(
    items: &[LogItem],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_row_limit(items)?;

    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "date",
            "vehicle",
            "vehicle_type",
            "litres",
            "cost",
            "mileage_km",
            "distance_km",
            "cost_per_km",
            "litres_per_100km",
        ])
        .map_err(csv_err)?;

    for item in items {
        let eff = item.efficiency;
        csv_writer
            .write_record([
                item.date.format(DATE_FORMAT).to_string(),
                item.vehicle_name.clone(),
                item.vehicle_type.clone(),
                format!("{:.2}", item.volume_litres),
                format!("{:.2}", item.cost),
                format!("{:.0}", item.mileage_km),
                cell(eff.map(|e| e.distance_km), 0),
                cell(eff.map(|e| e.cost_per_km), 4),
                cell(eff.map(|e| e.litres_per_100km), 2),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(items.len())
}

/// Export fuel-log rows to JSON (array of objects).
pub fn export_json<W: Write>(
    items: &[LogItem],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_row_limit(items)?;
    serde_json::to_writer_pretty(writer, items).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(items.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::efficiency::IntervalMetrics;
    use chrono::NaiveDate;

    fn make_item(id: i64, efficiency: Option<IntervalMetrics>) -> LogItem {
        LogItem {
            record_id: id,
            vehicle_id: 1,
            vehicle_name: "My Honda".to_string(),
            vehicle_type: "Car".to_string(),
            colour_hex: "#B4A7D6".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, id as u32).unwrap(),
            volume_litres: 30.0,
            cost: 61.5,
            mileage_km: 12000.0,
            efficiency,
        }
    }

    #[test]
    fn test_csv_export() {
        let items = vec![
            make_item(
                2,
                Some(IntervalMetrics {
                    distance_km: 400.0,
                    litres_per_100km: 7.5,
                    cost_per_km: 0.125,
                }),
            ),
            make_item(1, None),
        ];
        let mut buf = Vec::new();
        let count = export_csv(&items, &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("date,vehicle,vehicle_type"));
        assert_eq!(
            lines[1],
            "2024-05-02,My Honda,Car,30.00,61.50,12000,400,0.1250,7.50"
        );
        assert_eq!(lines[2], "2024-05-01,My Honda,Car,30.00,61.50,12000,,,");
    }

    #[test]
    fn test_row_limit_boundary() {
        let at_limit = vec![make_item(1, None); MAX_EXPORT_ROWS];
        assert!(check_row_limit(&at_limit).is_ok());

        let mut over = at_limit;
        over.push(make_item(2, None));
        match check_row_limit(&over) {
            Err(ExportError::TooManyRows { count, max }) => {
                assert_eq!(count, MAX_EXPORT_ROWS + 1);
                assert_eq!(max, MAX_EXPORT_ROWS);
            }
            other => panic!("expected TooManyRows, got {other:?}"),
        }

        let mut buf = Vec::new();
        let err = export_csv(&over, &mut buf, Path::new("big.csv")).unwrap_err();
        assert!(matches!(err, ExportError::TooManyRows { .. }));
        assert!(buf.is_empty(), "nothing may be written for a rejected export");
    }

    #[test]
    fn test_json_export() {
        let items = vec![make_item(1, None)];
        let mut buf = Vec::new();
        let count = export_json(&items, &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("\"vehicle_name\": \"My Honda\""));
        assert!(output.contains("\"date\": \"2024-05-01\""));
        assert!(output.contains("\"efficiency\": null"));
    }
}
