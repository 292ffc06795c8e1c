// FuelWiseLog - platform/store.rs
//
// SQLite persistence for vehicles and fuel records.
//
// One connection, owned by the application state. Foreign keys are
// enabled per connection so deleting a vehicle cascades to its records.
// The schema version lives in `PRAGMA user_version`; a mismatching
// non-zero version is rebuilt from scratch (data is discarded).

use crate::core::model::{FuelRecord, RecordDraft, Vehicle, VehicleDraft};
use crate::util::constants::SCHEMA_VERSION;
use crate::util::error::StoreError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const CREATE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        name         TEXT NOT NULL,
        vehicle_type TEXT NOT NULL,
        colour_hex   TEXT NOT NULL,
        plate_number TEXT
    );
    CREATE TABLE IF NOT EXISTS fuel_records (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        vehicle_id    INTEGER NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
        date_iso      TEXT NOT NULL,
        volume_litres REAL NOT NULL,
        cost          REAL NOT NULL,
        mileage_km    REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_fuel_records_vehicle
        ON fuel_records(vehicle_id);
    CREATE INDEX IF NOT EXISTS idx_fuel_records_vehicle_mileage
        ON fuel_records(vehicle_id, mileage_km);
"#;

const DROP_SCHEMA: &str = r#"
    DROP TABLE IF EXISTS fuel_records;
    DROP TABLE IF EXISTS vehicles;
"#;

const VEHICLE_COLUMNS: &str = "id, name, vehicle_type, colour_hex, plate_number";
const RECORD_COLUMNS: &str = "id, vehicle_id, date_iso, volume_litres, cost, mileage_km";

fn vehicle_from_row(row: &Row<'_>) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        id: row.get(0)?,
        name: row.get(1)?,
        vehicle_type: row.get(2)?,
        colour_hex: row.get(3)?,
        plate_number: row.get(4)?,
    })
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<FuelRecord> {
    Ok(FuelRecord {
        id: row.get(0)?,
        vehicle_id: row.get(1)?,
        date: row.get(2)?,
        volume_litres: row.get(3)?,
        cost: row.get(4)?,
        mileage_km: row.get(5)?,
    })
}

/// Wrap a rusqlite error with the operation that failed.
fn query_err(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> StoreError {
    move |source| StoreError::Query { operation, source }
}

/// Local vehicle and fill-up storage.
pub struct FuelStore {
    conn: Connection,
}

impl std::fmt::Debug for FuelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuelStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl FuelStore {
    /// Open (creating if needed) the database at `path`.
    ///
    /// Missing parent directories are created.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let conn = Connection::open(path).map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), "Database opened");
        Self::with_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Open {
            path: ":memory:".into(),
            source: e,
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|source| StoreError::Schema { source })?;
        let store = Self { conn };
        store.prepare_schema()?;
        Ok(store)
    }

    /// Create the schema on a fresh file, rebuild it on a version mismatch.
    fn prepare_schema(&self) -> Result<(), StoreError> {
        let schema = |source| StoreError::Schema { source };
        let found: i32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .map_err(schema)?;

        if found == SCHEMA_VERSION {
            tracing::debug!(version = found, "Database schema up to date");
            return Ok(());
        }

        if found != 0 {
            tracing::warn!(
                found,
                expected = SCHEMA_VERSION,
                "Database schema version mismatch; rebuilding (existing data discarded)"
            );
            self.conn.execute_batch(DROP_SCHEMA).map_err(schema)?;
        }

        self.conn.execute_batch(CREATE_SCHEMA).map_err(schema)?;
        self.conn
            .pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(schema)?;
        tracing::info!(version = SCHEMA_VERSION, "Database schema created");
        Ok(())
    }

    /// Schema version currently recorded in the file.
    pub fn schema_version(&self) -> Result<i32, StoreError> {
        self.conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .map_err(query_err("read schema version"))
    }

    // =========================================================================
    // Vehicles
    // =========================================================================

    /// All vehicles, alphabetical (case-insensitive).
    pub fn list_vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        let sql = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY name COLLATE NOCASE, id");
        let mut stmt = self.conn.prepare(&sql).map_err(query_err("list vehicles"))?;
        let rows = stmt
            .query_map([], vehicle_from_row)
            .map_err(query_err("list vehicles"))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(query_err("list vehicles"))
    }

    /// One vehicle by id.
    pub fn vehicle(&self, id: i64) -> Result<Option<Vehicle>, StoreError> {
        let sql = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = ?1");
        self.conn
            .query_row(&sql, [id], vehicle_from_row)
            .optional()
            .map_err(query_err("load vehicle"))
    }

    /// Insert a vehicle and return its new id.
    pub fn insert_vehicle(&self, draft: &VehicleDraft) -> Result<i64, StoreError> {
        self.conn
            .execute(
                "INSERT INTO vehicles (name, vehicle_type, colour_hex, plate_number)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    draft.name,
                    draft.vehicle_type,
                    draft.colour_hex,
                    draft.plate_number
                ],
            )
            .map_err(query_err("insert vehicle"))?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "Vehicle inserted");
        Ok(id)
    }

    /// Overwrite an existing vehicle's fields.
    pub fn update_vehicle(&self, id: i64, draft: &VehicleDraft) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE vehicles
                 SET name = ?1, vehicle_type = ?2, colour_hex = ?3, plate_number = ?4
                 WHERE id = ?5",
                params![
                    draft.name,
                    draft.vehicle_type,
                    draft.colour_hex,
                    draft.plate_number,
                    id
                ],
            )
            .map_err(query_err("update vehicle"))?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "vehicle",
                id,
            });
        }
        tracing::debug!(id, "Vehicle updated");
        Ok(())
    }

    /// Delete a vehicle and, by cascade, all of its records.
    /// Returns false when no such vehicle existed.
    pub fn delete_vehicle(&self, id: i64) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM vehicles WHERE id = ?1", [id])
            .map_err(query_err("delete vehicle"))?;
        tracing::debug!(id, deleted = changed > 0, "Vehicle delete");
        Ok(changed > 0)
    }

    // =========================================================================
    // Fuel records
    // =========================================================================

    /// Insert a fill-up and return its new id.
    /// Fails when the referenced vehicle does not exist.
    pub fn insert_record(&self, draft: &RecordDraft) -> Result<i64, StoreError> {
        self.conn
            .execute(
                "INSERT INTO fuel_records (vehicle_id, date_iso, volume_litres, cost, mileage_km)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    draft.vehicle_id,
                    draft.date,
                    draft.volume_litres,
                    draft.cost,
                    draft.mileage_km
                ],
            )
            .map_err(query_err("insert fuel record"))?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, vehicle_id = draft.vehicle_id, "Fuel record inserted");
        Ok(id)
    }

    /// Delete one fill-up. Returns false when no such record existed.
    pub fn delete_record(&self, id: i64) -> Result<bool, StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM fuel_records WHERE id = ?1", [id])
            .map_err(query_err("delete fuel record"))?;
        Ok(changed > 0)
    }

    /// A vehicle's fill-ups ordered by mileage ascending.
    pub fn records_for_vehicle(&self, vehicle_id: i64) -> Result<Vec<FuelRecord>, StoreError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM fuel_records
             WHERE vehicle_id = ?1 ORDER BY mileage_km ASC, id ASC"
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(query_err("list vehicle records"))?;
        let rows = stmt
            .query_map([vehicle_id], record_from_row)
            .map_err(query_err("list vehicle records"))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(query_err("list vehicle records"))
    }

    /// Highest odometer reading stored for a vehicle.
    pub fn last_mileage(&self, vehicle_id: i64) -> Result<Option<f64>, StoreError> {
        self.conn
            .query_row(
                "SELECT MAX(mileage_km) FROM fuel_records WHERE vehicle_id = ?1",
                [vehicle_id],
                |row| row.get::<_, Option<f64>>(0),
            )
            .map_err(query_err("read last mileage"))
    }

    /// Every fill-up ordered by vehicle, then mileage ascending.
    pub fn all_records(&self) -> Result<Vec<FuelRecord>, StoreError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM fuel_records
             ORDER BY vehicle_id ASC, mileage_km ASC, id ASC"
        );
        let mut stmt = self.conn.prepare(&sql).map_err(query_err("list records"))?;
        let rows = stmt
            .query_map([], record_from_row)
            .map_err(query_err("list records"))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(query_err("list records"))
    }

    /// Total number of fill-ups across all vehicles.
    pub fn record_count(&self) -> Result<usize, StoreError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM fuel_records", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|n| n.max(0) as usize)
            .map_err(query_err("count records"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft_vehicle(name: &str) -> VehicleDraft {
        VehicleDraft {
            name: name.to_string(),
            vehicle_type: "Car".to_string(),
            colour_hex: "#B4A7D6".to_string(),
            plate_number: Some("ABC 123".to_string()),
        }
    }

    fn draft_record(vehicle_id: i64, day: u32, mileage: f64) -> RecordDraft {
        RecordDraft {
            vehicle_id,
            date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            volume_litres: 25.0,
            cost: 51.25,
            mileage_km: mileage,
        }
    }

    #[test]
    fn test_fresh_store_has_current_schema_version() {
        let store = FuelStore::open_in_memory().unwrap();
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
        assert!(store.list_vehicles().unwrap().is_empty());
        assert_eq!(store.record_count().unwrap(), 0);
    }

    #[test]
    fn test_vehicles_sorted_case_insensitively() {
        let store = FuelStore::open_in_memory().unwrap();
        store.insert_vehicle(&draft_vehicle("zeta")).unwrap();
        store.insert_vehicle(&draft_vehicle("Alpha")).unwrap();
        store.insert_vehicle(&draft_vehicle("beta")).unwrap();
        let names: Vec<String> = store
            .list_vehicles()
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_update_vehicle() {
        let store = FuelStore::open_in_memory().unwrap();
        let id = store.insert_vehicle(&draft_vehicle("Old")).unwrap();
        let mut d = draft_vehicle("New");
        d.plate_number = None;
        store.update_vehicle(id, &d).unwrap();

        let v = store.vehicle(id).unwrap().unwrap();
        assert_eq!(v.name, "New");
        assert!(v.plate_number.is_none());

        let missing = store.update_vehicle(id + 100, &d).unwrap_err();
        assert!(matches!(missing, StoreError::NotFound { entity: "vehicle", .. }));
    }

    #[test]
    fn test_records_round_trip_in_mileage_order() {
        let store = FuelStore::open_in_memory().unwrap();
        let v = store.insert_vehicle(&draft_vehicle("Car")).unwrap();
        store.insert_record(&draft_record(v, 10, 2000.0)).unwrap();
        store.insert_record(&draft_record(v, 1, 1500.0)).unwrap();

        let records = store.records_for_vehicle(v).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].mileage_km, 1500.0);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(records[1].cost, 51.25);
        assert_eq!(store.last_mileage(v).unwrap(), Some(2000.0));
    }

    #[test]
    fn test_last_mileage_none_without_records() {
        let store = FuelStore::open_in_memory().unwrap();
        let v = store.insert_vehicle(&draft_vehicle("Car")).unwrap();
        assert_eq!(store.last_mileage(v).unwrap(), None);
    }

    #[test]
    fn test_all_records_grouped_by_vehicle() {
        let store = FuelStore::open_in_memory().unwrap();
        let a = store.insert_vehicle(&draft_vehicle("A")).unwrap();
        let b = store.insert_vehicle(&draft_vehicle("B")).unwrap();
        store.insert_record(&draft_record(b, 1, 300.0)).unwrap();
        store.insert_record(&draft_record(a, 2, 900.0)).unwrap();
        store.insert_record(&draft_record(a, 3, 100.0)).unwrap();

        let all: Vec<(i64, f64)> = store
            .all_records()
            .unwrap()
            .iter()
            .map(|r| (r.vehicle_id, r.mileage_km))
            .collect();
        assert_eq!(all, vec![(a, 100.0), (a, 900.0), (b, 300.0)]);
    }

    #[test]
    fn test_delete_vehicle_cascades_to_records() {
        let store = FuelStore::open_in_memory().unwrap();
        let a = store.insert_vehicle(&draft_vehicle("A")).unwrap();
        let b = store.insert_vehicle(&draft_vehicle("B")).unwrap();
        store.insert_record(&draft_record(a, 1, 100.0)).unwrap();
        store.insert_record(&draft_record(b, 1, 100.0)).unwrap();

        assert!(store.delete_vehicle(a).unwrap());
        assert!(!store.delete_vehicle(a).unwrap());
        assert!(store.records_for_vehicle(a).unwrap().is_empty());
        assert_eq!(store.record_count().unwrap(), 1);
    }

    #[test]
    fn test_insert_record_for_unknown_vehicle_fails() {
        let store = FuelStore::open_in_memory().unwrap();
        let err = store.insert_record(&draft_record(42, 1, 100.0)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Query {
                operation: "insert fuel record",
                ..
            }
        ));
    }

    #[test]
    fn test_delete_record() {
        let store = FuelStore::open_in_memory().unwrap();
        let v = store.insert_vehicle(&draft_vehicle("A")).unwrap();
        let r = store.insert_record(&draft_record(v, 1, 100.0)).unwrap();
        assert!(store.delete_record(r).unwrap());
        assert!(!store.delete_record(r).unwrap());
        assert_eq!(store.record_count().unwrap(), 0);
    }
}
