// FuelWiseLog - app/state.rs
//
// Application state management. Holds the store handle, the cached vehicles
// and fill-ups, the selection, the current screen and the open forms.
// Owned by the eframe::App implementation.

use crate::app::prefs::{self, Prefs};
use crate::core::efficiency::{record_history, AverageEfficiency, HomeSummary, RecordDisplay};
use crate::core::export;
use crate::core::fuel_log::{self, LogItem};
use crate::core::model::{FuelRecord, ThemeMode, Vehicle};
use crate::core::validation::{self, RecordInput, VehicleInput};
use crate::platform::store::FuelStore;
use crate::util::constants;
use crate::util::error::{FuelWiseError, Result, StoreError, ValidationError};
use chrono::NaiveDate;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Screens reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Vehicles,
    AddRecord,
    FuelLog,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Vehicles => "Vehicles",
            Screen::AddRecord => "Add Record",
            Screen::FuelLog => "Fuel Log",
        }
    }
}

/// File format offered by File > Export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Deletion awaiting the user's confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingDelete {
    Vehicle { id: i64, name: String },
    Record { id: i64 },
}

impl PendingDelete {
    pub fn title(&self) -> &'static str {
        match self {
            PendingDelete::Vehicle { .. } => "Delete vehicle?",
            PendingDelete::Record { .. } => "Delete record?",
        }
    }

    pub fn message(&self) -> String {
        match self {
            PendingDelete::Vehicle { name, .. } => format!(
                "Delete \"{name}\"? All related fuel records will also be deleted."
            ),
            PendingDelete::Record { .. } => "This fuel record will be permanently deleted.".to_string(),
        }
    }
}

/// Add/edit vehicle dialog.
#[derive(Debug, Clone, Default)]
pub struct VehicleForm {
    pub open: bool,
    /// Vehicle being edited; `None` while adding.
    pub editing: Option<i64>,
    pub input: VehicleInput,
    pub error: Option<ValidationError>,
}

impl VehicleForm {
    /// Empty form preset with the first type and palette colour.
    pub fn blank() -> Self {
        Self {
            open: true,
            editing: None,
            input: VehicleInput {
                vehicle_type: constants::VEHICLE_TYPES[0].to_string(),
                colour_hex: constants::VEHICLE_COLOURS[0].to_string(),
                ..Default::default()
            },
            error: None,
        }
    }

    pub fn for_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            open: true,
            editing: Some(vehicle.id),
            input: VehicleInput {
                name: vehicle.name.clone(),
                vehicle_type: vehicle.vehicle_type.clone(),
                colour_hex: vehicle.colour_hex.clone(),
                plate: vehicle.plate_number.clone().unwrap_or_default(),
            },
            error: None,
        }
    }
}

/// Add-record screen.
#[derive(Debug, Clone, Default)]
pub struct RecordForm {
    pub input: RecordInput,
    /// Highest odometer reading stored for the chosen vehicle.
    pub last_mileage: Option<f64>,
    pub error: Option<ValidationError>,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Open database.
    pub store: FuelStore,

    /// All vehicles, ordered by name.
    pub vehicles: Vec<Vehicle>,

    /// All fill-ups, ordered by vehicle then mileage ascending.
    pub records: Vec<FuelRecord>,

    /// Vehicle shown on the home card; `None` only when there are no vehicles.
    pub selected_vehicle_id: Option<i64>,

    pub screen: Screen,

    /// Fuel-log vehicle filter; `None` shows every vehicle.
    pub log_filter: Option<i64>,

    pub vehicle_form: VehicleForm,
    pub record_form: RecordForm,
    pub pending_delete: Option<PendingDelete>,

    /// Theme in effect for this session.
    pub theme: ThemeMode,

    /// Theme last chosen from the View menu; the only theme written to
    /// preferences. `None` until the user picks one.
    pub saved_theme: Option<ThemeMode>,

    /// Currency label from config.toml.
    pub currency: String,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config problems and the like).
    pub warnings: Vec<String>,

    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    /// Where preferences are persisted; `None` disables persistence.
    pub prefs_path: Option<PathBuf>,
}

impl AppState {
    /// Create state from an open store and restored preferences.
    pub fn new(
        store: FuelStore,
        prefs: Prefs,
        prefs_path: Option<PathBuf>,
        currency: String,
        debug_mode: bool,
    ) -> Result<Self> {
        let mut state = Self {
            store,
            vehicles: Vec::new(),
            records: Vec::new(),
            selected_vehicle_id: prefs.selected_vehicle_id,
            screen: Screen::Home,
            log_filter: None,
            vehicle_form: VehicleForm::default(),
            record_form: RecordForm::default(),
            pending_delete: None,
            theme: prefs.theme.unwrap_or_default(),
            saved_theme: prefs.theme,
            currency,
            status_message: "Ready.".to_string(),
            warnings: Vec::new(),
            show_about: false,
            debug_mode,
            prefs_path,
        };
        state.reload()?;
        Ok(state)
    }

    /// Re-read vehicles and fill-ups and re-resolve the selection.
    pub fn reload(&mut self) -> std::result::Result<(), StoreError> {
        self.vehicles = self.store.list_vehicles()?;
        self.records = self.store.all_records()?;

        let resolved = fuel_log::resolve_selection(&self.vehicles, self.selected_vehicle_id);
        if resolved != self.selected_vehicle_id {
            tracing::debug!(
                from = ?self.selected_vehicle_id,
                to = ?resolved,
                "Selected vehicle re-resolved"
            );
            self.selected_vehicle_id = resolved;
            self.save_prefs();
        }

        if let Some(id) = self.log_filter {
            if self.vehicle(id).is_none() {
                self.log_filter = None;
            }
        }

        tracing::debug!(
            vehicles = self.vehicles.len(),
            records = self.records.len(),
            "State reloaded"
        );
        Ok(())
    }

    /// Log an error and show it in the status bar. Validation problems are
    /// shown beside the form fields instead.
    pub fn report_error(&mut self, err: FuelWiseError) {
        match err {
            FuelWiseError::Validation(ref v) => {
                tracing::debug!(issues = v.issues.len(), "Form rejected");
            }
            other => {
                tracing::error!(error = %other, "Operation failed");
                self.status_message = other.to_string();
            }
        }
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    pub fn vehicle(&self, id: i64) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selected_vehicle_id.and_then(|id| self.vehicle(id))
    }

    /// Whether `screen` can be opened from the navigation bar or home
    /// actions. Record screens need a selected vehicle.
    pub fn screen_enabled(&self, screen: Screen) -> bool {
        match screen {
            Screen::Home | Screen::Vehicles => true,
            Screen::AddRecord | Screen::FuelLog => self.selected_vehicle().is_some(),
        }
    }

    /// One vehicle's fill-ups, mileage ascending.
    pub fn records_for(&self, vehicle_id: i64) -> Vec<FuelRecord> {
        self.records
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id)
            .cloned()
            .collect()
    }

    // -------------------------------------------------------------------------
    // Home
    // -------------------------------------------------------------------------

    pub fn selected_record_count(&self) -> usize {
        self.selected_vehicle_id
            .map(|id| self.records.iter().filter(|r| r.vehicle_id == id).count())
            .unwrap_or(0)
    }

    pub fn home_summary(&self) -> Option<HomeSummary> {
        let id = self.selected_vehicle_id?;
        HomeSummary::from_records(&self.records_for(id))
    }

    /// Latest fill-ups of the selected vehicle, newest first.
    pub fn recent_history(&self) -> Vec<RecordDisplay> {
        let Some(id) = self.selected_vehicle_id else {
            return Vec::new();
        };
        let mut history = record_history(&self.records_for(id), true);
        history.truncate(constants::RECENT_HISTORY_LEN);
        history
    }

    pub fn select_vehicle(&mut self, id: i64) {
        let Some(name) = self.vehicle(id).map(|v| v.name.clone()) else {
            tracing::warn!(id, "Ignoring selection of unknown vehicle");
            return;
        };
        self.selected_vehicle_id = Some(id);
        self.status_message = format!("Selected {name}");
        self.save_prefs();
    }

    // -------------------------------------------------------------------------
    // Vehicles
    // -------------------------------------------------------------------------

    pub fn open_new_vehicle(&mut self) {
        self.vehicle_form = VehicleForm::blank();
    }

    pub fn open_edit_vehicle(&mut self, id: i64) {
        if let Some(v) = self.vehicle(id) {
            self.vehicle_form = VehicleForm::for_vehicle(v);
        }
    }

    pub fn close_vehicle_form(&mut self) {
        self.vehicle_form = VehicleForm::default();
    }

    /// Validate and save the vehicle form. Rejected fields stay in the form.
    pub fn submit_vehicle_form(&mut self) -> Result<()> {
        let draft = match validation::validate_vehicle(&self.vehicle_form.input) {
            Ok(d) => d,
            Err(e) => {
                self.vehicle_form.error = Some(e.clone());
                return Err(e.into());
            }
        };

        match self.vehicle_form.editing {
            Some(id) => {
                self.store.update_vehicle(id, &draft)?;
                tracing::info!(id, "Vehicle updated");
                self.status_message = format!("Vehicle \"{}\" updated", draft.name);
            }
            None => {
                let id = self.store.insert_vehicle(&draft)?;
                tracing::info!(id, "Vehicle added");
                self.status_message = format!("Vehicle \"{}\" added", draft.name);
            }
        }

        self.close_vehicle_form();
        self.reload()?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Deletion
    // -------------------------------------------------------------------------

    pub fn request_delete_vehicle(&mut self, id: i64) {
        if let Some(v) = self.vehicle(id) {
            self.pending_delete = Some(PendingDelete::Vehicle {
                id,
                name: v.name.clone(),
            });
        }
    }

    pub fn request_delete_record(&mut self, id: i64) {
        self.pending_delete = Some(PendingDelete::Record { id });
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Carry out the pending deletion, if any.
    pub fn confirm_delete(&mut self) -> Result<()> {
        let Some(pending) = self.pending_delete.take() else {
            return Ok(());
        };

        match pending {
            PendingDelete::Vehicle { id, name } => {
                if self.store.delete_vehicle(id)? {
                    tracing::info!(id, "Vehicle deleted");
                    self.status_message = format!("Vehicle \"{name}\" deleted");
                }
            }
            PendingDelete::Record { id } => {
                if self.store.delete_record(id)? {
                    tracing::info!(id, "Fuel record deleted");
                    self.status_message = "Record deleted".to_string();
                }
            }
        }

        self.reload()?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Add record
    // -------------------------------------------------------------------------

    /// Switch to the add-record screen. Returns false (with a status message)
    /// when there is no vehicle to log against.
    pub fn open_add_record(&mut self, today: NaiveDate) -> Result<bool> {
        let Some(vehicle_id) = self
            .selected_vehicle_id
            .or_else(|| self.vehicles.first().map(|v| v.id))
        else {
            self.status_message = "No vehicles. Add a vehicle first.".to_string();
            return Ok(false);
        };

        self.record_form = RecordForm {
            input: RecordInput {
                vehicle_id: Some(vehicle_id),
                date: today.format(constants::DATE_FORMAT).to_string(),
                ..Default::default()
            },
            last_mileage: self.store.last_mileage(vehicle_id)?,
            error: None,
        };
        self.screen = Screen::AddRecord;
        Ok(true)
    }

    /// Change the vehicle chosen in the add-record form.
    pub fn set_record_vehicle(&mut self, vehicle_id: i64) -> Result<()> {
        self.record_form.input.vehicle_id = Some(vehicle_id);
        self.record_form.last_mileage = self.store.last_mileage(vehicle_id)?;
        Ok(())
    }

    /// Validate and store the fill-up, then return home.
    pub fn submit_record_form(&mut self, today: NaiveDate) -> Result<()> {
        let last_mileage = match self.record_form.input.vehicle_id {
            Some(id) => self.store.last_mileage(id)?,
            None => None,
        };
        self.record_form.last_mileage = last_mileage;

        let draft = match validation::validate_record(&self.record_form.input, last_mileage, today)
        {
            Ok(d) => d,
            Err(e) => {
                self.record_form.error = Some(e.clone());
                return Err(e.into());
            }
        };

        let id = self.store.insert_record(&draft)?;
        tracing::info!(id, vehicle_id = draft.vehicle_id, "Fuel record added");

        self.selected_vehicle_id = Some(draft.vehicle_id);
        self.save_prefs();
        self.record_form = RecordForm::default();
        self.reload()?;
        self.screen = Screen::Home;
        self.status_message = "Record added".to_string();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Fuel log
    // -------------------------------------------------------------------------

    pub fn log_items(&self) -> Vec<LogItem> {
        fuel_log::build_log(&self.records, &self.vehicles, self.log_filter)
    }

    /// Average card of the fuel log: the vehicle it describes and its
    /// per-interval means.
    pub fn average_card(&self) -> Option<(&Vehicle, AverageEfficiency)> {
        let id = fuel_log::average_target(self.log_filter, self.selected_vehicle_id)?;
        let vehicle = self.vehicle(id)?;
        AverageEfficiency::from_records(&self.records_for(id)).map(|avg| (vehicle, avg))
    }

    /// Write the currently filtered fuel log to `path`.
    pub fn export_log(&mut self, path: &Path, format: ExportFormat) -> Result<usize> {
        let items = self.log_items();
        export::check_row_limit(&items)?;
        let file = std::fs::File::create(path).map_err(|e| FuelWiseError::Io {
            path: path.to_path_buf(),
            operation: "create export file",
            source: e,
        })?;
        let writer = BufWriter::new(file);

        let count = match format {
            ExportFormat::Csv => export::export_csv(&items, writer, path)?,
            ExportFormat::Json => export::export_json(&items, writer, path)?,
        };

        tracing::info!(path = %path.display(), count, "Fuel log exported");
        self.status_message = format!(
            "Exported {} to {}",
            fuel_log::count_label(count),
            path.display()
        );
        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Preferences
    // -------------------------------------------------------------------------

    /// Theme chosen by the user; applied and persisted.
    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
        if self.saved_theme != Some(theme) {
            self.saved_theme = Some(theme);
            tracing::info!(theme = %theme, "Theme changed");
            self.save_prefs();
        }
    }

    /// Theme from the command line or config.toml; applied for this session
    /// only and never persisted.
    pub fn override_theme(&mut self, theme: ThemeMode) {
        tracing::debug!(theme = %theme, "Session theme override");
        self.theme = theme;
    }

    pub fn prefs(&self) -> Prefs {
        Prefs {
            theme: self.saved_theme,
            selected_vehicle_id: self.selected_vehicle_id,
            ..Default::default()
        }
    }

    /// Persist preferences; failures are logged and otherwise ignored.
    pub fn save_prefs(&self) {
        if let Some(ref path) = self.prefs_path {
            if let Err(e) = prefs::save(&self.prefs(), path) {
                tracing::warn!(error = %e, "Could not save preferences");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{RecordDraft, VehicleDraft};
    use crate::util::error::Field;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn empty_state() -> AppState {
        let store = FuelStore::open_in_memory().unwrap();
        AppState::new(store, Prefs::default(), None, "RM".to_string(), false).unwrap()
    }

    fn add_vehicle(state: &AppState, name: &str) -> i64 {
        state
            .store
            .insert_vehicle(&VehicleDraft {
                name: name.to_string(),
                vehicle_type: "Car".to_string(),
                colour_hex: "#B4A7D6".to_string(),
                plate_number: None,
            })
            .unwrap()
    }

    fn add_record(state: &AppState, vehicle_id: i64, day: u32, mileage: f64, cost: f64) -> i64 {
        state
            .store
            .insert_record(&RecordDraft {
                vehicle_id,
                date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
                volume_litres: 20.0,
                cost,
                mileage_km: mileage,
            })
            .unwrap()
    }

    #[test]
    fn test_reload_selects_first_vehicle() {
        let mut state = empty_state();
        assert!(state.selected_vehicle().is_none());

        add_vehicle(&state, "Zeta");
        let alpha = add_vehicle(&state, "Alpha");
        state.reload().unwrap();
        assert_eq!(state.selected_vehicle_id, Some(alpha));
    }

    #[test]
    fn test_add_record_without_vehicles_is_refused() {
        let mut state = empty_state();
        assert!(!state.open_add_record(today()).unwrap());
        assert_eq!(state.status_message, "No vehicles. Add a vehicle first.");
        assert_eq!(state.screen, Screen::Home);
    }

    #[test]
    fn test_record_screens_need_a_selected_vehicle() {
        let mut state = empty_state();
        assert!(state.screen_enabled(Screen::Home));
        assert!(state.screen_enabled(Screen::Vehicles));
        assert!(!state.screen_enabled(Screen::AddRecord));
        assert!(!state.screen_enabled(Screen::FuelLog));

        add_vehicle(&state, "Alpha");
        state.reload().unwrap();
        assert!(state.screen_enabled(Screen::AddRecord));
        assert!(state.screen_enabled(Screen::FuelLog));
    }

    #[test]
    fn test_add_record_flow() {
        let mut state = empty_state();
        let id = add_vehicle(&state, "My Honda");
        add_record(&state, id, 1, 12000.0, 50.0);
        state.reload().unwrap();

        assert!(state.open_add_record(today()).unwrap());
        assert_eq!(state.screen, Screen::AddRecord);
        assert_eq!(state.record_form.input.vehicle_id, Some(id));
        assert_eq!(state.record_form.input.date, "2024-06-15");
        assert_eq!(state.record_form.last_mileage, Some(12000.0));

        state.record_form.input.litres = "30".to_string();
        state.record_form.input.cost = "60".to_string();
        state.record_form.input.mileage = "11000".to_string();
        let err = state.submit_record_form(today()).unwrap_err();
        assert!(matches!(err, FuelWiseError::Validation(_)));
        let form_error = state.record_form.error.as_ref().unwrap();
        assert_eq!(
            form_error.message_for(Field::Mileage),
            Some("Mileage must be greater than 12000")
        );

        state.record_form.input.mileage = "12400".to_string();
        state.submit_record_form(today()).unwrap();
        assert_eq!(state.screen, Screen::Home);
        assert_eq!(state.status_message, "Record added");
        assert_eq!(state.selected_record_count(), 2);

        let summary = state.home_summary().unwrap();
        assert_eq!(summary.total_distance_km, 400.0);
        assert_eq!(summary.total_cost, 110.0);
    }

    #[test]
    fn test_recording_selects_that_vehicle() {
        let mut state = empty_state();
        let a = add_vehicle(&state, "Alpha");
        let b = add_vehicle(&state, "Beta");
        state.reload().unwrap();
        assert_eq!(state.selected_vehicle_id, Some(a));

        state.open_add_record(today()).unwrap();
        state.set_record_vehicle(b).unwrap();
        state.record_form.input.litres = "10".to_string();
        state.record_form.input.cost = "20".to_string();
        state.record_form.input.mileage = "500".to_string();
        state.submit_record_form(today()).unwrap();
        assert_eq!(state.selected_vehicle_id, Some(b));
    }

    #[test]
    fn test_vehicle_form_add_and_edit() {
        let mut state = empty_state();
        state.open_new_vehicle();
        assert!(state.vehicle_form.open);
        assert_eq!(state.vehicle_form.input.vehicle_type, "Car");

        state.vehicle_form.input.name = "   ".to_string();
        assert!(state.submit_vehicle_form().is_err());
        assert_eq!(
            state.vehicle_form.error.as_ref().unwrap().message_for(Field::Name),
            Some("Name required")
        );

        state.vehicle_form.input.name = "My Honda".to_string();
        state.vehicle_form.input.plate = "wxy 1234".to_string();
        state.submit_vehicle_form().unwrap();
        assert!(!state.vehicle_form.open);
        assert_eq!(state.vehicles.len(), 1);
        assert_eq!(state.vehicles[0].plate_number.as_deref(), Some("WXY 1234"));

        let id = state.vehicles[0].id;
        state.open_edit_vehicle(id);
        assert_eq!(state.vehicle_form.editing, Some(id));
        assert_eq!(state.vehicle_form.input.name, "My Honda");
        state.vehicle_form.input.vehicle_type = "Van".to_string();
        state.submit_vehicle_form().unwrap();
        assert_eq!(state.vehicles[0].vehicle_type, "Van");
    }

    #[test]
    fn test_delete_vehicle_cascades_and_reselects() {
        let mut state = empty_state();
        let a = add_vehicle(&state, "Alpha");
        let b = add_vehicle(&state, "Beta");
        add_record(&state, a, 1, 100.0, 10.0);
        add_record(&state, b, 2, 200.0, 10.0);
        state.reload().unwrap();
        state.log_filter = Some(a);

        state.request_delete_vehicle(a);
        let message = state.pending_delete.as_ref().unwrap().message();
        assert!(message.contains("All related fuel records will also be deleted."));

        state.confirm_delete().unwrap();
        assert!(state.pending_delete.is_none());
        assert_eq!(state.vehicles.len(), 1);
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.selected_vehicle_id, Some(b));
        assert_eq!(state.log_filter, None);
    }

    #[test]
    fn test_cancel_delete_keeps_record() {
        let mut state = empty_state();
        let a = add_vehicle(&state, "Alpha");
        let r = add_record(&state, a, 1, 100.0, 10.0);
        state.reload().unwrap();

        state.request_delete_record(r);
        state.cancel_delete();
        state.confirm_delete().unwrap();
        assert_eq!(state.records.len(), 1);
    }

    #[test]
    fn test_average_card_follows_filter_then_selection() {
        let mut state = empty_state();
        let a = add_vehicle(&state, "Alpha");
        let b = add_vehicle(&state, "Beta");
        add_record(&state, a, 1, 1000.0, 10.0);
        add_record(&state, a, 2, 1100.0, 10.0);
        add_record(&state, b, 3, 5000.0, 10.0);
        add_record(&state, b, 4, 5200.0, 10.0);
        state.reload().unwrap();

        let (vehicle, avg) = state.average_card().unwrap();
        assert_eq!(vehicle.id, a);
        assert!((avg.avg_cost_per_km - 0.1).abs() < 1e-9);

        state.log_filter = Some(b);
        let (vehicle, avg) = state.average_card().unwrap();
        assert_eq!(vehicle.id, b);
        assert!((avg.avg_cost_per_km - 0.05).abs() < 1e-9);
        assert_eq!(state.log_items().len(), 2);
    }

    #[test]
    fn test_recent_history_is_newest_first_and_capped() {
        let mut state = empty_state();
        let a = add_vehicle(&state, "Alpha");
        for day in 1..=7u32 {
            add_record(&state, a, day, 1000.0 * day as f64, 10.0);
        }
        state.reload().unwrap();

        let history = state.recent_history();
        assert_eq!(history.len(), constants::RECENT_HISTORY_LEN);
        assert_eq!(history[0].record.mileage_km, 7000.0);
        assert!(history.iter().all(|h| h.metrics.is_some()));
    }

    #[test]
    fn test_theme_and_selection_persist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let store = FuelStore::open_in_memory().unwrap();
        let mut state =
            AppState::new(store, Prefs::default(), Some(path.clone()), "RM".into(), false)
                .unwrap();
        let a = add_vehicle(&state, "Alpha");
        let b = add_vehicle(&state, "Beta");
        state.reload().unwrap();

        state.set_theme(ThemeMode::Dark);
        state.select_vehicle(b);

        let saved = prefs::load(&path).unwrap();
        assert_eq!(saved.theme, Some(ThemeMode::Dark));
        assert_eq!(saved.selected_vehicle_id, Some(b));
        assert_ne!(saved.selected_vehicle_id, Some(a));
    }

    #[test]
    fn test_export_log_writes_file() {
        let dir = TempDir::new().unwrap();
        let mut state = empty_state();
        let a = add_vehicle(&state, "Alpha");
        add_record(&state, a, 1, 1000.0, 10.0);
        add_record(&state, a, 2, 1100.0, 10.0);
        state.reload().unwrap();

        let path = dir.path().join("log.csv");
        let count = state.export_log(&path, ExportFormat::Csv).unwrap();
        assert_eq!(count, 2);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(state.status_message.starts_with("Exported 2 records"));

        let bad = dir.path().join("missing").join("log.json");
        let err = state.export_log(&bad, ExportFormat::Json).unwrap_err();
        assert!(matches!(err, FuelWiseError::Io { .. }));
    }

    #[test]
    fn test_session_theme_override_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let stored = Prefs {
            theme: Some(ThemeMode::Light),
            ..Default::default()
        };
        prefs::save(&stored, &path).unwrap();

        let store = FuelStore::open_in_memory().unwrap();
        let loaded = prefs::load(&path).unwrap();
        let mut state =
            AppState::new(store, loaded, Some(path.clone()), "RM".into(), false).unwrap();
        state.override_theme(ThemeMode::Dark);
        assert_eq!(state.theme, ThemeMode::Dark);

        let id = add_vehicle(&state, "Alpha");
        state.reload().unwrap();
        state.select_vehicle(id);
        state.save_prefs();

        let saved = prefs::load(&path).unwrap();
        assert_eq!(saved.theme, Some(ThemeMode::Light));
        assert_eq!(saved.selected_vehicle_id, Some(id));
    }

    #[test]
    fn test_config_theme_fallback_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let store = FuelStore::open_in_memory().unwrap();
        let mut state =
            AppState::new(store, Prefs::default(), Some(path.clone()), "RM".into(), false)
                .unwrap();
        state.override_theme(ThemeMode::Dark);
        state.save_prefs();
        assert_eq!(prefs::load(&path).unwrap().theme, None);

        state.set_theme(ThemeMode::Dark);
        assert_eq!(prefs::load(&path).unwrap().theme, Some(ThemeMode::Dark));
    }

    #[test]
    fn test_rejected_export_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let mut state = empty_state();
        let a = add_vehicle(&state, "Alpha");
        state.reload().unwrap();

        let template = FuelRecord {
            id: 0,
            vehicle_id: a,
            date: today(),
            volume_litres: 20.0,
            cost: 40.0,
            mileage_km: 0.0,
        };
        state.records = (0..=constants::MAX_EXPORT_ROWS)
            .map(|i| FuelRecord {
                id: i as i64 + 1,
                mileage_km: i as f64 * 10.0,
                ..template.clone()
            })
            .collect();

        let path = dir.path().join("huge.csv");
        let err = state.export_log(&path, ExportFormat::Csv).unwrap_err();
        assert!(matches!(
            err,
            FuelWiseError::Export(crate::util::error::ExportError::TooManyRows { .. })
        ));
        assert!(!path.exists(), "rejected export must not leave a file behind");
    }
}
