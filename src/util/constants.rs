// FuelWiseLog - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "FuelWiseLog";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "FuelWiseLog";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Storage
// =============================================================================

/// SQLite database file name (stored in the platform data directory).
pub const DB_FILE_NAME: &str = "fuelwise.db";

/// Schema version written to `PRAGMA user_version`.
///
/// Any other non-zero version found on open causes a destructive rebuild.
pub const SCHEMA_VERSION: i32 = 2;

/// Preferences file name (stored in the platform data directory).
pub const PREFS_FILE_NAME: &str = "prefs.json";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Vehicles
// =============================================================================

/// Suggested vehicle types, in dropdown order. The first is the default.
pub const VEHICLE_TYPES: &[&str] = &["Car", "Motorcycle", "Lorry", "Van", "Others"];

/// Tag colour palette offered when adding or editing a vehicle.
/// The first entry is the default.
pub const VEHICLE_COLOURS: &[&str] = &[
    "#B4A7D6", "#F5B8D4", "#A7C7E7", "#B8E6D5", "#F5D7A8", "#F5B8B8", "#A0BFFF", "#C3E59F",
];

/// Name shown for a record whose vehicle no longer exists.
pub const UNKNOWN_VEHICLE_NAME: &str = "Vehicle";

/// Type shown for a record whose vehicle no longer exists.
pub const UNKNOWN_VEHICLE_TYPE: &str = "Other";

/// Maximum vehicle name length in characters.
pub const MAX_VEHICLE_NAME_LENGTH: usize = 64;

/// Maximum plate number length in characters.
pub const MAX_PLATE_LENGTH: usize = 16;

// =============================================================================
// Records
// =============================================================================

/// Date format used for record dates in storage, input, and export.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of fill-ups listed in the dashboard history.
pub const RECENT_HISTORY_LEN: usize = 5;

// =============================================================================
// UI defaults
// =============================================================================

/// Default currency label prefixed to money amounts.
pub const DEFAULT_CURRENCY: &str = "RM";

/// Maximum currency label length.
pub const MAX_CURRENCY_LENGTH: usize = 8;

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of rows that can be exported in a single operation.
pub const MAX_EXPORT_ROWS: usize = 100_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
