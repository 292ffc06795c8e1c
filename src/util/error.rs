// FuelWiseLog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant keeps its cause so the
// full chain reaches the diagnostic log.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all FuelWiseLog operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum FuelWiseError {
    /// Database access failed.
    Store(StoreError),

    /// User input was rejected.
    Validation(ValidationError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for FuelWiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Storage error: {e}"),
            Self::Validation(e) => write!(f, "Invalid input: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for FuelWiseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Validation(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors raised by the SQLite store.
#[derive(Debug)]
pub enum StoreError {
    /// The database file could not be opened.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// The directory holding the database file could not be created.
    CreateDir { path: PathBuf, source: io::Error },

    /// Creating or rebuilding the schema failed.
    Schema { source: rusqlite::Error },

    /// A statement failed while performing `operation`.
    Query {
        operation: &'static str,
        source: rusqlite::Error,
    },

    /// The row addressed by `id` does not exist.
    NotFound { entity: &'static str, id: i64 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Cannot open database '{}': {source}", path.display())
            }
            Self::CreateDir { path, source } => write!(
                f,
                "Cannot create database directory '{}': {source}",
                path.display()
            ),
            Self::Schema { source } => write!(f, "Cannot prepare database schema: {source}"),
            Self::Query { operation, source } => write!(f, "Failed to {operation}: {source}"),
            Self::NotFound { entity, id } => write!(f, "No {entity} with id {id}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::CreateDir { source, .. } => Some(source),
            Self::Schema { source } => Some(source),
            Self::Query { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<StoreError> for FuelWiseError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Form field a validation issue is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Vehicle,
    Date,
    Litres,
    Cost,
    Mileage,
    Name,
    Plate,
}

impl Field {
    /// Human-readable field label.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Vehicle => "Vehicle",
            Field::Date => "Date",
            Field::Litres => "Volume (L)",
            Field::Cost => "Cost",
            Field::Mileage => "Mileage (km)",
            Field::Name => "Name",
            Field::Plate => "Plate number",
        }
    }
}

/// One rejected form field with the message shown beside it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: Field,
    pub message: String,
}

/// All problems found in a single form submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Message for `field`, if that field was rejected.
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.issues
            .iter()
            .find(|i| i.field == field)
            .map(|i| i.message.as_str())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.field.label(), i.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for FuelWiseError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum row count.
    TooManyRows { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyRows { count, max } => write!(
                f,
                "Export of {count} records exceeds maximum of {max}. \
                 Filter the log by vehicle to reduce the result set."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for FuelWiseError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for FuelWiseLog results.
pub type Result<T> = std::result::Result<T, FuelWiseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_validation_error_lists_every_issue() {
        let err = ValidationError {
            issues: vec![
                FieldIssue {
                    field: Field::Litres,
                    message: "Invalid liters".to_string(),
                },
                FieldIssue {
                    field: Field::Cost,
                    message: "Invalid cost".to_string(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Volume (L): Invalid liters; Cost: Invalid cost"
        );
        assert_eq!(err.message_for(Field::Cost), Some("Invalid cost"));
        assert_eq!(err.message_for(Field::Date), None);
    }

    #[test]
    fn test_store_error_chain_is_preserved() {
        let err: FuelWiseError = StoreError::Query {
            operation: "insert vehicle",
            source: rusqlite::Error::QueryReturnedNoRows,
        }
        .into();
        assert!(err.to_string().starts_with("Storage error: Failed to insert vehicle"));
        let inner = err.source().expect("store error has a source");
        assert!(inner.source().is_some(), "rusqlite cause must be kept");
    }

    #[test]
    fn test_not_found_has_no_cause() {
        let err = StoreError::NotFound {
            entity: "vehicle",
            id: 7,
        };
        assert_eq!(err.to_string(), "No vehicle with id 7");
        assert!(err.source().is_none());
    }
}
