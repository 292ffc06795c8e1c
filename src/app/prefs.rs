// FuelWiseLog - app/prefs.rs
//
// Preference persistence: the chosen theme and the selected vehicle survive
// application restarts.
//
// - Saved atomically (write temp, rename final) so a crash during save never
//   corrupts the previous good file.
// - Load errors are discarded; a missing or incompatible file starts fresh.
// - The data directory is created on first save.

use crate::core::model::ThemeMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version stamp for forward-compatibility checks.
///
/// Version mismatches silently discard the stored preferences.
pub const PREFS_VERSION: u32 = 1;

/// Persistent preference snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prefs {
    /// Schema version; must equal `PREFS_VERSION` to be accepted.
    pub version: u32,

    /// Theme chosen from the View menu. `None` until the user picks one,
    /// so the config default and `--theme` never end up here.
    #[serde(default)]
    pub theme: Option<ThemeMode>,

    /// Vehicle highlighted on the home screen. Validated against the
    /// vehicle list on restore.
    #[serde(default)]
    pub selected_vehicle_id: Option<i64>,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            version: PREFS_VERSION,
            theme: None,
            selected_vehicle_id: None,
        }
    }
}

/// Save `prefs` to `path` atomically.
///
/// Returns a descriptive error string for a tracing warn! call; callers log
/// it and carry on.
pub fn save(prefs: &Prefs, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "cannot create preferences directory '{}': {e}",
                parent.display()
            )
        })?;
    }

    let json = serde_json::to_string_pretty(prefs)
        .map_err(|e| format!("failed to serialise preferences: {e}"))?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|e| {
        format!(
            "failed to write preferences temp file '{}': {e}",
            tmp.display()
        )
    })?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        format!("failed to finalise preferences file '{}': {e}", path.display())
    })?;

    tracing::debug!(path = %path.display(), "Preferences saved");
    Ok(())
}

/// Load and validate preferences from `path`.
///
/// Returns `None` on any error (not found, malformed JSON, version mismatch).
pub fn load(path: &Path) -> Option<Prefs> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read preferences file");
            }
        })
        .ok()?;

    let prefs: Prefs = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Preferences file is malformed, starting fresh"
            );
        })
        .ok()?;

    if prefs.version != PREFS_VERSION {
        tracing::warn!(
            found = prefs.version,
            expected = PREFS_VERSION,
            "Preferences version mismatch, starting fresh"
        );
        return None;
    }

    tracing::info!(path = %path.display(), "Preferences loaded");
    Some(prefs)
}
