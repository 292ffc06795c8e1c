// FuelWiseLog - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, chrono, serde, and the export encoders.
// Must NOT depend on: ui, platform, app.

pub mod efficiency;
pub mod export;
pub mod format;
pub mod fuel_log;
pub mod model;
pub mod validation;
