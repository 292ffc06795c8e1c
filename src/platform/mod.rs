// FuelWiseLog - platform/mod.rs
//
// Platform abstraction layer: directories, config.toml and the SQLite store.
// Dependencies: standard library, directories, toml, rusqlite, core model types.
// Must NOT depend on: app, ui.

pub mod config;
pub mod store;
