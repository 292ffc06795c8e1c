// FuelWiseLog - app/mod.rs
//
// Application layer: state management, form handling, preference persistence.
// Dependencies: core and platform layers.
// Must NOT depend on: ui.

pub mod prefs;
pub mod state;
