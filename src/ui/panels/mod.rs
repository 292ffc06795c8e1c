// FuelWiseLog - ui/panels/mod.rs

pub mod about;
pub mod add_record;
pub mod confirm;
pub mod fuel_log;
pub mod home;
pub mod vehicles;
