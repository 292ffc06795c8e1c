// FuelWiseLog - core/format.rs
//
// Display formatting for amounts shown in the UI.

/// Money with two decimals, e.g. "RM 61.50".
pub fn money(currency: &str, amount: f64) -> String {
    format!("{currency} {amount:.2}")
}

/// Litres with two decimals, e.g. "30.25 L".
pub fn litres(value: f64) -> String {
    format!("{value:.2} L")
}

/// Whole kilometres, e.g. "12000 km".
pub fn km(value: f64) -> String {
    format!("{value:.0} km")
}

/// Consumption, e.g. "7.25 L/100km".
pub fn consumption(litres_per_100km: f64) -> String {
    format!("{litres_per_100km:.2} L/100km")
}

/// Running cost, e.g. "RM 0.14/km".
pub fn cost_per_km(currency: &str, value: f64) -> String {
    format!("{currency} {value:.2}/km")
}

/// Last recorded odometer line of the add-record form.
pub fn last_recorded(mileage: Option<f64>) -> String {
    match mileage {
        Some(m) => format!("Last recorded: {} km", m as i64),
        None => "Last recorded: \u{2014} km".to_string(),
    }
}
