/// Primary weather condition, e.g. `Clear` / `clear sky` / `01d`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Current conditions for a location, in metric units.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    /// Absent when the provider sent an empty condition list.
    pub condition: Option<Condition>,
    pub wind_speed_mps: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityPhoto {
    pub url: String,
    pub alt: Option<String>,
}
