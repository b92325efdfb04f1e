//! Per-sensor configuration, carried explicitly so several independently
//! configured sensors can coexist and tests can inject their own values.

use std::time::Duration;

pub const DEFAULT_NAME: &str = "Next Bus";
pub const DEFAULT_UNIT: &str = "min";
pub const DEFAULT_ICON: &str = "mdi:bus";
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct SensorConfig {
    /// Transit stop identifier, as recognized by the upstream provider.
    pub stop_id: String,
    /// Display label for the sensor.
    pub name: String,
    /// Restricts results to one route; empty means unfiltered.
    pub route: String,
    pub unit_of_measurement: String,
    pub icon: String,
    pub scan_interval: Duration,
}

impl SensorConfig {
    pub fn new(stop_id: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            name: DEFAULT_NAME.to_string(),
            route: String::new(),
            unit_of_measurement: DEFAULT_UNIT.to_string(),
            icon: DEFAULT_ICON.to_string(),
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    pub fn with_scan_interval(mut self, scan_interval: Duration) -> Self {
        self.scan_interval = scan_interval;
        self
    }
}
