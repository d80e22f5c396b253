use serde::Deserialize;

use crate::models::indexed;

/// A bank of threshold sensors (temperature or humidity) with its
/// aggregate health flags.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SensorGroupState {
    #[serde(deserialize_with = "indexed::deserialize")]
    pub sensors: Vec<SensorState>,
    pub overall: bool,
    pub latched: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SensorState {
    /// Degrees Celsius for temperature sensors, percent for humidity sensors.
    #[serde(alias = "temperature", alias = "humidity")]
    pub value: f64,
    pub setpoint: f64,
    pub tripped: bool,
    pub trace: bool,
    pub disabled: bool,
    #[serde(default)]
    pub sensor_name: Option<String>,
}
