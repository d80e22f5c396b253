use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FanState {
    pub currentspeed: f64,
    pub setpoint: f64,
    pub target: f64,
    pub tripped: bool,
    pub overall: bool,
    pub latched: bool,
}
