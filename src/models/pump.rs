use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FlowState {
    pub flow: f64,
    pub setpoint: f64,
    pub tripped: bool,
    pub overall: bool,
    pub latched: bool,
}
