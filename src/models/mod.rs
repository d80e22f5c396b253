use serde::Deserialize;

pub(crate) mod fan;
pub(crate) mod indexed;
pub(crate) mod pump;
pub(crate) mod quad;
pub(crate) mod sensor;

pub use fan::FanState;
pub use pump::FlowState;
pub use quad::{ChannelState, QuadGroup, QuadState};
pub use sensor::{SensorGroupState, SensorState};

/// One polled document from the adapter root. Every field is required: a
/// missing key means the server speaks a different schema and the whole
/// cycle is rejected at decode time.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Snapshot {
    pub quad: QuadGroup,
    pub temperature: SensorGroupState,
    pub humidity: SensorGroupState,
    pub pump: FlowState,
    pub fan: FanState,
    pub trace: TraceState,
    pub overall: bool,
    pub latched: bool,
    pub armed: bool,
    #[serde(rename = "allEnabled")]
    pub all_enabled: bool,
    pub position: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TraceState {
    pub overall: bool,
    pub latched: bool,
}
