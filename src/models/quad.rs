use serde::Deserialize;

use crate::models::indexed;

/// Number of output channels on one quad box.
pub const CHANNELS_PER_QUAD: usize = 4;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QuadGroup {
    #[serde(deserialize_with = "indexed::deserialize")]
    pub quads: Vec<QuadState>,
    #[serde(deserialize_with = "indexed::deserialize")]
    pub trace: Vec<bool>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QuadState {
    pub supply: f64,
    #[serde(deserialize_with = "indexed::deserialize")]
    pub channels: Vec<ChannelState>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ChannelState {
    pub voltage: f64,
    pub fusevoltage: f64,
    pub current: f64,
    pub enabled: bool,
}
