use log::debug;

use crate::models::quad::CHANNELS_PER_QUAD;
use crate::models::QuadState;
use crate::renderer::format::{fixed1, with_unit, VOLTS};
use crate::renderer::page::Page;
use crate::renderer::widgets::{apply_button_state, apply_status_box, apply_text};
use crate::sensors::binder::{group_element_id, FieldKey, WidgetBinder};
use crate::sensors::{Lifecycle, SensorGroup};

pub const PREFIX: &str = "q";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadField {
    Supply,
    Trace,
    Voltage(usize),
    FuseVoltage(usize),
    Current(usize),
    Button(usize),
}

const QUAD_FIELDS: [QuadField; 2 + 4 * CHANNELS_PER_QUAD] = [
    QuadField::Supply,
    QuadField::Trace,
    QuadField::Voltage(0),
    QuadField::Voltage(1),
    QuadField::Voltage(2),
    QuadField::Voltage(3),
    QuadField::FuseVoltage(0),
    QuadField::FuseVoltage(1),
    QuadField::FuseVoltage(2),
    QuadField::FuseVoltage(3),
    QuadField::Current(0),
    QuadField::Current(1),
    QuadField::Current(2),
    QuadField::Current(3),
    QuadField::Button(0),
    QuadField::Button(1),
    QuadField::Button(2),
    QuadField::Button(3),
];

impl FieldKey for QuadField {
    const KIND: &'static str = "quad";

    fn fields() -> &'static [Self] {
        &QUAD_FIELDS
    }

    fn element_id(self, index: usize) -> String {
        let field = match self {
            QuadField::Supply => "sv".to_string(),
            QuadField::Trace => "trace".to_string(),
            QuadField::Voltage(channel) => format!("v{channel}"),
            QuadField::FuseVoltage(channel) => format!("f{channel}"),
            QuadField::Current(channel) => format!("a{channel}"),
            QuadField::Button(channel) => format!("btn{channel}"),
        };
        group_element_id(PREFIX, index, &field)
    }
}

/// A quad power supply box: supply voltage, trace status and four switchable
/// output channels.
#[derive(Debug, Clone)]
pub struct Quad {
    binder: WidgetBinder<QuadField>,
    enabled: [bool; CHANNELS_PER_QUAD],
    lifecycle: Lifecycle,
}

impl Quad {
    pub fn index(&self) -> usize {
        self.binder.index()
    }

    /// Channel state as last rendered; `None` for an out-of-range channel.
    pub fn is_enabled(&self, channel: usize) -> Option<bool> {
        self.enabled.get(channel).copied()
    }

    pub fn update_trace(&mut self, page: &mut Page, trace: bool) {
        apply_status_box(page, self.binder.handle(QuadField::Trace), trace, "OK", "Error");
    }
}

impl SensorGroup for Quad {
    type Field = QuadField;
    type State = QuadState;

    fn from_binder(binder: WidgetBinder<QuadField>) -> Self {
        Self {
            binder,
            // The page starts with every channel button in the enabled state.
            enabled: [true; CHANNELS_PER_QUAD],
            lifecycle: Lifecycle::Constructed,
        }
    }

    fn update(&mut self, page: &mut Page, state: &QuadState) {
        apply_text(
            page,
            self.binder.handle(QuadField::Supply),
            &with_unit(&fixed1(state.supply), VOLTS),
        );

        for (channel, data) in state.channels.iter().take(CHANNELS_PER_QUAD).enumerate() {
            apply_text(page, self.binder.handle(QuadField::Voltage(channel)), &fixed1(data.voltage));
            apply_text(
                page,
                self.binder.handle(QuadField::FuseVoltage(channel)),
                &fixed1(data.fusevoltage),
            );
            apply_text(page, self.binder.handle(QuadField::Current(channel)), &fixed1(data.current));

            if data.enabled != self.enabled[channel] {
                debug!(
                    "Quad {} channel {} is now {}",
                    self.index(),
                    channel,
                    if data.enabled { "enabled" } else { "disabled" }
                );
            }
            apply_button_state(
                page,
                self.binder.handle(QuadField::Button(channel)),
                data.enabled,
                "Disable",
                "Enable",
            );
            self.enabled[channel] = data.enabled;
        }

        self.lifecycle = Lifecycle::Updated;
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}
