use log::debug;

use crate::models::FanState;
use crate::renderer::format::{fixed1, plain};
use crate::renderer::page::Page;
use crate::renderer::widgets::{apply_indicator, apply_text};
use crate::sensors::binder::{group_element_id, FieldKey, WidgetBinder};
use crate::sensors::{Lifecycle, SensorGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FanField {
    Speed,
    Setpoint,
    Target,
    Trip,
}

impl FieldKey for FanField {
    const KIND: &'static str = "fan";

    fn fields() -> &'static [Self] {
        &[FanField::Speed, FanField::Setpoint, FanField::Target, FanField::Trip]
    }

    fn element_id(self, index: usize) -> String {
        let field = match self {
            FanField::Speed => "speed",
            FanField::Setpoint => "set",
            FanField::Target => "target",
            FanField::Trip => "trip",
        };
        group_element_id("f", index, field)
    }
}

/// Cooling fan. The target speed is shown as the placeholder of the target
/// input so a value the operator is typing is never overwritten.
#[derive(Debug, Clone)]
pub struct FanSensor {
    binder: WidgetBinder<FanField>,
    target: Option<f64>,
    lifecycle: Lifecycle,
}

impl FanSensor {
    /// Target speed as last rendered.
    pub fn target(&self) -> Option<f64> {
        self.target
    }
}

impl SensorGroup for FanSensor {
    type Field = FanField;
    type State = FanState;

    fn from_binder(binder: WidgetBinder<FanField>) -> Self {
        Self {
            binder,
            target: None,
            lifecycle: Lifecycle::Constructed,
        }
    }

    fn update(&mut self, page: &mut Page, state: &FanState) {
        apply_indicator(page, self.binder.handle(FanField::Trip), !state.tripped);
        apply_text(page, self.binder.handle(FanField::Speed), &fixed1(state.currentspeed));
        apply_text(page, self.binder.handle(FanField::Setpoint), &fixed1(state.setpoint));

        if self.target != Some(state.target) {
            debug!("Fan target changed to {}", state.target);
            page.write_placeholder(self.binder.handle(FanField::Target), &plain(state.target));
            self.target = Some(state.target);
        }

        self.lifecycle = Lifecycle::Updated;
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}
