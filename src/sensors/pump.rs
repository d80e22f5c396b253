use crate::models::FlowState;
use crate::renderer::format::fixed1;
use crate::renderer::page::Page;
use crate::renderer::widgets::{apply_indicator, apply_text};
use crate::sensors::binder::{group_element_id, FieldKey, WidgetBinder};
use crate::sensors::{Lifecycle, SensorGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PumpField {
    Flow,
    Setpoint,
    Trip,
}

impl FieldKey for PumpField {
    const KIND: &'static str = "pump";

    fn fields() -> &'static [Self] {
        &[PumpField::Flow, PumpField::Setpoint, PumpField::Trip]
    }

    fn element_id(self, index: usize) -> String {
        let field = match self {
            PumpField::Flow => "flow",
            PumpField::Setpoint => "set",
            PumpField::Trip => "trip",
        };
        group_element_id("p", index, field)
    }
}

/// Coolant pump flow meter.
#[derive(Debug, Clone)]
pub struct PumpSensor {
    binder: WidgetBinder<PumpField>,
    lifecycle: Lifecycle,
}

impl SensorGroup for PumpSensor {
    type Field = PumpField;
    type State = FlowState;

    fn from_binder(binder: WidgetBinder<PumpField>) -> Self {
        Self {
            binder,
            lifecycle: Lifecycle::Constructed,
        }
    }

    fn update(&mut self, page: &mut Page, state: &FlowState) {
        apply_indicator(page, self.binder.handle(PumpField::Trip), !state.tripped);
        apply_text(page, self.binder.handle(PumpField::Flow), &fixed1(state.flow));
        apply_text(page, self.binder.handle(PumpField::Setpoint), &fixed1(state.setpoint));
        self.lifecycle = Lifecycle::Updated;
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}
