//! Temperature and humidity sensors. Both report a value against a trip
//! set point and can be jumpered out of the interlock, so they share one
//! implementation parameterised by their field set.

use crate::models::SensorState;
use crate::renderer::format::{disabled_placeholder, fixed1, with_unit, CELSIUS, PERCENT};
use crate::renderer::page::Page;
use crate::renderer::widgets::{apply_enablement, apply_indicator, apply_text};
use crate::sensors::binder::{group_element_id, FieldKey, WidgetBinder};
use crate::sensors::{Lifecycle, SensorGroup};

/// Field set of a threshold sensor kind.
pub trait ThresholdFields: FieldKey {
    const NAME: Self;
    const VALUE: Self;
    const SETPOINT: Self;
    const TRACE: Self;
    const ENABLE: Self;
    const TRIP: Self;

    /// Unit appended to the value and the set point.
    const UNIT: &'static str;
    /// Row title used when the server does not name the sensor.
    const LABEL: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempField {
    Name,
    Temperature,
    Setpoint,
    Trace,
    Enable,
    Trip,
}

impl FieldKey for TempField {
    const KIND: &'static str = "temperature sensor";

    fn fields() -> &'static [Self] {
        &[
            TempField::Name,
            TempField::Temperature,
            TempField::Setpoint,
            TempField::Trace,
            TempField::Enable,
            TempField::Trip,
        ]
    }

    fn element_id(self, index: usize) -> String {
        let field = match self {
            TempField::Name => "name",
            TempField::Temperature => "tmp",
            TempField::Setpoint => "set",
            TempField::Trace => "trace",
            TempField::Enable => "enable",
            TempField::Trip => "trip",
        };
        group_element_id("tmp", index, field)
    }
}

impl ThresholdFields for TempField {
    const NAME: Self = TempField::Name;
    const VALUE: Self = TempField::Temperature;
    const SETPOINT: Self = TempField::Setpoint;
    const TRACE: Self = TempField::Trace;
    const ENABLE: Self = TempField::Enable;
    const TRIP: Self = TempField::Trip;
    const UNIT: &'static str = CELSIUS;
    const LABEL: &'static str = "Temp";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HumidityField {
    Name,
    Humidity,
    Setpoint,
    Trace,
    Enable,
    Trip,
}

impl FieldKey for HumidityField {
    const KIND: &'static str = "humidity sensor";

    fn fields() -> &'static [Self] {
        &[
            HumidityField::Name,
            HumidityField::Humidity,
            HumidityField::Setpoint,
            HumidityField::Trace,
            HumidityField::Enable,
            HumidityField::Trip,
        ]
    }

    fn element_id(self, index: usize) -> String {
        let field = match self {
            HumidityField::Name => "name",
            HumidityField::Humidity => "h",
            HumidityField::Setpoint => "set",
            HumidityField::Trace => "trace",
            HumidityField::Enable => "enable",
            HumidityField::Trip => "trip",
        };
        group_element_id("h", index, field)
    }
}

impl ThresholdFields for HumidityField {
    const NAME: Self = HumidityField::Name;
    const VALUE: Self = HumidityField::Humidity;
    const SETPOINT: Self = HumidityField::Setpoint;
    const TRACE: Self = HumidityField::Trace;
    const ENABLE: Self = HumidityField::Enable;
    const TRIP: Self = HumidityField::Trip;
    const UNIT: &'static str = PERCENT;
    const LABEL: &'static str = "Humid";
}

#[derive(Debug, Clone)]
pub struct ThresholdSensor<F: ThresholdFields> {
    binder: WidgetBinder<F>,
    active: bool,
    lifecycle: Lifecycle,
}

pub type TempSensor = ThresholdSensor<TempField>;
pub type HumiditySensor = ThresholdSensor<HumidityField>;

/// Default row title, `Temp 1` for the sensor at index 0.
pub fn default_label<F: ThresholdFields>(index: usize) -> String {
    format!("{} {}", F::LABEL, index + 1)
}

impl<F: ThresholdFields> ThresholdSensor<F> {
    pub fn index(&self) -> usize {
        self.binder.index()
    }

    /// Whether the sensor took part in the interlock at the last render.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<F: ThresholdFields> SensorGroup for ThresholdSensor<F> {
    type Field = F;
    type State = SensorState;

    fn from_binder(binder: WidgetBinder<F>) -> Self {
        Self {
            binder,
            active: true,
            lifecycle: Lifecycle::Constructed,
        }
    }

    fn update(&mut self, page: &mut Page, state: &SensorState) {
        let name = match &state.sensor_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => default_label::<F>(self.index()),
        };
        apply_text(page, self.binder.handle(F::NAME), &name);

        apply_indicator(page, self.binder.handle(F::TRIP), !state.tripped);
        apply_indicator(page, self.binder.handle(F::TRACE), state.trace);

        let value = disabled_placeholder(state.disabled, with_unit(&fixed1(state.value), F::UNIT));
        let setpoint = disabled_placeholder(state.disabled, with_unit(&fixed1(state.setpoint), F::UNIT));
        apply_text(page, self.binder.handle(F::VALUE), &value);
        apply_text(page, self.binder.handle(F::SETPOINT), &setpoint);

        apply_enablement(page, self.binder.handle(F::ENABLE), state.disabled);
        self.active = !state.disabled;

        self.lifecycle = Lifecycle::Updated;
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }
}
