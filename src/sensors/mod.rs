use crate::renderer::page::Page;
use crate::sensors::binder::{BindError, FieldKey, WidgetBinder};

pub mod binder;
pub mod fan;
pub mod pump;
pub mod quad;
pub mod threshold;

pub use fan::FanSensor;
pub use pump::PumpSensor;
pub use quad::Quad;
pub use threshold::{HumiditySensor, TempSensor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Bound to the page, nothing rendered yet.
    Constructed,
    /// At least one snapshot has been rendered.
    Updated,
}

/// One physical unit on the page, bound to its display fields for the
/// lifetime of the dashboard.
pub trait SensorGroup: Sized {
    type Field: FieldKey;
    type State;

    fn from_binder(binder: WidgetBinder<Self::Field>) -> Self;

    fn bind(page: &Page, index: usize) -> Result<Self, BindError> {
        WidgetBinder::bind(page, index).map(Self::from_binder)
    }

    /// Render `state` into the unit's fields, writing only what changed.
    fn update(&mut self, page: &mut Page, state: &Self::State);

    fn lifecycle(&self) -> Lifecycle;
}
