use crate::sensors::binder::FieldKey;

/// Page-wide widgets that do not belong to a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalField {
    OverallStatus,
    OverallLatched,
    OverallArmed,
    TraceStatus,
    TraceLatched,
    Position,
    ArmButton,
    EnableButton,
    TemperatureHealth,
    TemperatureLatched,
    HumidityHealth,
    HumidityLatched,
    PumpHealth,
    PumpLatched,
    FanHealth,
    FanLatched,
    DataStatus,
    LastUpdate,
}

impl FieldKey for GlobalField {
    const KIND: &'static str = "overall";

    fn fields() -> &'static [Self] {
        &[
            GlobalField::OverallStatus,
            GlobalField::OverallLatched,
            GlobalField::OverallArmed,
            GlobalField::TraceStatus,
            GlobalField::TraceLatched,
            GlobalField::Position,
            GlobalField::ArmButton,
            GlobalField::EnableButton,
            GlobalField::TemperatureHealth,
            GlobalField::TemperatureLatched,
            GlobalField::HumidityHealth,
            GlobalField::HumidityLatched,
            GlobalField::PumpHealth,
            GlobalField::PumpLatched,
            GlobalField::FanHealth,
            GlobalField::FanLatched,
            GlobalField::DataStatus,
            GlobalField::LastUpdate,
        ]
    }

    // Global ids are fixed; there is only ever one of each.
    fn element_id(self, _index: usize) -> String {
        let id = match self {
            GlobalField::OverallStatus => "overall-status",
            GlobalField::OverallLatched => "overall-latched",
            GlobalField::OverallArmed => "overall-armed",
            GlobalField::TraceStatus => "trace-status",
            GlobalField::TraceLatched => "trace-latched",
            GlobalField::Position => "position",
            GlobalField::ArmButton => "button-arm",
            GlobalField::EnableButton => "button-enable",
            GlobalField::TemperatureHealth => "tmp-health",
            GlobalField::TemperatureLatched => "tmp-latched",
            GlobalField::HumidityHealth => "h-health",
            GlobalField::HumidityLatched => "h-latched",
            GlobalField::PumpHealth => "p-health",
            GlobalField::PumpLatched => "p-latched",
            GlobalField::FanHealth => "f-health",
            GlobalField::FanLatched => "f-latched",
            GlobalField::DataStatus => "data-status",
            GlobalField::LastUpdate => "last-update",
        };
        id.to_string()
    }
}
