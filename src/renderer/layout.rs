//! Generated page markup: one section per unit kind, element ids taken from
//! each kind's field declaration so the binders always find what was laid out.

use crate::config::LayoutConfig;
use crate::dashboard::globals::GlobalField;
use crate::models::quad::CHANNELS_PER_QUAD;
use crate::renderer::colours::{ButtonClass, StatusColour};
use crate::renderer::page::{ElementSpec, Page};
use crate::sensors::binder::{BindError, FieldKey};
use crate::sensors::fan::FanField;
use crate::sensors::pump::PumpField;
use crate::sensors::quad::QuadField;
use crate::sensors::threshold::{default_label, HumidityField, TempField, ThresholdFields};

pub fn build_page(layout: &LayoutConfig) -> Result<Page, BindError> {
    let mut page = Page::new();

    generate_overall(&mut page)?;
    for id in 0..layout.quads {
        generate_quad(&mut page, id)?;
    }
    generate_threshold_sensors::<TempField>(
        &mut page,
        "Temperature",
        "Temp.",
        (GlobalField::TemperatureHealth, GlobalField::TemperatureLatched),
        layout.temperature_sensors,
    )?;
    generate_threshold_sensors::<HumidityField>(
        &mut page,
        "Humidity",
        "Humidity",
        (GlobalField::HumidityHealth, GlobalField::HumidityLatched),
        layout.humidity_sensors,
    )?;
    generate_pump(&mut page)?;
    generate_fan(&mut page)?;

    Ok(page)
}

fn global(field: GlobalField) -> String {
    field.element_id(0)
}

fn generate_overall(page: &mut Page) -> Result<(), BindError> {
    page.push_section("Overall", &[]);
    page.push_row("Health", vec![ElementSpec::status(global(GlobalField::OverallStatus))])?;
    page.push_row("Latched", vec![ElementSpec::status(global(GlobalField::OverallLatched))])?;
    page.push_row("Armed", vec![ElementSpec::status(global(GlobalField::OverallArmed))])?;
    page.push_row("Trace", vec![ElementSpec::status(global(GlobalField::TraceStatus))])?;
    page.push_row("Trace Latched", vec![ElementSpec::status(global(GlobalField::TraceLatched))])?;
    page.push_row("Position", vec![ElementSpec::text(global(GlobalField::Position))])?;
    page.push_row(
        "Controls",
        vec![
            ElementSpec::button(global(GlobalField::ArmButton), "Arm Interlock"),
            ElementSpec::button(global(GlobalField::EnableButton), "Enable Quads"),
        ],
    )?;
    page.push_row(
        "Data",
        vec![
            ElementSpec::status(global(GlobalField::DataStatus))
                .with_text("Waiting")
                .with_background(StatusColour::Unknown),
            ElementSpec::text(global(GlobalField::LastUpdate)),
        ],
    )
}

fn generate_quad(page: &mut Page, id: usize) -> Result<(), BindError> {
    let channels = 0..CHANNELS_PER_QUAD;
    page.push_section(
        format!("Quad {}", id + 1),
        &["", "Channel A", "Channel B", "Channel C", "Channel D"],
    );
    page.push_row("Supply", vec![ElementSpec::text(QuadField::Supply.element_id(id))])?;
    page.push_row("Trace", vec![ElementSpec::status(QuadField::Trace.element_id(id))])?;
    page.push_row(
        "Voltage",
        channels
            .clone()
            .map(|c| ElementSpec::text(QuadField::Voltage(c).element_id(id)).with_unit("V"))
            .collect(),
    )?;
    page.push_row(
        "Fuse Voltage",
        channels
            .clone()
            .map(|c| ElementSpec::text(QuadField::FuseVoltage(c).element_id(id)).with_unit("V"))
            .collect(),
    )?;
    page.push_row(
        "Current",
        channels
            .clone()
            .map(|c| ElementSpec::text(QuadField::Current(c).element_id(id)).with_unit("A"))
            .collect(),
    )?;
    page.push_row(
        "",
        channels
            .map(|c| ElementSpec::button(QuadField::Button(c).element_id(id), "Disable").with_class(ButtonClass::On))
            .collect(),
    )
}

fn generate_threshold_sensors<F: ThresholdFields>(
    page: &mut Page,
    title: &str,
    value_column: &str,
    (health, latched): (GlobalField, GlobalField),
    count: usize,
) -> Result<(), BindError> {
    page.push_section(
        title,
        &["Sensor", value_column, "Set Point", "Trace", "Enable", "Tripped"],
    );
    page.push_row("Status", vec![ElementSpec::status(global(health))])?;
    page.push_row("Latched", vec![ElementSpec::status(global(latched))])?;

    for id in 0..count {
        page.push_row(
            "",
            vec![
                ElementSpec::text(F::NAME.element_id(id)).with_text(&default_label::<F>(id)),
                ElementSpec::text(F::VALUE.element_id(id)),
                ElementSpec::text(F::SETPOINT.element_id(id)),
                ElementSpec::status(F::TRACE.element_id(id)),
                ElementSpec::status(F::ENABLE.element_id(id)),
                ElementSpec::status(F::TRIP.element_id(id)),
            ],
        )?;
    }
    Ok(())
}

fn generate_pump(page: &mut Page) -> Result<(), BindError> {
    page.push_section("Pump", &["Sensor", "Flow", "Set Point", "Tripped"]);
    page.push_row("Status", vec![ElementSpec::status(global(GlobalField::PumpHealth))])?;
    page.push_row("Latched", vec![ElementSpec::status(global(GlobalField::PumpLatched))])?;
    page.push_row(
        "Pump 1",
        vec![
            ElementSpec::text(PumpField::Flow.element_id(0)).with_text("0").with_unit("l/min"),
            ElementSpec::text(PumpField::Setpoint.element_id(0)).with_text("0").with_unit("l/min"),
            ElementSpec::status(PumpField::Trip.element_id(0)),
        ],
    )
}

fn generate_fan(page: &mut Page) -> Result<(), BindError> {
    page.push_section(
        "Fan",
        &["Sensor", "Current Speed", "Set Point", "Target Speed", "Tripped"],
    );
    page.push_row("Status", vec![ElementSpec::status(global(GlobalField::FanHealth))])?;
    page.push_row("Latched", vec![ElementSpec::status(global(GlobalField::FanLatched))])?;
    page.push_row(
        "Fan 1",
        vec![
            ElementSpec::text(FanField::Speed.element_id(0)).with_text("0").with_unit("Hz"),
            ElementSpec::text(FanField::Setpoint.element_id(0)).with_text("0").with_unit("Hz"),
            ElementSpec::input(FanField::Target.element_id(0)).with_unit("%"),
            ElementSpec::status(FanField::Trip.element_id(0)),
        ],
    )
}
