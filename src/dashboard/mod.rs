use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, error, warn};
use thiserror::Error;

use crate::client::ApiError;
use crate::commands::Command;
use crate::config::{AppConfig, LayoutConfig};
use crate::input::{InputError, UserAction};
use crate::models::quad::CHANNELS_PER_QUAD;
use crate::models::Snapshot;
use crate::renderer::colours::StatusColour;
use crate::renderer::format::{fixed2, with_unit, MILLIMETRES};
use crate::renderer::layout;
use crate::renderer::page::Page;
use crate::renderer::widgets::{apply_button_state, apply_labelled_colour, apply_status_box, apply_text};
use crate::sensors::binder::{BindError, WidgetBinder};
use crate::sensors::{FanSensor, HumiditySensor, PumpSensor, Quad, SensorGroup, TempSensor};

pub mod globals;

use globals::GlobalField;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("snapshot carries {found} {kind} entries, the page shows {expected}")]
    MissingEntry {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("quad {quad} reports {found} channels, expected {expected}")]
    ChannelCount {
        quad: usize,
        expected: usize,
        found: usize,
    },
}

/// How current the page is, shown in the `data-status` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Nothing received yet.
    Waiting,
    Live,
    /// The last poll failed in transport; the page shows older data.
    Stale,
    /// The last response did not have the expected shape.
    Mismatch,
}

impl Freshness {
    fn colour(self) -> StatusColour {
        match self {
            Freshness::Waiting => StatusColour::Unknown,
            Freshness::Live => StatusColour::Ok,
            Freshness::Stale => StatusColour::Warn,
            Freshness::Mismatch => StatusColour::Fail,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Freshness::Waiting => "Waiting",
            Freshness::Live => "Live",
            Freshness::Stale => "Stale",
            Freshness::Mismatch => "Schema error",
        }
    }
}

/// The whole application state: the page, every bound unit and the values
/// the control actions toggle. There is a single owner, the poll loop.
#[derive(Debug)]
pub struct Dashboard {
    page: Page,
    globals: WidgetBinder<GlobalField>,
    quads: Vec<Quad>,
    temperature: Vec<TempSensor>,
    humidity: Vec<HumiditySensor>,
    pump: PumpSensor,
    fan: FanSensor,
    armed: bool,
    all_enabled: bool,
    freshness: Freshness,
}

impl Dashboard {
    pub fn new(layout: &LayoutConfig) -> Result<Self, BindError> {
        let page = layout::build_page(layout)?;

        let globals = WidgetBinder::bind(&page, 0)?;
        let quads = (0..layout.quads)
            .map(|id| Quad::bind(&page, id))
            .collect::<Result<Vec<_>, _>>()?;
        let temperature = (0..layout.temperature_sensors)
            .map(|id| TempSensor::bind(&page, id))
            .collect::<Result<Vec<_>, _>>()?;
        let humidity = (0..layout.humidity_sensors)
            .map(|id| HumiditySensor::bind(&page, id))
            .collect::<Result<Vec<_>, _>>()?;
        let pump = PumpSensor::bind(&page, 0)?;
        let fan = FanSensor::bind(&page, 0)?;

        debug!("Dashboard bound {} elements", page.len());

        Ok(Self {
            page,
            globals,
            quads,
            temperature,
            humidity,
            pump,
            fan,
            armed: false,
            all_enabled: false,
            freshness: Freshness::Waiting,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    pub fn temperature_sensors(&self) -> &[TempSensor] {
        &self.temperature
    }

    pub fn humidity_sensors(&self) -> &[HumiditySensor] {
        &self.humidity
    }

    pub fn fan(&self) -> &FanSensor {
        &self.fan
    }

    pub fn pump(&self) -> &PumpSensor {
        &self.pump
    }

    /// Take one poll result: render a snapshot, or flag the page as stale.
    /// Returns whether the page now shows the new snapshot.
    pub fn apply(&mut self, result: Result<Snapshot, ApiError>) -> bool {
        match result {
            Ok(snapshot) => match self.render(&snapshot) {
                Ok(()) => true,
                Err(e) => {
                    error!("Snapshot rejected: {e}");
                    self.set_freshness(Freshness::Mismatch);
                    false
                }
            },
            Err(e) if e.is_schema_mismatch() => {
                error!("Poll failed: {e}");
                self.set_freshness(Freshness::Mismatch);
                false
            }
            Err(e) => {
                warn!("Poll failed: {e}");
                self.set_freshness(Freshness::Stale);
                false
            }
        }
    }

    /// Render a snapshot. The shape is checked against the page before
    /// anything is written, so a mismatching snapshot leaves the page as it was.
    pub fn render(&mut self, snapshot: &Snapshot) -> Result<(), RenderError> {
        let start = Instant::now();
        self.check_shape(snapshot)?;
        let writes_before = self.page.writes();

        for (quad, (state, trace)) in self
            .quads
            .iter_mut()
            .zip(snapshot.quad.quads.iter().zip(&snapshot.quad.trace))
        {
            quad.update(&mut self.page, state);
            quad.update_trace(&mut self.page, *trace);
        }
        for (sensor, state) in self.temperature.iter_mut().zip(&snapshot.temperature.sensors) {
            sensor.update(&mut self.page, state);
        }
        for (sensor, state) in self.humidity.iter_mut().zip(&snapshot.humidity.sensors) {
            sensor.update(&mut self.page, state);
        }
        self.pump.update(&mut self.page, &snapshot.pump);
        self.fan.update(&mut self.page, &snapshot.fan);

        self.render_globals(snapshot);
        self.armed = snapshot.armed;
        self.all_enabled = snapshot.all_enabled;

        let now = Local::now().format("%H:%M:%S").to_string();
        apply_text(&mut self.page, self.globals.handle(GlobalField::LastUpdate), &now);
        self.set_freshness(Freshness::Live);

        debug!(
            "render took: {} us, {} writes",
            start.elapsed().as_micros(),
            self.page.writes() - writes_before
        );
        Ok(())
    }

    fn check_shape(&self, snapshot: &Snapshot) -> Result<(), RenderError> {
        let counts = [
            ("quad", self.quads.len(), snapshot.quad.quads.len()),
            ("quad trace", self.quads.len(), snapshot.quad.trace.len()),
            ("temperature", self.temperature.len(), snapshot.temperature.sensors.len()),
            ("humidity", self.humidity.len(), snapshot.humidity.sensors.len()),
        ];
        for (kind, expected, found) in counts {
            if found < expected {
                return Err(RenderError::MissingEntry { kind, expected, found });
            }
        }

        for (quad, state) in snapshot.quad.quads.iter().take(self.quads.len()).enumerate() {
            if state.channels.len() != CHANNELS_PER_QUAD {
                return Err(RenderError::ChannelCount {
                    quad,
                    expected: CHANNELS_PER_QUAD,
                    found: state.channels.len(),
                });
            }
        }
        Ok(())
    }

    fn render_globals(&mut self, snapshot: &Snapshot) {
        let page = &mut self.page;
        let g = &self.globals;

        apply_status_box(page, g.handle(GlobalField::OverallStatus), snapshot.overall, "Healthy", "Error");
        apply_status_box(page, g.handle(GlobalField::OverallLatched), snapshot.latched, "No", "Yes");
        apply_status_box(page, g.handle(GlobalField::OverallArmed), snapshot.armed, "Yes", "No");
        apply_status_box(page, g.handle(GlobalField::TraceStatus), snapshot.trace.overall, "OK", "Error");
        apply_status_box(page, g.handle(GlobalField::TraceLatched), snapshot.trace.latched, "No", "Yes");
        apply_text(
            page,
            g.handle(GlobalField::Position),
            &with_unit(&fixed2(snapshot.position), MILLIMETRES),
        );

        let health = [
            (GlobalField::TemperatureHealth, snapshot.temperature.overall),
            (GlobalField::HumidityHealth, snapshot.humidity.overall),
            (GlobalField::PumpHealth, snapshot.pump.overall),
            (GlobalField::FanHealth, snapshot.fan.overall),
        ];
        for (field, value) in health {
            apply_status_box(page, g.handle(field), value, "Healthy", "Error");
        }

        let latched = [
            (GlobalField::TemperatureLatched, snapshot.temperature.latched),
            (GlobalField::HumidityLatched, snapshot.humidity.latched),
            (GlobalField::PumpLatched, snapshot.pump.latched),
            (GlobalField::FanLatched, snapshot.fan.latched),
        ];
        for (field, value) in latched {
            apply_status_box(page, g.handle(field), value, "No", "Yes");
        }

        apply_button_state(
            page,
            g.handle(GlobalField::ArmButton),
            snapshot.armed,
            "Disarm Interlock",
            "Arm Interlock",
        );
        apply_button_state(
            page,
            g.handle(GlobalField::EnableButton),
            snapshot.all_enabled,
            "Disable Quads",
            "Enable Quads",
        );
    }

    fn set_freshness(&mut self, freshness: Freshness) {
        self.freshness = freshness;
        apply_labelled_colour(
            &mut self.page,
            self.globals.handle(GlobalField::DataStatus),
            freshness.colour(),
            freshness.label(),
        );
    }

    /// The request an operator action turns into. Toggles invert the state
    /// as last rendered, not a fresh read from the server.
    pub fn command_for(&self, action: &UserAction) -> Result<Command, InputError> {
        let command = match *action {
            UserAction::ToggleChannel { quad, channel } => {
                let unit = self.quads.get(quad).ok_or(InputError::InvalidIndex {
                    kind: "quad",
                    index: quad,
                    count: self.quads.len(),
                })?;
                let enabled = unit.is_enabled(channel).ok_or(InputError::InvalidIndex {
                    kind: "channel",
                    index: channel,
                    count: CHANNELS_PER_QUAD,
                })?;
                Command::SetChannelEnabled {
                    quad,
                    channel,
                    enabled: !enabled,
                }
            }
            UserAction::ToggleTemperature(sensor) => {
                let unit = self.temperature.get(sensor).ok_or(InputError::InvalidIndex {
                    kind: "temperature sensor",
                    index: sensor,
                    count: self.temperature.len(),
                })?;
                Command::SetTemperatureDisabled {
                    sensor,
                    disable: unit.is_active(),
                }
            }
            UserAction::ToggleHumidity(sensor) => {
                let unit = self.humidity.get(sensor).ok_or(InputError::InvalidIndex {
                    kind: "humidity sensor",
                    index: sensor,
                    count: self.humidity.len(),
                })?;
                Command::SetHumidityDisabled {
                    sensor,
                    disable: unit.is_active(),
                }
            }
            UserAction::ToggleArmed => Command::SetArmed(!self.armed),
            UserAction::ToggleAllEnabled => Command::SetAllEnabled(!self.all_enabled),
            UserAction::SetFanTarget(target) => Command::SetFanTarget(target),
            UserAction::Help => return Err(InputError::NoRequest("help")),
        };
        Ok(command)
    }
}

pub fn save_page(config: &AppConfig, page: &Page) -> Result<()> {
    let target_file = &config.dashboard.file;

    std::fs::write(target_file, page.to_html())
        .context(format!("Failed to save dashboard to {}", target_file))
}
