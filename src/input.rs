//! Operator input: one action per line.
//!
//! ```text
//! quad <quad> <channel>   toggle a quad output channel
//! temp <sensor>           toggle a temperature sensor in/out of the interlock
//! humidity <sensor>       same for a humidity sensor
//! arm                     arm or disarm the interlock
//! enable                  enable or disable all quads
//! fan <speed>             set the fan target speed
//! ```
//!
//! Quad, channel and sensor numbers are zero-based, as in the API paths.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    ToggleChannel { quad: usize, channel: usize },
    ToggleTemperature(usize),
    ToggleHumidity(usize),
    ToggleArmed,
    ToggleAllEnabled,
    SetFanTarget(f64),
    Help,
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("unknown action '{0}', type 'help' for a list")]
    UnknownAction(String),

    #[error("'{0}' needs more arguments")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("{kind} {index} does not exist (0..{count})")]
    InvalidIndex {
        kind: &'static str,
        index: usize,
        count: usize,
    },

    #[error("The fan speed must be a decimal number! Got '{0}'")]
    InvalidFanTarget(String),

    #[error("'{0}' does not send a request")]
    NoRequest(&'static str),
}

pub const HELP: &str = "actions: quad <q> <c> | temp <id> | humidity <id> | arm | enable | fan <speed> | help";

impl FromStr for UserAction {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let action = words.next().unwrap_or_default().to_lowercase();

        let parsed = match action.as_str() {
            "quad" | "q" => {
                let quad = index_arg(words.next(), "quad")?;
                let channel = index_arg(words.next(), "quad")?;
                UserAction::ToggleChannel { quad, channel }
            }
            "temp" | "temperature" | "t" => UserAction::ToggleTemperature(index_arg(words.next(), "temp")?),
            "humidity" | "h" => UserAction::ToggleHumidity(index_arg(words.next(), "humidity")?),
            "arm" => UserAction::ToggleArmed,
            "enable" => UserAction::ToggleAllEnabled,
            "fan" | "f" => {
                let raw = words.next().ok_or(InputError::MissingArgument("fan"))?;
                UserAction::SetFanTarget(parse_fan_target(raw)?)
            }
            "help" | "?" => UserAction::Help,
            _ => return Err(InputError::UnknownAction(action)),
        };

        Ok(parsed)
    }
}

fn index_arg(word: Option<&str>, action: &'static str) -> Result<usize, InputError> {
    let word = word.ok_or(InputError::MissingArgument(action))?;
    word.parse()
        .map_err(|_| InputError::InvalidNumber(word.to_string()))
}

/// A decimal number; anything else is rejected before a request is built.
pub fn parse_fan_target(raw: &str) -> Result<f64, InputError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::InvalidFanTarget(raw.to_string())),
    }
}
