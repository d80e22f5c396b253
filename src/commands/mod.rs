//! Control requests sent back to the adapter.
//!
//! Commands are fire-and-forget from the operator's point of view: nothing
//! waits for them and the next poll is the only feedback on the page. Each
//! one still runs as its own task with an observable outcome so failures can
//! be logged and tests can assert on what was sent.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use log::{info, warn};
use serde_json::{json, Value};
use tokio::task::JoinSet;

use crate::client::{ApiClient, ApiError, Transport};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetChannelEnabled { quad: usize, channel: usize, enabled: bool },
    SetTemperatureDisabled { sensor: usize, disable: bool },
    SetHumidityDisabled { sensor: usize, disable: bool },
    SetArmed(bool),
    SetAllEnabled(bool),
    SetFanTarget(f64),
}

impl Command {
    /// Resource path relative to the adapter root.
    pub fn path(&self) -> String {
        match self {
            Command::SetChannelEnabled { quad, channel, .. } => {
                format!("quad/quads/{quad}/channels/{channel}")
            }
            Command::SetTemperatureDisabled { sensor, .. } => format!("temperature/sensors/{sensor}"),
            Command::SetHumidityDisabled { sensor, .. } => format!("humidity/sensors/{sensor}"),
            Command::SetArmed(_) | Command::SetAllEnabled(_) => String::new(),
            Command::SetFanTarget(_) => "fan".to_string(),
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            Command::SetChannelEnabled { enabled, .. } => json!({ "enabled": enabled }),
            Command::SetTemperatureDisabled { disable, .. } | Command::SetHumidityDisabled { disable, .. } => {
                json!({ "disable": disable })
            }
            Command::SetArmed(armed) => json!({ "armed": armed }),
            Command::SetAllEnabled(enabled) => json!({ "allEnabled": enabled }),
            Command::SetFanTarget(target) => json!({ "target": target }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PUT /{} {}", self.path(), self.payload())
    }
}

#[derive(Debug)]
pub struct CommandOutcome {
    pub command: Command,
    pub result: Result<(), ApiError>,
}

impl CommandOutcome {
    pub fn log(&self) {
        match &self.result {
            Ok(()) => info!("Command accepted: {}", self.command),
            Err(e) => warn!("Command failed: {}: {}", self.command, e),
        }
    }
}

pub struct CommandDispatcher<T> {
    client: Arc<ApiClient<T>>,
}

impl<T> Clone for CommandDispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<T: Transport> CommandDispatcher<T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    /// The request as a self-contained future. No retry, no confirmation.
    pub fn send(&self, command: Command) -> impl Future<Output = CommandOutcome> + Send + 'static {
        let client = Arc::clone(&self.client);
        async move {
            let result = client.put(&command.path(), &command.payload()).await;
            CommandOutcome { command, result }
        }
    }

    /// Spawn the request onto `tasks`; the caller reaps outcomes at leisure.
    pub fn dispatch(&self, tasks: &mut JoinSet<CommandOutcome>, command: Command) {
        info!("Sending {}", command);
        tasks.spawn(self.send(command));
    }
}
