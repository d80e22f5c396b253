use std::fmt;

/// Background colour of a status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColour {
    Ok,
    Warn,
    Fail,
    Unknown,
}

impl StatusColour {
    pub fn hex(self) -> &'static str {
        match self {
            StatusColour::Ok => "#5cb85c",      // Bootstrap success green
            StatusColour::Warn => "#ffa500",    // Orange - administratively disabled
            StatusColour::Fail => "#d9534f",    // Bootstrap danger red
            StatusColour::Unknown => "#555555", // Dark grey - nothing received yet
        }
    }

    pub fn from_ok(ok: bool) -> Self {
        if ok {
            StatusColour::Ok
        } else {
            StatusColour::Fail
        }
    }
}

impl fmt::Display for StatusColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusColour::Ok => "ok",
            StatusColour::Warn => "warn",
            StatusColour::Fail => "fail",
            StatusColour::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// The pair of CSS classes a toggle button alternates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonClass {
    On,
    Off,
}

impl ButtonClass {
    pub fn css(self) -> &'static str {
        match self {
            ButtonClass::On => "btn-success",
            ButtonClass::Off => "btn-danger",
        }
    }

    pub fn from_state(on: bool) -> Self {
        if on {
            ButtonClass::On
        } else {
            ButtonClass::Off
        }
    }
}
