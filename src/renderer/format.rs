//! Conversion of telemetry values into display strings.

/// Shown in place of a reading when the sensor is jumpered out of the interlock.
pub const NOT_CONNECTED: &str = "N/C";

pub const CELSIUS: &str = "°C";
pub const PERCENT: &str = "%";
pub const VOLTS: &str = "V";
pub const MILLIMETRES: &str = "mm";

/// One decimal place: `12.34` -> `"12.3"`, `12.0` -> `"12.0"`.
pub fn fixed1(x: f64) -> String {
    fixed(positive_zero(x), 1)
}

/// Two decimal places, only used for the position readout.
pub fn fixed2(x: f64) -> String {
    fixed(positive_zero(x), 2)
}

// Exact halfway values round away from zero (`0.25` -> `"0.3"`); the float
// formatter alone would round them to even.
fn fixed(x: f64, places: i32) -> String {
    let precision = places as usize;
    if !x.is_finite() {
        return format!("{:.*}", precision, x);
    }

    let scale = 10f64.powi(places);
    let halves = (x * 2.0 * scale).round();
    // A tie is an odd number of half-units with no rounding error in between.
    if halves % 2.0 != 0.0 && x.mul_add(2.0 * scale, -halves) == 0.0 {
        let away = (halves + halves.signum()) / 2.0;
        return format!("{:.*}", precision, away / scale);
    }
    format!("{:.*}", precision, x)
}

pub fn with_unit(value: &str, unit: &str) -> String {
    format!("{value}{unit}")
}

/// `formatted` unless the sensor is disabled, in which case the sentinel.
pub fn disabled_placeholder(disabled: bool, formatted: String) -> String {
    if disabled {
        NOT_CONNECTED.to_string()
    } else {
        formatted
    }
}

/// Shortest round-trip rendering, used for the fan target placeholder
/// (`15.0` -> `"15"`, `12.5` -> `"12.5"`).
pub fn plain(x: f64) -> String {
    positive_zero(x).to_string()
}

// -0.0 would otherwise render with a sign.
fn positive_zero(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed1() {
        assert_eq!(fixed1(12.34), "12.3");
        assert_eq!(fixed1(12.0), "12.0");
        assert_eq!(fixed1(-3.06), "-3.1");
        assert_eq!(fixed1(-0.0), "0.0");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(fixed1(0.25), "0.3");
        assert_eq!(fixed1(12.25), "12.3");
        assert_eq!(fixed1(0.75), "0.8");
        assert_eq!(fixed1(-0.25), "-0.3");
        assert_eq!(fixed2(1.125), "1.13");
        assert_eq!(fixed2(-2.375), "-2.38");
        // Not exact ties in binary, so they follow their true value.
        assert_eq!(fixed1(0.35), "0.3");
        assert_eq!(fixed2(1.005), "1.00");
    }

    #[test]
    fn test_fixed2() {
        assert_eq!(fixed2(3.1), "3.10");
        assert_eq!(fixed2(0.0), "0.00");
    }

    #[test]
    fn test_non_finite_values_are_not_masked() {
        assert_eq!(fixed1(f64::NAN), "NaN");
        assert_eq!(fixed1(f64::INFINITY), "inf");
        assert_eq!(fixed2(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_with_unit() {
        assert_eq!(with_unit(&fixed1(12.34), CELSIUS), "12.3°C");
        assert_eq!(with_unit(&fixed2(3.1), MILLIMETRES), "3.10mm");
    }

    #[test]
    fn test_disabled_placeholder() {
        assert_eq!(disabled_placeholder(true, fixed1(21.0)), "N/C");
        assert_eq!(disabled_placeholder(false, fixed1(21.0)), "21.0");
    }

    #[test]
    fn test_plain() {
        assert_eq!(plain(15.0), "15");
        assert_eq!(plain(12.5), "12.5");
    }
}
