use crate::types::DisplayTemperature;

const KELVIN_OFFSET: f64 = 273.15;

/// Kelvin to Fahrenheit, unrounded
pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET) * 1.8 + 32.0
}

/// Convert an upstream temperature to the display unit.
///
/// Rounds half away from zero. Absent, NaN and infinite inputs become
/// [`DisplayTemperature::NotAvailable`].
pub fn to_display_unit(kelvin: Option<f64>) -> DisplayTemperature {
    match kelvin.map(kelvin_to_fahrenheit) {
        Some(f) => display_fahrenheit(f),
        None => DisplayTemperature::NotAvailable,
    }
}

fn display_fahrenheit(fahrenheit: f64) -> DisplayTemperature {
    if fahrenheit.is_finite() {
        DisplayTemperature::Fahrenheit(fahrenheit.round() as i64)
    } else {
        DisplayTemperature::NotAvailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freezing_point() {
        assert_eq!(to_display_unit(Some(273.15)), DisplayTemperature::Fahrenheit(32));
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 80.33°F
        assert_eq!(to_display_unit(Some(300.0)), DisplayTemperature::Fahrenheit(80));
        // 0°F exactly is 255.372..K; 255.0K is -0.67°F
        assert_eq!(to_display_unit(Some(255.0)), DisplayTemperature::Fahrenheit(-1));
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(display_fahrenheit(0.5), DisplayTemperature::Fahrenheit(1));
        assert_eq!(display_fahrenheit(-0.5), DisplayTemperature::Fahrenheit(-1));
        assert_eq!(display_fahrenheit(2.5), DisplayTemperature::Fahrenheit(3));
        assert_eq!(display_fahrenheit(-2.5), DisplayTemperature::Fahrenheit(-3));
        assert_eq!(display_fahrenheit(-2.4), DisplayTemperature::Fahrenheit(-2));
    }

    #[test]
    fn test_not_available() {
        assert_eq!(to_display_unit(None), DisplayTemperature::NotAvailable);
        assert_eq!(to_display_unit(Some(f64::NAN)), DisplayTemperature::NotAvailable);
        assert_eq!(
            to_display_unit(Some(f64::INFINITY)),
            DisplayTemperature::NotAvailable
        );
        assert_eq!(
            to_display_unit(Some(f64::NEG_INFINITY)),
            DisplayTemperature::NotAvailable
        );
    }
}
