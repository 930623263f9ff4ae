use crate::models::TemperatureBand;

/// Upper bound (inclusive) of the cold band, in Celsius
pub const COLD_MAX_CELSIUS: f64 = 10.0;

/// Upper bound (inclusive) of the mild band, in Celsius
pub const MILD_MAX_CELSIUS: f64 = 25.0;

/// Maps a temperature to its band
///
/// Boundaries belong to the lower band: 10 °C is cold and 25 °C is mild.
/// NaN compares false against both bounds and lands in `Hot`.
pub fn classify(temperature_celsius: f64) -> TemperatureBand {
    if temperature_celsius <= COLD_MAX_CELSIUS {
        TemperatureBand::Cold
    } else if temperature_celsius <= MILD_MAX_CELSIUS {
        TemperatureBand::Mild
    } else {
        TemperatureBand::Hot
    }
}
