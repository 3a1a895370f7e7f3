//! NTC thermistor on an ADC pin
//!
//! The only board sensor that bypasses the I2C bus: the thermistor
//! sits in a voltage divider read by a 10-bit ADC. Temperature comes
//! from a lookup table precomputed with the beta equation
//! (B = 3935 K, T0 = 25 degC at the divider midpoint), interpolated
//! linearly between entries. Integer-only at runtime.

/// Full-scale value of the 10-bit ADC
const ADC_MAX: u16 = 1023;

/// (adc_counts, temperature_x10) pairs, sorted by increasing counts
///
/// Low counts mean high thermistor resistance (cold). The divider
/// midpoint (512 of 1023) is the 25 degC reference.
const TEMP_TABLE: &[(u16, i16)] = &[
    (30, -375),
    (60, -268),
    (100, -180),
    (150, -101),
    (200, -39),
    (260, 25),
    (320, 82),
    (380, 136),
    (440, 188),
    (512, 250),
    (580, 312),
    (650, 381),
    (720, 459),
    (780, 539),
    (840, 639),
    (900, 779),
    (950, 970),
    (990, 1285),
];

/// Errors from the thermistor conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Reading pinned at the low rail: thermistor disconnected
    OpenCircuit,
    /// Reading pinned at the high rail: thermistor shorted
    ShortCircuit,
    /// ADC conversion failed
    ConversionError,
}

/// ADC reading seam for platform abstraction
pub trait AdcReader {
    /// Read the ADC value (10-bit, 0-1023)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// NTC thermistor sensor with B = 3935
pub struct NtcSensor<ADC> {
    adc: ADC,
}

impl<ADC> NtcSensor<ADC> {
    pub fn new(adc: ADC) -> Self {
        Self { adc }
    }

    /// Convert an ADC reading to temperature in 0.1 degC units
    ///
    /// Readings outside the table are at a divider rail, which means
    /// a wiring fault rather than a plausible temperature.
    pub fn counts_to_temp_x10(counts: u16) -> Result<i16, SensorError> {
        let (first, last) = (TEMP_TABLE[0], TEMP_TABLE[TEMP_TABLE.len() - 1]);
        if counts < first.0 {
            return Err(SensorError::OpenCircuit);
        }
        if counts > last.0 || counts > ADC_MAX {
            return Err(SensorError::ShortCircuit);
        }

        for window in TEMP_TABLE.windows(2) {
            let (c_low, t_low) = window[0];
            let (c_high, t_high) = window[1];
            if counts >= c_low && counts <= c_high {
                let c_range = i32::from(c_high - c_low);
                let t_range = i32::from(t_high) - i32::from(t_low);
                let offset = i32::from(counts - c_low);
                return Ok(t_low + (t_range * offset / c_range) as i16);
            }
        }

        // Unreachable: the bounds checks above pin counts inside the table
        Err(SensorError::ConversionError)
    }
}

impl<ADC: AdcReader> NtcSensor<ADC> {
    /// Read the temperature in 0.1 degC units
    pub fn read_celsius_x10(&mut self) -> Result<i16, SensorError> {
        let counts = self
            .adc
            .read()
            .map_err(|_| SensorError::ConversionError)?;
        Self::counts_to_temp_x10(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyAdc(u16);

    impl AdcReader for DummyAdc {
        fn read(&mut self) -> Result<u16, ()> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_divider_midpoint_is_25c() {
        assert_eq!(NtcSensor::<DummyAdc>::counts_to_temp_x10(512).unwrap(), 250);
    }

    #[test]
    fn test_interpolation_between_entries() {
        // Halfway between (440, 188) and (512, 250)
        let temp = NtcSensor::<DummyAdc>::counts_to_temp_x10(476).unwrap();
        assert_eq!(temp, 219);
    }

    #[test]
    fn test_monotonic_over_full_range() {
        let mut last = NtcSensor::<DummyAdc>::counts_to_temp_x10(30).unwrap();
        for counts in 31..=990 {
            let temp = NtcSensor::<DummyAdc>::counts_to_temp_x10(counts).unwrap();
            assert!(temp >= last, "non-monotonic at {counts}");
            last = temp;
        }
    }

    #[test]
    fn test_rail_readings_are_faults() {
        assert_eq!(
            NtcSensor::<DummyAdc>::counts_to_temp_x10(5),
            Err(SensorError::OpenCircuit)
        );
        assert_eq!(
            NtcSensor::<DummyAdc>::counts_to_temp_x10(1020),
            Err(SensorError::ShortCircuit)
        );
    }

    #[test]
    fn test_read_through_adc() {
        let mut sensor = NtcSensor::new(DummyAdc(512));
        assert_eq!(sensor.read_celsius_x10().unwrap(), 250);
    }
}
