// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Infrared voltage to distance conversion
//!
//! The infrared sensors are read through a voltage divider. The distance is estimated from
//! the sensor side voltage with an empirical fourth degree polynomial fitted to one sensor
//! model.

/// Reference voltage divider resistances in ohm
pub const REFERENCE_DIVIDER_R1: f64 = 1000.0;
pub const REFERENCE_DIVIDER_R2: f64 = 1000.0;

/// Reference polynomial coefficients, highest power first
pub const REFERENCE_COEFFICIENTS: [f64; 5] = [0.0359, -0.2865, 0.83788, -1.1055, 0.6436];

/// Calibration of an infrared sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrCalibration {
    /// Upper resistance of the voltage divider
    pub divider_r1: f64,
    /// Lower resistance of the voltage divider, across which the voltage is measured
    pub divider_r2: f64,
    /// Coefficients of the distance polynomial, highest power first
    pub coefficients: [f64; 5],
}

impl Default for IrCalibration {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl IrCalibration {
    pub const REFERENCE: IrCalibration = IrCalibration {
        divider_r1: REFERENCE_DIVIDER_R1,
        divider_r2: REFERENCE_DIVIDER_R2,
        coefficients: REFERENCE_COEFFICIENTS,
    };

    /// Factor between the measured voltage and the voltage at the sensor output
    pub fn divider_ratio(&self) -> f64 {
        (self.divider_r1 + self.divider_r2) / self.divider_r2
    }

    /// Estimate the distance seen by the sensor from the measured voltage.
    ///
    /// Total for any input. Outside the fitted range the result is not meaningful
    /// and may even be negative.
    pub fn convert_to_distance(&self, voltage: f32) -> f64 {
        let sensor_voltage = self.divider_ratio() * f64::from(voltage);
        let degree = self.coefficients.len() as i32 - 1;

        self.coefficients
            .iter()
            .enumerate()
            .fold(0.0, |distance, (i, coefficient)| {
                distance + coefficient * sensor_voltage.powi(degree - i as i32)
            })
    }
}

/// Convert with the reference calibration.
pub fn convert_to_distance(voltage: f32) -> f64 {
    IrCalibration::REFERENCE.convert_to_distance(voltage)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_voltage_yields_constant_term() {
        assert_eq!(convert_to_distance(0.0), 0.6436);
    }

    #[test]
    fn reference_divider_doubles() {
        assert_eq!(IrCalibration::default().divider_ratio(), 2.0);
    }

    #[test]
    fn matches_polynomial() {
        // 0.5 V measured is 1.0 V at the sensor, so the distance is the sum of the coefficients.
        let expected: f64 = REFERENCE_COEFFICIENTS.iter().sum();
        assert!((convert_to_distance(0.5) - expected).abs() < 1e-12);
        assert!((convert_to_distance(0.5) - 0.12538).abs() < 1e-9);
    }

    #[test]
    fn reproducible() {
        for voltage in [0.0, 0.1, 0.37, 0.8, 1.2, -0.4, 3.3] {
            assert_eq!(
                convert_to_distance(voltage).to_bits(),
                convert_to_distance(voltage).to_bits()
            );
        }
    }

    #[test]
    fn custom_calibration() {
        let calibration = IrCalibration {
            divider_r1: 0.0,
            divider_r2: 1000.0,
            coefficients: [0.0, 0.0, 0.0, 2.0, 1.0],
        };
        assert_eq!(calibration.divider_ratio(), 1.0);
        assert_eq!(calibration.convert_to_distance(0.5), 2.0);
    }
}
