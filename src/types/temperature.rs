// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature types for heating control.
//!
//! The remote API transports temperatures as numeric strings. A current
//! temperature of `0` is the API's sentinel for "unknown", so readings must
//! be strictly positive to be accepted.

use std::fmt;

use crate::error::ValueError;

/// Parses a numeric attribute string into a finite `f64`.
fn parse_finite(raw: &str) -> Result<f64, ValueError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValueError::NotANumber(raw.to_string())),
    }
}

/// Heating set point in degrees Celsius, within `[5, 40]`.
///
/// # Examples
///
/// ```
/// use smartprugio_lib::types::TargetTemperature;
///
/// let t = TargetTemperature::new(22.0).unwrap();
/// assert_eq!(t.value(), 22.0);
///
/// assert!(TargetTemperature::new(4.0).is_err());
/// assert!(TargetTemperature::parse("-").is_err());
///
/// // UI set points are rounded to whole degrees
/// let t = TargetTemperature::from_setpoint(21.6).unwrap();
/// assert_eq!(t.value(), 22.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TargetTemperature(f64);

impl TargetTemperature {
    /// Lowest accepted set point.
    pub const MIN: f64 = 5.0;
    /// Highest accepted set point.
    pub const MAX: f64 = 40.0;
    /// Granularity exposed to the UI layer.
    pub const STEP: f64 = 1.0;
    /// Set point assumed before the first successful read.
    pub const DEFAULT: Self = Self(22.0);

    /// Creates a set point.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotANumber` for non-finite input and
    /// `ValueError::OutOfRange` outside `[5, 40]`.
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::NotANumber(value.to_string()));
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValueError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Creates a set point from a UI value, rounding to the nearest degree.
    ///
    /// # Errors
    ///
    /// Same as [`TargetTemperature::new`], applied to the rounded value.
    pub fn from_setpoint(value: f64) -> Result<Self, ValueError> {
        Self::new(value.round())
    }

    /// Parses an `HTEMPERATURE` attribute value.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not a finite number within range.
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        Self::new(parse_finite(raw)?)
    }

    /// Returns the set point in degrees.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl Default for TargetTemperature {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TargetTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Measured room temperature in degrees Celsius, strictly positive.
///
/// # Examples
///
/// ```
/// use smartprugio_lib::types::CurrentTemperature;
///
/// assert_eq!(CurrentTemperature::parse("23.5").unwrap().value(), 23.5);
/// assert!(CurrentTemperature::parse("0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CurrentTemperature(f64);

impl CurrentTemperature {
    /// Reading assumed before the first successful read.
    pub const DEFAULT: Self = Self(20.0);

    /// Creates a reading.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotANumber` for non-finite input and
    /// `ValueError::NotPositive` for zero or negative readings.
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::NotANumber(value.to_string()));
        }
        if value <= 0.0 {
            return Err(ValueError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Parses a `CTEMPERATURE` attribute value.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not a finite, positive number.
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        Self::new(parse_finite(raw)?)
    }

    /// Returns the reading in degrees.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl Default for CurrentTemperature {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CurrentTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_temperature_bounds_are_inclusive() {
        assert!(TargetTemperature::new(5.0).is_ok());
        assert!(TargetTemperature::new(40.0).is_ok());
        assert!(TargetTemperature::new(4.9).is_err());
        assert!(TargetTemperature::new(40.1).is_err());
    }

    #[test]
    fn target_temperature_rejects_non_finite() {
        assert!(matches!(
            TargetTemperature::new(f64::NAN),
            Err(ValueError::NotANumber(_))
        ));
        assert!(TargetTemperature::new(f64::INFINITY).is_err());
    }

    #[test]
    fn target_temperature_parse() {
        assert_eq!(TargetTemperature::parse("25").unwrap().value(), 25.0);
        assert_eq!(TargetTemperature::parse(" 18.5 ").unwrap().value(), 18.5);
        assert!(matches!(
            TargetTemperature::parse("-"),
            Err(ValueError::NotANumber(_))
        ));
        assert!(matches!(
            TargetTemperature::parse("0"),
            Err(ValueError::OutOfRange { .. })
        ));
        assert!(TargetTemperature::parse("NaN").is_err());
    }

    #[test]
    fn target_temperature_from_setpoint_rounds() {
        assert_eq!(TargetTemperature::from_setpoint(22.4).unwrap().value(), 22.0);
        assert_eq!(TargetTemperature::from_setpoint(22.5).unwrap().value(), 23.0);
        // Rounds into range
        assert_eq!(TargetTemperature::from_setpoint(4.6).unwrap().value(), 5.0);
        assert!(TargetTemperature::from_setpoint(40.6).is_err());
    }

    #[test]
    fn target_temperature_display_has_no_fraction_for_whole_degrees() {
        assert_eq!(TargetTemperature::new(22.0).unwrap().to_string(), "22");
    }

    #[test]
    fn current_temperature_requires_positive() {
        assert_eq!(CurrentTemperature::parse("23.5").unwrap().value(), 23.5);
        assert!(matches!(
            CurrentTemperature::parse("0"),
            Err(ValueError::NotPositive(_))
        ));
        assert!(CurrentTemperature::parse("-3").is_err());
        assert!(CurrentTemperature::parse("").is_err());
    }

    #[test]
    fn defaults() {
        assert_eq!(TargetTemperature::default().value(), 22.0);
        assert_eq!(CurrentTemperature::default().value(), 20.0);
    }
}
