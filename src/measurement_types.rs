//! # Measurement Types Module
//!
//! This module defines the core types used for measurement tagging and conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::measurement_errors::MeasurementError;

/// A numeric modifier paired with the unit it modifies
///
/// `value` is the raw lemma of the modifier token (e.g. "3", "two") and is
/// not guaranteed to be numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Measurement {
    /// The literal value (e.g., "1609.34", "two")
    pub value: String,
    /// The unit name (e.g., "mile", "light year", "m")
    pub unit: String,
}

impl Measurement {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// One physical quantity spread across two unit phrases (e.g. "3 foot 7 inch")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundMeasurement(pub Measurement, pub Measurement);

impl CompoundMeasurement {
    pub fn new(first: Measurement, second: Measurement) -> Self {
        Self(first, second)
    }

    /// Both components, in the order they were tagged
    pub fn parts(&self) -> [&Measurement; 2] {
        [&self.0, &self.1]
    }
}

impl fmt::Display for CompoundMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

/// An item produced by the tagger and passed through the converter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaggedMeasurement {
    /// A single value/unit pair
    Single(Measurement),
    /// A two-part measurement whose components are summed on conversion
    Compound(CompoundMeasurement),
}

impl From<Measurement> for TaggedMeasurement {
    fn from(measurement: Measurement) -> Self {
        TaggedMeasurement::Single(measurement)
    }
}

impl From<CompoundMeasurement> for TaggedMeasurement {
    fn from(compound: CompoundMeasurement) -> Self {
        TaggedMeasurement::Compound(compound)
    }
}

impl fmt::Display for TaggedMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaggedMeasurement::Single(m) => m.fmt(f),
            TaggedMeasurement::Compound(c) => c.fmt(f),
        }
    }
}

/// The kinds of physical quantity the extractor can normalize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Distance,
    Mass,
    Time,
    Volume,
    Energy,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 5] = [
        MeasurementKind::Distance,
        MeasurementKind::Mass,
        MeasurementKind::Time,
        MeasurementKind::Volume,
        MeasurementKind::Energy,
    ];

    /// The unit every measurement of this kind is normalized to
    pub fn standard_unit(&self) -> &'static str {
        match self {
            MeasurementKind::Distance => "m",
            MeasurementKind::Mass => "g",
            MeasurementKind::Time => "s",
            MeasurementKind::Volume => "cubic_meter",
            MeasurementKind::Energy => "J",
        }
    }

    /// Single-letter code used on the command line
    pub fn code(&self) -> char {
        match self {
            MeasurementKind::Distance => 'd',
            MeasurementKind::Mass => 'm',
            MeasurementKind::Time => 't',
            MeasurementKind::Volume => 'v',
            MeasurementKind::Energy => 'e',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MeasurementKind::Distance => "distance",
            MeasurementKind::Mass => "mass",
            MeasurementKind::Time => "time",
            MeasurementKind::Volume => "volume",
            MeasurementKind::Energy => "energy",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MeasurementKind {
    type Err = MeasurementError;

    /// Accepts either the single-letter code or the full name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        MeasurementKind::ALL
            .into_iter()
            .find(|kind| lowered == kind.name() || lowered == kind.code().to_string())
            .ok_or_else(|| MeasurementError::Config(format!("unknown measurement kind '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_display() {
        assert_eq!(Measurement::new("3", "foot").to_string(), "3 foot");
        let compound = CompoundMeasurement::new(
            Measurement::new("3", "foot"),
            Measurement::new("7", "inch"),
        );
        assert_eq!(compound.to_string(), "3 foot 7 inch");
    }

    #[test]
    fn test_measurement_equality_is_structural() {
        assert_eq!(Measurement::new("1", "mile"), Measurement::new("1", "mile"));
        assert_ne!(Measurement::new("1", "mile"), Measurement::new("1", "foot"));
    }

    #[test]
    fn test_kind_from_code_and_name() {
        assert_eq!("d".parse::<MeasurementKind>().unwrap(), MeasurementKind::Distance);
        assert_eq!("Volume".parse::<MeasurementKind>().unwrap(), MeasurementKind::Volume);
        assert_eq!("e".parse::<MeasurementKind>().unwrap(), MeasurementKind::Energy);
        assert!("x".parse::<MeasurementKind>().is_err());
    }

    #[test]
    fn test_standard_units() {
        assert_eq!(MeasurementKind::Distance.standard_unit(), "m");
        assert_eq!(MeasurementKind::Mass.standard_unit(), "g");
        assert_eq!(MeasurementKind::Time.standard_unit(), "s");
    }

    #[test]
    fn test_tagged_serializes_untagged() {
        let single = TaggedMeasurement::from(Measurement::new("1609.34", "m"));
        let json = serde_json::to_string(&single).unwrap();
        assert_eq!(json, r#"{"value":"1609.34","unit":"m"}"#);
    }
}
