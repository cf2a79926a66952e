use measure_extract::converter::Converter;
use measure_extract::measurement_errors::MeasurementError;
use measure_extract::measurement_types::{
    CompoundMeasurement, Measurement, MeasurementKind, TaggedMeasurement,
};
use measure_extract::unit_conversion::UnitConversion;

fn single(value: &str, unit: &str) -> TaggedMeasurement {
    Measurement::new(value, unit).into()
}

fn feet_inches(feet: &str, inches: &str) -> TaggedMeasurement {
    CompoundMeasurement::new(Measurement::new(feet, "foot"), Measurement::new(inches, "inch")).into()
}

/// Knows exactly one unit per kind, worth 10 standard units
struct TenfoldProvider;

impl UnitConversion for TenfoldProvider {
    fn to_standard(
        &self,
        value: &str,
        unit: &str,
        _kind: MeasurementKind,
    ) -> Result<f64, MeasurementError> {
        if unit != "decade" {
            return Err(MeasurementError::Conversion(format!("unknown unit {unit}")));
        }
        value
            .parse::<f64>()
            .map(|v| v * 10.0)
            .map_err(|e| MeasurementError::Conversion(e.to_string()))
    }
}

#[test]
fn test_compound_conversion_sums_parts() {
    let converter = Converter::builtin(MeasurementKind::Distance, false);
    let converted: Vec<_> = converter
        .convert(vec![feet_inches("3", "7"), feet_inches("6", "7"), feet_inches("6", "10")])
        .collect();

    assert_eq!(
        converted,
        vec![single("1.09", "m"), single("2.01", "m"), single("2.08", "m")]
    );
}

#[test]
fn test_pass_through_on_failure() {
    let keep = Converter::builtin(MeasurementKind::Distance, true);
    let converted: Vec<_> = keep.convert(vec![single("two", "foot")]).collect();
    assert_eq!(converted, vec![single("two", "foot")]);

    let drop = Converter::builtin(MeasurementKind::Distance, false);
    assert_eq!(drop.convert(vec![single("two", "foot")]).count(), 0);
}

#[test]
fn test_mixed_batch_keeps_order() {
    let converter = Converter::builtin(MeasurementKind::Distance, true);
    let converted: Vec<_> = converter
        .convert(vec![
            single("5", "mile"),
            single("several", "league"),
            feet_inches("1", "0"),
        ])
        .collect();

    assert_eq!(
        converted,
        vec![
            single("8046.72", "m"),
            single("several", "league"),
            single("0.3", "m"),
        ]
    );
}

#[test]
fn test_other_kinds() {
    let mass = Converter::builtin(MeasurementKind::Mass, false);
    assert_eq!(mass.convert_one(single("2", "pound")), Some(single("907.18", "g")));

    let time = Converter::builtin(MeasurementKind::Time, false);
    assert_eq!(time.convert_one(single("1.5", "hour")), Some(single("5400.0", "s")));

    let energy = Converter::builtin(MeasurementKind::Energy, false);
    assert_eq!(energy.convert_one(single("3", "kilocalorie")), Some(single("12552.0", "J")));

    let volume = Converter::builtin(MeasurementKind::Volume, false);
    assert_eq!(volume.convert_one(single("500", "liter")), Some(single("0.5", "cubic_meter")));
}

#[test]
fn test_pluggable_provider() {
    let converter = Converter::new(MeasurementKind::Time, TenfoldProvider, false);
    assert_eq!(converter.convert_one(single("3", "decade")), Some(single("30.0", "s")));
    assert_eq!(converter.convert_one(single("3", "year")), None);
}
