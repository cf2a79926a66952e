//! # Converter Module
//!
//! Normalises tagged measurements into the standard unit of their kind.
//! Compound measurements are summed part by part. Items that cannot be
//! converted are either passed through untouched or dropped, depending on
//! `return_unconverted`.

use log::debug;

use crate::measurement_errors::MeasurementError;
use crate::measurement_types::{Measurement, MeasurementKind, TaggedMeasurement};
use crate::unit_conversion::{ConversionTable, UnitConversion};
use crate::utils::two_round;

/// Converts measurements of one kind to its standard unit
#[derive(Debug, Clone)]
pub struct Converter<P = ConversionTable> {
    kind: MeasurementKind,
    standard_unit: &'static str,
    provider: P,
    return_unconverted: bool,
}

impl Converter<ConversionTable> {
    /// A converter backed by the built-in conversion tables
    pub fn builtin(kind: MeasurementKind, return_unconverted: bool) -> Self {
        Self::new(kind, ConversionTable::builtin(), return_unconverted)
    }
}

impl<P: UnitConversion> Converter<P> {
    pub fn new(kind: MeasurementKind, provider: P, return_unconverted: bool) -> Self {
        Self {
            kind,
            standard_unit: kind.standard_unit(),
            provider,
            return_unconverted,
        }
    }

    pub fn kind(&self) -> MeasurementKind {
        self.kind
    }

    pub fn standard_unit(&self) -> &'static str {
        self.standard_unit
    }

    /// Convert a sequence of tagged measurements
    ///
    /// The returned iterator is lazy: each item is converted when it is pulled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use measure_extract::converter::Converter;
    /// use measure_extract::measurement_types::{Measurement, MeasurementKind, TaggedMeasurement};
    ///
    /// let converter = Converter::builtin(MeasurementKind::Distance, false);
    /// let items = vec![TaggedMeasurement::from(Measurement::new("1", "mile"))];
    /// let converted: Vec<_> = converter.convert(items).collect();
    ///
    /// assert_eq!(converted, vec![TaggedMeasurement::from(Measurement::new("1609.34", "m"))]);
    /// ```
    pub fn convert<'a, I>(&'a self, items: I) -> impl Iterator<Item = TaggedMeasurement> + 'a
    where
        I: IntoIterator<Item = TaggedMeasurement>,
        I::IntoIter: 'a,
    {
        items.into_iter().filter_map(move |item| self.convert_one(item))
    }

    /// Convert one item, applying the pass-through policy on failure
    pub fn convert_one(&self, item: TaggedMeasurement) -> Option<TaggedMeasurement> {
        match self.standard_value(&item) {
            Ok(value) => Some(Measurement::new(two_round(value), self.standard_unit).into()),
            Err(err) => {
                debug!("Could not convert '{}': {}", item, err);
                self.return_unconverted.then_some(item)
            }
        }
    }

    /// Value of `item` in the standard unit, summing compound parts
    pub fn standard_value(&self, item: &TaggedMeasurement) -> Result<f64, MeasurementError> {
        match item {
            TaggedMeasurement::Single(measurement) => self.to_standard(measurement),
            TaggedMeasurement::Compound(compound) => compound
                .parts()
                .into_iter()
                .map(|part| self.to_standard(part))
                .sum(),
        }
    }

    fn to_standard(&self, measurement: &Measurement) -> Result<f64, MeasurementError> {
        self.provider
            .to_standard(&measurement.value, &measurement.unit, self.kind)
    }
}
