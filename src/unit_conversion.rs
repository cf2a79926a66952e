//! # Unit Conversion Module
//!
//! Conversion factors from concrete units to the standard unit of each
//! [`MeasurementKind`]. The converter depends only on the [`UnitConversion`]
//! trait so tables can be swapped or extended per kind.

use log::trace;
use std::collections::HashMap;

use crate::measurement_errors::MeasurementError;
use crate::measurement_types::MeasurementKind;

/// Converts a raw value/unit pair to the standard unit of a kind
pub trait UnitConversion {
    /// Fails with [`MeasurementError::Conversion`] when `value` is not numeric
    /// or `unit` is unknown for `kind`.
    fn to_standard(
        &self,
        value: &str,
        unit: &str,
        kind: MeasurementKind,
    ) -> Result<f64, MeasurementError>;
}

const DISTANCE_FACTORS: &[(&str, f64)] = &[
    ("m", 1.0),
    ("meter", 1.0),
    ("metre", 1.0),
    ("km", 1000.0),
    ("kilometer", 1000.0),
    ("kilometre", 1000.0),
    ("klick", 1000.0),
    ("cm", 0.01),
    ("centimeter", 0.01),
    ("centimetre", 0.01),
    ("mm", 0.001),
    ("millimeter", 0.001),
    ("millimetre", 0.001),
    ("micron", 1e-6),
    ("micrometer", 1e-6),
    ("nm", 1e-9),
    ("nanometer", 1e-9),
    ("nanometre", 1e-9),
    ("inch", 0.0254),
    ("foot", 0.3048),
    ("feet", 0.3048),
    ("ft", 0.3048),
    ("yard", 0.9144),
    ("yd", 0.9144),
    ("mile", 1609.344),
    ("statute mile", 1609.344),
    ("land mile", 1609.344),
    ("furlong", 201.168),
    ("chain", 20.1168),
    ("rod", 5.0292),
    ("perch", 5.0292),
    ("pole", 5.0292),
    ("fathom", 1.8288),
    ("fthm", 1.8288),
    ("nautical mile", 1852.0),
    ("sea mile", 1852.0),
    ("league", 4828.032),
    ("cable length", 185.2),
    ("cable's length", 185.2),
    ("light year", 9.460_730_472_580_8e15),
    ("astronomical unit", 1.495_978_707e11),
    ("au", 1.495_978_707e11),
    ("parsec", 3.085_677_581_491_367e16),
    ("secpar", 3.085_677_581_491_367e16),
];

const MASS_FACTORS: &[(&str, f64)] = &[
    ("g", 1.0),
    ("gm", 1.0),
    ("gram", 1.0),
    ("gramme", 1.0),
    ("kg", 1000.0),
    ("kilo", 1000.0),
    ("kilogram", 1000.0),
    ("kilogramme", 1000.0),
    ("mg", 0.001),
    ("milligram", 0.001),
    ("milligramme", 0.001),
    ("mcg", 1e-6),
    ("microgram", 1e-6),
    ("t", 1e6),
    ("tonne", 1e6),
    ("metric ton", 1e6),
    ("lb", 453.592_37),
    ("pound", 453.592_37),
    ("oz", 28.349_523_125),
    ("ounce", 28.349_523_125),
    ("stone", 6350.293_18),
    ("ton", 907_184.74),
    ("short ton", 907_184.74),
    ("net ton", 907_184.74),
    ("long ton", 1_016_046.908_8),
    ("gross ton", 1_016_046.908_8),
    ("grain", 0.064_798_91),
    ("dram", 1.771_845_195_312_5),
    ("drachm", 1.771_845_195_312_5),
    ("hundredweight", 45_359.237),
    ("cwt", 45_359.237),
    ("troy ounce", 31.103_476_8),
    ("apothecaries' ounce", 31.103_476_8),
    ("carat", 0.2),
];

const TIME_FACTORS: &[(&str, f64)] = &[
    ("s", 1.0),
    ("sec", 1.0),
    ("second", 1.0),
    ("ms", 0.001),
    ("msec", 0.001),
    ("millisecond", 0.001),
    ("microsecond", 1e-6),
    ("ns", 1e-9),
    ("nanosecond", 1e-9),
    ("min", 60.0),
    ("minute", 60.0),
    ("hr", 3600.0),
    ("hour", 3600.0),
    ("day", 86_400.0),
    ("solar day", 86_400.0),
    ("twenty four hours", 86_400.0),
    ("week", 604_800.0),
    ("hebdomad", 604_800.0),
    ("fortnight", 1_209_600.0),
    ("two weeks", 1_209_600.0),
    // mean synodic month, 29.530589 days
    ("lunar month", 2_551_442.889_6),
    ("lunation", 2_551_442.889_6),
    ("synodic month", 2_551_442.889_6),
    ("moon", 2_551_442.889_6),
    // average Gregorian month and Julian year
    ("month", 2_629_800.0),
    ("calendar month", 2_629_800.0),
    ("quarter", 7_889_400.0),
    ("year", 31_557_600.0),
    ("yr", 31_557_600.0),
    ("twelvemonth", 31_557_600.0),
    ("decade", 315_576_000.0),
    ("decennary", 315_576_000.0),
    ("decennium", 315_576_000.0),
    ("century", 3_155_760_000.0),
    ("millennium", 31_557_600_000.0),
    ("millenary", 31_557_600_000.0),
];

const VOLUME_FACTORS: &[(&str, f64)] = &[
    ("cubic meter", 1.0),
    ("cubic metre", 1.0),
    ("l", 0.001),
    ("liter", 0.001),
    ("litre", 0.001),
    ("ml", 1e-6),
    ("mil", 1e-6),
    ("milliliter", 1e-6),
    ("millilitre", 1e-6),
    ("cl", 1e-5),
    ("centiliter", 1e-5),
    ("centilitre", 1e-5),
    ("dl", 1e-4),
    ("deciliter", 1e-4),
    ("decilitre", 1e-4),
    ("cc", 1e-6),
    ("cubic centimeter", 1e-6),
    ("cubic centimetre", 1e-6),
    ("cubic foot", 0.028_316_846_592),
    ("cu ft", 0.028_316_846_592),
    ("cubic inch", 1.638_706_4e-5),
    ("cu in", 1.638_706_4e-5),
    ("gallon", 0.003_785_411_784),
    ("gal", 0.003_785_411_784),
    ("quart", 0.000_946_352_946),
    ("qt", 0.000_946_352_946),
    ("pint", 0.000_473_176_473),
    ("pt", 0.000_473_176_473),
    ("cup", 0.000_236_588_236_5),
    ("fluid ounce", 2.957_352_956_25e-5),
    ("fl oz", 2.957_352_956_25e-5),
    ("tablespoon", 1.478_676_478_125e-5),
    ("tbsp", 1.478_676_478_125e-5),
    ("teaspoon", 4.928_921_593_75e-6),
    ("tsp", 4.928_921_593_75e-6),
    ("barrel", 0.158_987_294_928),
    ("bbl", 0.158_987_294_928),
    // imperial quarter, eight bushels
    ("quarter", 0.290_949_76),
];

const ENERGY_FACTORS: &[(&str, f64)] = &[
    ("j", 1.0),
    ("joule", 1.0),
    ("watt second", 1.0),
    ("kj", 1000.0),
    ("kilojoule", 1000.0),
    ("calorie", 4.184),
    ("gram calorie", 4.184),
    ("small calorie", 4.184),
    ("kcal", 4184.0),
    ("kilocalorie", 4184.0),
    ("large calorie", 4184.0),
    ("ev", 1.602_176_634e-19),
    ("electron volt", 1.602_176_634e-19),
    ("erg", 1e-7),
    ("btu", 1055.055_852_62),
    ("british thermal unit", 1055.055_852_62),
    ("watt hour", 3600.0),
    ("kwh", 3.6e6),
    ("kilowatt hour", 3.6e6),
    ("therm", 105_480_400.0),
    ("foot pound", 1.355_817_948_331_400_4),
];

fn builtin_factors(kind: MeasurementKind) -> &'static [(&'static str, f64)] {
    match kind {
        MeasurementKind::Distance => DISTANCE_FACTORS,
        MeasurementKind::Mass => MASS_FACTORS,
        MeasurementKind::Time => TIME_FACTORS,
        MeasurementKind::Volume => VOLUME_FACTORS,
        MeasurementKind::Energy => ENERGY_FACTORS,
    }
}

/// Unit keys are compared lowercase, with `_` and `-` read as spaces
pub fn normalize_unit(unit: &str) -> String {
    unit.replace(['_', '-'], " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a modifier value as a finite number
pub fn parse_value(value: &str) -> Result<f64, MeasurementError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MeasurementError::Conversion(format!("'{value}' is not numeric")))
}

/// Multiplicative factors to the standard unit, one table per kind
#[derive(Debug, Clone, Default)]
pub struct ConversionTable {
    factors: HashMap<MeasurementKind, HashMap<String, f64>>,
}

impl ConversionTable {
    /// An empty table; every conversion fails until units are added
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables for all kinds shipped with the crate
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for kind in MeasurementKind::ALL {
            for (unit, factor) in builtin_factors(kind) {
                table.insert(kind, unit, *factor);
            }
        }
        table
    }

    /// Add or replace a unit
    pub fn insert(&mut self, kind: MeasurementKind, unit: &str, factor: f64) {
        self.factors
            .entry(kind)
            .or_default()
            .insert(normalize_unit(unit), factor);
    }

    pub fn with_unit(mut self, kind: MeasurementKind, unit: &str, factor: f64) -> Self {
        self.insert(kind, unit, factor);
        self
    }

    /// Factor of `unit` for `kind`, if known
    pub fn factor(&self, kind: MeasurementKind, unit: &str) -> Option<f64> {
        self.factors
            .get(&kind)
            .and_then(|units| units.get(&normalize_unit(unit)))
            .copied()
    }
}

impl UnitConversion for ConversionTable {
    fn to_standard(
        &self,
        value: &str,
        unit: &str,
        kind: MeasurementKind,
    ) -> Result<f64, MeasurementError> {
        let factor = self.factor(kind, unit).ok_or_else(|| {
            MeasurementError::Conversion(format!("unknown {kind} unit '{unit}'"))
        })?;
        let amount = parse_value(value)?;
        let standard = amount * factor;
        trace!("{} {} -> {} {}", value, unit, standard, kind.standard_unit());
        Ok(standard)
    }
}
