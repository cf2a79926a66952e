//! # Text Processing Module
//!
//! This module rewrites raw lines of text into the lexical form the measurement
//! tagger expects, before the line is handed to an external dependency parser.
//!
//! ## Features
//!
//! - Splitting of numbers glued to words ("12feet" -> "12 feet")
//! - Thousands separator removal in numeric tokens ("5,000" -> "5000")
//! - Feet and inch punctuation expansion for distances ("3'7\"" -> "3 foot 7 inch")
//! - Removal of words that confuse the tagger for time and volume ("moon", "quarter")
//!
//! Every measurement kind owns a fixed, ordered list of token rules; the
//! [`Formatter`] picks that list by kind.

use log::{debug, trace};

use crate::measurement_patterns::{COMMA_NUMBER_REGEX, FEET_INCHES_REGEX, SPLIT_NUMERALS_REGEX};
use crate::measurement_types::MeasurementKind;
use crate::utils::{flatten, map_funcs};

/// A rewrite applied to one whitespace-delimited token
pub type TokenRule = fn(&str) -> String;

const DISTANCE_RULES: &[TokenRule] = &[remove_commas, replace_feet_inches, replace_ft];
const MASS_RULES: &[TokenRule] = &[remove_commas];
const TIME_RULES: &[TokenRule] = &[remove_commas, remove_quarter, remove_moon];
const VOLUME_RULES: &[TokenRule] = &[remove_commas, remove_quarter];
const ENERGY_RULES: &[TokenRule] = &[remove_commas];

/// The ordered token rules for a measurement kind
pub fn rules_for(kind: MeasurementKind) -> &'static [TokenRule] {
    match kind {
        MeasurementKind::Distance => DISTANCE_RULES,
        MeasurementKind::Mass => MASS_RULES,
        MeasurementKind::Time => TIME_RULES,
        MeasurementKind::Volume => VOLUME_RULES,
        MeasurementKind::Energy => ENERGY_RULES,
    }
}

/// Line formatter for one measurement kind
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    kind: MeasurementKind,
    rules: &'static [TokenRule],
}

impl Formatter {
    /// Create a formatter using the rule set of `kind`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use measure_extract::measurement_types::MeasurementKind;
    /// use measure_extract::text_processing::Formatter;
    ///
    /// let formatter = Formatter::new(MeasurementKind::Distance);
    /// assert_eq!(formatter.format("I live 5,000 ft away"), "i live 5000 foot away");
    /// ```
    pub fn new(kind: MeasurementKind) -> Self {
        Self {
            kind,
            rules: rules_for(kind),
        }
    }

    pub fn kind(&self) -> MeasurementKind {
        self.kind
    }

    /// Format a line of text for tagging
    ///
    /// The line is lowercased and split on whitespace, glued numerals are split,
    /// then every token goes through the kind's rules. Tokens emptied by a rule
    /// are dropped and the result is joined with single spaces.
    pub fn format(&self, line: &str) -> String {
        let lowered = line.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        let split_tokens = flatten(tokens.into_iter().map(split_numerals).collect());

        let formatted = split_tokens
            .iter()
            .map(|token| map_funcs(token, self.rules))
            .flat_map(|token| {
                token
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .join(" ");

        trace!("Formatted {} line: '{}' -> '{}'", self.kind, line.trim(), formatted);
        formatted
    }
}

/// Split conjoined numeric and alphabetic runs
///
/// "1aa1" -> ["1", "aa", "1"], "12feetlong" -> ["12", "feetlong"].
/// Anything else is returned unchanged as a single element.
pub fn split_numerals(token: &str) -> Vec<String> {
    match SPLIT_NUMERALS_REGEX.captures(token) {
        Some(caps) => caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str().to_string())
            .collect(),
        None => vec![token.to_string()],
    }
}

/// Remove thousands separators from numeric tokens
///
/// "5,000" -> "5000", "(5,000)" -> "(5000)". Tokens mixing words and digits
/// are left as they are.
pub fn remove_commas(token: &str) -> String {
    if COMMA_NUMBER_REGEX.is_match(token) {
        token.replace(',', "")
    } else {
        token.to_string()
    }
}

/// Replace feet and inch punctuation marks with words
///
/// "3'7\"" -> "3 foot 7 inch", "3'" -> "3 foot ", "3'6" -> "3 foot 6 inch".
/// A bare double quote without an apostrophe ("3\"") is not rewritten.
pub fn replace_feet_inches(token: &str) -> String {
    if !FEET_INCHES_REGEX.is_match(token) {
        return token.to_string();
    }

    let mut replaced = token.replace('\'', " foot ");
    if replaced.contains('"') {
        replaced = replaced.replace('"', " inch");
    } else if replaced.ends_with(|c: char| c.is_ascii_digit()) {
        replaced.push_str(" inch");
    }
    debug!("Expanded feet/inches token '{}' -> '{}'", token, replaced);
    replaced
}

/// Normalise the "ft" abbreviation
pub fn replace_ft(token: &str) -> String {
    if token == "ft" {
        "foot".to_string()
    } else {
        token.to_string()
    }
}

/// Drop "moon", an archaic unit of time
pub fn remove_moon(token: &str) -> String {
    match token {
        "moon" | "moons" => String::new(),
        _ => token.to_string(),
    }
}

/// Drop "quarter" in all its forms; it is ambiguous between time and volume
pub fn remove_quarter(token: &str) -> String {
    if matches!(token, "quarter" | "quarters") || token.contains("-quarter") {
        String::new()
    } else {
        token.to_string()
    }
}
