//! # Measurement Patterns Module
//!
//! This module contains the regex patterns used to rewrite raw tokens before parsing.

use lazy_static::lazy_static;
use regex::Regex;

/// Digits glued to letters, optionally followed by more digits ("12feet12")
pub const SPLIT_NUMERALS_PATTERN: &str = r"(?i)^([0-9]+)([a-z]+)([0-9]+)?$";

/// Purely numeric tokens, possibly parenthesised, with thousands separators
pub const COMMA_NUMBER_PATTERN: &str = r"^[()0-9,]+$";

/// Feet written with an apostrophe, optionally followed by inches ("3'7\"", "(3'7)")
pub const FEET_INCHES_PATTERN: &str = r#"^(\(?[0-9]+')([0-9]+"?\)?)?"#;

// Lazy static regexes to avoid recompilation per token
lazy_static! {
    pub static ref SPLIT_NUMERALS_REGEX: Regex =
        Regex::new(SPLIT_NUMERALS_PATTERN).expect("Numeral split pattern should be valid");
    pub static ref COMMA_NUMBER_REGEX: Regex =
        Regex::new(COMMA_NUMBER_PATTERN).expect("Comma number pattern should be valid");
    pub static ref FEET_INCHES_REGEX: Regex =
        Regex::new(FEET_INCHES_PATTERN).expect("Feet/inches pattern should be valid");
}
