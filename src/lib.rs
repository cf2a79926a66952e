//! # Measure Extract
//!
//! Extracts quantities such as "3 feet" or "2 foot 5 inch" from dependency-parsed
//! text and normalises them to the standard unit of a measurement kind.
//!
//! The pipeline is: [`text_processing::Formatter`] rewrites raw lines, an
//! external parser (behind [`syntax::NlpProvider`]) produces sentences,
//! [`tagger::MeasurementTagger`] finds unit phrases and their numbers, and
//! [`converter::Converter`] normalises the results.

pub mod converter;
pub mod extractor;
pub mod lexicon;
pub mod measurement_config;
pub mod measurement_errors;
pub mod measurement_patterns;
pub mod measurement_types;
pub mod syntax;
pub mod tagger;
pub mod text_processing;
pub mod unit_conversion;
pub mod utils;
